/*
    Copyright 2025 MydriaTech AB

    Licensed under the Apache License 2.0 with Free world makers exception
    1.0.0 (the "License"); you may not use this file except in compliance with
    the License. You should have obtained a copy of the License with the source
    or binary distribution in file named

        LICENSE-Apache-2.0-with-FWM-Exception-1.0.0

    Unless required by applicable law or agreed to in writing, software
    distributed under the License is distributed on an "AS IS" BASIS,
    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
    See the License for the specific language governing permissions and
    limitations under the License.
*/

//! Mapper of app errors to Actix-web [Error].

use actix_web::Error;
use actix_web::HttpResponse;
use actix_web::ResponseError;
use actix_web::http::StatusCode;
use apiproblem::APPLICATION_PROBLEM_JSON;
pub use apiproblem::ApiProblemError;
use apiproblem::ApiProblemErrorKind;
use apiproblem::FailureReason;
use apiproblem::Problem;
use apiproblem::translator;
use std::fmt;

/// Mapper of app errors to Actix-web [Error].
pub struct ApiErrorMapper {}

impl ApiErrorMapper {
    /// Return REST API [Error] from library defined error.
    pub fn from_error<E: AsRef<ApiProblemError>>(e: E) -> Error {
        let e = e.as_ref();
        if log::log_enabled!(log::Level::Debug) {
            log::debug!("Will respond with error. kind: {} msg: {e}", e.kind());
        }
        match e.kind() {
            ApiProblemErrorKind::NotFound => {
                // HTTP 404
                Self::from_problem(translator::handle_entity_not_found(e))
            }
            _other => Self::from_reason(FailureReason::from_error(e)),
        }
    }

    /// Return REST API [Error] for a request body that could not be read.
    pub fn from_unreadable_body(
        e: &(dyn std::error::Error + 'static),
        target_status: StatusCode,
    ) -> Error {
        Self::from_problem(translator::handle_unreadable_body(
            e,
            problem_status(target_status),
        ))
    }

    /// Return REST API [Error] for a classified failure.
    pub fn from_reason(reason: FailureReason) -> Error {
        Self::from_problem(translator::classify(reason))
    }

    /// Return REST API [Error] that will respond with the [Problem].
    pub fn from_problem(problem: Problem) -> Error {
        if log::log_enabled!(log::Level::Debug) {
            log::debug!(
                "Will respond with problem. status: {} type: {:?}",
                problem.status,
                problem.type_uri
            );
        }
        Error::from(ProblemError::from(problem))
    }
}

/// Convert an Actix-web status code to the one used by [Problem].
pub fn problem_status(status: StatusCode) -> apiproblem::StatusCode {
    apiproblem::StatusCode::from_u16(status.as_u16())
        .unwrap_or(apiproblem::StatusCode::INTERNAL_SERVER_ERROR)
}

/// [ResponseError] with a [Problem] as response body.
#[derive(Debug)]
pub struct ProblemError {
    problem: Problem,
}

impl From<Problem> for ProblemError {
    fn from(problem: Problem) -> Self {
        Self { problem }
    }
}

impl fmt::Display for ProblemError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.problem.title {
            Some(title) => write!(f, "{} {title}", self.problem.status.as_u16()),
            None => write!(f, "{}", self.problem.status.as_u16()),
        }
    }
}

impl ResponseError for ProblemError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.problem.status.as_u16())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        match serde_json::to_string(&self.problem) {
            Ok(body) => HttpResponse::build(self.status_code())
                .content_type(APPLICATION_PROBLEM_JSON)
                .body(body),
            Err(e) => {
                log::error!("Failed to serialize problem {:?}: {e}", self.problem);
                HttpResponse::InternalServerError().finish()
            }
        }
    }
}
