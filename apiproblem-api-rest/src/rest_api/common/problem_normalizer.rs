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

//! Normalization of error responses that were not built from a problem.

use super::ProblemError;
use super::problem_status;
use actix_web::ResponseError;
use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header;
use actix_web::middleware::ErrorHandlerResponse;
use actix_web::middleware::ErrorHandlers;
use apiproblem::APPLICATION_PROBLEM_JSON;
use apiproblem::ResponseBody;
use apiproblem::translator;

/// Return middleware that turns every error response into a problem.
pub fn problem_error_handlers<B: MessageBody + 'static>() -> ErrorHandlers<B> {
    ErrorHandlers::new().default_handler(normalize_error_response)
}

/// Replace a client or server error response body with a problem.
///
/// A plain text body becomes the problem `title`. Responses that already
/// carry a problem are passed on unchanged.
fn normalize_error_response<B: MessageBody + 'static>(
    res: ServiceResponse<B>,
) -> actix_web::Result<ErrorHandlerResponse<B>> {
    if is_problem_response(&res) {
        return Ok(ErrorHandlerResponse::Response(res.map_into_left_body()));
    }
    Ok(ErrorHandlerResponse::Future(Box::pin(async move {
        let (req, res) = res.into_parts();
        let status = res.status();
        let text = actix_web::body::to_bytes(res.into_body())
            .await
            .ok()
            .and_then(|bytes| String::from_utf8(bytes.to_vec()).ok())
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());
        if log::log_enabled!(log::Level::Debug) {
            log::debug!("Normalizing {status} response of '{}'.", req.path());
        }
        let problem = translator::finalize_response_body(
            text.map(ResponseBody::Text),
            problem_status(status),
        );
        let res = ProblemError::from(problem).error_response();
        Ok::<_, actix_web::Error>(ServiceResponse::new(req, res).map_into_right_body())
    })))
}

fn is_problem_response<B>(res: &ServiceResponse<B>) -> bool {
    res.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with(APPLICATION_PROBLEM_JSON))
}
