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

//! Translation of request failures into [Problem] response bodies.
//!
//! Failures are converted once into a [FailureReason] where they are raised
//! and [classify] turns every reason into a well-formed [Problem].

use crate::ApiProblemError;
use crate::ApiProblemErrorKind;
use crate::BodyDefect;
use crate::Problem;
use crate::ProblemType;
use crate::ResponseBody;
use crate::TypeMismatch;
use http::StatusCode;
use std::error::Error;

/// Classified reason of a failed request.
#[derive(Debug, Clone)]
pub enum FailureReason {
    /// The request body could not be read.
    UnreadableBody {
        /// Why the body could not be read.
        defect: BodyDefect,
        /// Status to respond with unless a more specific one applies.
        status: StatusCode,
    },
    /// The requested entity does not exist.
    EntityNotFound {
        /// Message of the failure, if any.
        detail: Option<String>,
    },
    /// A request path segment could not be bound.
    InvalidParameter {
        /// Status to respond with.
        status: StatusCode,
        /// What was wrong with the parameter.
        detail: String,
    },
    /// Anything else.
    Unclassified {
        /// Status to respond with.
        status: StatusCode,
        /// Body produced upstream, if any.
        body: Option<ResponseBody>,
    },
}

/// Recognizes a known failure somewhere in an error chain.
type Matcher = fn(&(dyn Error + 'static)) -> Option<FailureReason>;

/// Matchers tried in order by [FailureReason::from_error].
const MATCHERS: [Matcher; 3] = [match_domain_error, match_type_mismatch, match_body_defect];

impl FailureReason {
    /// Classify an arbitrary error.
    ///
    /// Errors that no matcher recognizes end up as
    /// [FailureReason::Unclassified] with `500 Internal Server Error`.
    pub fn from_error(error: &(dyn Error + 'static)) -> Self {
        MATCHERS
            .iter()
            .find_map(|matcher| matcher(error))
            .unwrap_or(Self::Unclassified {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: None,
            })
    }
}

impl From<ApiProblemError> for FailureReason {
    fn from(error: ApiProblemError) -> Self {
        Self::from_error(&error)
    }
}

impl From<BodyDefect> for FailureReason {
    fn from(defect: BodyDefect) -> Self {
        Self::UnreadableBody {
            defect,
            status: StatusCode::BAD_REQUEST,
        }
    }
}

/// Build the response body for a classified failure.
pub fn classify(reason: FailureReason) -> Problem {
    match reason {
        FailureReason::UnreadableBody { defect, status } => handle_unreadable_body(&defect, status),
        FailureReason::EntityNotFound { detail } => entity_not_found(detail),
        FailureReason::InvalidParameter { status, detail } => {
            ProblemType::InvalidParameter.as_problem(status, detail)
        }
        FailureReason::Unclassified { status, body } => finalize_response_body(body, status),
    }
}

/// Build the response body for a request body that could not be read.
///
/// When the root cause is a [TypeMismatch] the response is a
/// `400 Bad Request` [ProblemType::UnreadableEntity] naming the field.
/// Everything else gets the generic `target_status` response.
pub fn handle_unreadable_body(error: &(dyn Error + 'static), target_status: StatusCode) -> Problem {
    match root_cause(error).downcast_ref::<TypeMismatch>() {
        Some(mismatch) => ProblemType::UnreadableEntity
            .as_problem(StatusCode::BAD_REQUEST, mismatch.to_string()),
        None => finalize_response_body(None, target_status),
    }
}

/// Build the `404 Not Found` response body for a missing entity.
pub fn handle_entity_not_found(error: &ApiProblemError) -> Problem {
    entity_not_found(error.message().map(str::to_string))
}

fn entity_not_found(detail: Option<String>) -> Problem {
    ProblemType::EntityNotFound.problem(StatusCode::NOT_FOUND, detail)
}

/// Normalize an upstream response body into a [Problem].
///
/// A missing body becomes the reason phrase of `status` as title and plain
/// text becomes the title. A [Problem] is returned unchanged.
pub fn finalize_response_body(body: Option<ResponseBody>, status: StatusCode) -> Problem {
    match body {
        None => Problem {
            title: Some(Problem::reason_phrase(status)),
            ..Problem::with_status(status)
        },
        Some(ResponseBody::Text(text)) => Problem {
            title: Some(text),
            ..Problem::with_status(status)
        },
        Some(ResponseBody::Problem(problem)) => problem,
    }
}

/// Return the innermost error of the `source` chain.
pub fn root_cause<'a>(error: &'a (dyn Error + 'static)) -> &'a (dyn Error + 'static) {
    let mut ret = error;
    while let Some(source) = ret.source() {
        ret = source;
    }
    ret
}

/// Iterate over `error` and all of its sources, outermost first.
fn error_chain<'a>(
    error: &'a (dyn Error + 'static),
) -> impl Iterator<Item = &'a (dyn Error + 'static)> {
    std::iter::successors(Some(error), |&e| e.source())
}

fn match_domain_error(error: &(dyn Error + 'static)) -> Option<FailureReason> {
    let domain_error = error_chain(error).find_map(|e| e.downcast_ref::<ApiProblemError>())?;
    match domain_error.kind() {
        ApiProblemErrorKind::NotFound => Some(FailureReason::EntityNotFound {
            detail: domain_error.message().map(str::to_string),
        }),
        ApiProblemErrorKind::Malformed => Some(FailureReason::UnreadableBody {
            defect: BodyDefect::Data(domain_error.to_string()),
            status: StatusCode::BAD_REQUEST,
        }),
        ApiProblemErrorKind::Unspecified => None,
    }
}

fn match_type_mismatch(error: &(dyn Error + 'static)) -> Option<FailureReason> {
    root_cause(error)
        .downcast_ref::<TypeMismatch>()
        .map(|mismatch| BodyDefect::TypeMismatch(mismatch.clone()).into())
}

fn match_body_defect(error: &(dyn Error + 'static)) -> Option<FailureReason> {
    error_chain(error)
        .find_map(|e| {
            e.downcast_ref::<BodyDefect>().cloned().or_else(|| {
                e.downcast_ref::<serde_json::Error>().map(|e| {
                    if e.is_syntax() || e.is_eof() {
                        BodyDefect::Syntax(e.to_string())
                    } else {
                        BodyDefect::Data(e.to_string())
                    }
                })
            })
        })
        .map(FailureReason::from)
}
