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

//! JSON request body extractor that answers with problem details.

use super::ApiErrorMapper;
use actix_web::Error;
use actix_web::FromRequest;
use actix_web::HttpRequest;
use actix_web::dev::Payload;
use actix_web::http::StatusCode;
use actix_web::http::header;
use actix_web::web;
use apiproblem::BodyDefect;
use futures::StreamExt;
use futures::future::LocalBoxFuture;
use serde::de::DeserializeOwned;

/// Default limit of the request body size (256 KiB).
pub const DEFAULT_BODY_LIMIT: usize = 256 * 1024;

/// Configuration of [ProblemJson] registered as app data.
#[derive(Clone, Debug)]
pub struct ProblemJsonConfig {
    limit: usize,
}

impl ProblemJsonConfig {
    /// Return a new instance that accepts bodies of up to `limit` bytes.
    pub fn with_limit(limit: usize) -> Self {
        Self { limit }
    }
}

impl Default for ProblemJsonConfig {
    fn default() -> Self {
        Self::with_limit(DEFAULT_BODY_LIMIT)
    }
}

/** JSON request body.

Unlike [actix_web::web::Json], a value of invalid type is reported with the
path of the offending field in the problem `detail`.
*/
#[derive(Debug)]
pub struct ProblemJson<T>(pub T);

impl<T> ProblemJson<T> {
    /// Return the deserialized body.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: DeserializeOwned + 'static> FromRequest for ProblemJson<T> {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let limit = req
            .app_data::<ProblemJsonConfig>()
            .map(|config| config.limit)
            .unwrap_or(DEFAULT_BODY_LIMIT);
        let content_type_check = assert_json_content_type(req);
        let declared_length = declared_content_length(req);
        let payload = payload.take();
        Box::pin(async move {
            content_type_check?;
            if declared_length.is_some_and(|declared_length| declared_length > limit) {
                return Err(overflow(limit));
            }
            let content_length_estimate = declared_length.unwrap_or(1024).min(limit);
            let body = read_full_body(content_length_estimate, limit, payload).await?;
            apiproblem::from_json_slice::<T>(&body)
                .map(ProblemJson)
                .map_err(|defect| {
                    ApiErrorMapper::from_unreadable_body(&defect, StatusCode::BAD_REQUEST)
                })
        })
    }
}

/// Accept requests without content type or with a JSON content type.
fn assert_json_content_type(req: &HttpRequest) -> Result<(), Error> {
    let Some(content_type) = req.headers().get(header::CONTENT_TYPE) else {
        return Ok(());
    };
    let essence = content_type
        .to_str()
        .unwrap_or_default()
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    if essence == "application/json" || essence.ends_with("+json") {
        Ok(())
    } else {
        let defect = BodyDefect::Payload(format!("Unsupported content type '{essence}'."));
        Err(ApiErrorMapper::from_unreadable_body(
            &defect,
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
        ))
    }
}

/// Return the declared content-length, if any.
fn declared_content_length(req: &HttpRequest) -> Option<usize> {
    req.headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|header_value| header_value.to_str().ok())
        .and_then(|header_value_str| header_value_str.parse::<usize>().ok())
}

fn overflow(limit: usize) -> Error {
    let defect = BodyDefect::Payload(format!("Message body exceeded {limit} bytes."));
    ApiErrorMapper::from_unreadable_body(&defect, StatusCode::PAYLOAD_TOO_LARGE)
}

async fn read_full_body(
    content_length_estimate: usize,
    limit: usize,
    mut payload: Payload,
) -> Result<web::Bytes, Error> {
    let mut body = web::BytesMut::with_capacity(content_length_estimate);
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|e| {
            let defect = BodyDefect::Payload(e.to_string());
            ApiErrorMapper::from_unreadable_body(&defect, StatusCode::BAD_REQUEST)
        })?;
        // limit max size of in-memory payload
        if (body.len() + chunk.len()) > limit {
            return Err(overflow(limit));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body.freeze())
}
