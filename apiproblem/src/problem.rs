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

//! Problem details response body.

use chrono::NaiveDateTime;
use http::StatusCode;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

/// Media type of a serialized [Problem].
pub const APPLICATION_PROBLEM_JSON: &str = "application/problem+json";

/** Standardized error payload of a failed request.

Build it as a plain struct literal. Fields without a value are left out of the
JSON representation instead of being emitted as `null`.

```
use apiproblem::Problem;
use http::StatusCode;

let problem = Problem {
    title: Some("Bad Request".to_string()),
    ..Problem::with_status(StatusCode::BAD_REQUEST)
};
assert_eq!(
    serde_json::to_string(&problem).unwrap(),
    r#"{"status":400,"title":"Bad Request"}"#
);
```
*/
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub struct Problem {
    /// HTTP status code of the response.
    #[serde(
        serialize_with = "serialize_status_code",
        deserialize_with = "deserialize_status_code"
    )]
    #[cfg_attr(feature = "utoipa", schema(value_type = u16, example = 400))]
    pub status: StatusCode,
    /// URI reference identifying the problem category.
    #[serde(rename = "type", default)]
    pub type_uri: Option<String>,
    /// Short human-readable summary of the problem category.
    #[serde(default)]
    pub title: Option<String>,
    /// Local time when the problem was constructed.
    #[serde(default)]
    #[cfg_attr(feature = "utoipa", schema(value_type = Option<String>, format = DateTime))]
    pub timestamp: Option<NaiveDateTime>,
    /// Explanation specific to this occurrence of the problem.
    #[serde(default)]
    pub detail: Option<String>,
}

impl Problem {
    /// Return a new instance that only holds the `status`.
    pub fn with_status(status: StatusCode) -> Self {
        Self {
            status,
            type_uri: None,
            title: None,
            timestamp: None,
            detail: None,
        }
    }

    /// Return the standard reason phrase of the `status` or the numeric code
    /// for non-standard codes.
    pub fn reason_phrase(status: StatusCode) -> String {
        status
            .canonical_reason()
            .unwrap_or(status.as_str())
            .to_string()
    }
}

/// Upstream response body that will be normalized into a [Problem].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
    /// Already structured body.
    Problem(Problem),
    /// Plain text message.
    Text(String),
}

impl From<Problem> for ResponseBody {
    fn from(problem: Problem) -> Self {
        Self::Problem(problem)
    }
}

impl From<String> for ResponseBody {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for ResponseBody {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

fn serialize_status_code<S: Serializer>(
    status: &StatusCode,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_u16(status.as_u16())
}

fn deserialize_status_code<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<StatusCode, D::Error> {
    let code = u16::deserialize(deserializer)?;
    StatusCode::from_u16(code).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_are_omitted() {
        let json = serde_json::to_value(Problem::with_status(StatusCode::NOT_FOUND)).unwrap();
        assert_eq!(json, serde_json::json!({ "status": 404 }));
    }

    #[test]
    fn all_fields_are_emitted_with_wire_names() {
        let timestamp = NaiveDateTime::parse_from_str("2024-01-01T12:00:00", "%Y-%m-%dT%H:%M:%S")
            .unwrap();
        let problem = Problem {
            status: StatusCode::BAD_REQUEST,
            type_uri: Some("/problems/unreadable-entity".to_string()),
            title: Some("Invalid request body".to_string()),
            timestamp: Some(timestamp),
            detail: Some("details".to_string()),
        };
        let json = serde_json::to_value(&problem).unwrap();
        assert_eq!(json["status"], 400);
        assert_eq!(json["type"], "/problems/unreadable-entity");
        assert_eq!(json["title"], "Invalid request body");
        assert_eq!(json["timestamp"], "2024-01-01T12:00:00");
        assert_eq!(json["detail"], "details");
    }

    #[test]
    fn parses_sparse_problem() {
        let problem: Problem =
            serde_json::from_str(r#"{"status":404,"title":"Not Found"}"#).unwrap();
        assert_eq!(problem.status, StatusCode::NOT_FOUND);
        assert_eq!(problem.title.as_deref(), Some("Not Found"));
        assert!(problem.detail.is_none());
        assert!(serde_json::from_str::<Problem>(r#"{"status":1000}"#).is_err());
    }

    #[test]
    fn reason_phrase_of_non_standard_status_is_the_code() {
        assert_eq!(Problem::reason_phrase(StatusCode::IM_A_TEAPOT), "I'm a teapot");
        assert_eq!(
            Problem::reason_phrase(StatusCode::from_u16(599).unwrap()),
            "599"
        );
    }
}
