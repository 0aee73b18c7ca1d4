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

//! Deserialization of JSON request bodies with field path tracking.

use serde::de::DeserializeOwned;
use serde_json::error::Category;
use serde_path_to_error::Segment;

/// A field received a value that is incompatible with its declared type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "Property '{path}' received value '{value}' which is of invalid type. Expected type is '{expected_type}'."
)]
pub struct TypeMismatch {
    /// Dotted path of the field, outer to inner. Sequence elements are
    /// rendered as `[index]`.
    pub path: String,
    /// The offending value.
    pub value: String,
    /// Name of the expected type as reported by the deserializer.
    pub expected_type: String,
}

/// Reason why a request body could not be read.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BodyDefect {
    /// See [TypeMismatch].
    #[error("Request body has a value of invalid type.")]
    TypeMismatch(#[from] TypeMismatch),
    /// The body is not well-formed JSON.
    #[error("Request body is not valid JSON: {0}")]
    Syntax(String),
    /// The body is valid JSON, but does not match the expected structure.
    #[error("Request body does not match the expected structure: {0}")]
    Data(String),
    /// The body could not be received.
    #[error("Request body could not be received: {0}")]
    Payload(String),
}

/// Deserialize `bytes` as JSON into `T`.
///
/// Wrong value types are reported as [BodyDefect::TypeMismatch] together
/// with the path of the field that received the value.
pub fn from_json_slice<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, BodyDefect> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    let value = serde_path_to_error::deserialize(&mut deserializer).map_err(body_defect)?;
    deserializer
        .end()
        .map_err(|e| BodyDefect::Syntax(e.to_string()))?;
    Ok(value)
}

fn body_defect(e: serde_path_to_error::Error<serde_json::Error>) -> BodyDefect {
    let path = dotted_path(e.path());
    let inner = e.into_inner();
    match inner.classify() {
        Category::Syntax | Category::Eof => BodyDefect::Syntax(inner.to_string()),
        Category::Io => BodyDefect::Payload(inner.to_string()),
        Category::Data => {
            let msg = message_without_position(&inner);
            if let Some((value, expected_type)) = parse_invalid_type(&msg) {
                BodyDefect::TypeMismatch(TypeMismatch {
                    path,
                    value,
                    expected_type,
                })
            } else {
                BodyDefect::Data(inner.to_string())
            }
        }
    }
}

/// Join the path segments with `.` in outer-to-inner order.
fn dotted_path(path: &serde_path_to_error::Path) -> String {
    let mut ret = String::new();
    for segment in path.iter() {
        match segment {
            Segment::Seq { index } => ret.push_str(&format!("[{index}]")),
            Segment::Map { key } => push_field(&mut ret, key),
            Segment::Enum { variant } => push_field(&mut ret, variant),
            Segment::Unknown => push_field(&mut ret, "?"),
        }
    }
    ret
}

fn push_field(path: &mut String, name: &str) {
    if !path.is_empty() {
        path.push('.');
    }
    path.push_str(name);
}

fn message_without_position(e: &serde_json::Error) -> String {
    let msg = e.to_string();
    if e.line() == 0 {
        return msg;
    }
    let position = format!(" at line {} column {}", e.line(), e.column());
    msg.strip_suffix(&position)
        .map(str::to_string)
        .unwrap_or(msg)
}

/// Split a serde "invalid type" or "invalid value" message into the offending
/// value and the expected type.
fn parse_invalid_type(msg: &str) -> Option<(String, String)> {
    let unexpected_and_expected = msg
        .strip_prefix("invalid type: ")
        .or_else(|| msg.strip_prefix("invalid value: "))?;
    let (unexpected, expected) = unexpected_and_expected.rsplit_once(", expected ")?;
    Some((unexpected_value(unexpected), expected.to_string()))
}

/// Render serde's description of an unexpected value as the bare value.
fn unexpected_value(unexpected: &str) -> String {
    if let Some(quoted) = unexpected.strip_prefix("string ") {
        return serde_json::from_str::<String>(quoted).unwrap_or_else(|_| {
            quoted
                .trim_start_matches('"')
                .trim_end_matches('"')
                .to_string()
        });
    }
    match (unexpected.find('`'), unexpected.rfind('`')) {
        (Some(start), Some(end)) if start < end => unexpected[start + 1..end].to_string(),
        _ => unexpected.to_string(),
    }
}
