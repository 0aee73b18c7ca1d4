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

//! Library errors.

use std::error::Error;
use std::fmt;

/// Cause of error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiProblemErrorKind {
    /// General failure. See message for details.
    Unspecified,
    /// The entity could not be found.
    NotFound,
    /// The entity is not in the expected format.
    Malformed,
}

impl ApiProblemErrorKind {
    /// Create a new instance with an error message.
    pub fn error_with_msg<S: AsRef<str>>(self, msg: S) -> ApiProblemError {
        ApiProblemError {
            kind: self,
            msg: Some(msg.as_ref().to_string()),
        }
    }
}

impl fmt::Display for ApiProblemErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/** Library error.

Create a new instance via [ApiProblemErrorKind].
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiProblemError {
    kind: ApiProblemErrorKind,
    msg: Option<String>,
}

impl ApiProblemError {
    /// Return the type of error.
    pub fn kind(&self) -> &ApiProblemErrorKind {
        &self.kind
    }

    /// Return the human-readable message without the kind prefix.
    pub fn message(&self) -> Option<&str> {
        self.msg.as_deref()
    }
}

impl fmt::Display for ApiProblemError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(msg) = &self.msg {
            write!(f, "{} {}", self.kind, msg)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}

impl AsRef<ApiProblemError> for ApiProblemError {
    fn as_ref(&self) -> &ApiProblemError {
        self
    }
}

impl Error for ApiProblemError {}
