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

//! Catalog of problem categories.

use crate::Problem;
use chrono::Local;
use http::StatusCode;

/// Category of a [Problem] with a stable identifier and display title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProblemType {
    /// The request body could not be bound to the expected structure.
    UnreadableEntity,
    /// The requested entity does not exist.
    EntityNotFound,
    /// A request path segment could not be bound to its declared type.
    InvalidParameter,
}

impl ProblemType {
    /// All known categories.
    pub const ALL: [ProblemType; 3] = [
        Self::UnreadableEntity,
        Self::EntityNotFound,
        Self::InvalidParameter,
    ];

    /// URI reference used as the `type` of the [Problem].
    pub const fn uri(&self) -> &'static str {
        match self {
            Self::UnreadableEntity => "/problems/unreadable-entity",
            Self::EntityNotFound => "/problems/entity-not-found",
            Self::InvalidParameter => "/problems/invalid-parameter",
        }
    }

    /// Display title used as the `title` of the [Problem].
    pub const fn title(&self) -> &'static str {
        match self {
            Self::UnreadableEntity => "Invalid request body",
            Self::EntityNotFound => "Entity not found",
            Self::InvalidParameter => "Invalid parameter",
        }
    }

    /// Return a new timestamped [Problem] of this category.
    pub fn as_problem<S: Into<String>>(&self, status: StatusCode, detail: S) -> Problem {
        self.problem(status, Some(detail.into()))
    }

    /// Return a new timestamped [Problem] of this category with an optional
    /// `detail`.
    pub fn problem(&self, status: StatusCode, detail: Option<String>) -> Problem {
        Problem {
            status,
            type_uri: Some(self.uri().to_string()),
            title: Some(self.title().to_string()),
            timestamp: Some(Local::now().naive_local()),
            detail,
        }
    }
}
