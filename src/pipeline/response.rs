//! Error classification and the JSON error envelope
//!
//! # Mapping
//!
//! | Error | Stage | Kind | HTTP status |
//! |-------|-------|------|-------------|
//! | `FetchError::InvalidUrl` | fetch | InvalidUrl | 400 |
//! | `FetchError::Timeout` | fetch | FetchTimeout | 504 |
//! | `FetchError::Network` | fetch | FetchNetworkError | 502 |
//! | `FetchError::Http` | fetch | FetchHttpError | 502 |
//! | `ExtractError::MalformedInput` | extract | MalformedInput | 400 |

use crate::pipeline::Stage;
use crate::{ExtractError, FetchError, PipelineError};
use serde::Serialize;

/// `{ "error": { ... } }` as returned to callers on failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub stage: Stage,
    pub kind: &'static str,
    pub message: String,
    /// Present for `FetchHttpError`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

impl PipelineError {
    /// The stage that failed
    pub fn stage(&self) -> Stage {
        match self {
            Self::Fetch(_) => Stage::Fetch,
            Self::Extract(_) => Stage::Extract,
        }
    }

    /// The error kind name
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Fetch(FetchError::InvalidUrl { .. }) => "InvalidUrl",
            Self::Fetch(FetchError::Timeout { .. }) => "FetchTimeout",
            Self::Fetch(FetchError::Network { .. }) => "FetchNetworkError",
            Self::Fetch(FetchError::Http { .. }) => "FetchHttpError",
            Self::Extract(ExtractError::MalformedInput(_)) => "MalformedInput",
        }
    }

    /// HTTP status an API layer should answer with
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Fetch(FetchError::InvalidUrl { .. }) => 400,
            Self::Fetch(FetchError::Timeout { .. }) => 504,
            Self::Fetch(FetchError::Network { .. }) | Self::Fetch(FetchError::Http { .. }) => 502,
            Self::Extract(ExtractError::MalformedInput(_)) => 400,
        }
    }

    /// Builds the error envelope
    ///
    /// The message is the underlying stage error's description, without the
    /// stage prefix carried by `Display`.
    pub fn to_response(&self) -> ErrorResponse {
        let (message, status_code) = match self {
            Self::Fetch(e @ FetchError::Http { status_code, .. }) => {
                (e.to_string(), Some(*status_code))
            }
            Self::Fetch(e) => (e.to_string(), None),
            Self::Extract(e) => (e.to_string(), None),
        };

        ErrorResponse {
            error: ErrorBody {
                stage: self.stage(),
                kind: self.kind(),
                message,
                status_code,
            },
        }
    }
}
