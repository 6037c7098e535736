// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::error::BuilderError;

/// Errors raised while talking to Keystone.
///
/// Remote errors carry the message returned by Keystone so the caller gets
/// exactly what the identity service reported.
#[derive(Debug, Error)]
pub enum KeystoneClientError {
    /// Requested resource does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A lookup expected a single match but found several.
    #[error("{0}")]
    NoUniqueMatch(String),

    /// Authentication is missing or was rejected.
    #[error("{0}")]
    Unauthorized(String),

    /// The authenticated account may not perform the operation.
    #[error("{0}")]
    Forbidden(String),

    /// Resource already exists.
    #[error("{0}")]
    Conflict(String),

    /// Any other unsuccessful response.
    #[error("keystone returned {status}: {message}")]
    Remote { status: StatusCode, message: String },

    /// Resource ID that cannot be used as a single url path segment.
    #[error("invalid resource id: {0:?}")]
    InvalidPathSegment(String),

    /// Keystone issued a token response without the `X-Subject-Token`.
    #[error("token is missing in the keystone response")]
    TokenMissing,

    /// Request builder error.
    #[error(transparent)]
    Builder {
        #[from]
        source: BuilderError,
    },

    /// Token cannot be used as a header value.
    #[error(transparent)]
    InvalidHeader {
        #[from]
        source: reqwest::header::InvalidHeaderValue,
    },

    /// Json serialization error.
    #[error("json serde error: {}", source)]
    Json {
        #[from]
        source: serde_json::Error,
    },

    /// HTTP client error.
    #[error(transparent)]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },

    /// Url parsing error.
    #[error(transparent)]
    UrlParse {
        #[from]
        source: url::ParseError,
    },
}

/// Keystone error body: `{"error": {"code": 404, "message": "...", "title": "Not Found"}}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetails,
}

#[derive(Debug, Deserialize)]
struct ErrorDetails {
    message: String,
}

impl KeystoneClientError {
    /// Build the error from an unsuccessful Keystone response.
    pub(crate) async fn from_response(response: Response) -> Self {
        let status = response.status();
        let message = match response.text().await {
            Ok(body) => serde_json::from_str::<ErrorBody>(&body)
                .map(|x| x.error.message)
                .unwrap_or_else(|_| {
                    if body.is_empty() {
                        status.canonical_reason().unwrap_or("").to_string()
                    } else {
                        body
                    }
                }),
            Err(err) => {
                debug!("cannot read keystone error response: {}", err);
                status.canonical_reason().unwrap_or("").to_string()
            }
        };
        Self::from_status(status, message)
    }

    pub(crate) fn from_status(status: StatusCode, message: String) -> Self {
        match status {
            StatusCode::NOT_FOUND => Self::NotFound(message),
            StatusCode::UNAUTHORIZED => Self::Unauthorized(message),
            StatusCode::FORBIDDEN => Self::Forbidden(message),
            StatusCode::CONFLICT => Self::Conflict(message),
            _ => Self::Remote { status, message },
        }
    }
}

/// Pass the successful response through, convert the rest into the error.
pub(crate) async fn check_response(response: Response) -> Result<Response, KeystoneClientError> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(KeystoneClientError::from_response(response).await)
    }
}
