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
//! # Error
//!
//! Errors shared by the request types and re-exports of the client and
//! adapter errors.
use thiserror::Error;

pub use crate::adapter::error::IdentityAdapterError;
pub use crate::client::error::KeystoneClientError;

/// Request builder error.
#[derive(Debug, Error)]
pub enum BuilderError {
    /// Mandatory field is not set.
    #[error("{0} must be set")]
    UninitializedField(&'static str),

    /// Builder validation failed.
    #[error("{0}")]
    Validation(String),
}

impl From<derive_builder::UninitializedFieldError> for BuilderError {
    fn from(value: derive_builder::UninitializedFieldError) -> Self {
        Self::UninitializedField(value.field_name())
    }
}

impl From<String> for BuilderError {
    fn from(value: String) -> Self {
        Self::Validation(value)
    }
}
