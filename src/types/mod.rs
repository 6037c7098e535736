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
//! # Keystone v3 types
//!
//! Request and response bodies of the Keystone v3 REST API subset used by
//! the IdM. Responses keep unknown attributes in a flattened `extra` value
//! the same way Keystone itself stores them.
use secrecy::{ExposeSecret, SecretString};
use serde::Serializer;

pub mod application_role;
pub mod auth;
pub mod domain;
pub mod project;
pub mod role;
pub mod user;

pub use application_role::*;
pub use auth::*;
pub use domain::*;
pub use project::*;
pub use role::*;
pub use user::*;

/// Serialize an optional secret exposing its value. Used for the write-only
/// password attributes.
pub(crate) fn serialize_optional_secret<S>(
    secret: &Option<SecretString>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match secret {
        Some(val) => serializer.serialize_some(val.expose_secret()),
        None => serializer.serialize_none(),
    }
}

/// Serialize a secret exposing its value.
pub(crate) fn serialize_secret<S>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(secret.expose_secret())
}
