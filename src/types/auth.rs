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
//! Token issuing (`POST /v3/auth/tokens`) request and response bodies.
use chrono::{DateTime, Utc};
use derive_builder::Builder;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::error::BuilderError;
use crate::types::role::Role;
use crate::types::serialize_secret;

#[derive(Clone, Debug, Serialize)]
pub struct AuthRequest {
    /// An identity object.
    pub auth: AuthRequestInner,
}

#[derive(Clone, Debug, Serialize)]
pub struct AuthRequestInner {
    /// An identity object.
    pub identity: Identity,

    /// The authorization scope. A project given by name must also name its
    /// domain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,
}

#[derive(Builder, Clone, Debug, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct Identity {
    /// The authentication methods.
    pub methods: Vec<String>,

    /// The password object, contains the authentication information.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<PasswordAuth>,
}

#[derive(Builder, Clone, Debug, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct PasswordAuth {
    /// A user object.
    pub user: UserPassword,
}

#[derive(Builder, Clone, Debug, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct UserPassword {
    /// User Name.
    pub name: String,
    /// User domain.
    pub domain: ScopeDomain,
    /// User password.
    #[serde(serialize_with = "serialize_secret")]
    pub password: SecretString,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Project scope.
    Project(ScopeProject),
}

#[derive(Builder, Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(into, strip_option))]
pub struct ScopeProject {
    /// Project ID.
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Project Name.
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Project domain.
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<ScopeDomain>,
}

#[derive(Builder, Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(into, strip_option))]
pub struct ScopeDomain {
    /// Domain ID.
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Domain Name.
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Issued token information.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Token {
    /// The authentication methods used to obtain the token.
    #[serde(default)]
    pub methods: Vec<String>,
    /// The date and time when the token expires.
    pub expires_at: DateTime<Utc>,
    /// The token owner.
    pub user: TokenUser,
    /// The project the token is scoped to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<ScopeProject>,
    /// Roles granted on the scope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<Role>>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct TokenUser {
    /// User ID.
    pub id: String,
    /// User Name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// User domain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<ScopeDomain>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct TokenResponse {
    /// Token.
    pub token: Token,
}
