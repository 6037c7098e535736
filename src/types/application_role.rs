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
//! Application scoped roles of the FIWARE `OS-ROLES` Keystone extension.
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::BuilderError;

/// Role owned by an application.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct ApplicationRole {
    /// Role ID.
    pub id: String,
    /// Role name.
    pub name: String,
    /// Whether the application owners may modify the role.
    #[serde(default = "default_true")]
    pub is_editable: bool,
    /// ID of the application owning the role.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub extra: Option<Value>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct ApplicationRoleResponse {
    /// Role object.
    pub role: ApplicationRole,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct ApplicationRoleList {
    /// Collection of role objects.
    pub roles: Vec<ApplicationRole>,
}

/// New application role.
#[derive(Builder, Clone, Debug, Deserialize, PartialEq, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct ApplicationRoleCreate {
    /// Role name.
    pub name: String,
    /// Whether the application owners may modify the role.
    #[builder(default = "true")]
    pub is_editable: bool,
    /// ID of the application owning the role.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
    /// Additional role attributes. Must be a JSON object.
    #[builder(default)]
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub extra: Option<Value>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ApplicationRoleCreateRequest {
    /// Role object.
    pub role: ApplicationRoleCreate,
}

/// Application role update. `is_editable` is always sent and defaults to
/// `true`.
#[derive(Builder, Clone, Debug, Deserialize, PartialEq, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct ApplicationRoleUpdate {
    /// New role name.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Whether the application owners may modify the role.
    #[builder(default = "true")]
    pub is_editable: bool,
    /// ID of the application owning the role.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
    /// Additional role attributes. Must be a JSON object.
    #[builder(default)]
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub extra: Option<Value>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ApplicationRoleUpdateRequest {
    /// Role object.
    pub role: ApplicationRoleUpdate,
}

fn default_true() -> bool {
    true
}
