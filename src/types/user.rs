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
use derive_builder::Builder;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::BuilderError;
use crate::types::serialize_optional_secret;

/// User response object.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct User {
    /// The ID of the default project for the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_project_id: Option<String>,
    /// User domain ID.
    pub domain_id: String,
    /// User email. Keystone keeps it as an extra attribute, therefore it is
    /// neither mandatory nor unique.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// If the user is enabled, this value is true. If the user is disabled,
    /// this value is false.
    #[serde(default)]
    pub enabled: bool,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub extra: Option<Value>,
    /// User ID.
    pub id: String,
    /// User name.
    pub name: String,
}

/// Complete response with the user data.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct UserResponse {
    /// User object.
    pub user: User,
}

/// List of users.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct UserList {
    /// Collection of user objects.
    pub users: Vec<User>,
}

/// User list parameters.
#[derive(Builder, Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct UserListParameters {
    /// Filter users by Name.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Create user data.
#[derive(Builder, Clone, Debug, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct UserCreate {
    /// The ID of the default project for the user.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_project_id: Option<String>,
    /// User domain ID.
    pub domain_id: String,
    /// User email.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// If the user is enabled, this value is true. If the user is disabled,
    /// this value is false.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// The user name. Must be unique within the owning domain.
    pub name: String,
    /// The password for the user.
    #[builder(default)]
    #[serde(
        serialize_with = "serialize_optional_secret",
        skip_serializing_if = "Option::is_none"
    )]
    pub password: Option<SecretString>,
}

/// Complete create user request.
#[derive(Clone, Debug, Serialize)]
pub struct UserCreateRequest {
    /// User object.
    pub user: UserCreate,
}

/// Update user data.
#[derive(Builder, Clone, Debug, Default, Serialize)]
#[builder(build_fn(error = "BuilderError"))]
#[builder(setter(strip_option, into))]
pub struct UserUpdate {
    /// The ID of the default project for the user.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_project_id: Option<String>,
    /// User email.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Enable or disable the user.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// The user name.
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New password for the user.
    #[builder(default)]
    #[serde(
        serialize_with = "serialize_optional_secret",
        skip_serializing_if = "Option::is_none"
    )]
    pub password: Option<SecretString>,
}

/// Complete update user request.
#[derive(Clone, Debug, Serialize)]
pub struct UserUpdateRequest {
    /// User object.
    pub user: UserUpdate,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_user_extra_attributes() {
        let sot: UserResponse = serde_json::from_value(json!({"user": {
            "id": "uid",
            "name": "alice",
            "domain_id": "default",
            "enabled": false,
            "email": "alice@example.com",
            "default_project_id": "pid",
            "links": {"self": "http://localhost/v3/users/uid"}
        }}))
        .unwrap();
        assert_eq!(Some("alice@example.com".to_string()), sot.user.email);
        assert_eq!(Some("pid".to_string()), sot.user.default_project_id);
        assert!(!sot.user.enabled);
        assert_eq!(
            Some(&json!({"self": "http://localhost/v3/users/uid"})),
            sot.user.extra.as_ref().and_then(|x| x.get("links"))
        );
    }

    #[test]
    fn test_user_list_password_expiry_without_offset() {
        let sot: UserList = serde_json::from_value(json!({"users": [
            {
                "id": "uid",
                "name": "alice",
                "domain_id": "default",
                "enabled": true,
                "email": "alice@example.com",
                "password_expires_at": "2016-11-06T15:32:17.000000"
            },
            {
                "id": "bid",
                "name": "bob",
                "domain_id": "default",
                "enabled": true,
                "password_expires_at": null
            }
        ]}))
        .unwrap();
        assert_eq!(2, sot.users.len());
        assert_eq!(
            Some(&json!("2016-11-06T15:32:17.000000")),
            sot.users[0]
                .extra
                .as_ref()
                .and_then(|x| x.get("password_expires_at"))
        );
    }

    #[test]
    fn test_user_without_email() {
        let sot: User = serde_json::from_value(json!({
            "id": "uid",
            "name": "admin",
            "domain_id": "default",
            "enabled": true,
        }))
        .unwrap();
        assert!(sot.email.is_none());
        assert!(sot.default_project_id.is_none());
    }

    #[test]
    fn test_user_create_exposes_password() {
        let sot = UserCreateRequest {
            user: UserCreateBuilder::default()
                .name("alice")
                .domain_id("default")
                .email("alice@example.com")
                .enabled(false)
                .default_project_id("pid")
                .password(SecretString::from("pw123"))
                .build()
                .unwrap(),
        };
        assert_eq!(
            json!({"user": {
                "name": "alice",
                "domain_id": "default",
                "email": "alice@example.com",
                "enabled": false,
                "default_project_id": "pid",
                "password": "pw123"
            }}),
            serde_json::to_value(&sot).unwrap()
        );
        assert!(!format!("{:?}", sot).contains("pw123"));
    }

    #[test]
    fn test_user_update_skips_unset() {
        let sot = UserUpdateBuilder::default().enabled(true).build().unwrap();
        assert_eq!(
            json!({"enabled": true}),
            serde_json::to_value(&sot).unwrap()
        );
    }
}
