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
//! # Keystone client
//!
//! Typed async client for the part of the Keystone v3 API the IdM relies on.
//! A [`KeystoneClient`] is an authenticated session: it is created either by
//! issuing a new token with the admin credentials
//! ([`KeystoneClient::authenticate`]) or from an existing request token
//! ([`KeystoneClient::with_token`]). The adapter only talks to it through
//! the [`KeystoneApi`] trait.
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

mod application_role;
mod auth;
mod domain;
pub mod error;
#[cfg(test)]
pub mod mock;
mod project;
mod role;
mod user;

pub use error::KeystoneClientError;
#[cfg(test)]
pub use mock::MockKeystoneClient;

use crate::types::*;

/// Operations of the Keystone v3 API consumed by the IdM.
#[async_trait]
pub trait KeystoneApi: Send + Sync {
    /// Get the domain by ID.
    async fn get_domain<'a>(&self, domain_id: &'a str) -> Result<Domain, KeystoneClientError>;

    /// Create the project.
    async fn create_project(&self, project: ProjectCreate) -> Result<Project, KeystoneClientError>;

    /// Update the project.
    async fn update_project<'a>(
        &self,
        project_id: &'a str,
        project: ProjectUpdate,
    ) -> Result<Project, KeystoneClientError>;

    /// Delete the project.
    async fn delete_project<'a>(&self, project_id: &'a str) -> Result<(), KeystoneClientError>;

    /// Get the user by ID.
    async fn get_user<'a>(&self, user_id: &'a str) -> Result<User, KeystoneClientError>;

    /// List users.
    async fn list_users(
        &self,
        params: &UserListParameters,
    ) -> Result<Vec<User>, KeystoneClientError>;

    /// Create the user.
    async fn create_user(&self, user: UserCreate) -> Result<User, KeystoneClientError>;

    /// Update the user.
    async fn update_user<'a>(
        &self,
        user_id: &'a str,
        user: UserUpdate,
    ) -> Result<User, KeystoneClientError>;

    /// Delete the user.
    async fn delete_user<'a>(&self, user_id: &'a str) -> Result<(), KeystoneClientError>;

    /// List roles.
    async fn list_roles(
        &self,
        params: &RoleListParameters,
    ) -> Result<Vec<Role>, KeystoneClientError>;

    /// Grant the role to the user on the project.
    async fn grant_project_user_role<'a>(
        &self,
        project_id: &'a str,
        user_id: &'a str,
        role_id: &'a str,
    ) -> Result<(), KeystoneClientError>;

    /// Revoke the role of the user on the project.
    async fn revoke_project_user_role<'a>(
        &self,
        project_id: &'a str,
        user_id: &'a str,
        role_id: &'a str,
    ) -> Result<(), KeystoneClientError>;

    /// Check whether the user has the role on the project.
    async fn check_project_user_role<'a>(
        &self,
        project_id: &'a str,
        user_id: &'a str,
        role_id: &'a str,
    ) -> Result<bool, KeystoneClientError>;

    /// List application roles.
    async fn list_application_roles(&self) -> Result<Vec<ApplicationRole>, KeystoneClientError>;

    /// Create the application role.
    async fn create_application_role(
        &self,
        role: ApplicationRoleCreate,
    ) -> Result<ApplicationRole, KeystoneClientError>;

    /// Update the application role.
    async fn update_application_role<'a>(
        &self,
        role_id: &'a str,
        role: ApplicationRoleUpdate,
    ) -> Result<ApplicationRole, KeystoneClientError>;

    /// Delete the application role.
    async fn delete_application_role<'a>(
        &self,
        role_id: &'a str,
    ) -> Result<(), KeystoneClientError>;
}

/// Authenticated Keystone session.
#[derive(Clone, Debug)]
pub struct KeystoneClient {
    /// Http client sending the `X-Auth-Token` with every request.
    http_client: Client,
    /// Keystone root url (without the API version).
    base_url: Url,
}

impl KeystoneClient {
    fn http(&self) -> &Client {
        &self.http_client
    }

    /// Request url made of the given path segments. Each segment is percent
    /// encoded and stays a single segment of the path.
    fn url(&self, segments: &[&str]) -> Result<Url, KeystoneClientError> {
        if let Some(segment) = segments
            .iter()
            .find(|x| x.is_empty() || **x == "." || **x == "..")
        {
            return Err(KeystoneClientError::InvalidPathSegment(segment.to_string()));
        }
        let mut target = self.base_url.clone();
        target
            .path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(segments);
        Ok(target)
    }
}

/// Strip the trailing API version from the Keystone url so that the API paths
/// can be joined to it.
pub(crate) fn base_url(auth_url: &Url) -> Url {
    let mut url = auth_url.clone();
    let path = url.path().trim_end_matches('/');
    let path = path.strip_suffix("/v3").unwrap_or(path).to_string();
    url.set_path(&format!("{path}/"));
    url.set_query(None);
    url
}

#[async_trait]
impl KeystoneApi for KeystoneClient {
    #[tracing::instrument(level = "debug", skip(self), err(Debug))]
    async fn get_domain<'a>(&self, domain_id: &'a str) -> Result<Domain, KeystoneClientError> {
        domain::get(self, domain_id).await
    }

    #[tracing::instrument(level = "debug", skip(self), err(Debug))]
    async fn create_project(&self, project: ProjectCreate) -> Result<Project, KeystoneClientError> {
        project::create(self, project).await
    }

    #[tracing::instrument(level = "debug", skip(self), err(Debug))]
    async fn update_project<'a>(
        &self,
        project_id: &'a str,
        project: ProjectUpdate,
    ) -> Result<Project, KeystoneClientError> {
        project::update(self, project_id, project).await
    }

    #[tracing::instrument(level = "debug", skip(self), err(Debug))]
    async fn delete_project<'a>(&self, project_id: &'a str) -> Result<(), KeystoneClientError> {
        project::delete(self, project_id).await
    }

    #[tracing::instrument(level = "debug", skip(self), err(Debug))]
    async fn get_user<'a>(&self, user_id: &'a str) -> Result<User, KeystoneClientError> {
        user::get(self, user_id).await
    }

    #[tracing::instrument(level = "debug", skip(self), err(Debug))]
    async fn list_users(
        &self,
        params: &UserListParameters,
    ) -> Result<Vec<User>, KeystoneClientError> {
        user::list(self, params).await
    }

    #[tracing::instrument(level = "debug", skip(self), err(Debug))]
    async fn create_user(&self, user: UserCreate) -> Result<User, KeystoneClientError> {
        user::create(self, user).await
    }

    #[tracing::instrument(level = "debug", skip(self), err(Debug))]
    async fn update_user<'a>(
        &self,
        user_id: &'a str,
        user: UserUpdate,
    ) -> Result<User, KeystoneClientError> {
        user::update(self, user_id, user).await
    }

    #[tracing::instrument(level = "debug", skip(self), err(Debug))]
    async fn delete_user<'a>(&self, user_id: &'a str) -> Result<(), KeystoneClientError> {
        user::delete(self, user_id).await
    }

    #[tracing::instrument(level = "debug", skip(self), err(Debug))]
    async fn list_roles(
        &self,
        params: &RoleListParameters,
    ) -> Result<Vec<Role>, KeystoneClientError> {
        role::list(self, params).await
    }

    #[tracing::instrument(level = "debug", skip(self), err(Debug))]
    async fn grant_project_user_role<'a>(
        &self,
        project_id: &'a str,
        user_id: &'a str,
        role_id: &'a str,
    ) -> Result<(), KeystoneClientError> {
        role::grant(self, project_id, user_id, role_id).await
    }

    #[tracing::instrument(level = "debug", skip(self), err(Debug))]
    async fn revoke_project_user_role<'a>(
        &self,
        project_id: &'a str,
        user_id: &'a str,
        role_id: &'a str,
    ) -> Result<(), KeystoneClientError> {
        role::revoke(self, project_id, user_id, role_id).await
    }

    #[tracing::instrument(level = "debug", skip(self), err(Debug))]
    async fn check_project_user_role<'a>(
        &self,
        project_id: &'a str,
        user_id: &'a str,
        role_id: &'a str,
    ) -> Result<bool, KeystoneClientError> {
        role::check(self, project_id, user_id, role_id).await
    }

    #[tracing::instrument(level = "debug", skip(self), err(Debug))]
    async fn list_application_roles(&self) -> Result<Vec<ApplicationRole>, KeystoneClientError> {
        application_role::list(self).await
    }

    #[tracing::instrument(level = "debug", skip(self), err(Debug))]
    async fn create_application_role(
        &self,
        role: ApplicationRoleCreate,
    ) -> Result<ApplicationRole, KeystoneClientError> {
        application_role::create(self, role).await
    }

    #[tracing::instrument(level = "debug", skip(self), err(Debug))]
    async fn update_application_role<'a>(
        &self,
        role_id: &'a str,
        role: ApplicationRoleUpdate,
    ) -> Result<ApplicationRole, KeystoneClientError> {
        application_role::update(self, role_id, role).await
    }

    #[tracing::instrument(level = "debug", skip(self), err(Debug))]
    async fn delete_application_role<'a>(
        &self,
        role_id: &'a str,
    ) -> Result<(), KeystoneClientError> {
        application_role::delete(self, role_id).await
    }
}
