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
use secrecy::SecretString;
use tracing::info;

use super::lookup::single;
use super::{IdentityAdapter, IdentityAdapterError};
use crate::client::{KeystoneApi, KeystoneClientError};
use crate::types::*;

/// Find the role by the exact name.
pub(super) async fn find_role_by_name(
    keystone: &dyn KeystoneApi,
    name: &str,
) -> Result<Role, KeystoneClientError> {
    let roles = keystone
        .list_roles(&RoleListParametersBuilder::default().name(name).build()?)
        .await?;
    single(roles, "role", format!("name={name}"))
}

/// Grant the role given by name to the user on the project.
pub(super) async fn grant_role(
    keystone: &dyn KeystoneApi,
    role_name: &str,
    user_id: &str,
    project_id: &str,
) -> Result<Role, KeystoneClientError> {
    let role = find_role_by_name(keystone, role_name).await?;
    keystone
        .grant_project_user_role(project_id, user_id, &role.id)
        .await?;
    info!("role {} granted to user {} on project {}", role.id, user_id, project_id);
    Ok(role)
}

impl IdentityAdapter {
    /// Grant the role given by name to the user on the project.
    ///
    /// # Returns
    /// * Success with the granted role.
    /// * `NotFound` when there is no role with such name.
    #[tracing::instrument(level = "info", skip(self), err(Debug))]
    pub async fn grant_role(
        &self,
        role_name: &str,
        user_id: &str,
        project_id: &str,
    ) -> Result<Role, IdentityAdapterError> {
        let keystone = self.sessions.admin_session().await?;
        Ok(grant_role(keystone.as_ref(), role_name, user_id, project_id).await?)
    }

    /// Revoke the role given by name from the user on the project.
    #[tracing::instrument(level = "info", skip(self), err(Debug))]
    pub async fn revoke_role(
        &self,
        role_name: &str,
        user_id: &str,
        project_id: &str,
    ) -> Result<Role, IdentityAdapterError> {
        let keystone = self.sessions.admin_session().await?;
        let role = find_role_by_name(keystone.as_ref(), role_name).await?;
        keystone
            .revoke_project_user_role(project_id, user_id, &role.id)
            .await?;
        Ok(role)
    }

    /// Check whether the user has the role given by name on the project.
    #[tracing::instrument(level = "info", skip(self), err(Debug))]
    pub async fn has_role(
        &self,
        role_name: &str,
        user_id: &str,
        project_id: &str,
    ) -> Result<bool, IdentityAdapterError> {
        let keystone = self.sessions.admin_session().await?;
        let role = find_role_by_name(keystone.as_ref(), role_name).await?;
        Ok(keystone
            .check_project_user_role(project_id, user_id, &role.id)
            .await?)
    }

    /// Create the application role on behalf of the request user.
    ///
    /// # Arguments
    /// * `token` - Keystone token of the dashboard request.
    /// * `role` - new role. Keystone alone decides whether the values are
    ///   acceptable.
    #[tracing::instrument(level = "info", skip(self, token), err(Debug))]
    pub async fn create_role(
        &self,
        token: &SecretString,
        role: ApplicationRoleCreate,
    ) -> Result<ApplicationRole, IdentityAdapterError> {
        let keystone = self.sessions.token_session(token).await?;
        Ok(keystone.create_application_role(role).await?)
    }

    /// Update the application role on behalf of the request user.
    #[tracing::instrument(level = "info", skip(self, token), err(Debug))]
    pub async fn update_role(
        &self,
        token: &SecretString,
        role_id: &str,
        role: ApplicationRoleUpdate,
    ) -> Result<ApplicationRole, IdentityAdapterError> {
        let keystone = self.sessions.token_session(token).await?;
        Ok(keystone.update_application_role(role_id, role).await?)
    }

    /// Delete the application role on behalf of the request user.
    #[tracing::instrument(level = "info", skip(self, token), err(Debug))]
    pub async fn delete_role(
        &self,
        token: &SecretString,
        role_id: &str,
    ) -> Result<(), IdentityAdapterError> {
        let keystone = self.sessions.token_session(token).await?;
        Ok(keystone.delete_application_role(role_id).await?)
    }

    /// List application roles visible to the request user.
    #[tracing::instrument(level = "info", skip(self, token), err(Debug))]
    pub async fn list_roles(
        &self,
        token: &SecretString,
    ) -> Result<Vec<ApplicationRole>, IdentityAdapterError> {
        let keystone = self.sessions.token_session(token).await?;
        Ok(keystone.list_application_roles().await?)
    }
}
