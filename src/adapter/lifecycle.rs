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
use tracing::{info, warn};

use super::lookup::find_user_by_email;
use super::{IdentityAdapter, IdentityAdapterError};
use crate::types::*;

impl IdentityAdapter {
    /// Activate the registered user.
    ///
    /// The default project of the user is enabled first, then the user
    /// itself. Calling it for an already active user changes nothing.
    #[tracing::instrument(level = "info", skip(self), err(Debug))]
    pub async fn activate_user(&self, user_id: &str) -> Result<User, IdentityAdapterError> {
        let keystone = self.sessions.admin_session().await?;
        let user = keystone.get_user(user_id).await?;
        if let Some(project_id) = &user.default_project_id {
            keystone
                .update_project(
                    project_id,
                    ProjectUpdateBuilder::default().enabled(true).build()?,
                )
                .await?;
        } else {
            warn!("user {} has no default project to enable", user.id);
        }
        let user = keystone
            .update_user(
                &user.id,
                UserUpdateBuilder::default().enabled(true).build()?,
            )
            .await?;
        info!("user {} activated", user.id);
        Ok(user)
    }

    /// Set the new password of the user found by email.
    ///
    /// The user is enabled in the same request.
    #[tracing::instrument(level = "info", skip(self, new_password), err(Debug))]
    pub async fn change_password(
        &self,
        email: &str,
        new_password: &SecretString,
    ) -> Result<User, IdentityAdapterError> {
        let keystone = self.sessions.admin_session().await?;
        let user = find_user_by_email(keystone.as_ref(), email).await?;
        Ok(keystone
            .update_user(
                &user.id,
                UserUpdateBuilder::default()
                    .password(new_password.clone())
                    .enabled(true)
                    .build()?,
            )
            .await?)
    }
}
