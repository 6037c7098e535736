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
use async_trait::async_trait;
use mockall::mock;

use crate::client::{KeystoneApi, KeystoneClientError};
use crate::types::*;

mock! {
    pub KeystoneClient {}

    #[async_trait]
    impl KeystoneApi for KeystoneClient {
        async fn get_domain<'a>(&self, domain_id: &'a str) -> Result<Domain, KeystoneClientError>;

        async fn create_project(&self, project: ProjectCreate) -> Result<Project, KeystoneClientError>;

        async fn update_project<'a>(
            &self,
            project_id: &'a str,
            project: ProjectUpdate,
        ) -> Result<Project, KeystoneClientError>;

        async fn delete_project<'a>(&self, project_id: &'a str) -> Result<(), KeystoneClientError>;

        async fn get_user<'a>(&self, user_id: &'a str) -> Result<User, KeystoneClientError>;

        async fn list_users(
            &self,
            params: &UserListParameters,
        ) -> Result<Vec<User>, KeystoneClientError>;

        async fn create_user(&self, user: UserCreate) -> Result<User, KeystoneClientError>;

        async fn update_user<'a>(
            &self,
            user_id: &'a str,
            user: UserUpdate,
        ) -> Result<User, KeystoneClientError>;

        async fn delete_user<'a>(&self, user_id: &'a str) -> Result<(), KeystoneClientError>;

        async fn list_roles(
            &self,
            params: &RoleListParameters,
        ) -> Result<Vec<Role>, KeystoneClientError>;

        async fn grant_project_user_role<'a>(
            &self,
            project_id: &'a str,
            user_id: &'a str,
            role_id: &'a str,
        ) -> Result<(), KeystoneClientError>;

        async fn revoke_project_user_role<'a>(
            &self,
            project_id: &'a str,
            user_id: &'a str,
            role_id: &'a str,
        ) -> Result<(), KeystoneClientError>;

        async fn check_project_user_role<'a>(
            &self,
            project_id: &'a str,
            user_id: &'a str,
            role_id: &'a str,
        ) -> Result<bool, KeystoneClientError>;

        async fn list_application_roles(&self) -> Result<Vec<ApplicationRole>, KeystoneClientError>;

        async fn create_application_role(
            &self,
            role: ApplicationRoleCreate,
        ) -> Result<ApplicationRole, KeystoneClientError>;

        async fn update_application_role<'a>(
            &self,
            role_id: &'a str,
            role: ApplicationRoleUpdate,
        ) -> Result<ApplicationRole, KeystoneClientError>;

        async fn delete_application_role<'a>(
            &self,
            role_id: &'a str,
        ) -> Result<(), KeystoneClientError>;
    }
}
