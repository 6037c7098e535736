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
//! FIWARE `OS-ROLES` extension.
use super::error::check_response;
use super::{KeystoneClient, KeystoneClientError};
use crate::types::*;

const ROLES_PATH: [&str; 3] = ["v3", "OS-ROLES", "roles"];

fn role_path(role_id: &str) -> [&str; 4] {
    ["v3", "OS-ROLES", "roles", role_id]
}

pub(super) async fn list(client: &KeystoneClient) -> Result<Vec<ApplicationRole>, KeystoneClientError> {
    let rsp = client.http().get(client.url(&ROLES_PATH)?).send().await?;
    Ok(check_response(rsp)
        .await?
        .json::<ApplicationRoleList>()
        .await?
        .roles)
}

pub(super) async fn create(
    client: &KeystoneClient,
    role: ApplicationRoleCreate,
) -> Result<ApplicationRole, KeystoneClientError> {
    let rsp = client
        .http()
        .post(client.url(&ROLES_PATH)?)
        .json(&ApplicationRoleCreateRequest { role })
        .send()
        .await?;
    Ok(check_response(rsp)
        .await?
        .json::<ApplicationRoleResponse>()
        .await?
        .role)
}

pub(super) async fn update(
    client: &KeystoneClient,
    role_id: &str,
    role: ApplicationRoleUpdate,
) -> Result<ApplicationRole, KeystoneClientError> {
    let rsp = client
        .http()
        .patch(client.url(&role_path(role_id))?)
        .json(&ApplicationRoleUpdateRequest { role })
        .send()
        .await?;
    Ok(check_response(rsp)
        .await?
        .json::<ApplicationRoleResponse>()
        .await?
        .role)
}

pub(super) async fn delete(client: &KeystoneClient, role_id: &str) -> Result<(), KeystoneClientError> {
    let rsp = client
        .http()
        .delete(client.url(&role_path(role_id))?)
        .send()
        .await?;
    check_response(rsp).await?;
    Ok(())
}
