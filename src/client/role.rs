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
use reqwest::StatusCode;

use super::error::check_response;
use super::{KeystoneClient, KeystoneClientError};
use crate::types::*;

pub(super) async fn list(
    client: &KeystoneClient,
    params: &RoleListParameters,
) -> Result<Vec<Role>, KeystoneClientError> {
    let rsp = client
        .http()
        .get(client.url(&["v3", "roles"])?)
        .query(params)
        .send()
        .await?;
    Ok(check_response(rsp).await?.json::<RoleList>().await?.roles)
}

fn grant_path<'a>(project_id: &'a str, user_id: &'a str, role_id: &'a str) -> [&'a str; 7] {
    ["v3", "projects", project_id, "users", user_id, "roles", role_id]
}

pub(super) async fn grant(
    client: &KeystoneClient,
    project_id: &str,
    user_id: &str,
    role_id: &str,
) -> Result<(), KeystoneClientError> {
    let rsp = client
        .http()
        .put(client.url(&grant_path(project_id, user_id, role_id))?)
        .send()
        .await?;
    check_response(rsp).await?;
    Ok(())
}

pub(super) async fn revoke(
    client: &KeystoneClient,
    project_id: &str,
    user_id: &str,
    role_id: &str,
) -> Result<(), KeystoneClientError> {
    let rsp = client
        .http()
        .delete(client.url(&grant_path(project_id, user_id, role_id))?)
        .send()
        .await?;
    check_response(rsp).await?;
    Ok(())
}

/// Keystone answers the `HEAD` with 204 when the grant exists and 404 when
/// not.
pub(super) async fn check(
    client: &KeystoneClient,
    project_id: &str,
    user_id: &str,
    role_id: &str,
) -> Result<bool, KeystoneClientError> {
    let rsp = client
        .http()
        .head(client.url(&grant_path(project_id, user_id, role_id))?)
        .send()
        .await?;
    match rsp.status() {
        status if status.is_success() => Ok(true),
        StatusCode::NOT_FOUND => Ok(false),
        _ => Err(KeystoneClientError::from_response(rsp).await),
    }
}
