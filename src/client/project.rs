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
use super::error::check_response;
use super::{KeystoneClient, KeystoneClientError};
use crate::types::*;

pub(super) async fn create(
    client: &KeystoneClient,
    project: ProjectCreate,
) -> Result<Project, KeystoneClientError> {
    let rsp = client
        .http()
        .post(client.url(&["v3", "projects"])?)
        .json(&ProjectCreateRequest { project })
        .send()
        .await?;
    Ok(check_response(rsp)
        .await?
        .json::<ProjectResponse>()
        .await?
        .project)
}

pub(super) async fn update(
    client: &KeystoneClient,
    project_id: &str,
    project: ProjectUpdate,
) -> Result<Project, KeystoneClientError> {
    let rsp = client
        .http()
        .patch(client.url(&["v3", "projects", project_id])?)
        .json(&ProjectUpdateRequest { project })
        .send()
        .await?;
    Ok(check_response(rsp)
        .await?
        .json::<ProjectResponse>()
        .await?
        .project)
}

pub(super) async fn delete(client: &KeystoneClient, project_id: &str) -> Result<(), KeystoneClientError> {
    let rsp = client
        .http()
        .delete(client.url(&["v3", "projects", project_id])?)
        .send()
        .await?;
    check_response(rsp).await?;
    Ok(())
}
