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

pub(super) async fn get(client: &KeystoneClient, domain_id: &str) -> Result<Domain, KeystoneClientError> {
    let rsp = client
        .http()
        .get(client.url(&["v3", "domains", domain_id])?)
        .send()
        .await?;
    Ok(check_response(rsp)
        .await?
        .json::<DomainResponse>()
        .await?
        .domain)
}
