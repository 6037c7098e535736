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
use reqwest::{
    Client, ClientBuilder,
    header::{HeaderMap, HeaderName, HeaderValue},
};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;
use url::Url;

use super::error::check_response;
use super::{KeystoneClient, KeystoneClientError, base_url};
use crate::config::AdminCredentials;
use crate::types::*;

impl KeystoneClient {
    /// Issue a new project scoped token with the password method and build the
    /// session using it.
    ///
    /// # Arguments
    /// * `auth_url` - Keystone url.
    /// * `credentials` - user name, password, project name and domain ID of
    ///   the account.
    ///
    /// # Returns
    /// * Success with the authenticated session.
    /// * `KeystoneClientError::Unauthorized` when Keystone rejects the
    ///   credentials.
    #[tracing::instrument(
        name = "keystone.auth.password",
        skip(credentials),
        fields(username = %credentials.username, project = %credentials.project),
        err(Debug)
    )]
    pub async fn authenticate(
        auth_url: &Url,
        credentials: &AdminCredentials,
    ) -> Result<Self, KeystoneClientError> {
        let domain = ScopeDomainBuilder::default()
            .id(&credentials.domain)
            .build()?;
        let identity = IdentityBuilder::default()
            .methods(vec!["password".into()])
            .password(
                PasswordAuthBuilder::default()
                    .user(
                        UserPasswordBuilder::default()
                            .name(&credentials.username)
                            .password(credentials.password.clone())
                            .domain(domain.clone())
                            .build()?,
                    )
                    .build()?,
            )
            .build()?;
        let scope = Scope::Project(
            ScopeProjectBuilder::default()
                .name(&credentials.project)
                .domain(domain)
                .build()?,
        );
        Self::issue_token(base_url(auth_url), identity, Some(scope)).await
    }

    /// Build the session reusing an already issued token (i.e. the token of
    /// the dashboard user). The token is not validated upfront.
    pub fn with_token(auth_url: &Url, token: SecretString) -> Result<Self, KeystoneClientError> {
        Ok(Self {
            http_client: authenticated_client(&token)?,
            base_url: base_url(auth_url),
        })
    }

    async fn issue_token(
        base_url: Url,
        identity: Identity,
        scope: Option<Scope>,
    ) -> Result<Self, KeystoneClientError> {
        let auth_request = AuthRequest {
            auth: AuthRequestInner { identity, scope },
        };
        let rsp = Client::builder()
            .gzip(true)
            .build()?
            .post(base_url.join("v3/auth/tokens")?)
            .json(&auth_request)
            .send()
            .await?;
        let rsp = check_response(rsp).await?;

        let token = SecretString::from(
            rsp.headers()
                .get("x-subject-token")
                .ok_or(KeystoneClientError::TokenMissing)?
                .to_str()
                .map_err(|_| KeystoneClientError::TokenMissing)?,
        );
        let info: TokenResponse = rsp.json().await?;
        debug!(
            "issued token for user {} valid till {}",
            info.token.user.id, info.token.expires_at
        );

        Ok(Self {
            http_client: authenticated_client(&token)?,
            base_url,
        })
    }
}

/// Http client sending the token with every request.
fn authenticated_client(token: &SecretString) -> Result<Client, KeystoneClientError> {
    let mut token = HeaderValue::from_str(token.expose_secret())?;
    token.set_sensitive(true);
    Ok(ClientBuilder::new()
        .gzip(true)
        .default_headers(HeaderMap::from_iter([(
            HeaderName::from_static("x-auth-token"),
            token,
        )]))
        .build()?)
}
