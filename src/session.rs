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
//! # Session factory
//!
//! Every adapter operation works on its own freshly authenticated Keystone
//! session. Nothing is cached or pooled between operations.
use async_trait::async_trait;
use secrecy::SecretString;
use std::sync::Arc;
use url::Url;

use crate::client::{KeystoneApi, KeystoneClient, KeystoneClientError};
use crate::config::{AdminCredentials, Config};

/// Source of authenticated Keystone sessions.
#[async_trait]
pub trait SessionFactory: Send + Sync {
    /// New session authenticated with the static IdM admin credentials.
    async fn admin_session(&self) -> Result<Arc<dyn KeystoneApi>, KeystoneClientError>;

    /// New session using the token of the dashboard request.
    async fn token_session(
        &self,
        token: &SecretString,
    ) -> Result<Arc<dyn KeystoneApi>, KeystoneClientError>;
}

/// Sessions against a real Keystone.
#[derive(Clone, Debug)]
pub struct KeystoneSessionFactory {
    auth_url: Url,
    credentials: AdminCredentials,
}

impl KeystoneSessionFactory {
    pub fn new(config: &Config) -> Self {
        Self {
            auth_url: config.keystone.url.clone(),
            credentials: config.admin_credentials.clone(),
        }
    }
}

#[async_trait]
impl SessionFactory for KeystoneSessionFactory {
    async fn admin_session(&self) -> Result<Arc<dyn KeystoneApi>, KeystoneClientError> {
        Ok(Arc::new(
            KeystoneClient::authenticate(&self.auth_url, &self.credentials).await?,
        ))
    }

    async fn token_session(
        &self,
        token: &SecretString,
    ) -> Result<Arc<dyn KeystoneApi>, KeystoneClientError> {
        Ok(Arc::new(KeystoneClient::with_token(
            &self.auth_url,
            token.clone(),
        )?))
    }
}

#[cfg(test)]
mockall::mock! {
    pub KeystoneSessionFactory {}

    #[async_trait]
    impl SessionFactory for KeystoneSessionFactory {
        async fn admin_session(&self) -> Result<Arc<dyn KeystoneApi>, KeystoneClientError>;

        async fn token_session(
            &self,
            token: &SecretString,
        ) -> Result<Arc<dyn KeystoneApi>, KeystoneClientError>;
    }
}
