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
//! # Identity adapter
//!
//! Operations the IdM dashboard performs against Keystone: user lookup,
//! registration, activation, password reset and role management.
//!
//! The adapter keeps no state besides its configuration. Every operation
//! opens a new Keystone session, issues its remote calls one after another
//! and returns the Keystone result or error. There is no retry, no caching
//! and no protection against concurrent registrations of the same name.
use std::sync::Arc;

pub mod error;
mod lifecycle;
mod lookup;
mod registration;
mod roles;

pub use error::IdentityAdapterError;

use crate::config::{Config, RegistrationSection};
use crate::session::{KeystoneSessionFactory, SessionFactory};

pub struct IdentityAdapter {
    /// Source of the Keystone sessions.
    sessions: Arc<dyn SessionFactory>,
    /// Domain of the registered users and their projects.
    domain_id: String,
    /// Registration options.
    registration: RegistrationSection,
}

impl IdentityAdapter {
    /// Adapter talking to the Keystone from the configuration.
    pub fn new(config: &Config) -> Self {
        Self::with_session_factory(config, Arc::new(KeystoneSessionFactory::new(config)))
    }

    /// Adapter using the custom session factory.
    pub fn with_session_factory(config: &Config, sessions: Arc<dyn SessionFactory>) -> Self {
        Self {
            sessions,
            domain_id: config.admin_credentials.domain.clone(),
            registration: config.registration.clone(),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Arc;

    use secrecy::SecretString;

    use super::*;
    use crate::client::{KeystoneApi, MockKeystoneClient};
    use crate::config::{AdminCredentials, KeystoneSection};
    use crate::session::MockKeystoneSessionFactory;
    use crate::types::User;

    pub(crate) fn get_config() -> Config {
        Config {
            keystone: KeystoneSection {
                url: "http://localhost:5000/v3".parse().unwrap(),
            },
            admin_credentials: AdminCredentials {
                username: "idm".into(),
                password: SecretString::from("idm"),
                project: "idm".into(),
                domain: "default".into(),
            },
            registration: RegistrationSection::default(),
        }
    }

    /// Adapter handing out the given mock as the admin session.
    pub(crate) fn get_adapter(config: &Config, keystone: MockKeystoneClient) -> IdentityAdapter {
        let keystone: Arc<dyn KeystoneApi> = Arc::new(keystone);
        let mut sessions = MockKeystoneSessionFactory::default();
        sessions
            .expect_admin_session()
            .times(1)
            .return_once(move || Ok(keystone));
        IdentityAdapter::with_session_factory(config, Arc::new(sessions))
    }

    /// Adapter handing out the given mock as the request scoped session.
    pub(crate) fn get_token_adapter(keystone: MockKeystoneClient) -> IdentityAdapter {
        let keystone: Arc<dyn KeystoneApi> = Arc::new(keystone);
        let mut sessions = MockKeystoneSessionFactory::default();
        sessions.expect_admin_session().never();
        sessions
            .expect_token_session()
            .withf(|token: &SecretString| {
                use secrecy::ExposeSecret;
                token.expose_secret() == "user_token"
            })
            .times(1)
            .return_once(move |_| Ok(keystone));
        IdentityAdapter::with_session_factory(&get_config(), Arc::new(sessions))
    }

    pub(crate) fn get_user(id: &str, name: &str, email: Option<&str>) -> User {
        User {
            id: id.into(),
            name: name.into(),
            domain_id: "default".into(),
            email: email.map(Into::into),
            enabled: true,
            default_project_id: Some(format!("{id}_project")),
            ..Default::default()
        }
    }

    #[test]
    fn test_new() {
        let mut config = get_config();
        config.admin_credentials.domain = "fiware".into();
        config.registration.default_role = "owner".into();
        let sot = IdentityAdapter::new(&config);
        assert_eq!("fiware", sot.domain_id);
        assert_eq!("owner", sot.registration.default_role);
    }
}
