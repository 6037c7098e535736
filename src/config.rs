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
//! # IdM configuration
//!
//! The configuration is read once at startup from an INI file and handed to
//! the [`IdentityAdapter`](crate::adapter::IdentityAdapter) constructor.
//! Changing the file afterwards has no effect on a running adapter.
//!
//! ```ini
//! [keystone]
//! url = http://keystone:5000
//!
//! [admin_credentials]
//! username = idm
//! password = idm
//! project = idm
//! domain = default
//!
//! [registration]
//! default_role = _member_
//! rollback_on_failure = true
//! ```
use config::{File, FileFormat};
use eyre::{Report, WrapErr, eyre};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::path::PathBuf;
use url::Url;
use validator::Validate;

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct Config {
    /// Keystone endpoint.
    pub keystone: KeystoneSection,

    /// Static administrative credentials of the IdM account.
    #[validate(nested)]
    pub admin_credentials: AdminCredentials,

    /// User registration options.
    #[serde(default)]
    #[validate(nested)]
    pub registration: RegistrationSection,
}

#[derive(Debug, Deserialize, Clone)]
pub struct KeystoneSection {
    /// Keystone auth URL. Both `http://host:5000` and `http://host:5000/v3`
    /// are accepted.
    pub url: Url,
}

/// Administrative credentials the IdM uses to perform operations (user
/// registration, activation, password reset) on behalf of users that have no
/// admin rights themselves.
#[derive(Debug, Deserialize, Clone, Validate)]
pub struct AdminCredentials {
    /// Admin user name.
    #[validate(length(min = 1, max = 255))]
    pub username: String,

    /// Admin user password. Must not be empty.
    pub password: SecretString,

    /// Name of the project the admin token is scoped to.
    #[validate(length(min = 1, max = 64))]
    pub project: String,

    /// ID of the domain holding the admin user, the admin project and every
    /// registered user.
    #[validate(length(min = 1, max = 64))]
    pub domain: String,
}

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct RegistrationSection {
    /// Role granted to a freshly registered user on its own project.
    #[serde(default = "default_member_role")]
    #[validate(length(min = 1, max = 255))]
    pub default_role: String,

    /// Delete the already created project and user when a later
    /// registration step fails.
    #[serde(default = "default_true")]
    pub rollback_on_failure: bool,
}

impl Default for RegistrationSection {
    fn default() -> Self {
        Self {
            default_role: default_member_role(),
            rollback_on_failure: true,
        }
    }
}

fn default_member_role() -> String {
    "_member_".into()
}

fn default_true() -> bool {
    true
}

impl Config {
    pub fn new(path: PathBuf) -> Result<Self, Report> {
        let mut builder = config::Config::builder();

        if std::path::Path::new(&path).is_file() {
            builder = builder.add_source(File::from(path).format(FileFormat::Ini));
        }

        builder.try_into()
    }
}

impl TryFrom<config::ConfigBuilder<config::builder::DefaultState>> for Config {
    type Error = Report;
    fn try_from(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, Self::Error> {
        let mut builder = builder;
        builder = builder
            .set_default("admin_credentials.domain", "default")?
            .set_default("registration.default_role", default_member_role())?
            .set_default("registration.rollback_on_failure", "true")?;

        let config: Self = builder
            .build()
            .wrap_err("Failed to read configuration file")?
            .try_deserialize()
            .wrap_err("Failed to parse configuration file")?;
        config
            .validate()
            .wrap_err("Invalid configuration file")?;
        if config.admin_credentials.password.expose_secret().is_empty() {
            return Err(eyre!("Invalid configuration file: admin_credentials.password is empty"));
        }
        Ok(config)
    }
}
