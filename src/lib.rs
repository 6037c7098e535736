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

//! # FIWARE IdM Keystone adapter
//!
//! The FIWARE IdM dashboard keeps its users, their personal projects and the
//! application roles in an OpenStack Keystone. This crate is the thin layer
//! between the dashboard and the Keystone v3 API: it looks users up by name
//! or email, drives the registration, activation and password reset of an
//! account, grants roles and administers the application roles of the
//! FIWARE `OS-ROLES` extension.
//!
//! Operations the dashboard performs on behalf of anonymous or unprivileged
//! users (registration, activation, password reset) run with the static IdM
//! admin credentials from the [configuration](config::Config). Role
//! administration runs with the token of the dashboard request so that
//! Keystone enforces the permissions of the acting user.
//!
//! Every operation opens a fresh Keystone session and issues its calls one
//! after another. No state is kept between operations.
//!
//! ```no_run
//! # use std::path::PathBuf;
//! # use secrecy::SecretString;
//! # use fiware_keystone::{Config, IdentityAdapter};
//! # async fn example() -> Result<(), eyre::Report> {
//! let config = Config::new(PathBuf::from("/etc/idm/keystone.conf"))?;
//! let adapter = IdentityAdapter::new(&config);
//!
//! let user = adapter
//!     .register_user("alice", "alice@example.com", &SecretString::from("pw123"))
//!     .await?;
//! adapter.activate_user(&user.id).await?;
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod client;
pub mod config;
pub mod error;
pub mod session;
pub mod types;

pub use adapter::{IdentityAdapter, IdentityAdapterError};
pub use client::{KeystoneApi, KeystoneClient, KeystoneClientError};
pub use config::Config;
pub use session::{KeystoneSessionFactory, SessionFactory};
