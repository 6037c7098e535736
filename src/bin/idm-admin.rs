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
//! IdM administration executable.
//!
//! Runs a single identity adapter operation against the Keystone from the
//! configuration file and prints the result as JSON.

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Report, Result};
use secrecy::SecretString;
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use tracing::{Level, info};
use tracing_subscriber::{
    Layer,
    filter::{LevelFilter, Targets},
    prelude::*,
};

use fiware_keystone::adapter::IdentityAdapter;
use fiware_keystone::config::Config;
use fiware_keystone::types::{ApplicationRoleCreateBuilder, ApplicationRoleUpdateBuilder};

/// FIWARE IdM Keystone administration.
///
/// Performs the user and role operations of the IdM dashboard from the
/// command line.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the IdM keystone config file.
    #[arg(short, long, default_value = "/etc/idm/keystone.conf")]
    config: PathBuf,

    /// Verbosity level. Repeat to increase level.
    #[arg(short, long, global=true, action = clap::ArgAction::Count, display_order = 920)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Command,
}

/// Token of the acting user for the role administration.
#[derive(clap::Args, Debug)]
struct TokenArgs {
    /// Keystone token.
    #[arg(long, env = "OS_TOKEN", hide_env_values = true)]
    token: String,
}

impl TokenArgs {
    fn secret(self) -> SecretString {
        SecretString::from(self.token)
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Find the user by name.
    CheckUser {
        /// User name.
        name: String,
    },

    /// Find the user by email.
    CheckEmail {
        /// User email.
        email: String,
    },

    /// Register a new (disabled) user together with its project.
    Register {
        /// User name.
        name: String,

        /// User email.
        #[arg(long)]
        email: String,

        /// User password.
        #[arg(long, env = "IDM_USER_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Enable the registered user and its default project.
    Activate {
        /// User ID.
        user_id: String,
    },

    /// Set the new password of the user found by email.
    ChangePassword {
        /// User email.
        email: String,

        /// New password.
        #[arg(long, env = "IDM_USER_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Grant the role to the user on the project.
    GrantRole {
        /// Role name.
        role: String,

        /// User ID.
        #[arg(long)]
        user_id: String,

        /// Project ID.
        #[arg(long)]
        project_id: String,
    },

    /// Revoke the role from the user on the project.
    RevokeRole {
        /// Role name.
        role: String,

        /// User ID.
        #[arg(long)]
        user_id: String,

        /// Project ID.
        #[arg(long)]
        project_id: String,
    },

    /// Check whether the user has the role on the project.
    HasRole {
        /// Role name.
        role: String,

        /// User ID.
        #[arg(long)]
        user_id: String,

        /// Project ID.
        #[arg(long)]
        project_id: String,
    },

    /// Create the application role.
    CreateRole {
        /// Role name.
        name: String,

        /// ID of the application owning the role.
        #[arg(long)]
        application_id: Option<String>,

        /// Forbid the application owners to modify the role.
        #[arg(long)]
        not_editable: bool,

        #[command(flatten)]
        auth: TokenArgs,
    },

    /// Update the application role.
    UpdateRole {
        /// Role ID.
        role_id: String,

        /// New role name.
        #[arg(long)]
        name: Option<String>,

        /// ID of the application owning the role.
        #[arg(long)]
        application_id: Option<String>,

        /// Forbid the application owners to modify the role.
        #[arg(long)]
        not_editable: bool,

        #[command(flatten)]
        auth: TokenArgs,
    },

    /// Delete the application role.
    DeleteRole {
        /// Role ID.
        role_id: String,

        #[command(flatten)]
        auth: TokenArgs,
    },

    /// List the application roles.
    ListRoles {
        #[command(flatten)]
        auth: TokenArgs,
    },
}

fn print<T: Serialize>(value: &T) -> Result<(), Report> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Report> {
    color_eyre::install()?;
    let args = Args::parse();

    let filter = Targets::new()
        .with_default(match args.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        })
        .with_target("hyper_util", Level::INFO)
        .with_target("rustls", Level::INFO);

    let log_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_filter(filter);

    tracing_subscriber::registry().with(log_layer).init();

    let cfg = Config::new(args.config)?;
    info!("Using keystone at {}", cfg.keystone.url);
    let adapter = IdentityAdapter::new(&cfg);

    match args.command {
        Command::CheckUser { name } => print(&adapter.check_user(&name).await?)?,
        Command::CheckEmail { email } => print(&adapter.check_email(&email).await?)?,
        Command::Register {
            name,
            email,
            password,
        } => print(
            &adapter
                .register_user(&name, &email, &SecretString::from(password))
                .await?,
        )?,
        Command::Activate { user_id } => print(&adapter.activate_user(&user_id).await?)?,
        Command::ChangePassword { email, password } => print(
            &adapter
                .change_password(&email, &SecretString::from(password))
                .await?,
        )?,
        Command::GrantRole {
            role,
            user_id,
            project_id,
        } => print(&adapter.grant_role(&role, &user_id, &project_id).await?)?,
        Command::RevokeRole {
            role,
            user_id,
            project_id,
        } => print(&adapter.revoke_role(&role, &user_id, &project_id).await?)?,
        Command::HasRole {
            role,
            user_id,
            project_id,
        } => print(&adapter.has_role(&role, &user_id, &project_id).await?)?,
        Command::CreateRole {
            name,
            application_id,
            not_editable,
            auth,
        } => {
            let mut role = ApplicationRoleCreateBuilder::default();
            role.name(name).is_editable(!not_editable);
            if let Some(application_id) = application_id {
                role.application_id(application_id);
            }
            print(&adapter.create_role(&auth.secret(), role.build()?).await?)?
        }
        Command::UpdateRole {
            role_id,
            name,
            application_id,
            not_editable,
            auth,
        } => {
            let mut role = ApplicationRoleUpdateBuilder::default();
            role.is_editable(!not_editable);
            if let Some(name) = name {
                role.name(name);
            }
            if let Some(application_id) = application_id {
                role.application_id(application_id);
            }
            print(
                &adapter
                    .update_role(&auth.secret(), &role_id, role.build()?)
                    .await?,
            )?
        }
        Command::DeleteRole { role_id, auth } => {
            adapter.delete_role(&auth.secret(), &role_id).await?;
        }
        Command::ListRoles { auth } => print(&adapter.list_roles(&auth.secret()).await?)?,
    }
    Ok(())
}
