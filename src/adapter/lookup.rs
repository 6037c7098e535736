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
use tracing::debug;

use super::{IdentityAdapter, IdentityAdapterError};
use crate::client::{KeystoneApi, KeystoneClientError};
use crate::types::*;

/// Pick the only element of the lookup result.
pub(super) fn single<T>(
    mut items: Vec<T>,
    resource: &str,
    filter: String,
) -> Result<T, KeystoneClientError> {
    match items.len() {
        0 => Err(KeystoneClientError::NotFound(format!(
            "No {resource} matching {filter}."
        ))),
        1 => Ok(items.remove(0)),
        _ => Err(KeystoneClientError::NoUniqueMatch(format!(
            "Multiple {resource} matches found for '{filter}', use an ID to be more specific."
        ))),
    }
}

/// Find the user by the exact name.
pub(super) async fn find_user_by_name(
    keystone: &dyn KeystoneApi,
    name: &str,
) -> Result<User, KeystoneClientError> {
    let users = keystone
        .list_users(&UserListParametersBuilder::default().name(name).build()?)
        .await?;
    single(users, "user", format!("name={name}"))
}

/// Find the first user with exactly (case sensitive) the given email.
///
/// Keystone can not filter users by email, so the whole user collection is
/// fetched and scanned here.
pub(super) async fn find_user_by_email(
    keystone: &dyn KeystoneApi,
    email: &str,
) -> Result<User, KeystoneClientError> {
    let users = keystone.list_users(&UserListParameters::default()).await?;
    debug!("scanning {} users for the email", users.len());
    users
        .into_iter()
        .find(|user| user.email.as_deref() == Some(email))
        .ok_or_else(|| KeystoneClientError::NotFound(format!("No user matching email={email}.")))
}

impl IdentityAdapter {
    /// Find the user by name.
    ///
    /// # Returns
    /// * Success with the user.
    /// * `NotFound` error when no user has this name.
    #[tracing::instrument(level = "info", skip(self), err(Debug))]
    pub async fn check_user(&self, name: &str) -> Result<User, IdentityAdapterError> {
        let keystone = self.sessions.admin_session().await?;
        Ok(find_user_by_name(keystone.as_ref(), name).await?)
    }

    /// Find the user by email.
    ///
    /// # Returns
    /// * Success with the first user having this email.
    /// * `NotFound` error with the email in the message when no user has it.
    #[tracing::instrument(level = "info", skip(self), err(Debug))]
    pub async fn check_email(&self, email: &str) -> Result<User, IdentityAdapterError> {
        let keystone = self.sessions.admin_session().await?;
        Ok(find_user_by_email(keystone.as_ref(), email).await?)
    }
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::super::tests::{get_adapter, get_config, get_user};
    use super::*;
    use crate::client::MockKeystoneClient;

    #[tokio::test]
    #[traced_test]
    async fn test_check_user() {
        let mut keystone = MockKeystoneClient::default();
        keystone
            .expect_list_users()
            .withf(|params: &UserListParameters| {
                params.name == Some("alice".into())
            })
            .times(1)
            .returning(|_| Ok(vec![get_user("uid", "alice", Some("alice@example.com"))]));

        let user = get_adapter(&get_config(), keystone)
            .check_user("alice")
            .await
            .unwrap();
        assert_eq!("uid", user.id);
    }

    #[tokio::test]
    #[traced_test]
    async fn test_check_user_not_found() {
        let mut keystone = MockKeystoneClient::default();
        keystone.expect_list_users().returning(|_| Ok(Vec::new()));

        let err = get_adapter(&get_config(), keystone)
            .check_user("bob")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!("No user matching name=bob.", err.to_string());
    }

    #[tokio::test]
    #[traced_test]
    async fn test_check_user_not_unique() {
        let mut keystone = MockKeystoneClient::default();
        keystone.expect_list_users().returning(|_| {
            Ok(vec![
                get_user("u1", "alice", None),
                get_user("u2", "alice", None),
            ])
        });

        match get_adapter(&get_config(), keystone).check_user("alice").await {
            Err(IdentityAdapterError::Keystone {
                source: KeystoneClientError::NoUniqueMatch(..),
            }) => {}
            other => panic!("two users with the same name must be reported, got {:?}", other),
        }
    }

    #[tokio::test]
    #[traced_test]
    async fn test_check_email() {
        let mut keystone = MockKeystoneClient::default();
        keystone
            .expect_list_users()
            .withf(|params: &UserListParameters| params == &UserListParameters::default())
            .times(1)
            .returning(|_| {
                Ok(vec![
                    get_user("admin", "admin", None),
                    get_user("u1", "alice", Some("Alice@example.com")),
                    get_user("u2", "alice2", Some("alice@example.com")),
                    get_user("u3", "alice3", Some("alice@example.com")),
                ])
            });

        let user = get_adapter(&get_config(), keystone)
            .check_email("alice@example.com")
            .await
            .unwrap();
        assert_eq!("u2", user.id, "first exact, case sensitive match wins");
    }

    #[tokio::test]
    #[traced_test]
    async fn test_check_email_not_found() {
        let mut keystone = MockKeystoneClient::default();
        keystone
            .expect_list_users()
            .returning(|_| Ok(vec![get_user("u1", "alice", Some("alice@example.com"))]));

        let err = get_adapter(&get_config(), keystone)
            .check_email("ALICE@example.com")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!("No user matching email=ALICE@example.com.", err.to_string());
    }

    #[tokio::test]
    #[traced_test]
    async fn test_email_and_name_lookup_agree() {
        let users = vec![
            get_user("u1", "bob", Some("bob@example.com")),
            get_user("u2", "alice", Some("alice@example.com")),
        ];
        let mut keystone = MockKeystoneClient::default();
        let all = users.clone();
        keystone
            .expect_list_users()
            .returning(move |params: &UserListParameters| {
                Ok(all
                    .iter()
                    .filter(|u| params.name.as_ref().is_none_or(|n| n == &u.name))
                    .cloned()
                    .collect())
            });

        let by_name = find_user_by_name(&keystone, "alice").await.unwrap();
        let by_email = find_user_by_email(&keystone, "alice@example.com")
            .await
            .unwrap();
        assert_eq!(by_name, by_email);
    }

    #[tokio::test]
    #[traced_test]
    async fn test_check_email_remote_error() {
        let mut keystone = MockKeystoneClient::default();
        keystone
            .expect_list_users()
            .returning(|_| Err(KeystoneClientError::Forbidden("not allowed".into())));

        let err = get_adapter(&get_config(), keystone)
            .check_email("alice@example.com")
            .await
            .unwrap_err();
        assert!(!err.is_not_found());
        assert_eq!("not allowed", err.to_string());
    }
}
