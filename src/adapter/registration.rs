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
use secrecy::SecretString;
use tracing::{error, info, warn};

use super::roles::grant_role;
use super::{IdentityAdapter, IdentityAdapterError};
use crate::client::KeystoneApi;
use crate::types::*;

impl IdentityAdapter {
    /// Register a new user.
    ///
    /// A disabled project named after the user is created in the configured
    /// domain, followed by the disabled user having it as the default
    /// project. The configured default role is granted to the user on the
    /// project. Both are enabled later by
    /// [`activate_user`](IdentityAdapter::activate_user).
    ///
    /// When the user creation or the role grant fails, the resources created
    /// so far are deleted again (unless `registration.rollback_on_failure`
    /// is off) and the error of the failed step is returned.
    #[tracing::instrument(level = "info", skip(self, password), err(Debug))]
    pub async fn register_user(
        &self,
        name: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<User, IdentityAdapterError> {
        let keystone = self.sessions.admin_session().await?;
        let domain = keystone.get_domain(&self.domain_id).await?;
        let project = keystone
            .create_project(
                ProjectCreateBuilder::default()
                    .name(name)
                    .domain_id(domain.id.clone())
                    .enabled(false)
                    .build()?,
            )
            .await?;
        info!("project {} created for the user {}", project.id, name);

        let user = match self
            .create_user(keystone.as_ref(), &domain, &project, name, email, password)
            .await
        {
            Ok(user) => user,
            Err(err) => {
                self.compensate(keystone.as_ref(), "user creation", None, &project)
                    .await;
                return Err(err);
            }
        };

        if let Err(err) = grant_role(
            keystone.as_ref(),
            &self.registration.default_role,
            &user.id,
            &project.id,
        )
        .await
        {
            self.compensate(keystone.as_ref(), "role grant", Some(&user), &project)
                .await;
            return Err(err.into());
        }
        Ok(user)
    }

    async fn create_user(
        &self,
        keystone: &dyn KeystoneApi,
        domain: &Domain,
        project: &Project,
        name: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<User, IdentityAdapterError> {
        let user = keystone
            .create_user(
                UserCreateBuilder::default()
                    .name(name)
                    .domain_id(domain.id.clone())
                    .default_project_id(project.id.clone())
                    .email(email)
                    .enabled(false)
                    .password(password.clone())
                    .build()?,
            )
            .await?;
        info!("user {} created", user.id);
        Ok(user)
    }

    /// Undo the partially completed registration. Failures are only logged
    /// so that the caller gets the error of the failed step.
    async fn compensate(
        &self,
        keystone: &dyn KeystoneApi,
        step: &str,
        user: Option<&User>,
        project: &Project,
    ) {
        if !self.registration.rollback_on_failure {
            warn!(
                "registration failed at the {}, leaving project {} and user {:?} in place",
                step,
                project.id,
                user.map(|x| x.id.as_str())
            );
            return;
        }
        if let Some(user) = user {
            warn!("registration failed at the {}, deleting user {}", step, user.id);
            if let Err(err) = keystone.delete_user(&user.id).await {
                error!("cannot delete user {}: {}", user.id, err);
            }
        }
        warn!(
            "registration failed at the {}, deleting project {}",
            step, project.id
        );
        if let Err(err) = keystone.delete_project(&project.id).await {
            error!("cannot delete project {}: {}", project.id, err);
        }
    }
}

#[cfg(test)]
mod tests {
    use mockall::Sequence;
    use secrecy::ExposeSecret;
    use tracing_test::traced_test;

    use super::super::tests::{get_adapter, get_config};
    use super::*;
    use crate::client::{KeystoneClientError, MockKeystoneClient};

    /// Mock with the domain and the project steps succeeding.
    fn get_keystone(seq: &mut Sequence) -> MockKeystoneClient {
        let mut keystone = MockKeystoneClient::default();
        keystone
            .expect_get_domain()
            .withf(|id: &str| id == "default")
            .times(1)
            .in_sequence(seq)
            .returning(|id| {
                Ok(Domain {
                    id: id.into(),
                    name: "Default".into(),
                    enabled: true,
                    ..Default::default()
                })
            });
        keystone
            .expect_create_project()
            .withf(|project: &ProjectCreate| {
                project.name == "alice"
                    && project.domain_id == "default"
                    && project.enabled == Some(false)
            })
            .times(1)
            .in_sequence(seq)
            .returning(|project| {
                Ok(Project {
                    id: "pid".into(),
                    name: project.name,
                    domain_id: project.domain_id,
                    enabled: false,
                    ..Default::default()
                })
            });
        keystone
    }

    fn expect_create_user(keystone: &mut MockKeystoneClient, seq: &mut Sequence) {
        keystone
            .expect_create_user()
            .withf(|user: &UserCreate| {
                user.name == "alice"
                    && user.domain_id == "default"
                    && user.default_project_id == Some("pid".into())
                    && user.email == Some("alice@example.com".into())
                    && user.enabled == Some(false)
                    && user
                        .password
                        .as_ref()
                        .is_some_and(|x| x.expose_secret() == "pw123")
            })
            .times(1)
            .in_sequence(seq)
            .returning(|user| {
                Ok(User {
                    id: "uid".into(),
                    name: user.name,
                    domain_id: user.domain_id,
                    email: user.email,
                    enabled: false,
                    default_project_id: user.default_project_id,
                    ..Default::default()
                })
            });
    }

    fn expect_list_roles(keystone: &mut MockKeystoneClient, seq: &mut Sequence) {
        keystone
            .expect_list_roles()
            .withf(|params: &RoleListParameters| params.name == Some("_member_".into()))
            .times(1)
            .in_sequence(seq)
            .returning(|_| {
                Ok(vec![Role {
                    id: "rid".into(),
                    name: "_member_".into(),
                    ..Default::default()
                }])
            });
    }

    #[tokio::test]
    #[traced_test]
    async fn test_register() {
        let mut seq = Sequence::new();
        let mut keystone = get_keystone(&mut seq);
        expect_create_user(&mut keystone, &mut seq);
        expect_list_roles(&mut keystone, &mut seq);
        keystone
            .expect_grant_project_user_role()
            .withf(|pid: &str, uid: &str, rid: &str| pid == "pid" && uid == "uid" && rid == "rid")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(()));
        keystone.expect_delete_user().never();
        keystone.expect_delete_project().never();

        let user = get_adapter(&get_config(), keystone)
            .register_user("alice", "alice@example.com", &SecretString::from("pw123"))
            .await
            .unwrap();
        assert_eq!("uid", user.id);
        assert!(!user.enabled);
        assert_eq!(Some("pid".into()), user.default_project_id);
        assert!(!logs_contain("pw123"));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_register_configured_role() {
        let mut config = get_config();
        config.registration.default_role = "owner".into();
        let mut seq = Sequence::new();
        let mut keystone = get_keystone(&mut seq);
        expect_create_user(&mut keystone, &mut seq);
        keystone
            .expect_list_roles()
            .withf(|params: &RoleListParameters| params.name == Some("owner".into()))
            .times(1)
            .returning(|_| {
                Ok(vec![Role {
                    id: "owner_id".into(),
                    name: "owner".into(),
                    ..Default::default()
                }])
            });
        keystone
            .expect_grant_project_user_role()
            .withf(|_: &str, _: &str, rid: &str| rid == "owner_id")
            .times(1)
            .returning(|_, _, _| Ok(()));

        get_adapter(&config, keystone)
            .register_user("alice", "alice@example.com", &SecretString::from("pw123"))
            .await
            .unwrap();
    }

    #[tokio::test]
    #[traced_test]
    async fn test_register_missing_domain() {
        let mut keystone = MockKeystoneClient::default();
        keystone
            .expect_get_domain()
            .returning(|_| Err(KeystoneClientError::NotFound("Could not find domain: default.".into())));
        keystone.expect_create_project().never();

        let err = get_adapter(&get_config(), keystone)
            .register_user("alice", "alice@example.com", &SecretString::from("pw123"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    #[traced_test]
    async fn test_register_project_conflict() {
        let mut seq = Sequence::new();
        let mut keystone = MockKeystoneClient::default();
        keystone
            .expect_get_domain()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|id| {
                Ok(Domain {
                    id: id.into(),
                    ..Default::default()
                })
            });
        keystone
            .expect_create_project()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(KeystoneClientError::Conflict("Duplicate entry".into())));
        keystone.expect_create_user().never();
        keystone.expect_delete_project().never();

        let err = get_adapter(&get_config(), keystone)
            .register_user("alice", "alice@example.com", &SecretString::from("pw123"))
            .await
            .unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    #[traced_test]
    async fn test_register_user_failure_deletes_project() {
        let mut seq = Sequence::new();
        let mut keystone = get_keystone(&mut seq);
        keystone
            .expect_create_user()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(KeystoneClientError::Conflict("Duplicate entry".into())));
        keystone
            .expect_delete_project()
            .withf(|id: &str| id == "pid")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        keystone.expect_delete_user().never();
        keystone.expect_grant_project_user_role().never();

        let err = get_adapter(&get_config(), keystone)
            .register_user("alice", "alice@example.com", &SecretString::from("pw123"))
            .await
            .unwrap_err();
        assert!(err.is_conflict());
        assert!(logs_contain("deleting project pid"));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_register_grant_failure_deletes_user_and_project() {
        let mut seq = Sequence::new();
        let mut keystone = get_keystone(&mut seq);
        expect_create_user(&mut keystone, &mut seq);
        keystone
            .expect_list_roles()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(Vec::new()));
        keystone
            .expect_delete_user()
            .withf(|id: &str| id == "uid")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        keystone
            .expect_delete_project()
            .withf(|id: &str| id == "pid")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let err = get_adapter(&get_config(), keystone)
            .register_user("alice", "alice@example.com", &SecretString::from("pw123"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!("No role matching name=_member_.", err.to_string());
    }

    #[tokio::test]
    #[traced_test]
    async fn test_register_compensation_failure_keeps_error() {
        let mut seq = Sequence::new();
        let mut keystone = get_keystone(&mut seq);
        expect_create_user(&mut keystone, &mut seq);
        expect_list_roles(&mut keystone, &mut seq);
        keystone
            .expect_grant_project_user_role()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Err(KeystoneClientError::Forbidden("grant denied".into())));
        keystone
            .expect_delete_user()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(KeystoneClientError::Forbidden("delete denied".into())));
        keystone
            .expect_delete_project()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let err = get_adapter(&get_config(), keystone)
            .register_user("alice", "alice@example.com", &SecretString::from("pw123"))
            .await
            .unwrap_err();
        assert_eq!("grant denied", err.to_string());
        assert!(logs_contain("cannot delete user uid"));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_register_without_rollback() {
        let mut config = get_config();
        config.registration.rollback_on_failure = false;
        let mut seq = Sequence::new();
        let mut keystone = get_keystone(&mut seq);
        expect_create_user(&mut keystone, &mut seq);
        expect_list_roles(&mut keystone, &mut seq);
        keystone
            .expect_grant_project_user_role()
            .returning(|_, _, _| Err(KeystoneClientError::Forbidden("grant denied".into())));
        keystone.expect_delete_user().never();
        keystone.expect_delete_project().never();

        let err = get_adapter(&config, keystone)
            .register_user("alice", "alice@example.com", &SecretString::from("pw123"))
            .await
            .unwrap_err();
        assert_eq!("grant denied", err.to_string());
        assert!(logs_contain("leaving project pid"));
    }
}
