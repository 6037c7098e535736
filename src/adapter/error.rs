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
use thiserror::Error;

use crate::client::KeystoneClientError;
use crate::error::BuilderError;

/// Identity adapter error.
///
/// Keystone errors are passed through unchanged.
#[derive(Debug, Error)]
pub enum IdentityAdapterError {
    #[error(transparent)]
    Keystone {
        #[from]
        source: KeystoneClientError,
    },

    #[error(transparent)]
    Builder {
        #[from]
        source: BuilderError,
    },
}

impl IdentityAdapterError {
    /// The user, role, project or domain does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Keystone {
                source: KeystoneClientError::NotFound(..)
            }
        )
    }

    /// The resource to be created already exists.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::Keystone {
                source: KeystoneClientError::Conflict(..)
            }
        )
    }

    /// Keystone rejected the credentials or the token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            Self::Keystone {
                source: KeystoneClientError::Unauthorized(..)
            }
        )
    }
}
