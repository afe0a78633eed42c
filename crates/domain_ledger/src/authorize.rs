//! Authorization port
//!
//! The engines never decide permissions themselves; they ask an injected
//! [`Authorizer`] and fail closed. Production wires an RBAC-backed
//! implementation behind a TTL cache; tests use [`StaticAuthorizer`].

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

use core_kernel::UserId;

/// Errors from the authorization collaborator
#[derive(Debug, Error)]
pub enum AuthzError {
    #[error("Authorization backend unavailable: {0}")]
    Unavailable(String),
}

/// Answers "may this user perform this action"
#[async_trait]
pub trait Authorizer: Send + Sync {
    /// Returns true if the user holds the permission
    ///
    /// Implementations should fail closed: when in doubt, return false or an
    /// error, never true.
    async fn allows(&self, user_id: UserId, permission: &str) -> Result<bool, AuthzError>;
}

/// A fixed grant table
///
/// Useful in tests and for single-operator deployments where the grant set
/// is configuration rather than data.
#[derive(Debug, Default)]
pub struct StaticAuthorizer {
    grants: HashMap<UserId, HashSet<String>>,
    allow_all: bool,
}

impl StaticAuthorizer {
    /// An empty table: every check fails
    pub fn new() -> Self {
        Self::default()
    }

    /// A table that grants everything to everyone
    pub fn allow_all() -> Self {
        Self {
            grants: HashMap::new(),
            allow_all: true,
        }
    }

    /// Grants a permission to a user
    pub fn grant(mut self, user_id: UserId, permission: impl Into<String>) -> Self {
        self.grants
            .entry(user_id)
            .or_default()
            .insert(permission.into());
        self
    }
}

#[async_trait]
impl Authorizer for StaticAuthorizer {
    async fn allows(&self, user_id: UserId, permission: &str) -> Result<bool, AuthzError> {
        if self.allow_all {
            return Ok(true);
        }
        Ok(self
            .grants
            .get(&user_id)
            .map(|perms| perms.contains(permission))
            .unwrap_or(false))
    }
}
