//! RBAC-backed authorizer
//!
//! Answers permission checks from the `user_roles` and `role_permissions`
//! tables. This is the production implementation of the authorization port;
//! the API layer wraps it in a TTL cache so hot paths do not hit the
//! database on every request.

use async_trait::async_trait;
use sqlx::PgPool;

use core_kernel::UserId;
use domain_ledger::{Authorizer, AuthzError};

/// Permission checks against the RBAC grant tables
#[derive(Debug, Clone)]
pub struct PgAuthorizer {
    pool: PgPool,
}

impl PgAuthorizer {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Authorizer for PgAuthorizer {
    async fn allows(&self, user_id: UserId, permission: &str) -> Result<bool, AuthzError> {
        let allowed: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM user_roles ur
                JOIN role_permissions rp ON rp.role = ur.role
                WHERE ur.user_id = $1 AND rp.permission = $2
            )
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(permission)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AuthzError::Unavailable(e.to_string()))?;

        Ok(allowed)
    }
}
