//! Authentication and authorization
//!
//! JWT-based identity for the HTTP surface, the permission vocabulary, and
//! a TTL-bounded cache decorator over the authorization port. The cache
//! lives here, on the authorization side, so the accounting engines stay
//! oblivious to caching policy.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use thiserror::Error;

use core_kernel::UserId;
use domain_ledger::{Authorizer, AuthzError};

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// User's roles
    pub roles: Vec<String>,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

impl Claims {
    /// Parses the subject into a typed user id
    pub fn user_id(&self) -> Result<UserId, AuthError> {
        self.sub.parse().map_err(|_| AuthError::InvalidToken)
    }
}

/// Auth errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
}

/// Creates a new JWT token
pub fn create_token(
    user_id: &str,
    roles: Vec<String>,
    secret: &str,
    expiration_secs: u64,
) -> Result<String, AuthError> {
    let now = Utc::now();
    let exp = now + Duration::seconds(expiration_secs as i64);

    let claims = Claims {
        sub: user_id.to_string(),
        roles,
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::InvalidToken)
}

/// Validates a JWT token
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        if e.to_string().contains("ExpiredSignature") {
            AuthError::TokenExpired
        } else {
            AuthError::InvalidToken
        }
    })?;

    Ok(token_data.claims)
}

/// Permission definitions
pub mod permissions {
    pub const INVOICE_POST: &str = "invoice:post";
    pub const INVOICE_VOID: &str = "invoice:void";
    pub const JOURNAL_POST: &str = "journal:post";
    pub const JOURNAL_VOID: &str = "journal:void";
    pub const REPORT_READ: &str = "report:read";
    pub const ACCOUNT_MANAGE: &str = "account:manage";
}

/// TTL-bounded cache over an authorization backend
///
/// Both positive and negative answers are cached for the configured TTL, so
/// a revoked grant can survive at most one TTL window. Expired entries are
/// refreshed lazily on the next check.
pub struct CachedAuthorizer {
    inner: Arc<dyn Authorizer>,
    ttl: std::time::Duration,
    cache: Mutex<HashMap<(UserId, String), (bool, Instant)>>,
}

impl CachedAuthorizer {
    pub fn new(inner: Arc<dyn Authorizer>, ttl: std::time::Duration) -> Self {
        Self {
            inner,
            ttl,
            cache: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl Authorizer for CachedAuthorizer {
    async fn allows(&self, user_id: UserId, permission: &str) -> Result<bool, AuthzError> {
        let key = (user_id, permission.to_string());

        if let Ok(cache) = self.cache.lock() {
            if let Some((allowed, cached_at)) = cache.get(&key) {
                if cached_at.elapsed() < self.ttl {
                    return Ok(*allowed);
                }
            }
        }

        let allowed = self.inner.allows(user_id, permission).await?;

        if let Ok(mut cache) = self.cache.lock() {
            let ttl = self.ttl;
            cache.retain(|_, (_, cached_at)| cached_at.elapsed() < ttl);
            cache.insert(key, (allowed, Instant::now()));
        }

        Ok(allowed)
    }
}
