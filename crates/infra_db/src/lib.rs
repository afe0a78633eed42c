//! Infrastructure Database Layer
//!
//! PostgreSQL persistence for the ledger system using SQLx. The crate
//! implements the domain's store and authorizer ports behind the repository
//! pattern, hiding SQL from the domain layer.
//!
//! # Transactional guarantees
//!
//! Posting and voiding commit the entry inserts and the document status
//! stamp in one transaction. The status update is conditional on the stored
//! status (a compare-and-swap), so concurrent transitions of the same
//! document serialize: the loser's transaction rolls back with a conflict
//! and no partial ledger state survives.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, DatabaseConfig, PgLedgerStore};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/ledger")).await?;
//! let store = PgLedgerStore::new(pool);
//! ```

pub mod error;
pub mod pool;
pub mod repositories;

pub use error::DatabaseError;
pub use pool::{create_pool, create_pool_from_url, DatabaseConfig, DatabasePool};
pub use repositories::{PgAuthorizer, PgLedgerStore};

/// The SQL schema for the ledger store, applied by deployment tooling and
/// the test database harness
pub const SCHEMA_SQL: &str = include_str!("../../../migrations/20260101_000001_initial_schema.sql");
