//! Repository implementations for the ledger store
//!
//! The ledger aggregate (companies, chart of accounts, documents, posting
//! rules, entries) is served by a single repository implementing the
//! domain's store port, because posting and voiding need cross-table
//! transactions. Authorization grants live in their own repository.

pub mod authz;
pub mod ledger;

pub use authz::PgAuthorizer;
pub use ledger::PgLedgerStore;
