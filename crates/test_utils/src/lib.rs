//! Shared Test Utilities
//!
//! Fixtures, builders, assertions, generators, and a containerized
//! PostgreSQL harness for the ledger test suite.

pub mod assertions;
pub mod builders;
pub mod database;
pub mod fixtures;
pub mod generators;

pub use assertions::{assert_balanced_entries, assert_money_eq, assert_reversal_mirrors};
pub use builders::{balanced_sale, TestDocumentBuilder};
pub use database::{TestDatabase, TestDatabaseConfig};
pub use fixtures::{ChartFixtures, DateFixtures, MoneyFixtures};
pub use generators::{balanced_journal_strategy, random_company};
