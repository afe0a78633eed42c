//! Core Kernel - Foundational types for the ledger system
//!
//! This crate provides the fundamental building blocks used across all
//! domain and infrastructure crates:
//! - Money types with precise decimal arithmetic
//! - Reporting periods for balance queries
//! - Strongly-typed identifiers

pub mod error;
pub mod identifiers;
pub mod money;
pub mod period;

pub use error::CoreError;
pub use identifiers::{AccountId, CompanyId, DocumentId, EntryId, PartyId, UserId};
pub use money::{Currency, Money, MoneyError};
pub use period::{PeriodError, ReportingPeriod};
