//! Ledger Domain - Double-Entry Posting and Reporting
//!
//! This crate implements the double-entry accounting core: immutable ledger
//! entries tied to a per-company chart of accounts, an atomic posting engine
//! for draft documents, compensating reversals for voids, and on-demand
//! balance aggregation feeding the balance sheet and income statement.
//!
//! # Double-Entry Principles
//!
//! Every posted document creates balanced debits and credits:
//! - Debits increase asset and expense accounts
//! - Credits increase liability, equity and revenue accounts
//! - The sum of all debits must equal the sum of all credits, exactly
//!
//! # Lifecycle
//!
//! Documents move `draft -> posted -> voided` and nowhere else. Posting and
//! voiding are single atomic commits guarded by a status compare-and-swap;
//! ledger entries are append-only and never updated or deleted.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_ledger::{Document, DocumentKind, LineItem, PostingEngine};
//!
//! let draft = Document::draft(company_id, DocumentKind::Journal, date, currency, user)
//!     .with_line(LineItem::debit("1100", amount))
//!     .with_line(LineItem::credit("4000", amount));
//!
//! store.insert_document(&draft).await?;
//! let posted = engine.post(draft.id, user).await?;
//! ```

pub mod account;
pub mod authorize;
pub mod balance;
pub mod company;
pub mod document;
pub mod entry;
pub mod error;
pub mod memory;
pub mod posting;
pub mod reports;
pub mod reversal;
pub mod rules;
pub mod store;

pub use account::{AccountCode, AccountType, ChartOfAccount};
pub use authorize::{Authorizer, AuthzError, StaticAuthorizer};
pub use balance::{accumulate, PeriodAggregator, PeriodBalances};
pub use company::Company;
pub use document::{Document, DocumentKind, DocumentStatus, LineAccount, LineItem};
pub use entry::{EntrySide, LedgerEntry};
pub use error::LedgerError;
pub use memory::InMemoryLedgerStore;
pub use posting::{check_balanced, resolve_lines, PostingEngine, ResolvedLine};
pub use reports::{
    build_balance_sheet, build_income_statement, BalanceSheet, IncomeStatement, ReportGenerator,
    ReportLine, Section,
};
pub use reversal::{build_reversals, VoidEngine};
pub use rules::{standard_invoice_rules, PostingRole, PostingRule, PostingRules};
pub use store::{LedgerStore, StoreError};
