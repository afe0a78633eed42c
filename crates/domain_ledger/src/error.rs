//! Ledger domain errors

use rust_decimal::Decimal;
use thiserror::Error;

use core_kernel::{DocumentId, MoneyError, PeriodError, UserId};

use crate::account::AccountCode;
use crate::authorize::AuthzError;
use crate::document::{DocumentKind, DocumentStatus};
use crate::rules::PostingRole;
use crate::store::StoreError;

/// Errors that can occur in the ledger domain
///
/// Every variant except `Store` and `Calculation` is a caller-visible
/// precondition failure; none of them leave partial ledger state behind.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Referenced document does not exist
    #[error("Document not found: {0}")]
    DocumentNotFound(DocumentId),

    /// Referenced company does not exist
    #[error("Company not found: {0}")]
    CompanyNotFound(String),

    /// Referenced account does not exist in the company's chart
    #[error("Account not found: {0}")]
    AccountNotFound(AccountCode),

    /// Account exists but no longer accepts postings
    #[error("Account is inactive: {0}")]
    AccountInactive(AccountCode),

    /// The requested transition is not legal from the current status
    #[error("Invalid state transition: document is {current}, cannot move to {requested}")]
    InvalidStateTransition {
        current: DocumentStatus,
        requested: DocumentStatus,
    },

    /// Debit and credit totals differ
    #[error("Imbalanced entry: debits={debits}, credits={credits}, discrepancy={discrepancy}")]
    Imbalanced {
        debits: Decimal,
        credits: Decimal,
        discrepancy: Decimal,
    },

    /// Document has no line items to post
    #[error("Document has no line items: {0}")]
    EmptyDocument(DocumentId),

    /// Void requested without a reason
    #[error("Void reason must not be empty")]
    EmptyVoidReason,

    /// No posting rule maps this role for this document kind
    #[error("No posting rule for {kind} role {role:?}")]
    NoPostingRule {
        kind: DocumentKind,
        role: PostingRole,
    },

    /// A line item is malformed (zero amount, wrong currency)
    #[error("Invalid line item: {0}")]
    InvalidLine(String),

    /// Caller lacks the required permission
    #[error("User {user} lacks permission {permission}")]
    Forbidden {
        user: UserId,
        permission: &'static str,
    },

    /// The authorization collaborator failed
    #[error("Authorization error: {0}")]
    Authorization(#[from] AuthzError),

    /// Lost a status compare-and-swap race; re-fetch before retrying
    #[error("Concurrent update on document {0}")]
    ConcurrencyConflict(DocumentId),

    /// Arithmetic failure, e.g. a currency mismatch inside one company
    #[error("Calculation error: {0}")]
    Calculation(String),

    /// Underlying store failure; the transaction left no partial state
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl From<MoneyError> for LedgerError {
    fn from(err: MoneyError) -> Self {
        LedgerError::Calculation(err.to_string())
    }
}

impl From<PeriodError> for LedgerError {
    fn from(err: PeriodError) -> Self {
        LedgerError::Calculation(err.to_string())
    }
}
