//! Persistence port
//!
//! [`LedgerStore`] is the narrow interface the engines speak to the backing
//! store through. Implementations must provide atomic multi-row commits for
//! posting and voiding, and a conditional status update (compare-and-swap)
//! so concurrent transitions of the same document are serialized.
//!
//! Note what is absent: there is no way to update or delete a ledger entry.
//! The ledger is append-only by construction.

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

use core_kernel::{CompanyId, DocumentId, ReportingPeriod};

use crate::account::{AccountCode, ChartOfAccount};
use crate::company::Company;
use crate::document::Document;
use crate::entry::LedgerEntry;
use crate::rules::{PostingRule, PostingRules};

/// Error type for store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested row was not found
    #[error("Not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    /// A conditional update matched zero rows (lost a status race)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A uniqueness or referential constraint was violated
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// The backend failed; the enclosing transaction rolled back
    #[error("Backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: impl fmt::Display) -> Self {
        StoreError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        StoreError::Conflict(message.into())
    }

    pub fn backend(message: impl Into<String>) -> Self {
        StoreError::Backend(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict(_))
    }
}

/// Transactional access to companies, the chart of accounts, documents,
/// posting rules and ledger entries
#[async_trait]
pub trait LedgerStore: Send + Sync {
    // Companies
    async fn fetch_company(&self, company_id: CompanyId) -> Result<Company, StoreError>;
    async fn insert_company(&self, company: &Company) -> Result<(), StoreError>;

    // Chart of accounts
    async fn fetch_account(
        &self,
        company_id: CompanyId,
        code: &AccountCode,
    ) -> Result<ChartOfAccount, StoreError>;
    async fn fetch_chart(&self, company_id: CompanyId) -> Result<Vec<ChartOfAccount>, StoreError>;
    async fn insert_account(&self, account: &ChartOfAccount) -> Result<(), StoreError>;

    // Posting rules
    async fn fetch_rules(&self, company_id: CompanyId) -> Result<PostingRules, StoreError>;
    async fn upsert_rule(&self, company_id: CompanyId, rule: PostingRule)
        -> Result<(), StoreError>;

    // Documents
    async fn fetch_document(&self, document_id: DocumentId) -> Result<Document, StoreError>;
    async fn insert_document(&self, document: &Document) -> Result<(), StoreError>;
    /// Replaces a draft's mutable fields; fails on non-draft documents
    async fn update_draft(&self, document: &Document) -> Result<(), StoreError>;

    /// Atomically writes the entries and stamps the document posted
    ///
    /// The status update is conditional on the stored document still being a
    /// draft; implementations return [`StoreError::Conflict`] when the
    /// condition fails, and must leave no partial state in that case.
    async fn commit_posting(
        &self,
        document: &Document,
        entries: &[LedgerEntry],
    ) -> Result<(), StoreError>;

    /// Atomically writes the compensating entries and stamps the document
    /// voided, conditional on the stored status still being posted
    async fn commit_void(
        &self,
        document: &Document,
        reversals: &[LedgerEntry],
    ) -> Result<(), StoreError>;

    // Entries (read-only beyond the commits above)
    async fn entries_for_document(
        &self,
        document_id: DocumentId,
    ) -> Result<Vec<LedgerEntry>, StoreError>;
    async fn entries_in_period(
        &self,
        company_id: CompanyId,
        period: ReportingPeriod,
    ) -> Result<Vec<LedgerEntry>, StoreError>;

    /// Cheap connectivity probe for readiness checks
    async fn ping(&self) -> Result<(), StoreError>;
}
