//! In-memory ledger store
//!
//! A complete [`LedgerStore`] implementation backed by process memory. Used
//! by the test suites and handy for local development; it enforces the same
//! commit semantics as the database-backed store, including the status
//! compare-and-swap on posting and voiding.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use core_kernel::{CompanyId, DocumentId, ReportingPeriod};

use crate::account::{AccountCode, ChartOfAccount};
use crate::company::Company;
use crate::document::{Document, DocumentStatus};
use crate::entry::LedgerEntry;
use crate::rules::{PostingRule, PostingRules};
use crate::store::{LedgerStore, StoreError};

#[derive(Default)]
struct State {
    companies: HashMap<CompanyId, Company>,
    accounts: HashMap<(CompanyId, AccountCode), ChartOfAccount>,
    rules: HashMap<CompanyId, PostingRules>,
    documents: HashMap<DocumentId, Document>,
    entries: Vec<LedgerEntry>,
}

/// Memory-backed store with database-equivalent commit semantics
#[derive(Default)]
pub struct InMemoryLedgerStore {
    state: Mutex<State>,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of entry rows ever written; entries are append-only so
    /// this only grows
    pub fn entry_count(&self) -> usize {
        self.state.lock().map(|s| s.entries.len()).unwrap_or(0)
    }

    /// Snapshot of every entry row, in insertion order
    pub fn all_entries(&self) -> Vec<LedgerEntry> {
        self.state
            .lock()
            .map(|s| s.entries.clone())
            .unwrap_or_default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, State>, StoreError> {
        self.state
            .lock()
            .map_err(|_| StoreError::backend("state lock poisoned"))
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedgerStore {
    async fn fetch_company(&self, company_id: CompanyId) -> Result<Company, StoreError> {
        let state = self.lock()?;
        state
            .companies
            .get(&company_id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("company", company_id))
    }

    async fn insert_company(&self, company: &Company) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        if state.companies.contains_key(&company.id) {
            return Err(StoreError::ConstraintViolation(format!(
                "company {} already exists",
                company.id
            )));
        }
        state.companies.insert(company.id, company.clone());
        Ok(())
    }

    async fn fetch_account(
        &self,
        company_id: CompanyId,
        code: &AccountCode,
    ) -> Result<ChartOfAccount, StoreError> {
        let state = self.lock()?;
        state
            .accounts
            .get(&(company_id, code.clone()))
            .cloned()
            .ok_or_else(|| StoreError::not_found("account", code))
    }

    async fn fetch_chart(&self, company_id: CompanyId) -> Result<Vec<ChartOfAccount>, StoreError> {
        let state = self.lock()?;
        let mut chart: Vec<ChartOfAccount> = state
            .accounts
            .values()
            .filter(|a| a.company_id == company_id)
            .cloned()
            .collect();
        chart.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(chart)
    }

    async fn insert_account(&self, account: &ChartOfAccount) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        let key = (account.company_id, account.code.clone());
        if state.accounts.contains_key(&key) {
            return Err(StoreError::ConstraintViolation(format!(
                "account code {} already exists for company",
                account.code
            )));
        }
        state.accounts.insert(key, account.clone());
        Ok(())
    }

    async fn fetch_rules(&self, company_id: CompanyId) -> Result<PostingRules, StoreError> {
        let state = self.lock()?;
        Ok(state.rules.get(&company_id).cloned().unwrap_or_default())
    }

    async fn upsert_rule(
        &self,
        company_id: CompanyId,
        rule: PostingRule,
    ) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        state.rules.entry(company_id).or_default().set(rule);
        Ok(())
    }

    async fn fetch_document(&self, document_id: DocumentId) -> Result<Document, StoreError> {
        let state = self.lock()?;
        state
            .documents
            .get(&document_id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("document", document_id))
    }

    async fn insert_document(&self, document: &Document) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        if state.documents.contains_key(&document.id) {
            return Err(StoreError::ConstraintViolation(format!(
                "document {} already exists",
                document.id
            )));
        }
        state.documents.insert(document.id, document.clone());
        Ok(())
    }

    async fn update_draft(&self, document: &Document) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        let stored = state
            .documents
            .get_mut(&document.id)
            .ok_or_else(|| StoreError::not_found("document", document.id))?;
        if stored.status != DocumentStatus::Draft {
            return Err(StoreError::conflict(format!(
                "document {} is {}, drafts only",
                document.id, stored.status
            )));
        }
        *stored = document.clone();
        Ok(())
    }

    async fn commit_posting(
        &self,
        document: &Document,
        entries: &[LedgerEntry],
    ) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        let stored = state
            .documents
            .get(&document.id)
            .ok_or_else(|| StoreError::not_found("document", document.id))?;
        // Compare-and-swap: the stored row must still be a draft
        if stored.status != DocumentStatus::Draft {
            return Err(StoreError::conflict(format!(
                "document {} is already {}",
                document.id, stored.status
            )));
        }
        state.entries.extend_from_slice(entries);
        state.documents.insert(document.id, document.clone());
        Ok(())
    }

    async fn commit_void(
        &self,
        document: &Document,
        reversals: &[LedgerEntry],
    ) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        let stored = state
            .documents
            .get(&document.id)
            .ok_or_else(|| StoreError::not_found("document", document.id))?;
        if stored.status != DocumentStatus::Posted {
            return Err(StoreError::conflict(format!(
                "document {} is {}, only posted documents void",
                document.id, stored.status
            )));
        }
        state.entries.extend_from_slice(reversals);
        state.documents.insert(document.id, document.clone());
        Ok(())
    }

    async fn entries_for_document(
        &self,
        document_id: DocumentId,
    ) -> Result<Vec<LedgerEntry>, StoreError> {
        let state = self.lock()?;
        Ok(state
            .entries
            .iter()
            .filter(|e| e.document_id == document_id)
            .cloned()
            .collect())
    }

    async fn entries_in_period(
        &self,
        company_id: CompanyId,
        period: ReportingPeriod,
    ) -> Result<Vec<LedgerEntry>, StoreError> {
        let state = self.lock()?;
        Ok(state
            .entries
            .iter()
            .filter(|e| e.company_id == company_id && period.contains(e.entry_date))
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
