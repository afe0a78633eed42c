//! Void engine
//!
//! Voiding never deletes or mutates history. For every entry the document
//! originally posted, the engine writes a compensating entry with the side
//! flipped and the same amount, dated at void time, then stamps the document
//! voided. The original entries and the original period are left intact.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use core_kernel::{DocumentId, UserId};

use crate::authorize::Authorizer;
use crate::document::{Document, DocumentStatus};
use crate::entry::LedgerEntry;
use crate::error::LedgerError;
use crate::posting::fetch_document;
use crate::store::{LedgerStore, StoreError};

/// Builds the compensating entries for a set of originals
///
/// One reversal per original: side flipped, amount preserved, linked back to
/// the entry it compensates, dated at the void date.
pub fn build_reversals(
    originals: &[LedgerEntry],
    void_date: chrono::NaiveDate,
) -> Vec<LedgerEntry> {
    originals
        .iter()
        .map(|entry| entry.reversing(void_date))
        .collect()
}

/// Voids posted documents by writing compensating entries
pub struct VoidEngine {
    store: Arc<dyn LedgerStore>,
    authorizer: Arc<dyn Authorizer>,
}

impl VoidEngine {
    pub fn new(store: Arc<dyn LedgerStore>, authorizer: Arc<dyn Authorizer>) -> Self {
        Self { store, authorizer }
    }

    /// Voids a posted document
    ///
    /// On success the ledger holds one reversal entry per original entry and
    /// the returned document carries the voided stamp and the reason. Every
    /// failure leaves the ledger and the document untouched.
    pub async fn void(
        &self,
        document_id: DocumentId,
        acting_user: UserId,
        reason: &str,
    ) -> Result<Document, LedgerError> {
        if reason.trim().is_empty() {
            return Err(LedgerError::EmptyVoidReason);
        }

        let mut document = fetch_document(&*self.store, document_id).await?;

        let permission = document.kind.void_permission();
        if !self.authorizer.allows(acting_user, permission).await? {
            return Err(LedgerError::Forbidden {
                user: acting_user,
                permission,
            });
        }

        if document.status != DocumentStatus::Posted {
            return Err(LedgerError::InvalidStateTransition {
                current: document.status,
                requested: DocumentStatus::Voided,
            });
        }

        let originals = self.store.entries_for_document(document_id).await?;

        let now = Utc::now();
        let reversals = build_reversals(&originals, now.date_naive());

        document.mark_voided(acting_user, now, reason);

        match self.store.commit_void(&document, &reversals).await {
            Ok(()) => {
                info!(
                    company_id = %document.company_id,
                    document_id = %document.id,
                    kind = %document.kind,
                    reversals = reversals.len(),
                    reason = %reason,
                    "document voided"
                );
                Ok(document)
            }
            Err(StoreError::Conflict(_)) => {
                warn!(document_id = %document_id, "lost void race");
                Err(LedgerError::ConcurrencyConflict(document_id))
            }
            Err(other) => Err(LedgerError::Store(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::AccountCode;
    use crate::document::DocumentKind;
    use crate::entry::EntrySide;
    use chrono::NaiveDate;
    use core_kernel::{CompanyId, Currency, Money};
    use rust_decimal_macros::dec;

    fn entries() -> Vec<LedgerEntry> {
        let company = CompanyId::new();
        let document = DocumentId::new();
        let date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        vec![
            LedgerEntry::new(
                company,
                document,
                DocumentKind::Invoice,
                AccountCode::from("1100"),
                EntrySide::Debit,
                Money::new(dec!(1000), Currency::USD),
                date,
            ),
            LedgerEntry::new(
                company,
                document,
                DocumentKind::Invoice,
                AccountCode::from("4000"),
                EntrySide::Credit,
                Money::new(dec!(1000), Currency::USD),
                date,
            ),
        ]
    }

    #[test]
    fn test_build_reversals_flips_every_side() {
        let originals = entries();
        let void_date = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();

        let reversals = build_reversals(&originals, void_date);

        assert_eq!(reversals.len(), originals.len());
        for (original, reversal) in originals.iter().zip(&reversals) {
            assert_eq!(reversal.side, original.side.flipped());
            assert_eq!(reversal.amount, original.amount);
            assert_eq!(reversal.account_code, original.account_code);
            assert_eq!(reversal.entry_date, void_date);
            assert!(reversal.is_reversal);
            assert_eq!(reversal.reverses, Some(original.id));
        }
    }

    #[test]
    fn test_build_reversals_leaves_originals_untouched() {
        let originals = entries();
        let snapshot = originals.clone();

        let _ = build_reversals(&originals, NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());

        assert_eq!(originals, snapshot);
    }
}
