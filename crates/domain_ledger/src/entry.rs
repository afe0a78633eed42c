//! Ledger entries
//!
//! A [`LedgerEntry`] is the atom of the ledger: one debit or credit against
//! one account, produced by posting a document. Entries are immutable and
//! append-only; voiding a document adds compensating entries, it never
//! updates or deletes the originals.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{CompanyId, DocumentId, EntryId, Money};

use crate::account::AccountCode;
use crate::document::DocumentKind;

/// Which side of the ledger an entry sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntrySide {
    Debit,
    Credit,
}

impl EntrySide {
    /// Returns the opposite side
    pub fn flipped(self) -> Self {
        match self {
            EntrySide::Debit => EntrySide::Credit,
            EntrySide::Credit => EntrySide::Debit,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntrySide::Debit => "debit",
            EntrySide::Credit => "credit",
        }
    }
}

impl std::fmt::Display for EntrySide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable row in the ledger
///
/// # Invariants
///
/// - `amount` is always positive; the direction is carried by `side`
/// - for every source document, the debit and credit entry amounts sum equal
/// - reversal entries point at the entry they compensate via `reverses`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Unique entry identifier
    pub id: EntryId,
    /// Owning company
    pub company_id: CompanyId,
    /// Document this entry was posted from
    pub document_id: DocumentId,
    /// Kind of the source document
    pub document_kind: DocumentKind,
    /// Account the entry posts to
    pub account_code: AccountCode,
    /// Debit or credit
    pub side: EntrySide,
    /// Entry amount, always positive
    pub amount: Money,
    /// Date the entry takes effect in the ledger
    pub entry_date: NaiveDate,
    /// When the entry row was created
    pub created_at: DateTime<Utc>,
    /// True for compensating entries written by a void
    pub is_reversal: bool,
    /// The original entry this one reverses, if any
    pub reverses: Option<EntryId>,
}

impl LedgerEntry {
    /// Creates a new entry for a posted document line
    pub fn new(
        company_id: CompanyId,
        document_id: DocumentId,
        document_kind: DocumentKind,
        account_code: AccountCode,
        side: EntrySide,
        amount: Money,
        entry_date: NaiveDate,
    ) -> Self {
        Self {
            id: EntryId::new_v7(),
            company_id,
            document_id,
            document_kind,
            account_code,
            side,
            amount,
            entry_date,
            created_at: Utc::now(),
            is_reversal: false,
            reverses: None,
        }
    }

    /// Builds the compensating entry for this one
    ///
    /// The side is flipped, the amount preserved, and the new entry is dated
    /// at `entry_date` (the void date), keeping the original period intact.
    pub fn reversing(&self, entry_date: NaiveDate) -> Self {
        Self {
            id: EntryId::new_v7(),
            company_id: self.company_id,
            document_id: self.document_id,
            document_kind: self.document_kind,
            account_code: self.account_code.clone(),
            side: self.side.flipped(),
            amount: self.amount,
            entry_date,
            created_at: Utc::now(),
            is_reversal: true,
            reverses: Some(self.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    fn sample_entry(side: EntrySide) -> LedgerEntry {
        LedgerEntry::new(
            CompanyId::new(),
            DocumentId::new(),
            DocumentKind::Invoice,
            AccountCode::from("1100"),
            side,
            Money::new(dec!(1000), Currency::USD),
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
        )
    }

    #[test]
    fn test_side_flip() {
        assert_eq!(EntrySide::Debit.flipped(), EntrySide::Credit);
        assert_eq!(EntrySide::Credit.flipped(), EntrySide::Debit);
    }

    #[test]
    fn test_reversing_flips_side_and_links() {
        let original = sample_entry(EntrySide::Debit);
        let void_date = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();

        let reversal = original.reversing(void_date);

        assert_eq!(reversal.side, EntrySide::Credit);
        assert_eq!(reversal.amount, original.amount);
        assert_eq!(reversal.account_code, original.account_code);
        assert_eq!(reversal.document_id, original.document_id);
        assert_eq!(reversal.entry_date, void_date);
        assert!(reversal.is_reversal);
        assert_eq!(reversal.reverses, Some(original.id));
        assert_ne!(reversal.id, original.id);
    }

    #[test]
    fn test_reversing_does_not_touch_original() {
        let original = sample_entry(EntrySide::Credit);
        let before = original.clone();

        let _ = original.reversing(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());

        assert_eq!(original, before);
    }
}
