//! Source documents
//!
//! Invoices and journals share one document model: a dated, company-owned
//! set of line items that moves through `draft -> posted -> voided`. Drafts
//! are freely editable; posting freezes the document and writes the ledger;
//! voiding compensates it. No other transition exists.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use core_kernel::{CompanyId, Currency, DocumentId, Money, PartyId, UserId};

use crate::account::AccountCode;
use crate::entry::EntrySide;
use crate::rules::PostingRole;

/// Kind of source document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Invoice,
    Journal,
}

impl DocumentKind {
    /// Permission required to post a document of this kind
    pub fn post_permission(&self) -> &'static str {
        match self {
            DocumentKind::Invoice => "invoice:post",
            DocumentKind::Journal => "journal:post",
        }
    }

    /// Permission required to void a document of this kind
    pub fn void_permission(&self) -> &'static str {
        match self {
            DocumentKind::Invoice => "invoice:void",
            DocumentKind::Journal => "journal:void",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Invoice => "invoice",
            DocumentKind::Journal => "journal",
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Document lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Draft,
    Posted,
    Voided,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Draft => "draft",
            DocumentStatus::Posted => "posted",
            DocumentStatus::Voided => "voided",
        }
    }
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The account a line posts to: a code named directly (journals) or a role
/// resolved through the company's posting rules (invoices)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineAccount {
    Code(AccountCode),
    Role(PostingRole),
}

/// A single line item on a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Line identifier, local to the document
    pub id: Uuid,
    /// Account reference
    pub account: LineAccount,
    /// Debit or credit
    pub side: EntrySide,
    /// Line amount, always positive
    pub amount: Money,
    /// Optional description
    pub description: Option<String>,
}

impl LineItem {
    /// Creates a debit line against an explicit account code
    pub fn debit(account: impl Into<AccountCode>, amount: Money) -> Self {
        Self {
            id: Uuid::new_v4(),
            account: LineAccount::Code(account.into()),
            side: EntrySide::Debit,
            amount,
            description: None,
        }
    }

    /// Creates a credit line against an explicit account code
    pub fn credit(account: impl Into<AccountCode>, amount: Money) -> Self {
        Self {
            id: Uuid::new_v4(),
            account: LineAccount::Code(account.into()),
            side: EntrySide::Credit,
            amount,
            description: None,
        }
    }

    /// Creates a line against a posting role
    pub fn for_role(role: PostingRole, side: EntrySide, amount: Money) -> Self {
        Self {
            id: Uuid::new_v4(),
            account: LineAccount::Role(role),
            side,
            amount,
            description: None,
        }
    }

    /// Adds a description to the line
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// An invoice or journal document
///
/// # Invariants
///
/// - line items are mutated only while the document is a draft
/// - `posted_*` fields are set exactly once, by the posting engine
/// - `voided_*` fields are set exactly once, by the void engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier
    pub id: DocumentId,
    /// Owning company
    pub company_id: CompanyId,
    /// Invoice or journal
    pub kind: DocumentKind,
    /// Lifecycle status
    pub status: DocumentStatus,
    /// Date the document takes effect in the ledger
    pub document_date: NaiveDate,
    /// Customer or supplier, where applicable
    pub counterparty_id: Option<PartyId>,
    /// Line items
    pub lines: Vec<LineItem>,
    /// Document currency
    pub currency: Currency,
    /// Total amount (sum of debit lines)
    pub total: Money,
    /// Who created the draft
    pub created_by: UserId,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Who posted the document
    pub posted_by: Option<UserId>,
    /// When the document was posted
    pub posted_at: Option<DateTime<Utc>>,
    /// Who voided the document
    pub voided_by: Option<UserId>,
    /// When the document was voided
    pub voided_at: Option<DateTime<Utc>>,
    /// Why the document was voided
    pub void_reason: Option<String>,
}

impl Document {
    /// Creates a new draft with no lines
    pub fn draft(
        company_id: CompanyId,
        kind: DocumentKind,
        document_date: NaiveDate,
        currency: Currency,
        created_by: UserId,
    ) -> Self {
        Self {
            id: DocumentId::new_v7(),
            company_id,
            kind,
            status: DocumentStatus::Draft,
            document_date,
            counterparty_id: None,
            lines: Vec::new(),
            currency,
            total: Money::zero(currency),
            created_by,
            created_at: Utc::now(),
            posted_by: None,
            posted_at: None,
            voided_by: None,
            voided_at: None,
            void_reason: None,
        }
    }

    /// Sets the counterparty
    pub fn with_counterparty(mut self, party_id: PartyId) -> Self {
        self.counterparty_id = Some(party_id);
        self
    }

    /// Appends a line item; drafts only
    ///
    /// Returns false (and leaves the document unchanged) once the document
    /// has left draft.
    pub fn push_line(&mut self, line: LineItem) -> bool {
        if self.status != DocumentStatus::Draft {
            return false;
        }
        self.lines.push(line);
        self.recalculate_total();
        true
    }

    /// Builder-style line append for draft construction
    pub fn with_line(mut self, line: LineItem) -> Self {
        self.push_line(line);
        self
    }

    /// Sum of the debit lines
    pub fn debit_total(&self) -> Money {
        self.side_total(EntrySide::Debit)
    }

    /// Sum of the credit lines
    pub fn credit_total(&self) -> Money {
        self.side_total(EntrySide::Credit)
    }

    /// True when debit and credit totals match exactly
    pub fn is_balanced(&self) -> bool {
        self.debit_total().amount() == self.credit_total().amount()
    }

    /// Stamps the posted state; the store commits it behind a status CAS
    pub fn mark_posted(&mut self, posted_by: UserId, posted_at: DateTime<Utc>) {
        self.status = DocumentStatus::Posted;
        self.posted_by = Some(posted_by);
        self.posted_at = Some(posted_at);
    }

    /// Stamps the voided state; the store commits it behind a status CAS
    pub fn mark_voided(
        &mut self,
        voided_by: UserId,
        voided_at: DateTime<Utc>,
        reason: impl Into<String>,
    ) {
        self.status = DocumentStatus::Voided;
        self.voided_by = Some(voided_by);
        self.voided_at = Some(voided_at);
        self.void_reason = Some(reason.into());
    }

    fn side_total(&self, side: EntrySide) -> Money {
        self.lines
            .iter()
            .filter(|l| l.side == side)
            .fold(Money::zero(self.currency), |acc, l| acc + l.amount)
    }

    fn recalculate_total(&mut self) {
        self.total = self.debit_total();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    fn usd(amount: rust_decimal::Decimal) -> Money {
        Money::new(amount, Currency::USD)
    }

    fn draft_journal() -> Document {
        Document::draft(
            CompanyId::new(),
            DocumentKind::Journal,
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            Currency::USD,
            UserId::new(),
        )
    }

    #[test]
    fn test_draft_starts_empty_and_unstamped() {
        let doc = draft_journal();
        assert_eq!(doc.status, DocumentStatus::Draft);
        assert!(doc.lines.is_empty());
        assert!(doc.posted_at.is_none());
        assert!(doc.voided_at.is_none());
        assert!(doc.total.is_zero());
    }

    #[test]
    fn test_totals_and_balance() {
        let doc = draft_journal()
            .with_line(LineItem::debit("1000", usd(dec!(600))))
            .with_line(LineItem::debit("1100", usd(dec!(400))))
            .with_line(LineItem::credit("4000", usd(dec!(1000))));

        assert_eq!(doc.debit_total().amount(), dec!(1000));
        assert_eq!(doc.credit_total().amount(), dec!(1000));
        assert_eq!(doc.total.amount(), dec!(1000));
        assert!(doc.is_balanced());
    }

    #[test]
    fn test_unbalanced_detection() {
        let doc = draft_journal()
            .with_line(LineItem::debit("1000", usd(dec!(1000))))
            .with_line(LineItem::credit("4000", usd(dec!(900))));

        assert!(!doc.is_balanced());
    }

    #[test]
    fn test_push_line_rejected_after_posting() {
        let mut doc = draft_journal()
            .with_line(LineItem::debit("1000", usd(dec!(100))))
            .with_line(LineItem::credit("4000", usd(dec!(100))));

        doc.mark_posted(UserId::new(), Utc::now());

        let accepted = doc.push_line(LineItem::debit("1000", usd(dec!(50))));
        assert!(!accepted);
        assert_eq!(doc.lines.len(), 2);
        assert_eq!(doc.total.amount(), dec!(100));
    }

    #[test]
    fn test_permissions_by_kind() {
        assert_eq!(DocumentKind::Invoice.post_permission(), "invoice:post");
        assert_eq!(DocumentKind::Journal.void_permission(), "journal:void");
    }
}
