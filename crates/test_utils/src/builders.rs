//! Test Data Builders
//!
//! Builder patterns for constructing test documents with sensible defaults,
//! so tests specify only the fields they care about.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use core_kernel::{CompanyId, Currency, Money, PartyId, UserId};
use domain_ledger::{Document, DocumentKind, EntrySide, LineItem, PostingRole};

use crate::fixtures::DateFixtures;

/// Builder for draft test documents
pub struct TestDocumentBuilder {
    company_id: CompanyId,
    kind: DocumentKind,
    document_date: NaiveDate,
    currency: Currency,
    created_by: UserId,
    counterparty_id: Option<PartyId>,
    lines: Vec<LineItem>,
}

impl TestDocumentBuilder {
    /// A journal draft with no lines
    pub fn journal(company_id: CompanyId) -> Self {
        Self {
            company_id,
            kind: DocumentKind::Journal,
            document_date: DateFixtures::post_date(),
            currency: Currency::USD,
            created_by: UserId::new(),
            counterparty_id: None,
            lines: Vec::new(),
        }
    }

    /// An invoice draft with no lines
    pub fn invoice(company_id: CompanyId) -> Self {
        Self {
            kind: DocumentKind::Invoice,
            ..Self::journal(company_id)
        }
    }

    /// Sets the document date
    pub fn on(mut self, document_date: NaiveDate) -> Self {
        self.document_date = document_date;
        self
    }

    /// Sets the creator
    pub fn created_by(mut self, user: UserId) -> Self {
        self.created_by = user;
        self
    }

    /// Sets the counterparty
    pub fn counterparty(mut self, party: PartyId) -> Self {
        self.counterparty_id = Some(party);
        self
    }

    /// Adds a debit line against an account code
    pub fn debit(mut self, code: &str, amount: Decimal) -> Self {
        self.lines
            .push(LineItem::debit(code, Money::new(amount, self.currency)));
        self
    }

    /// Adds a credit line against an account code
    pub fn credit(mut self, code: &str, amount: Decimal) -> Self {
        self.lines
            .push(LineItem::credit(code, Money::new(amount, self.currency)));
        self
    }

    /// Adds a role-based line
    pub fn role_line(mut self, role: PostingRole, side: EntrySide, amount: Decimal) -> Self {
        self.lines.push(LineItem::for_role(
            role,
            side,
            Money::new(amount, self.currency),
        ));
        self
    }

    /// Builds the draft document
    pub fn build(self) -> Document {
        let mut document = Document::draft(
            self.company_id,
            self.kind,
            self.document_date,
            self.currency,
            self.created_by,
        );
        if let Some(party) = self.counterparty_id {
            document.counterparty_id = Some(party);
        }
        for line in self.lines {
            document.push_line(line);
        }
        document
    }
}

/// A balanced two-line journal: debit AR, credit revenue
pub fn balanced_sale(company_id: CompanyId, amount: Decimal) -> Document {
    TestDocumentBuilder::journal(company_id)
        .debit("1100", amount)
        .credit("4000", amount)
        .build()
}
