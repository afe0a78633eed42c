//! Posting rules
//!
//! A posting rule maps a (document kind, posting role) pair to a concrete
//! account code for one company. Invoice lines name roles rather than account
//! codes, so which accounts an invoice posts to is configuration, not code.
//! Journals bypass the rule table entirely by naming codes directly.

use serde::{Deserialize, Serialize};

use crate::account::AccountCode;
use crate::document::DocumentKind;

/// The role a document line plays in the posting, resolved to an account
/// through the company's rule table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostingRole {
    /// Amount owed by the counterparty (typically an asset account)
    Receivable,
    /// Amount owed to the counterparty
    Payable,
    /// Earned revenue
    Revenue,
    /// Collected tax, held as a liability
    Tax,
    /// Discount granted, offsetting revenue
    Discount,
}

impl PostingRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostingRole::Receivable => "receivable",
            PostingRole::Payable => "payable",
            PostingRole::Revenue => "revenue",
            PostingRole::Tax => "tax",
            PostingRole::Discount => "discount",
        }
    }
}

/// One rule: this kind of document posts this role to this account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingRule {
    pub document_kind: DocumentKind,
    pub role: PostingRole,
    pub account_code: AccountCode,
}

/// The posting rule table for one company
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostingRules {
    rules: Vec<PostingRule>,
}

impl PostingRules {
    pub fn new(rules: Vec<PostingRule>) -> Self {
        Self { rules }
    }

    /// Adds or replaces the rule for a (kind, role) pair
    pub fn set(&mut self, rule: PostingRule) {
        self.rules
            .retain(|r| !(r.document_kind == rule.document_kind && r.role == rule.role));
        self.rules.push(rule);
    }

    /// Resolves a role to an account code for the given document kind
    pub fn resolve(&self, kind: DocumentKind, role: PostingRole) -> Option<&AccountCode> {
        self.rules
            .iter()
            .find(|r| r.document_kind == kind && r.role == role)
            .map(|r| &r.account_code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PostingRule> {
        self.rules.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Builder for a conventional invoice rule set
pub fn standard_invoice_rules(
    receivable: impl Into<AccountCode>,
    revenue: impl Into<AccountCode>,
    tax: impl Into<AccountCode>,
) -> PostingRules {
    PostingRules::new(vec![
        PostingRule {
            document_kind: DocumentKind::Invoice,
            role: PostingRole::Receivable,
            account_code: receivable.into(),
        },
        PostingRule {
            document_kind: DocumentKind::Invoice,
            role: PostingRole::Revenue,
            account_code: revenue.into(),
        },
        PostingRule {
            document_kind: DocumentKind::Invoice,
            role: PostingRole::Tax,
            account_code: tax.into(),
        },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        let rules = standard_invoice_rules("1100", "4000", "2200");

        assert_eq!(
            rules.resolve(DocumentKind::Invoice, PostingRole::Receivable),
            Some(&AccountCode::from("1100"))
        );
        assert_eq!(
            rules.resolve(DocumentKind::Invoice, PostingRole::Revenue),
            Some(&AccountCode::from("4000"))
        );
        assert_eq!(
            rules.resolve(DocumentKind::Journal, PostingRole::Revenue),
            None
        );
    }

    #[test]
    fn test_set_replaces_existing() {
        let mut rules = standard_invoice_rules("1100", "4000", "2200");
        rules.set(PostingRule {
            document_kind: DocumentKind::Invoice,
            role: PostingRole::Revenue,
            account_code: AccountCode::from("4100"),
        });

        assert_eq!(
            rules.resolve(DocumentKind::Invoice, PostingRole::Revenue),
            Some(&AccountCode::from("4100"))
        );
    }
}
