//! Posting engine
//!
//! Posting commits a draft document into the permanent ledger: it validates
//! the document, resolves its lines against the chart of accounts and the
//! company's posting rules, and writes one ledger entry per line together
//! with the status stamp in a single atomic store commit.
//!
//! # Invariants
//!
//! - only drafts post; any other status is rejected without side effects
//! - debit and credit totals must match exactly (decimal equality)
//! - the entry writes and the status change commit together or not at all
//! - a lost `draft -> posted` race surfaces as a conflict, never a double post

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, warn};

use core_kernel::{Currency, DocumentId, Money, UserId};

use crate::account::{AccountCode, ChartOfAccount};
use crate::authorize::Authorizer;
use crate::document::{Document, DocumentStatus, LineAccount};
use crate::entry::{EntrySide, LedgerEntry};
use crate::error::LedgerError;
use crate::rules::PostingRules;
use crate::store::{LedgerStore, StoreError};

/// A document line with its account reference resolved to a concrete code
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLine {
    pub account_code: AccountCode,
    pub side: EntrySide,
    pub amount: Money,
}

/// Resolves every line of a document to a concrete account code
///
/// Lines that name a code pass through; lines that name a role are looked up
/// in the company's posting rules and fail with [`LedgerError::NoPostingRule`]
/// when unmapped.
pub fn resolve_lines(
    document: &Document,
    rules: &PostingRules,
) -> Result<Vec<ResolvedLine>, LedgerError> {
    document
        .lines
        .iter()
        .map(|line| {
            let account_code = match &line.account {
                LineAccount::Code(code) => code.clone(),
                LineAccount::Role(role) => rules
                    .resolve(document.kind, *role)
                    .cloned()
                    .ok_or(LedgerError::NoPostingRule {
                        kind: document.kind,
                        role: *role,
                    })?,
            };
            Ok(ResolvedLine {
                account_code,
                side: line.side,
                amount: line.amount,
            })
        })
        .collect()
}

/// Validates line amounts and the debit/credit balance
///
/// Amounts must be positive and in the document currency; the debit and
/// credit totals must be exactly equal.
pub fn check_balanced(lines: &[ResolvedLine], currency: Currency) -> Result<(), LedgerError> {
    let mut debits = Decimal::ZERO;
    let mut credits = Decimal::ZERO;

    for line in lines {
        if !line.amount.is_positive() {
            return Err(LedgerError::InvalidLine(format!(
                "line amount must be positive, got {}",
                line.amount
            )));
        }
        if line.amount.currency() != currency {
            return Err(LedgerError::InvalidLine(format!(
                "line currency {} does not match document currency {}",
                line.amount.currency(),
                currency
            )));
        }
        match line.side {
            EntrySide::Debit => debits += line.amount.amount(),
            EntrySide::Credit => credits += line.amount.amount(),
        }
    }

    if debits != credits {
        return Err(LedgerError::Imbalanced {
            debits,
            credits,
            discrepancy: (debits - credits).abs(),
        });
    }

    Ok(())
}

/// Validates resolved lines against the chart of accounts
fn check_accounts(lines: &[ResolvedLine], chart: &[ChartOfAccount]) -> Result<(), LedgerError> {
    let by_code: HashMap<&AccountCode, &ChartOfAccount> =
        chart.iter().map(|a| (&a.code, a)).collect();

    for line in lines {
        match by_code.get(&line.account_code) {
            None => return Err(LedgerError::AccountNotFound(line.account_code.clone())),
            Some(account) if !account.is_active => {
                return Err(LedgerError::AccountInactive(line.account_code.clone()))
            }
            Some(_) => {}
        }
    }
    Ok(())
}

/// Commits draft documents into the ledger
pub struct PostingEngine {
    store: Arc<dyn LedgerStore>,
    authorizer: Arc<dyn Authorizer>,
}

impl PostingEngine {
    pub fn new(store: Arc<dyn LedgerStore>, authorizer: Arc<dyn Authorizer>) -> Self {
        Self { store, authorizer }
    }

    /// Posts a draft document
    ///
    /// On success the document's entries are in the ledger and the returned
    /// document carries the posted stamp. Every failure leaves the ledger
    /// and the document untouched.
    pub async fn post(
        &self,
        document_id: DocumentId,
        acting_user: UserId,
    ) -> Result<Document, LedgerError> {
        let mut document = fetch_document(&*self.store, document_id).await?;

        let permission = document.kind.post_permission();
        if !self.authorizer.allows(acting_user, permission).await? {
            return Err(LedgerError::Forbidden {
                user: acting_user,
                permission,
            });
        }

        if document.status != DocumentStatus::Draft {
            return Err(LedgerError::InvalidStateTransition {
                current: document.status,
                requested: DocumentStatus::Posted,
            });
        }

        if document.lines.is_empty() {
            return Err(LedgerError::EmptyDocument(document_id));
        }

        let chart = self.store.fetch_chart(document.company_id).await?;
        let rules = self.store.fetch_rules(document.company_id).await?;

        let resolved = resolve_lines(&document, &rules)?;
        check_accounts(&resolved, &chart)?;
        check_balanced(&resolved, document.currency)?;

        let entries: Vec<LedgerEntry> = resolved
            .into_iter()
            .map(|line| {
                LedgerEntry::new(
                    document.company_id,
                    document.id,
                    document.kind,
                    line.account_code,
                    line.side,
                    line.amount,
                    document.document_date,
                )
            })
            .collect();

        document.mark_posted(acting_user, Utc::now());

        match self.store.commit_posting(&document, &entries).await {
            Ok(()) => {
                info!(
                    company_id = %document.company_id,
                    document_id = %document.id,
                    kind = %document.kind,
                    entries = entries.len(),
                    total = %document.total,
                    "document posted"
                );
                Ok(document)
            }
            Err(StoreError::Conflict(_)) => {
                warn!(document_id = %document_id, "lost posting race");
                Err(LedgerError::ConcurrencyConflict(document_id))
            }
            Err(other) => Err(LedgerError::Store(other)),
        }
    }
}

/// Fetches a document, translating a missing row into the domain error
pub(crate) async fn fetch_document(
    store: &dyn LedgerStore,
    document_id: DocumentId,
) -> Result<Document, LedgerError> {
    store.fetch_document(document_id).await.map_err(|e| {
        if e.is_not_found() {
            LedgerError::DocumentNotFound(document_id)
        } else {
            LedgerError::Store(e)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{DocumentKind, LineItem};
    use crate::rules::{standard_invoice_rules, PostingRole};
    use chrono::NaiveDate;
    use core_kernel::{CompanyId, Currency};
    use rust_decimal_macros::dec;

    fn usd(amount: Decimal) -> Money {
        Money::new(amount, Currency::USD)
    }

    fn draft(kind: DocumentKind) -> Document {
        Document::draft(
            CompanyId::new(),
            kind,
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            Currency::USD,
            UserId::new(),
        )
    }

    #[test]
    fn test_resolve_explicit_codes() {
        let doc = draft(DocumentKind::Journal)
            .with_line(LineItem::debit("1000", usd(dec!(100))))
            .with_line(LineItem::credit("4000", usd(dec!(100))));

        let resolved = resolve_lines(&doc, &PostingRules::default()).unwrap();
        assert_eq!(resolved[0].account_code, AccountCode::from("1000"));
        assert_eq!(resolved[1].account_code, AccountCode::from("4000"));
    }

    #[test]
    fn test_resolve_roles_through_rules() {
        let rules = standard_invoice_rules("1100", "4000", "2200");
        let doc = draft(DocumentKind::Invoice)
            .with_line(LineItem::for_role(
                PostingRole::Receivable,
                EntrySide::Debit,
                usd(dec!(1100)),
            ))
            .with_line(LineItem::for_role(
                PostingRole::Revenue,
                EntrySide::Credit,
                usd(dec!(1000)),
            ))
            .with_line(LineItem::for_role(
                PostingRole::Tax,
                EntrySide::Credit,
                usd(dec!(100)),
            ));

        let resolved = resolve_lines(&doc, &rules).unwrap();
        assert_eq!(resolved[0].account_code, AccountCode::from("1100"));
        assert_eq!(resolved[1].account_code, AccountCode::from("4000"));
        assert_eq!(resolved[2].account_code, AccountCode::from("2200"));
    }

    #[test]
    fn test_resolve_missing_rule() {
        let doc = draft(DocumentKind::Invoice).with_line(LineItem::for_role(
            PostingRole::Receivable,
            EntrySide::Debit,
            usd(dec!(100)),
        ));

        let result = resolve_lines(&doc, &PostingRules::default());
        assert!(matches!(
            result,
            Err(LedgerError::NoPostingRule {
                kind: DocumentKind::Invoice,
                role: PostingRole::Receivable,
            })
        ));
    }

    #[test]
    fn test_balanced_lines_pass() {
        let lines = vec![
            ResolvedLine {
                account_code: AccountCode::from("1000"),
                side: EntrySide::Debit,
                amount: usd(dec!(600)),
            },
            ResolvedLine {
                account_code: AccountCode::from("1100"),
                side: EntrySide::Debit,
                amount: usd(dec!(400)),
            },
            ResolvedLine {
                account_code: AccountCode::from("4000"),
                side: EntrySide::Credit,
                amount: usd(dec!(1000)),
            },
        ];

        assert!(check_balanced(&lines, Currency::USD).is_ok());
    }

    #[test]
    fn test_imbalance_reports_discrepancy() {
        let lines = vec![
            ResolvedLine {
                account_code: AccountCode::from("1100"),
                side: EntrySide::Debit,
                amount: usd(dec!(1000)),
            },
            ResolvedLine {
                account_code: AccountCode::from("4000"),
                side: EntrySide::Credit,
                amount: usd(dec!(900)),
            },
        ];

        match check_balanced(&lines, Currency::USD) {
            Err(LedgerError::Imbalanced {
                debits,
                credits,
                discrepancy,
            }) => {
                assert_eq!(debits, dec!(1000));
                assert_eq!(credits, dec!(900));
                assert_eq!(discrepancy, dec!(100));
            }
            other => panic!("expected Imbalanced, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_amount_rejected() {
        let lines = vec![ResolvedLine {
            account_code: AccountCode::from("1000"),
            side: EntrySide::Debit,
            amount: usd(dec!(0)),
        }];

        assert!(matches!(
            check_balanced(&lines, Currency::USD),
            Err(LedgerError::InvalidLine(_))
        ));
    }

    #[test]
    fn test_currency_mismatch_rejected() {
        let lines = vec![
            ResolvedLine {
                account_code: AccountCode::from("1000"),
                side: EntrySide::Debit,
                amount: Money::new(dec!(100), Currency::EUR),
            },
            ResolvedLine {
                account_code: AccountCode::from("4000"),
                side: EntrySide::Credit,
                amount: usd(dec!(100)),
            },
        ];

        assert!(matches!(
            check_balanced(&lines, Currency::USD),
            Err(LedgerError::InvalidLine(_))
        ));
    }
}
