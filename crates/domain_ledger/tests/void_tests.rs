//! Void engine integration tests
//!
//! Voiding must compensate, never erase: the original entries stay exactly
//! as written, and the only new rows are the flipped reversals.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{Currency, Money, UserId};
use domain_ledger::{
    AccountType, ChartOfAccount, Company, Document, DocumentKind, DocumentStatus,
    InMemoryLedgerStore, LedgerError, LedgerStore, LineItem, PostingEngine, StaticAuthorizer,
    VoidEngine,
};

fn usd(amount: Decimal) -> Money {
    Money::new(amount, Currency::USD)
}

fn doc_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
}

struct Harness {
    store: Arc<InMemoryLedgerStore>,
    posting: PostingEngine,
    voiding: VoidEngine,
    company: Company,
    user: UserId,
}

async fn setup() -> Harness {
    let store = Arc::new(InMemoryLedgerStore::new());
    let authorizer = Arc::new(StaticAuthorizer::allow_all());
    let company = Company::new("Acme Trading", Currency::USD);
    store.insert_company(&company).await.unwrap();

    for (code, name, account_type) in [
        ("1100", "Accounts Receivable", AccountType::Asset),
        ("4000", "Sales Revenue", AccountType::Revenue),
    ] {
        store
            .insert_account(&ChartOfAccount::new(company.id, code, name, account_type))
            .await
            .unwrap();
    }

    Harness {
        posting: PostingEngine::new(store.clone(), authorizer.clone()),
        voiding: VoidEngine::new(store.clone(), authorizer),
        store,
        company,
        user: UserId::new(),
    }
}

async fn posted_invoice(h: &Harness) -> Document {
    let doc = Document::draft(
        h.company.id,
        DocumentKind::Invoice,
        doc_date(),
        Currency::USD,
        h.user,
    )
    .with_line(LineItem::debit("1100", usd(dec!(1000))))
    .with_line(LineItem::credit("4000", usd(dec!(1000))));
    h.store.insert_document(&doc).await.unwrap();
    h.posting.post(doc.id, h.user).await.unwrap()
}

#[tokio::test]
async fn test_void_writes_flipped_reversals() {
    let h = setup().await;
    let posted = posted_invoice(&h).await;
    let originals = h.store.entries_for_document(posted.id).await.unwrap();

    let voided = h
        .voiding
        .void(posted.id, h.user, "customer cancelled")
        .await
        .unwrap();

    assert_eq!(voided.status, DocumentStatus::Voided);
    assert_eq!(voided.voided_by, Some(h.user));
    assert!(voided.voided_at.is_some());
    assert_eq!(voided.void_reason.as_deref(), Some("customer cancelled"));

    let all = h.store.entries_for_document(posted.id).await.unwrap();
    assert_eq!(all.len(), originals.len() * 2);

    let reversals: Vec<_> = all.iter().filter(|e| e.is_reversal).collect();
    assert_eq!(reversals.len(), originals.len());
    for original in &originals {
        let reversal = reversals
            .iter()
            .find(|r| r.reverses == Some(original.id))
            .expect("every original gets exactly one reversal");
        assert_eq!(reversal.side, original.side.flipped());
        assert_eq!(reversal.amount, original.amount);
        assert_eq!(reversal.account_code, original.account_code);
        assert_eq!(reversal.entry_date, Utc::now().date_naive());
    }
}

#[tokio::test]
async fn test_void_leaves_originals_untouched() {
    let h = setup().await;
    let posted = posted_invoice(&h).await;
    let before = h.store.entries_for_document(posted.id).await.unwrap();
    let originals_before: Vec<_> = before.iter().filter(|e| !e.is_reversal).cloned().collect();

    h.voiding
        .void(posted.id, h.user, "duplicate entry")
        .await
        .unwrap();

    let after = h.store.entries_for_document(posted.id).await.unwrap();
    let originals_after: Vec<_> = after.iter().filter(|e| !e.is_reversal).cloned().collect();

    assert_eq!(originals_before, originals_after);
}

#[tokio::test]
async fn test_void_draft_rejected() {
    let h = setup().await;
    let doc = Document::draft(
        h.company.id,
        DocumentKind::Invoice,
        doc_date(),
        Currency::USD,
        h.user,
    )
    .with_line(LineItem::debit("1100", usd(dec!(100))))
    .with_line(LineItem::credit("4000", usd(dec!(100))));
    h.store.insert_document(&doc).await.unwrap();

    let result = h.voiding.void(doc.id, h.user, "mistake").await;

    match result {
        Err(LedgerError::InvalidStateTransition { current, requested }) => {
            assert_eq!(current, DocumentStatus::Draft);
            assert_eq!(requested, DocumentStatus::Voided);
        }
        other => panic!("expected InvalidStateTransition, got {other:?}"),
    }
    assert_eq!(h.store.entry_count(), 0);
}

#[tokio::test]
async fn test_double_void_rejected() {
    let h = setup().await;
    let posted = posted_invoice(&h).await;

    h.voiding.void(posted.id, h.user, "first").await.unwrap();
    let count_after_void = h.store.entry_count();

    let result = h.voiding.void(posted.id, h.user, "second").await;

    assert!(matches!(
        result,
        Err(LedgerError::InvalidStateTransition {
            current: DocumentStatus::Voided,
            ..
        })
    ));
    assert_eq!(h.store.entry_count(), count_after_void);
}

#[tokio::test]
async fn test_empty_reason_rejected() {
    let h = setup().await;
    let posted = posted_invoice(&h).await;

    let result = h.voiding.void(posted.id, h.user, "   ").await;

    assert!(matches!(result, Err(LedgerError::EmptyVoidReason)));

    let stored = h.store.fetch_document(posted.id).await.unwrap();
    assert_eq!(stored.status, DocumentStatus::Posted);
    assert_eq!(h.store.entry_count(), 2);
}

#[tokio::test]
async fn test_void_without_permission() {
    let h = setup().await;
    let posted = posted_invoice(&h).await;

    let authorizer = StaticAuthorizer::new().grant(h.user, "invoice:post");
    let voiding = VoidEngine::new(h.store.clone(), Arc::new(authorizer));

    let result = voiding.void(posted.id, h.user, "nope").await;

    match result {
        Err(LedgerError::Forbidden { permission, .. }) => {
            assert_eq!(permission, "invoice:void");
        }
        other => panic!("expected Forbidden, got {other:?}"),
    }
    assert_eq!(h.store.entry_count(), 2);
}

#[tokio::test]
async fn test_ledger_is_append_only_across_lifecycle() {
    let h = setup().await;
    let posted = posted_invoice(&h).await;
    assert_eq!(h.store.entry_count(), 2);

    h.voiding.void(posted.id, h.user, "cancel").await.unwrap();
    assert_eq!(h.store.entry_count(), 4);

    // Rejected operations never shrink or grow the ledger
    let _ = h.voiding.void(posted.id, h.user, "again").await;
    let _ = h.posting.post(posted.id, h.user).await;
    assert_eq!(h.store.entry_count(), 4);
}
