//! Custom Test Assertions
//!
//! Specialized assertion helpers for ledger types with more meaningful
//! failure messages than the standard macros.

use rust_decimal::Decimal;

use core_kernel::Money;
use domain_ledger::{EntrySide, LedgerEntry};

/// Asserts that two Money values are exactly equal
pub fn assert_money_eq(actual: &Money, expected: &Money) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );
    assert_eq!(
        actual.amount(),
        expected.amount(),
        "Money amounts differ: actual={}, expected={}",
        actual.amount(),
        expected.amount()
    );
}

/// Asserts that a set of entries balances: sum(debits) == sum(credits)
pub fn assert_balanced_entries(entries: &[LedgerEntry]) {
    let debits: Decimal = entries
        .iter()
        .filter(|e| e.side == EntrySide::Debit)
        .map(|e| e.amount.amount())
        .sum();
    let credits: Decimal = entries
        .iter()
        .filter(|e| e.side == EntrySide::Credit)
        .map(|e| e.amount.amount())
        .sum();

    assert_eq!(
        debits, credits,
        "Entries do not balance: debits={debits}, credits={credits}"
    );
}

/// Asserts that `reversal` exactly compensates `original`
pub fn assert_reversal_mirrors(original: &LedgerEntry, reversal: &LedgerEntry) {
    assert!(
        reversal.is_reversal,
        "Entry {} is not flagged as a reversal",
        reversal.id
    );
    assert_eq!(
        reversal.reverses,
        Some(original.id),
        "Reversal {} does not reference original {}",
        reversal.id,
        original.id
    );
    assert_eq!(
        reversal.side,
        original.side.flipped(),
        "Reversal side {} does not flip original side {}",
        reversal.side,
        original.side
    );
    assert_money_eq(&reversal.amount, &original.amount);
    assert_eq!(
        reversal.account_code, original.account_code,
        "Reversal posts to a different account than the original"
    );
}
