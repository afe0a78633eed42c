//! Random Test Data Generators
//!
//! Fake-data helpers for seeding and proptest strategies for generating
//! balanced documents. Generated documents are balanced by construction:
//! each strategy pairs every debit with a credit of the same amount.

use fake::faker::company::en::CompanyName;
use fake::Fake;
use proptest::prelude::*;
use rust_decimal::Decimal;

use core_kernel::{CompanyId, Currency, Money, UserId};
use domain_ledger::{Company, Document, DocumentKind, LineItem};

use crate::fixtures::DateFixtures;

/// A company with a fake name
pub fn random_company() -> Company {
    let name: String = CompanyName().fake();
    Company::new(name, Currency::USD)
}

/// Account codes in the standard test chart, see
/// [`crate::fixtures::ChartFixtures::standard_chart`]
pub const STANDARD_CODES: [&str; 6] = ["1000", "1100", "2200", "3000", "4000", "5000"];

/// Strategy for an amount in minor units, always positive
pub fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|minor| Money::from_minor(minor, Currency::USD).amount())
}

/// Strategy for a balanced pair of lines over the standard chart
pub fn balanced_pair_strategy() -> impl Strategy<Value = (LineItem, LineItem)> {
    (0usize..6, 0usize..6, amount_strategy()).prop_map(|(debit_idx, credit_idx, amount)| {
        let amount = Money::new(amount, Currency::USD);
        (
            LineItem::debit(STANDARD_CODES[debit_idx], amount),
            LineItem::credit(STANDARD_CODES[credit_idx], amount),
        )
    })
}

/// Strategy for a balanced draft journal with 1 to `max_pairs` line pairs
pub fn balanced_journal_strategy(
    company_id: CompanyId,
    max_pairs: usize,
) -> impl Strategy<Value = Document> {
    prop::collection::vec(balanced_pair_strategy(), 1..=max_pairs).prop_map(move |pairs| {
        let mut document = Document::draft(
            company_id,
            DocumentKind::Journal,
            DateFixtures::post_date(),
            Currency::USD,
            UserId::new(),
        );
        for (debit, credit) in pairs {
            document.push_line(debit);
            document.push_line(credit);
        }
        document
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn generated_journals_are_balanced(
            document in balanced_journal_strategy(CompanyId::new(), 5)
        ) {
            prop_assert!(document.is_balanced());
            prop_assert!(!document.lines.is_empty());
            prop_assert!(document.lines.len() % 2 == 0);
        }
    }

    #[test]
    fn test_random_company_has_name() {
        let company = random_company();
        assert!(!company.name.is_empty());
    }
}
