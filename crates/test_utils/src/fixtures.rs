//! Pre-built Test Fixtures
//!
//! Ready-to-use test data for common ledger entities. Fixtures are
//! consistent and predictable so unit tests can assert exact values.

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use core_kernel::{CompanyId, Currency, Money};
use domain_ledger::{
    AccountType, ChartOfAccount, Company, DocumentKind, PostingRole, PostingRule, PostingRules,
};

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// A standard USD amount
    pub fn usd_100() -> Money {
        Money::new(dec!(100.00), Currency::USD)
    }

    /// A round invoice total
    pub fn usd_1000() -> Money {
        Money::new(dec!(1000.00), Currency::USD)
    }

    /// A zero amount
    pub fn usd_zero() -> Money {
        Money::zero(Currency::USD)
    }

    /// A EUR amount for currency mismatch tests
    pub fn eur_100() -> Money {
        Money::new(dec!(100.00), Currency::EUR)
    }
}

/// Fixture for dates
pub struct DateFixtures;

impl DateFixtures {
    /// Standard posting date (Jan 15, 2026)
    pub fn post_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
    }

    /// Standard void date, after the posting date (Feb 1, 2026)
    pub fn void_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()
    }

    /// Period end covering the posting date (Jan 31, 2026)
    pub fn period_end() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 31).unwrap()
    }
}

/// Fixture for companies and their chart of accounts
pub struct ChartFixtures;

impl ChartFixtures {
    /// A USD test company
    pub fn company() -> Company {
        Company::new("Acme Trading", Currency::USD)
    }

    /// A small but complete chart: one account of every type plus cash
    pub fn standard_chart(company_id: CompanyId) -> Vec<ChartOfAccount> {
        vec![
            ChartOfAccount::new(company_id, "1000", "Cash", AccountType::Asset),
            ChartOfAccount::new(
                company_id,
                "1100",
                "Accounts Receivable",
                AccountType::Asset,
            ),
            ChartOfAccount::new(company_id, "2200", "Tax Payable", AccountType::Liability),
            ChartOfAccount::new(company_id, "3000", "Share Capital", AccountType::Equity),
            ChartOfAccount::new(company_id, "4000", "Sales Revenue", AccountType::Revenue),
            ChartOfAccount::new(company_id, "5000", "Operating Expense", AccountType::Expense),
        ]
    }

    /// Invoice posting rules matching [`ChartFixtures::standard_chart`]
    pub fn invoice_rules() -> PostingRules {
        PostingRules::new(vec![
            PostingRule {
                document_kind: DocumentKind::Invoice,
                role: PostingRole::Receivable,
                account_code: "1100".into(),
            },
            PostingRule {
                document_kind: DocumentKind::Invoice,
                role: PostingRole::Revenue,
                account_code: "4000".into(),
            },
            PostingRule {
                document_kind: DocumentKind::Invoice,
                role: PostingRole::Tax,
                account_code: "2200".into(),
            },
        ])
    }
}
