//! Financial statements
//!
//! The balance sheet and income statement are assembled from period
//! balances. The balance sheet carries its own consistency check: the
//! accounting identity assets = liabilities + equity is recomputed and any
//! discrepancy is reported verbatim. A non-zero discrepancy means the
//! posting invariant was violated upstream; it is surfaced, never corrected.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::error;

use core_kernel::{CompanyId, Currency, Money, ReportingPeriod};

use crate::account::{AccountCode, AccountType, ChartOfAccount};
use crate::balance::{PeriodAggregator, PeriodBalances};
use crate::company::Company;
use crate::error::LedgerError;
use crate::store::LedgerStore;

/// One account's contribution to a report section
#[derive(Debug, Clone, Serialize)]
pub struct ReportLine {
    pub account_code: AccountCode,
    pub account_name: String,
    pub balance: Money,
}

/// A group of report lines with their total
#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub lines: Vec<ReportLine>,
    pub total: Money,
}

impl Section {
    fn build(
        chart: &[ChartOfAccount],
        balances: &PeriodBalances,
        account_type: AccountType,
        currency: Currency,
    ) -> Result<Self, LedgerError> {
        let mut lines = Vec::new();
        let mut total = Money::zero(currency);

        let mut accounts: Vec<&ChartOfAccount> = chart
            .iter()
            .filter(|a| a.account_type == account_type)
            .collect();
        accounts.sort_by(|a, b| a.code.cmp(&b.code));

        for account in accounts {
            let Some(balance) = balances.get(&account.code) else {
                continue;
            };
            if balance.is_zero() {
                continue;
            }
            total = total.checked_add(&balance)?;
            lines.push(ReportLine {
                account_code: account.code.clone(),
                account_name: account.name.clone(),
                balance,
            });
        }

        Ok(Section { lines, total })
    }
}

/// Statement of financial position at a date
#[derive(Debug, Clone, Serialize)]
pub struct BalanceSheet {
    pub company_id: CompanyId,
    pub as_of: NaiveDate,
    pub assets: Section,
    pub liabilities: Section,
    pub equity: Section,
    /// Revenue minus expense through the as-of date, presented inside equity
    /// in place of a period-end closing entry
    pub current_earnings: Money,
    /// assets - (liabilities + equity + current earnings); zero for every
    /// consistent ledger
    pub discrepancy: Money,
}

impl BalanceSheet {
    /// Equity including current earnings
    pub fn total_equity(&self) -> Money {
        self.equity.total + self.current_earnings
    }

    /// True when the accounting identity holds
    pub fn is_consistent(&self) -> bool {
        self.discrepancy.is_zero()
    }
}

/// Result of operations over a date range
#[derive(Debug, Clone, Serialize)]
pub struct IncomeStatement {
    pub company_id: CompanyId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub revenue: Section,
    pub expenses: Section,
    pub net_income: Money,
}

/// Assembles a balance sheet from a chart and period balances
pub fn build_balance_sheet(
    company: &Company,
    as_of: NaiveDate,
    chart: &[ChartOfAccount],
    balances: &PeriodBalances,
) -> Result<BalanceSheet, LedgerError> {
    let currency = company.currency;

    let assets = Section::build(chart, balances, AccountType::Asset, currency)?;
    let liabilities = Section::build(chart, balances, AccountType::Liability, currency)?;
    let equity = Section::build(chart, balances, AccountType::Equity, currency)?;
    let revenue = Section::build(chart, balances, AccountType::Revenue, currency)?;
    let expenses = Section::build(chart, balances, AccountType::Expense, currency)?;

    let current_earnings = revenue.total.checked_sub(&expenses.total)?;

    let claims = liabilities
        .total
        .checked_add(&equity.total)?
        .checked_add(&current_earnings)?;
    let discrepancy = assets.total.checked_sub(&claims)?;

    Ok(BalanceSheet {
        company_id: company.id,
        as_of,
        assets,
        liabilities,
        equity,
        current_earnings,
        discrepancy,
    })
}

/// Assembles an income statement from a chart and period balances
pub fn build_income_statement(
    company: &Company,
    start_date: NaiveDate,
    end_date: NaiveDate,
    chart: &[ChartOfAccount],
    balances: &PeriodBalances,
) -> Result<IncomeStatement, LedgerError> {
    let currency = company.currency;

    let revenue = Section::build(chart, balances, AccountType::Revenue, currency)?;
    let expenses = Section::build(chart, balances, AccountType::Expense, currency)?;
    let net_income = revenue.total.checked_sub(&expenses.total)?;

    Ok(IncomeStatement {
        company_id: company.id,
        start_date,
        end_date,
        revenue,
        expenses,
        net_income,
    })
}

/// Generates the two standard financial statements
pub struct ReportGenerator {
    store: Arc<dyn LedgerStore>,
    aggregator: PeriodAggregator,
}

impl ReportGenerator {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        let aggregator = PeriodAggregator::new(store.clone());
        Self { store, aggregator }
    }

    /// Balance sheet at a date
    pub async fn balance_sheet(
        &self,
        company_id: CompanyId,
        as_of: NaiveDate,
    ) -> Result<BalanceSheet, LedgerError> {
        let company = self.fetch_company(company_id).await?;
        let chart = self.store.fetch_chart(company_id).await?;
        let period = ReportingPeriod::as_of(as_of);
        let balances = self.aggregator.balances(company_id, period).await?;

        let sheet = build_balance_sheet(&company, as_of, &chart, &balances)?;
        if !sheet.is_consistent() {
            error!(
                company_id = %company_id,
                as_of = %as_of,
                discrepancy = %sheet.discrepancy,
                "balance sheet does not balance; ledger is inconsistent"
            );
        }
        Ok(sheet)
    }

    /// Income statement over a date range
    pub async fn income_statement(
        &self,
        company_id: CompanyId,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<IncomeStatement, LedgerError> {
        let company = self.fetch_company(company_id).await?;
        let chart = self.store.fetch_chart(company_id).await?;
        let period = ReportingPeriod::between(start_date, end_date)?;
        let balances = self.aggregator.balances(company_id, period).await?;

        build_income_statement(&company, start_date, end_date, &chart, &balances)
    }

    async fn fetch_company(&self, company_id: CompanyId) -> Result<Company, LedgerError> {
        self.store.fetch_company(company_id).await.map_err(|e| {
            if e.is_not_found() {
                LedgerError::CompanyNotFound(company_id.to_string())
            } else {
                LedgerError::Store(e)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balance::accumulate;
    use crate::document::DocumentKind;
    use crate::entry::{EntrySide, LedgerEntry};
    use core_kernel::{Currency, DocumentId};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn usd(amount: rust_decimal::Decimal) -> Money {
        Money::new(amount, Currency::USD)
    }

    fn fixture() -> (Company, Vec<ChartOfAccount>) {
        let company = Company::new("Acme Trading", Currency::USD);
        let chart = vec![
            ChartOfAccount::new(company.id, "1000", "Cash", AccountType::Asset),
            ChartOfAccount::new(
                company.id,
                "1100",
                "Accounts Receivable",
                AccountType::Asset,
            ),
            ChartOfAccount::new(company.id, "2200", "Tax Payable", AccountType::Liability),
            ChartOfAccount::new(company.id, "3000", "Share Capital", AccountType::Equity),
            ChartOfAccount::new(company.id, "4000", "Sales Revenue", AccountType::Revenue),
            ChartOfAccount::new(company.id, "5000", "Operating Expense", AccountType::Expense),
        ];
        (company, chart)
    }

    fn entry(
        company: &Company,
        code: &str,
        side: EntrySide,
        amount: Money,
        entry_date: NaiveDate,
    ) -> LedgerEntry {
        LedgerEntry::new(
            company.id,
            DocumentId::new(),
            DocumentKind::Journal,
            AccountCode::from(code),
            side,
            amount,
            entry_date,
        )
    }

    #[test]
    fn test_balance_sheet_identity_with_open_period() {
        let (company, chart) = fixture();
        let d = date(2026, 1, 15);

        // Sell on credit: AR 1100 / revenue 1000 + tax 100
        let entries = vec![
            entry(&company, "1100", EntrySide::Debit, usd(dec!(1100)), d),
            entry(&company, "4000", EntrySide::Credit, usd(dec!(1000)), d),
            entry(&company, "2200", EntrySide::Credit, usd(dec!(100)), d),
        ];

        let period = ReportingPeriod::as_of(date(2026, 1, 31));
        let balances = accumulate(&chart, &entries, period).unwrap();
        let sheet = build_balance_sheet(&company, period.end, &chart, &balances).unwrap();

        assert_eq!(sheet.assets.total.amount(), dec!(1100));
        assert_eq!(sheet.liabilities.total.amount(), dec!(100));
        assert_eq!(sheet.equity.total.amount(), dec!(0));
        assert_eq!(sheet.current_earnings.amount(), dec!(1000));
        assert!(sheet.is_consistent());
        assert_eq!(
            sheet.assets.total,
            sheet.liabilities.total + sheet.total_equity()
        );
    }

    #[test]
    fn test_balance_sheet_surfaces_discrepancy() {
        let (company, chart) = fixture();
        let d = date(2026, 1, 15);

        // A lone debit with no matching credit cannot come out of posting;
        // the sheet must report it, not hide it.
        let entries = vec![entry(&company, "1000", EntrySide::Debit, usd(dec!(500)), d)];

        let period = ReportingPeriod::as_of(date(2026, 1, 31));
        let balances = accumulate(&chart, &entries, period).unwrap();
        let sheet = build_balance_sheet(&company, period.end, &chart, &balances).unwrap();

        assert!(!sheet.is_consistent());
        assert_eq!(sheet.discrepancy.amount(), dec!(500));
    }

    #[test]
    fn test_income_statement_net_income() {
        let (company, chart) = fixture();
        let d = date(2026, 1, 15);

        let entries = vec![
            entry(&company, "1000", EntrySide::Debit, usd(dec!(1000)), d),
            entry(&company, "4000", EntrySide::Credit, usd(dec!(1000)), d),
            entry(&company, "5000", EntrySide::Debit, usd(dec!(300)), d),
            entry(&company, "1000", EntrySide::Credit, usd(dec!(300)), d),
        ];

        let period = ReportingPeriod::between(date(2026, 1, 1), date(2026, 1, 31)).unwrap();
        let balances = accumulate(&chart, &entries, period).unwrap();
        let statement = build_income_statement(
            &company,
            date(2026, 1, 1),
            date(2026, 1, 31),
            &chart,
            &balances,
        )
        .unwrap();

        assert_eq!(statement.revenue.total.amount(), dec!(1000));
        assert_eq!(statement.expenses.total.amount(), dec!(300));
        assert_eq!(statement.net_income.amount(), dec!(700));
    }

    #[test]
    fn test_sections_skip_idle_accounts() {
        let (company, chart) = fixture();
        let d = date(2026, 1, 15);

        let entries = vec![
            entry(&company, "1000", EntrySide::Debit, usd(dec!(100)), d),
            entry(&company, "3000", EntrySide::Credit, usd(dec!(100)), d),
        ];

        let period = ReportingPeriod::as_of(date(2026, 1, 31));
        let balances = accumulate(&chart, &entries, period).unwrap();
        let sheet = build_balance_sheet(&company, period.end, &chart, &balances).unwrap();

        // Only the cash line appears in assets; AR had no activity
        assert_eq!(sheet.assets.lines.len(), 1);
        assert_eq!(sheet.assets.lines[0].account_code, AccountCode::from("1000"));
    }
}
