//! Period aggregation
//!
//! Account balances are never stored; they are recomputed on demand by
//! walking the ledger entries inside a reporting period. Because the ledger
//! is append-only and entries dated in the past never change, the result is
//! a pure function of (chart, entries, period): identical inputs always
//! produce identical balances. Reversal entries participate exactly like
//! originals; voiding simply adds offsetting rows.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::Serialize;

use core_kernel::{CompanyId, Money, ReportingPeriod};

use crate::account::{AccountCode, ChartOfAccount};
use crate::entry::LedgerEntry;
use crate::error::LedgerError;
use crate::store::LedgerStore;

/// Net balances per account over one reporting period
///
/// Balances are signed from the account's point of view: positive when the
/// account has accumulated on its normal side, negative otherwise. Accounts
/// with no entries in the period are absent.
#[derive(Debug, Clone, Serialize)]
pub struct PeriodBalances {
    pub period: ReportingPeriod,
    balances: BTreeMap<AccountCode, Money>,
}

impl PeriodBalances {
    /// The balance for an account, if it had activity in the period
    pub fn get(&self, code: &AccountCode) -> Option<Money> {
        self.balances.get(code).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AccountCode, &Money)> {
        self.balances.iter()
    }

    pub fn len(&self) -> usize {
        self.balances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }
}

/// Folds entries into per-account signed balances
///
/// An entry adds its amount when its side matches the account's normal side
/// and subtracts it otherwise. Entries outside the period are skipped;
/// entries against accounts missing from the chart fail the whole
/// aggregation rather than being silently dropped.
pub fn accumulate(
    chart: &[ChartOfAccount],
    entries: &[LedgerEntry],
    period: ReportingPeriod,
) -> Result<PeriodBalances, LedgerError> {
    let by_code: HashMap<&AccountCode, &ChartOfAccount> =
        chart.iter().map(|a| (&a.code, a)).collect();

    let mut balances: BTreeMap<AccountCode, Money> = BTreeMap::new();

    for entry in entries {
        if !period.contains(entry.entry_date) {
            continue;
        }

        let account = by_code
            .get(&entry.account_code)
            .ok_or_else(|| LedgerError::AccountNotFound(entry.account_code.clone()))?;

        let signed = if entry.side == account.normal_side {
            entry.amount
        } else {
            -entry.amount
        };

        match balances.get_mut(&entry.account_code) {
            Some(balance) => {
                *balance = balance.checked_add(&signed)?;
            }
            None => {
                balances.insert(entry.account_code.clone(), signed);
            }
        }
    }

    Ok(PeriodBalances { period, balances })
}

/// Read-only balance queries over the ledger
pub struct PeriodAggregator {
    store: Arc<dyn LedgerStore>,
}

impl PeriodAggregator {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    /// Computes per-account balances for a company over a period
    pub async fn balances(
        &self,
        company_id: CompanyId,
        period: ReportingPeriod,
    ) -> Result<PeriodBalances, LedgerError> {
        let chart = self.store.fetch_chart(company_id).await?;
        let entries = self.store.entries_in_period(company_id, period).await?;
        accumulate(&chart, &entries, period)
    }
}
