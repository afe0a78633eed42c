//! Chart of accounts
//!
//! Accounts are created by setup or import, rarely mutated, and never
//! deleted: historical entries reference them by code. Deactivation is the
//! only way to retire an account.

use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{AccountId, CompanyId};

use crate::entry::EntrySide;

/// An account code, unique within a company (e.g. "1100")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountCode(String);

impl AccountCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountCode {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

impl From<String> for AccountCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

/// Types of accounts in the chart of accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// Asset accounts (debit normal balance)
    Asset,
    /// Liability accounts (credit normal balance)
    Liability,
    /// Equity accounts (credit normal balance)
    Equity,
    /// Revenue accounts (credit normal balance)
    Revenue,
    /// Expense accounts (debit normal balance)
    Expense,
}

impl AccountType {
    /// The side on which balances of this type normally accumulate
    ///
    /// Assets and expenses grow on the debit side; liabilities, equity and
    /// revenue grow on the credit side.
    pub fn normal_side(&self) -> EntrySide {
        match self {
            AccountType::Asset | AccountType::Expense => EntrySide::Debit,
            AccountType::Liability | AccountType::Equity | AccountType::Revenue => {
                EntrySide::Credit
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Asset => "asset",
            AccountType::Liability => "liability",
            AccountType::Equity => "equity",
            AccountType::Revenue => "revenue",
            AccountType::Expense => "expense",
        }
    }
}

/// An account in the chart of accounts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartOfAccount {
    /// Unique identifier
    pub id: AccountId,
    /// Owning company
    pub company_id: CompanyId,
    /// Account code, unique within the company
    pub code: AccountCode,
    /// Account name
    pub name: String,
    /// Account type
    pub account_type: AccountType,
    /// Normal balance side, defaulted from the type
    pub normal_side: EntrySide,
    /// Whether the account accepts new postings
    pub is_active: bool,
}

impl ChartOfAccount {
    /// Creates a new active account with the normal side implied by its type
    pub fn new(
        company_id: CompanyId,
        code: impl Into<AccountCode>,
        name: impl Into<String>,
        account_type: AccountType,
    ) -> Self {
        Self {
            id: AccountId::new(),
            company_id,
            code: code.into(),
            name: name.into(),
            account_type,
            normal_side: account_type.normal_side(),
            is_active: true,
        }
    }

    /// Marks the account as no longer accepting postings
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }
}
