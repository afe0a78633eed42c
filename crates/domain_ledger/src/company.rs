//! Companies
//!
//! A company is the tenancy root: every account, document and ledger entry
//! belongs to exactly one company, and reports resolve their currency from
//! the company record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{CompanyId, Currency};

/// A tenant company
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    /// Unique identifier
    pub id: CompanyId,
    /// Display name
    pub name: String,
    /// Reporting currency; all the company's documents share it
    pub currency: Currency,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Company {
    /// Creates a new company
    pub fn new(name: impl Into<String>, currency: Currency) -> Self {
        Self {
            id: CompanyId::new(),
            name: name.into(),
            currency,
            created_at: Utc::now(),
        }
    }
}
