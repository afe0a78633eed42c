//! Report query parameters
//!
//! Report responses serialize the domain report types directly; only the
//! query shapes live here.

use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct BalanceSheetQuery {
    pub company_id: Uuid,
    pub as_of_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct IncomeStatementQuery {
    pub company_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}
