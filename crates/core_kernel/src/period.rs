//! Reporting periods
//!
//! A [`ReportingPeriod`] is the date window a balance query runs over: either
//! everything through an as-of date, or a bounded start/end range. Period
//! boundaries are inclusive calendar dates; the ledger has no intraday
//! reporting granularity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors constructing a reporting period
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PeriodError {
    #[error("Period end {end} is before start {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
}

/// An inclusive date window over the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingPeriod {
    /// Inclusive lower bound; None means unbounded (since inception)
    pub start: Option<NaiveDate>,
    /// Inclusive upper bound
    pub end: NaiveDate,
}

impl ReportingPeriod {
    /// Everything dated on or before `end`
    pub fn as_of(end: NaiveDate) -> Self {
        Self { start: None, end }
    }

    /// A bounded range, both ends inclusive
    pub fn between(start: NaiveDate, end: NaiveDate) -> Result<Self, PeriodError> {
        if end < start {
            return Err(PeriodError::EndBeforeStart { start, end });
        }
        Ok(Self {
            start: Some(start),
            end,
        })
    }

    /// Returns true if the date falls inside the window
    pub fn contains(&self, date: NaiveDate) -> bool {
        if let Some(start) = self.start {
            if date < start {
                return false;
            }
        }
        date <= self.end
    }
}

impl fmt::Display for ReportingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.start {
            Some(start) => write!(f, "{start}..={}", self.end),
            None => write!(f, "..={}", self.end),
        }
    }
}
