//! Request and response DTOs

pub mod accounts;
pub mod documents;
pub mod reports;
