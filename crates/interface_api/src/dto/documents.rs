//! Document DTOs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use core_kernel::{Currency, Money};
use domain_ledger::{Document, EntrySide, LineAccount, LineItem, PostingRole};

use crate::error::ApiError;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateDocumentRequest {
    pub company_id: Uuid,
    pub document_date: NaiveDate,
    pub currency: Currency,
    pub counterparty_id: Option<Uuid>,
    #[validate(nested)]
    pub lines: Vec<LineItemRequest>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LineItemRequest {
    /// Explicit account code (journals)
    pub account_code: Option<String>,
    /// Posting role resolved through the company's rules (invoices)
    pub role: Option<PostingRole>,
    pub side: EntrySide,
    pub amount: Decimal,
    #[validate(length(max = 500))]
    pub description: Option<String>,
}

impl LineItemRequest {
    /// Converts the request line into a domain line item
    pub fn into_line(self, currency: Currency) -> Result<LineItem, ApiError> {
        let account = match (self.account_code, self.role) {
            (Some(code), None) => LineAccount::Code(code.into()),
            (None, Some(role)) => LineAccount::Role(role),
            _ => {
                return Err(ApiError::Validation(
                    "line must name exactly one of account_code or role".to_string(),
                ))
            }
        };
        Ok(LineItem {
            id: Uuid::new_v4(),
            account,
            side: self.side,
            amount: Money::new(self.amount, currency),
            description: self.description,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct VoidRequest {
    #[validate(length(min = 1, message = "void reason must not be empty"))]
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct LineItemResponse {
    pub id: Uuid,
    pub account_code: Option<String>,
    pub role: Option<PostingRole>,
    pub side: EntrySide,
    pub amount: Decimal,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    pub id: String,
    pub company_id: String,
    pub kind: String,
    pub status: String,
    pub document_date: NaiveDate,
    pub counterparty_id: Option<String>,
    pub currency: Currency,
    pub total: Decimal,
    pub lines: Vec<LineItemResponse>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub posted_by: Option<String>,
    pub posted_at: Option<DateTime<Utc>>,
    pub voided_by: Option<String>,
    pub voided_at: Option<DateTime<Utc>>,
    pub void_reason: Option<String>,
}

impl From<Document> for DocumentResponse {
    fn from(doc: Document) -> Self {
        Self {
            id: doc.id.to_string(),
            company_id: doc.company_id.to_string(),
            kind: doc.kind.as_str().to_string(),
            status: doc.status.as_str().to_string(),
            document_date: doc.document_date,
            counterparty_id: doc.counterparty_id.map(|p| p.to_string()),
            currency: doc.currency,
            total: doc.total.amount(),
            lines: doc
                .lines
                .into_iter()
                .map(|line| {
                    let (account_code, role) = match line.account {
                        LineAccount::Code(code) => (Some(code.to_string()), None),
                        LineAccount::Role(role) => (None, Some(role)),
                    };
                    LineItemResponse {
                        id: line.id,
                        account_code,
                        role,
                        side: line.side,
                        amount: line.amount.amount(),
                        description: line.description,
                    }
                })
                .collect(),
            created_by: doc.created_by.to_string(),
            created_at: doc.created_at,
            posted_by: doc.posted_by.map(|u| u.to_string()),
            posted_at: doc.posted_at,
            voided_by: doc.voided_by.map(|u| u.to_string()),
            voided_at: doc.voided_at,
            void_reason: doc.void_reason,
        }
    }
}
