//! Chart-of-accounts and posting-rule DTOs

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use domain_ledger::{AccountType, ChartOfAccount, DocumentKind, EntrySide, PostingRole};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateAccountRequest {
    pub company_id: Uuid,
    #[validate(length(min = 1, max = 20))]
    pub code: String,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub account_type: AccountType,
}

#[derive(Debug, Deserialize)]
pub struct ChartQuery {
    pub company_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub id: String,
    pub company_id: String,
    pub code: String,
    pub name: String,
    pub account_type: AccountType,
    pub normal_side: EntrySide,
    pub is_active: bool,
}

impl From<ChartOfAccount> for AccountResponse {
    fn from(account: ChartOfAccount) -> Self {
        Self {
            id: account.id.to_string(),
            company_id: account.company_id.to_string(),
            code: account.code.to_string(),
            name: account.name,
            account_type: account.account_type,
            normal_side: account.normal_side,
            is_active: account.is_active,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpsertRuleRequest {
    pub company_id: Uuid,
    pub document_kind: DocumentKind,
    pub role: PostingRole,
    #[validate(length(min = 1, max = 20))]
    pub account_code: String,
}
