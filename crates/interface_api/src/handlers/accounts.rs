//! Chart-of-accounts and posting-rule handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use validator::Validate;

use core_kernel::CompanyId;
use domain_ledger::{ChartOfAccount, PostingRule};

use crate::auth::{permissions, Claims};
use crate::dto::accounts::{AccountResponse, ChartQuery, CreateAccountRequest, UpsertRuleRequest};
use crate::error::ApiError;
use crate::AppState;

async fn require_account_access(state: &AppState, claims: &Claims) -> Result<(), ApiError> {
    let user = claims.user_id().map_err(|_| ApiError::Unauthorized)?;
    let allowed = state
        .authorizer
        .allows(user, permissions::ACCOUNT_MANAGE)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    if !allowed {
        return Err(ApiError::Forbidden(format!(
            "user {user} lacks permission {}",
            permissions::ACCOUNT_MANAGE
        )));
    }
    Ok(())
}

/// Creates a chart-of-accounts entry
pub async fn create_account(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateAccountRequest>,
) -> Result<(StatusCode, Json<AccountResponse>), ApiError> {
    payload.validate()?;
    require_account_access(&state, &claims).await?;

    let company_id = CompanyId::from(payload.company_id);
    state.store.fetch_company(company_id).await?;

    let account = ChartOfAccount::new(company_id, payload.code, payload.name, payload.account_type);
    state.store.insert_account(&account).await?;

    Ok((StatusCode::CREATED, Json(account.into())))
}

/// Lists a company's chart of accounts
pub async fn list_accounts(
    State(state): State<AppState>,
    Query(query): Query<ChartQuery>,
) -> Result<Json<Vec<AccountResponse>>, ApiError> {
    let chart = state
        .store
        .fetch_chart(CompanyId::from(query.company_id))
        .await?;
    Ok(Json(chart.into_iter().map(AccountResponse::from).collect()))
}

/// Creates or replaces a posting rule
pub async fn upsert_rule(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<UpsertRuleRequest>,
) -> Result<StatusCode, ApiError> {
    payload.validate()?;
    require_account_access(&state, &claims).await?;

    let company_id = CompanyId::from(payload.company_id);
    state.store.fetch_company(company_id).await?;

    state
        .store
        .upsert_rule(
            company_id,
            PostingRule {
                document_kind: payload.document_kind,
                role: payload.role,
                account_code: payload.account_code.into(),
            },
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
