//! Report handlers

use axum::{
    extract::{Query, State},
    Extension, Json,
};

use core_kernel::CompanyId;
use domain_ledger::{BalanceSheet, IncomeStatement};

use crate::auth::{permissions, Claims};
use crate::dto::reports::{BalanceSheetQuery, IncomeStatementQuery};
use crate::error::ApiError;
use crate::AppState;

async fn require_report_access(state: &AppState, claims: &Claims) -> Result<(), ApiError> {
    let user = claims.user_id().map_err(|_| ApiError::Unauthorized)?;
    let allowed = state
        .authorizer
        .allows(user, permissions::REPORT_READ)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    if !allowed {
        return Err(ApiError::Forbidden(format!(
            "user {user} lacks permission {}",
            permissions::REPORT_READ
        )));
    }
    Ok(())
}

/// Balance sheet at a date
pub async fn balance_sheet(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<BalanceSheetQuery>,
) -> Result<Json<BalanceSheet>, ApiError> {
    require_report_access(&state, &claims).await?;

    let sheet = state
        .reports
        .balance_sheet(CompanyId::from(query.company_id), query.as_of_date)
        .await?;
    Ok(Json(sheet))
}

/// Income statement over a date range
pub async fn income_statement(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<IncomeStatementQuery>,
) -> Result<Json<IncomeStatement>, ApiError> {
    require_report_access(&state, &claims).await?;

    if query.end_date < query.start_date {
        return Err(ApiError::Validation(
            "end_date must not precede start_date".to_string(),
        ));
    }

    let statement = state
        .reports
        .income_statement(
            CompanyId::from(query.company_id),
            query.start_date,
            query.end_date,
        )
        .await?;
    Ok(Json(statement))
}
