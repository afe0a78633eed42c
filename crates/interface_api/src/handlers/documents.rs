//! Document handlers
//!
//! Invoices and journals share the same lifecycle; the route pairs differ
//! only in the document kind they accept.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use validator::Validate;

use core_kernel::{CompanyId, DocumentId, UserId};
use domain_ledger::{Document, DocumentKind};

use crate::auth::Claims;
use crate::dto::documents::{CreateDocumentRequest, DocumentResponse, VoidRequest};
use crate::error::ApiError;
use crate::AppState;

fn acting_user(claims: &Claims) -> Result<UserId, ApiError> {
    claims.user_id().map_err(|_| ApiError::Unauthorized)
}

fn parse_document_id(kind: DocumentKind, id: &str) -> Result<DocumentId, ApiError> {
    id.parse()
        .map_err(|_| ApiError::NotFound(format!("{kind} {id} not found")))
}

async fn create_document(
    state: AppState,
    claims: Claims,
    kind: DocumentKind,
    payload: CreateDocumentRequest,
) -> Result<(StatusCode, Json<DocumentResponse>), ApiError> {
    payload.validate()?;
    let user = acting_user(&claims)?;

    let company_id = CompanyId::from(payload.company_id);
    let company = state.store.fetch_company(company_id).await?;
    if payload.currency != company.currency {
        return Err(ApiError::Validation(format!(
            "document currency {} does not match company currency {}",
            payload.currency, company.currency
        )));
    }

    let mut document = Document::draft(
        company_id,
        kind,
        payload.document_date,
        payload.currency,
        user,
    );
    if let Some(party) = payload.counterparty_id {
        document.counterparty_id = Some(party.into());
    }
    for line in payload.lines {
        document.push_line(line.into_line(company.currency)?);
    }

    state.store.insert_document(&document).await?;

    Ok((StatusCode::CREATED, Json(document.into())))
}

async fn get_document(
    state: AppState,
    kind: DocumentKind,
    id: String,
) -> Result<Json<DocumentResponse>, ApiError> {
    let document_id = parse_document_id(kind, &id)?;
    let document = state.store.fetch_document(document_id).await?;
    if document.kind != kind {
        return Err(ApiError::NotFound(format!("{kind} {id} not found")));
    }
    Ok(Json(document.into()))
}

async fn update_document(
    state: AppState,
    claims: Claims,
    kind: DocumentKind,
    id: String,
    payload: CreateDocumentRequest,
) -> Result<Json<DocumentResponse>, ApiError> {
    payload.validate()?;
    acting_user(&claims)?;
    let document_id = parse_document_id(kind, &id)?;

    let mut document = state.store.fetch_document(document_id).await?;
    if document.kind != kind {
        return Err(ApiError::NotFound(format!("{kind} {id} not found")));
    }
    if document.status != domain_ledger::DocumentStatus::Draft {
        return Err(ApiError::BadRequest(format!(
            "document is {}, drafts only",
            document.status
        )));
    }

    let company = state.store.fetch_company(document.company_id).await?;
    if payload.currency != company.currency {
        return Err(ApiError::Validation(format!(
            "document currency {} does not match company currency {}",
            payload.currency, company.currency
        )));
    }

    document.document_date = payload.document_date;
    document.counterparty_id = payload.counterparty_id.map(Into::into);
    document.lines.clear();
    for line in payload.lines {
        document.push_line(line.into_line(company.currency)?);
    }
    document.total = document.debit_total();

    state.store.update_draft(&document).await?;

    Ok(Json(document.into()))
}

async fn post_document(
    state: AppState,
    claims: Claims,
    kind: DocumentKind,
    id: String,
) -> Result<Json<DocumentResponse>, ApiError> {
    let user = acting_user(&claims)?;
    let document_id = parse_document_id(kind, &id)?;

    let document = state.store.fetch_document(document_id).await?;
    if document.kind != kind {
        return Err(ApiError::NotFound(format!("{kind} {id} not found")));
    }

    let posted = state.posting.post(document_id, user).await?;
    Ok(Json(posted.into()))
}

async fn void_document(
    state: AppState,
    claims: Claims,
    kind: DocumentKind,
    id: String,
    payload: VoidRequest,
) -> Result<Json<DocumentResponse>, ApiError> {
    payload.validate()?;
    let user = acting_user(&claims)?;
    let document_id = parse_document_id(kind, &id)?;

    let document = state.store.fetch_document(document_id).await?;
    if document.kind != kind {
        return Err(ApiError::NotFound(format!("{kind} {id} not found")));
    }

    let voided = state.voiding.void(document_id, user, &payload.reason).await?;
    Ok(Json(voided.into()))
}

// Invoice routes

pub async fn create_invoice(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateDocumentRequest>,
) -> Result<(StatusCode, Json<DocumentResponse>), ApiError> {
    create_document(state, claims, DocumentKind::Invoice, payload).await
}

pub async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DocumentResponse>, ApiError> {
    get_document(state, DocumentKind::Invoice, id).await
}

pub async fn update_invoice(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    Json(payload): Json<CreateDocumentRequest>,
) -> Result<Json<DocumentResponse>, ApiError> {
    update_document(state, claims, DocumentKind::Invoice, id, payload).await
}

pub async fn post_invoice(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<Json<DocumentResponse>, ApiError> {
    post_document(state, claims, DocumentKind::Invoice, id).await
}

pub async fn void_invoice(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    Json(payload): Json<VoidRequest>,
) -> Result<Json<DocumentResponse>, ApiError> {
    void_document(state, claims, DocumentKind::Invoice, id, payload).await
}

// Journal routes

pub async fn create_journal(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateDocumentRequest>,
) -> Result<(StatusCode, Json<DocumentResponse>), ApiError> {
    create_document(state, claims, DocumentKind::Journal, payload).await
}

pub async fn get_journal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DocumentResponse>, ApiError> {
    get_document(state, DocumentKind::Journal, id).await
}

pub async fn update_journal(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    Json(payload): Json<CreateDocumentRequest>,
) -> Result<Json<DocumentResponse>, ApiError> {
    update_document(state, claims, DocumentKind::Journal, id, payload).await
}

pub async fn post_journal(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<Json<DocumentResponse>, ApiError> {
    post_document(state, claims, DocumentKind::Journal, id).await
}

pub async fn void_journal(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    Json(payload): Json<VoidRequest>,
) -> Result<Json<DocumentResponse>, ApiError> {
    void_document(state, claims, DocumentKind::Journal, id, payload).await
}
