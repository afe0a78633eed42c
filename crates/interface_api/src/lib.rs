//! HTTP API Layer
//!
//! REST API for the ledger system using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: request handlers for documents, reports, and chart setup
//! - **Middleware**: JWT authentication and audit logging
//! - **DTOs**: request/response data transfer objects with validation
//! - **Error Handling**: consistent JSON error responses with the domain
//!   taxonomy mapped onto HTTP status codes
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, config::ApiConfig};
//!
//! let app = create_router(store, authorizer, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_ledger::{Authorizer, LedgerStore, PostingEngine, ReportGenerator, VoidEngine};

use crate::config::ApiConfig;
use crate::handlers::{accounts, documents, health, reports};
use crate::middleware::{audit_middleware, auth_middleware};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub store: Arc<dyn LedgerStore>,
    pub authorizer: Arc<dyn Authorizer>,
    pub posting: Arc<PostingEngine>,
    pub voiding: Arc<VoidEngine>,
    pub reports: Arc<ReportGenerator>,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `store` - Ledger store implementation (PostgreSQL in production)
/// * `authorizer` - Authorization collaborator, typically cache-wrapped
/// * `config` - API configuration
pub fn create_router(
    store: Arc<dyn LedgerStore>,
    authorizer: Arc<dyn Authorizer>,
    config: ApiConfig,
) -> Router {
    let state = AppState {
        config,
        posting: Arc::new(PostingEngine::new(store.clone(), authorizer.clone())),
        voiding: Arc::new(VoidEngine::new(store.clone(), authorizer.clone())),
        reports: Arc::new(ReportGenerator::new(store.clone())),
        store,
        authorizer,
    };

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let invoice_routes = Router::new()
        .route("/", post(documents::create_invoice))
        .route("/:id", get(documents::get_invoice))
        .route("/:id", put(documents::update_invoice))
        .route("/:id/post", post(documents::post_invoice))
        .route("/:id/void", post(documents::void_invoice));

    let journal_routes = Router::new()
        .route("/", post(documents::create_journal))
        .route("/:id", get(documents::get_journal))
        .route("/:id", put(documents::update_journal))
        .route("/:id/post", post(documents::post_journal))
        .route("/:id/void", post(documents::void_journal));

    let report_routes = Router::new()
        .route("/balance-sheet", get(reports::balance_sheet))
        .route("/income-statement", get(reports::income_statement));

    let account_routes = Router::new()
        .route("/", post(accounts::create_account))
        .route("/", get(accounts::list_accounts));

    let accounting_routes = Router::new()
        .nest("/invoices", invoice_routes)
        .nest("/journals", journal_routes)
        .nest("/reports", report_routes)
        .nest("/accounts", account_routes)
        .route("/rules", post(accounts::upsert_rule))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            audit_middleware,
        ))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .nest("/accounting", accounting_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
