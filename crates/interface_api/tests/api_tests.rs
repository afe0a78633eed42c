//! HTTP surface tests
//!
//! Runs the full router against the in-memory store and checks the status
//! mapping of the domain error taxonomy along with the happy paths.

use std::sync::Arc;

use axum_test::TestServer;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use core_kernel::{Currency, UserId};
use domain_ledger::{
    AccountType, ChartOfAccount, Company, DocumentKind, InMemoryLedgerStore, LedgerStore,
    PostingRole, PostingRule, StaticAuthorizer,
};
use interface_api::{auth, config::ApiConfig, create_router};

const JWT_SECRET: &str = "test-secret";

struct TestApp {
    server: TestServer,
    company: Company,
    token: String,
}

fn test_config() -> ApiConfig {
    ApiConfig {
        jwt_secret: JWT_SECRET.to_string(),
        ..Default::default()
    }
}

async fn seed_store(store: &Arc<InMemoryLedgerStore>) -> Company {
    let company = Company::new("Acme Trading", Currency::USD);
    store.insert_company(&company).await.unwrap();

    for (code, name, account_type) in [
        ("1000", "Cash", AccountType::Asset),
        ("1100", "Accounts Receivable", AccountType::Asset),
        ("2200", "Tax Payable", AccountType::Liability),
        ("4000", "Sales Revenue", AccountType::Revenue),
        ("5000", "Operating Expense", AccountType::Expense),
    ] {
        store
            .insert_account(&ChartOfAccount::new(company.id, code, name, account_type))
            .await
            .unwrap();
    }

    for (role, code) in [
        (PostingRole::Receivable, "1100"),
        (PostingRole::Revenue, "4000"),
        (PostingRole::Tax, "2200"),
    ] {
        store
            .upsert_rule(
                company.id,
                PostingRule {
                    document_kind: DocumentKind::Invoice,
                    role,
                    account_code: code.into(),
                },
            )
            .await
            .unwrap();
    }

    company
}

async fn spawn_app() -> TestApp {
    let store = Arc::new(InMemoryLedgerStore::new());
    let company = seed_store(&store).await;

    let app = create_router(
        store,
        Arc::new(StaticAuthorizer::allow_all()),
        test_config(),
    );

    let user = UserId::new();
    let token = auth::create_token(
        &user.to_string(),
        vec!["accountant".to_string()],
        JWT_SECRET,
        3600,
    )
    .unwrap();

    TestApp {
        server: TestServer::new(app).unwrap(),
        company,
        token,
    }
}

fn invoice_body(app: &TestApp) -> Value {
    json!({
        "company_id": app.company.id.as_uuid(),
        "document_date": "2026-01-15",
        "currency": "USD",
        "lines": [
            { "role": "receivable", "side": "debit", "amount": dec!(1100) },
            { "role": "revenue", "side": "credit", "amount": dec!(1000) },
            { "role": "tax", "side": "credit", "amount": dec!(100) }
        ]
    })
}

async fn create_invoice(app: &TestApp) -> Value {
    let response = app
        .server
        .post("/accounting/invoices")
        .authorization_bearer(&app.token)
        .json(&invoice_body(app))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}

#[tokio::test]
async fn test_requests_without_token_are_unauthorized() {
    let app = spawn_app().await;

    let response = app
        .server
        .post("/accounting/invoices")
        .json(&invoice_body(&app))
        .await;

    response.assert_status(axum::http::StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_invoice_lifecycle_over_http() {
    let app = spawn_app().await;

    let draft = create_invoice(&app).await;
    assert_eq!(draft["status"], "draft");
    let id = draft["id"].as_str().unwrap();

    let response = app
        .server
        .post(&format!("/accounting/invoices/{id}/post"))
        .authorization_bearer(&app.token)
        .await;
    response.assert_status_ok();
    let posted = response.json::<Value>();
    assert_eq!(posted["status"], "posted");
    assert!(posted["posted_at"].is_string());

    let response = app
        .server
        .post(&format!("/accounting/invoices/{id}/void"))
        .authorization_bearer(&app.token)
        .json(&json!({ "reason": "customer cancelled" }))
        .await;
    response.assert_status_ok();
    let voided = response.json::<Value>();
    assert_eq!(voided["status"], "voided");
    assert_eq!(voided["void_reason"], "customer cancelled");
}

#[tokio::test]
async fn test_draft_can_be_edited_until_posted() {
    let app = spawn_app().await;
    let draft = create_invoice(&app).await;
    let id = draft["id"].as_str().unwrap();

    let mut body = invoice_body(&app);
    body["lines"] = json!([
        { "role": "receivable", "side": "debit", "amount": dec!(2200) },
        { "role": "revenue", "side": "credit", "amount": dec!(2000) },
        { "role": "tax", "side": "credit", "amount": dec!(200) }
    ]);

    let response = app
        .server
        .put(&format!("/accounting/invoices/{id}"))
        .authorization_bearer(&app.token)
        .json(&body)
        .await;
    response.assert_status_ok();
    let updated = response.json::<Value>();
    assert_eq!(updated["total"], "2200");

    app.server
        .post(&format!("/accounting/invoices/{id}/post"))
        .authorization_bearer(&app.token)
        .await
        .assert_status_ok();

    // Once posted the draft surface is gone
    let response = app
        .server
        .put(&format!("/accounting/invoices/{id}"))
        .authorization_bearer(&app.token)
        .json(&body)
        .await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reposting_maps_to_bad_request() {
    let app = spawn_app().await;
    let draft = create_invoice(&app).await;
    let id = draft["id"].as_str().unwrap();

    app.server
        .post(&format!("/accounting/invoices/{id}/post"))
        .authorization_bearer(&app.token)
        .await
        .assert_status_ok();

    let response = app
        .server
        .post(&format!("/accounting/invoices/{id}/post"))
        .authorization_bearer(&app.token)
        .await;

    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_unknown_document_maps_to_not_found() {
    let app = spawn_app().await;

    let response = app
        .server
        .post(&format!(
            "/accounting/invoices/{}/post",
            uuid::Uuid::new_v4()
        ))
        .authorization_bearer(&app.token)
        .await;

    response.assert_status(axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_journal_route_rejects_invoice_id() {
    let app = spawn_app().await;
    let draft = create_invoice(&app).await;
    let id = draft["id"].as_str().unwrap();

    let response = app
        .server
        .post(&format!("/accounting/journals/{id}/post"))
        .authorization_bearer(&app.token)
        .await;

    response.assert_status(axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_void_without_reason_maps_to_bad_request() {
    let app = spawn_app().await;
    let draft = create_invoice(&app).await;
    let id = draft["id"].as_str().unwrap();

    app.server
        .post(&format!("/accounting/invoices/{id}/post"))
        .authorization_bearer(&app.token)
        .await
        .assert_status_ok();

    let response = app
        .server
        .post(&format!("/accounting/invoices/{id}/void"))
        .authorization_bearer(&app.token)
        .json(&json!({ "reason": "" }))
        .await;

    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_forbidden_when_permission_missing() {
    let store = Arc::new(InMemoryLedgerStore::new());
    let company = seed_store(&store).await;

    // No grants at all: engines must fail closed with 403
    let app = create_router(store, Arc::new(StaticAuthorizer::new()), test_config());
    let server = TestServer::new(app).unwrap();

    let user = UserId::new();
    let token = auth::create_token(&user.to_string(), vec![], JWT_SECRET, 3600).unwrap();

    let draft = server
        .post("/accounting/journals")
        .authorization_bearer(&token)
        .json(&json!({
            "company_id": company.id.as_uuid(),
            "document_date": "2026-01-15",
            "currency": "USD",
            "lines": [
                { "account_code": "1000", "side": "debit", "amount": dec!(100) },
                { "account_code": "4000", "side": "credit", "amount": dec!(100) }
            ]
        }))
        .await;
    draft.assert_status(axum::http::StatusCode::CREATED);
    let id = draft.json::<Value>()["id"].as_str().unwrap().to_string();

    let response = server
        .post(&format!("/accounting/journals/{id}/post"))
        .authorization_bearer(&token)
        .await;

    response.assert_status(axum::http::StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_imbalanced_invoice_maps_to_bad_request() {
    let app = spawn_app().await;

    let draft = app
        .server
        .post("/accounting/invoices")
        .authorization_bearer(&app.token)
        .json(&json!({
            "company_id": app.company.id.as_uuid(),
            "document_date": "2026-01-15",
            "currency": "USD",
            "lines": [
                { "role": "receivable", "side": "debit", "amount": dec!(1000) },
                { "role": "revenue", "side": "credit", "amount": dec!(900) }
            ]
        }))
        .await;
    draft.assert_status(axum::http::StatusCode::CREATED);
    let id = draft.json::<Value>()["id"].as_str().unwrap().to_string();

    let response = app
        .server
        .post(&format!("/accounting/invoices/{id}/post"))
        .authorization_bearer(&app.token)
        .await;

    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert!(body["message"].as_str().unwrap().contains("100"));
}

#[tokio::test]
async fn test_reports_over_http() {
    let app = spawn_app().await;
    let draft = create_invoice(&app).await;
    let id = draft["id"].as_str().unwrap();

    app.server
        .post(&format!("/accounting/invoices/{id}/post"))
        .authorization_bearer(&app.token)
        .await
        .assert_status_ok();

    let response = app
        .server
        .get("/accounting/reports/balance-sheet")
        .authorization_bearer(&app.token)
        .add_query_param("company_id", app.company.id.as_uuid().to_string())
        .add_query_param("as_of_date", "2026-01-31")
        .await;
    response.assert_status_ok();
    let sheet = response.json::<Value>();
    assert_eq!(sheet["discrepancy"]["amount"], "0");
    assert_eq!(sheet["assets"]["total"]["amount"], "1100");

    let response = app
        .server
        .get("/accounting/reports/income-statement")
        .authorization_bearer(&app.token)
        .add_query_param("company_id", app.company.id.as_uuid().to_string())
        .add_query_param("start_date", "2026-01-01")
        .add_query_param("end_date", "2026-01-31")
        .await;
    response.assert_status_ok();
    let statement = response.json::<Value>();
    assert_eq!(statement["net_income"]["amount"], "1000");
}

#[tokio::test]
async fn test_income_statement_rejects_inverted_range() {
    let app = spawn_app().await;

    let response = app
        .server
        .get("/accounting/reports/income-statement")
        .authorization_bearer(&app.token)
        .add_query_param("company_id", app.company.id.as_uuid().to_string())
        .add_query_param("start_date", "2026-02-01")
        .add_query_param("end_date", "2026-01-01")
        .await;

    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_chart_setup_over_http() {
    let app = spawn_app().await;

    let response = app
        .server
        .post("/accounting/accounts")
        .authorization_bearer(&app.token)
        .json(&json!({
            "company_id": app.company.id.as_uuid(),
            "code": "3000",
            "name": "Share Capital",
            "account_type": "equity"
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    let account = response.json::<Value>();
    assert_eq!(account["normal_side"], "credit");

    let response = app
        .server
        .get("/accounting/accounts")
        .authorization_bearer(&app.token)
        .add_query_param("company_id", app.company.id.as_uuid().to_string())
        .await;
    response.assert_status_ok();
    let chart = response.json::<Value>();
    assert_eq!(chart.as_array().unwrap().len(), 6);
}
