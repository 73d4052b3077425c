//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the account CRUD endpoints plus the listing/organization stubs under
//! `/v1/api`, with a permissive CORS layer in front. The stubs only report
//! status until real listing lands.

pub mod accounts;

use axum::Router;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};

use crate::state::AppState;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/v1/api/accounts", get(api_status).post(accounts::create_account))
        .route(
            "/v1/api/accounts/{id}",
            get(accounts::get_account)
                .patch(accounts::update_account)
                .delete(accounts::delete_account),
        )
        .route("/v1/api/organizations", get(api_status))
        .route("/v1/api/ping", get(api_status))
        .route("/healthz", get(healthz))
        .layer(cors)
        .with_state(state)
}

/// Placeholder for the listing and organization endpoints.
// TODO: replace with real account listing once pagination is settled.
async fn api_status() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "success" }))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
