//! Account CRUD routes.
//!
//! Handlers translate between HTTP and the accounts service: path/body
//! decoding on the way in, error-to-status mapping on the way out. Malformed
//! ids and bodies are rejected by the extractors before a handler runs.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::error;

use crate::services::account::{
    Account, AccountCreationRequest, AccountError, AccountUpdateRequest, StoreError,
};
use crate::state::AppState;

/// `GET /v1/api/accounts/:id` — fetch one live account.
pub async fn get_account(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Account>, StatusCode> {
    let account = state
        .accounts
        .get_account(id)
        .await
        .map_err(account_error_to_status)?;
    Ok(Json(account))
}

/// `POST /v1/api/accounts` — create a new account.
///
/// The service discards the store-assigned id, so the response is a bare ack
/// rather than the created resource.
pub async fn create_account(
    State(state): State<AppState>,
    Json(body): Json<AccountCreationRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), StatusCode> {
    state
        .accounts
        .create_account(&body)
        .await
        .map_err(account_error_to_status)?;
    Ok((StatusCode::CREATED, Json(serde_json::json!({ "ok": true }))))
}

/// `PATCH /v1/api/accounts/:id` — apply the present fields to one account.
pub async fn update_account(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<AccountUpdateRequest>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    state
        .accounts
        .update_account(id, &body)
        .await
        .map_err(account_error_to_status)?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

/// `DELETE /v1/api/accounts/:id` — soft-delete one account.
pub async fn delete_account(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    state
        .accounts
        .delete_account(id)
        .await
        .map_err(account_error_to_status)?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

pub(crate) fn account_error_to_status(err: AccountError) -> StatusCode {
    match err.store_cause() {
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        StoreError::MissingField(_) => StatusCode::BAD_REQUEST,
        StoreError::Database(_) => {
            error!(error = %err, "account store failure");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[cfg(test)]
#[path = "accounts_test.rs"]
mod tests;
