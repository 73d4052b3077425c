//! Account service — the public contract for the account lifecycle.
//!
//! DESIGN
//! ======
//! `AccountsService` is a thin orchestration layer over the [`AccountStore`]
//! trait: it contextualizes retrieval failures with the target id and passes
//! every other store error through unmodified. It performs no field
//! validation of its own (string lengths, category membership, balance
//! sign) — that is a documented limitation of this layer, not an oversight.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::info;

// =============================================================================
// TYPES
// =============================================================================

/// A financial account owned by an organization. Mirrors the `accounts` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub account_type: String,
    /// Empty string when the stored `subtype` column is NULL. The collapse is
    /// one-way: reads never distinguish absent from empty.
    pub account_sub_type: String,
    pub org_id: i64,
    pub current_balance: f64,
    pub is_deleted: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_ts: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_ts: OffsetDateTime,
}

/// Body of `POST /v1/api/accounts`. Absent fields fall back to store
/// defaults; `org_id` is required and validated by the store.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountCreationRequest {
    pub name: Option<String>,
    pub account_type: Option<String>,
    pub account_sub_type: Option<String>,
    pub org_id: Option<i64>,
    pub current_balance: Option<f64>,
}

/// Body of `PATCH /v1/api/accounts/{id}`. Only present fields are written;
/// absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountUpdateRequest {
    pub name: Option<String>,
    pub account_type: Option<String>,
    pub account_sub_type: Option<String>,
    pub org_id: Option<i64>,
    pub current_balance: Option<f64>,
}

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No live row matched the target id — the select returned nothing, or
    /// the update/delete affected zero rows.
    #[error("non-existent account with id {0}")]
    NotFound(i64),
    /// A field the statement cannot be built without was absent.
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("failed to retrieve account of id {id} with err:{source}")]
    Retrieve { id: i64, source: StoreError },
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AccountError {
    /// The underlying store failure, for status-code mapping.
    #[must_use]
    pub fn store_cause(&self) -> &StoreError {
        match self {
            Self::Retrieve { source, .. } => source,
            Self::Store(source) => source,
        }
    }
}

// =============================================================================
// STORE TRAIT
// =============================================================================

/// Persistence seam for accounts. Enables mocking in tests.
///
/// Implementations must treat soft-deleted rows as nonexistent in every
/// operation.
#[async_trait::async_trait]
pub trait AccountStore: Send + Sync {
    /// Fetch one live account by id.
    async fn get_account(&self, id: i64) -> Result<Account, StoreError>;

    /// Insert a new account and return the store-assigned id.
    async fn insert_account(&self, request: &AccountCreationRequest) -> Result<i64, StoreError>;

    /// Apply the present fields of `request` to one live account.
    async fn update_account(&self, id: i64, request: &AccountUpdateRequest) -> Result<(), StoreError>;

    /// Flip the soft-delete flag on one live account.
    async fn delete_account(&self, id: i64) -> Result<(), StoreError>;
}

// =============================================================================
// SERVICE
// =============================================================================

/// Orchestration layer over the account store. Cheap to clone; handlers get
/// it through `AppState`.
#[derive(Clone)]
pub struct AccountsService {
    store: Arc<dyn AccountStore>,
}

impl AccountsService {
    #[must_use]
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    /// Fetch one live account.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Retrieve`] wrapping the store failure together
    /// with the requested id.
    pub async fn get_account(&self, id: i64) -> Result<Account, AccountError> {
        self.store
            .get_account(id)
            .await
            .map_err(|source| AccountError::Retrieve { id, source })
    }

    /// Create a new account. The store-assigned id is logged and then
    /// discarded — this layer deliberately returns nothing on success.
    ///
    /// # Errors
    ///
    /// Propagates store errors unmodified.
    pub async fn create_account(&self, request: &AccountCreationRequest) -> Result<(), AccountError> {
        let id = self.store.insert_account(request).await?;
        info!(id, org_id = ?request.org_id, "created account");
        Ok(())
    }

    /// Apply a partial update to one live account.
    ///
    /// # Errors
    ///
    /// Propagates store errors unmodified.
    pub async fn update_account(&self, id: i64, request: &AccountUpdateRequest) -> Result<(), AccountError> {
        self.store.update_account(id, request).await?;
        info!(id, "updated account");
        Ok(())
    }

    /// Soft-delete one live account.
    ///
    /// # Errors
    ///
    /// Propagates store errors unmodified.
    pub async fn delete_account(&self, id: i64) -> Result<(), AccountError> {
        self.store.delete_account(id).await?;
        info!(id, "soft-deleted account");
        Ok(())
    }
}

#[cfg(test)]
#[path = "account_test.rs"]
mod tests;
