//! Account store — SQLx-backed persistence for the `accounts` table.
//!
//! DESIGN
//! ======
//! Every statement filters on `is_deleted = FALSE`, so soft-deleted rows are
//! invisible to reads and writes alike. Updates build a dynamic SET list from
//! the fields present in the request; absent fields are left untouched.
//! `updated_ts` is rewritten by every mutating statement, which doubles as
//! the liveness probe for an otherwise empty patch.
//!
//! ERROR HANDLING
//! ==============
//! "No live row matched" is reported as `StoreError::NotFound` — via
//! `fetch_optional` on reads and `rows_affected() == 0` on writes — and is
//! distinct from `StoreError::Database`, so callers can map 404 vs 500.

use sqlx::{PgPool, QueryBuilder};
use time::OffsetDateTime;

use crate::services::account::{
    Account, AccountCreationRequest, AccountStore, AccountUpdateRequest, StoreError,
};

// =============================================================================
// ROW MAPPING
// =============================================================================

/// Raw row image of the `accounts` table. Columns are matched by name, so the
/// SELECT list and this struct can evolve independently.
#[derive(Debug, sqlx::FromRow)]
struct AccountRow {
    id: i64,
    name: String,
    #[sqlx(rename = "type")]
    account_type: String,
    subtype: Option<String>,
    org_id: i64,
    current_balance: f64,
    is_deleted: bool,
    created_ts: OffsetDateTime,
    updated_ts: OffsetDateTime,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            account_type: row.account_type,
            account_sub_type: row.subtype.unwrap_or_default(),
            org_id: row.org_id,
            current_balance: row.current_balance,
            is_deleted: row.is_deleted,
            created_ts: row.created_ts,
            updated_ts: row.updated_ts,
        }
    }
}

// =============================================================================
// POSTGRES STORE
// =============================================================================

/// [`AccountStore`] backed by a Postgres pool.
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl AccountStore for PgAccountStore {
    async fn get_account(&self, id: i64) -> Result<Account, StoreError> {
        let row = sqlx::query_as::<_, AccountRow>(
            "SELECT id, name, type, subtype, org_id, current_balance, is_deleted, created_ts, updated_ts \
             FROM accounts WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound(id))?;

        Ok(row.into())
    }

    async fn insert_account(&self, request: &AccountCreationRequest) -> Result<i64, StoreError> {
        // Validated up front: the insert cannot proceed without an owner.
        let org_id = request.org_id.ok_or(StoreError::MissingField("org_id"))?;

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO accounts (name, type, subtype, org_id, current_balance) \
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(request.name.as_deref().unwrap_or(""))
        .bind(request.account_type.as_deref().unwrap_or(""))
        .bind(request.account_sub_type.as_deref())
        .bind(org_id)
        .bind(request.current_balance.unwrap_or(0.0))
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn update_account(&self, id: i64, request: &AccountUpdateRequest) -> Result<(), StoreError> {
        let mut builder = QueryBuilder::new("UPDATE accounts SET updated_ts = now()");
        if let Some(name) = &request.name {
            builder.push(", name = ").push_bind(name);
        }
        if let Some(account_type) = &request.account_type {
            builder.push(", type = ").push_bind(account_type);
        }
        if let Some(subtype) = &request.account_sub_type {
            builder.push(", subtype = ").push_bind(subtype);
        }
        if let Some(org_id) = request.org_id {
            builder.push(", org_id = ").push_bind(org_id);
        }
        if let Some(balance) = request.current_balance {
            builder.push(", current_balance = ").push_bind(balance);
        }
        builder.push(" WHERE id = ").push_bind(id);
        builder.push(" AND is_deleted = FALSE");

        let result = builder.build().execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    async fn delete_account(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE accounts SET is_deleted = TRUE, updated_ts = now() \
             WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "accounts_test.rs"]
mod tests;
