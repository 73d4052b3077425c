//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the accounts service, which owns the Postgres-backed store — no
//! process-wide singletons. Clone is required by Axum; the service is
//! Arc-backed internally.

use std::sync::Arc;

use sqlx::PgPool;

use crate::db::accounts::PgAccountStore;
use crate::services::account::AccountsService;

#[derive(Clone)]
pub struct AppState {
    pub accounts: AccountsService,
}

impl AppState {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        let store = Arc::new(PgAccountStore::new(pool));
        Self { accounts: AccountsService::new(store) }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
