//! Domain services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the public operation contracts and the store traits
//! behind them, so route handlers can stay focused on protocol translation.
//! The Postgres implementations live in `crate::db`.

pub mod account;
