//! Carta - a git-backed menu store with an admin API
//!
//! Carta serves a restaurant menu whose single source of truth is a JSON
//! document in a git repository. Every edit becomes a commit pushed to the
//! remote, so the full history of the menu is ordinary git history.
//!
//! # Architecture
//!
//! The codebase follows a strict layered architecture:
//!
//! - [`api`] - HTTP layer (axum routes, status mapping, bearer guard)
//! - [`auth`] - Admin credentials and session tokens
//! - [`core`] - Domain types, document schema, configuration, and the
//!   menu service with its transaction lock
//! - [`git`] - Single gateway for all repository operations
//!
//! # Correctness Invariants
//!
//! 1. Every mutation is one exclusive load-mutate-save transaction
//! 2. A document is validated before it is serialized or committed
//! 3. A failed push never discards the local commit; reconciliation
//!    replays it later
//! 4. Divergence is reported, never silently merged

pub mod api;
pub mod auth;
pub mod core;
pub mod git;
