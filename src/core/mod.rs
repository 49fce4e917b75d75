//! core
//!
//! Core domain types, schemas, and operations for Carta.
//!
//! # Modules
//!
//! - [`types`] - Strong types: MenuId
//! - [`menu`] - Menu document schema, storage, and domain service
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Schemas are strict and reject unknown fields
//! - Every mutation is an atomic load-mutate-save transaction

pub mod config;
pub mod menu;
pub mod types;
