//! core::menu
//!
//! Menu document schema, storage, and domain operations.
//!
//! # Modules
//!
//! - [`schema`] - Document model (categories and dishes) with validation
//! - [`store`] - Load/save through the git gateway
//! - [`service`] - Domain operations and the transaction lock
//!
//! # Architecture
//!
//! The menu lives in a single JSON document inside a git working copy.
//! The schema layer owns shape and validation, the store layer owns
//! byte-level round-trips and commit plumbing, and the service layer owns
//! domain rules plus the mutex that makes each load-mutate-save cycle
//! atomic.
//!
//! # Schema Design
//!
//! - Snake_case wire keys, matching the stored document
//! - Strict parsing: unknown fields are rejected rather than silently
//!   dropped on the next full-document rewrite
//! - Defaults for optional dish flags, so hand-edited documents stay terse
//!
//! # Example
//!
//! ```
//! use carta::core::menu::schema::parse_menu;
//!
//! let doc = parse_menu(r#"{"categories": []}"#).unwrap();
//! assert!(doc.categories.is_empty());
//! ```

pub mod schema;
pub mod service;
pub mod store;

// Re-export commonly used types
pub use schema::{parse_menu, Category, Dish, DocumentError, MenuDocument};
pub use service::{CategoryUpdate, DishUpdate, MenuService, RepoStatus, ServiceError};
pub use store::{MenuStore, StoreError};
