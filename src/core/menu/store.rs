//! core::menu::store
//!
//! Menu document persistence through the git gateway.
//!
//! # Architecture
//!
//! The store is a thin seam between the domain and the repository: `load`
//! reads the raw document and parses/validates it, `save` serializes and
//! hands the bytes to the gateway for write + commit + push. It never pulls;
//! deciding when the working copy is fresh enough belongs to the caller
//! holding the transaction lock.
//!
//! The store does not use `git2` directly. All repository access goes
//! through the [`Gateway`] doorway.
//!
//! # Example
//!
//! ```ignore
//! use carta::core::menu::store::MenuStore;
//!
//! let store = MenuStore::new(&gateway);
//! let mut doc = store.load()?;
//! doc.categories.retain(|c| c.id != *stale_id);
//! store.save(&doc, "Delete category: seasonal")?;
//! ```

use thiserror::Error;
use tracing::debug;

use super::schema::{parse_menu, DocumentError, MenuDocument};
use crate::git::{Gateway, GitError};

/// Errors from menu storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Document parsing, validation, or serialization failed.
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// Repository operation failed.
    #[error("git error: {0}")]
    Git(#[from] GitError),
}

/// Menu document store backed by the repository working copy.
///
/// Borrow of the gateway rather than ownership: the service layer owns the
/// gateway (behind its transaction mutex) and hands out short-lived stores.
pub struct MenuStore<'a> {
    gateway: &'a Gateway,
}

impl<'a> MenuStore<'a> {
    /// Create a store over the given gateway.
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// Load and validate the menu document from the working copy.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Git`] wrapping `DocumentMissing` when the configured
    ///   file does not exist
    /// - [`StoreError::Document`] when the bytes are not UTF-8 JSON matching
    ///   the schema, or a structural invariant is violated
    pub fn load(&self) -> Result<MenuDocument, StoreError> {
        let bytes = self.gateway.read_document()?;
        let text = String::from_utf8(bytes).map_err(|e| {
            DocumentError::Parse(format!("document is not valid UTF-8: {e}"))
        })?;
        let doc = parse_menu(&text)?;
        debug!(categories = doc.categories.len(), "loaded menu document");
        Ok(doc)
    }

    /// Persist the document: serialize, write, commit, push.
    ///
    /// Validates before writing so a structurally broken document can never
    /// be published. Returns the id of the commit that recorded the change.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Document`] if validation or serialization fails
    ///   (nothing is written)
    /// - [`StoreError::Git`] if the write, commit, or push fails; a push
    ///   failure (`GitError::Push`) means the commit exists locally
    pub fn save(&self, document: &MenuDocument, message: &str) -> Result<String, StoreError> {
        document.validate()?;
        let json = document.to_pretty_json()?;
        self.gateway.write_document(json.as_bytes())?;
        let commit = self.gateway.commit_and_push(message)?;
        debug!(%commit, "saved menu document");
        Ok(commit)
    }
}
