//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`MenuId`] - Validated category/dish identifier
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, preventing entire classes of bugs.
//!
//! # Examples
//!
//! ```
//! use carta::core::types::MenuId;
//!
//! // Valid constructions
//! let id = MenuId::new("starters").unwrap();
//! assert_eq!(id.as_str(), "starters");
//!
//! // Invalid constructions fail at creation time
//! assert!(MenuId::new("").is_err());
//! assert!(MenuId::new("has/slash").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid id: {0}")]
    InvalidId(String),
}

/// A validated category or dish identifier.
///
/// Identifiers are caller-supplied slugs that double as URL path segments
/// and JSON object keys, so the rules are deliberately conservative:
/// - Cannot be empty
/// - Cannot exceed 100 bytes
/// - Cannot contain `/` (reserved for route paths)
/// - Cannot contain ASCII control characters
/// - Cannot start or end with whitespace
///
/// # Example
///
/// ```
/// use carta::core::types::MenuId;
///
/// let id = MenuId::new("mains").unwrap();
/// assert_eq!(id.as_str(), "mains");
///
/// assert!(MenuId::new("").is_err());
/// assert!(MenuId::new(" padded ").is_err());
/// assert!(MenuId::new("a/b").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MenuId(String);

impl MenuId {
    /// Maximum identifier length in bytes.
    const MAX_LEN: usize = 100;

    /// Create a new validated identifier.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidId` if the value violates the identifier rules.
    pub fn new(id: impl Into<String>) -> Result<Self, TypeError> {
        let id = id.into();
        Self::validate(&id)?;
        Ok(Self(id))
    }

    /// Validate an identifier.
    fn validate(id: &str) -> Result<(), TypeError> {
        if id.is_empty() {
            return Err(TypeError::InvalidId("id cannot be empty".into()));
        }

        if id.len() > Self::MAX_LEN {
            return Err(TypeError::InvalidId(format!(
                "id cannot exceed {} bytes, got {}",
                Self::MAX_LEN,
                id.len()
            )));
        }

        if id.contains('/') {
            return Err(TypeError::InvalidId("id cannot contain '/'".into()));
        }

        for c in id.chars() {
            if c.is_ascii_control() {
                return Err(TypeError::InvalidId(
                    "id cannot contain control characters".into(),
                ));
            }
        }

        if id.starts_with(char::is_whitespace) || id.ends_with(char::is_whitespace) {
            return Err(TypeError::InvalidId(
                "id cannot start or end with whitespace".into(),
            ));
        }

        Ok(())
    }

    /// Get the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MenuId {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<MenuId> for String {
    fn from(id: MenuId) -> Self {
        id.0
    }
}

impl AsRef<str> for MenuId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for MenuId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl std::fmt::Display for MenuId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
