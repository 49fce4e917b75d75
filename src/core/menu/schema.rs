//! core::menu::schema
//!
//! The menu document model.
//!
//! # Schema Design
//!
//! The whole menu lives in one JSON document: an ordered list of categories,
//! each exclusively owning an ordered list of dishes. The document is:
//! - Strictly parsed (unknown fields rejected) — every save rewrites the
//!   file from this model, so a field we did not parse is a field we would
//!   silently destroy
//! - Structurally validated after parsing: category ids unique across the
//!   document, dish ids unique within their category only
//! - Serialized pretty-printed with stable field order so commit diffs stay
//!   reviewable
//!
//! The document carries no schema version; its shape is fixed by the site
//! that consumes the published file.
//!
//! # Example
//!
//! ```
//! use carta::core::menu::schema::parse_menu;
//!
//! let json = r#"{
//!     "categories": [{
//!         "id": "starters",
//!         "name": "Starters",
//!         "display_order": 1,
//!         "dishes": [{
//!             "id": "soup",
//!             "name": "Tomato Soup",
//!             "price": 120,
//!             "image": "soup.jpg",
//!             "alt_text": "Bowl of tomato soup"
//!         }]
//!     }]
//! }"#;
//!
//! let doc = parse_menu(json).unwrap();
//! assert_eq!(doc.categories.len(), 1);
//! assert!(doc.categories[0].dishes[0].available); // defaulted
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::types::{MenuId, TypeError};

/// Errors from document parsing and validation.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to parse menu document: {0}")]
    Parse(String),

    #[error("failed to serialize menu document: {0}")]
    Serialize(String),

    #[error("invalid document value: {0}")]
    InvalidValue(String),

    #[error("duplicate category id: {0}")]
    DuplicateCategoryId(String),

    #[error("duplicate dish id '{dish}' in category '{category}'")]
    DuplicateDishId { category: String, dish: String },

    #[error("type validation failed: {0}")]
    TypeError(#[from] TypeError),
}

/// Parse and validate a menu document.
///
/// # Errors
///
/// Returns an error if:
/// - The JSON is malformed or contains unknown fields
/// - A required field is missing or has the wrong type
/// - Any structural invariant is violated (duplicate ids, empty names,
///   zero display order)
pub fn parse_menu(json: &str) -> Result<MenuDocument, DocumentError> {
    let doc: MenuDocument =
        serde_json::from_str(json).map_err(|e| DocumentError::Parse(e.to_string()))?;
    doc.validate()?;
    Ok(doc)
}

/// The complete menu document.
///
/// Use [`parse_menu`] to parse from JSON with validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MenuDocument {
    /// Categories in display order of authoring.
    pub categories: Vec<Category>,
}

impl MenuDocument {
    /// Validate the document structure.
    ///
    /// Checks that category ids are unique across the document and that
    /// every category (and its dishes) is individually valid. Dish id
    /// uniqueness is scoped to the owning category: the same dish id in
    /// two different categories is legal.
    pub fn validate(&self) -> Result<(), DocumentError> {
        let mut seen = HashSet::new();
        for category in &self.categories {
            if !seen.insert(category.id.as_str()) {
                return Err(DocumentError::DuplicateCategoryId(
                    category.id.to_string(),
                ));
            }
            category.validate()?;
        }
        Ok(())
    }

    /// Find a category by id.
    pub fn category(&self, id: &MenuId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == *id)
    }

    /// Find a category by id, mutably.
    pub fn category_mut(&mut self, id: &MenuId) -> Option<&mut Category> {
        self.categories.iter_mut().find(|c| c.id == *id)
    }

    /// Serialize to the on-disk representation.
    ///
    /// Pretty-printed with serde's declaration field order and a trailing
    /// newline, so that consecutive commits produce minimal diffs.
    pub fn to_pretty_json(&self) -> Result<String, DocumentError> {
        let mut json = serde_json::to_string_pretty(self)
            .map_err(|e| DocumentError::Serialize(e.to_string()))?;
        json.push('\n');
        Ok(json)
    }
}

/// A menu category owning its dishes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Category {
    /// Unique id within the document.
    pub id: MenuId,

    /// Display name.
    pub name: String,

    /// Presentation rank, starting at 1. Not required to be contiguous.
    pub display_order: u32,

    /// Dishes owned by this category.
    #[serde(default)]
    pub dishes: Vec<Dish>,
}

impl Category {
    /// Validate this category and its dishes.
    pub fn validate(&self) -> Result<(), DocumentError> {
        if self.name.trim().is_empty() {
            return Err(DocumentError::InvalidValue(format!(
                "category '{}' has an empty name",
                self.id
            )));
        }
        if self.display_order == 0 {
            return Err(DocumentError::InvalidValue(format!(
                "category '{}' has display_order 0, expected >= 1",
                self.id
            )));
        }

        let mut seen = HashSet::new();
        for dish in &self.dishes {
            if !seen.insert(dish.id.as_str()) {
                return Err(DocumentError::DuplicateDishId {
                    category: self.id.to_string(),
                    dish: dish.id.to_string(),
                });
            }
            dish.validate()?;
        }
        Ok(())
    }

    /// Find a dish by id.
    pub fn dish(&self, id: &MenuId) -> Option<&Dish> {
        self.dishes.iter().find(|d| d.id == *id)
    }

    /// Find a dish by id, mutably.
    pub fn dish_mut(&mut self, id: &MenuId) -> Option<&mut Dish> {
        self.dishes.iter_mut().find(|d| d.id == *id)
    }
}

/// A single dish.
///
/// `category_id` is a denormalized back-reference to the owning category,
/// kept in sync by the service layer whenever a dish is created. Flags and
/// collections default to the values the consuming site assumes for absent
/// keys, so a hand-edited document stays parseable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Dish {
    /// Unique id within the owning category.
    pub id: MenuId,

    /// Display name.
    pub name: String,

    /// Price in whole currency units. Unsigned: a negative price is
    /// unrepresentable and fails at parse time.
    pub price: u32,

    /// Image path or URL.
    pub image: String,

    /// Accessible description of the image.
    #[serde(default)]
    pub alt_text: String,

    /// Longer free-text description.
    #[serde(default)]
    pub description: Option<String>,

    /// Whether the dish is currently orderable.
    #[serde(default = "default_true")]
    pub available: bool,

    /// Id of the owning category (denormalized, service-assigned).
    #[serde(default)]
    pub category_id: String,

    #[serde(default = "default_true")]
    pub is_vegetarian: bool,

    #[serde(default)]
    pub is_vegan: bool,

    #[serde(default)]
    pub is_spicy: bool,

    /// Free-form labels ("chef's special", "new").
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Dish {
    /// Validate dish fields.
    pub fn validate(&self) -> Result<(), DocumentError> {
        if self.name.trim().is_empty() {
            return Err(DocumentError::InvalidValue(format!(
                "dish '{}' has an empty name",
                self.id
            )));
        }
        if self.image.trim().is_empty() {
            return Err(DocumentError::InvalidValue(format!(
                "dish '{}' has an empty image",
                self.id
            )));
        }
        Ok(())
    }
}

fn default_true() -> bool {
    true
}
