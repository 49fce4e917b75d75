//! core::menu::service
//!
//! Category and dish operations over the menu document.
//!
//! # Architecture
//!
//! Every operation is one transaction: lock the gateway, load the document
//! fresh, apply the domain rule in memory, save (serialize + commit + push),
//! unlock. Nothing is cached between transactions; the working copy is the
//! only source of truth.
//!
//! # Concurrency
//!
//! The service owns the gateway behind a single [`parking_lot::Mutex`] and
//! holds it for the whole load-mutate-save cycle, reads included.
//! `git2::Repository` is `Send` but not `Sync`, so full mutual exclusion is
//! the only sound discipline for the shared handle; the collections are
//! small enough that it is also not a bottleneck.
//!
//! The service is synchronous. Async callers run operations on the blocking
//! pool so a dropped request cannot abandon a half-finished transaction.
//!
//! # Example
//!
//! ```ignore
//! use carta::core::menu::service::MenuService;
//!
//! let service = MenuService::new(gateway);
//! let category = service.category(&id)?;
//! service.update_dish_price(&category.id, &dish_id, 300)?;
//! ```

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use super::schema::{Category, Dish, MenuDocument};
use super::store::{MenuStore, StoreError};
use crate::core::types::MenuId;
use crate::git::{Gateway, ReconcileOutcome};

/// Errors from menu operations.
///
/// Domain failures (`*NotFound`, `Duplicate*`, `Validation`) describe a bad
/// request and are recoverable per call; `Store` failures mean the backing
/// repository could not complete the transaction.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No category with the requested id.
    #[error("category not found: {0}")]
    CategoryNotFound(String),

    /// No dish with the requested id in the requested category.
    #[error("dish not found: {dish} in category {category}")]
    DishNotFound {
        /// Category that was searched
        category: String,
        /// Dish id that was not found
        dish: String,
    },

    /// A category with this id already exists.
    #[error("category already exists: {0}")]
    DuplicateCategory(String),

    /// A dish with this id already exists in the category.
    #[error("dish already exists: {dish} in category {category}")]
    DuplicateDish {
        /// Category holding the duplicate
        category: String,
        /// The duplicated dish id
        dish: String,
    },

    /// The supplied entity violates a domain rule.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The document store could not complete the transaction.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Replacement values for a category update.
///
/// Only the name and display order are caller-editable; the id and the
/// owned dishes are untouched by an update. Extra fields in the request
/// body (clients often send the whole category back) are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryUpdate {
    pub name: String,
    pub display_order: u32,
}

/// Replacement values for a dish update.
///
/// Mirrors the mutable fields of [`Dish`], with the same defaults for
/// absent keys. The dish id and owning category never change by update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DishUpdate {
    pub name: String,
    pub price: u32,
    pub image: String,
    #[serde(default)]
    pub alt_text: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub available: bool,
    #[serde(default = "default_true")]
    pub is_vegetarian: bool,
    #[serde(default)]
    pub is_vegan: bool,
    #[serde(default)]
    pub is_spicy: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_true() -> bool {
    true
}

/// Current relationship between the local working copy and the remote.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RepoStatus {
    /// Branch the service commits to.
    pub branch: String,
    /// Local commits the remote has not accepted yet. Non-zero after a
    /// failed push; `sync_repository` is the recovery path.
    pub ahead_of_remote: usize,
}

/// The menu domain service.
///
/// Owns the gateway and the mutex that serializes every transaction
/// against the shared working copy.
pub struct MenuService {
    gateway: Mutex<Gateway>,
}

impl MenuService {
    /// Create a service over an initialized gateway.
    pub fn new(gateway: Gateway) -> Self {
        Self {
            gateway: Mutex::new(gateway),
        }
    }

    /// Close the underlying gateway. Idempotent; every transaction that
    /// starts afterwards fails with a store error.
    pub fn close(&self) {
        self.gateway.lock().close();
    }

    // =========================================================================
    // Transactions
    // =========================================================================

    /// Run a read-only transaction against a freshly loaded document.
    fn read<T>(
        &self,
        f: impl FnOnce(&MenuDocument) -> Result<T, ServiceError>,
    ) -> Result<T, ServiceError> {
        let gateway = self.gateway.lock();
        let store = MenuStore::new(&gateway);
        let doc = store.load()?;
        f(&doc)
    }

    /// Run a mutating transaction: load, apply, save with the message the
    /// closure produced. The lock spans the whole cycle.
    fn mutate<T>(
        &self,
        f: impl FnOnce(&mut MenuDocument) -> Result<(T, String), ServiceError>,
    ) -> Result<T, ServiceError> {
        let gateway = self.gateway.lock();
        let store = MenuStore::new(&gateway);
        let mut doc = store.load()?;
        let (value, message) = f(&mut doc)?;
        store.save(&doc, &message)?;
        Ok(value)
    }

    // =========================================================================
    // Menu and Categories
    // =========================================================================

    /// The whole menu document.
    pub fn menu(&self) -> Result<MenuDocument, ServiceError> {
        self.read(|doc| Ok(doc.clone()))
    }

    /// All categories, in document order.
    pub fn categories(&self) -> Result<Vec<Category>, ServiceError> {
        self.read(|doc| Ok(doc.categories.clone()))
    }

    /// A single category by id.
    pub fn category(&self, id: &MenuId) -> Result<Category, ServiceError> {
        self.read(|doc| {
            doc.category(id)
                .cloned()
                .ok_or_else(|| ServiceError::CategoryNotFound(id.to_string()))
        })
    }

    /// Append a new category.
    ///
    /// The supplied entity is validated first; nothing is written when the
    /// id already exists or a field is invalid.
    pub fn create_category(&self, category: Category) -> Result<Category, ServiceError> {
        category
            .validate()
            .map_err(|e| ServiceError::Validation(e.to_string()))?;

        let created = self.mutate(|doc| {
            if doc.category(&category.id).is_some() {
                return Err(ServiceError::DuplicateCategory(category.id.to_string()));
            }
            let message = format!("Add new category: {}", category.name);
            doc.categories.push(category.clone());
            Ok((category, message))
        })?;

        info!(category = %created.id, "created category");
        Ok(created)
    }

    /// Replace a category's name and display order.
    pub fn update_category(
        &self,
        id: &MenuId,
        update: CategoryUpdate,
    ) -> Result<Category, ServiceError> {
        if update.name.trim().is_empty() {
            return Err(ServiceError::Validation(
                "category name cannot be empty".into(),
            ));
        }
        if update.display_order == 0 {
            return Err(ServiceError::Validation(
                "display_order must be at least 1".into(),
            ));
        }

        let updated = self.mutate(|doc| {
            let category = doc
                .category_mut(id)
                .ok_or_else(|| ServiceError::CategoryNotFound(id.to_string()))?;
            category.name = update.name;
            category.display_order = update.display_order;
            let message = format!("Update category: {}", category.name);
            Ok((category.clone(), message))
        })?;

        info!(category = %id, "updated category");
        Ok(updated)
    }

    /// Delete a category and, implicitly, every dish it owns.
    pub fn delete_category(&self, id: &MenuId) -> Result<(), ServiceError> {
        self.mutate(|doc| {
            let before = doc.categories.len();
            doc.categories.retain(|c| c.id != *id);
            if doc.categories.len() == before {
                return Err(ServiceError::CategoryNotFound(id.to_string()));
            }
            Ok(((), format!("Delete category: {id}")))
        })?;

        info!(category = %id, "deleted category");
        Ok(())
    }

    // =========================================================================
    // Dishes
    // =========================================================================

    /// All dishes of one category.
    pub fn dishes(&self, category_id: &MenuId) -> Result<Vec<Dish>, ServiceError> {
        self.read(|doc| {
            doc.category(category_id)
                .map(|c| c.dishes.clone())
                .ok_or_else(|| ServiceError::CategoryNotFound(category_id.to_string()))
        })
    }

    /// Every dish across all categories, flattened in document order.
    pub fn all_dishes(&self) -> Result<Vec<Dish>, ServiceError> {
        self.read(|doc| {
            Ok(doc
                .categories
                .iter()
                .flat_map(|c| c.dishes.iter().cloned())
                .collect())
        })
    }

    /// A single dish by category and id.
    pub fn dish(&self, category_id: &MenuId, dish_id: &MenuId) -> Result<Dish, ServiceError> {
        self.read(|doc| {
            let category = doc
                .category(category_id)
                .ok_or_else(|| ServiceError::CategoryNotFound(category_id.to_string()))?;
            category
                .dish(dish_id)
                .cloned()
                .ok_or_else(|| ServiceError::DishNotFound {
                    category: category_id.to_string(),
                    dish: dish_id.to_string(),
                })
        })
    }

    /// Add a dish to a category.
    ///
    /// The dish's `category_id` back-reference is always set to the owning
    /// category, overriding whatever the caller supplied.
    pub fn create_dish(&self, category_id: &MenuId, mut dish: Dish) -> Result<Dish, ServiceError> {
        dish.validate()
            .map_err(|e| ServiceError::Validation(e.to_string()))?;
        dish.category_id = category_id.to_string();

        let created = self.mutate(|doc| {
            let category = doc
                .category_mut(category_id)
                .ok_or_else(|| ServiceError::CategoryNotFound(category_id.to_string()))?;
            if category.dish(&dish.id).is_some() {
                return Err(ServiceError::DuplicateDish {
                    category: category_id.to_string(),
                    dish: dish.id.to_string(),
                });
            }
            let message = format!(
                "Add new dish: {} to category: {}",
                dish.name, category.name
            );
            category.dishes.push(dish.clone());
            Ok((dish, message))
        })?;

        info!(category = %category_id, dish = %created.id, "created dish");
        Ok(created)
    }

    /// Replace every mutable field of a dish. Id and owning category are
    /// never affected.
    pub fn update_dish(
        &self,
        category_id: &MenuId,
        dish_id: &MenuId,
        update: DishUpdate,
    ) -> Result<Dish, ServiceError> {
        if update.name.trim().is_empty() {
            return Err(ServiceError::Validation("dish name cannot be empty".into()));
        }
        if update.image.trim().is_empty() {
            return Err(ServiceError::Validation(
                "dish image cannot be empty".into(),
            ));
        }

        let updated = self.mutate(|doc| {
            let category = doc
                .category_mut(category_id)
                .ok_or_else(|| ServiceError::CategoryNotFound(category_id.to_string()))?;
            let dish = category
                .dish_mut(dish_id)
                .ok_or_else(|| ServiceError::DishNotFound {
                    category: category_id.to_string(),
                    dish: dish_id.to_string(),
                })?;

            dish.name = update.name;
            dish.price = update.price;
            dish.image = update.image;
            dish.alt_text = update.alt_text;
            dish.description = update.description;
            dish.available = update.available;
            dish.is_vegetarian = update.is_vegetarian;
            dish.is_vegan = update.is_vegan;
            dish.is_spicy = update.is_spicy;
            dish.tags = update.tags;

            let message = format!("Update dish: {}", dish.name);
            Ok((dish.clone(), message))
        })?;

        info!(category = %category_id, dish = %dish_id, "updated dish");
        Ok(updated)
    }

    /// Remove a dish from its category.
    pub fn delete_dish(&self, category_id: &MenuId, dish_id: &MenuId) -> Result<(), ServiceError> {
        self.mutate(|doc| {
            let category = doc
                .category_mut(category_id)
                .ok_or_else(|| ServiceError::CategoryNotFound(category_id.to_string()))?;
            let before = category.dishes.len();
            category.dishes.retain(|d| d.id != *dish_id);
            if category.dishes.len() == before {
                return Err(ServiceError::DishNotFound {
                    category: category_id.to_string(),
                    dish: dish_id.to_string(),
                });
            }
            let message = format!("Delete dish: {dish_id} from category: {}", category.name);
            Ok(((), message))
        })?;

        info!(category = %category_id, dish = %dish_id, "deleted dish");
        Ok(())
    }

    /// Flip a dish's availability flag. Applying twice restores the
    /// original state.
    pub fn toggle_dish_availability(
        &self,
        category_id: &MenuId,
        dish_id: &MenuId,
    ) -> Result<Dish, ServiceError> {
        let toggled = self.mutate(|doc| {
            let category = doc
                .category_mut(category_id)
                .ok_or_else(|| ServiceError::CategoryNotFound(category_id.to_string()))?;
            let dish = category
                .dish_mut(dish_id)
                .ok_or_else(|| ServiceError::DishNotFound {
                    category: category_id.to_string(),
                    dish: dish_id.to_string(),
                })?;

            dish.available = !dish.available;
            let message = if dish.available {
                format!("Mark dish available: {}", dish.name)
            } else {
                format!("Mark dish unavailable: {}", dish.name)
            };
            Ok((dish.clone(), message))
        })?;

        info!(
            category = %category_id,
            dish = %dish_id,
            available = toggled.available,
            "toggled dish availability"
        );
        Ok(toggled)
    }

    /// Set a dish's price, recording the old and new value in the commit.
    pub fn update_dish_price(
        &self,
        category_id: &MenuId,
        dish_id: &MenuId,
        new_price: u32,
    ) -> Result<Dish, ServiceError> {
        let updated = self.mutate(|doc| {
            let category = doc
                .category_mut(category_id)
                .ok_or_else(|| ServiceError::CategoryNotFound(category_id.to_string()))?;
            let dish = category
                .dish_mut(dish_id)
                .ok_or_else(|| ServiceError::DishNotFound {
                    category: category_id.to_string(),
                    dish: dish_id.to_string(),
                })?;

            let old_price = dish.price;
            dish.price = new_price;
            let message = format!("Update {} price: {old_price} → {new_price}", dish.name);
            Ok((dish.clone(), message))
        })?;

        info!(category = %category_id, dish = %dish_id, price = new_price, "updated dish price");
        Ok(updated)
    }

    // =========================================================================
    // Repository Recovery
    // =========================================================================

    /// Local/remote divergence of the working copy.
    pub fn repository_status(&self) -> Result<RepoStatus, ServiceError> {
        let gateway = self.gateway.lock();
        let ahead_of_remote = gateway.ahead_of_remote().map_err(StoreError::Git)?;
        Ok(RepoStatus {
            branch: gateway.branch().to_string(),
            ahead_of_remote,
        })
    }

    /// Reconcile the working copy with the remote.
    ///
    /// The recovery path after a failed push: re-fetches, replays any
    /// stranded local commits onto the remote tip, and pushes. Runs under
    /// the same transaction lock as every other operation.
    pub fn sync_repository(&self) -> Result<ReconcileOutcome, ServiceError> {
        let gateway = self.gateway.lock();
        let outcome = gateway.reconcile().map_err(StoreError::Git)?;
        info!(?outcome, "repository sync finished");
        Ok(outcome)
    }
}
