//! Shopping list built from recipe ingredients.
//!
//! Items are never merged: adding the same ingredient twice yields two
//! entries, each with its own checked state.

use crate::{
    core::{
        plan::ContentCatalog,
        store::{self, keys},
    },
    errors::{Error, Result},
};
use sea_orm::ConnectionTrait;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// One line of the shopping list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingItem {
    /// UUID v4
    pub id: String,
    /// Item name, as added
    pub name: String,
    /// Whether the item is already in the cart
    pub checked: bool,
}

impl ShoppingItem {
    /// A fresh, unchecked item.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            checked: false,
        }
    }
}

/// The shopping list, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShoppingList(Vec<ShoppingItem>);

impl ShoppingList {
    /// Every item, oldest first.
    #[must_use]
    pub fn items(&self) -> &[ShoppingItem] {
        &self.0
    }

    /// Number of items, checked or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of checked items.
    #[must_use]
    pub fn checked_count(&self) -> usize {
        self.0.iter().filter(|item| item.checked).count()
    }

    /// Appends one unchecked item per name. Returns how many were added.
    pub fn add_many<I, S>(&mut self, names: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let before = self.0.len();
        self.0.extend(names.into_iter().map(ShoppingItem::new));
        self.0.len() - before
    }

    /// Adds every ingredient of a catalog recipe.
    ///
    /// # Errors
    /// Returns `Error::RecipeNotFound` for an unknown recipe id.
    pub fn add_recipe(&mut self, catalog: &ContentCatalog, recipe_id: u32) -> Result<usize> {
        let recipe = catalog
            .recipe(recipe_id)
            .ok_or(Error::RecipeNotFound { id: recipe_id })?;
        Ok(self.add_many(recipe.ingredients.iter().cloned()))
    }

    /// Flips the checked flag of one item. Returns the new state, `None` if absent.
    pub fn toggle(&mut self, id: &str) -> Option<bool> {
        let item = self.0.iter_mut().find(|item| item.id == id)?;
        item.checked = !item.checked;
        Some(item.checked)
    }

    /// Removes one item. Returns `false` if there was none.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|item| item.id != id);
        self.0.len() != before
    }

    /// Empties the list.
    pub fn clear(&mut self) {
        self.0.clear();
    }
}

/// Reads the shopping list; absent or unreadable data loads as empty.
pub async fn load_shopping_list<C: ConnectionTrait>(db: &C) -> Result<ShoppingList> {
    store::load_or_default(db, keys::SHOPPING_LIST).await
}

/// Writes the whole list, replacing the previous value.
pub async fn save_shopping_list<C: ConnectionTrait>(db: &C, list: &ShoppingList) -> Result<()> {
    store::save(db, keys::SHOPPING_LIST, list).await?;
    info!("Saved shopping list ({} items)", list.len());
    Ok(())
}
