//! Owned items and the current selection.

use tracing::debug;

use crate::events::InventoryChanged;

/// An immutable entry of the item catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InventoryItem {
    pub id: &'static str,
    pub display_name: &'static str,
    /// Name of the icon asset; the presenter falls back to a placeholder when absent.
    pub icon_ref: &'static str,
}

pub const BRASS_KEY_ID: &str = "brass_key";

impl InventoryItem {
    pub const BRASS_KEY: InventoryItem = InventoryItem {
        id: BRASS_KEY_ID,
        display_name: "Brass Key",
        icon_ref: "inv_brass_key",
    };

    /// Every item that exists in the game.
    pub const CATALOG: [InventoryItem; 1] = [InventoryItem::BRASS_KEY];

    /// Looks up a catalog item by id.
    pub fn from_id(id: &str) -> Option<InventoryItem> {
        Self::CATALOG.iter().find(|item| item.id == id).cloned()
    }
}

/// Ordered, duplicate-free collection of owned items with at most one selected.
///
/// Every mutator returns the change notification for the caller to publish. A `None`
/// means nothing changed and nobody should be notified.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InventoryModel {
    items: Vec<InventoryItem>,
    selected: Option<&'static str>,
}

impl InventoryModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_item(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    pub fn item(&self, id: &str) -> Option<&InventoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn selected_item_id(&self) -> Option<&'static str> {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&InventoryItem> {
        self.selected.and_then(|id| self.item(id))
    }

    pub fn selected_index(&self) -> Option<usize> {
        let selected = self.selected?;
        self.items.iter().position(|item| item.id == selected)
    }

    /// Whether `id` is the current selection.
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected == Some(id) && self.has_item(id)
    }

    /// Appends `item` unless an item with the same id is already owned.
    #[must_use]
    pub fn add_item(&mut self, item: InventoryItem) -> Option<InventoryChanged> {
        if self.has_item(item.id) {
            return None;
        }
        debug!(item = item.id, "Item added to inventory");
        self.items.push(item);
        Some(self.snapshot())
    }

    /// Removes the item with `id`, dropping the selection if it pointed at it.
    #[must_use]
    pub fn remove_item(&mut self, id: &str) -> Option<InventoryChanged> {
        let index = self.items.iter().position(|item| item.id == id)?;
        self.items.remove(index);
        if self.selected == Some(id) {
            self.selected = None;
        }
        debug!(item = id, "Item removed from inventory");
        Some(self.snapshot())
    }

    /// Selects `id`, or deselects it if it already was the selection.
    #[must_use]
    pub fn toggle_selection(&mut self, id: &str) -> Option<InventoryChanged> {
        let item_id = self.item(id)?.id;
        self.selected = if self.selected == Some(item_id) { None } else { Some(item_id) };
        Some(self.snapshot())
    }

    #[must_use]
    pub fn clear_selection(&mut self) -> InventoryChanged {
        self.selected = None;
        self.snapshot()
    }

    /// Drops every item and the selection.
    #[must_use]
    pub fn clear(&mut self) -> InventoryChanged {
        self.items.clear();
        self.selected = None;
        self.snapshot()
    }

    pub fn snapshot(&self) -> InventoryChanged {
        InventoryChanged {
            items: self.items.clone(),
            selected_index: self.selected_index(),
        }
    }
}
