//! The session's world state, the inventory that mirrors it, and their persistence.

use bevy_ecs::resource::Resource;
use tracing::info;

use crate::events::InventoryChanged;
use crate::inventory::{InventoryItem, InventoryModel};
use crate::save::{PersistentState, SaveStore};

/// Owns the persistent state, the inventory model and the store they are saved to.
///
/// Every accepted inventory mutation is synced into the owned item set and saved
/// before the change notification is queued for observers.
#[derive(Resource, Debug)]
pub struct Progress {
    state: PersistentState,
    inventory: InventoryModel,
    store: SaveStore,
    outbox: Vec<InventoryChanged>,
}

impl Progress {
    /// Loads the saved state from `store` and rebuilds the inventory from it.
    pub fn load(store: SaveStore) -> Self {
        let state = store.load();
        Self::from_state(state, store)
    }

    pub fn from_state(state: PersistentState, store: SaveStore) -> Self {
        let mut inventory = InventoryModel::new();
        for id in &state.owned_item_ids {
            match InventoryItem::from_id(id) {
                Some(item) => {
                    let _ = inventory.add_item(item);
                }
                None => tracing::warn!(item = %id, "Saved item is not in the catalog, ignoring"),
            }
        }

        Self {
            state,
            inventory,
            store,
            outbox: Vec::new(),
        }
    }

    pub fn state(&self) -> &PersistentState {
        &self.state
    }

    pub fn inventory(&self) -> &InventoryModel {
        &self.inventory
    }

    pub fn key_found(&self) -> bool {
        self.state.key_found()
    }

    pub fn door_unlocked(&self) -> bool {
        self.state.door_unlocked
    }

    pub fn add_item(&mut self, item: InventoryItem) {
        let change = self.inventory.add_item(item);
        self.commit(change);
    }

    pub fn remove_item(&mut self, id: &str) {
        let change = self.inventory.remove_item(id);
        self.commit(change);
    }

    pub fn toggle_selection(&mut self, id: &str) {
        let change = self.inventory.toggle_selection(id);
        self.commit(change);
    }

    pub fn clear_selection(&mut self) {
        let change = self.inventory.clear_selection();
        self.commit(Some(change));
    }

    pub fn unlock_door(&mut self) {
        self.state.door_unlocked = true;
        self.store.save(&self.state);
    }

    /// Forgets everything the player has achieved and saves the empty state.
    pub fn reset(&mut self) {
        info!("Resetting progress");
        self.state = PersistentState::default();
        let change = self.inventory.clear();
        self.commit(Some(change));
    }

    /// Takes the inventory notifications queued since the last drain, oldest first.
    pub fn drain_changes(&mut self) -> Vec<InventoryChanged> {
        std::mem::take(&mut self.outbox)
    }

    fn commit(&mut self, change: Option<InventoryChanged>) {
        let Some(change) = change else {
            return;
        };
        self.state.owned_item_ids = self.inventory.items().iter().map(|item| item.id.to_string()).collect();
        self.store.save(&self.state);
        self.outbox.push(change);
    }
}
