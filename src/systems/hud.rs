//! Screen-space inventory bar and caption plumbing.

use std::collections::HashSet;

use bevy_ecs::{
    event::{EventReader, EventWriter},
    resource::Resource,
    system::ResMut,
};
use glam::Vec2;
use tracing::info;

use crate::{
    constants::hud::{BAR_OFFSET_Y, SLOT_COUNT, SLOT_SIZE, SLOT_SPACING},
    events::{Caption, InventoryChanged},
    inventory::InventoryModel,
    progress::Progress,
    room::Rect,
    systems::components::{CurrentCaption, Viewport},
};

/// Icon shown for items whose artwork is missing.
pub const PLACEHOLDER_ICON: &str = "placeholder/icon";

/// What the presenter draws in one inventory slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotView {
    pub item_id: &'static str,
    pub display_name: &'static str,
    pub icon: String,
}

/// The row of inventory slots along the bottom of the screen.
#[derive(Resource, Debug, Clone)]
pub struct InventoryBar {
    slots: Vec<Rect>,
    available_icons: HashSet<String>,
}

impl InventoryBar {
    /// Lays the slots out centered horizontally on a viewport of `viewport` size.
    pub fn new(viewport: &Viewport) -> Self {
        let total_width = SLOT_COUNT as f32 * SLOT_SIZE.x + (SLOT_COUNT - 1) as f32 * SLOT_SPACING;
        let left = viewport.0.x / 2.0 - total_width / 2.0 + SLOT_SIZE.x / 2.0;
        let slots = (0..SLOT_COUNT)
            .map(|i| {
                let center = Vec2::new(left + i as f32 * (SLOT_SIZE.x + SLOT_SPACING), BAR_OFFSET_Y);
                Rect::from_center(center, SLOT_SIZE)
            })
            .collect();

        Self {
            slots,
            available_icons: HashSet::new(),
        }
    }

    /// Registers the icon assets that exist; every other icon falls back to [`PLACEHOLDER_ICON`].
    pub fn with_available_icons<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.available_icons = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn slots(&self) -> &[Rect] {
        &self.slots
    }

    /// Index of the slot under the screen point, if any.
    pub fn slot_at(&self, screen: Vec2) -> Option<usize> {
        self.slots.iter().position(|slot| slot.contains(screen))
    }

    /// The owned item shown in the slot under the screen point.
    pub fn item_at(&self, screen: Vec2, inventory: &InventoryModel) -> Option<&'static str> {
        let index = self.slot_at(screen)?;
        inventory.items().get(index).map(|item| item.id)
    }

    pub fn slot_views(&self, change: &InventoryChanged) -> Vec<Option<SlotView>> {
        (0..self.slots.len())
            .map(|index| {
                change.items.get(index).map(|item| SlotView {
                    item_id: item.id,
                    display_name: item.display_name,
                    icon: if self.available_icons.contains(item.icon_ref) {
                        item.icon_ref.to_string()
                    } else {
                        PLACEHOLDER_ICON.to_string()
                    },
                })
            })
            .collect()
    }
}

/// Publishes the inventory notifications queued by [`Progress`] since the last frame.
pub fn inventory_notify_system(mut progress: ResMut<Progress>, mut changes: EventWriter<InventoryChanged>) {
    for change in progress.drain_changes() {
        changes.write(change);
    }
}

/// Remembers the latest caption for the presenter.
pub fn caption_system(mut captions: EventReader<Caption>, mut current: ResMut<CurrentCaption>) {
    for caption in captions.read() {
        info!(caption = caption.text(), "Caption");
        current.0 = Some(caption.0.clone());
    }
}
