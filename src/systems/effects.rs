//! What looking at and using each hotspot does.

use tracing::info;

use crate::{
    inventory::{InventoryItem, BRASS_KEY_ID},
    progress::Progress,
    room::HotspotId,
    save::PersistentState,
};

pub const NOTHING_UNUSUAL: &str = "Nothing unusual.";
pub const NOTHING_HAPPENS: &str = "Nothing happens.";

/// Caption for inspecting `hotspot`. Never changes anything.
pub fn look(hotspot: HotspotId, state: &PersistentState) -> &'static str {
    match hotspot {
        HotspotId::Statue => "An ancient statue worn smooth by time.",
        HotspotId::Door => {
            if state.door_unlocked {
                "The rusty door is now unlocked."
            } else {
                "A heavy rusty door. It's locked tight."
            }
        }
        HotspotId::Brick => {
            if state.key_found() {
                "The gap behind the brick is empty."
            } else {
                "One brick looks loose."
            }
        }
    }
}

/// Uses `hotspot` with whatever is selected, applying its effect and returning the caption.
pub fn use_hotspot(hotspot: HotspotId, progress: &mut Progress) -> &'static str {
    let key_selected = progress.inventory().is_selected(BRASS_KEY_ID);

    match hotspot {
        HotspotId::Statue => {
            if key_selected {
                "The key doesn't fit anything on the statue."
            } else {
                "You brush dust from the ancient statue."
            }
        }
        HotspotId::Door => {
            if progress.door_unlocked() {
                return "The door creaks open.";
            }
            if !key_selected {
                return "It's locked.";
            }

            info!("Door unlocked");
            progress.unlock_door();
            progress.clear_selection();
            "You unlock the rusty door."
        }
        HotspotId::Brick => {
            if progress.key_found() {
                return "Only dust behind the loose brick now.";
            }

            info!("Key found behind the brick");
            progress.add_item(InventoryItem::BRASS_KEY);
            "You found a Brass Key."
        }
    }
}

/// [`look`] for a raw hotspot id, with a fallback for ids that are not in the room.
pub fn look_caption_for(id: &str, state: &PersistentState) -> &'static str {
    HotspotId::parse(id).map_or(NOTHING_UNUSUAL, |hotspot| look(hotspot, state))
}

/// [`use_hotspot`] for a raw hotspot id, with a fallback for ids that are not in the room.
pub fn use_caption_for(id: &str, progress: &mut Progress) -> &'static str {
    match HotspotId::parse(id) {
        Some(hotspot) => use_hotspot(hotspot, progress),
        None => NOTHING_HAPPENS,
    }
}
