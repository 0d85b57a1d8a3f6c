use std::borrow::Cow;

use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::inventory::InventoryItem;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameCommand {
    /// Wipe saved progress and the inventory, then persist the empty state.
    ResetProgress,
    /// Halt the player where they stand, dropping the pending walk.
    StopPlayer,
    Exit,
}

#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Command(GameCommand),
}

impl From<GameCommand> for GameEvent {
    fn from(command: GameCommand) -> Self {
        GameEvent::Command(command)
    }
}

/// Raw touch input, as supplied by the platform layer.
///
/// Timestamps are in seconds on any monotonic clock; only their differences matter.
/// Points are in screen space (y-up, origin at the bottom-left of the viewport).
#[derive(Event, Clone, Copy, Debug, PartialEq)]
pub enum TouchInput {
    Down { id: u64, timestamp: f64 },
    Up { id: u64, timestamp: f64, point: Vec2 },
}

/// A classified touch release, ready for the interaction orchestrator.
#[derive(Event, Clone, Copy, Debug, PartialEq)]
pub struct TouchRelease {
    /// Release point in screen space.
    pub point: Vec2,
    /// Whether the press was long enough to count as "look".
    pub is_look: bool,
}

/// A line of text for the caption bar.
#[derive(Event, Clone, Debug, PartialEq, Eq)]
pub struct Caption(pub Cow<'static, str>);

impl Caption {
    pub fn text(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for Caption {
    fn from(text: &'static str) -> Self {
        Caption(Cow::Borrowed(text))
    }
}

impl From<String> for Caption {
    fn from(text: String) -> Self {
        Caption(Cow::Owned(text))
    }
}

/// Emitted once after every accepted inventory mutation.
///
/// Carries a full snapshot so observers never need to read the model back.
#[derive(Event, Clone, Debug, PartialEq, Eq)]
pub struct InventoryChanged {
    pub items: Vec<InventoryItem>,
    pub selected_index: Option<usize>,
}
