//! This module contains all the constants used in the game.
//!
//! World coordinates are y-up with the origin at the bottom-left corner of the room,
//! matching the screen coordinates handed in by the presentation layer.

use std::time::Duration;

use glam::Vec2;

pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// The size of the room, in world units.
pub const ROOM_SIZE: Vec2 = Vec2::new(2600.0, 1200.0);

/// The lower-left corner of the walkable strip.
pub const WALKABLE_ORIGIN: Vec2 = Vec2::new(140.0, 110.0);
/// The size of the walkable strip.
pub const WALKABLE_SIZE: Vec2 = Vec2::new(2320.0, 270.0);

/// Where the player appears when the room is entered.
pub const PLAYER_SPAWN: Vec2 = Vec2::new(320.0, WALKABLE_ORIGIN.y + 15.0);

pub mod mechanics {
    /// Player walking speed, in world units per second.
    pub const PLAYER_SPEED: f32 = 260.0;
    /// Moves shorter than this complete immediately, without walking.
    pub const ARRIVAL_THRESHOLD: f32 = 2.0;
    /// Presses held at least this long (in seconds) are treated as "look" instead of "use".
    pub const LONG_PRESS_SECONDS: f64 = 0.42;
}

pub mod animation {
    /// Seconds per frame of the idle loop.
    pub const IDLE_FRAME_TIME: f32 = 0.16;
    /// Seconds per frame of the walk loops and the interaction one-shot.
    pub const ACTION_FRAME_TIME: f32 = 0.09;

    pub const IDLE_FRAME_COUNT: usize = 6;
    pub const WALK_FRAME_COUNT: usize = 8;
    pub const INTERACT_FRAME_COUNT: usize = 4;
}

pub mod parallax {
    pub const BACKGROUND_FACTOR: f32 = 0.16;
    pub const MIDDLE_FACTOR: f32 = 0.34;
    pub const FOREGROUND_FACTOR: f32 = 0.60;
}

pub mod hud {
    use glam::Vec2;

    pub const SLOT_COUNT: usize = 5;
    pub const SLOT_SIZE: Vec2 = Vec2::new(78.0, 78.0);
    pub const SLOT_SPACING: f32 = 12.0;
    /// Height of the inventory bar's center above the bottom edge of the screen.
    pub const BAR_OFFSET_Y: f32 = 86.0;
}

/// Default viewport, used when no configuration overrides it.
pub const DEFAULT_VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

pub const WELCOME_CAPTION: &str = "Tap to walk. Long-press to look.";
