use bevy_ecs::{
    query::With,
    resource::Resource,
    system::{Query, Res, ResMut},
};
use glam::Vec2;

use crate::{
    constants::parallax::{BACKGROUND_FACTOR, FOREGROUND_FACTOR, MIDDLE_FACTOR},
    room::Room,
    systems::{components::Viewport, motion::PlayerActor, PlayerControlled},
};

/// Center of the visible area, in world space.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec2,
}

impl Camera {
    /// Converts a screen point (y-up, origin at the bottom-left of the viewport) into world space.
    pub fn screen_to_world(&self, viewport: &Viewport, screen: Vec2) -> Vec2 {
        self.position - viewport.half() + screen
    }

    pub fn world_to_screen(&self, viewport: &Viewport, world: Vec2) -> Vec2 {
        world - self.position + viewport.half()
    }
}

/// Horizontal offsets of the three background layers.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct Parallax {
    pub background: f32,
    pub middle: f32,
    pub foreground: f32,
}

/// Clamps `value` into `min..=max`, centering when the range is inverted.
fn clamp_or_center(value: f32, min: f32, max: f32) -> f32 {
    if min > max {
        (min + max) / 2.0
    } else {
        value.clamp(min, max)
    }
}

/// Where the camera sits for a player at `player`: following horizontally, fixed vertically,
/// and never showing anything outside the room.
pub fn follow_camera(player: Vec2, viewport: &Viewport, room_size: Vec2) -> Vec2 {
    let half = viewport.half();
    let x = clamp_or_center(player.x, half.x, room_size.x - half.x);
    let y = clamp_or_center(half.y, half.y, room_size.y - half.y);
    Vec2::new(x, y)
}

/// Layer offsets for a camera at `camera_x`; each layer drifts against the camera by its factor.
pub fn parallax_offsets(camera_x: f32, room_width: f32) -> Parallax {
    let offset = camera_x - room_width / 2.0;
    Parallax {
        background: -offset * BACKGROUND_FACTOR,
        middle: -offset * MIDDLE_FACTOR,
        foreground: -offset * FOREGROUND_FACTOR,
    }
}

pub fn camera_system(
    room: Res<Room>,
    viewport: Res<Viewport>,
    mut camera: ResMut<Camera>,
    players: Query<&PlayerActor, With<PlayerControlled>>,
) {
    let Ok(actor) = players.single() else {
        return;
    };

    let position = follow_camera(actor.position(), &viewport, room.size());
    if camera.position != position {
        camera.position = position;
    }
}

pub fn parallax_system(room: Res<Room>, camera: Res<Camera>, mut parallax: ResMut<Parallax>) {
    let offsets = parallax_offsets(camera.position.x, room.size().x);
    if *parallax != offsets {
        *parallax = offsets;
    }
}
