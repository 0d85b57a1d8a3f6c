use std::borrow::Cow;

use bevy_ecs::{bundle::Bundle, component::Component, resource::Resource};
use glam::Vec2;

use crate::systems::{animation::Animator, motion::PlayerActor};

/// A tag component for the entity the player controls.
#[derive(Default, Component)]
pub struct PlayerControlled;

#[derive(Bundle)]
pub struct PlayerBundle {
    pub player: PlayerControlled,
    pub actor: PlayerActor,
    pub animator: Animator,
}

impl PlayerBundle {
    pub fn new(actor: PlayerActor) -> Self {
        Self {
            player: PlayerControlled,
            actor,
            animator: Animator::default(),
        }
    }
}

/// Seconds elapsed since the previous frame.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct DeltaTime(pub f32);

/// Size of the visible area, in screen units (which equal world units).
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Viewport(pub Vec2);

impl Viewport {
    pub fn half(&self) -> Vec2 {
        self.0 / 2.0
    }
}

/// Gates hotspot interactions while a walk-then-act sequence is in flight.
///
/// Inventory taps ignore it.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InteractionLock(bool);

impl InteractionLock {
    pub fn is_engaged(&self) -> bool {
        self.0
    }

    pub fn engage(&mut self) {
        self.0 = true;
    }

    pub fn release(&mut self) {
        self.0 = false;
    }
}

/// The most recent caption, for presenters that poll instead of reading events.
#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct CurrentCaption(pub Option<Cow<'static, str>>);

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GlobalState {
    pub exit: bool,
}
