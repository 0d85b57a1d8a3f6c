use std::collections::{HashMap, HashSet};

use bevy_ecs::{
    component::Component,
    query::With,
    resource::Resource,
    system::{Query, Res},
};
use strum_macros::{AsRefStr, EnumIter};
use tracing::debug;

use crate::{
    constants::animation::{
        ACTION_FRAME_TIME, IDLE_FRAME_COUNT, IDLE_FRAME_TIME, INTERACT_FRAME_COUNT, WALK_FRAME_COUNT,
    },
    systems::{components::DeltaTime, direction::Facing, motion::PlayerActor, PlayerControlled},
};

/// Every animation the player can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum AnimationKey {
    #[default]
    IdleDown,
    WalkUp,
    WalkDown,
    WalkLeft,
    WalkRight,
    #[strum(serialize = "interact_reach_down")]
    InteractDown,
}

impl AnimationKey {
    pub fn walk(facing: Facing) -> AnimationKey {
        match facing {
            Facing::Up => AnimationKey::WalkUp,
            Facing::Down => AnimationKey::WalkDown,
            Facing::Left => AnimationKey::WalkLeft,
            Facing::Right => AnimationKey::WalkRight,
        }
    }

    /// Asset name prefix of this animation's frames.
    pub fn asset_prefix(self) -> String {
        format!("hero_{}", self.as_ref())
    }

    pub fn frame_time(self) -> f32 {
        match self {
            AnimationKey::IdleDown => IDLE_FRAME_TIME,
            _ => ACTION_FRAME_TIME,
        }
    }

    /// How many frames the artwork is expected to have.
    pub fn expected_frames(self) -> usize {
        match self {
            AnimationKey::IdleDown => IDLE_FRAME_COUNT,
            AnimationKey::InteractDown => INTERACT_FRAME_COUNT,
            _ => WALK_FRAME_COUNT,
        }
    }

    pub fn is_looping(self) -> bool {
        !matches!(self, AnimationKey::InteractDown)
    }
}

/// Ordered frame names for every animation key.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct FrameLibrary {
    frames: HashMap<AnimationKey, Vec<String>>,
}

impl FrameLibrary {
    /// Builds the library from the names of the assets that are actually available.
    ///
    /// Frames are named `<prefix>_0001` upwards; missing ones are skipped, and an animation
    /// with no frames at all gets a placeholder sequence of the expected length.
    pub fn from_available<I, S>(names: I) -> FrameLibrary
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let available: HashSet<String> = names.into_iter().map(Into::into).collect();
        let frames = <AnimationKey as strum::IntoEnumIterator>::iter()
            .map(|key| {
                let prefix = key.asset_prefix();
                let found: Vec<String> = (1..=key.expected_frames())
                    .map(|index| format!("{prefix}_{index:04}"))
                    .filter(|name| available.contains(name))
                    .collect();

                if found.is_empty() {
                    debug!(animation = key.as_ref(), "No frames available, using placeholders");
                    (key, Self::placeholder_frames(key))
                } else {
                    (key, found)
                }
            })
            .collect();

        FrameLibrary { frames }
    }

    /// A library made only of placeholders.
    pub fn placeholder() -> FrameLibrary {
        Self::from_available(std::iter::empty::<String>())
    }

    fn placeholder_frames(key: AnimationKey) -> Vec<String> {
        (0..key.expected_frames())
            .map(|index| format!("placeholder/{}/{index}", key.as_ref()))
            .collect()
    }

    pub fn frames(&self, key: AnimationKey) -> &[String] {
        self.frames.get(&key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Length of one full pass over `key`'s frames, in seconds.
    pub fn duration(&self, key: AnimationKey) -> f32 {
        self.frames(key).len() as f32 * key.frame_time()
    }
}

impl Default for FrameLibrary {
    fn default() -> Self {
        Self::placeholder()
    }
}

/// Frame cursor of whatever animation the player is showing.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct Animator {
    pub key: AnimationKey,
    /// Which start of the animation this cursor belongs to.
    pub serial: u32,
    pub current_frame: usize,
    pub time_bank: f32,
    pub finished: bool,
}

impl Animator {
    /// Restarts from the first frame of `key` unless this start was already picked up.
    pub fn play(&mut self, key: AnimationKey, serial: u32) {
        if self.key == key && self.serial == serial {
            return;
        }
        *self = Animator {
            key,
            serial,
            ..Animator::default()
        };
    }

    pub fn tick(&mut self, dt: f32, frame_count: usize) {
        if self.finished || frame_count == 0 {
            return;
        }

        let frame_time = self.key.frame_time();
        self.time_bank += dt;
        if self.time_bank < frame_time {
            return;
        }

        let steps = (self.time_bank / frame_time) as usize;
        self.time_bank -= steps as f32 * frame_time;

        if self.key.is_looping() {
            self.current_frame = (self.current_frame + steps % frame_count) % frame_count;
            return;
        }

        let target = self.current_frame.saturating_add(steps);
        if target >= frame_count - 1 {
            self.finished = target >= frame_count;
            self.current_frame = frame_count - 1;
            if self.finished {
                self.time_bank = 0.0;
            }
        } else {
            self.current_frame = target;
        }
    }

    pub fn current_frame_name<'a>(&self, library: &'a FrameLibrary) -> Option<&'a str> {
        let frames = library.frames(self.key);
        frames.get(self.current_frame.min(frames.len().saturating_sub(1))).map(String::as_str)
    }
}

/// Keeps the player's frame cursor in step with the animation chosen by the motion driver.
pub fn player_animation_system(
    dt: Res<DeltaTime>,
    library: Res<FrameLibrary>,
    mut players: Query<(&PlayerActor, &mut Animator), With<PlayerControlled>>,
) {
    for (actor, mut animator) in players.iter_mut() {
        animator.play(actor.animation(), actor.animation_serial());
        let frame_count = library.frames(animator.key).len();
        animator.tick(dt.0, frame_count);
    }
}
