use bevy_ecs::{
    component::Component,
    event::{Event, EventWriter},
    query::With,
    system::{Query, Res},
};
use glam::Vec2;
use smallvec::SmallVec;
use strum_macros::AsRefStr;
use tracing::{debug, trace};

use crate::{
    constants::{
        animation::{ACTION_FRAME_TIME, INTERACT_FRAME_COUNT},
        mechanics::{ARRIVAL_THRESHOLD, PLAYER_SPEED},
    },
    systems::{
        animation::AnimationKey, components::DeltaTime, direction::Facing, interaction::Followup, PlayerControlled,
    },
};

/// What the player is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
pub enum MotionState {
    Idle,
    Walking,
    Interacting,
}

/// The purposes scheduled tasks are keyed by. Starting a task replaces the previous one with the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
pub enum TaskKey {
    Movement,
    Interaction,
}

#[derive(Debug, Clone, PartialEq)]
struct WalkTask {
    from: Vec2,
    to: Vec2,
    elapsed: f32,
    duration: f32,
    then: Option<Followup>,
}

#[derive(Debug, Clone, PartialEq)]
struct InteractTask {
    elapsed: f32,
    duration: f32,
    then: Option<Followup>,
}

/// Completion of a motion task, published for the interaction orchestrator.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionFinished(pub Followup);

/// Ease-in/ease-out curve over `t` in `0..=1`.
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// The player avatar: where it stands, where it faces, what it animates, and the walk and
/// interaction tasks in flight.
///
/// Completions are plain values handed back to the caller rather than callbacks: `move_to`
/// returns the completion when it finishes on the spot, and `tick` returns those that fired
/// during the frame. A task that gets replaced or stopped drops its completion unseen.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct PlayerActor {
    position: Vec2,
    facing: Facing,
    animation: AnimationKey,
    animation_serial: u32,
    interact_duration: f32,
    walk: Option<WalkTask>,
    interaction: Option<InteractTask>,
}

impl PlayerActor {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            facing: Facing::Down,
            animation: AnimationKey::IdleDown,
            animation_serial: 0,
            interact_duration: INTERACT_FRAME_COUNT as f32 * ACTION_FRAME_TIME,
            walk: None,
            interaction: None,
        }
    }

    /// Overrides how long the interaction one-shot lasts, normally the frame count times the frame time.
    pub fn with_interact_duration(mut self, seconds: f32) -> Self {
        self.interact_duration = seconds.max(0.0);
        self
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn animation(&self) -> AnimationKey {
        self.animation
    }

    /// Bumped every time an animation is started, so restarts of the same key are visible.
    pub fn animation_serial(&self) -> u32 {
        self.animation_serial
    }

    pub fn is_moving(&self) -> bool {
        self.walk.is_some()
    }

    pub fn state(&self) -> MotionState {
        if self.interaction.is_some() {
            MotionState::Interacting
        } else if self.walk.is_some() {
            MotionState::Walking
        } else {
            MotionState::Idle
        }
    }

    /// Where the current walk ends, if one is in flight.
    pub fn destination(&self) -> Option<Vec2> {
        self.walk.as_ref().map(|walk| walk.to)
    }

    pub fn is_task_active(&self, key: TaskKey) -> bool {
        match key {
            TaskKey::Movement => self.walk.is_some(),
            TaskKey::Interaction => self.interaction.is_some(),
        }
    }

    /// Starts walking to `target`, cancelling any walk or interaction in flight.
    ///
    /// Targets within the arrival threshold complete immediately: the completion is returned
    /// to the caller and no walk is started. Otherwise `None` is returned and the completion
    /// fires from [`PlayerActor::tick`] on arrival.
    #[must_use]
    pub fn move_to(&mut self, target: Vec2, then: Option<Followup>) -> Option<Followup> {
        self.cancel(TaskKey::Interaction);
        self.cancel(TaskKey::Movement);

        let delta = target - self.position;
        let distance = delta.length();
        if distance <= ARRIVAL_THRESHOLD {
            trace!(distance, "Already at target");
            self.play(AnimationKey::IdleDown);
            return then;
        }

        self.facing = Facing::from_delta(delta);
        self.play(AnimationKey::walk(self.facing));

        let duration = distance / PLAYER_SPEED;
        debug!(
            target = %target,
            distance,
            duration,
            facing = self.facing.as_ref(),
            "Walking"
        );
        self.walk = Some(WalkTask {
            from: self.position,
            to: target,
            elapsed: 0.0,
            duration,
            then,
        });
        None
    }

    /// Plays the interaction one-shot, replacing any interaction already playing.
    pub fn play_interact(&mut self, then: Option<Followup>) {
        self.cancel(TaskKey::Interaction);
        self.play(AnimationKey::InteractDown);
        self.interaction = Some(InteractTask {
            elapsed: 0.0,
            duration: self.interact_duration,
            then,
        });
    }

    /// Stops walking where the player stands. The walk's completion never fires.
    pub fn stop(&mut self) {
        self.cancel(TaskKey::Movement);
        self.play(AnimationKey::IdleDown);
    }

    /// Advances the tasks in flight by `dt` seconds, returning the completions that fired.
    pub fn tick(&mut self, dt: f32) -> SmallVec<[Followup; 2]> {
        let mut fired = SmallVec::new();

        if let Some(walk) = self.walk.as_mut() {
            walk.elapsed += dt;
            if walk.elapsed >= walk.duration {
                let to = walk.to;
                let then = walk.then.take();
                self.walk = None;
                self.position = to;
                self.play(AnimationKey::IdleDown);
                debug!(position = %to, "Arrived");
                fired.extend(then);
            } else {
                let t = ease_in_out(walk.elapsed / walk.duration);
                self.position = walk.from.lerp(walk.to, t);
            }
        }

        if let Some(interaction) = self.interaction.as_mut() {
            interaction.elapsed += dt;
            if interaction.elapsed >= interaction.duration {
                let then = interaction.then.take();
                self.interaction = None;
                self.play(AnimationKey::IdleDown);
                debug!("Interaction finished");
                fired.extend(then);
            }
        }

        fired
    }

    fn cancel(&mut self, key: TaskKey) {
        let dropped = match key {
            TaskKey::Movement => self.walk.take().map(|walk| walk.then),
            TaskKey::Interaction => self.interaction.take().map(|interaction| interaction.then),
        };
        if let Some(then) = dropped {
            debug!(task = key.as_ref(), superseded = ?then, "Cancelled task");
        }
    }

    fn play(&mut self, key: AnimationKey) {
        self.animation = key;
        self.animation_serial = self.animation_serial.wrapping_add(1);
    }
}

/// Advances the player's walk and interaction tasks and publishes the completions that fired.
pub fn player_motion_system(
    dt: Res<DeltaTime>,
    mut players: Query<&mut PlayerActor, With<PlayerControlled>>,
    mut finished: EventWriter<MotionFinished>,
) {
    for mut actor in players.iter_mut() {
        if actor.state() == MotionState::Idle {
            continue;
        }
        for followup in actor.tick(dt.0) {
            finished.write(MotionFinished(followup));
        }
    }
}
