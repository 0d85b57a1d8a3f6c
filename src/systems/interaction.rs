//! The interaction orchestrator: turns classified touches into inventory selection,
//! plain walks, or walk-then-act hotspot sequences.

use bevy_ecs::{
    event::{EventReader, EventWriter},
    query::With,
    system::{Query, Res, ResMut},
};
use glam::Vec2;
use tracing::{debug, info};

use crate::{
    error::GameError,
    events::{Caption, TouchRelease},
    progress::Progress,
    room::{HotspotId, Room},
    systems::{
        camera::Camera,
        components::{InteractionLock, Viewport},
        effects,
        hud::InventoryBar,
        motion::{MotionFinished, PlayerActor},
        PlayerControlled,
    },
};

/// The step a motion task runs when it completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Followup {
    /// Arrived at a hotspot to inspect it.
    Look(HotspotId),
    /// Arrived at a hotspot to use it; the interaction animation comes next.
    Interact(HotspotId),
    /// The interaction animation ended; apply the use effect.
    Use(HotspotId),
}

/// What a touch release ended up doing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchOutcome {
    /// An owned item's selection was toggled.
    InventoryToggled(&'static str),
    /// A hotspot sequence is in flight, so the touch was dropped.
    Locked,
    /// A walk-then-act sequence was started.
    HotspotTriggered { hotspot: HotspotId, is_look: bool },
    /// The player was sent to a point on the walkable strip.
    Walk(Vec2),
    /// The touch hit nothing actionable.
    Nothing,
}

/// Borrowed view of everything one orchestration step reads or mutates.
///
/// Captions are collected rather than written so the struct works outside of a system.
pub struct Orchestrator<'a> {
    pub actor: &'a mut PlayerActor,
    pub progress: &'a mut Progress,
    pub lock: &'a mut InteractionLock,
    pub captions: Vec<Caption>,
}

impl<'a> Orchestrator<'a> {
    pub fn new(actor: &'a mut PlayerActor, progress: &'a mut Progress, lock: &'a mut InteractionLock) -> Self {
        Self {
            actor,
            progress,
            lock,
            captions: Vec::new(),
        }
    }

    /// Handles one touch release at a screen point.
    ///
    /// Inventory slots are checked first and never blocked by the lock; hotspots and the
    /// walkable strip are hit-tested in world space.
    pub fn handle_release(
        &mut self,
        release: TouchRelease,
        room: &Room,
        bar: &InventoryBar,
        camera: &Camera,
        viewport: &Viewport,
    ) -> TouchOutcome {
        if let Some(item_id) = bar.item_at(release.point, self.progress.inventory()) {
            self.toggle_item(item_id);
            return TouchOutcome::InventoryToggled(item_id);
        }

        if self.lock.is_engaged() {
            debug!("Interaction locked, ignoring touch");
            return TouchOutcome::Locked;
        }

        let world = camera.screen_to_world(viewport, release.point);
        if let Some(hotspot) = room.hotspot_at(world) {
            let (id, target) = (hotspot.id, room.clamp_to_walkable(hotspot.interaction_point));
            self.trigger_hotspot(id, target, release.is_look);
            return TouchOutcome::HotspotTriggered {
                hotspot: id,
                is_look: release.is_look,
            };
        }

        if room.is_walkable(world) {
            let target = room.clamp_to_walkable(world);
            // A plain walk has nothing to do on arrival.
            let _ = self.actor.move_to(target, None);
            return TouchOutcome::Walk(target);
        }

        TouchOutcome::Nothing
    }

    /// Runs the step that follows a completed walk or interaction animation.
    pub fn resolve(&mut self, followup: Followup) {
        match followup {
            Followup::Look(hotspot) => {
                let caption = effects::look(hotspot, self.progress.state());
                self.caption(caption);
                self.lock.release();
            }
            Followup::Interact(hotspot) => {
                self.actor.play_interact(Some(Followup::Use(hotspot)));
            }
            Followup::Use(hotspot) => {
                let caption = effects::use_hotspot(hotspot, self.progress);
                self.caption(caption);
                self.lock.release();
            }
        }
    }

    fn toggle_item(&mut self, item_id: &str) {
        self.progress.toggle_selection(item_id);
        let caption = match self.progress.inventory().selected_item() {
            Some(item) => Caption::from(format!("Selected: {}", item.display_name)),
            None => Caption::from("Item selection cleared"),
        };
        self.captions.push(caption);
    }

    fn trigger_hotspot(&mut self, hotspot: HotspotId, target: Vec2, is_look: bool) {
        info!(hotspot = hotspot.as_ref(), is_look, "Hotspot triggered");
        self.lock.engage();

        let then = if is_look {
            Followup::Look(hotspot)
        } else {
            Followup::Interact(hotspot)
        };
        if let Some(followup) = self.actor.move_to(target, Some(then)) {
            self.resolve(followup);
        }
    }

    fn caption(&mut self, text: &'static str) {
        self.captions.push(Caption::from(text));
    }
}

/// Routes classified touch releases through the orchestrator.
#[allow(clippy::too_many_arguments)]
pub fn interaction_system(
    mut releases: EventReader<TouchRelease>,
    room: Res<Room>,
    bar: Res<InventoryBar>,
    camera: Res<Camera>,
    viewport: Res<Viewport>,
    mut lock: ResMut<InteractionLock>,
    mut progress: ResMut<Progress>,
    mut players: Query<&mut PlayerActor, With<PlayerControlled>>,
    mut captions: EventWriter<Caption>,
    mut errors: EventWriter<GameError>,
) {
    if releases.is_empty() {
        return;
    }

    let mut actor = match players.single_mut() {
        Ok(actor) => actor,
        Err(e) => {
            errors.write(GameError::InvalidState(format!(
                "No/multiple entities queried for interaction system: {}",
                e
            )));
            releases.clear();
            return;
        }
    };

    let mut orchestrator = Orchestrator::new(&mut *actor, &mut *progress, &mut *lock);
    for release in releases.read() {
        let outcome = orchestrator.handle_release(*release, &room, &bar, &camera, &viewport);
        debug!(?outcome, "Touch handled");
    }
    captions.write_batch(orchestrator.captions);
}

/// Runs the followups of motion tasks that completed this frame.
pub fn followup_system(
    mut finished: EventReader<MotionFinished>,
    mut lock: ResMut<InteractionLock>,
    mut progress: ResMut<Progress>,
    mut players: Query<&mut PlayerActor, With<PlayerControlled>>,
    mut captions: EventWriter<Caption>,
    mut errors: EventWriter<GameError>,
) {
    if finished.is_empty() {
        return;
    }

    let mut actor = match players.single_mut() {
        Ok(actor) => actor,
        Err(e) => {
            errors.write(GameError::InvalidState(format!(
                "No/multiple entities queried for followup system: {}",
                e
            )));
            finished.clear();
            return;
        }
    };

    let mut orchestrator = Orchestrator::new(&mut *actor, &mut *progress, &mut *lock);
    for MotionFinished(followup) in finished.read() {
        orchestrator.resolve(*followup);
    }
    captions.write_batch(orchestrator.captions);
}
