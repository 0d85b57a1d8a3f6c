//! This module contains the main game logic and state.

use std::fs;
use std::path::Path;

use bevy_ecs::event::{event_update_system, EventRegistry};
use bevy_ecs::query::With;
use bevy_ecs::schedule::{IntoScheduleConfigs, Schedule};
use bevy_ecs::world::World;
use glam::Vec2;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::constants::{PLAYER_SPAWN, WELCOME_CAPTION};
use crate::error::{GameError, GameResult, StorageError};
use crate::events::{Caption, GameCommand, GameEvent, InventoryChanged, TouchInput, TouchRelease};
use crate::formatter;
use crate::progress::Progress;
use crate::room::Room;
use crate::save::SaveStore;
use crate::systems::{
    camera_system, caption_system, error_report_system, follow_camera, followup_system, game_command_system,
    interaction_system, inventory_notify_system, parallax_offsets, parallax_system, player_animation_system,
    player_motion_system, touch_input_system, AnimationKey, Animator, Camera, CurrentCaption, DeltaTime, Facing,
    FrameLibrary, GlobalState, InteractionLock, InventoryBar, MotionFinished, MotionState, Parallax, PlayerActor,
    PlayerBundle, PlayerControlled, SlotView, TouchState, Viewport,
};

/// Everything a presenter needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub player_position: Vec2,
    pub facing: Facing,
    pub motion: MotionState,
    pub animation: AnimationKey,
    /// Asset name of the player's current animation frame.
    pub frame: Option<String>,
    pub camera: Vec2,
    pub parallax: Parallax,
    pub slots: Vec<Option<SlotView>>,
    pub selected_slot: Option<usize>,
    pub caption: Option<String>,
    pub interaction_locked: bool,
    pub door_unlocked: bool,
    pub key_found: bool,
}

/// The `Game` struct is the main entry point for the game.
///
/// It owns the ECS world and the per-frame schedule; the platform layer feeds it touches
/// and frame ticks and reads back [`FrameSnapshot`]s.
pub struct Game {
    pub world: World,
    pub schedule: Schedule,
}

impl Game {
    /// Builds the room from `config`, loading saved progress and scanning the asset directory.
    pub fn new(config: &Config) -> GameResult<Game> {
        let assets = match &config.assets_dir {
            Some(dir) => scan_assets(dir)?,
            None => Vec::new(),
        };
        Self::with_assets(config, assets)
    }

    /// Builds the room against an explicit list of available asset names.
    pub fn with_assets(config: &Config, assets: Vec<String>) -> GameResult<Game> {
        config.validate()?;

        let mut world = World::default();
        let mut schedule = Schedule::default();

        EventRegistry::register_event::<GameError>(&mut world);
        EventRegistry::register_event::<GameEvent>(&mut world);
        EventRegistry::register_event::<TouchInput>(&mut world);
        EventRegistry::register_event::<TouchRelease>(&mut world);
        EventRegistry::register_event::<MotionFinished>(&mut world);
        EventRegistry::register_event::<Caption>(&mut world);
        EventRegistry::register_event::<InventoryChanged>(&mut world);

        let room = Room::standard()?;
        let viewport = Viewport(config.viewport());
        let library = FrameLibrary::from_available(assets.iter().map(String::as_str));
        let bar = InventoryBar::new(&viewport).with_available_icons(assets);
        let progress = Progress::load(SaveStore::new(&config.save_path));
        let initial_inventory = progress.inventory().snapshot();

        let camera = Camera {
            position: follow_camera(PLAYER_SPAWN, &viewport, room.size()),
        };
        let parallax = parallax_offsets(camera.position.x, room.size().x);
        let actor = PlayerActor::new(PLAYER_SPAWN).with_interact_duration(library.duration(AnimationKey::InteractDown));

        info!(
            door_unlocked = progress.door_unlocked(),
            key_found = progress.key_found(),
            items = progress.inventory().len(),
            "Room loaded"
        );

        world.insert_resource(room);
        world.insert_resource(viewport);
        world.insert_resource(library);
        world.insert_resource(bar);
        world.insert_resource(progress);
        world.insert_resource(camera);
        world.insert_resource(parallax);
        world.insert_resource(GlobalState { exit: false });
        world.insert_resource(DeltaTime(0f32));
        world.insert_resource(InteractionLock::default());
        world.insert_resource(TouchState::default());
        world.insert_resource(CurrentCaption(Some(WELCOME_CAPTION.into())));

        world.spawn(PlayerBundle::new(actor));

        world.send_event(Caption::from(WELCOME_CAPTION));
        world.send_event(initial_inventory);

        schedule.add_systems(
            (
                touch_input_system,
                game_command_system,
                interaction_system,
                player_motion_system,
                followup_system,
                player_animation_system,
                camera_system,
                parallax_system,
                inventory_notify_system,
                caption_system,
                error_report_system,
                event_update_system,
            )
                .chain(),
        );

        Ok(Game { world, schedule })
    }

    /// Ticks the game state.
    ///
    /// Returns true if the game should exit.
    pub fn tick(&mut self, dt: f32) -> bool {
        formatter::increment_frame();

        // A bad delta would poison every timer in flight
        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            warn!(dt, "Ignoring invalid frame delta");
            0.0
        };
        self.world.insert_resource(DeltaTime(dt));

        // Run all systems
        self.schedule.run(&mut self.world);

        self.world.get_resource::<GlobalState>().is_some_and(|state| state.exit)
    }

    pub fn touch_down(&mut self, id: u64, timestamp: f64) {
        self.world.send_event(TouchInput::Down { id, timestamp });
    }

    /// Releases touch `id` at a screen point; the touch is handled on the next tick.
    pub fn touch_up(&mut self, id: u64, timestamp: f64, point: Vec2) {
        self.world.send_event(TouchInput::Up { id, timestamp, point });
    }

    pub fn command(&mut self, command: GameCommand) {
        debug!(?command, "Command queued");
        self.world.send_event(GameEvent::from(command));
    }

    pub fn progress(&self) -> &Progress {
        self.world.resource::<Progress>()
    }

    pub fn room(&self) -> &Room {
        self.world.resource::<Room>()
    }

    pub fn camera(&self) -> Camera {
        *self.world.resource::<Camera>()
    }

    pub fn viewport(&self) -> Viewport {
        *self.world.resource::<Viewport>()
    }

    /// Converts a world point to the screen point a touch would need to hit it.
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        self.camera().world_to_screen(&self.viewport(), world)
    }

    /// Captures the presentation state after the most recent tick.
    pub fn snapshot(&mut self) -> GameResult<FrameSnapshot> {
        let (actor, animator) = self
            .world
            .query_filtered::<(&PlayerActor, &Animator), With<PlayerControlled>>()
            .single(&self.world)
            .map_err(|e| GameError::InvalidState(format!("No/multiple player entities: {}", e)))?;

        let library = self.world.resource::<FrameLibrary>();
        let progress = self.world.resource::<Progress>();
        let inventory = progress.inventory().snapshot();

        Ok(FrameSnapshot {
            player_position: actor.position(),
            facing: actor.facing(),
            motion: actor.state(),
            animation: actor.animation(),
            frame: animator.current_frame_name(library).map(str::to_string),
            camera: self.world.resource::<Camera>().position,
            parallax: *self.world.resource::<Parallax>(),
            slots: self.world.resource::<InventoryBar>().slot_views(&inventory),
            selected_slot: inventory.selected_index,
            caption: self.world.resource::<CurrentCaption>().0.as_deref().map(str::to_string),
            interaction_locked: self.world.resource::<InteractionLock>().is_engaged(),
            door_unlocked: progress.door_unlocked(),
            key_found: progress.key_found(),
        })
    }
}

/// Lists the stems of the `*.png` files in `dir`, sorted.
pub fn scan_assets(dir: &Path) -> GameResult<Vec<String>> {
    let io_error = |source| StorageError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("png")) {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
    }
    names.sort();

    debug!(count = names.len(), dir = %dir.display(), "Scanned assets");
    Ok(names)
}
