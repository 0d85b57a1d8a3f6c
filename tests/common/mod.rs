#![allow(dead_code)]

use std::path::PathBuf;

use bevy_ecs::{entity::Entity, event::Events, world::World};
use glam::Vec2;
use pointclick::{
    config::Config,
    constants::PLAYER_SPAWN,
    error::GameError,
    events::{Caption, GameCommand, GameEvent, InventoryChanged, TouchRelease},
    game::Game,
    progress::Progress,
    room::Room,
    save::SaveStore,
    systems::{
        Camera, CurrentCaption, DeltaTime, GlobalState, InteractionLock, InventoryBar, MotionFinished, PlayerActor,
        PlayerBundle, Viewport,
    },
};
use tempfile::TempDir;

pub const FRAME: f32 = 1.0 / 60.0;

/// Save file location inside a fresh temporary directory.
pub fn save_path(dir: &TempDir) -> PathBuf {
    dir.path().join("save_slot_01.json")
}

pub fn test_store(dir: &TempDir) -> SaveStore {
    SaveStore::new(save_path(dir))
}

pub fn test_config(dir: &TempDir) -> Config {
    Config {
        save_path: save_path(dir),
        ..Config::default()
    }
}

pub fn create_test_game(dir: &TempDir) -> Game {
    Game::new(&test_config(dir)).expect("Game should build")
}

/// Creates a world with every resource the interaction systems need, but no player.
pub fn create_test_world(dir: &TempDir) -> World {
    let mut world = World::new();

    world.insert_resource(Events::<GameEvent>::default());
    world.insert_resource(Events::<GameError>::default());
    world.insert_resource(Events::<TouchRelease>::default());
    world.insert_resource(Events::<MotionFinished>::default());
    world.insert_resource(Events::<Caption>::default());
    world.insert_resource(Events::<InventoryChanged>::default());

    let viewport = Viewport(Vec2::new(1280.0, 720.0));
    world.insert_resource(Room::standard().expect("Standard room should be valid"));
    world.insert_resource(InventoryBar::new(&viewport));
    world.insert_resource(viewport);
    world.insert_resource(Camera {
        position: Vec2::new(640.0, 360.0),
    });
    world.insert_resource(Progress::load(test_store(dir)));
    world.insert_resource(InteractionLock::default());
    world.insert_resource(CurrentCaption::default());
    world.insert_resource(GlobalState { exit: false });
    world.insert_resource(DeltaTime(FRAME));

    world
}

pub fn spawn_test_player(world: &mut World, position: Vec2) -> Entity {
    world.spawn(PlayerBundle::new(PlayerActor::new(position))).id()
}

pub fn spawn_default_player(world: &mut World) -> Entity {
    spawn_test_player(world, PLAYER_SPAWN)
}

pub fn send_release(world: &mut World, point: Vec2, is_look: bool) {
    let mut events = world.resource_mut::<Events<TouchRelease>>();
    events.send(TouchRelease { point, is_look });
}

pub fn send_command(world: &mut World, command: GameCommand) {
    let mut events = world.resource_mut::<Events<GameEvent>>();
    events.send(GameEvent::Command(command));
}

/// Takes every caption written so far, oldest first.
pub fn drain_captions(world: &mut World) -> Vec<String> {
    let mut events = world.resource_mut::<Events<Caption>>();
    events.drain().map(|caption| caption.text().to_string()).collect()
}

pub fn player_actor(world: &mut World) -> PlayerActor {
    world
        .query::<&PlayerActor>()
        .single(world)
        .expect("Exactly one player should exist")
        .clone()
}

/// Ticks the game at 60 Hz for `seconds`.
pub fn run_for(game: &mut Game, seconds: f32) {
    let frames = (seconds / FRAME).ceil() as usize;
    for _ in 0..frames {
        game.tick(FRAME);
    }
}

/// Taps (or long-presses) the screen point that currently shows `world_point`.
pub fn press_world(game: &mut Game, touch_id: u64, world_point: Vec2, is_look: bool) {
    let screen = game.world_to_screen(world_point);
    let hold = if is_look { 0.5 } else { 0.05 };
    game.touch_down(touch_id, 10.0);
    game.touch_up(touch_id, 10.0 + hold, screen);
    game.tick(FRAME);
}

pub fn press_screen(game: &mut Game, touch_id: u64, screen: Vec2) {
    game.touch_down(touch_id, 10.0);
    game.touch_up(touch_id, 10.05, screen);
    game.tick(FRAME);
}

pub fn caption(game: &mut Game) -> Option<String> {
    game.snapshot().expect("Snapshot should succeed").caption
}
