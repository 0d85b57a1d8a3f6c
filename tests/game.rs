use std::fs;

use bevy_ecs::event::Events;
use glam::Vec2;
use pointclick::{
    config::Config,
    constants::{PLAYER_SPAWN, WELCOME_CAPTION},
    error::GameError,
    events::{GameCommand, InventoryChanged},
    game::{scan_assets, Game},
    systems::{AnimationKey, Facing, MotionState},
};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;
use tempfile::TempDir;

mod common;

const BRICK: Vec2 = Vec2::new(1230.0, 200.0);
const DOOR: Vec2 = Vec2::new(1870.0, 250.0);
const STATUE: Vec2 = Vec2::new(880.0, 250.0);
const FIRST_SLOT: Vec2 = Vec2::new(460.0, 86.0);

fn find_key(game: &mut Game) {
    common::press_world(game, 1, BRICK, false);
    common::run_for(game, 5.0);
}

#[test]
fn test_initial_snapshot() {
    let dir = TempDir::new().unwrap();
    let mut game = common::create_test_game(&dir);

    let snapshot = game.snapshot().unwrap();

    assert_eq!(snapshot.player_position, PLAYER_SPAWN);
    assert_eq!(snapshot.facing, Facing::Down);
    assert_eq!(snapshot.motion, MotionState::Idle);
    assert_eq!(snapshot.animation, AnimationKey::IdleDown);
    assert_eq!(snapshot.frame.as_deref(), Some("placeholder/idle_down/0"));
    assert_eq!(snapshot.camera, Vec2::new(640.0, 360.0));
    assert_eq!(snapshot.caption.as_deref(), Some(WELCOME_CAPTION));
    assert_that(&snapshot.slots.iter().all(Option::is_none)).is_true();
    assert_that(&snapshot.interaction_locked).is_false();
    assert_that(&game.world.resource::<Events<InventoryChanged>>().len()).is_equal_to(1);
}

#[test]
fn test_find_key_then_unlock_door() {
    let dir = TempDir::new().unwrap();
    let mut game = common::create_test_game(&dir);

    find_key(&mut game);
    let snapshot = game.snapshot().unwrap();
    assert_eq!(snapshot.caption.as_deref(), Some("You found a Brass Key."));
    assert_eq!(snapshot.player_position, Vec2::new(1260.0, 122.0));
    assert_eq!(snapshot.slots[0].as_ref().map(|slot| slot.item_id), Some("brass_key"));
    assert_that(&snapshot.key_found).is_true();
    assert_that(&snapshot.interaction_locked).is_false();

    common::press_screen(&mut game, 2, FIRST_SLOT);
    let snapshot = game.snapshot().unwrap();
    assert_eq!(snapshot.caption.as_deref(), Some("Selected: Brass Key"));
    assert_eq!(snapshot.selected_slot, Some(0));

    common::press_world(&mut game, 3, DOOR, false);
    common::run_for(&mut game, 3.0);
    let snapshot = game.snapshot().unwrap();
    assert_eq!(snapshot.caption.as_deref(), Some("You unlock the rusty door."));
    assert_that(&snapshot.door_unlocked).is_true();
    assert_that(&snapshot.selected_slot).is_none();

    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(common::save_path(&dir)).unwrap()).unwrap();
    assert_eq!(saved["doorUnlocked"], serde_json::Value::Bool(true));
    assert_eq!(saved["keyFound"], serde_json::Value::Bool(true));
}

#[test]
fn test_progress_survives_restart() {
    let dir = TempDir::new().unwrap();
    {
        let mut game = common::create_test_game(&dir);
        find_key(&mut game);
    }

    let mut game = common::create_test_game(&dir);
    let snapshot = game.snapshot().unwrap();

    assert_that(&snapshot.key_found).is_true();
    assert_eq!(snapshot.slots[0].as_ref().map(|slot| slot.display_name), Some("Brass Key"));

    common::press_world(&mut game, 1, BRICK, false);
    common::run_for(&mut game, 5.0);
    assert_eq!(common::caption(&mut game).as_deref(), Some("Only dust behind the loose brick now."));
}

#[test]
fn test_long_press_looks_without_changing_state() {
    let dir = TempDir::new().unwrap();
    let mut game = common::create_test_game(&dir);

    common::press_world(&mut game, 1, DOOR, true);
    common::run_for(&mut game, 7.0);

    let snapshot = game.snapshot().unwrap();
    assert_eq!(snapshot.caption.as_deref(), Some("A heavy rusty door. It's locked tight."));
    assert_eq!(snapshot.player_position, Vec2::new(1810.0, 122.0));
    assert_that(&snapshot.door_unlocked).is_false();
    assert_that(&common::save_path(&dir).exists()).is_false();
}

#[test]
fn test_hotspot_taps_are_ignored_mid_sequence() {
    let dir = TempDir::new().unwrap();
    let mut game = common::create_test_game(&dir);

    common::press_world(&mut game, 1, BRICK, false);
    common::run_for(&mut game, 0.5);
    common::press_world(&mut game, 2, STATUE, true);

    let actor = common::player_actor(&mut game.world);
    assert_that(&actor.destination()).is_some().is_equal_to(Vec2::new(1260.0, 122.0));
    assert_that(&game.snapshot().unwrap().interaction_locked).is_true();
}

#[test]
fn test_plain_walk_moves_camera_and_parallax() {
    let dir = TempDir::new().unwrap();
    let mut game = common::create_test_game(&dir);

    common::press_world(&mut game, 1, Vec2::new(1500.0, 300.0), false);
    common::run_for(&mut game, 6.0);

    let snapshot = game.snapshot().unwrap();
    assert_eq!(snapshot.player_position, Vec2::new(1500.0, 300.0));
    assert_eq!(snapshot.camera, Vec2::new(1500.0, 360.0));
    assert!((snapshot.parallax.middle - -68.0).abs() < 1e-3);
    assert_eq!(snapshot.caption.as_deref(), Some(WELCOME_CAPTION));
}

#[test]
fn test_invalid_frame_delta_does_not_stall_sequence() {
    let dir = TempDir::new().unwrap();
    let mut game = common::create_test_game(&dir);

    common::press_world(&mut game, 1, DOOR, true);
    common::run_for(&mut game, 0.5);
    game.tick(f32::NAN);
    game.tick(f32::INFINITY);
    game.tick(-1.0);
    common::run_for(&mut game, 7.0);

    let snapshot = game.snapshot().unwrap();
    assert_eq!(snapshot.player_position, Vec2::new(1810.0, 122.0));
    assert_eq!(snapshot.motion, MotionState::Idle);
    assert_that(&snapshot.interaction_locked).is_false();
    assert_eq!(snapshot.caption.as_deref(), Some("A heavy rusty door. It's locked tight."));
}

#[test]
fn test_stop_command_releases_lock() {
    let dir = TempDir::new().unwrap();
    let mut game = common::create_test_game(&dir);

    common::press_world(&mut game, 1, BRICK, false);
    common::run_for(&mut game, 1.0);
    game.command(GameCommand::StopPlayer);
    game.tick(common::FRAME);

    let snapshot = game.snapshot().unwrap();
    assert_that(&snapshot.interaction_locked).is_false();
    assert_eq!(snapshot.motion, MotionState::Idle);

    common::run_for(&mut game, 5.0);
    assert_that(&game.snapshot().unwrap().key_found).is_false();
}

#[test]
fn test_reset_command_wipes_progress() {
    let dir = TempDir::new().unwrap();
    let mut game = common::create_test_game(&dir);
    find_key(&mut game);

    game.command(GameCommand::ResetProgress);
    game.tick(common::FRAME);

    let snapshot = game.snapshot().unwrap();
    assert_eq!(snapshot.caption.as_deref(), Some("Progress reset."));
    assert_that(&snapshot.key_found).is_false();
    assert_that(&snapshot.slots.iter().all(Option::is_none)).is_true();
    assert_that(&common::test_store(&dir).load().key_found()).is_false();
}

#[test]
fn test_exit_command_ends_the_loop() {
    let dir = TempDir::new().unwrap();
    let mut game = common::create_test_game(&dir);

    assert_that(&game.tick(common::FRAME)).is_false();
    game.command(GameCommand::Exit);
    assert_that(&game.tick(common::FRAME)).is_true();
}

#[test]
fn test_corrupt_save_starts_fresh() {
    let dir = TempDir::new().unwrap();
    fs::write(common::save_path(&dir), "[1, 2").unwrap();

    let mut game = common::create_test_game(&dir);

    let snapshot = game.snapshot().unwrap();
    assert_that(&snapshot.key_found).is_false();
    assert_that(&snapshot.door_unlocked).is_false();
}

#[test]
fn test_assets_feed_frames_and_icons() {
    let dir = TempDir::new().unwrap();
    let assets = dir.path().join("assets");
    fs::create_dir(&assets).unwrap();
    for name in ["hero_idle_down_0001.png", "hero_idle_down_0002.PNG", "inv_brass_key.png", "notes.txt"] {
        fs::write(assets.join(name), b"").unwrap();
    }

    assert_eq!(
        scan_assets(&assets).unwrap(),
        vec!["hero_idle_down_0001", "hero_idle_down_0002", "inv_brass_key"]
    );

    let config = Config {
        assets_dir: Some(assets),
        ..common::test_config(&dir)
    };
    let mut game = Game::new(&config).unwrap();
    assert_eq!(game.snapshot().unwrap().frame.as_deref(), Some("hero_idle_down_0001"));

    find_key(&mut game);
    let snapshot = game.snapshot().unwrap();
    assert_eq!(snapshot.slots[0].as_ref().map(|slot| slot.icon.as_str()), Some("inv_brass_key"));
}

#[test]
fn test_construction_errors() {
    let dir = TempDir::new().unwrap();

    let missing_assets = Config {
        assets_dir: Some(dir.path().join("missing")),
        ..common::test_config(&dir)
    };
    assert!(matches!(Game::new(&missing_assets), Err(GameError::Storage(_))));

    let bad_viewport = Config {
        viewport_width: -1.0,
        ..common::test_config(&dir)
    };
    assert!(matches!(Game::new(&bad_viewport), Err(GameError::Config(_))));
}
