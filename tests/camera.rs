use bevy_ecs::system::RunSystemOnce;
use glam::Vec2;
use pointclick::{
    constants::ROOM_SIZE,
    systems::{camera_system, follow_camera, parallax_offsets, parallax_system, Camera, Parallax, Viewport},
};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;
use tempfile::TempDir;

mod common;

const VIEWPORT: Viewport = Viewport(Vec2::new(1280.0, 720.0));

#[test]
fn test_camera_follows_player_horizontally() {
    assert_eq!(follow_camera(Vec2::new(1300.0, 200.0), &VIEWPORT, ROOM_SIZE), Vec2::new(1300.0, 360.0));
}

#[test]
fn test_camera_is_clamped_to_room_edges() {
    assert_eq!(follow_camera(Vec2::new(100.0, 125.0), &VIEWPORT, ROOM_SIZE), Vec2::new(640.0, 360.0));
    assert_eq!(follow_camera(Vec2::new(2500.0, 125.0), &VIEWPORT, ROOM_SIZE), Vec2::new(1960.0, 360.0));
}

#[test]
fn test_camera_centers_when_viewport_exceeds_room() {
    let wide = Viewport(Vec2::new(3000.0, 1400.0));
    assert_eq!(follow_camera(Vec2::new(100.0, 125.0), &wide, ROOM_SIZE), Vec2::new(1300.0, 600.0));
}

#[test]
fn test_screen_world_conversion() {
    let camera = Camera {
        position: Vec2::new(1000.0, 360.0),
    };
    let world = camera.screen_to_world(&VIEWPORT, Vec2::new(0.0, 0.0));
    assert_eq!(world, Vec2::new(360.0, 0.0));
    assert_eq!(camera.world_to_screen(&VIEWPORT, world), Vec2::ZERO);
}

#[test]
fn test_parallax_is_zero_at_room_center() {
    assert_eq!(parallax_offsets(ROOM_SIZE.x / 2.0, ROOM_SIZE.x), Parallax::default());
}

#[test]
fn test_parallax_layers_drift_against_camera() {
    let offsets = parallax_offsets(ROOM_SIZE.x / 2.0 + 100.0, ROOM_SIZE.x);

    assert!((offsets.background - -16.0).abs() < 1e-3);
    assert!((offsets.middle - -34.0).abs() < 1e-3);
    assert!((offsets.foreground - -60.0).abs() < 1e-3);
}

#[test]
fn test_camera_and_parallax_systems_track_player() {
    let dir = TempDir::new().unwrap();
    let mut world = common::create_test_world(&dir);
    world.insert_resource(Parallax::default());
    common::spawn_test_player(&mut world, Vec2::new(1500.0, 200.0));

    world.run_system_once(camera_system).expect("System should run successfully");
    world.run_system_once(parallax_system).expect("System should run successfully");

    assert_that(&world.resource::<Camera>().position).is_equal_to(Vec2::new(1500.0, 360.0));
    assert!((world.resource::<Parallax>().foreground - -120.0).abs() < 1e-3);
}
