//! The Entity-Component-System (ECS) module.
//!
//! This module contains all the ECS-related logic, including components, systems,
//! and resources.

pub mod animation;
pub mod camera;
pub mod components;
pub mod control;
pub mod direction;
pub mod effects;
pub mod hud;
pub mod input;
pub mod interaction;
pub mod motion;

pub use self::animation::*;
pub use self::camera::*;
pub use self::components::*;
pub use self::control::*;
pub use self::direction::*;
pub use self::hud::*;
pub use self::input::*;
pub use self::interaction::*;
pub use self::motion::*;
