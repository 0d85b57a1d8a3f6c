//! Centralized error types for the game.
//!
//! Only construction-time failures ever reach a caller as [`GameError`]; everything
//! that happens while the room is running is absorbed into no-ops, fallback captions,
//! or log lines.

use std::io;
use std::path::PathBuf;

use bevy_ecs::event::Event;

/// Main error type for the game.
///
/// Returned by [`crate::game::Game::new`] and written to the `GameError` event
/// channel by systems that find the world in an unexpected shape.
#[derive(thiserror::Error, Debug, Event)]
pub enum GameError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Failures reading or writing the save document.
#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize save document: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Save document {path} is corrupt: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors related to loading the runtime configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Failed to extract configuration: {0}")]
    Extract(#[from] Box<figment::Error>),

    #[error("Viewport must be positive, got {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },

    #[error("Save path must not be empty")]
    EmptySavePath,
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
