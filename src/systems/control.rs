use bevy_ecs::{
    event::{EventReader, EventWriter},
    query::With,
    system::{Query, ResMut},
};
use tracing::{error, info};

use crate::{
    error::GameError,
    events::{Caption, GameCommand, GameEvent},
    progress::Progress,
    systems::{
        components::{GlobalState, InteractionLock},
        motion::{PlayerActor, TaskKey},
        PlayerControlled,
    },
};

/// Applies out-of-band commands: progress resets, stopping the player, and exiting.
pub fn game_command_system(
    mut events: EventReader<GameEvent>,
    mut state: ResMut<GlobalState>,
    mut progress: ResMut<Progress>,
    mut lock: ResMut<InteractionLock>,
    mut players: Query<&mut PlayerActor, With<PlayerControlled>>,
    mut captions: EventWriter<Caption>,
) {
    for GameEvent::Command(command) in events.read() {
        match command {
            GameCommand::ResetProgress => {
                progress.reset();
                captions.write(Caption::from("Progress reset."));
            }
            GameCommand::StopPlayer => {
                for mut actor in players.iter_mut() {
                    actor.stop();
                    // A dropped walk completion would never release the lock; a playing
                    // interaction still will.
                    if lock.is_engaged() && !actor.is_task_active(TaskKey::Interaction) {
                        info!("Player stopped mid-sequence, releasing interaction lock");
                        lock.release();
                    }
                }
            }
            GameCommand::Exit => {
                state.exit = true;
            }
        }
    }
}

/// Logs errors reported by other systems.
pub fn error_report_system(mut errors: EventReader<GameError>) {
    for e in errors.read() {
        error!(error = %e, "Game error");
    }
}
