use std::collections::HashMap;

use bevy_ecs::{
    event::{EventReader, EventWriter},
    resource::Resource,
    system::ResMut,
};
use tracing::trace;

use crate::{
    constants::mechanics::LONG_PRESS_SECONDS,
    events::{TouchInput, TouchRelease},
};

/// Press start times of the touches currently down, keyed by touch id.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct TouchState {
    started: HashMap<u64, f64>,
}

impl TouchState {
    pub fn active_touches(&self) -> usize {
        self.started.len()
    }

    pub fn press(&mut self, id: u64, timestamp: f64) {
        self.started.insert(id, timestamp);
    }

    /// Ends touch `id`, returning whether it was held long enough to count as "look".
    ///
    /// A release without a matching press counts as a tap.
    pub fn release(&mut self, id: u64, timestamp: f64) -> bool {
        let start = self.started.remove(&id).unwrap_or(timestamp);
        is_long_press(timestamp - start)
    }
}

pub fn is_long_press(held_seconds: f64) -> bool {
    held_seconds >= LONG_PRESS_SECONDS
}

/// Turns raw touch events into classified releases for the interaction orchestrator.
pub fn touch_input_system(
    mut touches: ResMut<TouchState>,
    mut input: EventReader<TouchInput>,
    mut releases: EventWriter<TouchRelease>,
) {
    for event in input.read() {
        match *event {
            TouchInput::Down { id, timestamp } => touches.press(id, timestamp),
            TouchInput::Up { id, timestamp, point } => {
                let is_look = touches.release(id, timestamp);
                trace!(id, point = %point, is_look, "Touch released");
                releases.write(TouchRelease { point, is_look });
            }
        }
    }
}
