use glam::Vec2;
use strum_macros::AsRefStr;

/// The four directions the player can face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Facing {
    /// Picks the facing for a displacement in y-up world space.
    ///
    /// The horizontal axis only wins when it is strictly larger, so diagonals face vertically.
    pub fn from_delta(delta: Vec2) -> Facing {
        if delta.x.abs() > delta.y.abs() {
            if delta.x >= 0.0 {
                Facing::Right
            } else {
                Facing::Left
            }
        } else if delta.y >= 0.0 {
            Facing::Up
        } else {
            Facing::Down
        }
    }
}
