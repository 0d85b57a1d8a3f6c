//! Static layout of the room: its bounds, the walkable strip and the hotspots.

use std::str::FromStr;

use bevy_ecs::resource::Resource;
use glam::Vec2;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::constants::{ROOM_SIZE, WALKABLE_ORIGIN, WALKABLE_SIZE};
use crate::error::{GameError, GameResult};

/// An axis-aligned rectangle in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(origin: Vec2, size: Vec2) -> Self {
        Self {
            min: origin,
            max: origin + size,
        }
    }

    /// A rectangle whose bottom edge is centered on `anchor`.
    pub fn from_bottom_center(anchor: Vec2, size: Vec2) -> Self {
        Self::new(Vec2::new(anchor.x - size.x / 2.0, anchor.y), size)
    }

    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self::new(center - size / 2.0, size)
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    /// Inclusive on every edge.
    pub fn contains(&self, point: Vec2) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    pub fn clamp(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min, self.max)
    }

    pub fn is_valid(&self) -> bool {
        self.min.cmple(self.max).all() && self.min.is_finite() && self.max.is_finite()
    }
}

/// The closed set of interactive objects in the room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum HotspotId {
    Statue,
    Door,
    Brick,
}

impl HotspotId {
    /// Resolves a narrative id; unknown ids yield `None`.
    pub fn parse(id: &str) -> Option<HotspotId> {
        HotspotId::from_str(id).ok()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Hotspot {
    pub id: HotspotId,
    pub display_name: &'static str,
    pub hit_region: Rect,
    /// Where the player stands to interact.
    pub interaction_point: Vec2,
}

/// The room the player is in.
#[derive(Resource, Debug, Clone)]
pub struct Room {
    size: Vec2,
    walkable: Rect,
    hotspots: Vec<Hotspot>,
}

impl Room {
    /// Builds a room, rejecting layouts the rest of the core cannot work with.
    pub fn new(size: Vec2, walkable: Rect, hotspots: Vec<Hotspot>) -> GameResult<Room> {
        let bounds = Rect::new(Vec2::ZERO, size);
        if !bounds.is_valid() || size.cmple(Vec2::ZERO).any() {
            return Err(GameError::InvalidState(format!("room size {size} is not positive")));
        }
        if !walkable.is_valid() || !bounds.contains(walkable.min) || !bounds.contains(walkable.max) {
            return Err(GameError::InvalidState(format!(
                "walkable area {:?} does not fit the room",
                walkable
            )));
        }
        for (i, hotspot) in hotspots.iter().enumerate() {
            if !hotspot.hit_region.is_valid() {
                return Err(GameError::InvalidState(format!("hotspot {} has an invalid region", hotspot.id)));
            }
            if hotspots[..i].iter().any(|other| other.id == hotspot.id) {
                return Err(GameError::InvalidState(format!("hotspot {} is registered twice", hotspot.id)));
            }
        }

        Ok(Room {
            size,
            walkable,
            hotspots,
        })
    }

    /// The room from the prototype: a statue, a loose brick and a locked door along one wall.
    pub fn standard() -> GameResult<Room> {
        let floor = WALKABLE_ORIGIN.y;
        let hotspots = vec![
            Hotspot {
                id: HotspotId::Statue,
                display_name: "Ancient Statue",
                hit_region: Rect::from_bottom_center(Vec2::new(880.0, floor + 10.0), Vec2::new(170.0, 250.0)),
                interaction_point: Vec2::new(860.0, floor + 12.0),
            },
            Hotspot {
                id: HotspotId::Door,
                display_name: "Rusty Door",
                hit_region: Rect::from_bottom_center(Vec2::new(1870.0, floor + 10.0), Vec2::new(160.0, 310.0)),
                interaction_point: Vec2::new(1810.0, floor + 12.0),
            },
            Hotspot {
                id: HotspotId::Brick,
                display_name: "Loose Brick",
                hit_region: Rect::from_bottom_center(Vec2::new(1280.0, floor + 10.0), Vec2::new(160.0, 140.0)),
                interaction_point: Vec2::new(1260.0, floor + 12.0),
            },
        ];

        Room::new(ROOM_SIZE, Rect::new(WALKABLE_ORIGIN, WALKABLE_SIZE), hotspots)
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn walkable(&self) -> Rect {
        self.walkable
    }

    pub fn hotspots(&self) -> &[Hotspot] {
        &self.hotspots
    }

    pub fn hotspot(&self, id: HotspotId) -> Option<&Hotspot> {
        self.hotspots.iter().find(|hotspot| hotspot.id == id)
    }

    /// The first registered hotspot whose region contains `point`.
    pub fn hotspot_at(&self, point: Vec2) -> Option<&Hotspot> {
        self.hotspots.iter().find(|hotspot| hotspot.hit_region.contains(point))
    }

    pub fn is_walkable(&self, point: Vec2) -> bool {
        self.walkable.contains(point)
    }

    pub fn clamp_to_walkable(&self, point: Vec2) -> Vec2 {
        self.walkable.clamp(point)
    }
}
