//! Door indices and the fixed geometry tables
//!
//! Each door index names a wall of a room. The same index drives both
//! where the next room is placed and where the door sits on the wall, so
//! both tables below are keyed on it and must agree on direction.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::config::ChainConfig;
use crate::error::ChainError;
use crate::geometry::{Rotation, Vec3};

/// Wall of a room that a connection occupies
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum DoorIndex {
    Up = 1,
    Down = 2,
    Left = 3,
    Right = 4,
}

impl DoorIndex {
    /// All doors in numeric order
    pub const ALL: [DoorIndex; 4] = [
        DoorIndex::Up,
        DoorIndex::Down,
        DoorIndex::Left,
        DoorIndex::Right,
    ];

    /// Lowest numeric index (inclusive)
    pub const MIN_INDEX: i32 = 1;
    /// One past the highest numeric index
    pub const END_INDEX: i32 = 5;

    /// Convert a numeric index (1..=4) to a door
    pub fn from_index(index: i32) -> Result<DoorIndex, ChainError> {
        match index {
            1 => Ok(DoorIndex::Up),
            2 => Ok(DoorIndex::Down),
            3 => Ok(DoorIndex::Left),
            4 => Ok(DoorIndex::Right),
            other => Err(ChainError::InvalidDoorIndex(other)),
        }
    }

    pub const fn index(self) -> i32 {
        self as i32
    }

    /// The door that leads back the way one came
    pub const fn opposite(self) -> DoorIndex {
        match self {
            DoorIndex::Up => DoorIndex::Down,
            DoorIndex::Down => DoorIndex::Up,
            DoorIndex::Left => DoorIndex::Right,
            DoorIndex::Right => DoorIndex::Left,
        }
    }

    /// Check if taking `self` right after entering through `incoming`
    /// would fold the chain back onto the previous room
    pub fn is_reversal(self, incoming: Option<DoorIndex>) -> bool {
        incoming.is_some_and(|door| self == door.opposite())
    }

    /// Unit direction of this wall in world space
    pub const fn direction(self) -> Vec3 {
        match self {
            DoorIndex::Up => Vec3::new(0.0, 1.0, 0.0),
            DoorIndex::Down => Vec3::new(0.0, -1.0, 0.0),
            DoorIndex::Left => Vec3::new(-1.0, 0.0, 0.0),
            DoorIndex::Right => Vec3::new(1.0, 0.0, 0.0),
        }
    }

    pub const fn is_vertical(self) -> bool {
        matches!(self, DoorIndex::Up | DoorIndex::Down)
    }

    /// Displacement from a room's centre to the neighbour behind this wall
    pub fn room_offset(self, config: &ChainConfig) -> Vec3 {
        let step = if self.is_vertical() {
            config.vertical_step()
        } else {
            config.horizontal_step()
        };
        self.direction() * step
    }

    /// Position of this wall's door relative to the room centre
    pub fn door_offset(self, config: &ChainConfig) -> Vec3 {
        let spacing = if self.is_vertical() {
            config.door_spacing_y
        } else {
            config.door_spacing_x
        };
        self.direction() * spacing
    }

    /// Doors on the side walls are turned a quarter
    pub const fn rotation(self) -> Rotation {
        if self.is_vertical() {
            Rotation::None
        } else {
            Rotation::Quarter
        }
    }
}

/// Role of a door placed on a freshly created room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum DoorKind {
    /// Door on the wall the chain advanced through, on the side of the
    /// new room away from its predecessor. It marks the direction of the
    /// last step only; the next room lies behind it just when the next
    /// draw repeats the same door.
    Entry,
    /// Back door facing the room just left behind
    Exit,
}
