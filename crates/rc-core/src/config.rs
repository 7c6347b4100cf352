//! Chain configuration
//!
//! Room footprint, spacing, door offsets and camera settings. The driver
//! may also read `room_count` and `advance_interval_secs`; the generator
//! itself ignores them.

use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ChainError;
use crate::presenter::Easing;

/// Retry cap for door selection
pub const DEFAULT_MAX_DOOR_ATTEMPTS: u32 = 1000;

/// Generator and driver settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChainConfig {
    // Room geometry
    pub room_width: f32,
    pub room_height: f32,
    pub room_spacing: f32,

    // Door offsets from the room centre
    pub door_spacing_x: f32,
    pub door_spacing_y: f32,

    // Camera
    pub camera_duration_secs: f32,
    pub camera_easing: Easing,
    pub camera_z: f32,

    pub max_door_attempts: u32,

    // Driver only
    pub room_count: u32,
    pub advance_interval_secs: f32,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            room_width: 10.0,
            room_height: 5.7,
            room_spacing: 2.0,

            door_spacing_x: 4.55,
            door_spacing_y: 2.3,

            camera_duration_secs: 0.2,
            camera_easing: Easing::OutCubic,
            camera_z: -10.0,

            max_door_attempts: DEFAULT_MAX_DOOR_ATTEMPTS,

            room_count: 10,
            advance_interval_secs: 1.0,
        }
    }
}

impl ChainConfig {
    /// Parse a JSON config; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ChainError> {
        let config: ChainConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Distance between the centres of vertically adjacent rooms
    pub fn vertical_step(&self) -> f32 {
        self.room_height + self.room_spacing
    }

    /// Distance between the centres of horizontally adjacent rooms
    pub fn horizontal_step(&self) -> f32 {
        self.room_width + self.room_spacing
    }

    pub fn camera_duration(&self) -> Duration {
        Duration::from_secs_f32(self.camera_duration_secs)
    }

    /// Retired rooms linger for as long as the camera takes to leave them
    pub fn removal_delay(&self) -> Duration {
        self.camera_duration()
    }

    pub fn advance_interval(&self) -> Duration {
        Duration::from_secs_f32(self.advance_interval_secs)
    }

    /// Check every field for values the geometry tables cannot use
    pub fn validate(&self) -> Result<(), ChainError> {
        positive("room_width", self.room_width)?;
        positive("room_height", self.room_height)?;
        non_negative("room_spacing", self.room_spacing)?;
        non_negative("door_spacing_x", self.door_spacing_x)?;
        non_negative("door_spacing_y", self.door_spacing_y)?;
        duration("camera_duration_secs", self.camera_duration_secs)?;
        duration("advance_interval_secs", self.advance_interval_secs)?;
        if !self.camera_z.is_finite() {
            return Err(invalid("camera_z", "must be finite"));
        }
        if self.max_door_attempts == 0 {
            return Err(invalid("max_door_attempts", "must be at least 1"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> ChainError {
    ChainError::InvalidConfig {
        field,
        reason: reason.to_string(),
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ChainError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be a positive number"))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ChainError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be a non-negative number"))
    }
}

/// Seconds that convert to a `Duration` without overflow
fn duration(field: &'static str, secs: f32) -> Result<(), ChainError> {
    non_negative(field, secs)?;
    Duration::try_from_secs_f32(secs)
        .map(|_| ())
        .map_err(|_| invalid(field, "is too large for a duration"))
}
