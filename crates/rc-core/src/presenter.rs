//! Presentation boundary
//!
//! The generator never draws anything. It tells a [`Presenter`] which rooms
//! and doors exist, which rooms to dispose of, and where the camera should
//! go. All of these calls are fire-and-forget.

use core::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::door::{DoorIndex, DoorKind};
use crate::geometry::{Rotation, Vec3};

/// Opaque identity of a room owned by the presenter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomHandle(u64);

impl RoomHandle {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn id(self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for RoomHandle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "room#{}", self.0)
    }
}

/// Where and how a door is attached to its room
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DoorPlacement {
    pub door: DoorIndex,
    /// Offset from the room centre
    pub local_position: Vec3,
    pub rotation: Rotation,
    pub kind: DoorKind,
}

/// Collaborator that materializes the chain
pub trait Presenter {
    /// Instantiate a room centred at `position`
    fn create_room(&mut self, position: Vec3) -> RoomHandle;

    /// Attach a door to an existing room
    fn create_door(&mut self, room: RoomHandle, placement: DoorPlacement);

    /// Dispose of `room` once `after` has elapsed
    fn schedule_removal(&mut self, room: RoomHandle, after: Duration);

    /// Start moving the camera; nothing waits for it to arrive
    fn move_camera_to(&mut self, target: Vec3, duration: Duration, easing: Easing);
}

/// Camera easing curves
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Easing {
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    #[default]
    OutCubic,
    InOutCubic,
}

impl Easing {
    /// Map progress `t` to eased progress; `t` is clamped to [0, 1]
    pub fn apply(self, t: f32) -> f32 {
        let t = if t.is_nan() { 1.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Easing::Linear => t,
            Easing::InQuad => t * t,
            Easing::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::OutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// A camera move in progress
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTween {
    pub from: Vec3,
    pub to: Vec3,
    pub duration: Duration,
    pub easing: Easing,
}

impl CameraTween {
    pub fn new(from: Vec3, to: Vec3, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            easing,
        }
    }

    /// Camera position `elapsed` after the move started
    pub fn position_at(&self, elapsed: Duration) -> Vec3 {
        if self.is_finished(elapsed) {
            return self.to;
        }
        let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.from.lerp(self.to, self.easing.apply(t))
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}

/// One recorded presenter call
#[derive(Debug, Clone, PartialEq)]
pub enum PresenterEvent {
    RoomCreated {
        room: RoomHandle,
        position: Vec3,
    },
    DoorCreated {
        room: RoomHandle,
        placement: DoorPlacement,
    },
    RemovalScheduled {
        room: RoomHandle,
        after: Duration,
    },
    CameraMoved {
        target: Vec3,
        duration: Duration,
        easing: Easing,
    },
}

/// Presenter that records every call and hands out sequential handles
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    events: Vec<PresenterEvent>,
    next_id: u64,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[PresenterEvent] {
        &self.events
    }

    /// Forget recorded events; handle numbering continues
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Doors attached to `room`, in creation order
    pub fn doors_of(&self, room: RoomHandle) -> Vec<DoorPlacement> {
        self.events
            .iter()
            .filter_map(|event| match event {
                PresenterEvent::DoorCreated { room: r, placement } if *r == room => {
                    Some(*placement)
                }
                _ => None,
            })
            .collect()
    }

    /// Rooms scheduled for removal, in order
    pub fn removals(&self) -> Vec<RoomHandle> {
        self.events
            .iter()
            .filter_map(|event| match event {
                PresenterEvent::RemovalScheduled { room, .. } => Some(*room),
                _ => None,
            })
            .collect()
    }

    /// Rooms created and not yet scheduled for removal
    pub fn live_rooms(&self) -> Vec<RoomHandle> {
        let removed = self.removals();
        self.events
            .iter()
            .filter_map(|event| match event {
                PresenterEvent::RoomCreated { room, .. } if !removed.contains(room) => {
                    Some(*room)
                }
                _ => None,
            })
            .collect()
    }

    /// Target of the most recent camera move
    pub fn camera_target(&self) -> Option<Vec3> {
        self.events.iter().rev().find_map(|event| match event {
            PresenterEvent::CameraMoved { target, .. } => Some(*target),
            _ => None,
        })
    }
}

impl Presenter for RecordingPresenter {
    fn create_room(&mut self, position: Vec3) -> RoomHandle {
        let room = RoomHandle::new(self.next_id);
        self.next_id += 1;
        self.events.push(PresenterEvent::RoomCreated { room, position });
        room
    }

    fn create_door(&mut self, room: RoomHandle, placement: DoorPlacement) {
        self.events
            .push(PresenterEvent::DoorCreated { room, placement });
    }

    fn schedule_removal(&mut self, room: RoomHandle, after: Duration) {
        self.events
            .push(PresenterEvent::RemovalScheduled { room, after });
    }

    fn move_camera_to(&mut self, target: Vec3, duration: Duration, easing: Easing) {
        self.events.push(PresenterEvent::CameraMoved {
            target,
            duration,
            easing,
        });
    }
}
