//! Room chain generation
//!
//! The chain is strictly linear: one current room, and for the duration of
//! an advance, the room it replaces. Each advance picks a door that does
//! not lead straight back, places the next room behind it, and retires the
//! room left behind.

use core::mem;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::config::ChainConfig;
use crate::door::{DoorIndex, DoorKind};
use crate::error::ChainError;
use crate::geometry::Vec3;
use crate::presenter::{DoorPlacement, Presenter, RoomHandle};
use crate::rng::RandomSource;

/// Rejected draws in a single selection before it is worth a warning
const REJECTION_WARN_THRESHOLD: u32 = 16;

/// A room in the chain
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomState {
    pub room: RoomHandle,
    pub position: Vec3,
    /// Direction travelled to reach this room; `None` for the first room
    pub incoming_door: Option<DoorIndex>,
}

impl RoomState {
    /// Wall facing the predecessor, where the back door sits
    pub fn entry_wall(&self) -> Option<DoorIndex> {
        self.incoming_door.map(DoorIndex::opposite)
    }
}

/// Live chain state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChainState {
    pub current_room: RoomState,
    /// Predecessor awaiting retirement. `advance` retires the outgoing
    /// room before it returns, so this is always `None` between calls;
    /// the retired handle is reported in [`AdvanceOutcome::retired`].
    pub previous_room: Option<RoomHandle>,
}

/// Result of a single advance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdvanceOutcome {
    pub room: RoomHandle,
    pub position: Vec3,
    /// Door the chain advanced through
    pub door: DoorIndex,
    /// Draws rejected before `door` was accepted
    pub rejections: u32,
    /// Room scheduled for removal by this advance
    pub retired: RoomHandle,
}

/// Builds a linear chain of rooms, one advance at a time
#[derive(Debug, Clone)]
pub struct RoomChainGenerator {
    config: ChainConfig,
    state: Option<ChainState>,
    rooms_generated: u32,
    total_rejections: u64,
}

impl RoomChainGenerator {
    /// Create an uninitialized generator
    pub fn new(config: ChainConfig) -> Result<Self, ChainError> {
        config.validate()?;
        Ok(Self {
            config,
            state: None,
            rooms_generated: 0,
            total_rejections: 0,
        })
    }

    pub fn with_default_config() -> Self {
        Self {
            config: ChainConfig::default(),
            state: None,
            rooms_generated: 0,
            total_rejections: 0,
        }
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    pub fn state(&self) -> Option<&ChainState> {
        self.state.as_ref()
    }

    pub fn current_room(&self) -> Option<&RoomState> {
        self.state.as_ref().map(|state| &state.current_room)
    }

    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    /// Rooms created since the last initialize, the first room included
    pub fn rooms_generated(&self) -> u32 {
        self.rooms_generated
    }

    /// Rejected door draws since the last initialize
    pub fn total_rejections(&self) -> u64 {
        self.total_rejections
    }

    /// Start a chain with its first room at the origin
    pub fn initialize<P>(&mut self, presenter: &mut P) -> RoomHandle
    where
        P: Presenter + ?Sized,
    {
        self.initialize_at(presenter, Vec3::ZERO)
    }

    /// Start a chain with its first room at `origin`
    ///
    /// An already running chain is discarded and its current room retired.
    pub fn initialize_at<P>(&mut self, presenter: &mut P, origin: Vec3) -> RoomHandle
    where
        P: Presenter + ?Sized,
    {
        if let Some(old) = self.state.take() {
            debug!(room = %old.current_room.room, "discarding running chain");
            presenter.schedule_removal(old.current_room.room, self.config.removal_delay());
        }

        let room = presenter.create_room(origin);
        self.state = Some(ChainState {
            current_room: RoomState {
                room,
                position: origin,
                incoming_door: None,
            },
            previous_room: None,
        });
        self.rooms_generated = 1;
        self.total_rejections = 0;
        debug!(%room, position = %origin, "chain initialized");

        self.center_camera(presenter, origin);
        room
    }

    /// Grow the chain by one room
    pub fn advance<P, R>(
        &mut self,
        presenter: &mut P,
        rng: &mut R,
    ) -> Result<AdvanceOutcome, ChainError>
    where
        P: Presenter + ?Sized,
        R: RandomSource + ?Sized,
    {
        let incoming = self
            .state
            .as_ref()
            .ok_or(ChainError::NotInitialized)?
            .current_room
            .incoming_door;
        let (door, rejections) = self.select_door(rng, incoming)?;

        let state = self.state.as_mut().ok_or(ChainError::NotInitialized)?;
        let position = state.current_room.position + door.room_offset(&self.config);
        let room = presenter.create_room(position);

        presenter.create_door(room, door_placement(&self.config, door, DoorKind::Entry));
        // Every advanced-to room has a predecessor to face
        presenter.create_door(
            room,
            door_placement(&self.config, door.opposite(), DoorKind::Exit),
        );

        let outgoing = mem::replace(
            &mut state.current_room,
            RoomState {
                room,
                position,
                incoming_door: Some(door),
            },
        );
        // Retire the predecessor now so at most one is ever pending
        let retired = outgoing.room;
        presenter.schedule_removal(retired, self.config.removal_delay());

        self.rooms_generated += 1;
        self.total_rejections += u64::from(rejections);
        debug!(
            %room,
            %door,
            %position,
            rejections,
            %retired,
            rooms = self.rooms_generated,
            "advanced chain"
        );

        self.center_camera(presenter, position);

        Ok(AdvanceOutcome {
            room,
            position,
            door,
            rejections,
            retired,
        })
    }

    /// Draw doors until one does not reverse `incoming`
    ///
    /// Returns the accepted door and how many draws were rejected. Gives up
    /// after `max_door_attempts` draws.
    pub fn select_door<R>(
        &self,
        rng: &mut R,
        incoming: Option<DoorIndex>,
    ) -> Result<(DoorIndex, u32), ChainError>
    where
        R: RandomSource + ?Sized,
    {
        let mut rejections = 0;
        while rejections < self.config.max_door_attempts {
            let draw = rng.random_int(DoorIndex::MIN_INDEX, DoorIndex::END_INDEX);
            let door = DoorIndex::from_index(draw)?;
            if !door.is_reversal(incoming) {
                if rejections >= REJECTION_WARN_THRESHOLD {
                    warn!(rejections, %door, "door selection needed many draws");
                }
                return Ok((door, rejections));
            }
            rejections += 1;
            trace!(%door, ?incoming, rejections, "rejected reversing door");
        }

        warn!(attempts = rejections, ?incoming, "door selection exhausted its retries");
        Err(ChainError::GenerationInvariantViolated {
            attempts: rejections,
        })
    }

    fn center_camera<P>(&self, presenter: &mut P, position: Vec3)
    where
        P: Presenter + ?Sized,
    {
        presenter.move_camera_to(
            position.with_z(self.config.camera_z),
            self.config.camera_duration(),
            self.config.camera_easing,
        );
    }
}

impl Default for RoomChainGenerator {
    fn default() -> Self {
        Self::with_default_config()
    }
}

/// Door on `door`'s wall, positioned and rotated from the fixed tables
pub fn door_placement(config: &ChainConfig, door: DoorIndex, kind: DoorKind) -> DoorPlacement {
    DoorPlacement {
        door,
        local_position: door.door_offset(config),
        rotation: door.rotation(),
        kind,
    }
}
