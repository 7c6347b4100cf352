//! rc-core: linear room chain generation
//!
//! Builds a chain of rooms one advance at a time. Each new room sits behind
//! a randomly chosen door of the current one, never the door leading
//! straight back. Rendering, camera animation and timing belong to the
//! caller through the [`Presenter`] trait and a [`RandomSource`].

pub mod config;
pub mod door;
pub mod error;
pub mod generator;
pub mod geometry;
pub mod presenter;
pub mod rng;

pub use config::ChainConfig;
pub use door::{DoorIndex, DoorKind};
pub use error::ChainError;
pub use generator::{AdvanceOutcome, ChainState, RoomChainGenerator, RoomState};
pub use geometry::{Rotation, Vec3};
pub use presenter::{
    CameraTween, DoorPlacement, Easing, Presenter, PresenterEvent, RecordingPresenter,
    RoomHandle,
};
pub use rng::{GameRng, RandomSource, ScriptedRng};
