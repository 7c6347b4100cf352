//! Timed driver loop
//!
//! Initializes the chain once, then advances it on a fixed interval until
//! the requested number of rooms has been added.

use std::thread;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use rc_core::{ChainConfig, ChainError, RandomSource, RoomChainGenerator, Vec3};

use crate::console::ConsolePresenter;

/// What a finished run produced
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub rooms_generated: u32,
    pub final_position: Vec3,
    pub total_rejections: u64,
    pub peak_pending_removals: usize,
}

/// Interval between advances, stretched so a retired room is always
/// disposed before the next one is retired
pub fn effective_interval(config: &ChainConfig) -> Duration {
    let interval = config.advance_interval();
    let removal = config.removal_delay();
    if interval < removal {
        warn!(
            interval_ms = interval.as_millis() as u64,
            removal_ms = removal.as_millis() as u64,
            "advance interval shorter than removal delay, stretching it"
        );
        removal
    } else {
        interval
    }
}

pub struct Driver<R> {
    generator: RoomChainGenerator,
    presenter: ConsolePresenter,
    rng: R,
    interval: Duration,
    wait: bool,
}

impl<R: RandomSource> Driver<R> {
    /// `wait = false` skips the sleeps and steps time forward instead
    pub fn new(config: ChainConfig, rng: R, wait: bool) -> Result<Self, ChainError> {
        let interval = effective_interval(&config);
        let presenter = ConsolePresenter::new(config.camera_z);
        let generator = RoomChainGenerator::new(config)?;
        Ok(Self {
            generator,
            presenter,
            rng,
            interval,
            wait,
        })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run the whole chain: one initialize, then `room_count` advances
    pub fn run(&mut self) -> Result<RunSummary, ChainError> {
        let room_count = self.generator.config().room_count;
        self.generator.initialize(&mut self.presenter);
        info!(room_count, interval = ?self.interval, "chain started");

        for step in 1..=room_count {
            let now = self.tick();
            self.presenter.update(now);
            let outcome = self.generator.advance(&mut self.presenter, &mut self.rng)?;
            info!(
                step,
                room = %outcome.room,
                door = %outcome.door,
                position = %outcome.position,
                "room {step}/{room_count}"
            );
        }

        // Let the last retired room and camera move finish
        let now = self.tick();
        self.presenter.update(now);
        if self.presenter.pending_removals() > 0 {
            warn!(
                pending = self.presenter.pending_removals(),
                "removals still pending at shutdown"
            );
        }
        self.presenter.flush();
        info!(live = self.presenter.live_rooms(), "chain finished");

        let current = self
            .generator
            .current_room()
            .ok_or(ChainError::NotInitialized)?;
        Ok(RunSummary {
            rooms_generated: self.generator.rooms_generated(),
            final_position: current.position,
            total_rejections: self.generator.total_rejections(),
            peak_pending_removals: self.presenter.peak_pending(),
        })
    }

    pub fn presenter(&self) -> &ConsolePresenter {
        &self.presenter
    }

    fn tick(&self) -> Instant {
        if self.wait {
            thread::sleep(self.interval);
            Instant::now()
        } else {
            Instant::now() + self.interval
        }
    }
}
