//! Console presenter
//!
//! Stands in for a renderer: every room, door and camera move is reported
//! through `tracing`. Retired rooms wait in a removal queue until their
//! delay runs out, and the camera position is tracked with a tween.

use std::collections::{BTreeMap, VecDeque};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use rc_core::{CameraTween, DoorPlacement, Easing, Presenter, RoomHandle, Vec3};

#[derive(Debug)]
struct PendingRemoval {
    room: RoomHandle,
    deadline: Instant,
}

#[derive(Debug)]
pub struct ConsolePresenter {
    rooms: BTreeMap<RoomHandle, Vec3>,
    pending: VecDeque<PendingRemoval>,
    camera: Vec3,
    tween: Option<(CameraTween, Instant)>,
    next_id: u64,
    disposed: u64,
    peak_pending: usize,
}

impl ConsolePresenter {
    pub fn new(camera_z: f32) -> Self {
        Self {
            rooms: BTreeMap::new(),
            pending: VecDeque::new(),
            camera: Vec3::ZERO.with_z(camera_z),
            tween: None,
            next_id: 0,
            disposed: 0,
            peak_pending: 0,
        }
    }

    /// Dispose of rooms whose removal delay has passed and move the
    /// camera along its tween
    pub fn update(&mut self, now: Instant) {
        while let Some(front) = self.pending.front() {
            if front.deadline > now {
                break;
            }
            if let Some(removal) = self.pending.pop_front() {
                if self.rooms.remove(&removal.room).is_some() {
                    self.disposed += 1;
                    debug!(room = %removal.room, "room disposed");
                }
            }
        }

        if let Some((tween, started)) = self.tween {
            let elapsed = now.saturating_duration_since(started);
            self.camera = tween.position_at(elapsed);
            if tween.is_finished(elapsed) {
                self.tween = None;
            }
        }
    }

    /// Dispose of everything still waiting, regardless of deadline
    pub fn flush(&mut self) {
        for removal in self.pending.drain(..) {
            if self.rooms.remove(&removal.room).is_some() {
                self.disposed += 1;
            }
        }
        if let Some((tween, _)) = self.tween.take() {
            self.camera = tween.to;
        }
    }

    pub fn live_rooms(&self) -> usize {
        self.rooms.len()
    }

    pub fn pending_removals(&self) -> usize {
        self.pending.len()
    }

    /// Most removals ever waiting at once
    pub fn peak_pending(&self) -> usize {
        self.peak_pending
    }

    pub fn disposed(&self) -> u64 {
        self.disposed
    }

    pub fn camera(&self) -> Vec3 {
        self.camera
    }
}

impl Presenter for ConsolePresenter {
    fn create_room(&mut self, position: Vec3) -> RoomHandle {
        let room = RoomHandle::new(self.next_id);
        self.next_id += 1;
        self.rooms.insert(room, position);
        info!(%room, %position, "room created");
        room
    }

    fn create_door(&mut self, room: RoomHandle, placement: DoorPlacement) {
        let Some(centre) = self.rooms.get(&room) else {
            warn!(%room, "door requested for unknown room");
            return;
        };
        info!(
            %room,
            kind = %placement.kind,
            door = %placement.door,
            at = %(*centre + placement.local_position),
            rotation = placement.rotation.degrees(),
            "door placed"
        );
    }

    fn schedule_removal(&mut self, room: RoomHandle, after: Duration) {
        debug!(%room, delay_ms = after.as_millis() as u64, "removal scheduled");
        self.pending.push_back(PendingRemoval {
            room,
            deadline: Instant::now() + after,
        });
        self.peak_pending = self.peak_pending.max(self.pending.len());
    }

    fn move_camera_to(&mut self, target: Vec3, duration: Duration, easing: Easing) {
        debug!(%target, ?duration, %easing, "camera moving");
        let tween = CameraTween::new(self.camera, target, duration, easing);
        self.tween = Some((tween, Instant::now()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removal_waits_for_deadline() {
        let mut presenter = ConsolePresenter::new(-10.0);
        let a = presenter.create_room(Vec3::ZERO);
        presenter.create_room(Vec3::new(12.0, 0.0, 0.0));
        presenter.schedule_removal(a, Duration::from_secs(60));

        presenter.update(Instant::now());
        assert_eq!(presenter.live_rooms(), 2);
        assert_eq!(presenter.pending_removals(), 1);

        presenter.update(Instant::now() + Duration::from_secs(61));
        assert_eq!(presenter.live_rooms(), 1);
        assert_eq!(presenter.pending_removals(), 0);
        assert_eq!(presenter.disposed(), 1);
    }

    #[test]
    fn test_flush_disposes_everything_pending() {
        let mut presenter = ConsolePresenter::new(-10.0);
        let a = presenter.create_room(Vec3::ZERO);
        let b = presenter.create_room(Vec3::new(0.0, 7.7, 0.0));
        presenter.schedule_removal(a, Duration::from_secs(60));
        presenter.schedule_removal(b, Duration::from_secs(60));
        assert_eq!(presenter.peak_pending(), 2);

        presenter.flush();
        assert_eq!(presenter.live_rooms(), 0);
        assert_eq!(presenter.disposed(), 2);
    }

    #[test]
    fn test_camera_reaches_target() {
        let mut presenter = ConsolePresenter::new(-10.0);
        let target = Vec3::new(12.0, 0.0, -10.0);
        presenter.move_camera_to(target, Duration::from_millis(200), Easing::OutCubic);
        presenter.update(Instant::now() + Duration::from_secs(1));
        assert_eq!(presenter.camera(), target);
    }
}
