use proptest::prelude::*;

use rc_core::{
    ChainConfig, DoorIndex, DoorKind, GameRng, RecordingPresenter, RoomChainGenerator,
    ScriptedRng, Vec3,
};

fn run_chain(seed: u64, advances: usize) -> (RoomChainGenerator, RecordingPresenter, Vec<DoorIndex>) {
    let mut generator = RoomChainGenerator::with_default_config();
    let mut presenter = RecordingPresenter::new();
    let mut rng = GameRng::new(seed);
    generator.initialize(&mut presenter);

    let mut doors = Vec::with_capacity(advances);
    for _ in 0..advances {
        let outcome = generator
            .advance(&mut presenter, &mut rng)
            .expect("honest rng never exhausts retries");
        doors.push(outcome.door);
    }
    (generator, presenter, doors)
}

#[test]
fn test_ten_seeded_advances_never_reverse() {
    let (generator, _, doors) = run_chain(2024, 10);
    assert_eq!(doors.len(), 10);
    for pair in doors.windows(2) {
        assert_ne!(pair[1], pair[0].opposite(), "chain folded back: {doors:?}");
    }
    assert_eq!(generator.rooms_generated(), 11);
}

#[test]
fn test_same_seed_same_chain() {
    let (a, _, doors_a) = run_chain(99, 25);
    let (b, _, doors_b) = run_chain(99, 25);
    assert_eq!(doors_a, doors_b);
    assert_eq!(
        a.current_room().unwrap().position,
        b.current_room().unwrap().position
    );
}

#[test]
fn test_forced_sequence_path() {
    let config = ChainConfig::default();
    let mut generator = RoomChainGenerator::new(config.clone()).unwrap();
    let mut presenter = RecordingPresenter::new();
    generator.initialize(&mut presenter);

    // Up, Right, (Left rejected) Right, Down
    let mut rng = ScriptedRng::new([1, 4, 3, 4, 2]);
    for _ in 0..4 {
        generator.advance(&mut presenter, &mut rng).unwrap();
    }

    let expected = Vec3::new(
        2.0 * config.horizontal_step(),
        config.vertical_step() - config.vertical_step(),
        0.0,
    );
    let position = generator.current_room().unwrap().position;
    assert!(position.approx_eq(expected, 1e-4), "{position}");
    assert_eq!(generator.total_rejections(), 1);
    assert_eq!(rng.consumed(), 5);
}

#[test]
fn test_every_advanced_room_gets_both_doors() {
    let (_, presenter, _) = run_chain(7, 12);
    let rooms: Vec<_> = presenter
        .events()
        .iter()
        .filter_map(|event| match event {
            rc_core::PresenterEvent::RoomCreated { room, .. } => Some(*room),
            _ => None,
        })
        .collect();
    assert_eq!(rooms.len(), 13);

    assert!(presenter.doors_of(rooms[0]).is_empty());
    for room in &rooms[1..] {
        let doors = presenter.doors_of(*room);
        assert_eq!(doors.len(), 2);
        assert_eq!(doors[0].kind, DoorKind::Entry);
        assert_eq!(doors[1].kind, DoorKind::Exit);
        assert_eq!(doors[1].door, doors[0].door.opposite());
    }
}

proptest! {
    #[test]
    fn prop_no_consecutive_reversal(seed in any::<u64>(), advances in 1usize..40) {
        let (_, _, doors) = run_chain(seed, advances);
        for pair in doors.windows(2) {
            prop_assert_ne!(pair[1], pair[0].opposite());
        }
    }

    #[test]
    fn prop_position_is_sum_of_offsets(seed in any::<u64>(), advances in 0usize..40) {
        let (generator, _, doors) = run_chain(seed, advances);
        let config = generator.config();
        let mut expected = Vec3::ZERO;
        for door in &doors {
            expected += door.room_offset(config);
        }
        let position = generator.current_room().unwrap().position;
        prop_assert!(position.approx_eq(expected, 1e-3));
    }

    #[test]
    fn prop_single_live_room(seed in any::<u64>(), advances in 0usize..30) {
        let (generator, presenter, _) = run_chain(seed, advances);
        let current = generator.current_room().unwrap().room;
        prop_assert_eq!(presenter.live_rooms(), vec![current]);
        prop_assert_eq!(generator.state().unwrap().previous_room, None);
        prop_assert_eq!(presenter.removals().len(), advances);
    }
}
