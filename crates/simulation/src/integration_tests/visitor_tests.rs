use bevy::prelude::*;

use crate::config::{ParkConfig, VisitorParams};
use crate::edit_actions::EditAction;
use crate::test_harness::TestPark;
use crate::tile_generator::FloorGroup;
use crate::tile_map::ItemType;
use crate::visitor::{VisitorSpawner, VisitorState};

/// Default park with the automatic spawner effectively off.
fn quiet_config() -> ParkConfig {
    ParkConfig {
        visitor: VisitorParams {
            spawn_interval: 1.0e6,
            ..VisitorParams::default()
        },
        ..ParkConfig::default()
    }
}

/// A walkway ring through both default entry columns (7 and 8).
fn ring_park(seed: u64) -> TestPark {
    TestPark::new()
        .with_seed(seed)
        .with_walkway((4, 0), (11, 0))
        .with_walkway((4, 1), (4, 6))
        .with_walkway((5, 6), (11, 6))
        .with_walkway((11, 5), (11, 1))
}

#[test]
fn spawner_releases_first_visitor_after_interval() {
    let mut park = TestPark::new();
    // Default interval is four seconds at 100 ms per tick.
    park.tick(38);
    assert_eq!(park.visitor_count(), 0);
    park.tick(3);
    assert_eq!(park.visitor_count(), 1);
    assert_eq!(park.resource::<VisitorSpawner>().spawned, 1);
}

#[test]
fn spawner_respects_visitor_cap() {
    let mut park = TestPark::with_config(ParkConfig {
        visitor: VisitorParams {
            spawn_interval: 0.5,
            max_visitors: 3,
            ..VisitorParams::default()
        },
        ..ParkConfig::default()
    });
    park.run_for(10.0);
    assert_eq!(park.visitor_count(), 3);
}

#[test]
fn park_without_entries_gets_no_visitors() {
    let mut park = TestPark::with_config(ParkConfig {
        entry_tiles: Vec::new(),
        ..ParkConfig::default()
    });
    park.run_for(20.0);
    assert_eq!(park.visitor_count(), 0);
    assert!(park.spawn_visitor().is_none());
}

#[test]
fn visitors_enter_and_wander_the_ring() {
    let mut park = ring_park(3).with_visitors(4);
    for _ in 0..60 {
        park.run_for(1.0);
        park.assert_visitors_on_walkways();
    }
    let visitors = park.visitors();
    assert!(visitors.len() >= 4);
    let inside = visitors
        .iter()
        .filter(|v| v.state == VisitorState::Walking && v.current_tile.y >= 0)
        .count();
    assert!(inside >= 4, "only {inside} visitors made it into the park");
    assert!(visitors.iter().all(|v| v.walking));
}

#[test]
fn visitors_wait_at_entry_until_a_walkway_is_built() {
    let mut park = TestPark::with_config(quiet_config()).with_visitors(2);
    park.run_for(5.0);
    for v in park.visitors() {
        assert!(!v.walking);
        assert_eq!(v.current_tile.y, -1);
    }

    park.edit(EditAction::PlaceTileSpan {
        start: (7, 0),
        end: (8, 0),
        group: FloorGroup::WalkwayOnGrass,
        flipped: false,
    });
    park.run_for(1.0);
    assert!(park.visitors().iter().all(|v| v.walking));
}

#[test]
fn same_seed_replays_the_same_walk() {
    let run = |seed| {
        let mut park = ring_park(seed).with_visitors(3);
        park.run_for(30.0);
        park.visitors()
            .iter()
            .map(|v| (v.position, v.current_tile))
            .collect::<Vec<(Vec2, IVec2)>>()
    };
    assert_eq!(run(11), run(11));
}

#[test]
fn edits_beside_the_path_do_not_disturb_visitors() {
    let mut park = ring_park(5).with_visitors(3);
    park.run_for(10.0);
    park.edit(EditAction::PlaceItem {
        pos: (7, 3),
        item: ItemType::Tree,
    });
    park.edit(EditAction::PlaceTileSpan {
        start: (13, 10),
        end: (15, 10),
        group: FloorGroup::WalkwayOnGrass,
        flipped: false,
    });
    park.assert_nav_in_sync();
    for _ in 0..20 {
        park.run_for(1.0);
        park.assert_visitors_on_walkways();
    }
}
