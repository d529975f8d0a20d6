use bevy::prelude::*;

use crate::config::ParkConfig;
use crate::edit_actions::{
    EditAction, EditError, EditKind, EditRecord, EditResult, EditResultLog, EditSource,
};
use crate::map_navigation::PathType;
use crate::test_harness::TestPark;
use crate::tile_generator::{FloorGroup, FloorType};
use crate::tile_map::{ItemType, MapCell, TileMapChange};

fn walkway(start: (i32, i32), end: (i32, i32)) -> EditAction {
    EditAction::PlaceTileSpan {
        start,
        end,
        group: FloorGroup::WalkwayOnGrass,
        flipped: false,
    }
}

#[test]
fn empty_park_boots_with_grass_and_no_visitors() {
    let mut park = TestPark::new();
    assert_eq!(park.map().size(), IVec2::new(16, 16));
    assert!(park.map().cells().all(|(_, c)| *c == MapCell::BASE));
    assert_eq!(park.nav().map_size(), IVec2::new(16, 16));
    assert_eq!(park.visitor_count(), 0);
    assert!(park.resource::<EditResultLog>().is_empty());
}

#[test]
fn invalid_config_falls_back_to_defaults() {
    let park = TestPark::with_config(ParkConfig {
        map_width: 0,
        ..ParkConfig::default()
    });
    assert_eq!(*park.config(), ParkConfig::default());
    assert_eq!(park.map().size(), IVec2::new(16, 16));
}

#[test]
fn queued_span_updates_map_and_navigation() {
    let mut park = TestPark::new();
    let result = park.edit(walkway((7, 0), (7, 4)));
    assert_eq!(result, Some(EditResult::Success { changed: 5 }));

    for y in 0..=4 {
        assert_eq!(park.map().tile_group_at(IVec2::new(7, y)), FloorGroup::WalkwayOnGrass);
    }
    // The entry cell connects downwards to the street lane.
    assert_eq!(park.map().tile_at(IVec2::new(7, 0)).1, FloorType::VertLane);
    assert_eq!(park.nav().path_type_at(IVec2::new(7, 2)), PathType::Straight);
    park.assert_nav_in_sync();
}

#[test]
fn queued_edits_run_in_order_within_one_update() {
    let mut park = TestPark::new();
    park.push_edit(walkway((2, 2), (5, 2)));
    park.push_edit(EditAction::PlaceItem {
        pos: (3, 3),
        item: ItemType::Tree,
    });
    park.push_edit(EditAction::DemolishRect {
        min: (2, 2),
        max: (3, 3),
    });
    park.tick(1);

    let log = park.resource::<EditResultLog>();
    let results: Vec<usize> = log.recent(3).map(EditRecord::committed_cells).collect();
    assert_eq!(results, vec![4, 1, 3]);
    assert!(log.recent(3).all(|r| r.source == EditSource::Script));
    let kinds: Vec<EditKind> = log.recent(3).map(|r| r.kind).collect();
    assert_eq!(
        kinds,
        vec![EditKind::PlaceTileSpan, EditKind::PlaceItem, EditKind::Demolish]
    );
    assert_eq!(park.map().tile_group_at(IVec2::new(2, 2)), FloorGroup::Grass);
    assert_eq!(park.map().tile_group_at(IVec2::new(4, 2)), FloorGroup::WalkwayOnGrass);
    assert_eq!(park.map().item_type_at(IVec2::new(3, 3)), ItemType::None);
    park.assert_nav_in_sync();
}

#[test]
fn span_then_demolish_round_trip() {
    let mut park = TestPark::new();
    park.edit(walkway((1, 1), (6, 4)));
    park.edit(EditAction::DemolishRect {
        min: (1, 1),
        max: (6, 4),
    });
    assert!(park.map().cells().all(|(_, c)| *c == MapCell::BASE));
    for (pos, _) in park.map().cells() {
        assert_eq!(park.nav().path_type_at(pos), PathType::Empty);
    }
}

#[test]
fn previews_leave_the_map_untouched() {
    let mut park = TestPark::new();
    park.edit(walkway((3, 3), (3, 6)));
    let before: Vec<MapCell> = park.map().cells().map(|(_, c)| *c).collect();
    let changes_before = park.map().pending_changes().len();

    park.edit(EditAction::PreviewTileSpan {
        start: (0, 5),
        end: (6, 5),
        group: FloorGroup::WalkwayOnGrass,
        flipped: false,
        force_update: false,
    });
    assert!(!park.map().preview_tiles().is_empty());
    park.edit(EditAction::PreviewDemolish {
        min: (3, 3),
        max: (3, 6),
    });
    assert_eq!(park.map().selection().len(), 4);
    park.edit(EditAction::HidePreviews);
    park.edit(EditAction::DeselectAll);

    let after: Vec<MapCell> = park.map().cells().map(|(_, c)| *c).collect();
    assert_eq!(before, after);
    assert_eq!(park.map().pending_changes().len(), changes_before);
    assert!(park.map().preview_tiles().is_empty());
    assert!(park.map().selection().is_empty());
}

#[test]
fn refused_edits_are_logged() {
    let mut park = TestPark::new().with_item((4, 4), ItemType::Wall);
    assert_eq!(
        park.edit(walkway((4, 4), (4, 8))),
        Some(EditResult::Error(EditError::Refused))
    );
    assert_eq!(
        park.edit(walkway((4, 4), (40, 4))),
        Some(EditResult::Error(EditError::OutOfBounds))
    );
    assert_eq!(
        park.edit(EditAction::PlaceItem {
            pos: (4, 4),
            item: ItemType::Tree,
        }),
        Some(EditResult::Error(EditError::Occupied))
    );
    let log = park.resource::<EditResultLog>();
    assert_eq!(log.len(), 3);
    assert!(log
        .recent(3)
        .all(|r| !r.result.is_success() && r.committed_cells() == 0));
    assert!(park
        .map()
        .pending_changes()
        .iter()
        .all(|c| matches!(c, TileMapChange::ItemPlaced(..))));
}
