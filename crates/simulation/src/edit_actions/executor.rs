//! Drains the [`EditQueue`] every update and applies each [`EditAction`] to
//! the tile map, recording results in the [`EditResultLog`].

use bevy::prelude::*;

use crate::map_navigation::MapNavigation;
use crate::tile_generator::FloorGroup;
use crate::tile_map::{ItemType, TileMap};

use super::result_log::EditResultLog;
use super::{EditAction, EditError, EditQueue, EditResult};

pub fn execute_edit_actions(
    mut queue: ResMut<EditQueue>,
    mut log: ResMut<EditResultLog>,
    mut map: ResMut<TileMap>,
    mut nav: ResMut<MapNavigation>,
) {
    for queued in queue.drain() {
        let result = execute_single(&queued.action, &mut map, &mut nav);
        if let EditResult::Error(e) = &result {
            debug!("{:?} edit {:?} failed: {:?}", queued.source, queued.action, e);
        }
        log.record(queued.source, &queued.action, result);
    }
}

pub fn execute_single(action: &EditAction, map: &mut TileMap, nav: &mut MapNavigation) -> EditResult {
    match action {
        EditAction::PlaceTileSpan {
            start,
            end,
            group,
            flipped,
        } => place_tile_span(*start, *end, *group, *flipped, map, nav),
        EditAction::PreviewTileSpan {
            start,
            end,
            group,
            flipped,
            force_update,
        } => {
            let (a, b) = match corners_check(map, *start, *end) {
                Ok(corners) => corners,
                Err(e) => return e,
            };
            let changed = map.show_temporary_tile_span(a, b, *group, *flipped, *force_update);
            EditResult::Success { changed }
        }
        EditAction::PlaceItem { pos, item } => place_item(*pos, *item, map),
        EditAction::PreviewItem { pos, item } => {
            let pos = match bounds_check(map, *pos) {
                Ok(p) => p,
                Err(e) => return e,
            };
            let shown = map.show_temporary_model(pos, *item);
            EditResult::Success {
                changed: usize::from(shown),
            }
        }
        EditAction::DemolishRect { min, max } => {
            let (a, b) = match corners_check(map, *min, *max) {
                Ok(corners) => corners,
                Err(e) => return e,
            };
            let changed = map.demolish_objects(nav, a, b);
            EditResult::Success { changed }
        }
        EditAction::PreviewDemolish { min, max } => {
            map.show_demolish_objects(IVec2::new(min.0, min.1), IVec2::new(max.0, max.1));
            EditResult::Success {
                changed: map.selection().len(),
            }
        }
        EditAction::HidePreviews => {
            map.hide_temporary_models();
            EditResult::Success { changed: 0 }
        }
        EditAction::DeselectAll => {
            map.deselect_all();
            EditResult::Success { changed: 0 }
        }
    }
}

fn bounds_check(map: &TileMap, (x, y): (i32, i32)) -> Result<IVec2, EditResult> {
    let pos = IVec2::new(x, y);
    if map.in_bounds(pos) {
        Ok(pos)
    } else {
        Err(EditResult::Error(EditError::OutOfBounds))
    }
}

fn corners_check(
    map: &TileMap,
    a: (i32, i32),
    b: (i32, i32),
) -> Result<(IVec2, IVec2), EditResult> {
    Ok((bounds_check(map, a)?, bounds_check(map, b)?))
}

fn place_tile_span(
    start: (i32, i32),
    end: (i32, i32),
    group: FloorGroup,
    flipped: bool,
    map: &mut TileMap,
    nav: &mut MapNavigation,
) -> EditResult {
    let (a, b) = match corners_check(map, start, end) {
        Ok(corners) => corners,
        Err(e) => return e,
    };
    if group == FloorGroup::None || group == FloorGroup::BASE {
        return EditResult::Error(EditError::InvalidGroup);
    }
    match map.place_tile_span(nav, a, b, group, flipped) {
        0 => EditResult::Error(EditError::Refused),
        changed => EditResult::Success { changed },
    }
}

fn place_item(pos: (i32, i32), item: ItemType, map: &mut TileMap) -> EditResult {
    let pos = match bounds_check(map, pos) {
        Ok(p) => p,
        Err(e) => return e,
    };
    if item == ItemType::None {
        return EditResult::Error(EditError::InvalidItem);
    }
    if map.place_model(pos, item) {
        EditResult::Success { changed: 1 }
    } else {
        EditResult::Error(EditError::Occupied)
    }
}
