use serde::{Deserialize, Serialize};

use crate::tile_generator::FloorGroup;
use crate::tile_map::ItemType;

/// An edit request from the interaction layer. Coordinates are grid `(x, y)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum EditAction {
    PlaceTileSpan {
        start: (i32, i32),
        end: (i32, i32),
        group: FloorGroup,
        flipped: bool,
    },
    PreviewTileSpan {
        start: (i32, i32),
        end: (i32, i32),
        group: FloorGroup,
        flipped: bool,
        force_update: bool,
    },
    PlaceItem {
        pos: (i32, i32),
        item: ItemType,
    },
    PreviewItem {
        pos: (i32, i32),
        item: ItemType,
    },
    DemolishRect {
        min: (i32, i32),
        max: (i32, i32),
    },
    PreviewDemolish {
        min: (i32, i32),
        max: (i32, i32),
    },
    HidePreviews,
    DeselectAll,
}
