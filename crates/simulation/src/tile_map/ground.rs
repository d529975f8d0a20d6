//! The strip of ground in front of the park.
//!
//! Seen from the park looking down (towards -Z) the strip has four grass rows
//! with walkway lanes under each entry column, five empty rows where the
//! street goes, and three more grass rows. Rows are listed from the far end.

use bevy::prelude::*;

use crate::grid::TileSides;
use crate::tile_generator::{floor_type_for_sides, FloorGroup, FloorType, TileGenerator, TileMesh};

use super::TileMap;

pub const ENDING_ROWS: i32 = 3;
pub const SKIP_ROWS: i32 = 5;
pub const EXTRA_ROWS: i32 = 4;
pub const GROUND_ROWS: i32 = ENDING_ROWS + SKIP_ROWS + EXTRA_ROWS;

#[derive(Debug, Clone, PartialEq)]
pub struct OuterGround {
    pub width: i32,
    pub height: i32,
    /// Row-major cells, row 0 furthest from the park.
    pub cells: Vec<(FloorGroup, FloorType)>,
    /// World position of the strip's corner.
    pub origin: Vec3,
}

impl OuterGround {
    pub fn cell(&self, x: i32, row: i32) -> (FloorGroup, FloorType) {
        self.cells[(row * self.width + x) as usize]
    }

    pub fn build_mesh(&self, generator: &TileGenerator) -> TileMesh {
        generator.create_model(&self.cells, self.width, self.height)
    }
}

impl TileMap {
    pub fn outer_ground(&self) -> OuterGround {
        let width = self.size().x;
        let grass = (FloorGroup::BASE, FloorType::FullTile);
        let empty = (FloorGroup::None, FloorType::FullTile);
        let lane = (
            FloorGroup::PATH,
            floor_type_for_sides(TileSides::TOP | TileSides::BOTTOM),
        );

        let mut cells = Vec::with_capacity((width * GROUND_ROWS).max(0) as usize);
        for row in 0..GROUND_ROWS {
            for x in 0..width {
                let cell = if row < ENDING_ROWS {
                    grass
                } else if row < ENDING_ROWS + SKIP_ROWS {
                    empty
                } else if self.entry_tiles.contains(&x) {
                    lane
                } else {
                    grass
                };
                cells.push(cell);
            }
        }

        OuterGround {
            width,
            height: GROUND_ROWS,
            cells,
            origin: Vec3::new(0.0, 0.0, -self.tile_dimension * GROUND_ROWS as f32),
        }
    }
}
