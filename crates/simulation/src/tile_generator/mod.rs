//! Procedural floor meshes.
//!
//! Every valid `(FloorGroup, FloorType)` pair gets one flat, textured model
//! built once at startup from the atlas pieces. Models are 1x1 tiles in the
//! XZ plane spanning `[0, T]` on both axes, where `T` is the tile dimension.

mod atlas;
mod classifier;
mod layout;
mod mesh;
mod types;


use std::collections::HashMap;

use bevy::prelude::*;

pub use atlas::{atlas_rect, floor_types, AtlasRect};
pub use classifier::floor_type_for_sides;
pub use layout::{compose, overlay_pieces, PixelQuad};
pub use mesh::TileMesh;
pub use types::{FloorGroup, FloorType, TexType};

use crate::config::ParkConfig;

#[derive(Resource, Debug, Clone)]
pub struct TileGenerator {
    tile_dimension: f32,
    models: HashMap<(FloorGroup, FloorType), TileMesh>,
}

impl TileGenerator {
    pub fn new(tile_dimension: f32) -> Self {
        let mut models = HashMap::new();
        for group in [FloorGroup::Grass, FloorGroup::WalkwayOnGrass] {
            for &floor in floor_types(group) {
                if let Some(quads) = compose(group, floor) {
                    models.insert((group, floor), TileMesh::from_quads(&quads, tile_dimension));
                }
            }
        }
        Self {
            tile_dimension,
            models,
        }
    }

    pub fn tile_dimension(&self) -> f32 {
        self.tile_dimension
    }

    /// Prebuilt model for a pair. Asking for a pair the group does not
    /// generate is a programming error.
    pub fn get_model(&self, group: FloorGroup, floor: FloorType) -> &TileMesh {
        match self.try_model(group, floor) {
            Some(mesh) => mesh,
            None => panic!("no tile model for {group:?}/{floor:?}"),
        }
    }

    /// Model for a pair, or `None` when the group does not generate it.
    pub fn try_model(&self, group: FloorGroup, floor: FloorType) -> Option<&TileMesh> {
        self.models.get(&(group, floor))
    }

    /// Combines a row-major `width` x `height` block of tiles into one mesh.
    /// Cell `(x, y)` is offset by `(x*T, 0, y*T)`; `FloorGroup::None` cells
    /// are left out.
    pub fn create_model(
        &self,
        tiles: &[(FloorGroup, FloorType)],
        width: i32,
        height: i32,
    ) -> TileMesh {
        assert_eq!(
            tiles.len(),
            (width.max(0) * height.max(0)) as usize,
            "tile block size mismatch"
        );
        let mut out = TileMesh::new();
        for y in 0..height {
            for x in 0..width {
                let (group, floor) = tiles[(y * width + x) as usize];
                if group == FloorGroup::None {
                    continue;
                }
                let offset = Vec3::new(
                    x as f32 * self.tile_dimension,
                    0.0,
                    y as f32 * self.tile_dimension,
                );
                out.append(self.get_model(group, floor), offset);
            }
        }
        out
    }
}

impl FromWorld for TileGenerator {
    fn from_world(world: &mut World) -> Self {
        let tile_dimension = world
            .get_resource::<ParkConfig>()
            .map_or(ParkConfig::default().tile_dimension, |c| c.tile_dimension);
        Self::new(tile_dimension)
    }
}
