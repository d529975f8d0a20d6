//! Authoritative park grid.
//!
//! `TileMap` owns the terrain (`group`, `floor`) and item layers, resolves
//! span placement through a scratch [`overlay::Overlay`], and keeps
//! [`MapNavigation`](crate::map_navigation::MapNavigation) in step with the
//! walkway cells. It never touches the scene directly: every visible change
//! is pushed as a [`TileMapChange`] and the rendering layer drains them.

mod demolish;
mod ground;
mod items;
pub mod overlay;
mod selection;
mod span;


use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub use ground::{OuterGround, ENDING_ROWS, EXTRA_ROWS, GROUND_ROWS, SKIP_ROWS};
pub use items::ItemPreview;
pub use selection::{SceneObject, Selection, SelectionDiff};

use crate::config::ParkConfig;
use crate::grid::{Grid, TileSides};
use crate::tile_generator::{FloorGroup, FloorType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ItemType {
    #[default]
    None,
    Tree,
    Wall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapCell {
    pub group: FloorGroup,
    pub floor: FloorType,
}

impl MapCell {
    pub const BASE: MapCell = MapCell {
        group: FloorGroup::BASE,
        floor: FloorType::FullTile,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ItemCell {
    pub item: ItemType,
    pub origin: IVec2,
}

/// A scene-visible change recorded by an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileMapChange {
    /// The tile at a cell got a new `(group, floor)`.
    Tile(IVec2),
    ItemPlaced(IVec2, ItemType),
    ItemRemoved(IVec2),
}

/// A tile shown by the current placement preview, drawn over the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewTile {
    pub pos: IVec2,
    pub group: FloorGroup,
    pub floor: FloorType,
    /// True for cells being placed, false for neighbours whose border changes.
    pub placement: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SpanKey {
    a: IVec2,
    b: IVec2,
    group: FloorGroup,
    flipped: bool,
}

#[derive(Resource, Debug, Clone)]
pub struct TileMap {
    tiles: Grid<MapCell>,
    items: Grid<ItemCell>,
    entry_tiles: Vec<i32>,
    tile_dimension: f32,

    preview_key: Option<SpanKey>,
    preview_count: usize,
    preview_tiles: Vec<PreviewTile>,

    item_preview_key: Option<(IVec2, ItemType)>,
    item_previews: Vec<ItemPreview>,

    selection: Selection,
    selection_diffs: Vec<SelectionDiff>,
    changes: Vec<TileMapChange>,
}

impl TileMap {
    /// A map of `config.map_size()` grass tiles.
    pub fn new(config: &ParkConfig) -> Self {
        let size = config.map_size();
        Self {
            tiles: Grid::new(size.x, size.y, MapCell::BASE),
            items: Grid::new(size.x, size.y, ItemCell::default()),
            entry_tiles: config.entry_tiles.clone(),
            tile_dimension: config.tile_dimension,
            preview_key: None,
            preview_count: 0,
            preview_tiles: Vec::new(),
            item_preview_key: None,
            item_previews: Vec::new(),
            selection: Selection::default(),
            selection_diffs: Vec::new(),
            changes: Vec::new(),
        }
    }

    pub fn size(&self) -> IVec2 {
        self.tiles.size()
    }

    pub fn in_bounds(&self, pos: IVec2) -> bool {
        self.tiles.in_bounds(pos)
    }

    pub fn tile_dimension(&self) -> f32 {
        self.tile_dimension
    }

    pub fn entry_tiles(&self) -> &[i32] {
        &self.entry_tiles
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Group at `pos`, `FloorGroup::None` outside the map.
    pub fn tile_group_at(&self, pos: IVec2) -> FloorGroup {
        self.tiles.at(pos).map_or(FloorGroup::None, |c| c.group)
    }

    /// `(group, floor)` at `pos`, `(None, FullTile)` outside the map.
    pub fn tile_at(&self, pos: IVec2) -> (FloorGroup, FloorType) {
        self.tiles
            .at(pos)
            .map_or((FloorGroup::None, FloorType::FullTile), |c| (c.group, c.floor))
    }

    pub fn item_type_at(&self, pos: IVec2) -> ItemType {
        self.items.at(pos).map_or(ItemType::None, |c| c.item)
    }

    pub fn item_at(&self, pos: IVec2) -> Option<&ItemCell> {
        self.items.at(pos).filter(|c| c.item != ItemType::None)
    }

    /// Neighbours of `pos` in `group`. Cells on the bottom row above an entry
    /// column also connect downwards, to the lane outside the park.
    pub fn tile_sides_for_position(&self, pos: IVec2, group: FloorGroup) -> TileSides {
        let mut sides = self.tiles.sides_matching(pos, |c| c.group == group);
        if pos.y == 0 && self.entry_tiles.contains(&pos.x) {
            sides |= TileSides::BOTTOM;
        }
        sides
    }

    /// Iterates every cell as `(pos, cell)`, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (IVec2, &MapCell)> + '_ {
        self.tiles.iter()
    }

    pub fn placed_items(&self) -> impl Iterator<Item = (IVec2, ItemType)> + '_ {
        self.items
            .iter()
            .filter(|(_, c)| c.item != ItemType::None)
            .map(|(p, c)| (p, c.item))
    }

    // -----------------------------------------------------------------------
    // World coordinates
    // -----------------------------------------------------------------------

    /// World position of the corner of a tile (its model origin).
    pub fn tile_world_position(&self, pos: IVec2) -> Vec3 {
        Vec3::new(
            pos.x as f32 * self.tile_dimension,
            0.0,
            pos.y as f32 * self.tile_dimension,
        )
    }

    /// Cell under a point on the ground plane, if it is inside the map.
    pub fn tile_at_world(&self, point: Vec3) -> Option<IVec2> {
        let extent = self.size().as_vec2() * self.tile_dimension;
        if point.x < 0.0 || point.z < 0.0 || point.x > extent.x || point.z > extent.y {
            return None;
        }
        let pos = (Vec2::new(point.x, point.z) / self.tile_dimension)
            .floor()
            .as_ivec2()
            .min(self.size() - IVec2::ONE);
        Some(pos)
    }

    /// Cell where `ray` meets the ground plane.
    pub fn find_tile_position(&self, ray: Ray3d) -> Option<IVec2> {
        let distance = ray.intersect_plane(Vec3::ZERO, InfinitePlane3d::new(Vec3::Y))?;
        self.tile_at_world(ray.get_point(distance))
    }

    // -----------------------------------------------------------------------
    // Previews, selection and change queue
    // -----------------------------------------------------------------------

    pub fn preview_tiles(&self) -> &[PreviewTile] {
        &self.preview_tiles
    }

    pub fn item_previews(&self) -> &[ItemPreview] {
        &self.item_previews
    }

    /// Clears the tile preview and hides any item preview.
    pub fn hide_temporary_models(&mut self) {
        self.preview_tiles.clear();
        self.preview_key = None;
        self.preview_count = 0;
        self.item_preview_key = None;
        for preview in &mut self.item_previews {
            preview.visible = false;
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn deselect_all(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        let diff = self.selection.deselect_all();
        self.selection_diffs.push(diff);
    }

    fn select(&mut self, objects: std::collections::HashSet<SceneObject>) {
        let diff = self.selection.select(objects);
        if !diff.is_empty() {
            self.selection_diffs.push(diff);
        }
    }

    pub fn has_selection_diffs(&self) -> bool {
        !self.selection_diffs.is_empty()
    }

    pub fn drain_selection_diffs(&mut self) -> Vec<SelectionDiff> {
        std::mem::take(&mut self.selection_diffs)
    }

    pub fn pending_changes(&self) -> &[TileMapChange] {
        &self.changes
    }

    pub fn drain_changes(&mut self) -> Vec<TileMapChange> {
        std::mem::take(&mut self.changes)
    }

    fn set_tile(&mut self, pos: IVec2, group: FloorGroup, floor: FloorType) {
        if let Some(cell) = self.tiles.at_mut(pos) {
            *cell = MapCell { group, floor };
            self.changes.push(TileMapChange::Tile(pos));
        }
    }
}

impl FromWorld for TileMap {
    fn from_world(world: &mut World) -> Self {
        match world.get_resource::<ParkConfig>() {
            Some(config) => Self::new(config),
            None => Self::new(&ParkConfig::default()),
        }
    }
}
