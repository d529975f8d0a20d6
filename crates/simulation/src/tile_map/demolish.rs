//! Rectangle demolition and its selection preview.

use std::collections::HashSet;

use bevy::prelude::*;

use crate::map_navigation::MapNavigation;
use crate::tile_generator::{floor_type_for_sides, FloorGroup, FloorType};

use super::overlay::{Overlay, NEIGHBOR};
use super::{ItemType, SceneObject, TileMap};

impl TileMap {
    /// In-bounds cells of the rectangle spanned by `a` and `b`.
    fn rect_cells(&self, a: IVec2, b: IVec2) -> Vec<IVec2> {
        let min = a.min(b).max(IVec2::ZERO);
        let max = a.max(b).min(self.size() - IVec2::ONE);
        let mut cells = Vec::new();
        for y in min.y..=max.y {
            for x in min.x..=max.x {
                cells.push(IVec2::new(x, y));
            }
        }
        cells
    }

    /// Selects everything `demolish_objects(a, b)` would remove.
    pub fn show_demolish_objects(&mut self, a: IVec2, b: IVec2) {
        self.hide_temporary_models();
        if !self.in_bounds(a) {
            self.deselect_all();
            return;
        }
        let mut objects = HashSet::new();
        for pos in self.rect_cells(a, b) {
            if self.item_type_at(pos) != ItemType::None {
                objects.insert(SceneObject::Item(pos));
            } else if self.tile_group_at(pos) != FloorGroup::BASE {
                objects.insert(SceneObject::Tile(pos));
            }
        }
        self.select(objects);
    }

    /// Removes items and reverts non-grass tiles inside the rectangle.
    /// Returns the number of cells that changed.
    pub fn demolish_objects(&mut self, nav: &mut MapNavigation, a: IVec2, b: IVec2) -> usize {
        self.hide_temporary_models();
        let cells = self.rect_cells(a, b);
        let mut changed: HashSet<IVec2> = HashSet::new();
        let (Some(&first), Some(&last)) = (cells.first(), cells.last()) else {
            self.deselect_all();
            return 0;
        };
        let mut overlay = Overlay::spanning(first, last);

        for &pos in &cells {
            if self.clear_item(pos) {
                changed.insert(pos);
            }
        }

        nav.begin_change();
        for &pos in &cells {
            let old_group = self.tile_group_at(pos);
            if old_group == FloorGroup::BASE || old_group == FloorGroup::None {
                continue;
            }
            self.set_tile(pos, FloorGroup::BASE, FloorType::FullTile);
            overlay.plot(pos);
            changed.insert(pos);
            if old_group == FloorGroup::PATH {
                nav.remove_path(pos);
            }
        }
        nav.end_change();

        // Borders of surviving tiles next to the hole.
        let neighbours: Vec<IVec2> = overlay
            .marked()
            .filter(|(_, state)| *state == NEIGHBOR)
            .map(|(pos, _)| pos)
            .collect();
        for pos in neighbours {
            let group = self.tile_group_at(pos);
            if group == FloorGroup::BASE || group == FloorGroup::None {
                continue;
            }
            let floor = floor_type_for_sides(self.tile_sides_for_position(pos, group));
            if self.tile_at(pos) != (group, floor) {
                self.set_tile(pos, group, floor);
            }
        }

        self.deselect_all();
        changed.len()
    }
}
