//! Span placement: dragging a terrain group from corner A to corner B.

use bevy::prelude::*;

use crate::map_navigation::MapNavigation;
use crate::tile_generator::{floor_type_for_sides, FloorGroup};

use super::overlay::{Overlay, CHANGING, UNAFFECTED};
use super::{ItemType, PreviewTile, SpanKey, TileMap};

/// Cells of the L-shaped trace from `a` to `b`. The first leg runs along the
/// longer axis unless `flipped`; the corner cell appears in both legs.
pub fn span_cells(a: IVec2, b: IVec2, flipped: bool) -> Vec<IVec2> {
    let d = b - a;
    let horizontal_first = (d.x.abs() >= d.y.abs()) ^ flipped;
    let step = |from: i32, to: i32| -> Vec<i32> {
        if from <= to {
            (from..=to).collect()
        } else {
            (to..=from).rev().collect()
        }
    };
    let mut cells = Vec::new();
    if horizontal_first {
        cells.extend(step(a.x, b.x).into_iter().map(|x| IVec2::new(x, a.y)));
        cells.extend(step(a.y, b.y).into_iter().map(|y| IVec2::new(b.x, y)));
    } else {
        cells.extend(step(a.y, b.y).into_iter().map(|y| IVec2::new(a.x, y)));
        cells.extend(step(a.x, b.x).into_iter().map(|x| IVec2::new(x, b.y)));
    }
    cells
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum SpanMode {
    Preview,
    Commit,
}

impl TileMap {
    /// Places `group` along the span and returns how many cells were plotted.
    pub fn place_tile_span(
        &mut self,
        nav: &mut MapNavigation,
        a: IVec2,
        b: IVec2,
        group: FloorGroup,
        flipped: bool,
    ) -> usize {
        self.hide_temporary_models();
        self.resolve_span(Some(nav), a, b, group, flipped, SpanMode::Commit)
    }

    /// Previews a single tile. Returns whether anything would change.
    pub fn show_temporary_tile(&mut self, pos: IVec2, group: FloorGroup) -> bool {
        self.show_temporary_tile_span(pos, pos, group, false, false) > 0
    }

    /// Previews a span. Repeating the previous request is free unless
    /// `force_update` is set.
    pub fn show_temporary_tile_span(
        &mut self,
        a: IVec2,
        b: IVec2,
        group: FloorGroup,
        flipped: bool,
        force_update: bool,
    ) -> usize {
        let key = SpanKey {
            a,
            b,
            group,
            flipped,
        };
        if !force_update && self.preview_key == Some(key) {
            return self.preview_count;
        }
        self.hide_temporary_models();
        let count = self.resolve_span(None, a, b, group, flipped, SpanMode::Preview);
        self.preview_key = Some(key);
        self.preview_count = count;
        count
    }

    fn resolve_span(
        &mut self,
        mut nav: Option<&mut MapNavigation>,
        a: IVec2,
        b: IVec2,
        group: FloorGroup,
        flipped: bool,
        mode: SpanMode,
    ) -> usize {
        // Reverting to the base group is demolition's job.
        if group == FloorGroup::None || group == FloorGroup::BASE {
            return 0;
        }
        if !self.in_bounds(a)
            || !self.in_bounds(b)
            || self.tile_group_at(a) == group
            || self.item_type_at(a) != ItemType::None
        {
            return 0;
        }

        let mut overlay = Overlay::spanning(a, b);
        let mut count = 0;
        for pos in span_cells(a, b, flipped) {
            if self.tile_group_at(pos) != group
                && self.item_type_at(pos) == ItemType::None
                && overlay.plot(pos)
            {
                count += 1;
            }
        }

        let mut updates = Vec::new();
        for (pos, state) in overlay.marked() {
            if state == UNAFFECTED || !self.in_bounds(pos) {
                continue;
            }
            if state != CHANGING && self.tile_group_at(pos) != group {
                continue;
            }
            let sides =
                self.tile_sides_for_position(pos, group) | overlay.changing_sides(pos);
            let floor = floor_type_for_sides(sides);
            if self.tile_at(pos) != (group, floor) {
                updates.push(PreviewTile {
                    pos,
                    group,
                    floor,
                    placement: state == CHANGING,
                });
            }
        }

        match mode {
            SpanMode::Preview => self.preview_tiles = updates,
            SpanMode::Commit => {
                if let Some(nav) = nav.as_deref_mut() {
                    nav.begin_change();
                }
                for tile in updates {
                    let old_group = self.tile_group_at(tile.pos);
                    self.set_tile(tile.pos, tile.group, tile.floor);
                    if let Some(nav) = nav.as_deref_mut() {
                        if tile.placement
                            && old_group != FloorGroup::PATH
                            && tile.group == FloorGroup::PATH
                        {
                            nav.add_path(tile.pos);
                        }
                    }
                }
                if let Some(nav) = nav.as_deref_mut() {
                    nav.end_change();
                }
            }
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(v: &[(i32, i32)]) -> Vec<IVec2> {
        v.iter().map(|&(x, y)| IVec2::new(x, y)).collect()
    }

    #[test]
    fn test_span_single_cell() {
        assert_eq!(
            span_cells(IVec2::new(2, 3), IVec2::new(2, 3), false),
            cells(&[(2, 3), (2, 3)])
        );
    }

    #[test]
    fn test_span_horizontal_first_when_wider() {
        let got = span_cells(IVec2::new(0, 0), IVec2::new(3, 1), false);
        assert_eq!(got, cells(&[(0, 0), (1, 0), (2, 0), (3, 0), (3, 0), (3, 1)]));
    }

    #[test]
    fn test_span_flipped_goes_vertical_first() {
        let got = span_cells(IVec2::new(0, 0), IVec2::new(3, 1), true);
        assert_eq!(got, cells(&[(0, 0), (0, 1), (0, 1), (1, 1), (2, 1), (3, 1)]));
    }

    #[test]
    fn test_span_runs_backwards() {
        let got = span_cells(IVec2::new(2, 2), IVec2::new(2, 0), false);
        assert_eq!(got, cells(&[(2, 2), (2, 1), (2, 0), (2, 0)]));
    }
}
