//! Scratch grid used while an edit is being resolved.
//!
//! Covers the edit's bounding box plus a one-cell margin, so every plotted
//! cell has all 8 neighbours inside the overlay.

use bevy::prelude::*;

use crate::grid::{Grid, Neighbor, TileSides};

pub const UNAFFECTED: u8 = 0;
pub const NEIGHBOR: u8 = 1;
pub const CHANGING: u8 = 2;

#[derive(Debug, Clone)]
pub struct Overlay {
    origin: IVec2,
    cells: Grid<u8>,
}

impl Overlay {
    /// Overlay for the rectangle spanned by `a` and `b` (in any order).
    pub fn spanning(a: IVec2, b: IVec2) -> Self {
        let size = (a - b).abs() + IVec2::splat(3);
        Self {
            origin: a.min(b) - IVec2::ONE,
            cells: Grid::new(size.x, size.y, UNAFFECTED),
        }
    }

    pub fn origin(&self) -> IVec2 {
        self.origin
    }

    pub fn size(&self) -> IVec2 {
        self.cells.size()
    }

    /// State of map cell `pos`; cells outside the overlay are unaffected.
    pub fn state(&self, pos: IVec2) -> u8 {
        self.cells
            .at(pos - self.origin)
            .copied()
            .unwrap_or(UNAFFECTED)
    }

    /// Marks map cell `pos` as changing and its neighbours as affected.
    /// Returns false if the cell was already marked changing.
    pub fn plot(&mut self, pos: IVec2) -> bool {
        let local = pos - self.origin;
        let Some(cell) = self.cells.at_mut(local) else {
            return false;
        };
        if *cell == CHANGING {
            return false;
        }
        *cell = CHANGING;
        for n in Neighbor::ALL {
            if let Some(c) = self.cells.at_mut(local + n.offset()) {
                *c = (*c).max(NEIGHBOR);
            }
        }
        true
    }

    /// Neighbours of map cell `pos` that are being changed.
    pub fn changing_sides(&self, pos: IVec2) -> TileSides {
        self.cells
            .sides_matching(pos - self.origin, |s| *s == CHANGING)
    }

    /// Every marked cell as `(map position, state)`.
    pub fn marked(&self) -> impl Iterator<Item = (IVec2, u8)> + '_ {
        self.cells
            .iter()
            .filter(|(_, s)| **s != UNAFFECTED)
            .map(move |(local, s)| (local + self.origin, *s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_bounds_include_margin() {
        let o = Overlay::spanning(IVec2::new(5, 2), IVec2::new(3, 4));
        assert_eq!(o.origin(), IVec2::new(2, 1));
        assert_eq!(o.size(), IVec2::new(5, 5));
    }

    #[test]
    fn test_plot_marks_neighbours_without_downgrading() {
        let mut o = Overlay::spanning(IVec2::new(1, 1), IVec2::new(2, 1));
        assert!(o.plot(IVec2::new(1, 1)));
        assert!(o.plot(IVec2::new(2, 1)));
        assert!(!o.plot(IVec2::new(2, 1)));
        assert_eq!(o.state(IVec2::new(1, 1)), CHANGING);
        assert_eq!(o.state(IVec2::new(2, 1)), CHANGING);
        assert_eq!(o.state(IVec2::new(0, 0)), NEIGHBOR);
        assert_eq!(o.state(IVec2::new(3, 2)), NEIGHBOR);
        assert_eq!(o.state(IVec2::new(9, 9)), UNAFFECTED);
        assert_eq!(o.marked().count(), 12);
    }

    #[test]
    fn test_changing_sides() {
        let mut o = Overlay::spanning(IVec2::new(0, 0), IVec2::new(2, 0));
        o.plot(IVec2::new(0, 0));
        o.plot(IVec2::new(2, 0));
        assert_eq!(
            o.changing_sides(IVec2::new(1, 0)),
            TileSides::LEFT | TileSides::RIGHT
        );
        assert_eq!(o.changing_sides(IVec2::new(1, 1)), TileSides::BOTTOM_LEFT | TileSides::BOTTOM_RIGHT);
    }
}
