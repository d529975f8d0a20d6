//! Dense row-major 2D container shared by the tile map and the navigation
//! topology, plus the neighbour vocabulary both of them speak.
//!
//! Coordinates are `IVec2` so that callers can look up cells outside the map
//! (the park entry lane sits at negative `y`) without casting; every lookup
//! goes through [`Grid::index`] which returns `None` for anything out of
//! bounds.

use bevy::prelude::*;
use bitflags::bitflags;

// ---------------------------------------------------------------------------
// Neighbour vocabulary
// ---------------------------------------------------------------------------

bitflags! {
    /// Set of the 8 neighbours of a cell that share some property (usually
    /// "same terrain group"). `TOP` is the `y + 1` neighbour.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TileSides: u8 {
        const LEFT = 1;
        const TOP = 2;
        const RIGHT = 4;
        const BOTTOM = 8;
        const TOP_LEFT = 16;
        const TOP_RIGHT = 32;
        const BOTTOM_LEFT = 64;
        const BOTTOM_RIGHT = 128;

        const ORTHOGONAL = Self::LEFT.bits() | Self::TOP.bits() | Self::RIGHT.bits() | Self::BOTTOM.bits();
        const DIAGONAL = Self::TOP_LEFT.bits()
            | Self::TOP_RIGHT.bits()
            | Self::BOTTOM_LEFT.bits()
            | Self::BOTTOM_RIGHT.bits();
    }
}

/// A single neighbour position. Kept separate from [`TileSides`] so a flag set
/// is never compared against one direction by accident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Neighbor {
    Left,
    Top,
    Right,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Neighbor {
    pub const ALL: [Neighbor; 8] = [
        Neighbor::Left,
        Neighbor::Top,
        Neighbor::Right,
        Neighbor::Bottom,
        Neighbor::TopLeft,
        Neighbor::TopRight,
        Neighbor::BottomLeft,
        Neighbor::BottomRight,
    ];

    pub const ORTHOGONAL: [Neighbor; 4] = [
        Neighbor::Left,
        Neighbor::Top,
        Neighbor::Right,
        Neighbor::Bottom,
    ];

    #[inline]
    pub fn offset(self) -> IVec2 {
        match self {
            Neighbor::Left => IVec2::new(-1, 0),
            Neighbor::Top => IVec2::new(0, 1),
            Neighbor::Right => IVec2::new(1, 0),
            Neighbor::Bottom => IVec2::new(0, -1),
            Neighbor::TopLeft => IVec2::new(-1, 1),
            Neighbor::TopRight => IVec2::new(1, 1),
            Neighbor::BottomLeft => IVec2::new(-1, -1),
            Neighbor::BottomRight => IVec2::new(1, -1),
        }
    }

    #[inline]
    pub fn side(self) -> TileSides {
        match self {
            Neighbor::Left => TileSides::LEFT,
            Neighbor::Top => TileSides::TOP,
            Neighbor::Right => TileSides::RIGHT,
            Neighbor::Bottom => TileSides::BOTTOM,
            Neighbor::TopLeft => TileSides::TOP_LEFT,
            Neighbor::TopRight => TileSides::TOP_RIGHT,
            Neighbor::BottomLeft => TileSides::BOTTOM_LEFT,
            Neighbor::BottomRight => TileSides::BOTTOM_RIGHT,
        }
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    cells: Vec<T>,
    width: i32,
    height: i32,
}

impl<T: Clone> Grid<T> {
    pub fn new(width: i32, height: i32, fill: T) -> Self {
        assert!(
            width >= 0 && height >= 0,
            "grid dimensions must be non-negative, got {width}x{height}"
        );
        Self {
            cells: vec![fill; (width * height) as usize],
            width,
            height,
        }
    }

    /// Overwrites every cell with `value`.
    pub fn fill(&mut self, value: T) {
        for cell in &mut self.cells {
            *cell = value.clone();
        }
    }
}

impl<T> Grid<T> {
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn size(&self) -> IVec2 {
        IVec2::new(self.width, self.height)
    }

    #[inline]
    pub fn in_bounds(&self, pos: IVec2) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    #[inline]
    pub fn index(&self, pos: IVec2) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| (pos.y * self.width + pos.x) as usize)
    }

    #[inline]
    pub fn position(&self, index: usize) -> IVec2 {
        let index = index as i32;
        IVec2::new(index % self.width, index / self.width)
    }

    #[inline]
    pub fn at(&self, pos: IVec2) -> Option<&T> {
        self.index(pos).map(|idx| &self.cells[idx])
    }

    #[inline]
    pub fn at_mut(&mut self, pos: IVec2) -> Option<&mut T> {
        self.index(pos).map(|idx| &mut self.cells[idx])
    }

    /// The in-bounds neighbour of `pos` in direction `n`.
    #[inline]
    pub fn neighbor(&self, pos: IVec2, n: Neighbor) -> Option<IVec2> {
        let p = pos + n.offset();
        self.in_bounds(p).then_some(p)
    }

    /// Mask of the neighbours of `pos` whose cell satisfies `pred`.
    /// Out-of-bounds neighbours never match.
    pub fn sides_matching(&self, pos: IVec2, mut pred: impl FnMut(&T) -> bool) -> TileSides {
        let mut sides = TileSides::empty();
        for n in Neighbor::ALL {
            if self.at(pos + n.offset()).is_some_and(&mut pred) {
                sides |= n.side();
            }
        }
        sides
    }

    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    pub fn iter(&self) -> impl Iterator<Item = (IVec2, &T)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, cell)| (self.position(idx), cell))
    }
}
