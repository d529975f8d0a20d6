//! Walkable topology of the park.
//!
//! `MapNavigation` mirrors the walkway cells of the tile map as a grid of
//! [`PathType`] values. Edits arrive in transactions (`begin_change`, a run
//! of `add_path` or `remove_path`, `end_change`) so neighbour
//! reclassification happens once per batch. Visitors query it through
//! [`MapNavigation::pick_tile`] whenever they finish a leg.

mod classify;
mod pick;


use std::collections::HashSet;

use bevy::prelude::*;

pub use classify::classify_path;
pub use pick::{CROSSING_TURN_PROBABILITY, INNER_CORNER_TURN_PROBABILITY, MIDDLE_TURN_PROBABILITY};

use crate::config::ParkConfig;
use crate::grid::{Grid, Neighbor};

/// Grid direction of travel. `Up` is `y + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavDir {
    Up,
    Down,
    Left,
    Right,
}

/// Side of a relative turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnSide {
    Left,
    Right,
}

impl NavDir {
    pub fn offset(self) -> IVec2 {
        match self {
            NavDir::Up => IVec2::Y,
            NavDir::Down => IVec2::NEG_Y,
            NavDir::Left => IVec2::NEG_X,
            NavDir::Right => IVec2::X,
        }
    }

    /// Heading after turning towards `side`, counter-clockwise being left.
    pub fn turn(self, side: TurnSide) -> NavDir {
        match (self, side) {
            (NavDir::Up, TurnSide::Left) => NavDir::Left,
            (NavDir::Up, TurnSide::Right) => NavDir::Right,
            (NavDir::Left, TurnSide::Left) => NavDir::Down,
            (NavDir::Left, TurnSide::Right) => NavDir::Up,
            (NavDir::Right, TurnSide::Left) => NavDir::Up,
            (NavDir::Right, TurnSide::Right) => NavDir::Down,
            (NavDir::Down, TurnSide::Left) => NavDir::Right,
            (NavDir::Down, TurnSide::Right) => NavDir::Left,
        }
    }

    pub fn opposite(self) -> NavDir {
        match self {
            NavDir::Up => NavDir::Down,
            NavDir::Down => NavDir::Up,
            NavDir::Left => NavDir::Right,
            NavDir::Right => NavDir::Left,
        }
    }
}

/// Local shape of a walkable cell, used to decide how visitors wander.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PathType {
    #[default]
    Empty,
    /// All 8 neighbours walkable.
    Middle,
    InnerCorner,
    OuterCorner,
    /// A side path meets this one without diagonals on both sides.
    Crossing,
    DeadEnd,
    Isolated,
    Straight,
    Turn,
    /// Edge of a wide walkway area.
    Side,
}

/// Kind of the open transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChangeKind {
    #[default]
    None,
    Adding,
    Removing,
    /// Adds and removes were mixed; the batch is discarded on `end_change`.
    Invalid,
}

#[derive(Resource, Debug, Clone)]
pub struct MapNavigation {
    cells: Option<Grid<PathType>>,
    changing: bool,
    change_kind: ChangeKind,
    /// Queued cells in arrival order; `queued` mirrors it for lookups.
    changes: Vec<IVec2>,
    queued: HashSet<IVec2>,
}

impl MapNavigation {
    /// Navigation sized for a `size` map, all cells empty.
    pub fn with_size(size: IVec2) -> Self {
        let mut nav = Self {
            cells: None,
            changing: false,
            change_kind: ChangeKind::default(),
            changes: Vec::new(),
            queued: HashSet::default(),
        };
        nav.set_map_data(size);
        nav
    }

    /// Allocates the cell grid. Only valid once, at map creation.
    pub fn set_map_data(&mut self, size: IVec2) {
        if self.cells.is_some() {
            panic!("navigation map data is already set");
        }
        let size = if size.x > 0 && size.y > 0 { size } else { IVec2::ZERO };
        self.cells = Some(Grid::new(size.x, size.y, PathType::Empty));
    }

    pub fn map_size(&self) -> IVec2 {
        self.cells.as_ref().map_or(IVec2::ZERO, Grid::size)
    }

    pub fn in_bounds(&self, pos: IVec2) -> bool {
        self.cells.as_ref().is_some_and(|g| g.in_bounds(pos))
    }

    pub fn is_changing(&self) -> bool {
        self.changing
    }

    pub fn change_kind(&self) -> ChangeKind {
        self.change_kind
    }

    /// Cells queued in the open change, in the order they were added.
    pub fn queued_changes(&self) -> &[IVec2] {
        &self.changes
    }

    /// Type at `pos`; `Empty` outside the map.
    pub fn path_type_at(&self, pos: IVec2) -> PathType {
        self.cells
            .as_ref()
            .and_then(|g| g.at(pos))
            .copied()
            .unwrap_or_default()
    }

    pub fn is_occupied(&self, pos: IVec2) -> bool {
        self.path_type_at(pos) != PathType::Empty
    }

    pub fn begin_change(&mut self) {
        if self.changing {
            error!("MapNavigation: begin_change while a change is already open");
        }
        self.changing = true;
    }

    pub fn add_path(&mut self, pos: IVec2) {
        self.queue_change(pos, ChangeKind::Adding);
    }

    pub fn remove_path(&mut self, pos: IVec2) {
        self.queue_change(pos, ChangeKind::Removing);
    }

    fn queue_change(&mut self, pos: IVec2, kind: ChangeKind) {
        if !self.changing {
            error!("MapNavigation: {kind:?} {pos} outside of a change");
            return;
        }
        if self.change_kind == ChangeKind::None {
            self.change_kind = kind;
        } else if self.change_kind != kind {
            if self.change_kind != ChangeKind::Invalid {
                error!("MapNavigation: cannot add and remove cells in the same change");
            }
            self.change_kind = ChangeKind::Invalid;
            return;
        }

        if !self.in_bounds(pos) {
            return;
        }
        let occupied = self.is_occupied(pos);
        let differs = match kind {
            ChangeKind::Adding => !occupied,
            _ => occupied,
        };
        if differs && self.queued.insert(pos) {
            self.changes.push(pos);
        }
    }

    /// Applies the queued batch. Returns whether anything was applied.
    pub fn end_change(&mut self) -> bool {
        let kind = std::mem::take(&mut self.change_kind);
        let changes = std::mem::take(&mut self.changes);
        self.queued.clear();
        let was_changing = std::mem::replace(&mut self.changing, false);

        if !was_changing {
            error!("MapNavigation: end_change without begin_change");
            return false;
        }
        if changes.is_empty() || matches!(kind, ChangeKind::None | ChangeKind::Invalid) {
            return false;
        }
        let Some(grid) = self.cells.as_mut() else {
            return false;
        };

        let adding = kind == ChangeKind::Adding;
        for &pos in &changes {
            if let Some(cell) = grid.at_mut(pos) {
                // Provisional type; the reclassification pass below settles it.
                *cell = if adding {
                    PathType::Isolated
                } else {
                    PathType::Empty
                };
            }
        }

        let mut updated = HashSet::new();
        for &pos in &changes {
            if adding {
                reclassify(grid, pos, &mut updated);
            }
            for n in Neighbor::ALL {
                reclassify(grid, pos + n.offset(), &mut updated);
            }
        }
        true
    }
}

fn reclassify(grid: &mut Grid<PathType>, pos: IVec2, updated: &mut HashSet<IVec2>) {
    if !grid.in_bounds(pos) || !updated.insert(pos) {
        return;
    }
    if grid.at(pos).copied().unwrap_or_default() == PathType::Empty {
        return;
    }
    let occupied = grid.sides_matching(pos, |t| *t != PathType::Empty);
    if let Some(cell) = grid.at_mut(pos) {
        *cell = classify_path(occupied);
    }
}

impl FromWorld for MapNavigation {
    fn from_world(world: &mut World) -> Self {
        let size = world
            .get_resource::<ParkConfig>()
            .map_or(ParkConfig::default().map_size(), ParkConfig::map_size);
        Self::with_size(size)
    }
}
