//! Occupancy mask to navigation path type.

use crate::grid::TileSides;

use super::PathType;

const OUTER_CORNER_TRIPLES: [TileSides; 4] = [
    TileSides::TOP_LEFT.union(TileSides::LEFT).union(TileSides::TOP),
    TileSides::TOP_RIGHT.union(TileSides::TOP).union(TileSides::RIGHT),
    TileSides::BOTTOM_LEFT.union(TileSides::LEFT).union(TileSides::BOTTOM),
    TileSides::BOTTOM_RIGHT.union(TileSides::BOTTOM).union(TileSides::RIGHT),
];

/// Rows and columns of three along each edge of the 3x3 neighbourhood.
const FULL_SIDES: [TileSides; 4] = [
    TileSides::TOP_LEFT.union(TileSides::TOP).union(TileSides::TOP_RIGHT),
    TileSides::TOP_LEFT.union(TileSides::LEFT).union(TileSides::BOTTOM_LEFT),
    TileSides::TOP_RIGHT.union(TileSides::RIGHT).union(TileSides::BOTTOM_RIGHT),
    TileSides::BOTTOM_LEFT.union(TileSides::BOTTOM).union(TileSides::BOTTOM_RIGHT),
];

const ADJACENT_DIAGONALS: [TileSides; 4] = [
    TileSides::TOP_LEFT.union(TileSides::TOP_RIGHT),
    TileSides::TOP_LEFT.union(TileSides::BOTTOM_LEFT),
    TileSides::TOP_RIGHT.union(TileSides::BOTTOM_RIGHT),
    TileSides::BOTTOM_LEFT.union(TileSides::BOTTOM_RIGHT),
];

/// Path type of an occupied cell whose occupied neighbours are `occupied`.
pub fn classify_path(occupied: TileSides) -> PathType {
    let horz = (occupied & (TileSides::LEFT | TileSides::RIGHT)).bits().count_ones();
    let vert = (occupied & (TileSides::TOP | TileSides::BOTTOM)).bits().count_ones();
    let diagonals = (occupied & TileSides::DIAGONAL).bits().count_ones();

    if horz == 2 && vert == 2 && diagonals == 4 {
        return PathType::Middle;
    }
    if horz == 0 && vert == 0 {
        return PathType::Isolated;
    }
    if horz == 0 || vert == 0 {
        return if horz == 2 || vert == 2 {
            PathType::Straight
        } else {
            PathType::DeadEnd
        };
    }
    if horz == 1 && vert == 1 {
        return if OUTER_CORNER_TRIPLES.iter().any(|t| occupied.contains(*t)) {
            PathType::OuterCorner
        } else {
            PathType::Turn
        };
    }
    if horz + vert == 3
        && diagonals == 2
        && FULL_SIDES.iter().any(|s| !occupied.intersects(*s))
    {
        return PathType::Side;
    }
    if ADJACENT_DIAGONALS.iter().any(|d| !occupied.intersects(*d)) {
        return PathType::Crossing;
    }
    PathType::InnerCorner
}
