//! Neighbour mask to floor type.
//!
//! The branch order matters: several masks satisfy more than one rule and the
//! first match decides which seam gets drawn.

use crate::grid::TileSides;

use super::types::FloorType;

/// Picks the floor variant for a cell whose same-group neighbours are `sides`.
pub fn floor_type_for_sides(sides: TileSides) -> FloorType {
    let orth = sides & TileSides::ORTHOGONAL;
    let has = |s: TileSides| sides.contains(s);

    if orth.is_empty() {
        return FloorType::IsolatedTile;
    }

    // Exactly one orthogonal neighbour: the path ends on the opposite side.
    if orth == TileSides::TOP {
        return FloorType::DeadendBottom;
    }
    if orth == TileSides::LEFT {
        return FloorType::DeadendRight;
    }
    if orth == TileSides::BOTTOM {
        return FloorType::DeadendTop;
    }
    if orth == TileSides::RIGHT {
        return FloorType::DeadendLeft;
    }

    if sides == TileSides::ORTHOGONAL {
        return FloorType::CornerAll;
    }

    let left = has(TileSides::LEFT);
    let top = has(TileSides::TOP);
    let right = has(TileSides::RIGHT);
    let bottom = has(TileSides::BOTTOM);
    let tl = has(TileSides::TOP_LEFT);
    let tr = has(TileSides::TOP_RIGHT);
    let bl = has(TileSides::BOTTOM_LEFT);
    let br = has(TileSides::BOTTOM_RIGHT);

    if top && bottom {
        if !left {
            if !right {
                return FloorType::VertLane;
            }
            return match (tr, br) {
                (false, false) => FloorType::VertCrossRight,
                (false, true) => FloorType::EdgeLeftCornerTopRight,
                (true, false) => FloorType::EdgeLeftCornerBottomRight,
                (true, true) => FloorType::EdgeLeft,
            };
        }
        if !right {
            return match (tl, bl) {
                (false, false) => FloorType::VertCrossLeft,
                (false, true) => FloorType::EdgeRightCornerTopLeft,
                (true, false) => FloorType::EdgeRightCornerBottomLeft,
                (true, true) => FloorType::EdgeRight,
            };
        }
        return match (tl, tr, bl, br) {
            (false, false, false, false) => FloorType::CornerAll,
            (false, false, false, true) => FloorType::CornerExceptBottomRight,
            (false, false, true, false) => FloorType::CornerExceptBottomLeft,
            (false, false, true, true) => FloorType::CornerBothTop,
            (false, true, false, false) => FloorType::CornerExceptTopRight,
            (false, true, false, true) => FloorType::CornerBothLeft,
            (false, true, true, false) => FloorType::CornerTopLeftBottomRight,
            (false, true, true, true) => FloorType::OnlyCornerTopLeft,
            (true, false, false, false) => FloorType::CornerExceptTopLeft,
            (true, false, false, true) => FloorType::CornerTopRightBottomLeft,
            (true, false, true, false) => FloorType::CornerBothRight,
            (true, false, true, true) => FloorType::OnlyCornerTopRight,
            (true, true, false, false) => FloorType::CornerBothBottom,
            (true, true, false, true) => FloorType::OnlyCornerBottomLeft,
            (true, true, true, false) => FloorType::OnlyCornerBottomRight,
            (true, true, true, true) => FloorType::FullTile,
        };
    }

    if left && right {
        if !top {
            if !bottom {
                return FloorType::HorzLane;
            }
            return match (bl, br) {
                (false, false) => FloorType::HorzCrossBottom,
                (false, true) => FloorType::EdgeTopCornerBottomLeft,
                (true, false) => FloorType::EdgeTopCornerBottomRight,
                (true, true) => FloorType::EdgeTop,
            };
        }
        return match (tl, tr) {
            (false, false) => FloorType::HorzCrossTop,
            (false, true) => FloorType::EdgeBottomCornerTopLeft,
            (true, false) => FloorType::EdgeBottomCornerTopRight,
            (true, true) => FloorType::EdgeBottom,
        };
    }

    // Two adjacent orthogonal neighbours.
    if !left {
        if !top {
            return if br {
                FloorType::EdgeTopLeft
            } else {
                FloorType::TurnBottomRight
            };
        }
        return if tr {
            FloorType::EdgeBottomLeft
        } else {
            FloorType::TurnTopRight
        };
    }
    if !top {
        return if bl {
            FloorType::EdgeTopRight
        } else {
            FloorType::TurnBottomLeft
        };
    }
    if tl {
        FloorType::EdgeBottomRight
    } else {
        FloorType::TurnTopLeft
    }
}
