//! Texture atlas rectangles per terrain group, in atlas pixels.

use super::types::{FloorGroup, FloorType, TexType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtlasRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

const fn rect(x: u32, y: u32, w: u32, h: u32) -> AtlasRect {
    AtlasRect { x, y, w, h }
}

/// Atlas rectangle of `tex` for `group`, if that group draws the piece at all.
pub fn atlas_rect(group: FloorGroup, tex: TexType) -> Option<AtlasRect> {
    use TexType::*;
    match group {
        FloorGroup::None => None,
        FloorGroup::Grass => match tex {
            FullTile => Some(rect(2, 2, 64, 64)),
            _ => None,
        },
        FloorGroup::WalkwayOnGrass => Some(match tex {
            FullTile => rect(70, 2, 64, 64),
            InCornerTopLeft => rect(221, 75, 9, 9),
            InCornerTopRight => rect(212, 75, 9, 9),
            InCornerBottomLeft => rect(221, 2, 9, 9),
            InCornerBottomRight => rect(212, 2, 9, 9),
            OutCornerTopLeft => rect(138, 2, 35, 35),
            OutCornerTopRight => rect(173, 2, 35, 35),
            OutCornerBottomLeft => rect(138, 37, 35, 35),
            OutCornerBottomRight => rect(173, 37, 35, 35),
            OutSharpCornerTopLeft => rect(70, 70, 9, 9),
            OutSharpCornerTopRight => rect(83, 70, 9, 9),
            OutSharpCornerBottomLeft => rect(70, 83, 9, 9),
            OutSharpCornerBottomRight => rect(83, 83, 9, 9),
            OutEdgeLeft => rect(221, 11, 9, 64),
            OutEdgeRight => rect(212, 11, 9, 64),
            OutEdgeTop => rect(2, 79, 64, 9),
            OutEdgeBottom => rect(2, 70, 64, 9),
        }),
    }
}

/// Floor variants generated for `group`.
pub fn floor_types(group: FloorGroup) -> &'static [FloorType] {
    match group {
        FloorGroup::None => &[],
        FloorGroup::Grass => &[FloorType::FullTile],
        FloorGroup::WalkwayOnGrass => &FloorType::ALL,
    }
}
