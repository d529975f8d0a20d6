//! Piece composition: which atlas pieces make up each floor variant and how
//! they are cut into non-overlapping rectangles covering the tile.
//!
//! Pixel space here is the atlas' own: `u` grows right, `v` grows down, and
//! `v = 0` is the tile's top (the `+Z` side once placed in the world).

use std::collections::BTreeSet;

use crate::config::ATLAS_TILE_SIZE;

use super::atlas::{atlas_rect, AtlasRect};
use super::types::{Anchor, FloorGroup, FloorType, TexType};

/// One output rectangle, in tile pixels, sampling `tex` starting at atlas
/// pixel `(src_u, src_v)` for its `(u0, v0)` corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelQuad {
    pub u0: u32,
    pub v0: u32,
    pub u1: u32,
    pub v1: u32,
    pub tex: TexType,
    pub src_u: u32,
    pub src_v: u32,
}

impl PixelQuad {
    pub fn area(&self) -> u32 {
        (self.u1 - self.u0) * (self.v1 - self.v0)
    }
}

/// Pieces drawn over the group's full tile for `floor`.
pub fn overlay_pieces(floor: FloorType) -> &'static [TexType] {
    use TexType::*;
    match floor {
        FloorType::FullTile => &[],
        FloorType::HorzLane => &[OutEdgeTop, OutEdgeBottom],
        FloorType::VertLane => &[OutEdgeLeft, OutEdgeRight],
        FloorType::EdgeLeft => &[OutEdgeLeft],
        FloorType::EdgeTop => &[OutEdgeTop],
        FloorType::EdgeRight => &[OutEdgeRight],
        FloorType::EdgeBottom => &[OutEdgeBottom],
        FloorType::TurnTopRight => &[OutEdgeLeft, OutEdgeBottom, OutCornerBottomLeft, InCornerTopRight],
        FloorType::TurnTopLeft => &[OutEdgeRight, OutEdgeBottom, OutCornerBottomRight, InCornerTopLeft],
        FloorType::TurnBottomRight => &[OutEdgeLeft, OutEdgeTop, OutCornerTopLeft, InCornerBottomRight],
        FloorType::TurnBottomLeft => &[OutEdgeRight, OutEdgeTop, OutCornerTopRight, InCornerBottomLeft],
        FloorType::EdgeBottomLeft => &[OutEdgeLeft, OutEdgeBottom, OutCornerBottomLeft],
        FloorType::EdgeBottomRight => &[OutEdgeRight, OutEdgeBottom, OutCornerBottomRight],
        FloorType::EdgeTopLeft => &[OutEdgeLeft, OutEdgeTop, OutCornerTopLeft],
        FloorType::EdgeTopRight => &[OutEdgeRight, OutEdgeTop, OutCornerTopRight],
        FloorType::VertCrossRight => &[OutEdgeLeft, InCornerTopRight, InCornerBottomRight],
        FloorType::VertCrossLeft => &[OutEdgeRight, InCornerTopLeft, InCornerBottomLeft],
        FloorType::HorzCrossTop => &[OutEdgeBottom, InCornerTopLeft, InCornerTopRight],
        FloorType::HorzCrossBottom => &[OutEdgeTop, InCornerBottomLeft, InCornerBottomRight],
        FloorType::EdgeLeftCornerTopRight => &[OutEdgeLeft, InCornerTopRight],
        FloorType::EdgeLeftCornerBottomRight => &[OutEdgeLeft, InCornerBottomRight],
        FloorType::EdgeRightCornerTopLeft => &[OutEdgeRight, InCornerTopLeft],
        FloorType::EdgeRightCornerBottomLeft => &[OutEdgeRight, InCornerBottomLeft],
        FloorType::EdgeTopCornerBottomRight => &[OutEdgeTop, InCornerBottomRight],
        FloorType::EdgeTopCornerBottomLeft => &[OutEdgeTop, InCornerBottomLeft],
        FloorType::EdgeBottomCornerTopRight => &[OutEdgeBottom, InCornerTopRight],
        FloorType::EdgeBottomCornerTopLeft => &[OutEdgeBottom, InCornerTopLeft],
        FloorType::CornerExceptTopLeft => &[InCornerTopRight, InCornerBottomLeft, InCornerBottomRight],
        FloorType::CornerExceptTopRight => &[InCornerTopLeft, InCornerBottomLeft, InCornerBottomRight],
        FloorType::CornerExceptBottomLeft => &[InCornerTopLeft, InCornerTopRight, InCornerBottomRight],
        FloorType::CornerExceptBottomRight => &[InCornerTopLeft, InCornerTopRight, InCornerBottomLeft],
        FloorType::CornerAll => &[
            InCornerTopLeft,
            InCornerTopRight,
            InCornerBottomLeft,
            InCornerBottomRight,
        ],
        FloorType::CornerBothTop => &[InCornerTopLeft, InCornerTopRight],
        FloorType::CornerBothRight => &[InCornerTopRight, InCornerBottomRight],
        FloorType::CornerBothBottom => &[InCornerBottomLeft, InCornerBottomRight],
        FloorType::CornerBothLeft => &[InCornerTopLeft, InCornerBottomLeft],
        FloorType::CornerTopLeftBottomRight => &[InCornerTopLeft, InCornerBottomRight],
        FloorType::CornerTopRightBottomLeft => &[InCornerTopRight, InCornerBottomLeft],
        FloorType::OnlyCornerTopRight => &[InCornerTopRight],
        FloorType::OnlyCornerTopLeft => &[InCornerTopLeft],
        FloorType::OnlyCornerBottomRight => &[InCornerBottomRight],
        FloorType::OnlyCornerBottomLeft => &[InCornerBottomLeft],
        FloorType::IsolatedTile => &[
            OutEdgeLeft,
            OutEdgeRight,
            OutEdgeTop,
            OutEdgeBottom,
            OutSharpCornerTopLeft,
            OutSharpCornerTopRight,
            OutSharpCornerBottomLeft,
            OutSharpCornerBottomRight,
        ],
        FloorType::DeadendLeft => &[
            OutEdgeTop,
            OutEdgeBottom,
            OutEdgeLeft,
            OutSharpCornerTopLeft,
            OutSharpCornerBottomLeft,
        ],
        FloorType::DeadendRight => &[
            OutEdgeTop,
            OutEdgeBottom,
            OutEdgeRight,
            OutSharpCornerTopRight,
            OutSharpCornerBottomRight,
        ],
        FloorType::DeadendTop => &[
            OutEdgeLeft,
            OutEdgeRight,
            OutEdgeTop,
            OutSharpCornerTopLeft,
            OutSharpCornerTopRight,
        ],
        FloorType::DeadendBottom => &[
            OutEdgeLeft,
            OutEdgeRight,
            OutEdgeBottom,
            OutSharpCornerBottomLeft,
            OutSharpCornerBottomRight,
        ],
    }
}

struct Placed {
    tex: TexType,
    rect: AtlasRect,
    u: u32,
    v: u32,
}

impl Placed {
    fn new(tex: TexType, rect: AtlasRect) -> Self {
        let s = ATLAS_TILE_SIZE;
        let (u, v) = match tex.anchor() {
            Anchor::Whole | Anchor::Left | Anchor::Top | Anchor::TopLeft => (0, 0),
            Anchor::Right | Anchor::TopRight => (s - rect.w, 0),
            Anchor::Bottom | Anchor::BottomLeft => (0, s - rect.h),
            Anchor::BottomRight => (s - rect.w, s - rect.h),
        };
        Self { tex, rect, u, v }
    }

    fn covers(&self, u0: u32, v0: u32, u1: u32, v1: u32) -> bool {
        self.u <= u0 && u1 <= self.u + self.rect.w && self.v <= v0 && v1 <= self.v + self.rect.h
    }
}

/// Cuts the tile for (`group`, `floor`) into rectangles, each sampling the
/// top-most piece covering it. Returns `None` when the group's atlas lacks a
/// piece the variant needs.
///
/// The geometry is axis-aligned only: rounded inner and outer corners are not
/// cut as curved polygons. Each corner is a square quad and the curve comes
/// from the corner piece's texture.
pub fn compose(group: FloorGroup, floor: FloorType) -> Option<Vec<PixelQuad>> {
    let s = ATLAS_TILE_SIZE;

    let mut placed = vec![Placed::new(TexType::FullTile, atlas_rect(group, TexType::FullTile)?)];
    for &tex in overlay_pieces(floor) {
        placed.push(Placed::new(tex, atlas_rect(group, tex)?));
    }

    let mut us = BTreeSet::from([0, s]);
    let mut vs = BTreeSet::from([0, s]);
    for p in &placed {
        us.insert(p.u);
        us.insert((p.u + p.rect.w).min(s));
        vs.insert(p.v);
        vs.insert((p.v + p.rect.h).min(s));
    }
    let us: Vec<u32> = us.into_iter().collect();
    let vs: Vec<u32> = vs.into_iter().collect();
    let cols = us.len() - 1;
    let rows = vs.len() - 1;

    // Owner of every partition cell: highest layer wins, later pieces win ties.
    let mut owner = vec![0usize; cols * rows];
    for r in 0..rows {
        for c in 0..cols {
            let mut best: Option<usize> = None;
            for (i, p) in placed.iter().enumerate() {
                if !p.covers(us[c], vs[r], us[c + 1], vs[r + 1]) {
                    continue;
                }
                if best.map_or(true, |b| p.tex.layer() >= placed[b].tex.layer()) {
                    best = Some(i);
                }
            }
            owner[r * cols + c] = best?;
        }
    }

    // Greedy merge of same-owner cells into maximal rectangles.
    let mut used = vec![false; cols * rows];
    let mut quads = Vec::new();
    for r in 0..rows {
        for c in 0..cols {
            if used[r * cols + c] {
                continue;
            }
            let o = owner[r * cols + c];
            let mut c_end = c + 1;
            while c_end < cols && !used[r * cols + c_end] && owner[r * cols + c_end] == o {
                c_end += 1;
            }
            let mut r_end = r + 1;
            while r_end < rows
                && (c..c_end).all(|cc| !used[r_end * cols + cc] && owner[r_end * cols + cc] == o)
            {
                r_end += 1;
            }
            for rr in r..r_end {
                for cc in c..c_end {
                    used[rr * cols + cc] = true;
                }
            }

            let p = &placed[o];
            quads.push(PixelQuad {
                u0: us[c],
                v0: vs[r],
                u1: us[c_end],
                v1: vs[r_end],
                tex: p.tex,
                src_u: p.rect.x + us[c] - p.u,
                src_v: p.rect.y + vs[r] - p.v,
            });
        }
    }
    Some(quads)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_tile_is_one_quad() {
        let quads = compose(FloorGroup::Grass, FloorType::FullTile).unwrap();
        assert_eq!(quads.len(), 1);
        assert_eq!(quads[0].area(), ATLAS_TILE_SIZE * ATLAS_TILE_SIZE);
        assert_eq!((quads[0].src_u, quads[0].src_v), (2, 2));
    }

    #[test]
    fn test_grass_has_no_border_pieces() {
        assert!(compose(FloorGroup::Grass, FloorType::EdgeLeft).is_none());
        assert!(compose(FloorGroup::None, FloorType::FullTile).is_none());
    }

    #[test]
    fn test_every_walkway_variant_tiles_exactly() {
        let full = ATLAS_TILE_SIZE * ATLAS_TILE_SIZE;
        for floor in FloorType::ALL {
            let quads = compose(FloorGroup::WalkwayOnGrass, floor).unwrap();
            let area: u32 = quads.iter().map(PixelQuad::area).sum();
            assert_eq!(area, full, "{floor:?} does not cover the tile exactly");
            for (i, a) in quads.iter().enumerate() {
                for b in &quads[i + 1..] {
                    let overlap = a.u0 < b.u1 && b.u0 < a.u1 && a.v0 < b.v1 && b.v0 < a.v1;
                    assert!(!overlap, "{floor:?}: {a:?} overlaps {b:?}");
                }
            }
        }
    }

    #[test]
    fn test_quads_sample_inside_their_atlas_rect() {
        for floor in FloorType::ALL {
            for q in compose(FloorGroup::WalkwayOnGrass, floor).unwrap() {
                let r = atlas_rect(FloorGroup::WalkwayOnGrass, q.tex).unwrap();
                assert!(q.src_u >= r.x && q.src_u + (q.u1 - q.u0) <= r.x + r.w, "{floor:?} {q:?}");
                assert!(q.src_v >= r.y && q.src_v + (q.v1 - q.v0) <= r.y + r.h, "{floor:?} {q:?}");
            }
        }
    }

    #[test]
    fn test_outer_corner_crops_adjacent_edges() {
        let quads = compose(FloorGroup::WalkwayOnGrass, FloorType::EdgeTopLeft).unwrap();
        let corner = quads
            .iter()
            .find(|q| q.tex == TexType::OutCornerTopLeft)
            .unwrap();
        assert_eq!((corner.u0, corner.v0, corner.u1, corner.v1), (0, 0, 35, 35));
        let left_edge: Vec<_> = quads.iter().filter(|q| q.tex == TexType::OutEdgeLeft).collect();
        assert_eq!(left_edge.len(), 1);
        assert_eq!(left_edge[0].v0, 35, "left edge starts below the corner");
        assert_eq!(left_edge[0].src_v, 11 + 35, "cropped edge keeps its anchoring");
    }

    #[test]
    fn test_isolated_tile_uses_sharp_corners_over_edges() {
        let quads = compose(FloorGroup::WalkwayOnGrass, FloorType::IsolatedTile).unwrap();
        let sharp = quads
            .iter()
            .filter(|q| {
                matches!(
                    q.tex,
                    TexType::OutSharpCornerTopLeft
                        | TexType::OutSharpCornerTopRight
                        | TexType::OutSharpCornerBottomLeft
                        | TexType::OutSharpCornerBottomRight
                )
            })
            .count();
        assert_eq!(sharp, 4);
    }
}
