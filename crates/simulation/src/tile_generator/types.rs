use serde::{Deserialize, Serialize};

/// Terrain category. Tiles are bordered against neighbours of a different
/// group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FloorGroup {
    /// No tile. Returned for coordinates outside the map.
    #[default]
    None,
    Grass,
    WalkwayOnGrass,
}

impl FloorGroup {
    /// Terrain every cell starts as and reverts to when demolished.
    pub const BASE: FloorGroup = FloorGroup::Grass;
    /// Terrain that visitors walk on.
    pub const PATH: FloorGroup = FloorGroup::WalkwayOnGrass;
}

/// Silhouette of a tile's border drawing. Names describe where the drawn
/// edges and inner corners sit, not where the neighbours are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FloorType {
    #[default]
    FullTile,
    HorzLane,
    VertLane,
    EdgeLeft,
    EdgeTop,
    EdgeRight,
    EdgeBottom,
    TurnTopRight,
    TurnTopLeft,
    TurnBottomRight,
    TurnBottomLeft,
    EdgeBottomLeft,
    EdgeBottomRight,
    EdgeTopLeft,
    EdgeTopRight,
    VertCrossRight,
    VertCrossLeft,
    HorzCrossTop,
    HorzCrossBottom,
    EdgeLeftCornerTopRight,
    EdgeLeftCornerBottomRight,
    EdgeRightCornerTopLeft,
    EdgeRightCornerBottomLeft,
    EdgeTopCornerBottomRight,
    EdgeTopCornerBottomLeft,
    EdgeBottomCornerTopRight,
    EdgeBottomCornerTopLeft,
    CornerExceptTopLeft,
    CornerExceptTopRight,
    CornerExceptBottomLeft,
    CornerExceptBottomRight,
    CornerAll,
    CornerBothTop,
    CornerBothRight,
    CornerBothBottom,
    CornerBothLeft,
    CornerTopLeftBottomRight,
    CornerTopRightBottomLeft,
    OnlyCornerTopRight,
    OnlyCornerTopLeft,
    OnlyCornerBottomRight,
    OnlyCornerBottomLeft,
    IsolatedTile,
    DeadendLeft,
    DeadendRight,
    DeadendTop,
    DeadendBottom,
}

impl FloorType {
    pub const ALL: [FloorType; 47] = [
        FloorType::FullTile,
        FloorType::HorzLane,
        FloorType::VertLane,
        FloorType::EdgeLeft,
        FloorType::EdgeTop,
        FloorType::EdgeRight,
        FloorType::EdgeBottom,
        FloorType::TurnTopRight,
        FloorType::TurnTopLeft,
        FloorType::TurnBottomRight,
        FloorType::TurnBottomLeft,
        FloorType::EdgeBottomLeft,
        FloorType::EdgeBottomRight,
        FloorType::EdgeTopLeft,
        FloorType::EdgeTopRight,
        FloorType::VertCrossRight,
        FloorType::VertCrossLeft,
        FloorType::HorzCrossTop,
        FloorType::HorzCrossBottom,
        FloorType::EdgeLeftCornerTopRight,
        FloorType::EdgeLeftCornerBottomRight,
        FloorType::EdgeRightCornerTopLeft,
        FloorType::EdgeRightCornerBottomLeft,
        FloorType::EdgeTopCornerBottomRight,
        FloorType::EdgeTopCornerBottomLeft,
        FloorType::EdgeBottomCornerTopRight,
        FloorType::EdgeBottomCornerTopLeft,
        FloorType::CornerExceptTopLeft,
        FloorType::CornerExceptTopRight,
        FloorType::CornerExceptBottomLeft,
        FloorType::CornerExceptBottomRight,
        FloorType::CornerAll,
        FloorType::CornerBothTop,
        FloorType::CornerBothRight,
        FloorType::CornerBothBottom,
        FloorType::CornerBothLeft,
        FloorType::CornerTopLeftBottomRight,
        FloorType::CornerTopRightBottomLeft,
        FloorType::OnlyCornerTopRight,
        FloorType::OnlyCornerTopLeft,
        FloorType::OnlyCornerBottomRight,
        FloorType::OnlyCornerBottomLeft,
        FloorType::IsolatedTile,
        FloorType::DeadendLeft,
        FloorType::DeadendRight,
        FloorType::DeadendTop,
        FloorType::DeadendBottom,
    ];
}

/// Named sub-rectangles of the tile atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TexType {
    FullTile,
    InCornerTopLeft,
    InCornerTopRight,
    InCornerBottomLeft,
    InCornerBottomRight,
    OutCornerTopLeft,
    OutCornerTopRight,
    OutCornerBottomLeft,
    OutCornerBottomRight,
    OutSharpCornerTopLeft,
    OutSharpCornerTopRight,
    OutSharpCornerBottomLeft,
    OutSharpCornerBottomRight,
    OutEdgeLeft,
    OutEdgeRight,
    OutEdgeTop,
    OutEdgeBottom,
}

/// Where a piece is pinned inside the tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Anchor {
    Whole,
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl TexType {
    pub(crate) fn anchor(self) -> Anchor {
        use TexType::*;
        match self {
            FullTile => Anchor::Whole,
            OutEdgeLeft => Anchor::Left,
            OutEdgeRight => Anchor::Right,
            OutEdgeTop => Anchor::Top,
            OutEdgeBottom => Anchor::Bottom,
            InCornerTopLeft | OutCornerTopLeft | OutSharpCornerTopLeft => Anchor::TopLeft,
            InCornerTopRight | OutCornerTopRight | OutSharpCornerTopRight => Anchor::TopRight,
            InCornerBottomLeft | OutCornerBottomLeft | OutSharpCornerBottomLeft => {
                Anchor::BottomLeft
            }
            InCornerBottomRight | OutCornerBottomRight | OutSharpCornerBottomRight => {
                Anchor::BottomRight
            }
        }
    }

    /// Stacking order when pieces overlap: corners over edges over the base.
    pub(crate) fn layer(self) -> u8 {
        match self.anchor() {
            Anchor::Whole => 0,
            Anchor::Left | Anchor::Right | Anchor::Top | Anchor::Bottom => 1,
            _ => 2,
        }
    }
}
