//! Lane geometry in the XZ plane. Grid `y` runs along world `z`.

use bevy::prelude::*;

use crate::map_navigation::NavDir;

/// World-axis heading of a visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapDir {
    PlusY,
    MinusY,
    PlusX,
    MinusX,
}

/// Which way an arc bends, seen from above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineSide {
    Ccw,
    Cw,
}

impl MapDir {
    /// Unit heading as `(x, z)`.
    pub fn walk_vector(self) -> Vec2 {
        match self {
            MapDir::PlusY => Vec2::new(0.0, 1.0),
            MapDir::MinusY => Vec2::new(0.0, -1.0),
            MapDir::PlusX => Vec2::new(1.0, 0.0),
            MapDir::MinusX => Vec2::new(-1.0, 0.0),
        }
    }

    pub fn is_x_axis(self) -> bool {
        matches!(self, MapDir::PlusX | MapDir::MinusX)
    }

    /// Next heading a quarter turn counter-clockwise.
    pub fn rotated_ccw(self) -> MapDir {
        match self {
            MapDir::PlusY => MapDir::MinusX,
            MapDir::MinusX => MapDir::MinusY,
            MapDir::MinusY => MapDir::PlusX,
            MapDir::PlusX => MapDir::PlusY,
        }
    }

    pub fn nav_dir(self) -> NavDir {
        match self {
            MapDir::PlusY => NavDir::Up,
            MapDir::MinusY => NavDir::Down,
            MapDir::PlusX => NavDir::Right,
            MapDir::MinusX => NavDir::Left,
        }
    }

    /// Heading from `from` towards `to`. X differences win over Y; equal
    /// cells keep `default`.
    pub fn between(from: IVec2, to: IVec2, default: MapDir) -> MapDir {
        if to.x < from.x {
            MapDir::MinusX
        } else if to.x > from.x {
            MapDir::PlusX
        } else if to.y < from.y {
            MapDir::MinusY
        } else if to.y > from.y {
            MapDir::PlusY
        } else {
            default
        }
    }

    /// Whether `to` lies strictly ahead of `from` along this heading.
    pub fn is_ahead(self, from: IVec2, to: IVec2) -> bool {
        match self {
            MapDir::PlusY => from.y < to.y,
            MapDir::MinusY => from.y > to.y,
            MapDir::PlusX => from.x < to.x,
            MapDir::MinusX => from.x > to.x,
        }
    }

    /// Whether `to` lies strictly behind `from` along this heading.
    pub fn is_behind(self, from: IVec2, to: IVec2) -> bool {
        match self {
            MapDir::PlusY => from.y > to.y,
            MapDir::MinusY => from.y < to.y,
            MapDir::PlusX => from.x > to.x,
            MapDir::MinusX => from.x < to.x,
        }
    }

    /// Which way to bend when the current heading is `current` and the
    /// visitor has to end up facing `self`.
    pub fn turn_side_from(self, current: MapDir) -> LineSide {
        match self {
            MapDir::PlusX if current == MapDir::PlusY => LineSide::Cw,
            MapDir::PlusX => LineSide::Ccw,
            MapDir::MinusX if current == MapDir::PlusY => LineSide::Ccw,
            MapDir::MinusX => LineSide::Cw,
            MapDir::PlusY if current == MapDir::PlusX => LineSide::Ccw,
            MapDir::PlusY => LineSide::Cw,
            MapDir::MinusY if current == MapDir::PlusX => LineSide::Cw,
            MapDir::MinusY => LineSide::Ccw,
        }
    }
}

/// Point where a visitor walking `dir` enters `tile`: on the entering edge,
/// shifted sideways onto its lane.
pub fn arrive_position(dir: MapDir, tile: IVec2, tile_dim: f32, lane_side: f32) -> Vec2 {
    let centre = tile.as_vec2() * tile_dim + Vec2::splat(tile_dim * 0.5);
    let lane = tile_dim * (0.5 - lane_side);
    let edge = tile_dim * 0.5;
    centre
        + match dir {
            MapDir::PlusY => Vec2::new(lane, -edge),
            MapDir::MinusY => Vec2::new(-lane, edge),
            MapDir::PlusX => Vec2::new(-edge, -lane),
            MapDir::MinusX => Vec2::new(edge, lane),
        }
}

pub fn rotate_vector(v: Vec2, angle: f32, side: LineSide) -> Vec2 {
    let b = match side {
        LineSide::Ccw => angle,
        LineSide::Cw => -angle,
    };
    let (sin, cos) = b.sin_cos();
    Vec2::new(cos * v.x - sin * v.y, sin * v.x + cos * v.y)
}

/// Perpendicular of `dir` pointing to `side`.
pub fn normal_on_side(dir: Vec2, side: LineSide) -> Vec2 {
    match side {
        LineSide::Cw => Vec2::new(dir.y, -dir.x),
        LineSide::Ccw => Vec2::new(-dir.y, dir.x),
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    const ALL: [MapDir; 4] = [MapDir::PlusY, MapDir::MinusY, MapDir::PlusX, MapDir::MinusX];

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn test_arrive_positions_sit_on_entering_edge() {
        let t = IVec2::new(2, 3);
        assert_eq!(arrive_position(MapDir::PlusY, t, 200.0, 0.25), Vec2::new(550.0, 600.0));
        assert_eq!(arrive_position(MapDir::MinusY, t, 200.0, 0.25), Vec2::new(450.0, 800.0));
        assert_eq!(arrive_position(MapDir::PlusX, t, 200.0, 0.25), Vec2::new(400.0, 650.0));
        assert_eq!(arrive_position(MapDir::MinusX, t, 200.0, 0.25), Vec2::new(600.0, 750.0));
    }

    #[test]
    fn test_opposite_lanes_do_not_overlap() {
        let t = IVec2::new(0, 0);
        let up = arrive_position(MapDir::PlusY, t, 200.0, 0.25);
        let down = arrive_position(MapDir::MinusY, t, 200.0, 0.25);
        assert_eq!((up.x - down.x).abs(), 100.0);
    }

    #[test]
    fn test_rotate_quarter_turn_matches_ccw_heading() {
        for dir in ALL {
            let rotated = rotate_vector(dir.walk_vector(), FRAC_PI_2, LineSide::Ccw);
            assert!(close(rotated, dir.rotated_ccw().walk_vector()), "{dir:?}");
        }
    }

    #[test]
    fn test_rotate_cw_undoes_ccw() {
        let v = Vec2::new(3.0, -1.5);
        let back = rotate_vector(rotate_vector(v, 0.7, LineSide::Ccw), 0.7, LineSide::Cw);
        assert!(close(v, back));
    }

    #[test]
    fn test_normal_points_towards_turn() {
        // A quarter CCW turn ends up heading along the CCW normal.
        for dir in ALL {
            let v = dir.walk_vector();
            assert!(close(
                normal_on_side(v, LineSide::Ccw),
                rotate_vector(v, FRAC_PI_2, LineSide::Ccw)
            ));
            assert!(close(
                normal_on_side(v, LineSide::Cw),
                rotate_vector(v, FRAC_PI_2, LineSide::Cw)
            ));
        }
    }

    #[test]
    fn test_turn_side_bends_towards_destination() {
        for current in ALL {
            for dest in ALL {
                if current.is_x_axis() == dest.is_x_axis() {
                    continue;
                }
                let side = dest.turn_side_from(current);
                let turned = rotate_vector(current.walk_vector(), FRAC_PI_2, side);
                assert!(close(turned, dest.walk_vector()), "{current:?} -> {dest:?}");
            }
        }
    }

    #[test]
    fn test_between_prefers_x() {
        let from = IVec2::new(1, 1);
        assert_eq!(MapDir::between(from, IVec2::new(0, 5), MapDir::PlusY), MapDir::MinusX);
        assert_eq!(MapDir::between(from, IVec2::new(1, 0), MapDir::PlusY), MapDir::MinusY);
        assert_eq!(MapDir::between(from, from, MapDir::PlusX), MapDir::PlusX);
    }

    #[test]
    fn test_ahead_and_behind() {
        let from = IVec2::new(2, 2);
        assert!(MapDir::PlusY.is_ahead(from, IVec2::new(2, 3)));
        assert!(MapDir::PlusY.is_behind(from, IVec2::new(2, 1)));
        assert!(!MapDir::PlusY.is_ahead(from, IVec2::new(3, 2)));
        assert!(!MapDir::PlusY.is_behind(from, IVec2::new(3, 2)));
        assert!(MapDir::MinusX.is_ahead(from, IVec2::new(1, 2)));
    }

    #[test]
    fn test_nav_dir_mapping() {
        assert_eq!(MapDir::PlusY.nav_dir(), NavDir::Up);
        assert_eq!(MapDir::MinusY.nav_dir(), NavDir::Down);
        assert_eq!(MapDir::PlusX.nav_dir(), NavDir::Right);
        assert_eq!(MapDir::MinusX.nav_dir(), NavDir::Left);
    }
}
