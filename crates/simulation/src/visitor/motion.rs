//! The per-visitor locomotion state machine.
//!
//! A visitor always walks towards one destination cell at a time. Each leg is
//! either straight, a quarter turn (optional straight approach, then an arc),
//! or a reversal (walk into the cell, a quarter arc counter-clockwise, then a
//! normal quarter turn). Time is consumed across legs within one call.

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

use crate::config::ParkConfig;
use crate::map_navigation::MapNavigation;
use crate::sim_rng::UnitRandom;

use super::geometry::{arrive_position, normal_on_side, rotate_vector, LineSide, MapDir};
use super::{MoveState, Visitor, VisitorState};

/// Leftover frame time below this is dropped.
const TIME_EPSILON: f32 = 1e-5;
/// Arcs shorter than this are treated as done.
const ARC_EPSILON: f32 = 1e-7;

impl Visitor {
    /// A visitor standing on the street below the last entry column, about to
    /// walk to a randomly chosen entry. `None` when the park has no entries.
    pub fn enter_park(config: &ParkConfig, rng: &mut impl UnitRandom) -> Option<Self> {
        let last = *config.entry_tiles.last()?;
        let len = config.entry_tiles.len();
        let index = ((rng.next_unit() * len as f32) as usize).min(len - 1);
        let entry = config.entry_tiles[index];

        let t = config.tile_dimension;
        let lane = config.visitor.lane_side_distance;
        let row = -config.entry_grid_distance;
        let position = arrive_position(MapDir::PlusY, IVec2::new(last, row), t, lane);
        let current_tile = (position / t).floor().as_ivec2();
        let dest_tile = IVec2::new(entry, row);
        let dest_dir = MapDir::between(current_tile, dest_tile, MapDir::PlusY);

        let mut visitor = Visitor {
            state: VisitorState::ParkEntry,
            move_state: MoveState::GoForward,
            walking: true,
            position,
            heading: MapDir::PlusY.walk_vector(),
            current_tile,
            current_dir: MapDir::PlusY,
            dest_tile,
            dest_pos: arrive_position(dest_dir, dest_tile, t, lane),
            dest_dir,
            turn_side: LineSide::Ccw,
            turn_distance: 0.0,
            turn_radius: 0.0,
            turn_arc: 0.0,
            turn_center: Vec2::ZERO,
            walk_distance: 0.0,
        };

        if current_tile.x == dest_tile.x {
            visitor.calculate_forward();
        } else {
            visitor.dest_dir = if current_tile.x > dest_tile.x {
                MapDir::MinusX
            } else {
                MapDir::PlusX
            };
            visitor.calculate_turn(config);
        }
        Some(visitor)
    }

    /// Walks for `dt` seconds, asking `nav` for a new destination whenever a
    /// leg ends. A visitor with nowhere to go stops and drops the rest of the
    /// frame; it retries on the next call.
    pub fn advance(
        &mut self,
        dt: f32,
        nav: &MapNavigation,
        config: &ParkConfig,
        rng: &mut impl UnitRandom,
    ) {
        let speed = config.visitor.walking_speed;
        let mut delta = dt;

        while delta > TIME_EPSILON {
            if self.move_state == MoveState::ApproachFullTurn {
                delta = self.walk_straight(delta, speed, Leg::Walk);
                if delta > TIME_EPSILON {
                    self.move_state = MoveState::TurningFullTurn;
                }
            }

            if self.move_state == MoveState::TurningFullTurn {
                delta = self.sweep_arc(delta, speed);
                if delta > TIME_EPSILON {
                    self.current_dir = self.current_dir.rotated_ccw();
                    self.heading = self.current_dir.walk_vector();
                    self.calculate_turn(config);
                }
            }

            if self.move_state == MoveState::ApproachTurn {
                delta = self.walk_straight(delta, speed, Leg::TurnApproach);
                if delta > TIME_EPSILON {
                    self.move_state = MoveState::Turning;
                }
            }

            if self.move_state == MoveState::Turning {
                delta = self.sweep_arc(delta, speed);
                if delta > TIME_EPSILON {
                    self.move_state = MoveState::GoForward;
                    self.current_dir = self.dest_dir;
                    self.heading = self.dest_dir.walk_vector();
                    self.calculate_forward();
                }
            }

            if self.move_state == MoveState::GoForward {
                delta = self.walk_straight(delta, speed, Leg::Walk);
                if delta > TIME_EPSILON && !self.calculate_next(nav, config, rng) {
                    delta = 0.0;
                }
            }
        }
    }

    /// Moves along the heading for at most the remaining leg distance and
    /// returns the unused time.
    fn walk_straight(&mut self, delta: f32, speed: f32, leg: Leg) -> f32 {
        let remaining = match leg {
            Leg::Walk => &mut self.walk_distance,
            Leg::TurnApproach => &mut self.turn_distance,
        };
        let dist = (speed * delta).min(*remaining).max(0.0);
        *remaining -= dist;
        self.position += self.heading * dist;
        (delta - dist / speed).max(0.0)
    }

    /// Sweeps along the current arc and returns the unused time.
    fn sweep_arc(&mut self, delta: f32, speed: f32) -> f32 {
        let arc_size = self.turn_radius * FRAC_PI_2 * self.turn_arc;
        if arc_size <= ARC_EPSILON || self.turn_arc < ARC_EPSILON {
            return delta;
        }
        let arc_dist = (speed * delta).min(arc_size);
        let left = (delta - arc_dist / speed).max(0.0);
        let fraction = arc_dist / arc_size * self.turn_arc;
        let angle = FRAC_PI_2 * fraction;

        self.position =
            self.turn_center + rotate_vector(self.position - self.turn_center, angle, self.turn_side);
        self.heading = rotate_vector(self.heading, angle, self.turn_side);
        self.turn_arc -= fraction;
        left
    }

    fn calculate_forward(&mut self) {
        self.move_state = MoveState::GoForward;
        self.walk_distance = if self.current_dir.is_x_axis() {
            (self.dest_pos.x - self.position.x).abs()
        } else {
            (self.dest_pos.y - self.position.y).abs()
        };
    }

    /// Sets up a quarter turn from the current heading onto the destination
    /// lane.
    fn calculate_turn(&mut self, config: &ParkConfig) {
        let line_dist = if self.dest_dir.is_x_axis() {
            (self.dest_pos.y - self.position.y).abs()
        } else {
            (self.dest_pos.x - self.position.x).abs()
        };
        self.turn_side = self.dest_dir.turn_side_from(self.current_dir);
        self.turn_distance = (line_dist - config.visitor.max_turn_radius).max(0.0);
        self.turn_radius = line_dist - self.turn_distance;
        self.move_state = if self.turn_distance != 0.0 {
            MoveState::ApproachTurn
        } else {
            MoveState::Turning
        };
        self.turn_arc = 1.0;
        self.turn_center = self.position
            + self.heading * self.turn_distance
            + normal_on_side(self.heading, self.turn_side) * self.turn_radius;
    }

    /// Sets up the first half of a reversal: walk deeper into the cell, then a
    /// counter-clockwise quarter arc.
    fn calculate_full_turn(&mut self, config: &ParkConfig) {
        let t = config.tile_dimension;
        let params = &config.visitor;
        self.move_state = MoveState::ApproachFullTurn;
        self.walk_distance =
            (t * (1.0 - params.lane_side_distance * 0.5) - params.max_turn_radius).max(0.0);
        self.turn_arc = 1.0;
        self.turn_radius = params
            .max_turn_radius
            .min(t * (0.5 - params.lane_side_distance));
        self.turn_side = LineSide::Ccw;
        self.turn_center = self.position
            + self.heading * self.walk_distance
            + normal_on_side(self.heading, self.turn_side) * self.turn_radius;
    }

    /// Arrived at the destination: pick the next cell and set up the leg to
    /// it. Returns false when the visitor has nowhere to go.
    fn calculate_next(
        &mut self,
        nav: &MapNavigation,
        config: &ParkConfig,
        rng: &mut impl UnitRandom,
    ) -> bool {
        self.current_tile = self.dest_tile;
        self.heading = self.dest_dir.walk_vector();
        self.current_dir = self.dest_dir;

        if self.state == VisitorState::ParkEntry {
            self.state = VisitorState::Walking;
            self.dest_tile.y = -1;
        } else {
            self.dest_tile = nav.pick_tile(self.current_tile, self.dest_dir.nav_dir(), rng);
        }

        self.walking = self.dest_tile != self.current_tile;
        if !self.walking {
            return false;
        }

        let t = config.tile_dimension;
        self.dest_dir = MapDir::between(self.current_tile, self.dest_tile, self.dest_dir);
        self.dest_pos = arrive_position(
            self.dest_dir,
            self.dest_tile,
            t,
            config.visitor.lane_side_distance,
        );

        if self.current_dir.is_ahead(self.current_tile, self.dest_tile) {
            self.calculate_forward();
        } else if self.current_dir.is_behind(self.current_tile, self.dest_tile) {
            self.calculate_full_turn(config);
        } else {
            self.calculate_turn(config);
        }
        true
    }
}

/// Which straight distance a straight segment consumes.
#[derive(Clone, Copy)]
enum Leg {
    Walk,
    TurnApproach,
}
