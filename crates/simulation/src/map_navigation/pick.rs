//! Stochastic choice of the next cell for a wandering visitor.

use bevy::prelude::*;

use crate::sim_rng::UnitRandom;

use super::{MapNavigation, NavDir, PathType, TurnSide};

pub const MIDDLE_TURN_PROBABILITY: f32 = 0.1;
pub const INNER_CORNER_TURN_PROBABILITY: f32 = 0.2;
pub const CROSSING_TURN_PROBABILITY: f32 = 0.25;

impl MapNavigation {
    /// Next cell for a visitor standing on `pos` and heading `dir`. Returns
    /// `pos` itself when there is nowhere to go.
    ///
    /// Positions with `y < 0` are the entry lane outside the park; the visitor
    /// steps in only if the cell ahead is walkable.
    pub fn pick_tile(&self, pos: IVec2, dir: NavDir, rng: &mut impl UnitRandom) -> IVec2 {
        let forward = pos + dir.offset();
        if pos.y < 0 {
            return if self.is_occupied(forward) { forward } else { pos };
        }

        let toward = |d: NavDir| pos + d.offset();
        let kind_of = |d: NavDir| self.path_type_at(toward(d));
        let open = |d: NavDir| self.is_occupied(toward(d));

        match self.path_type_at(pos) {
            PathType::Middle => {
                if rng.next_unit() < MIDDLE_TURN_PROBABILITY {
                    let side = if rng.next_unit() < 0.5 {
                        TurnSide::Left
                    } else {
                        TurnSide::Right
                    };
                    return toward(dir.turn(side));
                }
            }
            PathType::Side => {
                if self.is_occupied(forward) && rng.next_unit() < MIDDLE_TURN_PROBABILITY {
                    for side in [TurnSide::Left, TurnSide::Right] {
                        if open(dir.turn(side)) {
                            return toward(dir.turn(side));
                        }
                    }
                }
            }
            PathType::InnerCorner => {
                if rng.next_unit() < INNER_CORNER_TURN_PROBABILITY {
                    let side = if rng.next_unit() < 0.5 {
                        TurnSide::Left
                    } else {
                        TurnSide::Right
                    };
                    if open(dir.turn(side)) {
                        return toward(dir.turn(side));
                    }
                }
            }
            PathType::Turn | PathType::OuterCorner => {
                if open(NavDir::Left) && dir != NavDir::Right {
                    return toward(NavDir::Left);
                }
                if open(NavDir::Right) && dir != NavDir::Left {
                    return toward(NavDir::Right);
                }
                if open(NavDir::Up) && dir != NavDir::Down {
                    return toward(NavDir::Up);
                }
                return toward(NavDir::Down);
            }
            PathType::Crossing => {
                if rng.next_unit() < CROSSING_TURN_PROBABILITY {
                    // Only turn into narrow paths, never back the way we came.
                    let candidates: Vec<NavDir> =
                        [NavDir::Down, NavDir::Right, NavDir::Left, NavDir::Up]
                            .into_iter()
                            .filter(|d| *d != dir.opposite())
                            .filter(|d| {
                                matches!(kind_of(*d), PathType::Straight | PathType::DeadEnd)
                            })
                            .collect();
                    if !candidates.is_empty() {
                        let share = 1.0 / candidates.len() as f32;
                        let mut roll = rng.next_unit();
                        for &d in &candidates {
                            if roll < share {
                                return toward(d);
                            }
                            roll -= share;
                        }
                        if let Some(&last) = candidates.last() {
                            return toward(last);
                        }
                    }
                }
            }
            PathType::DeadEnd => {
                return [NavDir::Up, NavDir::Down, NavDir::Left, NavDir::Right]
                    .into_iter()
                    .find(|d| open(*d))
                    .map_or(pos, toward);
            }
            PathType::Isolated => return pos,
            PathType::Straight | PathType::Empty => {}
        }

        if self.is_occupied(forward) {
            return forward;
        }
        let left = toward(dir.turn(TurnSide::Left));
        let right = toward(dir.turn(TurnSide::Right));
        match (self.is_occupied(left), self.is_occupied(right)) {
            (false, true) => right,
            (true, false) => left,
            (true, true) => {
                if rng.next_unit() < 0.5 {
                    left
                } else {
                    right
                }
            }
            (false, false) => forward,
        }
    }
}
