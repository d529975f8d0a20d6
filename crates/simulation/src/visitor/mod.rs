//! Park visitors: continuous walking over the walkway grid.

mod geometry;
mod motion;
mod spawner;


use bevy::prelude::*;

pub use geometry::{arrive_position, normal_on_side, rotate_vector, LineSide, MapDir};
pub use spawner::{spawn_visitors, VisitorSpawner};

use crate::config::ParkConfig;
use crate::map_navigation::MapNavigation;
use crate::sim_rng::{SimRng, UnitRandom};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisitorState {
    /// Walking from the street to the first park cell.
    #[default]
    ParkEntry,
    Walking,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveState {
    /// The destination is straight ahead.
    #[default]
    GoForward,
    /// Walking towards the point where a quarter turn starts.
    ApproachTurn,
    Turning,
    /// Walking into the cell before reversing.
    ApproachFullTurn,
    /// First quarter arc of a reversal.
    TurningFullTurn,
}

/// One visitor. Positions are world `(x, z)`.
#[derive(Component, Debug, Clone)]
pub struct Visitor {
    pub state: VisitorState,
    pub move_state: MoveState,
    /// False while the visitor stands still with nowhere to go.
    pub walking: bool,
    pub position: Vec2,
    /// Unit facing vector.
    pub heading: Vec2,
    pub current_tile: IVec2,
    pub current_dir: MapDir,
    pub dest_tile: IVec2,
    pub dest_pos: Vec2,
    /// Heading on arrival at `dest_pos`.
    pub dest_dir: MapDir,
    turn_side: LineSide,
    /// Straight distance left before the arc starts.
    turn_distance: f32,
    turn_radius: f32,
    /// Fraction of the quarter arc still to sweep.
    turn_arc: f32,
    turn_center: Vec2,
    walk_distance: f32,
}

impl Visitor {
    /// World translation on the ground plane.
    pub fn translation(&self) -> Vec3 {
        Vec3::new(self.position.x, 0.0, self.position.y)
    }

    pub fn turn_side(&self) -> LineSide {
        self.turn_side
    }

    pub fn turn_center(&self) -> Vec2 {
        self.turn_center
    }

    pub fn turn_radius(&self) -> f32 {
        self.turn_radius
    }
}

/// Spawns a visitor at the park entry. Returns `None` when the park has no
/// entry columns.
pub fn spawn_visitor(
    commands: &mut Commands,
    config: &ParkConfig,
    rng: &mut impl UnitRandom,
) -> Option<Entity> {
    let visitor = Visitor::enter_park(config, rng)?;
    Some(commands.spawn(visitor).id())
}

pub fn move_visitors(
    time: Res<Time>,
    nav: Res<MapNavigation>,
    config: Res<ParkConfig>,
    mut rng: ResMut<SimRng>,
    mut visitors: Query<&mut Visitor>,
) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }
    for mut visitor in &mut visitors {
        visitor.advance(dt, &nav, &config, &mut *rng);
    }
}

pub struct VisitorPlugin;

impl Plugin for VisitorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<VisitorSpawner>().add_systems(
            Update,
            (spawn_visitors, move_visitors)
                .chain()
                .in_set(crate::SimulationSet::Visitors),
        );
    }
}
