use bevy::prelude::*;

pub mod config;
pub mod edit_actions;
pub mod grid;
pub mod map_navigation;
pub mod sim_rng;
pub mod simulation_sets;
pub mod tile_generator;
pub mod tile_map;
pub mod visitor;

#[cfg(any(test, feature = "bench"))]
pub mod test_harness;

pub use simulation_sets::SimulationSet;

use config::ParkConfig;
use map_navigation::MapNavigation;
use sim_rng::SimRng;
use tile_generator::TileGenerator;
use tile_map::TileMap;

/// The headless park core: configuration, tile models, the map, navigation,
/// edits and visitors.
///
/// Insert a [`ParkConfig`] before adding the plugin to customise the park; an
/// invalid one is replaced by the defaults.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        config::validate_park_config(app.world_mut());

        // Built from the config, so they must come after it.
        app.init_resource::<TileGenerator>()
            .init_resource::<MapNavigation>()
            .init_resource::<TileMap>()
            .init_resource::<SimRng>();

        app.configure_sets(
            Update,
            (SimulationSet::Edits, SimulationSet::Visitors).chain(),
        );

        app.add_plugins((
            edit_actions::EditActionsPlugin,
            visitor::VisitorPlugin,
        ));

        let config = app.world().resource::<ParkConfig>();
        info!(
            "park simulation ready: {}x{} tiles, entries {:?}",
            config.map_width, config.map_height, config.entry_tiles
        );
    }
}
