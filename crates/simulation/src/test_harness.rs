//! # TestPark: headless harness for park integration tests
//!
//! Wraps a `bevy::app::App` with `MinimalPlugins` and [`SimulationPlugin`].
//! Time advances by a fixed [`FRAME`] per update so visitor motion is
//! reproducible.

use std::time::Duration;

use bevy::app::App;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use crate::config::ParkConfig;
use crate::edit_actions::{EditAction, EditQueue, EditResult, EditResultLog, EditSource};
use crate::map_navigation::MapNavigation;
use crate::sim_rng::SimRng;
use crate::tile_generator::FloorGroup;
use crate::tile_map::{ItemType, TileMap};
use crate::visitor::{spawn_visitor, Visitor};
use crate::SimulationPlugin;

/// Simulated time per `tick`.
pub const FRAME: Duration = Duration::from_millis(100);

pub struct TestPark {
    app: App,
}

impl Default for TestPark {
    fn default() -> Self {
        Self::new()
    }
}

impl TestPark {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// A 16x16 grass park with the default config.
    pub fn new() -> Self {
        Self::with_config(ParkConfig::default())
    }

    pub fn with_config(config: ParkConfig) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(TimeUpdateStrategy::ManualDuration(FRAME));
        app.insert_resource(config);
        app.add_plugins(SimulationPlugin);
        // The first update only starts the clock.
        app.update();
        Self { app }
    }

    // -----------------------------------------------------------------------
    // Setup (builder pattern, consumes and returns Self)
    // -----------------------------------------------------------------------

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.app.insert_resource(SimRng::from_seed_u64(seed));
        self
    }

    /// Places a walkway span from `a` to `b` directly, bypassing the queue.
    pub fn with_walkway(mut self, a: (i32, i32), b: (i32, i32)) -> Self {
        let world = self.app.world_mut();
        world.resource_scope(|world, mut map: Mut<TileMap>| {
            let mut nav = world.resource_mut::<MapNavigation>();
            map.place_tile_span(
                &mut nav,
                IVec2::new(a.0, a.1),
                IVec2::new(b.0, b.1),
                FloorGroup::PATH,
                false,
            );
        });
        self
    }

    pub fn with_item(mut self, pos: (i32, i32), item: ItemType) -> Self {
        self.app
            .world_mut()
            .resource_mut::<TileMap>()
            .place_model(IVec2::new(pos.0, pos.1), item);
        self
    }

    /// Spawns `n` visitors at the entry right away.
    pub fn with_visitors(mut self, n: usize) -> Self {
        for _ in 0..n {
            self.spawn_visitor();
        }
        self
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    pub fn push_edit(&mut self, action: EditAction) {
        self.app
            .world_mut()
            .resource_mut::<EditQueue>()
            .push(EditSource::Script, action);
    }

    /// Queues `action`, runs one update and returns its result.
    pub fn edit(&mut self, action: EditAction) -> Option<EditResult> {
        self.push_edit(action);
        self.tick(1);
        self.last_result()
    }

    pub fn spawn_visitor(&mut self) -> Option<Entity> {
        let world = self.app.world_mut();
        world.resource_scope(|world, mut rng: Mut<SimRng>| {
            let config = world.resource::<ParkConfig>().clone();
            let entity = {
                let mut commands = world.commands();
                spawn_visitor(&mut commands, &config, &mut *rng)
            };
            world.flush();
            entity
        })
    }

    // -----------------------------------------------------------------------
    // Simulation
    // -----------------------------------------------------------------------

    /// Runs `n` updates of [`FRAME`] each.
    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.app.update();
        }
    }

    /// Runs updates until at least `secs` of simulated time have passed.
    pub fn run_for(&mut self, secs: f32) {
        let frames = (secs / FRAME.as_secs_f32()).ceil() as u32;
        self.tick(frames);
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn resource<T: Resource>(&self) -> &T {
        self.app.world().resource::<T>()
    }

    pub fn map(&self) -> &TileMap {
        self.resource::<TileMap>()
    }

    pub fn nav(&self) -> &MapNavigation {
        self.resource::<MapNavigation>()
    }

    pub fn config(&self) -> &ParkConfig {
        self.resource::<ParkConfig>()
    }

    pub fn last_result(&self) -> Option<EditResult> {
        self.resource::<EditResultLog>()
            .last()
            .map(|record| record.result.clone())
    }

    pub fn visitors(&mut self) -> Vec<Visitor> {
        let world = self.app.world_mut();
        world.query::<&Visitor>().iter(world).cloned().collect()
    }

    pub fn visitor_count(&mut self) -> usize {
        let world = self.app.world_mut();
        world.query::<&Visitor>().iter(world).count()
    }

    // -----------------------------------------------------------------------
    // Assertions
    // -----------------------------------------------------------------------

    /// Every walkway cell is walkable and nothing else is.
    pub fn assert_nav_in_sync(&self) {
        let map = self.map();
        let nav = self.nav();
        for (pos, cell) in map.cells() {
            assert_eq!(
                nav.is_occupied(pos),
                cell.group == FloorGroup::PATH,
                "navigation out of sync at {pos}"
            );
        }
    }

    /// Every visitor stands on the street or on a walkway.
    pub fn assert_visitors_on_walkways(&mut self) {
        let visitors = self.visitors();
        let nav = self.nav();
        for v in visitors {
            for tile in [v.current_tile, v.dest_tile] {
                assert!(
                    tile.y < 0 || nav.is_occupied(tile),
                    "visitor heading through {tile}, which is not walkable"
                );
            }
        }
    }
}
