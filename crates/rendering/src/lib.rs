//! Scene sync for the park: turns tile map and visitor state into mesh
//! entities. Reads simulation state only.

use bevy::prelude::*;

use park_simulation::SimulationSet;

pub mod scene_assets;
pub mod tile_scene;
pub mod visitor_render;

#[cfg(test)]
mod tests;

use scene_assets::{SelectionMaterials, TileMeshes};
use tile_scene::{SceneIndex, ShownPreview};

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TileMeshes>()
            .init_resource::<SceneIndex>()
            .init_resource::<ShownPreview>()
            .init_resource::<SelectionMaterials>()
            .add_systems(
                Startup,
                (
                    scene_assets::setup_scene_assets,
                    tile_scene::spawn_park_scene,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    tile_scene::sync_tile_changes,
                    tile_scene::sync_tile_previews,
                    tile_scene::sync_item_previews,
                    tile_scene::apply_selection_tint,
                )
                    .chain()
                    .after(SimulationSet::Edits),
            )
            .add_systems(
                Update,
                (
                    visitor_render::spawn_visitor_bodies,
                    visitor_render::update_visitor_transforms,
                )
                    .chain()
                    .after(SimulationSet::Visitors),
            );
    }
}
