use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use park_simulation::config::ParkConfig;
use park_simulation::edit_actions::{EditAction, EditQueue, EditSource};
use park_simulation::tile_generator::FloorGroup;
use park_simulation::tile_map::{ItemType, TileMap};
use park_simulation::visitor::Visitor;
use park_simulation::SimulationPlugin;

use crate::scene_assets::{SceneAssets, TileMeshes};
use crate::tile_scene::{
    ItemInstance, ItemPreviewInstance, OuterGroundInstance, SceneIndex, TileInstance,
    TilePreviewInstance,
};
use crate::visitor_render::VisitorBody;
use crate::RenderingPlugin;

/// Headless app with the asset types the scene needs and no GPU.
fn scene_app(config: ParkConfig) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(AssetPlugin::default());
    app.add_plugins(TransformPlugin);
    app.add_plugins(HierarchyPlugin);
    app.init_asset::<Mesh>();
    app.init_asset::<StandardMaterial>();
    app.init_asset::<Image>();
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)));
    app.insert_resource(config);
    app.add_plugins(SimulationPlugin);
    app.add_plugins(RenderingPlugin);
    app.update();
    app
}

fn quiet() -> ParkConfig {
    let mut config = ParkConfig::default();
    config.visitor.spawn_interval = 1.0e6;
    config
}

fn edit(app: &mut App, action: EditAction) {
    app.world_mut()
        .resource_mut::<EditQueue>()
        .push(EditSource::Script, action);
    app.update();
}

fn count<C: Component>(app: &mut App) -> usize {
    let world = app.world_mut();
    world.query_filtered::<(), With<C>>().iter(world).count()
}

fn material_of(app: &App, entity: Entity) -> AssetId<StandardMaterial> {
    app.world()
        .get::<MeshMaterial3d<StandardMaterial>>(entity)
        .unwrap()
        .0
        .id()
}

#[test]
fn test_startup_spawns_every_tile_and_the_ground() {
    let mut app = scene_app(quiet());
    assert_eq!(count::<TileInstance>(&mut app), 256);
    assert_eq!(count::<OuterGroundInstance>(&mut app), 1);
    // Only the grass model is in use so far.
    assert_eq!(app.world().resource::<TileMeshes>().len(), 1);
}

#[test]
fn test_placed_walkway_swaps_tile_meshes() {
    let mut app = scene_app(quiet());
    edit(
        &mut app,
        EditAction::PlaceTileSpan {
            start: (7, 0),
            end: (7, 3),
            group: FloorGroup::PATH,
            flipped: false,
        },
    );

    assert_eq!(count::<TileInstance>(&mut app), 256);
    for y in 0..=3 {
        let pos = IVec2::new(7, y);
        let (group, floor) = app.world().resource::<TileMap>().tile_at(pos);
        assert_eq!(group, FloorGroup::PATH);
        let entity = app.world().resource::<SceneIndex>().tiles[&pos];
        let shown = app.world().get::<Mesh3d>(entity).unwrap().0.id();
        let cached = app
            .world()
            .resource::<TileMeshes>()
            .get(group, floor)
            .unwrap()
            .id();
        assert_eq!(shown, cached, "wrong model at {pos}");
    }
    assert!(app.world().resource::<TileMap>().pending_changes().is_empty());
}

#[test]
fn test_tile_preview_entities_follow_the_preview() {
    let mut app = scene_app(quiet());
    edit(
        &mut app,
        EditAction::PreviewTileSpan {
            start: (2, 2),
            end: (5, 2),
            group: FloorGroup::PATH,
            flipped: false,
            force_update: false,
        },
    );
    let expected = app.world().resource::<TileMap>().preview_tiles().len();
    assert!(expected >= 4);
    assert_eq!(count::<TilePreviewInstance>(&mut app), expected);

    edit(&mut app, EditAction::HidePreviews);
    assert_eq!(count::<TilePreviewInstance>(&mut app), 0);
}

#[test]
fn test_item_preview_entity_is_reused() {
    let mut app = scene_app(quiet());
    edit(&mut app, EditAction::PreviewItem { pos: (3, 3), item: ItemType::Tree });
    edit(&mut app, EditAction::PreviewItem { pos: (4, 3), item: ItemType::Tree });
    assert_eq!(count::<ItemPreviewInstance>(&mut app), 1);

    let entity = app.world().resource::<SceneIndex>().item_previews[&ItemType::Tree];
    let x = app.world().get::<Transform>(entity).unwrap().translation.x;
    assert_eq!(x, 4.5 * 200.0);
    assert_eq!(app.world().get::<Visibility>(entity), Some(&Visibility::Inherited));

    edit(&mut app, EditAction::HidePreviews);
    assert_eq!(app.world().get::<Visibility>(entity), Some(&Visibility::Hidden));
}

#[test]
fn test_items_spawn_and_despawn() {
    let mut app = scene_app(quiet());
    edit(&mut app, EditAction::PlaceItem { pos: (2, 2), item: ItemType::Tree });
    assert_eq!(count::<ItemInstance>(&mut app), 1);

    edit(&mut app, EditAction::DemolishRect { min: (2, 2), max: (2, 2) });
    assert_eq!(count::<ItemInstance>(&mut app), 0);
    assert!(app.world().resource::<SceneIndex>().items.is_empty());
}

#[test]
fn test_demolish_preview_tints_and_restores() {
    let mut app = scene_app(quiet());
    edit(&mut app, EditAction::PlaceItem { pos: (2, 2), item: ItemType::Tree });
    let entity = app.world().resource::<SceneIndex>().items[&IVec2::new(2, 2)];
    let tree = app.world().resource::<SceneAssets>().tree.id();
    assert_eq!(material_of(&app, entity), tree);

    edit(&mut app, EditAction::PreviewDemolish { min: (1, 1), max: (3, 3) });
    assert_ne!(material_of(&app, entity), tree);

    edit(&mut app, EditAction::DeselectAll);
    assert_eq!(material_of(&app, entity), tree);
}

#[test]
fn test_visitor_bodies_follow_visitors() {
    let mut config = ParkConfig::default();
    config.visitor.spawn_interval = 0.5;
    config.visitor.max_visitors = 2;
    let mut app = scene_app(config);
    for _ in 0..20 {
        app.update();
    }

    assert_eq!(count::<VisitorBody>(&mut app), 2);
    let world = app.world_mut();
    let mut query = world.query_filtered::<(&Visitor, &Transform), With<VisitorBody>>();
    for (visitor, transform) in query.iter(world) {
        assert_eq!(transform.translation.x, visitor.position.x);
        assert_eq!(transform.translation.z, visitor.position.y);
        assert!(transform.translation.y > 0.0);
    }
}
