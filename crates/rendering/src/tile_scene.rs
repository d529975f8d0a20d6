//! Mirrors the tile map into mesh entities.
//!
//! One entity per map cell and per placed item, kept in step with the
//! changes the map records. Previews are drawn slightly above the map.

use std::collections::HashMap;

use bevy::prelude::*;

use park_simulation::tile_generator::TileGenerator;
use park_simulation::tile_map::{
    ItemPreview, ItemType, PreviewTile, SceneObject, TileMap, TileMapChange,
};

use crate::scene_assets::{SceneAssets, SelectionMaterials, TileMeshes};

/// Height previews float above the map.
const PREVIEW_LIFT: f32 = 0.5;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileInstance(pub IVec2);

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemInstance(pub IVec2);

#[derive(Component)]
pub struct TilePreviewInstance;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemPreviewInstance(pub ItemType);

#[derive(Component)]
pub struct OuterGroundInstance;

/// Scene entities by map cell.
#[derive(Resource, Default)]
pub struct SceneIndex {
    pub tiles: HashMap<IVec2, Entity>,
    pub items: HashMap<IVec2, Entity>,
    pub item_previews: HashMap<ItemType, Entity>,
}

impl SceneIndex {
    pub fn entity_of(&self, object: SceneObject) -> Option<Entity> {
        match object {
            SceneObject::Tile(pos) => self.tiles.get(&pos).copied(),
            SceneObject::Item(pos) => self.items.get(&pos).copied(),
        }
    }
}

/// The preview tiles currently on screen.
#[derive(Resource, Default)]
pub struct ShownPreview {
    tiles: Vec<PreviewTile>,
    entities: Vec<Entity>,
}

fn item_translation(map: &TileMap, pos: IVec2, item: ItemType) -> Vec3 {
    let t = map.tile_dimension();
    let height = match item {
        ItemType::Tree => t * 0.45,
        ItemType::Wall => t * 0.25,
        ItemType::None => 0.0,
    };
    map.tile_world_position(pos) + Vec3::new(t * 0.5, height, t * 0.5)
}

fn spawn_item(
    commands: &mut Commands,
    assets: &SceneAssets,
    map: &TileMap,
    pos: IVec2,
    item: ItemType,
) -> Option<Entity> {
    let mesh = assets.item_mesh(item)?;
    let entity = commands
        .spawn((
            ItemInstance(pos),
            Mesh3d(mesh),
            MeshMaterial3d(assets.item_material(item)),
            Transform::from_translation(item_translation(map, pos, item)),
        ))
        .id();
    Some(entity)
}

/// Spawns the initial map, its items and the ground strip in front of it.
pub fn spawn_park_scene(
    mut commands: Commands,
    map: Res<TileMap>,
    generator: Res<TileGenerator>,
    assets: Res<SceneAssets>,
    mut tile_meshes: ResMut<TileMeshes>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut index: ResMut<SceneIndex>,
) {
    for (pos, cell) in map.cells() {
        let mesh = tile_meshes.get_or_upload(&generator, &mut meshes, cell.group, cell.floor);
        let entity = commands
            .spawn((
                TileInstance(pos),
                Mesh3d(mesh),
                MeshMaterial3d(assets.floor.clone()),
                Transform::from_translation(map.tile_world_position(pos)),
            ))
            .id();
        index.tiles.insert(pos, entity);
    }

    for (pos, item) in map.placed_items() {
        if let Some(entity) = spawn_item(&mut commands, &assets, &map, pos, item) {
            index.items.insert(pos, entity);
        }
    }

    let ground = map.outer_ground();
    commands.spawn((
        OuterGroundInstance,
        Mesh3d(meshes.add(ground.build_mesh(&generator).into_mesh())),
        MeshMaterial3d(assets.floor.clone()),
        Transform::from_translation(ground.origin),
    ));

    info!(
        "park scene spawned: {} tiles, {} items",
        index.tiles.len(),
        index.items.len()
    );
}

/// Applies the map's recorded changes to the scene entities.
#[allow(clippy::too_many_arguments)]
pub fn sync_tile_changes(
    mut commands: Commands,
    mut map: ResMut<TileMap>,
    generator: Res<TileGenerator>,
    assets: Res<SceneAssets>,
    mut tile_meshes: ResMut<TileMeshes>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut index: ResMut<SceneIndex>,
    mut tiles: Query<&mut Mesh3d, With<TileInstance>>,
) {
    if map.pending_changes().is_empty() {
        return;
    }

    for change in map.drain_changes() {
        match change {
            TileMapChange::Tile(pos) => {
                let (group, floor) = map.tile_at(pos);
                let mesh = tile_meshes.get_or_upload(&generator, &mut meshes, group, floor);
                if let Some(&entity) = index.tiles.get(&pos) {
                    if let Ok(mut current) = tiles.get_mut(entity) {
                        current.0 = mesh;
                        continue;
                    }
                }
                let entity = commands
                    .spawn((
                        TileInstance(pos),
                        Mesh3d(mesh),
                        MeshMaterial3d(assets.floor.clone()),
                        Transform::from_translation(map.tile_world_position(pos)),
                    ))
                    .id();
                index.tiles.insert(pos, entity);
            }
            TileMapChange::ItemPlaced(pos, item) => {
                if let Some(old) = index.items.remove(&pos) {
                    commands.entity(old).despawn();
                }
                if let Some(entity) = spawn_item(&mut commands, &assets, &map, pos, item) {
                    index.items.insert(pos, entity);
                }
            }
            TileMapChange::ItemRemoved(pos) => {
                if let Some(entity) = index.items.remove(&pos) {
                    commands.entity(entity).despawn();
                }
            }
        }
    }
}

/// Respawns the tile preview entities whenever the preview changes.
#[allow(clippy::too_many_arguments)]
pub fn sync_tile_previews(
    mut commands: Commands,
    map: Res<TileMap>,
    generator: Res<TileGenerator>,
    assets: Res<SceneAssets>,
    mut tile_meshes: ResMut<TileMeshes>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut shown: ResMut<ShownPreview>,
) {
    if !map.is_changed() || shown.tiles.as_slice() == map.preview_tiles() {
        return;
    }

    for entity in shown.entities.drain(..) {
        commands.entity(entity).despawn();
    }
    shown.tiles = map.preview_tiles().to_vec();

    for tile in map.preview_tiles() {
        let mesh = tile_meshes.get_or_upload(&generator, &mut meshes, tile.group, tile.floor);
        let material = if tile.placement {
            assets.floor_preview.clone()
        } else {
            assets.floor.clone()
        };
        let entity = commands
            .spawn((
                TilePreviewInstance,
                Mesh3d(mesh),
                MeshMaterial3d(material),
                Transform::from_translation(
                    map.tile_world_position(tile.pos) + Vec3::Y * PREVIEW_LIFT,
                ),
            ))
            .id();
        shown.entities.push(entity);
    }
}

/// Keeps one preview entity per item type, moved and shown as the map says.
pub fn sync_item_previews(
    mut commands: Commands,
    map: Res<TileMap>,
    assets: Res<SceneAssets>,
    mut index: ResMut<SceneIndex>,
    mut previews: Query<(&mut Transform, &mut Visibility), With<ItemPreviewInstance>>,
) {
    if !map.is_changed() {
        return;
    }

    for &ItemPreview { item, pos, visible } in map.item_previews() {
        let translation = item_translation(&map, pos, item) + Vec3::Y * PREVIEW_LIFT;
        let visibility = if visible {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };

        if let Some(&entity) = index.item_previews.get(&item) {
            if let Ok((mut transform, mut shown)) = previews.get_mut(entity) {
                transform.translation = translation;
                *shown = visibility;
                continue;
            }
        }
        let Some(mesh) = assets.item_mesh(item) else {
            continue;
        };
        let entity = commands
            .spawn((
                ItemPreviewInstance(item),
                Mesh3d(mesh),
                MeshMaterial3d(assets.item_preview.clone()),
                Transform::from_translation(translation),
                visibility,
            ))
            .id();
        index.item_previews.insert(item, entity);
    }
}

/// Swaps materials of objects whose selection state changed.
pub fn apply_selection_tint(
    mut map: ResMut<TileMap>,
    index: Res<SceneIndex>,
    mut selection_materials: ResMut<SelectionMaterials>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut instances: Query<&mut MeshMaterial3d<StandardMaterial>>,
) {
    if !map.has_selection_diffs() {
        return;
    }

    for diff in map.drain_selection_diffs() {
        for object in diff.deselected {
            let Some(entity) = index.entity_of(object) else {
                continue;
            };
            if let Ok(mut material) = instances.get_mut(entity) {
                material.0 = selection_materials.normal_variant(&material.0);
            }
        }
        for object in diff.selected {
            let Some(entity) = index.entity_of(object) else {
                continue;
            };
            if let Ok(mut material) = instances.get_mut(entity) {
                material.0 = selection_materials.selected_variant(&material.0, &mut materials);
            }
        }
    }
}
