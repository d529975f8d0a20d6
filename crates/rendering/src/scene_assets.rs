//! Meshes, materials and the procedural floor atlas shared by the scene.

use std::collections::HashMap;

use bevy::prelude::*;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

use park_simulation::config::{ParkConfig, ATLAS_TEXTURE_SIZE};
use park_simulation::tile_generator::{atlas_rect, FloorGroup, FloorType, TexType, TileGenerator};
use park_simulation::tile_map::ItemType;

const GRASS_COLOR: [u8; 4] = [86, 140, 64, 255];
const WALKWAY_COLOR: [u8; 4] = [196, 178, 140, 255];
const WALKWAY_BORDER_COLOR: [u8; 4] = [120, 112, 96, 255];

const TREE_COLOR: Color = Color::srgb(0.18, 0.42, 0.2);
const WALL_COLOR: Color = Color::srgb(0.55, 0.52, 0.5);
const VISITOR_COLOR: Color = Color::srgb(0.85, 0.35, 0.3);
const PREVIEW_TINT: Color = Color::srgba(0.6, 0.8, 1.0, 0.6);
const SELECTED_TINT: Color = Color::srgb(1.0, 0.45, 0.35);

/// Every atlas piece a group draws, used to paint the atlas.
const ALL_TEX: [TexType; 17] = [
    TexType::FullTile,
    TexType::InCornerTopLeft,
    TexType::InCornerTopRight,
    TexType::InCornerBottomLeft,
    TexType::InCornerBottomRight,
    TexType::OutCornerTopLeft,
    TexType::OutCornerTopRight,
    TexType::OutCornerBottomLeft,
    TexType::OutCornerBottomRight,
    TexType::OutSharpCornerTopLeft,
    TexType::OutSharpCornerTopRight,
    TexType::OutSharpCornerBottomLeft,
    TexType::OutSharpCornerBottomRight,
    TexType::OutEdgeLeft,
    TexType::OutEdgeRight,
    TexType::OutEdgeTop,
    TexType::OutEdgeBottom,
];

/// GPU meshes of the tile models, uploaded the first time a model is shown.
#[derive(Resource, Default)]
pub struct TileMeshes {
    handles: HashMap<(FloorGroup, FloorType), Handle<Mesh>>,
}

impl TileMeshes {
    pub fn get_or_upload(
        &mut self,
        generator: &TileGenerator,
        meshes: &mut Assets<Mesh>,
        group: FloorGroup,
        floor: FloorType,
    ) -> Handle<Mesh> {
        self.handles
            .entry((group, floor))
            .or_insert_with(|| meshes.add(generator.get_model(group, floor).clone().into_mesh()))
            .clone()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

/// Materials and primitive meshes created once at startup.
#[derive(Resource)]
pub struct SceneAssets {
    pub floor: Handle<StandardMaterial>,
    pub floor_preview: Handle<StandardMaterial>,
    pub tree_mesh: Handle<Mesh>,
    pub wall_mesh: Handle<Mesh>,
    pub tree: Handle<StandardMaterial>,
    pub wall: Handle<StandardMaterial>,
    pub item_preview: Handle<StandardMaterial>,
    pub visitor_mesh: Handle<Mesh>,
    pub visitor: Handle<StandardMaterial>,
}

impl SceneAssets {
    pub fn item_mesh(&self, item: ItemType) -> Option<Handle<Mesh>> {
        match item {
            ItemType::None => None,
            ItemType::Tree => Some(self.tree_mesh.clone()),
            ItemType::Wall => Some(self.wall_mesh.clone()),
        }
    }

    pub fn item_material(&self, item: ItemType) -> Handle<StandardMaterial> {
        match item {
            ItemType::Wall => self.wall.clone(),
            _ => self.tree.clone(),
        }
    }
}

pub fn setup_scene_assets(
    mut commands: Commands,
    config: Res<ParkConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
) {
    let t = config.tile_dimension;
    let atlas = images.add(paint_floor_atlas());

    let floor = materials.add(StandardMaterial {
        base_color_texture: Some(atlas.clone()),
        perceptual_roughness: 0.9,
        ..default()
    });
    let floor_preview = materials.add(StandardMaterial {
        base_color: PREVIEW_TINT,
        base_color_texture: Some(atlas),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });

    let assets = SceneAssets {
        floor,
        floor_preview,
        tree_mesh: meshes.add(Cone::new(t * 0.35, t * 0.9)),
        wall_mesh: meshes.add(Cuboid::new(t, t * 0.5, t * 0.15)),
        tree: materials.add(TREE_COLOR),
        wall: materials.add(WALL_COLOR),
        item_preview: materials.add(StandardMaterial {
            base_color: PREVIEW_TINT,
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            ..default()
        }),
        visitor_mesh: meshes.add(Capsule3d::new(t * 0.08, t * 0.25)),
        visitor: materials.add(VISITOR_COLOR),
    };
    commands.insert_resource(assets);
}

/// Paints each group's atlas pieces in flat colours at the positions the tile
/// models sample from.
pub fn paint_floor_atlas() -> Image {
    let size = ATLAS_TEXTURE_SIZE as usize;
    let mut pixels = vec![[0u8; 4]; size * size];

    for group in [FloorGroup::Grass, FloorGroup::WalkwayOnGrass] {
        for tex in ALL_TEX {
            let Some(rect) = atlas_rect(group, tex) else {
                continue;
            };
            let color = match (group, tex) {
                (FloorGroup::Grass, _) => GRASS_COLOR,
                (_, TexType::FullTile) => WALKWAY_COLOR,
                _ => WALKWAY_BORDER_COLOR,
            };
            for y in rect.y..rect.y + rect.h {
                for x in rect.x..rect.x + rect.w {
                    pixels[y as usize * size + x as usize] = color;
                }
            }
        }
    }

    let data: Vec<u8> = pixels.iter().flatten().copied().collect();
    let mut image = Image::new(
        Extent3d {
            width: size as u32,
            height: size as u32,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        data,
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::RENDER_WORLD | RenderAssetUsages::MAIN_WORLD,
    );
    image.sampler = bevy::image::ImageSampler::nearest();
    image
}

/// Selected variants of scene materials, created on first use. Also maps each
/// variant back to the material it was made from.
#[derive(Resource, Default)]
pub struct SelectionMaterials {
    selected: HashMap<AssetId<StandardMaterial>, Handle<StandardMaterial>>,
    original: HashMap<AssetId<StandardMaterial>, Handle<StandardMaterial>>,
}

impl SelectionMaterials {
    pub fn selected_variant(
        &mut self,
        normal: &Handle<StandardMaterial>,
        materials: &mut Assets<StandardMaterial>,
    ) -> Handle<StandardMaterial> {
        if self.original.contains_key(&normal.id()) {
            return normal.clone();
        }
        if let Some(handle) = self.selected.get(&normal.id()) {
            return handle.clone();
        }
        let mut tinted = materials.get(normal).cloned().unwrap_or_default();
        tinted.base_color = SELECTED_TINT;
        let handle = materials.add(tinted);
        self.selected.insert(normal.id(), handle.clone());
        self.original.insert(handle.id(), normal.clone());
        handle
    }

    /// The material a selected variant was made from, or `material` itself.
    pub fn normal_variant(&self, material: &Handle<StandardMaterial>) -> Handle<StandardMaterial> {
        self.original
            .get(&material.id())
            .cloned()
            .unwrap_or_else(|| material.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atlas_paints_walkway_full_tile() {
        let image = paint_floor_atlas();
        let size = ATLAS_TEXTURE_SIZE as usize;
        let rect = atlas_rect(FloorGroup::WalkwayOnGrass, TexType::FullTile).unwrap();
        let i = ((rect.y as usize + 10) * size + rect.x as usize + 10) * 4;
        assert_eq!(&image.data[i..i + 4], &WALKWAY_COLOR);
        // Top-left pixel is outside every piece.
        assert_eq!(&image.data[0..4], &[0, 0, 0, 0]);
    }

    #[test]
    fn test_selected_variant_is_cached_and_reversible() {
        let mut materials = Assets::<StandardMaterial>::default();
        let normal = materials.add(StandardMaterial::default());
        let mut map = SelectionMaterials::default();

        let selected = map.selected_variant(&normal, &mut materials);
        assert_ne!(selected.id(), normal.id());
        assert_eq!(map.selected_variant(&normal, &mut materials).id(), selected.id());
        // Selecting an already selected material keeps it.
        assert_eq!(map.selected_variant(&selected, &mut materials).id(), selected.id());
        assert_eq!(map.normal_variant(&selected).id(), normal.id());
        assert_eq!(map.normal_variant(&normal).id(), normal.id());
        assert_eq!(materials.get(&selected).unwrap().base_color, SELECTED_TINT);
    }
}
