use bevy::prelude::*;

use park_simulation::tile_map::TileMap;
use park_simulation::visitor::Visitor;

use crate::scene_assets::SceneAssets;

/// Height of the visitor capsule's centre above the ground, in tiles.
const BODY_HEIGHT: f32 = 0.2;

#[derive(Component)]
pub struct VisitorBody;

pub fn spawn_visitor_bodies(
    mut commands: Commands,
    assets: Res<SceneAssets>,
    query: Query<(Entity, &Visitor), Without<VisitorBody>>,
) {
    for (entity, visitor) in &query {
        commands.entity(entity).insert((
            VisitorBody,
            Mesh3d(assets.visitor_mesh.clone()),
            MeshMaterial3d(assets.visitor.clone()),
            Transform::from_translation(visitor.translation()),
        ));
    }
}

/// Places each body at its visitor's position, facing along its heading.
pub fn update_visitor_transforms(
    map: Res<TileMap>,
    mut query: Query<(&Visitor, &mut Transform), With<VisitorBody>>,
) {
    let lift = Vec3::Y * map.tile_dimension() * BODY_HEIGHT;
    for (visitor, mut transform) in &mut query {
        transform.translation = visitor.translation() + lift;
        let facing = Vec3::new(visitor.heading.x, 0.0, visitor.heading.y);
        if let Ok(dir) = Dir3::new(facing) {
            transform.look_to(dir, Dir3::Y);
        }
    }
}
