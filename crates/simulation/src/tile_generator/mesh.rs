//! `TileMesh`: plain vertex buffers for one tile (or a combined strip of
//! tiles), convertible into a Bevy `Mesh`.

use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;

use crate::config::{ATLAS_TEXTURE_SIZE, ATLAS_TILE_SIZE};

use super::layout::PixelQuad;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TileMesh {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl TileMesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the mesh of one tile from its pixel-space pieces.
    pub fn from_quads(quads: &[PixelQuad], tile_dimension: f32) -> Self {
        let tile_px = ATLAS_TILE_SIZE as f32;
        let tex_px = ATLAS_TEXTURE_SIZE as f32;
        let scale = tile_dimension / tile_px;

        let mut mesh = Self::new();
        for q in quads {
            let x0 = q.u0 as f32 * scale;
            let x1 = q.u1 as f32 * scale;
            // Pixel v grows towards -Z.
            let z0 = (tile_px - q.v1 as f32) * scale;
            let z1 = (tile_px - q.v0 as f32) * scale;

            let su0 = q.src_u as f32 / tex_px;
            let su1 = (q.src_u + q.u1 - q.u0) as f32 / tex_px;
            let sv0 = q.src_v as f32 / tex_px;
            let sv1 = (q.src_v + q.v1 - q.v0) as f32 / tex_px;

            mesh.push_quad(x0, z0, x1, z1, [[su0, sv1], [su1, sv1], [su1, sv0], [su0, sv0]]);
        }
        mesh
    }

    /// Flat quad on the ground plane facing +Y. `uvs` follow the vertex order
    /// (x0,z0), (x1,z0), (x1,z1), (x0,z1).
    fn push_quad(&mut self, x0: f32, z0: f32, x1: f32, z1: f32, uvs: [[f32; 2]; 4]) {
        let vi = self.positions.len() as u32;
        self.positions.push([x0, 0.0, z0]);
        self.positions.push([x1, 0.0, z0]);
        self.positions.push([x1, 0.0, z1]);
        self.positions.push([x0, 0.0, z1]);
        self.normals.extend_from_slice(&[[0.0, 1.0, 0.0]; 4]);
        self.uvs.extend_from_slice(&uvs);
        self.indices
            .extend_from_slice(&[vi, vi + 2, vi + 1, vi, vi + 3, vi + 2]);
    }

    /// Appends `other` translated by `offset`.
    pub fn append(&mut self, other: &TileMesh, offset: Vec3) {
        let base = self.positions.len() as u32;
        self.positions.extend(
            other
                .positions
                .iter()
                .map(|p| [p[0] + offset.x, p[1] + offset.y, p[2] + offset.z]),
        );
        self.normals.extend_from_slice(&other.normals);
        self.uvs.extend_from_slice(&other.uvs);
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Ground-plane area covered by the triangles.
    pub fn area(&self) -> f32 {
        self.indices
            .chunks_exact(3)
            .map(|tri| {
                let a = self.positions[tri[0] as usize];
                let b = self.positions[tri[1] as usize];
                let c = self.positions[tri[2] as usize];
                ((b[0] - a[0]) * (c[2] - a[2]) - (c[0] - a[0]) * (b[2] - a[2])).abs() * 0.5
            })
            .sum()
    }

    pub fn into_mesh(self) -> Mesh {
        Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::RENDER_WORLD | RenderAssetUsages::MAIN_WORLD,
        )
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, self.positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, self.normals)
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, self.uvs)
        .with_inserted_indices(Indices::U32(self.indices))
    }
}
