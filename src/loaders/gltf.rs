use anyhow::{bail, Context, Result};
use glam::{Mat4, Vec3};
use std::path::Path;

use crate::math::Color;
use crate::scene::MeshData;

/// Flattened glTF model ready to become a `Shape::Mesh`
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub mesh: MeshData,
    /// Base color of the first material found, white if none is set
    pub color: Color,
}

/// Loads every mesh primitive of every scene as one triangle soup
///
/// Node transforms are baked into the vertices, so the result is in the
/// model's root space.
pub fn load_gltf_mesh(path: impl AsRef<Path>) -> Result<LoadedModel> {
    let path = path.as_ref();
    log::info!("Loading glTF file: {}", path.display());

    let (gltf, buffers, _images) =
        gltf::import(path).with_context(|| format!("Failed to load glTF file: {}", path.display()))?;

    log::debug!(
        "glTF contents: {} scenes, {} nodes, {} meshes",
        gltf.scenes().count(),
        gltf.nodes().count(),
        gltf.meshes().count()
    );

    let mut triangles = Vec::new();
    let mut color = None;
    for scene in gltf.scenes() {
        for node in scene.nodes() {
            process_node(&node, &buffers, &Mat4::IDENTITY, &mut triangles, &mut color)?;
        }
    }

    let triangle_count = triangles.len();
    let Some(mesh) = MeshData::new(triangles) else {
        bail!("No geometry found in glTF file {}", path.display());
    };

    log::info!("Extracted {} triangles from {}", triangle_count, path.display());
    Ok(LoadedModel {
        mesh,
        color: color.unwrap_or(Color::WHITE),
    })
}

fn process_node(
    node: &gltf::Node,
    buffers: &[gltf::buffer::Data],
    parent_transform: &Mat4,
    triangles: &mut Vec<[Vec3; 3]>,
    color: &mut Option<Color>,
) -> Result<()> {
    let local_transform = Mat4::from_cols_array_2d(&node.transform().matrix());
    let global_transform = *parent_transform * local_transform;

    if let Some(mesh) = node.mesh() {
        process_mesh(&mesh, buffers, &global_transform, triangles, color)?;
    }

    for child in node.children() {
        process_node(&child, buffers, &global_transform, triangles, color)?;
    }

    Ok(())
}

fn process_mesh(
    mesh: &gltf::Mesh,
    buffers: &[gltf::buffer::Data],
    transform: &Mat4,
    triangles: &mut Vec<[Vec3; 3]>,
    color: &mut Option<Color>,
) -> Result<()> {
    log::debug!("Processing mesh: {:?}", mesh.name());

    for primitive in mesh.primitives() {
        if primitive.mode() != gltf::mesh::Mode::Triangles {
            log::warn!("Skipping non-triangle primitive in mesh {:?}", mesh.name());
            continue;
        }

        let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));
        let positions = reader
            .read_positions()
            .context("Mesh primitive has no positions")?;
        let vertices: Vec<Vec3> = positions
            .map(|pos| transform.transform_point3(Vec3::from_array(pos)))
            .collect();

        if vertices.is_empty() {
            continue;
        }

        if color.is_none() {
            let base = primitive.material().pbr_metallic_roughness().base_color_factor();
            *color = Some(Color::rgb(base[0], base[1], base[2]));
        }

        let indices: Vec<u32> = match reader.read_indices() {
            Some(indices) => indices.into_u32().collect(),
            None => (0..vertices.len() as u32).collect(),
        };

        for triangle in indices.chunks_exact(3) {
            let corner = |i: u32| {
                vertices
                    .get(i as usize)
                    .copied()
                    .with_context(|| format!("Index {} out of range for {} vertices", i, vertices.len()))
            };
            triangles.push([corner(triangle[0])?, corner(triangle[1])?, corner(triangle[2])?]);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_an_error() {
        let err = load_gltf_mesh("/definitely/not/here.glb").unwrap_err();
        assert!(format!("{err:#}").contains("Failed to load glTF file"));
    }
}
