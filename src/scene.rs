use glam::Vec3;
use std::ops::{Index, IndexMut};
use std::sync::Arc;

use crate::math::{Color, AABB};
use crate::transform::Transform;

/// Handle to a node; only `Scene::add` creates them and nodes are never
/// removed, so a handle from a scene always resolves in that scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Triangle soup in the node's local space
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub triangles: Vec<[Vec3; 3]>,
    pub bounds: AABB,
}

impl MeshData {
    /// `None` when there are no triangles to bound
    pub fn new(triangles: Vec<[Vec3; 3]>) -> Option<Self> {
        let points: Vec<Vec3> = triangles.iter().flatten().copied().collect();
        let bounds = AABB::from_points(&points)?;
        Some(Self { triangles, bounds })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Axis-aligned box centered on the origin
    Cuboid { half_extents: Vec3 },
    Sphere { radius: f32 },
    /// Rectangle in the XZ plane, normal +Y
    Plane { width: f32, depth: f32 },
    Mesh(Arc<MeshData>),
}

/// Which faces of a surface are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Front,
    Back,
    Double,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shading {
    /// Flat color, ignores lights
    Basic,
    /// Diffuse lighting from ambient and point lights
    Lambert,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pattern {
    Solid,
    /// World-space XZ checkerboard alternating with `color`
    Checker { other: Color, cell: f32 },
    /// One color per cuboid face: +X, -X, +Y, -Y, +Z, -Z
    FaceColors([Color; 6]),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Color,
    pub shading: Shading,
    pub side: Side,
    pub pattern: Pattern,
}

impl Material {
    pub fn basic(color: Color) -> Self {
        Self {
            color,
            shading: Shading::Basic,
            side: Side::Front,
            pattern: Pattern::Solid,
        }
    }

    pub fn lambert(color: Color) -> Self {
        Self {
            shading: Shading::Lambert,
            ..Self::basic(color)
        }
    }

    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    pub fn with_pattern(mut self, pattern: Pattern) -> Self {
        self.pattern = pattern;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: String,
    pub shape: Shape,
    pub material: Material,
    pub transform: Transform,
    pub visible: bool,
}

impl Node {
    pub fn new(name: impl Into<String>, shape: Shape, material: Material) -> Self {
        Self {
            name: name.into(),
            shape,
            material,
            transform: Transform::IDENTITY,
            visible: true,
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointLight {
    pub color: Color,
    pub intensity: f32,
    /// Light fades linearly to zero at this distance; 0 means no falloff
    pub distance: f32,
    pub position: Vec3,
    /// Node moved along with the light
    pub marker: Option<NodeId>,
}

impl PointLight {
    pub fn new(color: Color, intensity: f32, distance: f32, position: Vec3) -> Self {
        Self {
            color,
            intensity,
            distance,
            position,
            marker: None,
        }
    }

    /// Falloff factor for a surface `range` units away
    pub fn attenuation(&self, range: f32) -> f32 {
        if self.distance > 0.0 {
            (1.0 - range / self.distance).max(0.0)
        } else {
            1.0
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    nodes: Vec<Node>,
    pub lights: Vec<PointLight>,
    pub ambient: Color,
    /// Shown where no surface is hit
    pub background: Color,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            lights: Vec::new(),
            ambient: Color::BLACK,
            background: Color::BLACK,
        }
    }

    pub fn add(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn add_light(&mut self, light: PointLight) -> usize {
        self.lights.push(light);
        self.lights.len() - 1
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().position(|node| node.name == name).map(NodeId)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(index, node)| (NodeId(index), node))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Move a light and its marker node together
    pub fn move_light(&mut self, index: usize, position: Vec3) {
        let Some(light) = self.lights.get_mut(index) else {
            return;
        };
        light.position = position;
        if let Some(marker) = light.marker {
            self.nodes[marker.0].transform.position = position;
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<NodeId> for Scene {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}

impl IndexMut<NodeId> for Scene {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }
}
