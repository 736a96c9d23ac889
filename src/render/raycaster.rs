use glam::{Mat3, Mat4, Vec3};

use crate::camera::{PerspectiveCamera, RayGenerator};
use crate::math::{moller_trumbore_intersect, slab_interval, sphere_roots, Color, Ray};
use crate::scene::{Material, Node, NodeId, Pattern, Scene, Shading, Shape, Side};

const EPSILON: f32 = 1e-4;

/// RGBA8 pixels, row-major from the top-left corner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width as usize) * (height as usize) * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Reallocate for a new size; contents are cleared when the size changes
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == self.width && height == self.height {
            return;
        }
        *self = Self::new(width, height);
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.offset(x, y);
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let i = self.offset(x, y);
        self.pixels[i..i + 4].copy_from_slice(&rgba);
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + x as usize) * 4
    }
}

/// Closest surface along a ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub t: f32,
    pub node: NodeId,
    pub point: Vec3,
    /// World-space normal turned toward the ray origin
    pub normal: Vec3,
    /// Cuboid face index: +X, -X, +Y, -Y, +Z, -Z
    pub face: Option<usize>,
    pub front_facing: bool,
}

struct LocalHit {
    t: f32,
    normal: Vec3,
    face: Option<usize>,
    front_facing: bool,
}

/// Per-frame world/local transforms of a visible node
struct PreparedNode {
    id: NodeId,
    world_to_local: Mat4,
    normal_matrix: Mat3,
}

/// CPU renderer casting one primary ray per pixel
///
/// No shadows or reflections: a pixel is the shaded color of the nearest
/// surface, or the scene background when nothing is hit within the camera's
/// far distance.
#[derive(Default)]
pub struct RayCaster {
    prepared: Vec<PreparedNode>,
}

impl RayCaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera, target: &mut Framebuffer) {
        if target.is_empty() {
            return;
        }
        self.prepare(scene);

        let rays = RayGenerator::new(camera);
        let (width, height) = (target.width(), target.height());
        for y in 0..height {
            let ndc_y = 1.0 - (y as f32 + 0.5) / height as f32 * 2.0;
            for x in 0..width {
                let ndc_x = (x as f32 + 0.5) / width as f32 * 2.0 - 1.0;
                let ray = rays.ray(ndc_x, ndc_y);
                let color = self.trace_prepared(scene, &ray, camera.far);
                target.set_pixel(x, y, color.to_rgba8());
            }
        }
    }

    /// Nearest hit closer than `max_distance`
    pub fn cast(&mut self, scene: &Scene, ray: &Ray, max_distance: f32) -> Option<Hit> {
        self.prepare(scene);
        self.cast_prepared(scene, ray, max_distance)
    }

    /// Shaded color seen along a ray
    pub fn trace(&mut self, scene: &Scene, ray: &Ray, max_distance: f32) -> Color {
        self.prepare(scene);
        self.trace_prepared(scene, ray, max_distance)
    }

    fn prepare(&mut self, scene: &Scene) {
        self.prepared.clear();
        for (id, node) in scene.nodes() {
            if !node.visible {
                continue;
            }
            let world_to_local = node.transform.matrix().inverse();
            // Zero scale collapses the node
            if !world_to_local.is_finite() {
                continue;
            }
            self.prepared.push(PreparedNode {
                id,
                world_to_local,
                normal_matrix: Mat3::from_mat4(world_to_local).transpose(),
            });
        }
    }

    fn trace_prepared(&self, scene: &Scene, ray: &Ray, max_distance: f32) -> Color {
        match self.cast_prepared(scene, ray, max_distance) {
            Some(hit) => shade(scene, &scene[hit.node], &hit),
            None => scene.background,
        }
    }

    fn cast_prepared(&self, scene: &Scene, ray: &Ray, max_distance: f32) -> Option<Hit> {
        let mut best: Option<Hit> = None;
        let mut closest = max_distance;

        for prepared in &self.prepared {
            let node = &scene[prepared.id];
            let local_ray = ray.transformed(&prepared.world_to_local);
            let Some(local) = intersect_shape(&node.shape, node.material.side, &local_ray, closest)
            else {
                continue;
            };

            let mut normal = (prepared.normal_matrix * local.normal).normalize_or_zero();
            if normal.dot(ray.dir) > 0.0 {
                normal = -normal;
            }
            closest = local.t;
            best = Some(Hit {
                t: local.t,
                node: prepared.id,
                point: ray.at(local.t),
                normal,
                face: local.face,
                front_facing: local.front_facing,
            });
        }

        best
    }
}

fn side_accepts(side: Side, front_facing: bool) -> bool {
    match side {
        Side::Front => front_facing,
        Side::Back => !front_facing,
        Side::Double => true,
    }
}

/// Nearest drawable intersection in the shape's local space, `t` in (EPSILON, max_t)
fn intersect_shape(shape: &Shape, side: Side, ray: &Ray, max_t: f32) -> Option<LocalHit> {
    let in_range = |t: f32| t > EPSILON && t < max_t;

    match shape {
        Shape::Cuboid { half_extents } => {
            let (t_near, t_far) = slab_interval(ray.origin, ray.dir, -*half_extents, *half_extents)?;
            // Entering through a face sees its front, leaving sees its back
            let t = [(t_near, true), (t_far, false)]
                .into_iter()
                .find(|&(t, front)| in_range(t) && side_accepts(side, front))?;
            let (face, normal) = cuboid_face(ray.at(t.0), *half_extents);
            Some(LocalHit {
                t: t.0,
                normal,
                face: Some(face),
                front_facing: t.1,
            })
        }
        Shape::Sphere { radius } => {
            let (t0, t1) = sphere_roots(ray.origin, ray.dir, Vec3::ZERO, *radius)?;
            let t = [(t0, true), (t1, false)]
                .into_iter()
                .find(|&(t, front)| in_range(t) && side_accepts(side, front))?;
            Some(LocalHit {
                t: t.0,
                normal: ray.at(t.0) / *radius,
                face: None,
                front_facing: t.1,
            })
        }
        Shape::Plane { width, depth } => {
            if ray.dir.y.abs() < 1e-8 {
                return None;
            }
            let t = -ray.origin.y / ray.dir.y;
            if !in_range(t) {
                return None;
            }
            let point = ray.at(t);
            if point.x.abs() > width * 0.5 || point.z.abs() > depth * 0.5 {
                return None;
            }
            let front_facing = ray.dir.y < 0.0;
            if !side_accepts(side, front_facing) {
                return None;
            }
            Some(LocalHit {
                t,
                normal: Vec3::Y,
                face: None,
                front_facing,
            })
        }
        Shape::Mesh(mesh) => {
            let (t_near, _) = slab_interval(ray.origin, ray.dir, mesh.bounds.min, mesh.bounds.max)?;
            if t_near >= max_t {
                return None;
            }

            let mut best: Option<LocalHit> = None;
            let mut closest = max_t;
            for [v0, v1, v2] in &mesh.triangles {
                let Some(hit) = moller_trumbore_intersect(ray.origin, ray.dir, *v0, *v1, *v2) else {
                    continue;
                };
                if hit.t >= closest || hit.t <= EPSILON || !side_accepts(side, hit.front_facing) {
                    continue;
                }
                closest = hit.t;
                best = Some(LocalHit {
                    t: hit.t,
                    normal: hit.normal,
                    face: None,
                    front_facing: hit.front_facing,
                });
            }
            best
        }
    }
}

/// Face index and outward normal of the cuboid face nearest a surface point
fn cuboid_face(point: Vec3, half_extents: Vec3) -> (usize, Vec3) {
    let relative = (point / half_extents).abs();
    let axis = if relative.x >= relative.y && relative.x >= relative.z {
        0
    } else if relative.y >= relative.z {
        1
    } else {
        2
    };

    let positive = point[axis] >= 0.0;
    let mut normal = Vec3::ZERO;
    normal[axis] = if positive { 1.0 } else { -1.0 };
    (axis * 2 + usize::from(!positive), normal)
}

fn surface_color(material: &Material, hit: &Hit) -> Color {
    match material.pattern {
        Pattern::Solid => material.color,
        Pattern::Checker { other, cell } => {
            let cx = (hit.point.x / cell).floor() as i64;
            let cz = (hit.point.z / cell).floor() as i64;
            if (cx + cz).rem_euclid(2) == 0 {
                material.color
            } else {
                other
            }
        }
        Pattern::FaceColors(colors) => hit.face.map_or(material.color, |face| colors[face]),
    }
}

fn shade(scene: &Scene, node: &Node, hit: &Hit) -> Color {
    let base = surface_color(&node.material, hit);
    if node.material.shading == Shading::Basic {
        return base;
    }

    let mut light = scene.ambient.0;
    for point_light in &scene.lights {
        let to_light = point_light.position - hit.point;
        let distance = to_light.length();
        if distance <= f32::EPSILON {
            continue;
        }
        let lambert = hit.normal.dot(to_light / distance).max(0.0);
        light += point_light.color.0 * (lambert * point_light.intensity * point_light.attenuation(distance));
    }

    base.modulate(Color(light))
}
