use glam::Vec3;

use crate::config::SceneConfig;
use crate::scene::{Material, Node, NodeId, Pattern, PointLight, Scene, Shape, Side};
use crate::transform::Transform;

pub const CUBE_NAME: &str = "cube";
pub const LIGHT_MARKER_NAME: &str = "light-marker";

/// Chase demo scene plus the handles the frame loop drives
#[derive(Debug, Clone)]
pub struct ChaseScene {
    pub scene: Scene,
    /// The controlled object
    pub cube: NodeId,
    pub light: usize,
}

/// Sky box, checkered floor, face-colored cube and a point light with a marker
pub fn create_chase_scene(config: &SceneConfig) -> ChaseScene {
    let mut scene = Scene::new();
    scene.ambient = config.ambient;
    scene.background = config.sky.color;

    // Seen from the inside
    scene.add(Node::new(
        "sky",
        Shape::Cuboid {
            half_extents: Vec3::splat(config.sky.size * 0.5),
        },
        Material::basic(config.sky.color).with_side(Side::Back),
    ));

    let floor = &config.floor;
    scene.add(
        Node::new(
            "floor",
            Shape::Plane {
                width: floor.size,
                depth: floor.size,
            },
            Material::lambert(floor.color)
                .with_side(Side::Double)
                .with_pattern(Pattern::Checker {
                    other: floor.checker_color,
                    cell: floor.checker_cell,
                }),
        )
        .with_transform(Transform::from_position(Vec3::new(0.0, floor.height, 0.0))),
    );

    let cube = scene.add(
        Node::new(
            CUBE_NAME,
            Shape::Cuboid {
                half_extents: Vec3::splat(config.cube.size * 0.5),
            },
            Material::lambert(config.cube.face_colors[0])
                .with_pattern(Pattern::FaceColors(config.cube.face_colors)),
        )
        .with_transform(Transform::from_position(Vec3::from_array(config.chase.spawn))),
    );

    let light_config = &config.light;
    let light_position = Vec3::from_array(light_config.position);
    let mut light = PointLight::new(
        light_config.color,
        light_config.intensity,
        light_config.distance,
        light_position,
    );
    if light_config.marker_radius > 0.0 {
        let marker = scene.add(
            Node::new(
                LIGHT_MARKER_NAME,
                Shape::Sphere {
                    radius: light_config.marker_radius,
                },
                Material::basic(light_config.color),
            )
            .with_transform(Transform::from_position(light_position)),
        );
        light.marker = Some(marker);
    }
    let light = scene.add_light(light);

    log::debug!("Chase scene built with {} nodes", scene.len());

    ChaseScene { scene, cube, light }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Shading;

    #[test]
    fn cube_sits_at_spawn() {
        let chase = create_chase_scene(&SceneConfig::default());
        let cube = &chase.scene[chase.cube];

        assert_eq!(cube.name, CUBE_NAME);
        assert_eq!(cube.transform.position, Vec3::new(0.0, 25.1, 0.0));
        assert_eq!(
            cube.shape,
            Shape::Cuboid {
                half_extents: Vec3::splat(25.0)
            }
        );
        assert!(matches!(cube.material.pattern, Pattern::FaceColors(_)));
    }

    #[test]
    fn sky_is_drawn_from_inside() {
        let chase = create_chase_scene(&SceneConfig::default());
        let sky = chase.scene.find("sky").unwrap();

        assert_eq!(chase.scene[sky].material.side, Side::Back);
        assert_eq!(chase.scene[sky].material.shading, Shading::Basic);
    }

    #[test]
    fn light_marker_follows_light() {
        let chase = create_chase_scene(&SceneConfig::default());
        let light = &chase.scene.lights[chase.light];
        let marker = light.marker.unwrap();

        assert_eq!(chase.scene[marker].transform.position, light.position);
        assert_eq!(chase.scene.len(), 4);
    }

    #[test]
    fn zero_marker_radius_skips_marker() {
        let mut config = SceneConfig::default();
        config.light.marker_radius = 0.0;
        let chase = create_chase_scene(&config);

        assert!(chase.scene.lights[chase.light].marker.is_none());
        assert!(chase.scene.find(LIGHT_MARKER_NAME).is_none());
    }
}
