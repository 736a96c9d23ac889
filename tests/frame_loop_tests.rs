use chase_camera::camera::PerspectiveCamera;
use chase_camera::config::SceneConfig;
use chase_camera::core::{Button, KeySnapshot};
use chase_camera::render::FrameRecorder;
use chase_camera::scene::{Material, Node, Scene, Shape};
use chase_camera::math::Color;
use chase_camera::transform::Transform;
use chase_camera::{FrameContext, FrameLoop};
use glam::{Quat, Vec3};
use std::f32::consts::{FRAC_PI_2, PI};

const DELTAS: [f32; 6] = [0.0, 0.001, 1.0 / 60.0, 0.1, 0.5, 2.0];
const OFFSET: Vec3 = Vec3::new(0.0, 50.0, 200.0);

fn approx(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-2
}

/// Chase demo with the light orbit switched off
fn chase_loop() -> FrameLoop<FrameRecorder> {
    let mut config = SceneConfig::default();
    config.light.orbit = None;
    let context = FrameContext::from_config(&config, 4.0 / 3.0);
    FrameLoop::new(context, FrameRecorder::new())
}

/// Chase loop whose cube starts at an arbitrary pose
fn chase_loop_at(transform: Transform) -> FrameLoop<FrameRecorder> {
    let mut frame_loop = chase_loop();
    let context = frame_loop.context_mut();
    let target = context.target;
    context.scene[target].transform = transform;
    frame_loop
}

fn poses() -> Vec<Transform> {
    vec![
        Transform::IDENTITY,
        Transform::from_position(Vec3::new(120.0, 25.1, -340.0)),
        Transform::from_position(Vec3::new(-50.0, 25.1, 80.0)).with_rotation(Quat::from_rotation_y(2.3)),
        Transform::from_position(Vec3::new(10.0, 0.0, 10.0)).with_rotation(Quat::from_rotation_y(-PI)),
    ]
}

fn keys(buttons: &[Button]) -> KeySnapshot {
    KeySnapshot::new(buttons)
}

#[cfg(test)]
mod movement_tests {
    use super::*;

    #[test]
    fn test_translation_is_linear_in_dt() {
        let cases = [
            (Button::KeyW, Vec3::NEG_Z),
            (Button::KeyS, Vec3::Z),
            (Button::KeyQ, Vec3::NEG_X),
            (Button::KeyE, Vec3::X),
        ];

        for pose in poses() {
            for (button, local_axis) in cases {
                for dt in DELTAS {
                    let mut frame_loop = chase_loop_at(pose);
                    frame_loop.tick(dt, &keys(&[button])).unwrap();

                    let expected = pose.position + pose.rotation * local_axis * (200.0 * dt);
                    let actual = frame_loop.context().target_transform().position;
                    assert!(
                        approx(actual, expected),
                        "{:?} for dt {} from {:?}: expected {:?}, got {:?}",
                        button,
                        dt,
                        pose.position,
                        expected,
                        actual
                    );
                    assert!(frame_loop.context().target_transform().rotation.abs_diff_eq(pose.rotation, 1e-6));
                }
            }
        }
    }

    #[test]
    fn test_rotation_is_linear_in_dt() {
        for pose in poses() {
            for dt in DELTAS {
                for (button, sign) in [(Button::KeyA, 1.0), (Button::KeyD, -1.0)] {
                    let mut frame_loop = chase_loop_at(pose);
                    frame_loop.tick(dt, &keys(&[button])).unwrap();

                    let transform = frame_loop.context().target_transform();
                    let expected = pose.rotation * Quat::from_rotation_y(sign * FRAC_PI_2 * dt);
                    assert!(
                        transform.rotation.abs_diff_eq(expected, 1e-5),
                        "{:?} for dt {}",
                        button,
                        dt
                    );
                    assert_eq!(transform.position, pose.position, "Turning must not move the cube");
                }
            }
        }
    }

    #[test]
    fn test_no_keys_leaves_cube_untouched() {
        for pose in poses() {
            let mut frame_loop = chase_loop_at(pose);
            for dt in DELTAS {
                frame_loop.tick(dt, &KeySnapshot::none()).unwrap();
            }
            assert_eq!(*frame_loop.context().target_transform(), pose);
        }
    }

    #[test]
    fn test_unbound_keys_are_ignored() {
        let mut frame_loop = chase_loop();
        let start = *frame_loop.context().target_transform();
        frame_loop
            .tick(1.0, &keys(&[Button::Space, Button::ArrowUp, Button::Shift]))
            .unwrap();
        assert_eq!(*frame_loop.context().target_transform(), start);
    }

    #[test]
    fn test_opposing_keys_cancel() {
        for pose in poses() {
            let mut frame_loop = chase_loop_at(pose);
            frame_loop
                .tick(
                    0.25,
                    &keys(&[Button::KeyW, Button::KeyS, Button::KeyQ, Button::KeyE, Button::KeyA, Button::KeyD]),
                )
                .unwrap();

            let transform = frame_loop.context().target_transform();
            assert!(approx(transform.position, pose.position));
            assert!(transform.rotation.abs_diff_eq(pose.rotation, 1e-5));
        }
    }

    #[test]
    fn test_unequal_opposing_moves_do_not_cancel() {
        // Forward on one tick, then forward and backward together after speeding up
        let mut frame_loop = chase_loop();
        frame_loop.context_mut().settings.move_speed = 100.0;
        frame_loop.tick(1.0, &keys(&[Button::KeyW])).unwrap();
        frame_loop.tick(1.0, &keys(&[Button::KeyW, Button::KeyS])).unwrap();

        let position = frame_loop.context().target_transform().position;
        assert!(approx(position, Vec3::new(0.0, 25.1, -100.0)));
    }

    #[test]
    fn test_translation_applies_before_rotation() {
        let mut frame_loop = chase_loop();
        frame_loop.tick(1.0, &keys(&[Button::KeyW, Button::KeyA])).unwrap();

        // Moved straight ahead, then turned in place
        let transform = frame_loop.context().target_transform();
        assert!(approx(transform.position, Vec3::new(0.0, 25.1, -200.0)));
        assert!((transform.heading() - FRAC_PI_2).abs() < 1e-4);
    }

    #[test]
    fn test_rotation_is_unrestricted() {
        let mut frame_loop = chase_loop();
        // Three and a half full turns
        for _ in 0..14 {
            frame_loop.tick(1.0, &keys(&[Button::KeyA])).unwrap();
        }

        let heading = frame_loop.context().target_transform().heading();
        assert!((heading.abs() - PI).abs() < 1e-3, "Expected to face +Z, heading {}", heading);
    }
}

#[cfg(test)]
mod camera_tests {
    use super::*;

    #[test]
    fn test_camera_targets_cube_after_every_tick() {
        let script = [
            keys(&[Button::KeyW]),
            keys(&[Button::KeyA, Button::KeyW]),
            keys(&[Button::KeyE]),
            KeySnapshot::none(),
            keys(&[Button::KeyD, Button::KeyS]),
        ];
        let mut frame_loop = chase_loop();

        for (i, held) in script.iter().enumerate() {
            frame_loop.tick(0.3, held).unwrap();
            let context = frame_loop.context();
            assert_eq!(
                context.camera.target,
                context.target_transform().position,
                "Camera lost the cube on tick {}",
                i
            );
        }
    }

    #[test]
    fn test_camera_sits_at_offset_in_cube_frame() {
        for pose in poses() {
            let mut frame_loop = chase_loop_at(pose);
            frame_loop.tick(0.2, &keys(&[Button::KeyW, Button::KeyD])).unwrap();

            let context = frame_loop.context();
            let transform = context.target_transform();
            let expected = transform.position + transform.rotation * OFFSET;
            assert!(
                approx(context.camera.position, expected),
                "Expected camera at {:?}, got {:?}",
                expected,
                context.camera.position
            );
        }
    }

    #[test]
    fn test_camera_distance_is_constant() {
        let mut frame_loop = chase_loop();
        for held in [keys(&[Button::KeyW, Button::KeyA]), keys(&[Button::KeyQ]), keys(&[Button::KeyD])] {
            frame_loop.tick(0.7, &held).unwrap();
            let context = frame_loop.context();
            let distance = context.camera.position.distance(context.target_transform().position);
            assert!((distance - OFFSET.length()).abs() < 1e-2);
        }
    }

    #[test]
    fn test_custom_offset() {
        let mut config = SceneConfig::default();
        config.chase.camera_offset = [10.0, 0.0, 0.0];
        let mut frame_loop = FrameLoop::new(FrameContext::from_config(&config, 1.0), FrameRecorder::new());
        frame_loop.tick(1.0, &keys(&[Button::KeyA])).unwrap();

        // Local +X points toward -Z after a quarter turn left
        let camera = &frame_loop.context().camera;
        assert!(approx(camera.position, Vec3::new(0.0, 25.1, -10.0)));
    }

    #[test]
    fn test_frame_context_on_plain_scene() {
        let mut scene = Scene::new();
        let target = scene.add(
            Node::new("ship", Shape::Sphere { radius: 2.0 }, Material::basic(Color::WHITE))
                .with_transform(Transform::from_position(Vec3::new(5.0, 0.0, 5.0))),
        );
        let camera = PerspectiveCamera::new(60.0, 1.0, 0.1, 1000.0);
        let mut frame_loop = FrameLoop::new(FrameContext::new(scene, camera, target), FrameRecorder::new());

        assert!(approx(frame_loop.context().camera.position, Vec3::new(5.0, 50.0, 205.0)));
        frame_loop.tick(0.5, &keys(&[Button::KeyS])).unwrap();
        assert!(approx(frame_loop.context().target_transform().position, Vec3::new(5.0, 0.0, 105.0)));
    }
}

#[cfg(test)]
mod render_submission_tests {
    use super::*;

    #[test]
    fn test_each_tick_submits_one_frame() {
        let mut frame_loop = chase_loop();
        for _ in 0..5 {
            frame_loop.tick(0.1, &keys(&[Button::KeyW])).unwrap();
        }

        let frames = &frame_loop.backend().frames;
        assert_eq!(frames.len(), 5);
        for (i, recorded) in frames.iter().enumerate() {
            assert_eq!(recorded.frame.number, i as u64);
            assert!((recorded.frame.delta - 0.1).abs() < 1e-6);
            assert_eq!(recorded.camera.target, recorded.target_position);
        }
        assert!((frames[4].frame.time - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_submitted_camera_matches_post_update_state() {
        let mut frame_loop = chase_loop();
        frame_loop.tick(0.5, &keys(&[Button::KeyW])).unwrap();

        let recorded = frame_loop.backend().last().copied().unwrap();
        assert_eq!(recorded.camera, frame_loop.context().camera);
        assert!(approx(recorded.target_position, Vec3::new(0.0, 25.1, -100.0)));
    }

    #[test]
    fn test_stats_count_frames() {
        let mut frame_loop = chase_loop();
        for _ in 0..8 {
            frame_loop.tick(0.125, &KeySnapshot::none()).unwrap();
        }

        assert_eq!(frame_loop.stats().frames, 8);
        assert_eq!(frame_loop.stats().fps, 8.0);
    }
}
