use chase_camera::config::SceneConfig;
use chase_camera::core::{Button, KeySnapshot};
use chase_camera::math::{intersect_aabb, sphere_roots, Ray};
use chase_camera::render::{Framebuffer, FrameRecorder, RayCaster};
use chase_camera::{FrameContext, FrameLoop};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec3;
use std::f32::consts::PI;

/// Generate unit vector for ray directions
fn unit_vector(seed: u32) -> Vec3 {
    let theta = (seed as f32 * 0.123456) % (2.0 * PI);
    let phi = (seed as f32 * 0.789012) % PI;
    Vec3::new(phi.sin() * theta.cos(), phi.sin() * theta.sin(), phi.cos())
}

/// Benchmark: Single AABB intersection (hit case)
fn bench_aabb_intersection_hit(c: &mut Criterion) {
    let min = Vec3::new(-25.0, -25.0, -25.0);
    let max = Vec3::new(25.0, 25.0, 25.0);
    let origin = Vec3::new(0.0, 50.0, 200.0);
    let direction = (Vec3::ZERO - origin).normalize();

    c.bench_function("aabb_intersection_hit", |b| {
        b.iter(|| {
            black_box(intersect_aabb(
                black_box(origin),
                black_box(direction),
                black_box(min),
                black_box(max),
            ))
        })
    });
}

/// Benchmark: Single sphere intersection (miss case)
fn bench_sphere_intersection_miss(c: &mut Criterion) {
    let origin = Vec3::ZERO;
    let direction = Vec3::NEG_Z;
    let center = Vec3::new(10.0, 10.0, -5.0);

    c.bench_function("sphere_intersection_miss", |b| {
        b.iter(|| black_box(sphere_roots(black_box(origin), black_box(direction), center, 1.0)))
    });
}

/// Benchmark: Rays from the chase camera through the whole scene
fn bench_scene_cast(c: &mut Criterion) {
    let context = FrameContext::from_config(&SceneConfig::default(), 4.0 / 3.0);
    let mut caster = RayCaster::new();
    let origin = context.camera.position;

    c.bench_function("scene_cast_1000_rays", |b| {
        b.iter(|| {
            let mut hit_count = 0;
            for i in 0..1000 {
                let ray = Ray::new(origin, unit_vector(i));
                if caster.cast(&context.scene, &ray, context.camera.far).is_some() {
                    hit_count += 1;
                }
            }
            black_box(hit_count)
        })
    });
}

/// Benchmark: Full frame ray cast at several resolutions
fn bench_render_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_frame");
    let context = FrameContext::from_config(&SceneConfig::default(), 4.0 / 3.0);

    for (width, height) in [(160u32, 120u32), (320, 240), (640, 480)] {
        let mut caster = RayCaster::new();
        let mut framebuffer = Framebuffer::new(width, height);

        group.bench_with_input(
            BenchmarkId::new("chase_scene", format!("{}x{}", width, height)),
            &(width, height),
            |b, _| {
                b.iter(|| {
                    caster.render(black_box(&context.scene), black_box(&context.camera), &mut framebuffer);
                })
            },
        );
    }

    group.finish();
}

/// Benchmark: Per-frame update without rendering
fn bench_frame_update(c: &mut Criterion) {
    let context = FrameContext::from_config(&SceneConfig::default(), 4.0 / 3.0);
    let mut frame_loop = FrameLoop::new(context, FrameRecorder::new());
    let held = KeySnapshot::new(&[Button::KeyW, Button::KeyA]);

    c.bench_function("frame_update", |b| {
        b.iter(|| {
            frame_loop.context_mut().update(black_box(1.0 / 60.0), 0.0, &held);
        })
    });
}

criterion_group!(
    benches,
    bench_aabb_intersection_hit,
    bench_sphere_intersection_miss,
    bench_scene_cast,
    bench_render_frame,
    bench_frame_update,
);

criterion_main!(benches);
