mod aabb;
mod color;
mod ray;
mod triangle;

pub use aabb::AABB;
pub use color::Color;
pub use ray::{intersect_aabb, slab_interval, sphere_roots, Ray};
pub use triangle::{moller_trumbore_intersect, TriangleIntersection};
