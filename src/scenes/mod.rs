mod chase;

pub use chase::{create_chase_scene, ChaseScene, CUBE_NAME, LIGHT_MARKER_NAME};
