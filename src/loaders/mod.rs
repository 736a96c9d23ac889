pub mod asset_loader;
pub mod gltf;

pub use asset_loader::{AssetLoader, ModelRequest};
pub use gltf::{load_gltf_mesh, LoadedModel};
