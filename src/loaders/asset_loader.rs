use anyhow::{Context, Result};
use futures::channel::oneshot;
use glam::Vec3;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::gltf::{load_gltf_mesh, LoadedModel};
use crate::config::ModelConfig;
use crate::math::Color;
use crate::scene::{Material, Node, NodeId, Scene, Shape, Side};
use crate::transform::Transform;

/// A model to load and where to put it once loaded
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRequest {
    pub name: String,
    pub path: PathBuf,
    pub transform: Transform,
    /// Overrides the model's own base color
    pub color: Option<Color>,
}

impl ModelRequest {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "model".to_string());
        Self {
            name,
            path,
            transform: Transform::IDENTITY,
            color: None,
        }
    }

    pub fn from_config(config: &ModelConfig) -> Self {
        let mut request = Self::new(&config.path);
        request.transform = Transform::from_position(Vec3::from_array(config.position))
            .with_scale(Vec3::splat(config.scale));
        request.color = config.color;
        request
    }
}

struct PendingModel {
    request: ModelRequest,
    receiver: oneshot::Receiver<Result<LoadedModel>>,
}

/// Loads models on worker threads and hands them to the scene when ready
///
/// Nothing here blocks the frame loop: `attach_ready` only collects loads
/// that already finished.
#[derive(Default)]
pub struct AssetLoader {
    pending: Vec<PendingModel>,
}

impl AssetLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start loading a glTF model in the background
    pub fn load_model(&mut self, request: ModelRequest) -> Result<()> {
        self.load_with(request, |path| load_gltf_mesh(path))
    }

    /// Start a background load with a custom loader function
    pub fn load_with<F>(&mut self, request: ModelRequest, load: F) -> Result<()>
    where
        F: FnOnce(&Path) -> Result<LoadedModel> + Send + 'static,
    {
        let (sender, receiver) = oneshot::channel();
        let path = request.path.clone();

        std::thread::Builder::new()
            .name(format!("asset-loader-{}", request.name))
            .spawn(move || {
                // Receiver gone means the loader was dropped; nobody is waiting
                let _ = sender.send(load(&path));
            })
            .context("Failed to spawn asset loader thread")?;

        log::info!("Loading model {} from {}", request.name, request.path.display());
        self.pending.push(PendingModel { request, receiver });
        Ok(())
    }

    /// Number of loads still in flight
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Add every finished model to the scene, returning the new nodes
    pub fn attach_ready(&mut self, scene: &mut Scene) -> Vec<NodeId> {
        let mut attached = Vec::new();
        let mut still_pending = Vec::with_capacity(self.pending.len());

        for mut pending in self.pending.drain(..) {
            match pending.receiver.try_recv() {
                Ok(Some(result)) => {
                    if let Some(id) = attach(scene, &pending.request, result) {
                        attached.push(id);
                    }
                }
                Ok(None) => still_pending.push(pending),
                Err(oneshot::Canceled) => {
                    log::error!("Loader for {} stopped without a result", pending.request.name);
                }
            }
        }

        self.pending = still_pending;
        attached
    }

    /// Block until every pending load finishes, then attach them
    pub fn wait_all(&mut self, scene: &mut Scene) -> Vec<NodeId> {
        let mut attached = Vec::new();
        for pending in self.pending.drain(..) {
            match futures::executor::block_on(pending.receiver) {
                Ok(result) => {
                    if let Some(id) = attach(scene, &pending.request, result) {
                        attached.push(id);
                    }
                }
                Err(oneshot::Canceled) => {
                    log::error!("Loader for {} stopped without a result", pending.request.name);
                }
            }
        }
        attached
    }
}

fn attach(scene: &mut Scene, request: &ModelRequest, result: Result<LoadedModel>) -> Option<NodeId> {
    match result {
        Ok(model) => {
            let color = request.color.unwrap_or(model.color);
            let node = Node::new(
                request.name.clone(),
                Shape::Mesh(Arc::new(model.mesh)),
                Material::lambert(color).with_side(Side::Double),
            )
            .with_transform(request.transform);
            let id = scene.add(node);
            log::info!("Attached model {}", request.name);
            Some(id)
        }
        Err(err) => {
            log::error!("Failed to load model {}: {:#}", request.name, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::MeshData;
    use anyhow::anyhow;
    use std::sync::mpsc;
    use std::time::Duration;

    fn triangle() -> LoadedModel {
        LoadedModel {
            mesh: MeshData::new(vec![[Vec3::ZERO, Vec3::X, Vec3::Y]]).unwrap(),
            color: Color::rgb(0.5, 0.5, 0.5),
        }
    }

    #[test]
    fn request_named_after_file() {
        let request = ModelRequest::new("assets/tank.glb");
        assert_eq!(request.name, "tank");
        assert_eq!(request.transform, Transform::IDENTITY);
    }

    #[test]
    fn attach_ready_skips_unfinished_loads() {
        let (release, gate) = mpsc::channel::<()>();
        let mut loader = AssetLoader::new();
        loader
            .load_with(ModelRequest::new("slow.glb"), move |_| {
                gate.recv_timeout(Duration::from_secs(5)).ok();
                Ok(triangle())
            })
            .unwrap();

        let mut scene = Scene::new();
        assert!(loader.attach_ready(&mut scene).is_empty());
        assert_eq!(loader.pending(), 1);
        assert!(scene.is_empty());

        release.send(()).unwrap();
        let attached = loader.wait_all(&mut scene);
        assert_eq!(attached.len(), 1);
        assert_eq!(loader.pending(), 0);
        assert_eq!(scene[attached[0]].name, "slow");
    }

    #[test]
    fn color_override_and_transform_applied() {
        let mut request = ModelRequest::new("model.glb");
        request.color = Some(Color::WHITE);
        request.transform = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));

        let mut loader = AssetLoader::new();
        loader.load_with(request, |_| Ok(triangle())).unwrap();
        let mut scene = Scene::new();
        let attached = loader.wait_all(&mut scene);

        let node = &scene[attached[0]];
        assert_eq!(node.material.color, Color::WHITE);
        assert_eq!(node.transform.position, Vec3::new(1.0, 2.0, 3.0));
        assert!(matches!(node.shape, Shape::Mesh(_)));
    }

    #[test]
    fn failed_load_is_dropped() {
        let mut loader = AssetLoader::new();
        loader
            .load_with(ModelRequest::new("broken.glb"), |path| {
                Err(anyhow!("cannot parse {}", path.display()))
            })
            .unwrap();

        let mut scene = Scene::new();
        assert!(loader.wait_all(&mut scene).is_empty());
        assert_eq!(loader.pending(), 0);
        assert!(scene.is_empty());
    }
}
