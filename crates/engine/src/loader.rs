//! Asset loading boundary.
//!
//! Loads are fire-and-forget: the session hands out [`LoadRequest`]s and later
//! receives [`LoadCompletion`]s in whatever order the loader finishes them.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use shared::InstanceId;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::error::LoadError;
use crate::placement::Aabb;

/// Opaque renderer-side mesh identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MeshHandle(pub u64);

/// What a successful load yields
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedAsset {
    pub bounds: Aabb,
    pub mesh: MeshHandle,
}

/// Resolves an asset path to its native bounds and a mesh handle
pub trait AssetLoader: Send + Sync {
    fn load(&self, path: &str) -> Result<LoadedAsset, LoadError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadRequest {
    pub instance_id: InstanceId,
    pub asset_path: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadCompletion {
    pub instance_id: InstanceId,
    pub result: Result<LoadedAsset, LoadError>,
}

/// Runs loads on a tokio runtime and queues their completions
pub struct LoadDispatcher {
    loader: Arc<dyn AssetLoader>,
    runtime: Handle,
    tx: mpsc::UnboundedSender<LoadCompletion>,
    rx: mpsc::UnboundedReceiver<LoadCompletion>,
}

impl LoadDispatcher {
    pub fn new(loader: Arc<dyn AssetLoader>, runtime: Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            loader,
            runtime,
            tx,
            rx,
        }
    }

    /// Start a load; its completion shows up in [`Self::try_next`]
    pub fn dispatch(&self, request: LoadRequest) {
        let loader = Arc::clone(&self.loader);
        let tx = self.tx.clone();
        self.runtime.spawn_blocking(move || {
            let result = loader.load(&request.asset_path);
            // Receiver lives as long as the dispatcher; a closed channel means
            // the session is gone and nobody cares about the result.
            let _ = tx.send(LoadCompletion {
                instance_id: request.instance_id,
                result,
            });
        });
    }

    /// Next finished load, if any, without waiting
    pub fn try_next(&mut self) -> Option<LoadCompletion> {
        self.rx.try_recv().ok()
    }

    /// Wait for the next finished load
    pub async fn next(&mut self) -> Option<LoadCompletion> {
        self.rx.recv().await
    }
}

/// Loader over a fixed table of known assets
#[derive(Debug, Default, Clone)]
pub struct MemoryLoader {
    assets: HashMap<String, LoadedAsset>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an asset; handles are assigned in insertion order
    pub fn insert(&mut self, path: impl Into<String>, bounds: Aabb) -> MeshHandle {
        let handle = MeshHandle(self.assets.len() as u64 + 1);
        self.assets.insert(
            path.into(),
            LoadedAsset {
                bounds,
                mesh: handle,
            },
        );
        handle
    }

    pub fn with(mut self, path: impl Into<String>, bounds: Aabb) -> Self {
        self.insert(path, bounds);
        self
    }
}

impl AssetLoader for MemoryLoader {
    fn load(&self, path: &str) -> Result<LoadedAsset, LoadError> {
        self.assets
            .get(path)
            .cloned()
            .ok_or_else(|| LoadError::new(path, "asset not found"))
    }
}
