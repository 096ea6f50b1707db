//! # Resource System
//!
//! Resolves data paths and turns model names into scene graph nodes. Mesh and
//! texture decoding are handled elsewhere; a model instance here is a named
//! group that later stages populate.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::gfx::scene::{Node, NodeId, SceneGraph};

/// Normalises a data path: lowercase, forward slashes, no leading slash
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
        .trim_start_matches('/')
        .to_lowercase()
}

/// Instantiates models into a scene graph
#[derive(Debug, Default)]
pub struct SceneManager {
    instance_count: usize,
}

impl SceneManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an instance of `model` below `parent`
    pub fn instantiate(
        &mut self,
        graph: &mut SceneGraph,
        parent: NodeId,
        model: &str,
    ) -> Result<NodeId> {
        let id = graph.insert_child(parent, Node::group(normalize_path(model)))?;
        self.instance_count += 1;
        Ok(id)
    }

    /// Number of instances created so far
    pub fn instance_count(&self) -> usize {
        self.instance_count
    }
}

#[derive(Debug)]
pub struct ResourceSystem {
    data_dir: PathBuf,
    scene_manager: SceneManager,
}

impl ResourceSystem {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            scene_manager: SceneManager::new(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Maps a data path onto the data directory
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.data_dir.join(normalize_path(path))
    }

    pub fn scene_manager(&self) -> &SceneManager {
        &self.scene_manager
    }

    pub fn scene_manager_mut(&mut self) -> &mut SceneManager {
        &mut self.scene_manager
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("\\Meshes\\X\\Ex_Common.NIF"), "meshes/x/ex_common.nif");
        assert_eq!(normalize_path("sky/clouds.dds"), "sky/clouds.dds");
    }

    #[test]
    fn test_resolve_under_data_dir() {
        let resources = ResourceSystem::new("/data");
        assert_eq!(
            resources.resolve("Meshes\\Sky_Atmosphere.nif"),
            PathBuf::from("/data/meshes/sky_atmosphere.nif")
        );
    }

    #[test]
    fn test_instantiate_names_node_after_model() {
        let mut graph = SceneGraph::new();
        let mut scene_manager = SceneManager::new();
        let root = graph.root();
        let id = scene_manager
            .instantiate(&mut graph, root, "Meshes\\Door.NIF")
            .unwrap();

        assert_eq!(graph.node(id).unwrap().name, "meshes/door.nif");
        assert_eq!(graph.parent(id), Some(root));
        assert_eq!(scene_manager.instance_count(), 1);
    }
}
