//! Per-cell object groups
//!
//! Every loaded cell gets one group node under the light root. Objects of the
//! cell are instantiated below that group, so unloading a cell is a single
//! subtree removal.

use std::collections::HashMap;

use super::cell::CellId;
use crate::error::Result;
use crate::gfx::scene::{Node, NodeId, SceneGraph};
use crate::resource::SceneManager;

/// Animated actors (NPCs and creatures); the renderer does not draw them yet
#[derive(Debug, Default)]
pub struct Actors {
    _private: (),
}

pub struct Objects {
    light_root: NodeId,
    cells: HashMap<CellId, NodeId>,
}

impl Objects {
    pub fn new(light_root: NodeId) -> Self {
        Self {
            light_root,
            cells: HashMap::new(),
        }
    }

    /// Node all cell groups are attached to
    pub fn root(&self) -> NodeId {
        self.light_root
    }

    /// Instantiates `model` in `cell`, creating the cell group on first use
    ///
    /// The instance is wrapped in a group named `name`.
    pub fn insert_model(
        &mut self,
        graph: &mut SceneGraph,
        scene_manager: &mut SceneManager,
        cell: &CellId,
        name: &str,
        model: &str,
    ) -> Result<NodeId> {
        let cell_node = match self.cells.get(cell) {
            Some(node) => *node,
            None => {
                let node = graph.insert_child(self.light_root, Node::group(cell.to_string()))?;
                self.cells.insert(cell.clone(), node);
                node
            }
        };

        let object = graph.insert_child(cell_node, Node::group(name))?;
        scene_manager.instantiate(graph, object, model)?;
        Ok(object)
    }

    /// Frees the cell group and every object in it; unknown cells are ignored
    pub fn remove_cell(&mut self, graph: &mut SceneGraph, cell: &CellId) -> Result<()> {
        let Some(node) = self.cells.remove(cell) else {
            return Ok(());
        };
        let removed = graph.remove_subtree(node)?;
        log::debug!("removed cell {cell} ({removed} nodes)");
        Ok(())
    }

    pub fn has_cell(&self, cell: &CellId) -> bool {
        self.cells.contains_key(cell)
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of objects inserted into `cell`
    pub fn object_count(&self, graph: &SceneGraph, cell: &CellId) -> usize {
        self.cells
            .get(cell)
            .map(|node| graph.children(*node).len())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (SceneGraph, SceneManager, Objects) {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let light_root = graph.insert_child(root, Node::group("lights")).unwrap();
        (graph, SceneManager::new(), Objects::new(light_root))
    }

    #[test]
    fn test_objects_grouped_by_cell() {
        let (mut graph, mut scene_manager, mut objects) = setup();
        let balmora = CellId::new("Balmora");
        let exterior = CellId::exterior(-3, -2);

        objects
            .insert_model(&mut graph, &mut scene_manager, &balmora, "door", "door.nif")
            .unwrap();
        objects
            .insert_model(&mut graph, &mut scene_manager, &balmora, "chest", "chest.nif")
            .unwrap();
        objects
            .insert_model(&mut graph, &mut scene_manager, &exterior, "rock", "rock.nif")
            .unwrap();

        assert_eq!(objects.cell_count(), 2);
        assert_eq!(objects.object_count(&graph, &balmora), 2);
        assert_eq!(objects.object_count(&graph, &exterior), 1);
        assert_eq!(graph.children(objects.root()).len(), 2);
    }

    #[test]
    fn test_remove_cell_frees_its_nodes() {
        let (mut graph, mut scene_manager, mut objects) = setup();
        let cell = CellId::new("Seyda Neen");
        let door = objects
            .insert_model(&mut graph, &mut scene_manager, &cell, "door", "door.nif")
            .unwrap();
        let before = graph.node_count();

        objects.remove_cell(&mut graph, &cell).unwrap();

        assert!(!objects.has_cell(&cell));
        assert!(!graph.contains(door));
        // cell group, object group and model instance
        assert_eq!(graph.node_count(), before - 3);
        assert_eq!(objects.object_count(&graph, &cell), 0);
    }

    #[test]
    fn test_remove_unknown_cell_is_noop() {
        let (mut graph, _, mut objects) = setup();
        let count = graph.node_count();
        objects
            .remove_cell(&mut graph, &CellId::new("Vivec"))
            .unwrap();
        assert_eq!(graph.node_count(), count);
    }
}
