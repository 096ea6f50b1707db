//! Arena-backed scene graph
//!
//! Nodes live in a slot map and refer to each other by [`NodeId`]. Each node has
//! at most one parent, so the graph is a tree rooted at [`SceneGraph::root`].

use slotmap::SlotMap;

use super::node::{FrameStamp, Node, NodeCallback, NodeId};
use super::state_set::StateSet;
use crate::error::{RenderError, Result};

pub struct SceneGraph {
    nodes: SlotMap<NodeId, Node>,
    root: NodeId,
    frame: FrameStamp,
}

impl SceneGraph {
    /// Creates a graph holding a single root group
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::group("Root"));
        Self {
            nodes,
            root,
            frame: FrameStamp::default(),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Adds a detached node; attach it with [`add_child`](Self::add_child)
    pub fn add_node(&mut self, node: Node) -> NodeId {
        self.nodes.insert(node)
    }

    /// Adds `node` under `parent` in one step
    pub fn insert_child(&mut self, parent: NodeId, node: Node) -> Result<NodeId> {
        if !self.nodes.contains_key(parent) {
            return Err(RenderError::UnknownNode(parent));
        }
        let child = self.add_node(node);
        self.add_child(parent, child)?;
        Ok(child)
    }

    /// Appends `child` to `parent`, detaching it from any previous parent
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        if !self.nodes.contains_key(parent) {
            return Err(RenderError::UnknownNode(parent));
        }
        let previous = self
            .nodes
            .get(child)
            .ok_or(RenderError::UnknownNode(child))?
            .parent;
        let mut ancestor = Some(parent);
        while let Some(id) = ancestor {
            if id == child {
                return Err(RenderError::Cycle(child));
            }
            ancestor = self.nodes[id].parent;
        }
        if let Some(previous) = previous {
            self.remove_child(previous, child);
        }

        self.nodes[parent].children.push(child);
        self.nodes[child].parent = Some(parent);
        Ok(())
    }

    /// Detaches `child` from `parent` without freeing it
    ///
    /// Returns false when `child` was not a child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        let Some(parent_node) = self.nodes.get_mut(parent) else {
            return false;
        };
        let Some(index) = parent_node.children.iter().position(|c| *c == child) else {
            return false;
        };
        parent_node.children.remove(index);
        if let Some(child_node) = self.nodes.get_mut(child) {
            child_node.parent = None;
        }
        true
    }

    /// Detaches `id` from its parent and frees it together with all descendants
    ///
    /// Returns the number of nodes freed. The root cannot be removed.
    pub fn remove_subtree(&mut self, id: NodeId) -> Result<usize> {
        if id == self.root {
            return Ok(0);
        }
        let parent = self.nodes.get(id).ok_or(RenderError::UnknownNode(id))?.parent;
        if let Some(parent) = parent {
            self.remove_child(parent, id);
        }

        let mut removed = 0;
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.remove(next) {
                stack.extend(node.children);
                removed += 1;
            }
        }
        Ok(removed)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id).map(|n| n.children()).unwrap_or(&[])
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    /// Depth-first search below (and including) `start`
    pub fn find_by_name(&self, start: NodeId, name: &str) -> Option<NodeId> {
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            let node = self.nodes.get(id)?;
            if node.name == name {
                return Some(id);
            }
            stack.extend(node.children.iter().rev());
        }
        None
    }

    pub fn get_or_create_state_set(&mut self, id: NodeId) -> Result<&mut StateSet> {
        self.nodes
            .get_mut(id)
            .map(Node::get_or_create_state_set)
            .ok_or(RenderError::UnknownNode(id))
    }

    pub fn add_update_callback(
        &mut self,
        id: NodeId,
        callback: Box<dyn NodeCallback>,
    ) -> Result<()> {
        let node = self.nodes.get_mut(id).ok_or(RenderError::UnknownNode(id))?;
        node.update_callbacks.push(callback);
        Ok(())
    }

    pub fn set_node_mask(&mut self, id: NodeId, mask: u32) -> Result<()> {
        let node = self.nodes.get_mut(id).ok_or(RenderError::UnknownNode(id))?;
        node.node_mask = mask;
        Ok(())
    }

    /// Runs the update traversal for one frame
    ///
    /// Nodes are visited depth first in child order. A node with a zero mask is
    /// skipped along with its subtree.
    pub fn update(&mut self, frame: FrameStamp) {
        self.frame = frame;
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get_mut(id) else {
                continue;
            };
            if !node.is_visible() {
                continue;
            }
            node.run_update_callbacks(&frame);
            stack.extend(node.children.iter().rev());
        }
    }

    /// Stamp of the most recent update traversal
    pub fn frame(&self) -> FrameStamp {
        self.frame
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}
