//! Scene graph nodes and update callbacks

use std::fmt;

use cgmath::Vector3;
use slotmap::new_key_type;

use super::light::LightSource;
use super::state_set::StateSet;

new_key_type! {
    /// Handle to a node stored in a [`SceneGraph`](super::SceneGraph)
    pub struct NodeId;
}

/// Node mask that makes a node and its subtree visible to every traversal
pub const NODE_MASK_ALL: u32 = !0;

/// What a node is, beyond being a container for children
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Group,
    /// Root of a lit subtree. Lights below it are assigned slots starting at
    /// `start_light`.
    LightManager { start_light: u32 },
    LightSource(LightSource),
    /// Offsets its subtree by `position`, relative to the parent
    Transform { position: Vector3<f32> },
}

/// Timing information handed to update callbacks
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStamp {
    pub frame_number: u64,
    /// Seconds since the session started
    pub reference_time: f64,
}

/// Per-frame callback attached to a node
///
/// Callbacks run during [`SceneGraph::update`](super::SceneGraph::update),
/// before the node's children are visited.
pub trait NodeCallback {
    fn update(&mut self, node: &mut Node, frame: &FrameStamp);
}

impl<F> NodeCallback for F
where
    F: FnMut(&mut Node, &FrameStamp),
{
    fn update(&mut self, node: &mut Node, frame: &FrameStamp) {
        self(node, frame)
    }
}

pub struct Node {
    pub name: String,
    pub kind: NodeKind,
    pub node_mask: u32,
    pub(super) parent: Option<NodeId>,
    pub(super) children: Vec<NodeId>,
    pub(super) state_set: Option<StateSet>,
    pub(super) update_callbacks: Vec<Box<dyn NodeCallback>>,
}

impl Node {
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            node_mask: NODE_MASK_ALL,
            parent: None,
            children: Vec::new(),
            state_set: None,
            update_callbacks: Vec::new(),
        }
    }

    pub fn group(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Group)
    }

    pub fn transform(name: impl Into<String>, position: Vector3<f32>) -> Self {
        Self::new(name, NodeKind::Transform { position })
    }

    /// Offset of a transform node; `None` for every other kind
    pub fn position(&self) -> Option<Vector3<f32>> {
        match self.kind {
            NodeKind::Transform { position } => Some(position),
            _ => None,
        }
    }

    /// Moves a transform node; returns false for every other kind
    pub fn set_position(&mut self, position: Vector3<f32>) -> bool {
        match &mut self.kind {
            NodeKind::Transform { position: current } => {
                *current = position;
                true
            }
            _ => false,
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn state_set(&self) -> Option<&StateSet> {
        self.state_set.as_ref()
    }

    pub fn state_set_mut(&mut self) -> Option<&mut StateSet> {
        self.state_set.as_mut()
    }

    pub fn get_or_create_state_set(&mut self) -> &mut StateSet {
        self.state_set.get_or_insert_with(StateSet::new)
    }

    pub fn set_state_set(&mut self, state_set: StateSet) {
        self.state_set = Some(state_set);
    }

    pub fn is_visible(&self) -> bool {
        self.node_mask != 0
    }

    pub fn light_source(&self) -> Option<&LightSource> {
        match &self.kind {
            NodeKind::LightSource(source) => Some(source),
            _ => None,
        }
    }

    pub fn light_source_mut(&mut self) -> Option<&mut LightSource> {
        match &mut self.kind {
            NodeKind::LightSource(source) => Some(source),
            _ => None,
        }
    }

    pub fn update_callback_count(&self) -> usize {
        self.update_callbacks.len()
    }

    pub(super) fn run_update_callbacks(&mut self, frame: &FrameStamp) {
        let mut callbacks = std::mem::take(&mut self.update_callbacks);
        for callback in callbacks.iter_mut() {
            callback.update(self, frame);
        }
        // keep anything a callback registered while running
        callbacks.append(&mut self.update_callbacks);
        self.update_callbacks = callbacks;
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("node_mask", &self.node_mask)
            .field("children", &self.children.len())
            .field("update_callbacks", &self.update_callbacks.len())
            .finish()
    }
}
