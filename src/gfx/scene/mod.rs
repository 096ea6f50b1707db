//! # Scene Graph Module
//!
//! A small retained-mode scene graph: a tree of nodes, each optionally carrying
//! render state and per-frame update callbacks. The rendering manager builds its
//! lighting setup on top of it and the GPU layer reads the resulting state once
//! per frame.
//!
//! ## Key Components
//!
//! - [`SceneGraph`] - Node arena, hierarchy operations and the update traversal
//! - [`Node`] / [`NodeKind`] - Groups, light managers and light sources
//! - [`StateSet`] - Render modes and typed attributes (light model, fog)
//! - [`StateSetController`] - Per-frame writers of state set values
//!
//! ## Usage
//!
//! ```
//! use ashlands::gfx::scene::{Mode, Node, SceneGraph, StateValue};
//!
//! let mut graph = SceneGraph::new();
//! let terrain = graph.insert_child(graph.root(), Node::group("Terrain")).unwrap();
//! graph
//!     .get_or_create_state_set(terrain)
//!     .unwrap()
//!     .set_mode(Mode::CullFace, StateValue::On);
//! ```

pub mod controller;
pub mod graph;
pub mod light;
pub mod node;
pub mod state_set;
pub mod util;

// Re-export main types
pub use controller::{StateSetController, StateSetUpdater};
pub use graph::SceneGraph;
pub use light::{Light, LightSource};
pub use node::{FrameStamp, Node, NodeCallback, NodeId, NodeKind, NODE_MASK_ALL};
pub use state_set::{
    AttributeType, Fog, LightModel, Mode, StateAttribute, StateSet, StateValue,
};
pub use util::colour_from_rgb;
