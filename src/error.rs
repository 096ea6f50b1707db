//! Error types shared by the rendering and GUI layers.

use crate::config::ConfigError;
use crate::gfx::scene::NodeId;

/// Errors raised by the rendering manager and the scene graph.
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    /// Accessor that has no backing implementation yet
    #[error("unimplemented: {0}")]
    Unimplemented(&'static str),

    /// A node id that does not (or no longer) refers to a live node
    #[error("unknown scene node {0:?}")]
    UnknownNode(NodeId),

    /// Attaching the node would make it its own ancestor
    #[error("scene node {0:?} cannot be attached below itself")]
    Cycle(NodeId),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Surface or device setup failed
    #[error("surface error: {0}")]
    Surface(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;
