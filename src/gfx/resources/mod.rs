//! GPU resource management
//!
//! Uniform blocks and bind groups shared by all pipelines.

pub mod global_bindings;

// Re-export main types
pub use global_bindings::{FrameUBO, FrameUniform, GlobalBindings};
