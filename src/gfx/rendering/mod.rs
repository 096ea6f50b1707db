//! Frame rendering: surface management and the sky backdrop pass.

pub mod render_engine;

// Re-export main types
pub use render_engine::RenderEngine;
