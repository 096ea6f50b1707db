//! # World Rendering
//!
//! The [`RenderingManager`] ties the scene graph, the viewer and the world
//! state together: cell lighting, the sun, fog, the sky and the per-cell
//! object groups.

pub mod cell;
pub mod objects;
pub mod rendering_manager;
pub mod sky;

// Re-export main types
pub use cell::{AmbientLight, Cell, CellId, ObjectRef};
pub use objects::{Actors, Objects};
pub use rendering_manager::{RenderingManager, StateUpdater};
pub use sky::SkyManager;
