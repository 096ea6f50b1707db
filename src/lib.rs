//! Ashlands
//!
//! World rendering setup and GUI windows for a 3D role-playing game engine,
//! built on wgpu, winit and Dear ImGui.
//!
//! - [`gfx::render::RenderingManager`] - lighting, sun, fog, sky and per-cell objects
//! - [`gfx::scene`] - the scene graph those are built on
//! - [`ui`] - window base, modal windows and drag-and-drop transparency
//! - [`AshlandsApp`] - the winit application shell tying them together

pub mod app;
pub mod config;
pub mod error;
pub mod gfx;
pub mod resource;
pub mod ui;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::AshlandsApp;
pub use config::RenderSettings;
pub use error::{RenderError, Result};
