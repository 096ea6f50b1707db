//! # Graphics Module
//!
//! Everything between the world state and the GPU.
//!
//! - **Scene Graph** ([`scene`]) - nodes, render state and update callbacks
//! - **Viewer** ([`viewer`]) - main camera, culling and the camera manipulator
//! - **World Rendering** ([`render`]) - the [`RenderingManager`] with sky and cell objects
//! - **Camera System** ([`camera`]) - orbit camera used as the default manipulator
//! - **GPU Frame** ([`rendering`], [`resources`]) - surface, uniform block and sky pass

pub mod camera;
pub mod render;
pub mod rendering;
pub mod resources;
pub mod scene;
pub mod viewer;

// Re-export commonly used types
pub use camera::OrbitCamera;
pub use render::RenderingManager;
pub use rendering::RenderEngine;
pub use viewer::Viewer;
