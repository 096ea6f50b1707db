//! # User Interface
//!
//! GUI windows drawn with Dear ImGui over the 3D view.
//!
//! - [`WindowBase`] - hooks every window implements (open, close, frame, exit)
//! - [`WindowModal`] - a window that blocks input to the others while open
//! - [`NoDrop`] / [`DragAndDrop`] - see-through windows while an item is dragged
//! - [`WindowManager`] - owns the windows, the modal stack and key focus
//! - [`UiManager`] - imgui context, winit platform and wgpu renderer
//!
//! ```no_run
//! use ashlands::ui::{IntCoord, IntSize, WindowManager, WindowModal};
//!
//! let mut windows = WindowManager::new(IntSize::new(1200, 800));
//! let id = windows.add_window(Box::new(WindowModal::message(
//!     "quick_save",
//!     IntCoord::new(0, 0, 320, 120),
//!     "Game saved.",
//! )));
//! windows.center(id);
//! windows.set_visible(id, true);
//! ```

pub mod layout;
pub mod manager;
pub mod modal;
pub mod no_drop;
pub mod window_base;
pub mod window_manager;

// Re-export main types
pub use layout::{IntCoord, IntPoint, IntSize, Layout, Widget};
pub use manager::UiManager;
pub use modal::WindowModal;
pub use no_drop::{DragAndDrop, DraggedItem, NoDrop};
pub use window_base::WindowBase;
pub use window_manager::{WindowId, WindowManager};
