//! Drag-and-drop state and see-through windows
//!
//! While an item is being dragged, windows that cannot take a drop fade out
//! under the cursor so the drop reaches the world behind them.

use crate::ui::layout::IntPoint;
use crate::ui::window_base::WindowBase;

/// Lowest alpha a [`NoDrop`] window fades to
pub const NO_DROP_MIN_ALPHA: f32 = 0.13;
/// Alpha change per second while fading
pub const NO_DROP_FADE_SPEED: f32 = 5.0;

/// An item carried by the mouse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraggedItem {
    pub id: String,
    pub count: u32,
}

#[derive(Debug, Default)]
pub struct DragAndDrop {
    item: Option<DraggedItem>,
}

impl DragAndDrop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_on_drag_and_drop(&self) -> bool {
        self.item.is_some()
    }

    pub fn item(&self) -> Option<&DraggedItem> {
        self.item.as_ref()
    }

    pub fn start_drag(&mut self, id: impl Into<String>, count: u32) {
        let item = DraggedItem {
            id: id.into(),
            count,
        };
        log::debug!("drag started: {} x{}", item.id, item.count);
        self.item = Some(item);
    }

    /// Drops or cancels the current drag and returns what was carried
    pub fn finish(&mut self) -> Option<DraggedItem> {
        self.item.take()
    }
}

/// Makes a window transparent to drops while the cursor is over it
#[derive(Debug, Default)]
pub struct NoDrop {
    transparent: bool,
}

impl NoDrop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_transparent(&self) -> bool {
        self.transparent
    }

    /// Updates `window` for one frame of `dt` seconds
    ///
    /// Alpha goes through [`WindowBase::set_alpha`] so windows can react to it.
    pub fn on_frame(
        &mut self,
        dt: f32,
        drag: &DragAndDrop,
        mouse: IntPoint,
        window: &mut dyn WindowBase,
    ) {
        let widget = window.layout().main_widget();
        let inside = widget.coord.inside(mouse);
        let alpha = widget.alpha;

        if drag.is_on_drag_and_drop() && inside {
            self.transparent = true;
        }
        if !inside {
            self.transparent = false;
        }

        window.layout_mut().main_widget_mut().need_mouse_focus = !self.transparent;
        if self.transparent {
            window.set_alpha((alpha - dt * NO_DROP_FADE_SPEED).max(NO_DROP_MIN_ALPHA));
        } else {
            window.set_alpha((alpha + dt * NO_DROP_FADE_SPEED).min(1.0));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::layout::{IntCoord, Layout};
    use approx::assert_relative_eq;

    /// Inventory-sized window that counts alpha writes
    struct Inventory {
        layout: Layout,
        alpha_writes: usize,
    }

    impl Inventory {
        fn new() -> Self {
            Self {
                layout: Layout::new("Inventory", IntCoord::new(0, 0, 100, 100)),
                alpha_writes: 0,
            }
        }

        fn alpha(&self) -> f32 {
            self.layout.main_widget().alpha
        }

        fn need_mouse_focus(&self) -> bool {
            self.layout.main_widget().need_mouse_focus
        }
    }

    impl WindowBase for Inventory {
        fn layout(&self) -> &Layout {
            &self.layout
        }

        fn layout_mut(&mut self) -> &mut Layout {
            &mut self.layout
        }

        fn set_alpha(&mut self, alpha: f32) {
            self.alpha_writes += 1;
            self.layout.main_widget_mut().alpha = alpha;
        }
    }

    fn dragging() -> DragAndDrop {
        let mut drag = DragAndDrop::new();
        drag.start_drag("gold_001", 50);
        drag
    }

    #[test]
    fn test_drag_lifecycle() {
        let mut drag = DragAndDrop::new();
        assert!(!drag.is_on_drag_and_drop());
        drag.start_drag("iron dagger", 1);
        assert_eq!(drag.item().map(|i| i.count), Some(1));
        assert_eq!(drag.finish().map(|i| i.id), Some("iron dagger".to_string()));
        assert!(drag.finish().is_none());
    }

    #[test]
    fn test_fades_while_dragging_over() {
        let mut no_drop = NoDrop::new();
        let mut window = Inventory::new();

        no_drop.on_frame(0.1, &dragging(), IntPoint::new(50, 50), &mut window);
        assert!(no_drop.is_transparent());
        assert!(!window.need_mouse_focus());
        assert_relative_eq!(window.alpha(), 0.5);

        no_drop.on_frame(1.0, &dragging(), IntPoint::new(50, 50), &mut window);
        assert_relative_eq!(window.alpha(), NO_DROP_MIN_ALPHA);
        assert_eq!(window.alpha_writes, 2);
    }

    #[test]
    fn test_far_edge_counts_as_inside() {
        let mut no_drop = NoDrop::new();
        let mut window = Inventory::new();

        no_drop.on_frame(0.1, &dragging(), IntPoint::new(100, 100), &mut window);
        assert!(no_drop.is_transparent());
    }

    #[test]
    fn test_stays_transparent_after_drop_until_mouse_leaves() {
        let mut no_drop = NoDrop::new();
        let mut window = Inventory::new();
        no_drop.on_frame(1.0, &dragging(), IntPoint::new(50, 50), &mut window);

        let idle = DragAndDrop::new();
        no_drop.on_frame(0.1, &idle, IntPoint::new(50, 50), &mut window);
        assert!(no_drop.is_transparent());
        assert_relative_eq!(window.alpha(), NO_DROP_MIN_ALPHA);

        no_drop.on_frame(0.1, &idle, IntPoint::new(150, 50), &mut window);
        assert!(!no_drop.is_transparent());
        assert!(window.need_mouse_focus());
        assert_relative_eq!(window.alpha(), NO_DROP_MIN_ALPHA + 0.5);
    }

    #[test]
    fn test_no_drag_stays_opaque() {
        let mut no_drop = NoDrop::new();
        let mut window = Inventory::new();
        window.layout.main_widget_mut().alpha = 0.8;

        no_drop.on_frame(0.1, &DragAndDrop::new(), IntPoint::new(50, 50), &mut window);
        assert!(window.need_mouse_focus());
        assert_relative_eq!(window.alpha(), 1.0);
    }
}
