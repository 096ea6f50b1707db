//! Registry of GUI windows
//!
//! The [`WindowManager`] owns every window, tracks the modal stack and key
//! focus, and drives per-frame updates and drawing.

use imgui::{Condition, StyleVar, WindowFlags};

use crate::ui::layout::{IntPoint, IntSize};
use crate::ui::no_drop::{DragAndDrop, NoDrop};
use crate::ui::window_base::WindowBase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(usize);

struct WindowEntry {
    window: Box<dyn WindowBase>,
    no_drop: Option<NoDrop>,
}

pub struct WindowManager {
    windows: Vec<WindowEntry>,
    modals: Vec<WindowId>,
    key_focus: Option<(WindowId, String)>,
    view_size: IntSize,
    mouse: IntPoint,
    drag: DragAndDrop,
}

impl WindowManager {
    pub fn new(view_size: IntSize) -> Self {
        Self {
            windows: Vec::new(),
            modals: Vec::new(),
            key_focus: None,
            view_size,
            mouse: IntPoint::default(),
            drag: DragAndDrop::new(),
        }
    }

    pub fn add_window(&mut self, window: Box<dyn WindowBase>) -> WindowId {
        self.push(window, None)
    }

    /// Adds a window that turns see-through while an item is dragged over it
    pub fn add_no_drop_window(&mut self, window: Box<dyn WindowBase>) -> WindowId {
        self.push(window, Some(NoDrop::new()))
    }

    fn push(&mut self, window: Box<dyn WindowBase>, no_drop: Option<NoDrop>) -> WindowId {
        let id = WindowId(self.windows.len());
        log::debug!("window {} registered as {:?}", window.layout().name(), id);
        self.windows.push(WindowEntry { window, no_drop });
        id
    }

    pub fn window(&self, id: WindowId) -> Option<&dyn WindowBase> {
        self.windows.get(id.0).map(|e| e.window.as_ref())
    }

    pub fn window_mut(&mut self, id: WindowId) -> Option<&mut dyn WindowBase> {
        self.windows
            .get_mut(id.0)
            .map(|e| e.window.as_mut() as &mut dyn WindowBase)
    }

    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    /// Shows or hides a window, keeping the modal stack and key focus in step
    pub fn set_visible(&mut self, id: WindowId, visible: bool) {
        let Some(entry) = self.windows.get_mut(id.0) else {
            log::warn!("set_visible on unknown window {:?}", id);
            return;
        };

        let was_visible = entry.window.is_visible();
        entry.window.set_visible(visible);
        let modal = entry.window.is_modal();
        let default_focus = entry.window.default_key_focus().map(str::to_owned);

        if visible {
            if modal {
                self.add_current_modal(id);
            }
            if !was_visible {
                if let Some(widget) = default_focus {
                    self.key_focus = Some((id, widget));
                }
            }
        } else {
            if modal {
                self.remove_current_modal(id);
            }
            if self.key_focus.as_ref().is_some_and(|(owner, _)| *owner == id) {
                self.key_focus = None;
            }
        }
    }

    pub fn is_visible(&self, id: WindowId) -> bool {
        self.window(id).is_some_and(|w| w.is_visible())
    }

    pub fn current_modal(&self) -> Option<WindowId> {
        self.modals.last().copied()
    }

    pub fn add_current_modal(&mut self, id: WindowId) {
        if self.current_modal() != Some(id) {
            self.modals.push(id);
        }
    }

    /// Pops `id` when it is on top
    ///
    /// A modal closed out of order is taken out of the middle of the stack so
    /// a hidden window never ends up blocking input.
    pub fn remove_current_modal(&mut self, id: WindowId) {
        match self.current_modal() {
            Some(top) if top == id => {
                self.modals.pop();
            }
            Some(top) => {
                if let Some(index) = self.modals.iter().position(|m| *m == id) {
                    log::warn!("modal {:?} closed below the top of the stack ({:?})", id, top);
                    self.modals.remove(index);
                }
            }
            None => {}
        }
    }

    /// Windows other than the top modal ignore input while a modal is open
    pub fn accepts_input(&self, id: WindowId) -> bool {
        self.current_modal().map_or(true, |top| top == id)
    }

    /// Asks the top modal to close; returns true if it did
    pub fn exit_current_modal(&mut self) -> bool {
        let Some(top) = self.current_modal() else {
            return false;
        };
        let allowed = self.window_mut(top).is_some_and(|w| w.exit());
        if allowed {
            self.set_visible(top, false);
        }
        allowed
    }

    /// Runs per-frame updates for visible windows
    pub fn on_frame(&mut self, dt: f32) {
        for entry in self.windows.iter_mut() {
            if !entry.window.is_visible() {
                continue;
            }
            entry.window.on_frame(dt);
            if let Some(no_drop) = entry.no_drop.as_mut() {
                no_drop.on_frame(dt, &self.drag, self.mouse, entry.window.as_mut());
            }
        }
    }

    pub fn view_size(&self) -> IntSize {
        self.view_size
    }

    pub fn set_view_size(&mut self, size: IntSize) {
        self.view_size = size;
        for entry in self.windows.iter_mut() {
            entry.window.on_res_change(size.width, size.height);
        }
    }

    /// Resets every window and drops modal, focus and drag state
    pub fn clear(&mut self) {
        for entry in self.windows.iter_mut() {
            entry.window.clear();
        }
        self.modals.clear();
        self.key_focus = None;
        self.drag.finish();
    }

    pub fn center(&mut self, id: WindowId) {
        let size = self.view_size;
        if let Some(window) = self.window_mut(id) {
            window.center(size);
        }
    }

    /// Gives key focus to a widget of `id`; false if the widget does not exist
    pub fn set_key_focus(&mut self, id: WindowId, widget: &str) -> bool {
        let exists = self
            .window(id)
            .is_some_and(|w| w.layout().contains(widget));
        if exists {
            self.key_focus = Some((id, widget.to_string()));
        }
        exists
    }

    pub fn key_focus(&self) -> Option<(WindowId, &str)> {
        self.key_focus
            .as_ref()
            .map(|(id, widget)| (*id, widget.as_str()))
    }

    pub fn mouse_position(&self) -> IntPoint {
        self.mouse
    }

    pub fn set_mouse_position(&mut self, position: IntPoint) {
        self.mouse = position;
    }

    pub fn drag_and_drop(&self) -> &DragAndDrop {
        &self.drag
    }

    pub fn drag_and_drop_mut(&mut self) -> &mut DragAndDrop {
        &mut self.drag
    }

    /// Draws visible windows at their layout position and alpha
    pub fn draw(&mut self, ui: &imgui::Ui) {
        let top_modal = self.current_modal();

        for (index, entry) in self.windows.iter_mut().enumerate() {
            if !entry.window.is_visible() {
                continue;
            }
            let id = WindowId(index);
            let main = entry.window.layout().main_widget();
            let coord = main.coord;

            let mut flags = WindowFlags::NO_COLLAPSE | WindowFlags::NO_SAVED_SETTINGS;
            if !main.need_mouse_focus || top_modal.is_some_and(|top| top != id) {
                flags |= WindowFlags::NO_INPUTS;
            }
            let title = format!("{}##{}", entry.window.layout().name(), index);
            let _alpha = ui.push_style_var(StyleVar::Alpha(main.alpha));

            let window = entry.window.as_mut();
            ui.window(&title)
                .position([coord.left as f32, coord.top as f32], Condition::Always)
                .size([coord.width as f32, coord.height as f32], Condition::Always)
                .flags(flags)
                .build(|| window.draw(ui));
        }

        self.process_exit_requests();
    }

    /// Closes visible windows that asked to be dismissed and allow it
    ///
    /// Returns how many windows were hidden.
    pub fn process_exit_requests(&mut self) -> usize {
        let requested: Vec<WindowId> = self
            .windows
            .iter_mut()
            .enumerate()
            .filter(|(_, entry)| entry.window.is_visible())
            .filter_map(|(index, entry)| entry.window.take_exit_request().then_some(WindowId(index)))
            .collect();

        let mut closed = 0;
        for id in requested {
            if self.window_mut(id).is_some_and(|w| w.exit()) {
                self.set_visible(id, false);
                closed += 1;
            } else {
                log::debug!("window {:?} refused to exit", id);
            }
        }
        closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::layout::{IntCoord, Layout};
    use crate::ui::window_base::tests::TestWindow;
    use approx::assert_relative_eq;

    fn manager() -> WindowManager {
        WindowManager::new(IntSize::new(800, 600))
    }

    #[test]
    fn test_modal_stack_follows_visibility() {
        let mut manager = manager();
        let first_window = TestWindow::modal("first");
        let first_log = first_window.log.clone();
        let first = manager.add_window(Box::new(first_window));
        let second = manager.add_window(Box::new(TestWindow::modal("second")));
        let plain = manager.add_window(Box::new(TestWindow::new("plain")));

        manager.set_visible(plain, true);
        assert_eq!(manager.current_modal(), None);
        assert!(manager.accepts_input(plain));

        manager.set_visible(first, true);
        manager.set_visible(second, true);
        assert_eq!(manager.current_modal(), Some(second));
        assert!(manager.accepts_input(second));
        assert!(!manager.accepts_input(first));
        assert!(!manager.accepts_input(plain));

        manager.set_visible(second, false);
        assert_eq!(manager.current_modal(), Some(first));
        assert_eq!(first_log.borrow().opened, 1);
    }

    #[test]
    fn test_out_of_order_removal_keeps_top() {
        let mut manager = manager();
        let first = manager.add_window(Box::new(TestWindow::modal("first")));
        let second = manager.add_window(Box::new(TestWindow::modal("second")));
        manager.set_visible(first, true);
        manager.set_visible(second, true);

        manager.set_visible(first, false);
        assert_eq!(manager.current_modal(), Some(second));
    }

    #[test]
    fn test_modal_hidden_below_top_releases_input() {
        let mut manager = manager();
        let first = manager.add_window(Box::new(TestWindow::modal("first")));
        let second = manager.add_window(Box::new(TestWindow::modal("second")));
        let plain = manager.add_window(Box::new(TestWindow::new("plain")));
        manager.set_visible(plain, true);
        manager.set_visible(first, true);
        manager.set_visible(second, true);

        manager.set_visible(first, false);
        manager.set_visible(second, false);

        assert!(!manager.is_visible(first));
        assert_eq!(manager.current_modal(), None);
        assert!(manager.accepts_input(plain));
        assert!(!manager.exit_current_modal());
    }

    #[test]
    fn test_exit_request_closes_modal() {
        let mut manager = manager();
        let window = TestWindow::modal("message");
        let log = window.log.clone();
        let id = manager.add_window(Box::new(window));
        manager.set_visible(id, true);

        log.borrow_mut().exit_requested = true;
        assert_eq!(manager.process_exit_requests(), 1);
        assert!(!manager.is_visible(id));
        assert_eq!(manager.current_modal(), None);
        assert_eq!(log.borrow().closed, 1);
    }

    #[test]
    fn test_refused_exit_request_keeps_modal_open() {
        let mut manager = manager();
        let mut window = TestWindow::modal("stubborn");
        window.allow_exit = false;
        let log = window.log.clone();
        let id = manager.add_window(Box::new(window));
        manager.set_visible(id, true);

        log.borrow_mut().exit_requested = true;
        assert_eq!(manager.process_exit_requests(), 0);
        assert!(manager.is_visible(id));
        assert_eq!(manager.current_modal(), Some(id));
        assert!(!log.borrow().exit_requested);
    }

    #[test]
    fn test_exit_request_ignored_while_hidden() {
        let mut manager = manager();
        let window = TestWindow::modal("hidden");
        let log = window.log.clone();
        manager.add_window(Box::new(window));

        log.borrow_mut().exit_requested = true;
        assert_eq!(manager.process_exit_requests(), 0);
        assert!(log.borrow().exit_requested);
    }

    #[test]
    fn test_showing_twice_pushes_once() {
        let mut manager = manager();
        let modal = manager.add_window(Box::new(TestWindow::modal("modal")));
        manager.set_visible(modal, true);
        manager.set_visible(modal, true);
        manager.set_visible(modal, false);
        assert_eq!(manager.current_modal(), None);
    }

    #[test]
    fn test_exit_current_modal() {
        let mut manager = manager();
        assert!(!manager.exit_current_modal());

        let mut stubborn = TestWindow::modal("stubborn");
        stubborn.allow_exit = false;
        let stubborn = manager.add_window(Box::new(stubborn));
        let modal = manager.add_window(Box::new(TestWindow::modal("modal")));
        manager.set_visible(stubborn, true);
        manager.set_visible(modal, true);

        assert!(manager.exit_current_modal());
        assert!(!manager.is_visible(modal));
        assert_eq!(manager.current_modal(), Some(stubborn));

        assert!(!manager.exit_current_modal());
        assert!(manager.is_visible(stubborn));
    }

    #[test]
    fn test_key_focus_dropped_on_hide() {
        let mut manager = manager();
        let window = manager.add_window(Box::new(TestWindow::new("name")));
        manager.set_visible(window, true);
        assert_eq!(manager.key_focus(), Some((window, "NameEdit")));

        manager.set_visible(window, false);
        assert_eq!(manager.key_focus(), None);
    }

    #[test]
    fn test_set_key_focus_requires_widget() {
        let mut manager = manager();
        let window = manager.add_window(Box::new(TestWindow::new("name")));
        assert!(!manager.set_key_focus(window, "Missing"));
        assert!(manager.set_key_focus(window, "name_Main"));
        assert_eq!(manager.key_focus(), Some((window, "name_Main")));
    }

    #[test]
    fn test_on_frame_skips_hidden_windows() {
        let mut manager = manager();
        let shown = TestWindow::new("shown");
        let hidden = TestWindow::new("hidden");
        let (shown_log, hidden_log) = (shown.log.clone(), hidden.log.clone());
        let shown = manager.add_window(Box::new(shown));
        manager.add_window(Box::new(hidden));
        manager.set_visible(shown, true);

        manager.on_frame(0.016);
        assert_eq!(shown_log.borrow().frames, 1);
        assert_eq!(hidden_log.borrow().frames, 0);
    }

    #[test]
    fn test_view_size_and_clear_reach_all_windows() {
        let mut manager = manager();
        let a = TestWindow::modal("a");
        let b = TestWindow::new("b");
        let (a_log, b_log) = (a.log.clone(), b.log.clone());
        let a = manager.add_window(Box::new(a));
        manager.add_window(Box::new(b));
        manager.set_visible(a, true);
        manager.drag_and_drop_mut().start_drag("gold_001", 5);

        manager.set_view_size(IntSize::new(1024, 768));
        assert_eq!(b_log.borrow().resized_to, Some((1024, 768)));

        manager.clear();
        assert_eq!(a_log.borrow().cleared, 1);
        assert_eq!(b_log.borrow().cleared, 1);
        assert_eq!(manager.current_modal(), None);
        assert!(!manager.drag_and_drop().is_on_drag_and_drop());
    }

    #[test]
    fn test_center_uses_view_size() {
        let mut manager = manager();
        let id = manager.add_window(Box::new(TestWindow::new("centered")));
        manager.center(id);
        let coord = manager.window(id).unwrap().layout().main_widget().coord;
        assert_eq!((coord.left, coord.top), (300, 250));
    }

    #[test]
    fn test_no_drop_window_fades_under_drag() {
        struct Plain(Layout);
        impl WindowBase for Plain {
            fn layout(&self) -> &Layout {
                &self.0
            }
            fn layout_mut(&mut self) -> &mut Layout {
                &mut self.0
            }
        }

        let mut manager = manager();
        let id = manager.add_no_drop_window(Box::new(Plain(Layout::new(
            "inventory",
            IntCoord::new(0, 0, 100, 100),
        ))));
        manager.set_visible(id, true);
        manager.set_mouse_position(IntPoint::new(10, 10));
        manager.drag_and_drop_mut().start_drag("gold_001", 5);

        manager.on_frame(0.1);
        let main = manager.window(id).unwrap().layout().main_widget();
        assert!(!main.need_mouse_focus);
        assert_relative_eq!(main.alpha, 0.5);
    }
}
