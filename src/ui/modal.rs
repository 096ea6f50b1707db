use crate::ui::layout::{IntCoord, Layout, Widget};
use crate::ui::window_base::WindowBase;

/// A window that takes all input while it is open
///
/// Opening pushes it onto the [`WindowManager`] modal stack and closing pops
/// it. Windows other than the top modal do not accept input meanwhile.
///
/// [`WindowManager`]: crate::ui::WindowManager
pub struct WindowModal {
    layout: Layout,
    exit_requested: bool,
}

impl WindowModal {
    pub fn new(name: impl Into<String>, coord: IntCoord) -> Self {
        Self {
            layout: Layout::new(name, coord),
            exit_requested: false,
        }
    }

    /// Modal with a message line and an OK button
    pub fn message(name: impl Into<String>, coord: IntCoord, text: impl Into<String>) -> Self {
        let mut modal = Self::new(name, coord);
        modal.set_message(text);
        modal
            .layout
            .add_widget(Widget::new("OkButton", IntCoord::default()).with_caption("OK"));
        modal
    }

    pub fn set_message(&mut self, text: impl Into<String>) {
        let text = text.into();
        match self.layout.widget_mut("Message") {
            Some(widget) => widget.caption = text,
            None => self
                .layout
                .add_widget(Widget::new("Message", IntCoord::default()).with_caption(text)),
        }
    }

    pub fn message_text(&self) -> Option<&str> {
        self.layout.widget("Message").map(|w| w.caption.as_str())
    }

    /// Same as pressing OK; the manager closes the window after this frame
    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }
}

impl WindowBase for WindowModal {
    fn layout(&self) -> &Layout {
        &self.layout
    }

    fn layout_mut(&mut self) -> &mut Layout {
        &mut self.layout
    }

    fn default_key_focus(&self) -> Option<&str> {
        self.layout.widget("OkButton").map(|w| w.name.as_str())
    }

    fn on_open(&mut self) {
        self.exit_requested = false;
        log::debug!("modal {} opened", self.layout.name());
    }

    fn on_close(&mut self) {
        log::debug!("modal {} closed", self.layout.name());
    }

    fn is_modal(&self) -> bool {
        true
    }

    fn draw(&mut self, ui: &imgui::Ui) {
        for widget in self.layout.widgets() {
            if !widget.visible {
                continue;
            }
            if widget.name.ends_with("Button") {
                if ui.button(&widget.caption) {
                    self.exit_requested = true; // same as request_exit(); disjoint field borrow
                }
            } else {
                ui.text_wrapped(&widget.caption);
            }
        }
    }

    fn take_exit_request(&mut self) -> bool {
        std::mem::take(&mut self.exit_requested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_defaults() {
        let mut modal = WindowModal::new("openmw_interactive_messagebox", IntCoord::new(0, 0, 400, 150));
        assert!(modal.is_modal());
        assert!(modal.exit());
        assert!(!modal.take_exit_request());
        assert_eq!(modal.default_key_focus(), None);
    }

    #[test]
    fn test_message_replaces_caption() {
        let mut modal = WindowModal::message("box", IntCoord::new(0, 0, 400, 150), "Saved.");
        assert_eq!(modal.message_text(), Some("Saved."));
        assert_eq!(modal.default_key_focus(), Some("OkButton"));

        modal.set_message("Loaded.");
        assert_eq!(modal.message_text(), Some("Loaded."));
        assert_eq!(modal.layout().widgets().len(), 2);
    }

    #[test]
    fn test_exit_request_is_one_shot() {
        let mut modal = WindowModal::message("box", IntCoord::new(0, 0, 400, 150), "Saved.");
        modal.request_exit();
        assert!(modal.take_exit_request());
        assert!(!modal.take_exit_request());

        modal.request_exit();
        modal.set_visible(true);
        assert!(!modal.take_exit_request());
    }
}
