use crate::gfx::render::ObjectRef;
use crate::ui::layout::{IntSize, Layout};

/// Behaviour shared by every GUI window
///
/// A window is a [`Layout`] plus hooks the [`WindowManager`] calls. Only
/// `layout` and `layout_mut` are required; the rest default to no-ops.
///
/// [`WindowManager`]: crate::ui::WindowManager
pub trait WindowBase {
    fn layout(&self) -> &Layout;

    fn layout_mut(&mut self) -> &mut Layout;

    /// Widget that should get key focus when the window opens
    fn default_key_focus(&self) -> Option<&str> {
        None
    }

    /// Binds the window to a world object (container, NPC, book...)
    fn set_ptr(&mut self, _ptr: &ObjectRef) {}

    fn on_frame(&mut self, _duration: f32) {}

    fn on_open(&mut self) {}

    fn on_close(&mut self) {}

    /// Asks the window to close; returns false if it refuses
    fn exit(&mut self) -> bool {
        true
    }

    fn set_visible(&mut self, visible: bool) {
        let was_visible = self.is_visible();
        self.layout_mut().main_widget_mut().visible = visible;

        if visible {
            self.on_open();
        } else if was_visible {
            self.on_close();
        }
    }

    fn is_visible(&self) -> bool {
        self.layout().main_widget().visible
    }

    /// Writes the main widget alpha
    fn set_alpha(&mut self, alpha: f32) {
        self.layout_mut().main_widget_mut().alpha = alpha;
    }

    /// Centres the main widget in a layer of `layer_size`
    fn center(&mut self, layer_size: IntSize) {
        let coord = &mut self.layout_mut().main_widget_mut().coord;
        coord.left = (layer_size.width - coord.width) / 2;
        coord.top = (layer_size.height - coord.height) / 2;
    }

    /// Resets window state when a game ends
    fn clear(&mut self) {}

    fn on_res_change(&mut self, _width: i32, _height: i32) {}

    fn is_modal(&self) -> bool {
        false
    }

    /// Builds the window contents; the manager has already opened the frame
    fn draw(&mut self, _ui: &imgui::Ui) {}

    /// True once after the user asked to dismiss the window from its contents
    fn take_exit_request(&mut self) -> bool {
        false
    }
}
