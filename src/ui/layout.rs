//! Widget geometry and window layouts
//!
//! A [`Layout`] is the widget tree of one window: a main widget that frames the
//! window plus named child widgets. Coordinates are in pixels with the origin
//! at the top left of the GUI layer.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IntPoint {
    pub left: i32,
    pub top: i32,
}

impl IntPoint {
    pub fn new(left: i32, top: i32) -> Self {
        Self { left, top }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IntSize {
    pub width: i32,
    pub height: i32,
}

impl IntSize {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IntCoord {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl IntCoord {
    pub fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn size(&self) -> IntSize {
        IntSize::new(self.width, self.height)
    }

    pub fn right(&self) -> i32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }

    /// All four edges count as inside
    pub fn inside(&self, point: IntPoint) -> bool {
        point.left >= self.left
            && point.left <= self.right()
            && point.top >= self.top
            && point.top <= self.bottom()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Widget {
    pub name: String,
    pub coord: IntCoord,
    pub visible: bool,
    pub alpha: f32,
    /// Whether the widget can receive mouse focus (and so clicks)
    pub need_mouse_focus: bool,
    pub caption: String,
}

impl Widget {
    pub fn new(name: impl Into<String>, coord: IntCoord) -> Self {
        Self {
            name: name.into(),
            coord,
            visible: true,
            alpha: 1.0,
            need_mouse_focus: true,
            caption: String::new(),
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = caption.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    name: String,
    main: Widget,
    children: Vec<Widget>,
}

impl Layout {
    /// Creates a layout whose main widget starts hidden
    pub fn new(name: impl Into<String>, coord: IntCoord) -> Self {
        let name = name.into();
        let mut main = Widget::new(format!("{name}_Main"), coord);
        main.visible = false;
        Self {
            name,
            main,
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn main_widget(&self) -> &Widget {
        &self.main
    }

    pub fn main_widget_mut(&mut self) -> &mut Widget {
        &mut self.main
    }

    pub fn add_widget(&mut self, widget: Widget) {
        self.children.push(widget);
    }

    pub fn widget(&self, name: &str) -> Option<&Widget> {
        self.children.iter().find(|w| w.name == name)
    }

    pub fn widget_mut(&mut self, name: &str) -> Option<&mut Widget> {
        self.children.iter_mut().find(|w| w.name == name)
    }

    pub fn widgets(&self) -> &[Widget] {
        &self.children
    }

    /// Whether `name` is the main widget or one of its children
    pub fn contains(&self, name: &str) -> bool {
        self.main.name == name || self.widget(name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inside_includes_edges() {
        let coord = IntCoord::new(10, 20, 100, 50);
        assert!(coord.inside(IntPoint::new(10, 20)));
        assert!(coord.inside(IntPoint::new(110, 70)));
        assert!(coord.inside(IntPoint::new(110, 30)));
        assert!(!coord.inside(IntPoint::new(111, 30)));
        assert!(!coord.inside(IntPoint::new(50, 71)));
        assert!(!coord.inside(IntPoint::new(9, 30)));
    }

    #[test]
    fn test_layout_starts_hidden() {
        let layout = Layout::new("openmw_confirmation_dialog", IntCoord::new(0, 0, 300, 120));
        assert!(!layout.main_widget().visible);
        assert_eq!(layout.main_widget().alpha, 1.0);
    }

    #[test]
    fn test_child_lookup() {
        let mut layout = Layout::new("dialog", IntCoord::new(0, 0, 300, 120));
        layout.add_widget(Widget::new("OkButton", IntCoord::new(200, 90, 80, 24)).with_caption("OK"));

        assert_eq!(layout.widget("OkButton").map(|w| w.caption.as_str()), Some("OK"));
        assert!(layout.contains("dialog_Main"));
        assert!(!layout.contains("CancelButton"));
    }
}
