//! # Ashlands Quickstart
//!
//! Opens a window on an exterior cell with the sky enabled, a few objects
//! under the light root and a modal message box.
//!
//! ```bash
//! cargo run --example quickstart [settings.toml]
//! ```
//!
//! Escape closes the message box, then the application. Drag with the left
//! mouse button to orbit, scroll to zoom.

use ashlands::gfx::render::{AmbientLight, Cell, CellId};
use ashlands::ui::{IntCoord, WindowModal};
use ashlands::{AshlandsApp, RenderSettings};
use cgmath::{Vector3, Vector4};

fn main() -> anyhow::Result<()> {
    let settings = match std::env::args().nth(1) {
        Some(path) => RenderSettings::load_from_file(path)?,
        None => RenderSettings::default(),
    };

    let mut app = AshlandsApp::new(settings, "data")?;

    // Seyda Neen at noon
    let cell = Cell::new(
        CellId::exterior(-2, -9),
        AmbientLight {
            ambient: 0x0050_4B46,
            sunlight: 0x00C8_DCFF,
            fog: 0x00B4_A08C,
            fog_density: 0.8,
        },
    );
    app.load_cell(&cell, true)?;

    let rendering = app.rendering_manager();
    rendering.set_sun_direction(Vector3::new(0.3, -0.4, 1.0));
    rendering.set_sun_colour(Vector4::new(1.0, 0.95, 0.85, 1.0));
    for (name, model) in [
        ("ex_common_house", "meshes/x/ex_common_house_01.nif"),
        ("lighthouse", "meshes/x/ex_common_lighthouse.nif"),
        ("dock", "meshes/x/ex_common_dock_01.nif"),
    ] {
        rendering.insert_model(&cell.id, name, model)?;
    }

    let windows = app.window_manager();
    let message = windows.add_window(Box::new(WindowModal::message(
        "welcome",
        IntCoord::new(0, 0, 360, 120),
        "Welcome to Seyda Neen.",
    )));
    windows.center(message);
    windows.set_visible(message, true);

    app.run()
}
