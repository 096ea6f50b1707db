//! Application shell
//!
//! [`AshlandsApp`] opens a window, drives the [`RenderingManager`] and the
//! [`WindowManager`] once per frame and routes winit input between the GUI
//! and the camera manipulator.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context as _;
use cgmath::{Vector3, Zero};
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{DeviceEvent, DeviceId, ElementState, Event, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::config::RenderSettings;
use crate::gfx::camera::{CameraController, CameraManager, OrbitCamera};
use crate::gfx::render::{Cell, RenderingManager};
use crate::gfx::rendering::RenderEngine;
use crate::gfx::viewer::{Camera, Perspective, Viewer};
use crate::resource::ResourceSystem;
use crate::ui::{IntPoint, IntSize, UiManager, WindowManager};

pub struct AshlandsApp {
    event_loop: EventLoop<()>,
    state: AppState,
}

struct AppState {
    settings: RenderSettings,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    ui_manager: Option<UiManager>,
    rendering: RenderingManager,
    windows: WindowManager,
    last_frame: Instant,
    error: Option<anyhow::Error>,
}

impl AshlandsApp {
    /// Sets up logging, the viewer and the rendering manager
    ///
    /// The window and GPU device are created once the event loop resumes.
    pub fn new(settings: RenderSettings, data_dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .try_init();

        let event_loop = EventLoop::new().context("failed to create event loop")?;

        let width = settings.window_width.max(1);
        let height = settings.window_height.max(1);
        let camera = Camera::new(Perspective {
            fovy: settings.field_of_view,
            aspect: width as f64 / height as f64,
            z_near: settings.near_clip,
            z_far: settings.far_clip,
        });

        let mut orbit = OrbitCamera::new(256.0, 0.4, 0.2, Vector3::zero());
        orbit.bounds.min_distance = Some(8.0);
        let manipulator = CameraManager::new(orbit, CameraController::new(0.005, 32.0));
        let viewer = Viewer::new(camera, Box::new(manipulator));

        let rendering = RenderingManager::new(viewer, ResourceSystem::new(data_dir), &settings)
            .context("failed to set up the rendering manager")?;
        let windows = WindowManager::new(IntSize::new(width as i32, height as i32));

        Ok(Self {
            event_loop,
            state: AppState {
                settings,
                window: None,
                render_engine: None,
                ui_manager: None,
                rendering,
                windows,
                last_frame: Instant::now(),
                error: None,
            },
        })
    }

    pub fn rendering_manager(&mut self) -> &mut RenderingManager {
        &mut self.state.rendering
    }

    pub fn window_manager(&mut self) -> &mut WindowManager {
        &mut self.state.windows
    }

    /// Applies a cell's lighting and fog; the sky is shown for exterior cells
    pub fn load_cell(&mut self, cell: &Cell, exterior: bool) -> anyhow::Result<()> {
        let rendering = &mut self.state.rendering;
        rendering.configure_ambient(cell);
        rendering.configure_cell_fog(cell)?;
        rendering.set_sky_enabled(exterior)?;
        log::info!("cell {} loaded", cell.id);
        Ok(())
    }

    /// Runs the event loop until the window closes or a frame fails
    pub fn run(self) -> anyhow::Result<()> {
        let Self {
            event_loop,
            mut state,
        } = self;
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop
            .run_app(&mut state)
            .context("event loop terminated abnormally")?;

        match state.error.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl AppState {
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{error:#}");
        self.error = Some(error);
        event_loop.exit();
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let attributes = WindowAttributes::default()
            .with_title("Ashlands")
            .with_inner_size(LogicalSize::new(
                self.settings.window_width,
                self.settings.window_height,
            ));
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .context("failed to create window")?,
        );

        let PhysicalSize { width, height } = window.inner_size();
        let render_engine = pollster::block_on(RenderEngine::new(window.clone(), width, height))?;
        let ui_manager = UiManager::new(
            render_engine.device(),
            render_engine.queue(),
            render_engine.surface_format(),
            &window,
        );

        self.resize(width, height);
        self.window = Some(window);
        self.render_engine = Some(render_engine);
        self.ui_manager = Some(ui_manager);
        log::info!("window created at {width}x{height}");
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.rendering
            .viewer_mut()
            .camera_mut()
            .resize(width, height);
        self.windows
            .set_view_size(IntSize::new(width as i32, height as i32));
        if let Some(render_engine) = self.render_engine.as_mut() {
            render_engine.resize(width, height);
        }
        if let Some(ui_manager) = self.ui_manager.as_mut() {
            ui_manager.update_display_size(width, height);
        }
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        if event.state == ElementState::Pressed
            && event.physical_key == PhysicalKey::Code(KeyCode::Escape)
        {
            if self.windows.current_modal().is_none() {
                event_loop.exit();
            } else {
                self.windows.exit_current_modal();
            }
            return;
        }
        self.rendering
            .viewer_mut()
            .camera_manipulator_mut()
            .handle_key_event(event);
    }

    fn redraw(&mut self) -> anyhow::Result<()> {
        let (Some(window), Some(render_engine)) = (self.window.as_ref(), self.render_engine.as_mut())
        else {
            return Ok(());
        };

        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;

        self.rendering.update(dt);
        self.windows.on_frame(dt);
        render_engine.update(self.rendering.frame_uniform());

        let clear_color: [f32; 4] = self.rendering.viewer().camera().clear_color().into();
        let draw_sky = self.rendering.sky_manager().is_enabled();

        let Some(ui_manager) = self.ui_manager.as_mut() else {
            render_engine.render_frame(
                clear_color,
                draw_sky,
                None::<fn(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView)>,
            )?;
            return Ok(());
        };

        let windows = &mut self.windows;
        let mut ui_result = Ok(());
        render_engine.render_frame(
            clear_color,
            draw_sky,
            Some(
                |device: &wgpu::Device,
                 queue: &wgpu::Queue,
                 encoder: &mut wgpu::CommandEncoder,
                 view: &wgpu::TextureView| {
                    ui_result = ui_manager.draw(device, queue, encoder, window, view, |ui| {
                        windows.draw(ui)
                    });
                },
            ),
        )?;
        ui_result?;
        Ok(())
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(error) = self.create_window(event_loop) {
            self.fail(event_loop, error);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(window) = self.window.clone() else {
            return;
        };

        if let WindowEvent::CursorMoved { position, .. } = &event {
            self.windows
                .set_mouse_position(IntPoint::new(position.x as i32, position.y as i32));
        }

        if let Some(ui_manager) = self.ui_manager.as_mut() {
            let ui_event = Event::WindowEvent {
                window_id,
                event: event.clone(),
            };
            if ui_manager.handle_input(&window, &ui_event) {
                window.request_redraw();
                return;
            }
        }

        match event {
            WindowEvent::KeyboardInput { event, .. } => self.handle_key(event_loop, &event),
            WindowEvent::Resized(PhysicalSize { width, height }) => self.resize(width, height),
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::RedrawRequested => {
                if let Err(error) = self.redraw() {
                    self.fail(event_loop, error);
                }
            }
            _ => (),
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        if self.ui_manager.as_ref().is_some_and(UiManager::wants_input) {
            return;
        }
        self.rendering
            .viewer_mut()
            .camera_manipulator_mut()
            .handle_device_event(&event);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }
}
