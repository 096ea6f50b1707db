//! Rendering manager
//!
//! Owns the scene graph and the viewer for a rendering session and sets up the
//! world lighting on top of them: a light manager subtree holding the sun and
//! all cell objects, fixed render modes on the root, and a per-frame state
//! updater that pushes the ambient colour into the root's light model.

use std::cell::RefCell;
use std::rc::Rc;

use cgmath::{Vector3, Vector4, Zero};

use super::cell::{Cell, CellId};
use super::objects::{Actors, Objects};
use super::sky::SkyManager;
use crate::config::RenderSettings;
use crate::error::{RenderError, Result};
use crate::gfx::camera::convert_matrix4_to_array;
use crate::gfx::resources::FrameUniform;
use crate::gfx::scene::{
    colour_from_rgb, Fog, FrameStamp, Light, LightModel, LightSource, Mode, Node, NodeId,
    NodeKind, SceneGraph, StateAttribute, StateSet, StateSetController, StateSetUpdater,
    StateValue,
};
use crate::gfx::viewer::{CullingMode, LightingMode, Viewer};
use crate::resource::ResourceSystem;

/// Light slot reserved for the sun
const SUN_LIGHT: u32 = 0;

/// Writes the scene ambient colour into the root light model every frame
pub struct StateUpdater {
    ambient_colour: Vector4<f32>,
}

impl StateUpdater {
    pub fn new() -> Self {
        Self {
            ambient_colour: Vector4::zero(),
        }
    }

    pub fn set_ambient_color(&mut self, colour: Vector4<f32>) {
        self.ambient_colour = colour;
    }

    pub fn ambient_color(&self) -> Vector4<f32> {
        self.ambient_colour
    }
}

impl Default for StateUpdater {
    fn default() -> Self {
        Self::new()
    }
}

impl StateSetController for StateUpdater {
    fn set_defaults(&mut self, state_set: &mut StateSet) {
        state_set.set_attribute(StateAttribute::LightModel(LightModel::default()));
    }

    fn apply(&mut self, state_set: &mut StateSet, _frame: &FrameStamp) {
        if let Some(light_model) = state_set.light_model_mut() {
            light_model.ambient_intensity = self.ambient_colour;
        }
    }
}

pub struct RenderingManager {
    viewer: Viewer,
    graph: SceneGraph,
    resource_system: ResourceSystem,
    light_root: NodeId,
    sun_source: NodeId,
    objects: Objects,
    sky: SkyManager,
    state_updater: Rc<RefCell<StateUpdater>>,
    frame: FrameStamp,
}

impl RenderingManager {
    pub fn new(
        mut viewer: Viewer,
        mut resource_system: ResourceSystem,
        settings: &RenderSettings,
    ) -> Result<Self> {
        settings.validate()?;
        let mut graph = SceneGraph::new();
        let root = graph.root();

        let light_root = graph.insert_child(
            root,
            Node::new(
                "Light Root",
                NodeKind::LightManager {
                    start_light: settings.start_light,
                },
            ),
        )?;

        let objects = Objects::new(light_root);

        let mut sky = SkyManager::new(&mut graph, root, resource_system.scene_manager_mut())?;
        sky.set_cloud_speed(settings.cloud_speed);

        viewer.set_lighting_mode(LightingMode::NoLight);

        let mut sun_light = Light::new(SUN_LIGHT);
        sun_light.set_diffuse(Vector4::new(0.0, 0.0, 0.0, 1.0));
        sun_light.set_ambient(Vector4::new(0.0, 0.0, 0.0, 1.0));
        sun_light.set_constant_attenuation(1.0);
        let source = LightSource::new(sun_light);

        let root_state = graph.get_or_create_state_set(root)?;
        root_state.set_mode(Mode::CullFace, StateValue::On);
        root_state.set_mode(Mode::Lighting, StateValue::On);
        root_state.set_mode(Mode::Normalize, StateValue::On);
        source.set_state_set_modes(root_state, StateValue::On);

        let sun_source = graph.insert_child(
            light_root,
            Node::new("Sun Light", NodeKind::LightSource(source)),
        )?;

        let state_updater = Rc::new(RefCell::new(StateUpdater::new()));
        graph.add_update_callback(root, Box::new(StateSetUpdater::new(state_updater.clone())))?;

        let camera = viewer.camera_mut();
        if !settings.small_feature_culling {
            let culling_mode = camera.culling_mode() - CullingMode::SMALL_FEATURE_CULLING;
            camera.set_culling_mode(culling_mode);
        }

        let mut perspective = camera.projection_as_perspective();
        perspective.fovy = settings.field_of_view;
        camera.set_projection_as_perspective(perspective);

        log::info!(
            "rendering manager ready: fov {:.1}, {} scene nodes",
            settings.field_of_view,
            graph.node_count()
        );

        Ok(Self {
            viewer,
            graph,
            resource_system,
            light_root,
            sun_source,
            objects,
            sky,
            state_updater,
            frame: FrameStamp::default(),
        })
    }

    pub fn objects(&self) -> &Objects {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut Objects {
        &mut self.objects
    }

    /// Actors are not rendered yet
    pub fn actors(&mut self) -> Result<&mut Actors> {
        Err(RenderError::Unimplemented("actors"))
    }

    pub fn resource_system(&self) -> &ResourceSystem {
        &self.resource_system
    }

    /// Adds an object to `cell`, see [`Objects::insert_model`]
    pub fn insert_model(&mut self, cell: &CellId, name: &str, model: &str) -> Result<NodeId> {
        self.objects.insert_model(
            &mut self.graph,
            self.resource_system.scene_manager_mut(),
            cell,
            name,
            model,
        )
    }

    /// Takes effect on the next [`update`](Self::update)
    pub fn set_ambient_colour(&mut self, colour: Vector4<f32>) {
        self.state_updater.borrow_mut().set_ambient_color(colour);
    }

    pub fn ambient_colour(&self) -> Vector4<f32> {
        self.state_updater.borrow().ambient_color()
    }

    /// Applies a cell's ambient and sunlight colours
    pub fn configure_ambient(&mut self, cell: &Cell) {
        self.set_ambient_colour(colour_from_rgb(cell.ambient.ambient));

        if let Some(sun) = self.sun_light_mut() {
            sun.set_diffuse(colour_from_rgb(cell.ambient.sunlight));
            sun.set_direction(Vector3::new(1.0, -1.0, -1.0));
        }
    }

    pub fn set_sun_colour(&mut self, colour: Vector4<f32>) {
        if let Some(sun) = self.sun_light_mut() {
            sun.set_diffuse(colour);
        }
    }

    /// `direction` points towards the sun; the light shines the opposite way
    pub fn set_sun_direction(&mut self, direction: Vector3<f32>) {
        if let Some(sun) = self.sun_light_mut() {
            sun.set_direction(-direction);
        }
        if let Err(error) = self.sky.set_sun_direction(&mut self.graph, -direction) {
            log::warn!("sun billboard not moved: {error}");
        }
    }

    pub fn sun_light(&self) -> Option<&Light> {
        self.graph
            .node(self.sun_source)
            .and_then(Node::light_source)
            .map(|source| &source.light)
    }

    fn sun_light_mut(&mut self) -> Option<&mut Light> {
        let light = self
            .graph
            .node_mut(self.sun_source)
            .and_then(Node::light_source_mut)
            .map(|source| &mut source.light);
        if light.is_none() {
            log::warn!("sun light source is missing from the scene graph");
        }
        light
    }

    /// Eye position taken from the camera manipulator
    pub fn eye_pos(&self) -> Vector3<f32> {
        self.viewer.camera_manipulator().matrix().w.truncate()
    }

    pub fn remove_cell(&mut self, cell: &CellId) -> Result<()> {
        self.objects.remove_cell(&mut self.graph, cell)
    }

    pub fn set_sky_enabled(&mut self, enabled: bool) -> Result<()> {
        self.sky.set_enabled(&mut self.graph, enabled)
    }

    /// Sets the clear colour to the fog colour and records the fog distance
    pub fn configure_fog(&mut self, fog_depth: f32, colour: Vector4<f32>) -> Result<()> {
        self.viewer.camera_mut().set_clear_color(colour);

        let root = self.graph.root();
        self.graph
            .get_or_create_state_set(root)?
            .set_attribute(StateAttribute::Fog(Fog {
                colour,
                start: 0.0,
                end: fog_depth,
            }));
        Ok(())
    }

    /// Fog from a cell's lighting record, its density used as the fog depth
    pub fn configure_cell_fog(&mut self, cell: &Cell) -> Result<()> {
        self.configure_fog(cell.ambient.fog_density, colour_from_rgb(cell.ambient.fog))
    }

    pub fn sky_manager(&self) -> &SkyManager {
        &self.sky
    }

    pub fn sky_manager_mut(&mut self) -> &mut SkyManager {
        &mut self.sky
    }

    pub fn scene_graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn light_root(&self) -> NodeId {
        self.light_root
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    pub fn viewer_mut(&mut self) -> &mut Viewer {
        &mut self.viewer
    }

    /// Runs one frame of scene updates
    pub fn update(&mut self, dt: f32) {
        self.frame = FrameStamp {
            frame_number: self.frame.frame_number + 1,
            reference_time: self.frame.reference_time + dt as f64,
        };
        self.graph.update(self.frame);
        self.sky.update(dt);
    }

    /// Per-frame uniform block as the shaders see it
    ///
    /// Reads the ambient colour from the root light model, so it reflects the
    /// value applied by the last [`update`](Self::update).
    pub fn frame_uniform(&self) -> FrameUniform {
        let root_state = self.graph.node(self.graph.root()).and_then(Node::state_set);
        let ambient = root_state
            .and_then(StateSet::light_model)
            .map(|model| model.ambient_intensity)
            .unwrap_or_else(Vector4::zero);
        let fog = root_state.and_then(StateSet::fog).copied();

        let (sun_diffuse, sun_direction) = self
            .sun_light()
            .map(|sun| (sun.diffuse, sun.direction))
            .unwrap_or((Vector4::zero(), Vector3::zero()));

        let eye = self.eye_pos();
        FrameUniform {
            view_position: [eye.x, eye.y, eye.z, 1.0],
            view_proj: convert_matrix4_to_array(self.viewer.view_projection_matrix()),
            ambient: ambient.into(),
            sun_diffuse: sun_diffuse.into(),
            sun_direction: sun_direction.extend(0.0).into(),
            fog_colour: fog
                .map(|f| f.colour)
                .unwrap_or_else(|| self.viewer.camera().clear_color())
                .into(),
            fog_params: [
                fog.map(|f| f.start).unwrap_or(0.0),
                fog.map(|f| f.end).unwrap_or(0.0),
                if fog.is_some() { 1.0 } else { 0.0 },
                self.sky.cloud_offset(),
            ],
        }
    }

    pub fn frame(&self) -> FrameStamp {
        self.frame
    }
}
