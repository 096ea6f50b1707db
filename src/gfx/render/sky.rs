//! Sky dome: atmosphere, scrolling clouds and the sun billboard

use cgmath::{InnerSpace, Vector3, Zero};

use crate::error::{RenderError, Result};
use crate::gfx::scene::{Node, NodeId, SceneGraph, NODE_MASK_ALL};
use crate::resource::SceneManager;

/// Distance of the sun billboard from the eye
pub const SKY_RADIUS: f32 = 1000.0;

pub struct SkyManager {
    root: NodeId,
    sun: NodeId,
    enabled: bool,
    sun_direction: Vector3<f32>,
    cloud_speed: f32,
    cloud_offset: f32,
}

impl SkyManager {
    /// Builds the sky subtree below `parent`
    ///
    /// The sky starts disabled; the world enables it for exterior cells.
    pub fn new(
        graph: &mut SceneGraph,
        parent: NodeId,
        scene_manager: &mut SceneManager,
    ) -> Result<Self> {
        let root = graph.insert_child(parent, Node::group("Sky"))?;
        scene_manager.instantiate(graph, root, "meshes/sky_atmosphere.nif")?;
        scene_manager.instantiate(graph, root, "meshes/sky_clouds_01.nif")?;
        let sun_direction = Vector3::new(0.0, 0.0, 1.0);
        let sun = graph.insert_child(root, Node::transform("Sun", sun_direction * SKY_RADIUS))?;
        graph.set_node_mask(root, 0)?;

        Ok(Self {
            root,
            sun,
            enabled: false,
            sun_direction,
            cloud_speed: 0.0,
            cloud_offset: 0.0,
        })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Shows or hides the whole sky subtree
    pub fn set_enabled(&mut self, graph: &mut SceneGraph, enabled: bool) -> Result<()> {
        if self.enabled == enabled {
            return Ok(());
        }
        graph.set_node_mask(self.root, if enabled { NODE_MASK_ALL } else { 0 })?;
        self.enabled = enabled;
        log::debug!("sky {}", if enabled { "enabled" } else { "disabled" });
        Ok(())
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Direction pointing from the scene towards the sun
    ///
    /// Moves the sun node onto the sky sphere along `direction`.
    pub fn set_sun_direction(
        &mut self,
        graph: &mut SceneGraph,
        direction: Vector3<f32>,
    ) -> Result<()> {
        self.sun_direction = if direction.is_zero() {
            direction
        } else {
            direction.normalize()
        };
        let sun = graph
            .node_mut(self.sun)
            .ok_or(RenderError::UnknownNode(self.sun))?;
        sun.set_position(self.sun_position());
        Ok(())
    }

    pub fn sun_direction(&self) -> Vector3<f32> {
        self.sun_direction
    }

    /// Where the sun billboard sits relative to the eye
    pub fn sun_position(&self) -> Vector3<f32> {
        self.sun_direction * SKY_RADIUS
    }

    pub fn set_cloud_speed(&mut self, speed: f32) {
        self.cloud_speed = speed;
    }

    pub fn cloud_offset(&self) -> f32 {
        self.cloud_offset
    }

    /// Advances the cloud animation; nothing moves while the sky is hidden
    pub fn update(&mut self, duration: f32) {
        if !self.enabled {
            return;
        }
        self.cloud_offset = (self.cloud_offset + duration * self.cloud_speed).rem_euclid(1.0);
    }

    pub fn sun_node(&self) -> NodeId {
        self.sun
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sky() -> (SceneGraph, SkyManager) {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let sky = SkyManager::new(&mut graph, root, &mut SceneManager::new()).unwrap();
        (graph, sky)
    }

    #[test]
    fn test_sky_subtree_built_hidden() {
        let (graph, sky) = sky();
        assert!(!sky.is_enabled());
        assert!(!graph.node(sky.root()).unwrap().is_visible());
        assert_eq!(graph.children(sky.root()).len(), 3);
        let sun = graph.node(sky.sun_node()).unwrap();
        assert_eq!(sun.name, "Sun");
        assert_eq!(sun.position(), Some(Vector3::new(0.0, 0.0, SKY_RADIUS)));
    }

    #[test]
    fn test_set_enabled_toggles_mask() {
        let (mut graph, mut sky) = sky();
        sky.set_enabled(&mut graph, true).unwrap();
        assert!(graph.node(sky.root()).unwrap().is_visible());
        sky.set_enabled(&mut graph, true).unwrap();
        assert!(sky.is_enabled());
        sky.set_enabled(&mut graph, false).unwrap();
        assert!(!graph.node(sky.root()).unwrap().is_visible());
    }

    #[test]
    fn test_clouds_only_move_when_enabled() {
        let (mut graph, mut sky) = sky();
        sky.set_cloud_speed(0.5);
        sky.update(1.0);
        assert_eq!(sky.cloud_offset(), 0.0);

        sky.set_enabled(&mut graph, true).unwrap();
        sky.update(1.0);
        assert_relative_eq!(sky.cloud_offset(), 0.5);
        sky.update(1.5);
        assert_relative_eq!(sky.cloud_offset(), 0.25);
    }

    #[test]
    fn test_sun_position_on_sky_sphere() {
        let (mut graph, mut sky) = sky();
        sky.set_sun_direction(&mut graph, Vector3::new(-1.0, 1.0, 1.0))
            .unwrap();
        assert_relative_eq!(sky.sun_position().magnitude(), SKY_RADIUS, epsilon = 1e-2);
    }

    #[test]
    fn test_sun_node_follows_direction() {
        let (mut graph, mut sky) = sky();
        sky.set_sun_direction(&mut graph, Vector3::new(0.0, -3.0, 0.0))
            .unwrap();

        let position = graph.node(sky.sun_node()).unwrap().position().unwrap();
        assert_relative_eq!(position.x, 0.0);
        assert_relative_eq!(position.y, -SKY_RADIUS);
        assert_relative_eq!(position.z, 0.0);
    }

    #[test]
    fn test_sun_direction_fails_once_sun_removed() {
        let (mut graph, mut sky) = sky();
        graph.remove_subtree(sky.sun_node()).unwrap();
        assert!(matches!(
            sky.set_sun_direction(&mut graph, Vector3::unit_x()),
            Err(RenderError::UnknownNode(_))
        ));
    }
}
