//! State set controllers
//!
//! A controller owns a piece of render state (an attribute value, a colour)
//! and writes it into a node's [`StateSet`] once per frame.

use std::cell::RefCell;
use std::rc::Rc;

use super::node::{FrameStamp, Node, NodeCallback};
use super::state_set::StateSet;

pub trait StateSetController {
    /// Installs the attributes `apply` expects to find
    fn set_defaults(&mut self, state_set: &mut StateSet);

    /// Writes the controller's current values into `state_set`
    fn apply(&mut self, state_set: &mut StateSet, frame: &FrameStamp);
}

/// Node callback driving a [`StateSetController`]
///
/// The controller is shared so its owner can keep changing the values it
/// writes. Defaults are installed the first time the callback runs.
pub struct StateSetUpdater<C> {
    controller: Rc<RefCell<C>>,
    initialized: bool,
}

impl<C: StateSetController> StateSetUpdater<C> {
    pub fn new(controller: Rc<RefCell<C>>) -> Self {
        Self {
            controller,
            initialized: false,
        }
    }
}

impl<C: StateSetController> NodeCallback for StateSetUpdater<C> {
    fn update(&mut self, node: &mut Node, frame: &FrameStamp) {
        let mut controller = self.controller.borrow_mut();
        let state_set = node.get_or_create_state_set();
        if !self.initialized {
            controller.set_defaults(state_set);
            self.initialized = true;
        }
        controller.apply(state_set, frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::{Fog, Node, SceneGraph, StateAttribute};

    #[derive(Default)]
    struct FogEnd {
        end: f32,
        defaults_installed: u32,
    }

    impl StateSetController for FogEnd {
        fn set_defaults(&mut self, state_set: &mut StateSet) {
            self.defaults_installed += 1;
            state_set.set_attribute(StateAttribute::Fog(Fog::default()));
        }

        fn apply(&mut self, state_set: &mut StateSet, _frame: &FrameStamp) {
            if let Some(fog) = state_set.fog_mut() {
                fog.end = self.end;
            }
        }
    }

    #[test]
    fn test_defaults_installed_once_and_values_applied_each_frame() {
        let mut graph = SceneGraph::new();
        let node = graph.insert_child(graph.root(), Node::group("fogged")).unwrap();
        let controller = Rc::new(RefCell::new(FogEnd::default()));
        graph
            .add_update_callback(node, Box::new(StateSetUpdater::new(controller.clone())))
            .unwrap();

        controller.borrow_mut().end = 100.0;
        graph.update(FrameStamp::default());
        controller.borrow_mut().end = 250.0;
        graph.update(FrameStamp::default());

        let fog_end = graph
            .node(node)
            .and_then(|n| n.state_set())
            .and_then(|s| s.fog())
            .map(|f| f.end);
        assert_eq!(fog_end, Some(250.0));
        assert_eq!(controller.borrow().defaults_installed, 1);
    }
}
