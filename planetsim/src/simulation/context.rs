//! Simulation context: all mutable state of one running simulation
//!
//! Owned by the [`RunLoop`](crate::simulation::run_loop::RunLoop), which is the
//! only way in from the outside.

use crate::interaction::drag::DragController;
use crate::interaction::input::Surface;
use crate::simulation::controls::ControlPanel;
use crate::simulation::engine::Boundary;
use crate::simulation::scenario::Scenario;
use crate::visualization::renderer::FrameView;

pub struct SimulationContext {
    pub scenario: Scenario,
    pub drag: DragController,
    pub controls: ControlPanel,
    pub surface: Surface,
}

impl SimulationContext {
    pub fn new(scenario: Scenario, surface: Surface) -> Self {
        let controls = ControlPanel::from_system(
            &scenario.system,
            scenario.initial_speed,
            &scenario.coupling,
        );
        Self {
            scenario,
            drag: DragController::new(),
            controls,
            surface,
        }
    }

    /// Boundary for the next step, with reflective extents resolved against the surface
    pub fn boundary(&self) -> Boundary {
        self.scenario.engine.boundary.resolve(self.surface.half_extents())
    }

    pub fn frame(&self, running: bool, fps: u32) -> FrameView<'_> {
        FrameView {
            bodies: &self.scenario.system.bodies,
            running,
            fps,
            speed: self.controls.speed,
            dragging: self.drag.dragged(),
        }
    }
}
