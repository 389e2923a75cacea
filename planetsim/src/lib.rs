pub mod error;
pub mod simulation;
pub mod configuration;
pub mod interaction;
pub mod visualization;

pub use error::{Result, SimError};

pub use simulation::states::{Body, System, NVec2};
pub use simulation::trail::{Trail, TRAIL_LENGTH};
pub use simulation::forces::{ForceModel, ForceSet, NewtonianGravity};
pub use simulation::integrator::semi_implicit_euler;
pub use simulation::engine::{Boundary, BoundaryPolicy};
pub use simulation::controls::{ControlEvent, ControlPanel, MassRadiusCoupling};
pub use simulation::scenario::Scenario;
pub use simulation::run_loop::{RunLoop, RunState, TickOutcome};

pub use interaction::input::{PointerEvent, Surface, TouchEvent, TouchPhase, TouchTracker};
pub use interaction::drag::{DragController, DragOutcome, DragState};

pub use configuration::config::{BoundaryConfig, EngineConfig, ParametersConfig, ControlsConfig, BodyConfig, ScenarioConfig};

pub use visualization::renderer::{FrameView, Renderer};
pub use visualization::planetsim_vis2d::run_2d;
