//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! `Scenario` containing:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - system state (`System` with bodies at t = 0)
//! - active force set (`ForceSet`)
//! - the mass/radius coupling used by the parameter controls
//! - a pristine copy of the initial bodies for reset

use crate::configuration::config::{BodyConfig, ScenarioConfig};
use crate::error::{Result, SimError};
use crate::simulation::controls::{MassRadiusCoupling, SPEED_MAX, SPEED_MIN};
use crate::simulation::engine::{BoundaryPolicy, Engine};
use crate::simulation::forces::{ForceSet, NewtonianGravity};
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, System, NVec2};

pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub system: System,
    pub forces: ForceSet,
    pub coupling: MassRadiusCoupling,
    pub initial_speed: f64,
    initial_bodies: Vec<Body>,
}

impl Scenario {
    pub fn build_scenario(cfg: &ScenarioConfig) -> Result<Self> {
        if cfg.bodies.is_empty() {
            return Err(SimError::InvalidParam("scenario needs at least one body".into()));
        }

        // Parameters (runtime) from ParametersConfig
        let p_cfg = &cfg.parameters;
        let parameters = Parameters {
            g: p_cfg.g,
            min_distance: p_cfg.min_distance,
            velocity_scale: p_cfg.velocity_scale,
            position_scale: p_cfg.position_scale,
            trail_length: p_cfg.trail_length,
            max_frame_dt: p_cfg.max_frame_dt,
        };
        validate_parameters(&parameters)?;

        // Bodies: map `BodyConfig` -> runtime `Body` using nalgebra vectors
        let initial_bodies = cfg
            .bodies
            .iter()
            .enumerate()
            .map(|(i, bc): (usize, &BodyConfig)| {
                Body::new(
                    i,
                    NVec2::new(bc.x[0], bc.x[1]),
                    NVec2::new(bc.v[0], bc.v[1]),
                    bc.m,
                    bc.radius,
                    bc.color.clone(),
                    parameters.trail_length,
                )
            })
            .collect::<Result<Vec<Body>>>()?;

        let engine = Engine {
            boundary: BoundaryPolicy::from(&cfg.engine.boundary),
        };
        if let BoundaryPolicy::Reflective { restitution, half_extents } = &engine.boundary {
            if !restitution.is_finite() || *restitution < 0.0 {
                return Err(SimError::InvalidParam(format!("restitution {restitution}")));
            }
            if let Some(h) = half_extents {
                if !(h.x > 0.0 && h.y > 0.0 && h.x.is_finite() && h.y.is_finite()) {
                    return Err(SimError::InvalidParam(format!("half_extents {h:?}")));
                }
            }
        }

        let coupling = MassRadiusCoupling::from(&cfg.controls);
        if !(coupling.base_mass > 0.0 && coupling.base_radius > 0.0)
            || !(coupling.min_radius > 0.0 && coupling.min_radius <= coupling.max_radius)
        {
            return Err(SimError::InvalidParam(format!("controls {:?}", cfg.controls)));
        }

        if !cfg.controls.speed.is_finite() {
            return Err(SimError::InvalidParam(format!("speed {}", cfg.controls.speed)));
        }
        let initial_speed = cfg.controls.speed.clamp(SPEED_MIN, SPEED_MAX);

        // Forces: register Newtonian gravity
        let forces = ForceSet::new().with(NewtonianGravity {
            g: parameters.g,
            min_distance: parameters.min_distance,
        });

        Ok(Self {
            engine,
            parameters,
            system: System::new(initial_bodies.clone()),
            forces,
            coupling,
            initial_speed,
            initial_bodies,
        })
    }

    /// Replace the body set with the initial one; trails start empty
    pub fn reset(&mut self) {
        self.system = System::new(self.initial_bodies.clone());
    }

    pub fn initial_bodies(&self) -> &[Body] {
        &self.initial_bodies
    }
}

fn validate_parameters(p: &Parameters) -> Result<()> {
    let finite_non_negative = [
        ("G", p.g),
        ("min_distance", p.min_distance),
        ("velocity_scale", p.velocity_scale),
        ("position_scale", p.position_scale),
    ];
    for (name, value) in finite_non_negative {
        if !value.is_finite() || value < 0.0 {
            return Err(SimError::InvalidParam(format!("{name} must be finite and >= 0, got {value}")));
        }
    }
    if !p.max_frame_dt.is_finite() || p.max_frame_dt <= 0.0 {
        return Err(SimError::InvalidParam(format!("max_frame_dt must be > 0, got {}", p.max_frame_dt)));
    }
    Ok(())
}
