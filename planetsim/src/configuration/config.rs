//! Configuration types for loading simulation scenarios from YAML.
//!
//! A scenario consists of:
//!
//! - [`EngineConfig`]     – boundary policy
//! - [`ParametersConfig`] – numerical parameters and physical constants
//! - [`ControlsConfig`]   – initial speed and the mass/radius coupling constants
//! - [`BodyConfig`]       – initial state for each body
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! Every section except `bodies` may be omitted and falls back to the values
//! of the default three-body scenario.
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   boundary:
//!     kind: reflective      # or "unbounded"
//!     restitution: 0.9
//!     half_extents: [400.0, 300.0]   # optional, defaults to half the window
//!
//! parameters:
//!   G: 6.6743e-8            # gravitational constant
//!   min_distance: 10.0      # pairs closer than this feel no force
//!   velocity_scale: 100.0
//!   position_scale: 0.5
//!   trail_length: 1000
//!   max_frame_dt: 1.0       # seconds
//!
//! controls:
//!   speed: 1.0
//!   base_mass: 5.0e8
//!   base_radius: 15.0
//!   min_radius: 5.0
//!   max_radius: 30.0
//!
//! bodies:
//!   - x: [ -100.0, 0.0 ]
//!     v: [ 0.0, -1.5 ]
//!     m: 5.0e8
//!     radius: 15.0
//!     color: "#4db8ff"
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::simulation::controls::{BASE_MASS, BASE_RADIUS, MAX_RADIUS, MIN_RADIUS};
use crate::simulation::forces::{G, MIN_DISTANCE};
use crate::simulation::params::{MAX_FRAME_DT, POSITION_SCALE, VELOCITY_SCALE};
use crate::simulation::trail::TRAIL_LENGTH;

/// Boundary policy applied after each integration step
/// `kind: unbounded` or `kind: reflective`
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BoundaryConfig {
    #[default]
    Unbounded,
    Reflective {
        #[serde(default)]
        restitution: Option<f64>,
        #[serde(default)]
        half_extents: Option<[f64; 2]>,
    },
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub boundary: BoundaryConfig,
}

/// Global numerical and physical parameters for a scenario
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ParametersConfig {
    #[serde(rename = "G")]
    pub g: f64,              // gravitational constant
    pub min_distance: f64,   // force cutoff distance
    pub velocity_scale: f64, // K_v
    pub position_scale: f64, // K_p
    pub trail_length: usize, // points kept per trail
    pub max_frame_dt: f64,   // largest accepted frame delta, seconds
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            g: G,
            min_distance: MIN_DISTANCE,
            velocity_scale: VELOCITY_SCALE,
            position_scale: POSITION_SCALE,
            trail_length: TRAIL_LENGTH,
            max_frame_dt: MAX_FRAME_DT,
        }
    }
}

/// Initial control values and the constants of the mass/radius coupling
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ControlsConfig {
    pub speed: f64,
    pub base_mass: f64,
    pub base_radius: f64,
    pub min_radius: f64,
    pub max_radius: f64,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            speed: 1.0,
            base_mass: BASE_MASS,
            base_radius: BASE_RADIUS,
            min_radius: MIN_RADIUS,
            max_radius: MAX_RADIUS,
        }
    }
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct BodyConfig {
    pub x: [f64; 2], // position, simulation units from the surface center
    pub v: [f64; 2], // velocity
    pub m: f64,      // mass
    pub radius: f64, // radius
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_color() -> String {
    "#ffffff".to_string()
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub parameters: ParametersConfig,
    #[serde(default)]
    pub controls: ControlsConfig,
    pub bodies: Vec<BodyConfig>,
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_yaml::from_reader(reader)?)
    }
}

/// Three equal planets on a triangle, the scenario shipped as `three_body.yaml`
impl Default for ScenarioConfig {
    fn default() -> Self {
        let body = |x: [f64; 2], v: [f64; 2], color: &str| BodyConfig {
            x,
            v,
            m: BASE_MASS,
            radius: BASE_RADIUS,
            color: color.to_string(),
        };
        Self {
            engine: EngineConfig::default(),
            parameters: ParametersConfig::default(),
            controls: ControlsConfig::default(),
            bodies: vec![
                body([-100.0, 0.0], [0.0, -1.5], "#4db8ff"),
                body([100.0, 0.0], [0.0, 1.5], "#ff9f43"),
                body([0.0, 173.2], [1.8, 0.0], "#ffd700"),
            ],
        }
    }
}
