//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - gravitational constant and the minimum pair distance,
//! - the two visualization scale factors of the integrator,
//! - trail length and the largest frame delta the run loop accepts

use super::forces::{G, MIN_DISTANCE};
use super::trail::TRAIL_LENGTH;

pub const VELOCITY_SCALE: f64 = 100.0;
pub const POSITION_SCALE: f64 = 0.5;
pub const MAX_FRAME_DT: f64 = 1.0;

#[derive(Debug, Clone)]
pub struct Parameters {
    pub g: f64, // gravitational constant
    pub min_distance: f64, // pairs closer than this feel no force
    pub velocity_scale: f64, // K_v in v += F/m * dt * K_v
    pub position_scale: f64, // K_p in x += v * dt * K_p
    pub trail_length: usize, // max points per trail
    pub max_frame_dt: f64, // longer frame deltas are discarded (seconds)
}

impl Default for Parameters {
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
