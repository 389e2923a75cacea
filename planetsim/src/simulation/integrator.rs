//! Time integration for the planet simulation
//!
//! Semi-implicit (symplectic) Euler driven by a `ForceSet`:
//!
//! 1. v_n+1 = v_n + (F_n / m) * dt * K_v
//! 2. x_n+1 = x_n + v_n+1 * dt * K_p
//!
//! `K_v` and `K_p` are the visualization scale factors from `Parameters`.
//! After the update the boundary policy is applied and every body's new
//! position is appended to its trail.

use log::warn;

use super::engine::Boundary;
use super::forces::ForceSet;
use super::params::Parameters;
use super::states::{is_finite, System, NVec2};
use crate::error::{Result, SimError};

/// Advance the system by one step of `dt` seconds (already speed-scaled)
///
/// Forces for all bodies are computed from the positions at the start of the
/// step before any body moves. A step that is non-finite or negative is
/// rejected and leaves the system untouched. A body whose update would become
/// non-finite keeps its previous position and velocity.
pub fn semi_implicit_euler(
    sys: &mut System,
    forces: &ForceSet,
    params: &Parameters,
    boundary: Boundary,
    dt: f64,
) -> Result<()> {
    if !dt.is_finite() || dt < 0.0 {
        return Err(SimError::InvalidTimeStep(dt));
    }

    let n = sys.bodies.len();
    if n == 0 { // no bodies, return
        return Ok(());
    }

    // F_n for every body, from one snapshot
    let mut f_n = vec![NVec2::zeros(); n];
    forces.accumulate_forces(&*sys, &mut f_n);

    for (i, (b, f)) in sys.bodies.iter_mut().zip(f_n.iter()).enumerate() {
        // Kick with the current force, then drift with the new velocity
        let mut v = b.v + (*f / b.m) * (dt * params.velocity_scale);
        let mut x = b.x + v * (dt * params.position_scale);

        if let Boundary::Reflective { restitution, half_extents } = boundary {
            reflect_axis(&mut x.x, &mut v.x, b.radius, half_extents.x, restitution);
            reflect_axis(&mut x.y, &mut v.y, b.radius, half_extents.y, restitution);
        }

        if is_finite(&x) && is_finite(&v) {
            b.x = x;
            b.v = v;
        } else {
            warn!("body {i}: non-finite state after step (dt = {dt}), keeping previous state");
        }

        b.trail.push(b.x);
    }

    sys.t += dt;
    Ok(())
}

/// Keep a body of radius `r` inside [-half, half] on one axis.
/// On contact the position is clamped and the velocity is turned to point
/// back inside, scaled by `restitution`.
fn reflect_axis(x: &mut f64, v: &mut f64, r: f64, half: f64, restitution: f64) {
    let lo = -half + r;
    let hi = half - r;

    if lo > hi {
        // surface narrower than the body
        *x = 0.0;
        *v = -*v * restitution;
        return;
    }

    if *x < lo {
        *x = lo;
        *v = v.abs() * restitution;
    } else if *x > hi {
        *x = hi;
        *v = -v.abs() * restitution;
    }
}
