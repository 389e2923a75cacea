//! Force contributors for the planet simulation
//!
//! Defines the `ForceModel` trait, the `ForceSet` that sums terms into one
//! force vector per body, and direct Newtonian gravity with a minimum-distance
//! cutoff.

use crate::simulation::states::{System, NVec2};

/// Gravitational constant used by the default scenario, tuned for visibility
pub const G: f64 = 6.67430e-8;

/// Pairs closer than this contribute no force
pub const MIN_DISTANCE: f64 = 10.0;

/// Collection of force terms (gravity, drag, etc.)
/// Each term implements [`ForceModel`] and their contributions are summed
/// into a single force vector per body
pub struct ForceSet {
    terms: Vec<Box<dyn ForceModel + Send + Sync>>,
}

impl ForceSet {
    /// Create an empty force set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Add a force term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: ForceModel + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Compute total forces for all bodies in `sys`
    /// - `out[i]` is set to the sum of contributions from all terms
    /// - `sys` is only read, so every body sees the same position snapshot
    pub fn accumulate_forces(&self, sys: &System, out: &mut [NVec2]) {
        // Zero buffer
        for f in out.iter_mut() {
            *f = NVec2::zeros();
        }
        for term in &self.terms {
            term.force(sys, out);
        }
    }

    /// Convenience wrapper returning a freshly allocated force buffer
    pub fn forces(&self, sys: &System) -> Vec<NVec2> {
        let mut out = vec![NVec2::zeros(); sys.bodies.len()];
        self.accumulate_forces(sys, &mut out);
        out
    }
}

impl Default for ForceSet {
    fn default() -> Self {
        Self::new()
    }
}

/// A source of force on the bodies of a [`System`]
/// Implementations add their contribution into `out[i]` for each body
pub trait ForceModel {
    fn force(&self, sys: &System, out: &mut [NVec2]);
}

/// Newtonian gravity between every pair of bodies
///
/// Pairs closer than `min_distance` are skipped entirely instead of softened,
/// which keeps close encounters from blowing up at the cost of letting
/// overlapping bodies pass through each other.
pub struct NewtonianGravity {
    pub g: f64, // gravitational constant
    pub min_distance: f64,
}

impl NewtonianGravity {
    /// Force exerted on a body at `xi` with mass `mi` by a body at `xj` with mass `mj`
    pub fn pair_force(&self, xi: NVec2, mi: f64, xj: NVec2, mj: f64) -> NVec2 {
        // r points from i to j, so i is pulled along +r
        let r = xj - xi;
        let d2 = r.dot(&r);
        let d = d2.sqrt();

        if !(d >= self.min_distance) {
            return NVec2::zeros();
        }

        // |F| = G m_i m_j / d^2, direction r / d
        let magnitude = self.g * (mi * mj) / d2;
        let f = r * (magnitude / d);

        if f.x.is_finite() && f.y.is_finite() {
            f
        } else {
            NVec2::zeros()
        }
    }
}

impl Default for NewtonianGravity {
    fn default() -> Self {
        Self {
            g: G,
            min_distance: MIN_DISTANCE,
        }
    }
}

impl ForceModel for NewtonianGravity {
    fn force(&self, sys: &System, out: &mut [NVec2]) {
        let n = sys.bodies.len();

        // Loop over each unordered pair (i, j) with i < j
        for i in 0..n {
            let bi = &sys.bodies[i];

            for j in (i + 1)..n {
                let bj = &sys.bodies[j];

                let f = self.pair_force(bi.x, bi.m, bj.x, bj.m);

                // equal and opposite
                out[i] += f;
                out[j] -= f;
            }
        }
    }
}
