//! High-level runtime engine settings
//!
//! Selects the boundary policy applied by the integrator after each step

use crate::configuration::config::BoundaryConfig;
use crate::simulation::states::NVec2;

/// Damping applied to the bounced velocity component
pub const RESTITUTION: f64 = 0.9;

/// Boundary policy as configured. Reflective half-extents either follow the
/// drawing surface (`None`) or are pinned by the scenario.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryPolicy {
    Unbounded,
    Reflective {
        restitution: f64,
        half_extents: Option<NVec2>,
    },
}

impl BoundaryPolicy {
    /// Resolve against the current surface half-size into the boundary the integrator uses
    pub fn resolve(&self, surface_half: NVec2) -> Boundary {
        match self {
            BoundaryPolicy::Unbounded => Boundary::Unbounded,
            BoundaryPolicy::Reflective { restitution, half_extents } => Boundary::Reflective {
                restitution: *restitution,
                half_extents: half_extents.unwrap_or(surface_half),
            },
        }
    }
}

impl From<&BoundaryConfig> for BoundaryPolicy {
    fn from(cfg: &BoundaryConfig) -> Self {
        match cfg {
            BoundaryConfig::Unbounded => BoundaryPolicy::Unbounded,
            BoundaryConfig::Reflective { restitution, half_extents } => BoundaryPolicy::Reflective {
                restitution: restitution.unwrap_or(RESTITUTION),
                half_extents: half_extents.map(|[w, h]| NVec2::new(w, h)),
            },
        }
    }
}

/// Boundary with concrete extents, as applied during one integration step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Boundary {
    Unbounded,
    Reflective {
        restitution: f64,
        half_extents: NVec2, // half-width, half-height
    },
}

#[derive(Debug, Clone)]
pub struct Engine {
    pub boundary: BoundaryPolicy,
}
