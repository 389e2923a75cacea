//! Core state types for the planet simulation.
//!
//! - `Body`   one disc mass with position, velocity, mass, radius, color and trail
//! - `System` the body registry: a fixed-size list of bodies plus simulated time
//!
//! Positions live in simulation space: origin at the surface center, x to the
//! right, y down (same orientation as the drawing surface).

use nalgebra::Vector2;

use super::trail::Trail;
use crate::error::{Result, SimError};

pub type NVec2 = Vector2<f64>;

#[derive(Debug, Clone)]
pub struct Body {
    pub x: NVec2, // position
    pub v: NVec2, // velocity
    pub m: f64, // mass
    pub radius: f64, // radius (hit-testing and boundary)
    pub color: String, // display only, "#rrggbb"
    pub trail: Trail,
}

impl Body {
    /// Build a body, rejecting non-positive or non-finite mass/radius and non-finite state
    pub fn new(
        index: usize,
        x: NVec2,
        v: NVec2,
        m: f64,
        radius: f64,
        color: impl Into<String>,
        trail_length: usize,
    ) -> Result<Self> {
        if !m.is_finite() || m <= 0.0 {
            return Err(SimError::InvalidBody {
                index,
                reason: format!("mass must be finite and > 0, got {m}"),
            });
        }
        if !radius.is_finite() || radius <= 0.0 {
            return Err(SimError::InvalidBody {
                index,
                reason: format!("radius must be finite and > 0, got {radius}"),
            });
        }
        if !is_finite(&x) || !is_finite(&v) {
            return Err(SimError::InvalidBody {
                index,
                reason: "position and velocity must be finite".into(),
            });
        }
        Ok(Self {
            x,
            v,
            m,
            radius,
            color: color.into(),
            trail: Trail::new(trail_length),
        })
    }

    pub fn momentum(&self) -> NVec2 {
        self.v * self.m
    }

    pub fn distance_to(&self, p: &NVec2) -> f64 {
        (self.x - p).norm()
    }
}

/// Body registry. The body count is fixed once built; bodies are replaced
/// wholesale on reset, never added or removed one by one.
#[derive(Debug, Clone)]
pub struct System {
    pub bodies: Vec<Body>,
    pub t: f64, // simulated time
}

impl System {
    pub fn new(bodies: Vec<Body>) -> Self {
        Self { bodies, t: 0.0 }
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&Body> {
        self.bodies.get(index).ok_or(SimError::UnknownBody(index))
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut Body> {
        self.bodies.get_mut(index).ok_or(SimError::UnknownBody(index))
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.m).sum()
    }

    /// Should stay constant for an isolated system
    pub fn total_momentum(&self) -> NVec2 {
        self.bodies
            .iter()
            .map(|b| b.momentum())
            .fold(NVec2::zeros(), |acc, p| acc + p)
    }

    pub fn center_of_mass(&self) -> NVec2 {
        let total = self.total_mass();
        if total <= 0.0 {
            return NVec2::zeros();
        }
        self.bodies
            .iter()
            .fold(NVec2::zeros(), |acc, b| acc + b.x * b.m)
            / total
    }
}

pub(crate) fn is_finite(v: &NVec2) -> bool {
    v.x.is_finite() && v.y.is_finite()
}
