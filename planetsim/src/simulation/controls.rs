//! Parameter controls: mass/radius coupling and the control-panel model
//!
//! Control events update one body field, derive the complementary field so
//! that mass and radius stay consistent, then push both back into the
//! [`ControlPanel`] so the widgets show what the bodies actually hold.

use log::warn;

use super::states::{Body, System};
use crate::configuration::config::ControlsConfig;
use crate::error::{Result, SimError};

pub const BASE_MASS: f64 = 5.0e8;
pub const BASE_RADIUS: f64 = 15.0;
pub const MIN_RADIUS: f64 = 5.0;
pub const MAX_RADIUS: f64 = 30.0;

/// Mass slider range; value `s` maps to `10^(7 + 2 s / 50)`
pub const MASS_SLIDER_MIN: f64 = 1.0;
pub const MASS_SLIDER_MAX: f64 = 100.0;

pub const SPEED_MIN: f64 = 0.0;
pub const SPEED_MAX: f64 = 5.0;

/// A discrete change coming from the parameter controls
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlEvent {
    /// New radius for a body; mass follows volumetrically
    Radius { index: usize, radius: f64 },
    /// New mass for a body; radius follows by cube root, clamped
    Mass { index: usize, mass: f64 },
    /// Mass slider moved (1..=100, logarithmic mass scale)
    MassSlider { index: usize, value: f64 },
    /// Time-scale multiplier
    Speed(f64),
}

/// Volumetric mass/radius coupling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassRadiusCoupling {
    pub base_mass: f64,
    pub base_radius: f64,
    pub min_radius: f64,
    pub max_radius: f64,
}

impl MassRadiusCoupling {
    /// `base_mass * (radius / base_radius)^3`
    pub fn mass_for_radius(&self, radius: f64) -> f64 {
        self.base_mass * (radius / self.base_radius).powi(3)
    }

    /// `base_radius * (mass / base_mass)^(1/3)`, clamped to `[min_radius, max_radius]`
    pub fn radius_for_mass(&self, mass: f64) -> f64 {
        (self.base_radius * (mass / self.base_mass).cbrt()).clamp(self.min_radius, self.max_radius)
    }

    pub fn mass_from_slider(&self, value: f64) -> f64 {
        10f64.powf(7.0 + value / 50.0 * 2.0)
    }

    /// Slider position after a radius change: 50 at the base radius
    pub fn slider_for_radius(&self, radius: f64) -> f64 {
        (50.0 * (radius / self.base_radius).powi(3))
            .round()
            .clamp(MASS_SLIDER_MIN, MASS_SLIDER_MAX)
    }

    /// Inverse of [`Self::mass_from_slider`], clamped to the slider range
    pub fn slider_for_mass(&self, mass: f64) -> f64 {
        (50.0 * (mass.log10() - 7.0) / 2.0).clamp(MASS_SLIDER_MIN, MASS_SLIDER_MAX)
    }

    /// Set a body's radius and derive its mass
    pub fn set_radius(&self, body: &mut Body, radius: f64) -> Result<()> {
        check_positive("radius", radius)?;
        let mass = self.mass_for_radius(radius);
        check_positive("derived mass", mass)?;
        body.radius = radius;
        body.m = mass;
        Ok(())
    }

    /// Set a body's mass and derive its radius
    pub fn set_mass(&self, body: &mut Body, mass: f64) -> Result<()> {
        check_positive("mass", mass)?;
        body.m = mass;
        body.radius = self.radius_for_mass(mass);
        Ok(())
    }
}

impl From<&ControlsConfig> for MassRadiusCoupling {
    fn from(cfg: &ControlsConfig) -> Self {
        Self {
            base_mass: cfg.base_mass,
            base_radius: cfg.base_radius,
            min_radius: cfg.min_radius,
            max_radius: cfg.max_radius,
        }
    }
}

impl Default for MassRadiusCoupling {
    fn default() -> Self {
        Self {
            base_mass: BASE_MASS,
            base_radius: BASE_RADIUS,
            min_radius: MIN_RADIUS,
            max_radius: MAX_RADIUS,
        }
    }
}

/// Values shown by the control widgets, one size and one mass slider per body
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPanel {
    pub speed: f64,
    pub sizes: Vec<f64>,
    pub mass_sliders: Vec<f64>,
}

impl ControlPanel {
    /// Panel mirroring the given bodies
    pub fn from_system(sys: &System, speed: f64, coupling: &MassRadiusCoupling) -> Self {
        Self {
            speed,
            sizes: sys.bodies.iter().map(|b| b.radius.round()).collect(),
            mass_sliders: sys
                .bodies
                .iter()
                .map(|b| coupling.slider_for_radius(b.radius))
                .collect(),
        }
    }

    /// Apply a control event to the bodies and push derived values back
    ///
    /// Rejected events leave both the bodies and the panel untouched.
    pub fn apply(
        &mut self,
        event: ControlEvent,
        sys: &mut System,
        coupling: &MassRadiusCoupling,
    ) -> Result<()> {
        match event {
            ControlEvent::Radius { index, radius } => {
                let body = sys.get_mut(index)?;
                coupling.set_radius(body, radius)?;
                self.sizes[index] = body.radius;
                self.mass_sliders[index] = coupling.slider_for_radius(body.radius);
            }
            ControlEvent::Mass { index, mass } => {
                let body = sys.get_mut(index)?;
                coupling.set_mass(body, mass)?;
                self.sizes[index] = body.radius.round();
                self.mass_sliders[index] = coupling.slider_for_mass(body.m);
            }
            ControlEvent::MassSlider { index, value } => {
                if !value.is_finite() {
                    return Err(SimError::InvalidParam(format!("mass slider value {value}")));
                }
                let value = value.clamp(MASS_SLIDER_MIN, MASS_SLIDER_MAX);
                let body = sys.get_mut(index)?;
                coupling.set_mass(body, coupling.mass_from_slider(value))?;
                self.sizes[index] = body.radius.round();
                self.mass_sliders[index] = value;
            }
            ControlEvent::Speed(speed) => {
                if !speed.is_finite() {
                    return Err(SimError::InvalidParam(format!("speed {speed}")));
                }
                let clamped = speed.clamp(SPEED_MIN, SPEED_MAX);
                if clamped != speed {
                    warn!("speed {speed} outside [{SPEED_MIN}, {SPEED_MAX}], using {clamped}");
                }
                self.speed = clamped;
            }
        }
        Ok(())
    }
}

fn check_positive(what: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidParam(format!("{what} must be finite and > 0, got {value}")))
    }
}
