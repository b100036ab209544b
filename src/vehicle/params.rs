use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Vehicle parameters (longitudinal, single degree of freedom)
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Clone, PartialEq)]
pub enum VehicleError {
    #[error("mass must be positive and finite, got {0}")]
    InvalidMass(f64),

    #[error("max tractive force must be positive and finite, got {0}")]
    InvalidTractiveForce(f64),

    #[error("drag coefficient must be non-negative and finite, got {0}")]
    InvalidDrag(f64),
}

/// Physical description of a vehicle. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleParams {
    name: String,
    mass: f64,               // kg
    max_tractive_force: f64, // N, applied at u = 1
    drag_coefficient: f64,   // N per m/s (linear drag)
}

impl VehicleParams {
    pub fn new(
        name: impl Into<String>,
        mass: f64,
        max_tractive_force: f64,
        drag_coefficient: f64,
    ) -> Result<Self, VehicleError> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(VehicleError::InvalidMass(mass));
        }
        if !(max_tractive_force.is_finite() && max_tractive_force > 0.0) {
            return Err(VehicleError::InvalidTractiveForce(max_tractive_force));
        }
        if !(drag_coefficient.is_finite() && drag_coefficient >= 0.0) {
            return Err(VehicleError::InvalidDrag(drag_coefficient));
        }
        Ok(Self {
            name: name.into(),
            mass,
            max_tractive_force,
            drag_coefficient,
        })
    }

    /// Constructor for registry entries whose values are known to be valid.
    pub(crate) fn preset(name: &str, mass: f64, max_tractive_force: f64, drag_coefficient: f64) -> Self {
        Self {
            name: name.to_string(),
            mass,
            max_tractive_force,
            drag_coefficient,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn max_tractive_force(&self) -> f64 {
        self.max_tractive_force
    }

    pub fn drag_coefficient(&self) -> f64 {
        self.drag_coefficient
    }

    /// Peak acceleration from standstill at full throttle.
    pub fn max_acceleration(&self) -> f64 {
        self.max_tractive_force / self.mass
    }

    /// Power-to-weight style figure: tractive force per tonne.
    pub fn force_per_tonne(&self) -> f64 {
        self.max_tractive_force / (self.mass / 1000.0)
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

pub struct VehicleParamsBuilder {
    name: String,
    mass: f64,
    max_tractive_force: f64,
    drag_coefficient: f64,
}

impl VehicleParamsBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mass: 1200.0,
            max_tractive_force: 4000.0,
            drag_coefficient: 40.0,
        }
    }

    pub fn mass(mut self, v: f64) -> Self { self.mass = v; self }
    pub fn max_tractive_force(mut self, v: f64) -> Self { self.max_tractive_force = v; self }
    pub fn drag_coefficient(mut self, v: f64) -> Self { self.drag_coefficient = v; self }

    pub fn build(self) -> Result<VehicleParams, VehicleError> {
        VehicleParams::new(self.name, self.mass, self.max_tractive_force, self.drag_coefficient)
    }
}
