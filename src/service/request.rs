use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::control::fuzzy::MembershipShape;
use crate::vehicle::{presets, VehicleParams};

/// Preset used when the requested vehicle is unknown.
pub const DEFAULT_VEHICLE: &str = "fiat";

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RequestError {
    #[error("field '{field}' is not a finite number: '{value}'")]
    InvalidNumber { field: String, value: String },

    #[error("field '{field}' is out of range: {value}")]
    OutOfRange { field: String, value: f64 },
}

/// Parameters of one comparison run, as submitted by the form.
///
/// Gains are force-denominated (N per m/s and friends), as the form shows
/// them; the speed is in km/h and the horizon in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub vehicle: String,
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
    pub speed_kph: f64,
    pub horizon: f64,
    pub shape: MembershipShape,
}

impl Default for SimulationRequest {
    fn default() -> Self {
        Self {
            vehicle: DEFAULT_VEHICLE.to_string(),
            kp: 300.0,
            ki: 15.0,
            kd: 50.0,
            speed_kph: 72.0,
            horizon: 70.0,
            shape: MembershipShape::Triangular,
        }
    }
}

impl SimulationRequest {
    /// Parse form fields (`vehicle`, `kp`, `ki`, `kd`, `speed`, `time`,
    /// `mf_type`). Unknown fields are ignored and empty values keep their
    /// default.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, RequestError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut req = Self::default();
        for (key, value) in pairs {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match key.trim() {
                "vehicle" => req.vehicle = value.to_string(),
                "kp" => req.kp = parse_number("kp", value)?,
                "ki" => req.ki = parse_number("ki", value)?,
                "kd" => req.kd = parse_number("kd", value)?,
                "speed" => req.speed_kph = parse_number("speed", value)?,
                "time" => req.horizon = parse_number("time", value)?,
                "mf_type" => req.shape = MembershipShape::from_token(value),
                _ => {}
            }
        }

        if req.horizon <= 0.0 {
            return Err(RequestError::OutOfRange { field: "time".into(), value: req.horizon });
        }
        Ok(req)
    }

    /// Vehicle parameters for the request; unknown keys fall back to the city car.
    pub fn vehicle_params(&self) -> VehicleParams {
        presets::lookup(&self.vehicle).unwrap_or_else(|| {
            warn!("unknown vehicle '{}', falling back to '{}'", self.vehicle, DEFAULT_VEHICLE);
            presets::fiat()
        })
    }
}

fn parse_number(field: &str, value: &str) -> Result<f64, RequestError> {
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(RequestError::InvalidNumber { field: field.into(), value: value.into() }),
    }
}
