use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound on steps per run; callers wanting a cheaper run lower the
/// horizon or raise `dt`.
pub const MAX_STEPS: usize = 5_000_000;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    #[error("timestep must be positive and finite, got {0}")]
    InvalidTimestep(f64),

    #[error("horizon must be non-negative and finite, got {0}")]
    InvalidHorizon(f64),

    #[error("run of {steps} steps exceeds the limit of {max}")]
    TooManySteps { steps: usize, max: usize },
}

// ---------------------------------------------------------------------------
// Simulation config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    pub dt: f64,            // s
    pub horizon: f64,       // s
    pub initial_speed: f64, // m/s, applied by the plant reset
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt: 0.05,     // 20 Hz
            horizon: 20.0,
            initial_speed: 0.0,
        }
    }
}

impl SimConfig {
    pub fn new(dt: f64, horizon: f64) -> Self {
        Self { dt, horizon, ..Self::default() }
    }

    pub fn with_initial_speed(mut self, speed: f64) -> Self {
        self.initial_speed = speed;
        self
    }

    /// Check the config and return the step count, `floor(horizon / dt)`.
    pub fn validate(&self) -> Result<usize, SimError> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(SimError::InvalidTimestep(self.dt));
        }
        if !(self.horizon.is_finite() && self.horizon >= 0.0) {
            return Err(SimError::InvalidHorizon(self.horizon));
        }
        let ratio = (self.horizon / self.dt).floor();
        if ratio > MAX_STEPS as f64 {
            return Err(SimError::TooManySteps { steps: ratio as usize, max: MAX_STEPS });
        }
        Ok(ratio as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_count_floors() {
        assert_eq!(SimConfig::new(0.05, 20.0).validate(), Ok(400));
        assert_eq!(SimConfig::new(0.3, 1.0).validate(), Ok(3));
        assert_eq!(SimConfig::new(0.5, 0.0).validate(), Ok(0));
    }

    #[test]
    fn rejects_bad_timestep() {
        assert_eq!(SimConfig::new(0.0, 1.0).validate(), Err(SimError::InvalidTimestep(0.0)));
        assert_eq!(SimConfig::new(-0.1, 1.0).validate(), Err(SimError::InvalidTimestep(-0.1)));
        assert!(matches!(
            SimConfig::new(f64::NAN, 1.0).validate(),
            Err(SimError::InvalidTimestep(_))
        ));
    }

    #[test]
    fn rejects_bad_horizon_and_huge_runs() {
        assert_eq!(SimConfig::new(0.1, -1.0).validate(), Err(SimError::InvalidHorizon(-1.0)));
        assert!(matches!(
            SimConfig::new(1e-9, 1000.0).validate(),
            Err(SimError::TooManySteps { .. })
        ));
    }
}
