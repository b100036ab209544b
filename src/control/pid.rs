use serde::{Deserialize, Serialize};

use super::controller::Controller;

// ---------------------------------------------------------------------------
// PID Controller (normalized output, integral anti-windup)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PidConfig {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
    pub u_min: f64,
    pub u_max: f64,
    pub integral_limit: f64, // symmetric clamp on ∫e dt
}

impl Default for PidConfig {
    fn default() -> Self {
        Self {
            kp: 0.8,
            ki: 0.4,
            kd: 0.05,
            u_min: 0.0,
            u_max: 1.0,
            integral_limit: 1.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Pid {
    kp: f64,
    ki: f64,
    kd: f64,
    u_min: f64,
    u_max: f64,
    integral_limit: f64,
    integral: f64,
    prev_error: f64,
}

impl Pid {
    /// Gains with the default output range `[0, 1]` and anti-windup band.
    pub fn new(kp: f64, ki: f64, kd: f64) -> Self {
        Self::with_config(PidConfig { kp, ki, kd, ..PidConfig::default() })
    }

    pub fn with_config(config: PidConfig) -> Self {
        let mut pid = Self {
            kp: config.kp,
            ki: config.ki,
            kd: config.kd,
            u_min: 0.0,
            u_max: 1.0,
            integral_limit: 1.0,
            integral: 0.0,
            prev_error: 0.0,
        };
        pid.set_limits(Some(config.u_min), Some(config.u_max));
        pid.set_integral_limit(Some(config.integral_limit));
        pid
    }

    pub fn config(&self) -> PidConfig {
        PidConfig {
            kp: self.kp,
            ki: self.ki,
            kd: self.kd,
            u_min: self.u_min,
            u_max: self.u_max,
            integral_limit: self.integral_limit,
        }
    }

    /// Update gains; `None` leaves a gain unchanged.
    pub fn set_gains(&mut self, kp: Option<f64>, ki: Option<f64>, kd: Option<f64>) {
        if let Some(kp) = kp {
            self.kp = kp;
        }
        if let Some(ki) = ki {
            self.ki = ki;
        }
        if let Some(kd) = kd {
            self.kd = kd;
        }
    }

    /// Update output limits; `None` (or NaN) leaves a limit unchanged.
    /// Reversed limits are swapped.
    pub fn set_limits(&mut self, u_min: Option<f64>, u_max: Option<f64>) {
        let lo = u_min.filter(|v| !v.is_nan()).unwrap_or(self.u_min);
        let hi = u_max.filter(|v| !v.is_nan()).unwrap_or(self.u_max);
        self.u_min = lo.min(hi);
        self.u_max = lo.max(hi);
    }

    /// Symmetric anti-windup band; a NaN limit is ignored.
    pub fn set_integral_limit(&mut self, limit: Option<f64>) {
        if let Some(limit) = limit.filter(|l| !l.is_nan()) {
            self.integral_limit = limit.abs();
            self.integral = self.integral.clamp(-self.integral_limit, self.integral_limit);
        }
    }

    pub fn update(&mut self, error: f64, dt: f64) -> f64 {
        self.integral += error * dt;
        // Anti-windup: clamp integral to prevent saturation
        self.integral = self.integral.clamp(-self.integral_limit, self.integral_limit);
        let derivative = if dt > 0.0 { (error - self.prev_error) / dt } else { 0.0 };
        self.prev_error = error;
        let output = self.kp * error + self.ki * self.integral + self.kd * derivative;
        output.clamp(self.u_min, self.u_max)
    }

    pub fn reset(&mut self) {
        self.integral = 0.0;
        self.prev_error = 0.0;
    }

    pub fn integral(&self) -> f64 {
        self.integral
    }

    pub fn previous_error(&self) -> f64 {
        self.prev_error
    }
}

impl Default for Pid {
    fn default() -> Self {
        Self::with_config(PidConfig::default())
    }
}

impl Controller for Pid {
    fn step(&mut self, error: f64, dt: f64) -> f64 {
        self.update(error, dt)
    }

    fn reset(&mut self) {
        Pid::reset(self);
    }
}
