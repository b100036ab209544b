use super::params::VehicleParams;

/// m/s → km/h.
pub const KPH_PER_MPS: f64 = 3.6;

// ---------------------------------------------------------------------------
// Vehicle plant: one state (speed), forward-Euler integration
// ---------------------------------------------------------------------------

/// Longitudinal vehicle model driven by a normalized throttle `u ∈ [0, 1]`.
///
/// `m·dv/dt = u·F_max − b·v`, integrated with explicit Euler and floored at
/// zero (the model never reverses).
#[derive(Debug, Clone)]
pub struct Plant {
    params: VehicleParams,
    speed: f64, // m/s
}

impl Plant {
    pub fn new(params: VehicleParams) -> Self {
        Self { params, speed: 0.0 }
    }

    pub fn params(&self) -> &VehicleParams {
        &self.params
    }

    /// Reset speed to `initial_speed` (negative values are floored at 0).
    pub fn reset(&mut self, initial_speed: f64) {
        self.speed = initial_speed.max(0.0);
    }

    /// Acceleration the plant would see for throttle `u` at the current speed.
    pub fn acceleration(&self, u: f64) -> f64 {
        let u = u.clamp(0.0, 1.0);
        let traction = u * self.params.max_tractive_force();
        let drag = self.params.drag_coefficient() * self.speed;
        (traction - drag) / self.params.mass()
    }

    /// Advance one step of length `dt` (> 0) and return the new speed.
    pub fn step(&mut self, u: f64, dt: f64) -> f64 {
        let accel = self.acceleration(u);
        self.speed = (self.speed + accel * dt).max(0.0);
        self.speed
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn speed_kph(&self) -> f64 {
        self.speed * KPH_PER_MPS
    }

    /// Steady-state speed under constant throttle `u`.
    pub fn terminal_speed(&self, u: f64) -> f64 {
        let traction = u.clamp(0.0, 1.0) * self.params.max_tractive_force();
        if self.params.drag_coefficient() > 0.0 {
            traction / self.params.drag_coefficient()
        } else if traction > 0.0 {
            f64::INFINITY
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sedan() -> Plant {
        Plant::new(VehicleParams::new("Test", 1400.0, 7000.0, 40.0).unwrap())
    }

    #[test]
    fn full_throttle_from_rest() {
        let mut p = sedan();
        let v = p.step(1.0, 0.1);
        // a = 7000 / 1400 = 5 m/s^2
        assert!((v - 0.5).abs() < 1e-12);
    }

    #[test]
    fn control_signal_is_clamped() {
        let mut a = sedan();
        let mut b = sedan();
        assert_eq!(a.step(3.7, 0.05), b.step(1.0, 0.05));

        let mut c = sedan();
        c.reset(10.0);
        let mut d = sedan();
        d.reset(10.0);
        assert_eq!(c.step(-2.0, 0.05), d.step(0.0, 0.05));
    }

    #[test]
    fn coasting_decays_monotonically() {
        let mut p = sedan();
        p.reset(30.0);
        let mut prev = p.speed();
        for _ in 0..20_000 {
            let v = p.step(0.0, 0.05);
            assert!(v <= prev);
            assert!(v >= 0.0);
            prev = v;
        }
        assert!(prev < 1e-3, "speed should decay towards zero, got {}", prev);
    }

    #[test]
    fn speed_never_negative() {
        // Heavy drag with a coarse step overshoots zero in a single Euler step.
        let mut p = Plant::new(VehicleParams::new("Brick", 10.0, 100.0, 500.0).unwrap());
        p.reset(5.0);
        assert_eq!(p.step(0.0, 1.0), 0.0);
    }

    #[test]
    fn kph_conversion() {
        let mut p = sedan();
        p.reset(10.0);
        assert!((p.speed_kph() - 36.0).abs() < 1e-12);
    }

    #[test]
    fn terminal_speed_matches_drag_balance() {
        let p = sedan();
        assert!((p.terminal_speed(1.0) - 175.0).abs() < 1e-9);
        let glider = Plant::new(VehicleParams::new("G", 100.0, 10.0, 0.0).unwrap());
        assert!(glider.terminal_speed(0.5).is_infinite());
        assert_eq!(glider.terminal_speed(0.0), 0.0);
    }
}
