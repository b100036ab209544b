use crate::control::controller::Controller;

use super::inference::{FuzzyConfig, FuzzyInference, FuzzySurface};

// ---------------------------------------------------------------------------
// Fuzzy speed controller
// ---------------------------------------------------------------------------

/// How the surface output becomes a control signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FuzzyMode {
    /// `u = surface(e, de)`.
    Positional,
    /// `u += rate · surface(e, de) · dt`; the surface yields a signed
    /// increment and `rate` is the full-scale slew in output units per second.
    Incremental { rate: f64 },
}

/// Mamdani controller over any [`FuzzySurface`]: direct inference by default,
/// or a shared [`FuzzyLookupTable`](super::FuzzyLookupTable).
#[derive(Debug, Clone)]
pub struct FuzzyController<S = FuzzyInference> {
    surface: S,
    mode: FuzzyMode,
    u_min: f64,
    u_max: f64,
    prev_error: f64,
    output: f64, // accumulated output (incremental mode)
}

impl FuzzyController<FuzzyInference> {
    /// Positional controller with direct inference.
    pub fn new(config: FuzzyConfig) -> Self {
        Self::with_surface(FuzzyInference::new(config), FuzzyMode::Positional)
    }

    /// Incremental controller on [`FuzzyConfig::incremental`].
    pub fn incremental(rate: f64) -> Self {
        Self::with_surface(
            FuzzyInference::new(FuzzyConfig::incremental()),
            FuzzyMode::Incremental { rate },
        )
    }
}

impl Default for FuzzyController<FuzzyInference> {
    fn default() -> Self {
        Self::new(FuzzyConfig::default())
    }
}

impl<S: FuzzySurface> FuzzyController<S> {
    pub fn with_surface(surface: S, mode: FuzzyMode) -> Self {
        Self {
            surface,
            mode,
            u_min: 0.0,
            u_max: 1.0,
            prev_error: 0.0,
            output: 0.0,
        }
    }

    /// Output limits; reversed limits are swapped and a NaN limit keeps
    /// its current value.
    pub fn with_limits(mut self, u_min: f64, u_max: f64) -> Self {
        let lo = if u_min.is_nan() { self.u_min } else { u_min };
        let hi = if u_max.is_nan() { self.u_max } else { u_max };
        self.u_min = lo.min(hi);
        self.u_max = lo.max(hi);
        self
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn mode(&self) -> FuzzyMode {
        self.mode
    }

    pub fn previous_error(&self) -> f64 {
        self.prev_error
    }

    pub fn update(&mut self, error: f64, dt: f64) -> f64 {
        let error_rate = if dt > 0.0 { (error - self.prev_error) / dt } else { 0.0 };
        let y = self.surface.evaluate(error, error_rate);
        self.prev_error = error;

        match self.mode {
            FuzzyMode::Positional => y.clamp(self.u_min, self.u_max),
            FuzzyMode::Incremental { rate } => {
                let dt = dt.max(0.0);
                self.output = (self.output + rate * y * dt).clamp(self.u_min, self.u_max);
                self.output
            }
        }
    }

    pub fn reset(&mut self) {
        self.prev_error = 0.0;
        self.output = 0.0;
    }
}

impl<S: FuzzySurface> Controller for FuzzyController<S> {
    fn step(&mut self, error: f64, dt: f64) -> f64 {
        self.update(error, dt)
    }

    fn reset(&mut self) {
        FuzzyController::reset(self);
    }
}
