//! Precomputed fuzzy control surface with bilinear interpolation.

use std::time::Instant;

use log::info;
use nalgebra::DMatrix;

use super::inference::{FuzzyInference, FuzzySurface};
use super::membership::ordered_bounds;

/// Default grid resolution per axis (30 × 30 nodes).
pub const DEFAULT_GRID_POINTS: usize = 30;

/// Evenly spaced sample axis.
#[derive(Debug, Clone, PartialEq)]
struct Axis {
    min: f64,
    max: f64,
    n: usize,
}

impl Axis {
    fn new(a: f64, b: f64, n: usize) -> Self {
        let (min, max) = ordered_bounds(a, b);
        Self { min, max, n: n.max(2) }
    }

    fn step(&self) -> f64 {
        (self.max - self.min) / (self.n - 1) as f64
    }

    fn point(&self, i: usize) -> f64 {
        if i + 1 == self.n {
            self.max
        } else {
            self.min + i as f64 * self.step()
        }
    }

    /// Cell index and fractional position, clamped to the axis.
    fn locate(&self, x: f64) -> (usize, f64) {
        let x = if x.is_nan() { 0.0 } else { x };
        let x = x.clamp(self.min, self.max);
        let step = self.step();
        if step <= 0.0 {
            return (0, 0.0);
        }
        let t = (x - self.min) / step;
        let i = (t.floor() as usize).min(self.n - 2);
        (i, (t - i as f64).clamp(0.0, 1.0))
    }
}

/// Immutable `(error, error_rate) → output` grid. Built once and shared
/// read-only (wrap in `Arc` to share across threads).
#[derive(Debug, Clone)]
pub struct FuzzyLookupTable {
    error_axis: Axis,
    rate_axis: Axis,
    values: DMatrix<f64>, // rows: error, cols: error rate
}

impl FuzzyLookupTable {
    /// Sample `surface` on an `n_error × n_rate` grid over the given spans.
    pub fn build<S: FuzzySurface + ?Sized>(
        surface: &S,
        error_span: (f64, f64),
        rate_span: (f64, f64),
        n_error: usize,
        n_rate: usize,
    ) -> Self {
        let started = Instant::now();
        let error_axis = Axis::new(error_span.0, error_span.1, n_error);
        let rate_axis = Axis::new(rate_span.0, rate_span.1, n_rate);
        let values = DMatrix::from_fn(error_axis.n, rate_axis.n, |i, j| {
            surface.evaluate(error_axis.point(i), rate_axis.point(j))
        });
        info!(
            "built {}x{} fuzzy lookup table in {:.1} ms",
            error_axis.n,
            rate_axis.n,
            started.elapsed().as_secs_f64() * 1e3
        );
        Self { error_axis, rate_axis, values }
    }

    /// Tabulate an inference engine over its own input universes.
    pub fn from_inference(inference: &FuzzyInference, n_error: usize, n_rate: usize) -> Self {
        let cfg = inference.config();
        let e = cfg.error_range.abs();
        let de = cfg.error_rate_range.abs();
        Self::build(inference, (-e, e), (-de, de), n_error, n_rate)
    }

    pub fn values(&self) -> &DMatrix<f64> {
        &self.values
    }

    pub fn shape(&self) -> (usize, usize) {
        self.values.shape()
    }

    pub fn error_points(&self) -> Vec<f64> {
        (0..self.error_axis.n).map(|i| self.error_axis.point(i)).collect()
    }

    pub fn rate_points(&self) -> Vec<f64> {
        (0..self.rate_axis.n).map(|j| self.rate_axis.point(j)).collect()
    }

    /// Bilinear interpolation; queries outside the grid use the edge value.
    pub fn interpolate(&self, error: f64, error_rate: f64) -> f64 {
        let (i, fx) = self.error_axis.locate(error);
        let (j, fy) = self.rate_axis.locate(error_rate);
        let v00 = self.values[(i, j)];
        let v10 = self.values[(i + 1, j)];
        let v01 = self.values[(i, j + 1)];
        let v11 = self.values[(i + 1, j + 1)];
        let lo = v00 + (v10 - v00) * fx;
        let hi = v01 + (v11 - v01) * fx;
        lo + (hi - lo) * fy
    }

    /// Largest absolute difference from `reference` over a dense probe grid
    /// spanning the table.
    pub fn max_deviation<S: FuzzySurface + ?Sized>(&self, reference: &S, probes: usize) -> f64 {
        let ea = Axis::new(self.error_axis.min, self.error_axis.max, probes);
        let ra = Axis::new(self.rate_axis.min, self.rate_axis.max, probes);
        let mut worst: f64 = 0.0;
        for i in 0..ea.n {
            for j in 0..ra.n {
                let (e, de) = (ea.point(i), ra.point(j));
                worst = worst.max((self.interpolate(e, de) - reference.evaluate(e, de)).abs());
            }
        }
        worst
    }
}

impl FuzzySurface for FuzzyLookupTable {
    fn evaluate(&self, error: f64, error_rate: f64) -> f64 {
        self.interpolate(error, error_rate)
    }
}
