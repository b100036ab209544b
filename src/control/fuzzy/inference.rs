//! Mamdani max–min inference with discretized centroid defuzzification.

use std::sync::Arc;

use super::membership::{LinguisticVariable, MembershipShape};
use super::rules::{RuleBase, INPUT_TERMS};

/// Output returned when no rule fires.
pub const DEFUZZ_FALLBACK: f64 = 0.0;

/// Anything that maps `(error, error_rate)` to a crisp output.
pub trait FuzzySurface {
    fn evaluate(&self, error: f64, error_rate: f64) -> f64;
}

impl<S: FuzzySurface + ?Sized> FuzzySurface for &S {
    fn evaluate(&self, error: f64, error_rate: f64) -> f64 {
        (**self).evaluate(error, error_rate)
    }
}

impl<S: FuzzySurface + ?Sized> FuzzySurface for Arc<S> {
    fn evaluate(&self, error: f64, error_rate: f64) -> f64 {
        (**self).evaluate(error, error_rate)
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyConfig {
    pub error_range: f64,      // m/s, universe [-r, r]
    pub error_rate_range: f64, // m/s^2, universe [-r, r]
    pub output_min: f64,
    pub output_max: f64,
    pub resolution: usize, // centroid sample count
    pub shape: MembershipShape,
    pub rules: RuleBase,
}

impl Default for FuzzyConfig {
    fn default() -> Self {
        Self {
            error_range: 10.0,
            error_rate_range: 3.0,
            output_min: 0.0,
            output_max: 1.0,
            resolution: 101,
            shape: MembershipShape::Triangular,
            rules: RuleBase::CRUISE,
        }
    }
}

impl FuzzyConfig {
    /// Throttle-increment surface: symmetric output in `[-1, 1]`.
    pub fn incremental() -> Self {
        Self {
            output_min: -1.0,
            output_max: 1.0,
            rules: RuleBase::INCREMENTAL,
            ..Self::default()
        }
    }

    pub fn with_shape(mut self, shape: MembershipShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_ranges(mut self, error_range: f64, error_rate_range: f64) -> Self {
        self.error_range = error_range;
        self.error_rate_range = error_rate_range;
        self
    }

    pub fn with_output(mut self, min: f64, max: f64) -> Self {
        self.output_min = min;
        self.output_max = max;
        self
    }
}

// ---------------------------------------------------------------------------
// Inference engine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct FuzzyInference {
    config: FuzzyConfig,
    error: LinguisticVariable,
    rate: LinguisticVariable,
    output: LinguisticVariable,
    samples: Vec<f64>,
    // membership of each output term at each sample point: [term][sample]
    output_mf: Vec<Vec<f64>>,
}

impl FuzzyInference {
    pub fn new(config: FuzzyConfig) -> Self {
        let error = LinguisticVariable::symmetric(config.error_range, INPUT_TERMS, config.shape);
        let rate = LinguisticVariable::symmetric(config.error_rate_range, INPUT_TERMS, config.shape);
        let output = LinguisticVariable::evenly_spaced(
            config.output_min,
            config.output_max,
            config.rules.output_terms(),
            config.shape,
        );
        let (lo, hi) = (output.min(), output.max());

        let n = config.resolution.max(2);
        let samples: Vec<f64> = (0..n)
            .map(|i| lo + (hi - lo) * i as f64 / (n - 1) as f64)
            .collect();
        let output_mf = output
            .terms()
            .iter()
            .map(|t| samples.iter().map(|&x| t.eval(x)).collect())
            .collect();

        Self { config, error, rate, output, samples, output_mf }
    }

    pub fn config(&self) -> &FuzzyConfig {
        &self.config
    }

    pub fn output_variable(&self) -> &LinguisticVariable {
        &self.output
    }

    pub fn fuzzify_error(&self, error: f64) -> Vec<f64> {
        self.error.fuzzify(sanitize(error))
    }

    pub fn fuzzify_rate(&self, error_rate: f64) -> Vec<f64> {
        self.rate.fuzzify(sanitize(error_rate))
    }

    /// Aggregated strength of each output term (max over rules of the min of
    /// the two antecedent memberships).
    pub fn firing_strengths(&self, error: f64, error_rate: f64) -> Vec<f64> {
        let mu_e = self.fuzzify_error(error);
        let mu_de = self.fuzzify_rate(error_rate);
        let mut strengths = vec![0.0; self.config.rules.output_terms()];
        for (i, j, k) in self.config.rules.rules() {
            let w = mu_e[i].min(mu_de[j]);
            if w > strengths[k] {
                strengths[k] = w;
            }
        }
        strengths
    }

    /// Centroid of the clipped, max-aggregated output set.
    pub fn defuzzify(&self, strengths: &[f64]) -> f64 {
        let mut num = 0.0;
        let mut den = 0.0;
        for (s, &x) in self.samples.iter().enumerate() {
            let mut mu: f64 = 0.0;
            for (k, &w) in strengths.iter().enumerate() {
                if w > 0.0 {
                    mu = mu.max(w.min(self.output_mf[k][s]));
                }
            }
            num += x * mu;
            den += mu;
        }
        if den == 0.0 {
            DEFUZZ_FALLBACK
        } else {
            num / den
        }
    }

    pub fn infer(&self, error: f64, error_rate: f64) -> f64 {
        let strengths = self.firing_strengths(error, error_rate);
        self.defuzzify(&strengths)
    }
}

impl Default for FuzzyInference {
    fn default() -> Self {
        Self::new(FuzzyConfig::default())
    }
}

impl FuzzySurface for FuzzyInference {
    fn evaluate(&self, error: f64, error_rate: f64) -> f64 {
        self.infer(error, error_rate)
    }
}

// NaN carries no information about which term it belongs to; treat it as zero.
fn sanitize(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x
    }
}
