//! Membership functions and evenly spaced linguistic variables.

use serde::{Deserialize, Serialize};

/// Fraction of the term spacing covered by a trapezoid's flat top on each
/// side of its centre.
pub const TRAPEZOID_PLATEAU: f64 = 0.3;

/// Shape family used for every term of a linguistic variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MembershipShape {
    #[default]
    Triangular,
    Trapezoidal,
}

impl MembershipShape {
    /// Parse a selector token (`"tri"` / `"trap"`); anything else is triangular.
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_lowercase().as_str() {
            "trap" | "trapezoid" | "trapezoidal" => MembershipShape::Trapezoidal,
            _ => MembershipShape::Triangular,
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            MembershipShape::Triangular => "tri",
            MembershipShape::Trapezoidal => "trap",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MembershipShape::Triangular => "Triangular",
            MembershipShape::Trapezoidal => "Trapezoidal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MembershipFn {
    /// `(left, peak, right)`
    Triangle(f64, f64, f64),
    /// `(a, b, c, d)`: rises on `[a, b]`, flat on `[b, c]`, falls on `[c, d]`.
    Trapezoid(f64, f64, f64, f64),
}

impl MembershipFn {
    pub fn eval(&self, x: f64) -> f64 {
        match *self {
            MembershipFn::Triangle(l, p, r) => triangle(x, l, p, r),
            MembershipFn::Trapezoid(a, b, c, d) => trapezoid(x, a, b, c, d),
        }
    }
}

/// Triangular membership. Exactly 1 at the peak, 0 at and beyond the feet.
/// A degenerate triangle (`l == p == r`) is 1 only at that point.
pub fn triangle(x: f64, l: f64, p: f64, r: f64) -> f64 {
    if x < l || x > r {
        0.0
    } else if x == p {
        1.0
    } else if x < p {
        (x - l) / (p - l)
    } else {
        (r - x) / (r - p)
    }
}

pub fn trapezoid(x: f64, a: f64, b: f64, c: f64, d: f64) -> f64 {
    if x < a || x > d {
        0.0
    } else if x >= b && x <= c {
        1.0
    } else if x < b {
        (x - a) / (b - a)
    } else {
        (d - x) / (d - c)
    }
}

// ---------------------------------------------------------------------------
// Linguistic variable
// ---------------------------------------------------------------------------

/// A universe `[min, max]` partitioned into evenly spaced, 50%-overlapping
/// terms. Term `i` is centred at `min + i·spacing` with half-width `spacing`,
/// so the outermost terms are full at the universe edges.
#[derive(Debug, Clone, PartialEq)]
pub struct LinguisticVariable {
    min: f64,
    max: f64,
    terms: Vec<MembershipFn>,
}

/// Universe bounds with NaN ends read as 0 and reversed ends swapped.
pub(crate) fn ordered_bounds(a: f64, b: f64) -> (f64, f64) {
    let a = if a.is_nan() { 0.0 } else { a };
    let b = if b.is_nan() { 0.0 } else { b };
    (a.min(b), a.max(b))
}

impl LinguisticVariable {
    /// `count` must be at least 2. Bounds go through the same ordering as
    /// the rest of the engine, so `fuzzify` always sees `min <= max`.
    pub fn evenly_spaced(min: f64, max: f64, count: usize, shape: MembershipShape) -> Self {
        let (min, max) = ordered_bounds(min, max);
        let count = count.max(2);
        let spacing = (max - min) / (count - 1) as f64;
        let terms = (0..count)
            .map(|i| {
                let centre = min + i as f64 * spacing;
                match shape {
                    MembershipShape::Triangular => {
                        MembershipFn::Triangle(centre - spacing, centre, centre + spacing)
                    }
                    MembershipShape::Trapezoidal => {
                        let top = spacing * TRAPEZOID_PLATEAU;
                        MembershipFn::Trapezoid(
                            centre - spacing,
                            centre - top,
                            centre + top,
                            centre + spacing,
                        )
                    }
                }
            })
            .collect();
        Self { min, max, terms }
    }

    /// Symmetric universe `[-range, range]`.
    pub fn symmetric(range: f64, count: usize, shape: MembershipShape) -> Self {
        let range = range.abs();
        Self::evenly_spaced(-range, range, count, shape)
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn terms(&self) -> &[MembershipFn] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Degree of membership in every term, after clamping `x` to the universe.
    pub fn fuzzify(&self, x: f64) -> Vec<f64> {
        let x = x.clamp(self.min, self.max);
        self.terms.iter().map(|t| t.eval(x)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_peak_and_feet() {
        for &(l, p, r) in &[(-1.0, 0.0, 1.0), (0.0, 0.25, 3.0), (-10.0, -5.0, 0.0)] {
            assert_eq!(triangle(p, l, p, r), 1.0);
            assert_eq!(triangle(l, l, p, r), 0.0);
            assert_eq!(triangle(r, l, p, r), 0.0);
            assert_eq!(triangle(l - 1.0, l, p, r), 0.0);
            assert_eq!(triangle(r + 1.0, l, p, r), 0.0);
        }
    }

    #[test]
    fn triangle_is_linear_on_each_side() {
        assert!((triangle(0.5, 0.0, 1.0, 3.0) - 0.5).abs() < 1e-12);
        assert!((triangle(2.0, 0.0, 1.0, 3.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn degenerate_triangle_is_a_spike() {
        assert_eq!(triangle(2.0, 2.0, 2.0, 2.0), 1.0);
        assert_eq!(triangle(2.0001, 2.0, 2.0, 2.0), 0.0);
        assert_eq!(triangle(1.9999, 2.0, 2.0, 2.0), 0.0);
    }

    #[test]
    fn shoulder_triangle() {
        // left == peak: falls from 1 immediately
        assert_eq!(triangle(0.0, 0.0, 0.0, 1.0), 1.0);
        assert!((triangle(0.25, 0.0, 0.0, 1.0) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn trapezoid_plateau() {
        assert_eq!(trapezoid(0.0, -2.0, -1.0, 1.0, 2.0), 1.0);
        assert_eq!(trapezoid(1.0, -2.0, -1.0, 1.0, 2.0), 1.0);
        assert!((trapezoid(1.5, -2.0, -1.0, 1.0, 2.0) - 0.5).abs() < 1e-12);
        assert_eq!(trapezoid(2.5, -2.0, -1.0, 1.0, 2.0), 0.0);
    }

    #[test]
    fn five_terms_overlap_by_half() {
        let v = LinguisticVariable::symmetric(10.0, 5, MembershipShape::Triangular);
        assert_eq!(v.len(), 5);
        // half-width = range / 4 where range = 20
        assert_eq!(v.terms()[2], MembershipFn::Triangle(-5.0, 0.0, 5.0));
        assert_eq!(v.terms()[4], MembershipFn::Triangle(5.0, 10.0, 15.0));

        let mu = v.fuzzify(2.5);
        assert_eq!(mu, vec![0.0, 0.0, 0.5, 0.5, 0.0]);
    }

    #[test]
    fn fuzzify_clamps_to_universe() {
        let v = LinguisticVariable::symmetric(3.0, 5, MembershipShape::Triangular);
        assert_eq!(v.fuzzify(50.0), vec![0.0, 0.0, 0.0, 0.0, 1.0]);
        assert_eq!(v.fuzzify(-50.0), vec![1.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn memberships_partition_unity_for_triangles() {
        let v = LinguisticVariable::evenly_spaced(0.0, 1.0, 4, MembershipShape::Triangular);
        for i in 0..=50 {
            let x = i as f64 / 50.0;
            let sum: f64 = v.fuzzify(x).iter().sum();
            assert!((sum - 1.0).abs() < 1e-9, "sum {} at {}", sum, x);
        }
    }

    #[test]
    fn reversed_and_nan_bounds_are_ordered() {
        let v = LinguisticVariable::evenly_spaced(4.0, -4.0, 5, MembershipShape::Triangular);
        assert_eq!((v.min(), v.max()), (-4.0, 4.0));
        assert_eq!(v.fuzzify(10.0), vec![0.0, 0.0, 0.0, 0.0, 1.0]);

        let v = LinguisticVariable::symmetric(f64::NAN, 5, MembershipShape::Trapezoidal);
        assert_eq!((v.min(), v.max()), (0.0, 0.0));
        assert_eq!(v.fuzzify(3.0).len(), 5);
    }

    #[test]
    fn shape_tokens() {
        assert_eq!(MembershipShape::from_token("trap"), MembershipShape::Trapezoidal);
        assert_eq!(MembershipShape::from_token("TRI"), MembershipShape::Triangular);
        assert_eq!(MembershipShape::from_token("bogus"), MembershipShape::Triangular);
        assert_eq!(MembershipShape::Trapezoidal.token(), "trap");
    }
}
