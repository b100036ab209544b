//! Mamdani fuzzy speed control: membership functions, fixed rule bases,
//! max–min inference with centroid defuzzification, and a precomputed
//! lookup-table fast path.

pub mod controller;
pub mod inference;
pub mod lookup;
pub mod membership;
pub mod rules;

pub use controller::{FuzzyController, FuzzyMode};
pub use inference::{FuzzyConfig, FuzzyInference, FuzzySurface, DEFUZZ_FALLBACK};
pub use lookup::{FuzzyLookupTable, DEFAULT_GRID_POINTS};
pub use membership::{LinguisticVariable, MembershipFn, MembershipShape};
pub use rules::RuleBase;
