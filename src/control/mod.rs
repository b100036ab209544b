pub mod controller;
pub mod fuzzy;
pub mod pid;

pub use controller::Controller;
pub use fuzzy::{FuzzyConfig, FuzzyController, FuzzyInference, FuzzyLookupTable, FuzzyMode, FuzzySurface};
pub use pid::{Pid, PidConfig};
