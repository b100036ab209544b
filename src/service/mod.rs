//! Request handling for the PID-vs-fuzzy comparison service.
//!
//! The HTTP layer is not part of this crate: a front end parses its form
//! into a [`SimulationRequest`], builds [`FuzzySurfaces`] once at startup,
//! and calls [`run_comparison`] per request.

pub mod compare;
pub mod request;

pub use compare::{run_comparison, ComparisonReport, ControllerTrace, FuzzySurfaces};
pub use request::{RequestError, SimulationRequest};
