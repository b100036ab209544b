//! Cruise-control simulation: a longitudinal vehicle plant driven by PID and
//! Mamdani fuzzy speed controllers.

pub mod control;
pub mod io;
pub mod service;
pub mod sim;
pub mod vehicle;

pub use control::{Controller, FuzzyController, Pid};
pub use sim::{simulate, SimConfig, Setpoint, SimulationResult};
pub use vehicle::{Plant, VehicleParams};
