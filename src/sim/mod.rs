pub mod config;
pub mod result;
pub mod runner;
pub mod setpoint;

pub use config::{SimConfig, SimError, MAX_STEPS};
pub use result::{Sample, SimulationResult};
pub use runner::simulate;
pub use setpoint::Setpoint;
