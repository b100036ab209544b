pub mod params;
pub mod plant;
pub mod presets;

pub use params::{VehicleError, VehicleParams, VehicleParamsBuilder};
pub use plant::{Plant, KPH_PER_MPS};
