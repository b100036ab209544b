use log::debug;

use crate::control::Controller;
use crate::vehicle::Plant;
use super::config::{SimConfig, SimError};
use super::result::{Sample, SimulationResult};
use super::setpoint::Setpoint;

// ---------------------------------------------------------------------------
// Closed-loop simulation
// ---------------------------------------------------------------------------

/// Drive `plant` with `controller` for `floor(horizon / dt)` steps.
///
/// Both are reset first, so repeated runs on the same objects are
/// independent. Each step reads the speed, computes
/// `error = setpoint − speed`, asks the controller for an output, integrates
/// the plant, and records `((k + 1)·dt, new speed, output, setpoint)`.
pub fn simulate<C>(
    plant: &mut Plant,
    controller: &mut C,
    setpoint: &Setpoint,
    config: &SimConfig,
) -> Result<SimulationResult, SimError>
where
    C: Controller + ?Sized,
{
    let steps = config.validate()?;
    let dt = config.dt;

    plant.reset(config.initial_speed);
    controller.reset();

    debug!(
        "simulating '{}' for {} steps (dt = {} s, v0 = {} m/s)",
        plant.params().name(),
        steps,
        dt,
        config.initial_speed
    );

    let mut result = SimulationResult::with_capacity(steps);
    for k in 0..steps {
        let target = setpoint.at(k);
        let error = target - plant.speed();
        let control = controller.step(error, dt);
        let speed = plant.step(control, dt);

        result.push(Sample {
            time: (k + 1) as f64 * dt,
            speed,
            control,
            setpoint: target,
        });
    }

    debug!(
        "finished '{}': final speed {:.3} m/s",
        plant.params().name(),
        plant.speed()
    );
    Ok(result)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
