use std::sync::Arc;

use log::debug;
use serde::Serialize;

use crate::control::fuzzy::{
    FuzzyConfig, FuzzyController, FuzzyInference, FuzzyLookupTable, FuzzyMode, MembershipShape,
    DEFAULT_GRID_POINTS,
};
use crate::control::{Pid, PidConfig};
use crate::io::RunSummary;
use crate::sim::{simulate, SimConfig, SimError, Setpoint, SimulationResult};
use crate::vehicle::{Plant, KPH_PER_MPS};

use super::request::SimulationRequest;

/// Fixed integration step of the comparison.
pub const SERVICE_DT: f64 = 0.15; // s

/// Time at which the cruise setpoint is engaged.
pub const ENGAGE_TIME: f64 = 3.0; // s

/// Full-scale force change the fuzzy controller may request per step.
pub const MAX_FORCE_STEP: f64 = 600.0; // N

/// Anti-windup band of the comparison PID (error-integral units).
pub const PID_INTEGRAL_LIMIT: f64 = 2000.0;

pub const ERROR_RANGE: f64 = 25.0; // m/s
pub const ERROR_RATE_RANGE: f64 = 5.0; // m/s^2

// ---------------------------------------------------------------------------
// Precomputed surfaces
// ---------------------------------------------------------------------------

/// One lookup table per membership shape, built once and shared read-only.
#[derive(Debug, Clone)]
pub struct FuzzySurfaces {
    triangular: Arc<FuzzyLookupTable>,
    trapezoidal: Arc<FuzzyLookupTable>,
}

impl FuzzySurfaces {
    /// Inference configuration the tables are sampled from.
    pub fn config(shape: MembershipShape) -> FuzzyConfig {
        FuzzyConfig::incremental()
            .with_ranges(ERROR_RANGE, ERROR_RATE_RANGE)
            .with_shape(shape)
    }

    pub fn build() -> Self {
        let table = |shape| {
            let inference = FuzzyInference::new(Self::config(shape));
            Arc::new(FuzzyLookupTable::from_inference(
                &inference,
                DEFAULT_GRID_POINTS,
                DEFAULT_GRID_POINTS,
            ))
        };
        Self {
            triangular: table(MembershipShape::Triangular),
            trapezoidal: table(MembershipShape::Trapezoidal),
        }
    }

    pub fn get(&self, shape: MembershipShape) -> Arc<FuzzyLookupTable> {
        match shape {
            MembershipShape::Triangular => Arc::clone(&self.triangular),
            MembershipShape::Trapezoidal => Arc::clone(&self.trapezoidal),
        }
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Trace of one controller in a comparison.
#[derive(Debug, Clone, Serialize)]
pub struct ControllerTrace {
    pub speed_kph: Vec<f64>,
    pub control: Vec<f64>, // normalized throttle
    pub force: Vec<f64>,   // N
    pub summary: RunSummary,
    #[serde(skip)]
    pub result: SimulationResult,
}

impl ControllerTrace {
    fn new(result: SimulationResult, max_force: f64) -> Self {
        Self {
            speed_kph: result.speed_kph(),
            control: result.control.clone(),
            force: result.control.iter().map(|u| u * max_force).collect(),
            summary: RunSummary::from_result(&result),
            result,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub vehicle: String,
    pub shape: &'static str,
    pub target_kph: f64,
    pub time: Vec<f64>,
    pub setpoint_kph: Vec<f64>,
    pub pid: ControllerTrace,
    pub fuzzy: ControllerTrace,
}

impl ComparisonReport {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

// ---------------------------------------------------------------------------
// Comparison run
// ---------------------------------------------------------------------------

/// Run the request's vehicle under PID and under the incremental fuzzy
/// controller, both against the same delayed-step setpoint.
pub fn run_comparison(
    request: &SimulationRequest,
    surfaces: &FuzzySurfaces,
) -> Result<ComparisonReport, SimError> {
    let params = request.vehicle_params();
    let max_force = params.max_tractive_force();
    let config = SimConfig::new(SERVICE_DT, request.horizon);
    let steps = config.validate()?;

    let target = request.speed_kph / KPH_PER_MPS;
    let setpoint = Setpoint::engaged_at(ENGAGE_TIME, target, SERVICE_DT, steps);

    debug!(
        "comparison: {} at {} km/h, {} membership, {} steps",
        params.name(),
        request.speed_kph,
        request.shape.label(),
        steps
    );

    // Gains arrive in N per unit error; the plant takes a fraction of max force.
    let mut pid = Pid::with_config(PidConfig {
        kp: request.kp / max_force,
        ki: request.ki / max_force,
        kd: request.kd / max_force,
        u_min: 0.0,
        u_max: 1.0,
        integral_limit: PID_INTEGRAL_LIMIT,
    });
    let mut fuzzy = FuzzyController::with_surface(
        surfaces.get(request.shape),
        FuzzyMode::Incremental { rate: MAX_FORCE_STEP / SERVICE_DT / max_force },
    );

    let mut plant = Plant::new(params);
    let pid_run = simulate(&mut plant, &mut pid, &setpoint, &config)?;
    let fuzzy_run = simulate(&mut plant, &mut fuzzy, &setpoint, &config)?;

    Ok(ComparisonReport {
        vehicle: plant.params().name().to_string(),
        shape: request.shape.label(),
        target_kph: request.speed_kph,
        time: pid_run.time.clone(),
        setpoint_kph: pid_run.setpoint_kph(),
        pid: ControllerTrace::new(pid_run, max_force),
        fuzzy: ControllerTrace::new(fuzzy_run, max_force),
    })
}
