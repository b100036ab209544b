use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::sim::SimulationResult;

/// Half-width of the settling band, as a fraction of the final setpoint.
pub const SETTLING_BAND: f64 = 0.02;

/// Fraction of the final setpoint that counts as "risen".
pub const RISE_FRACTION: f64 = 0.9;

/// Step-response figures computed from a finished run.
///
/// Targets are taken from the last setpoint sample. Figures that need a
/// positive target (rise and settling time) are `None` otherwise, and
/// overshoot is reported as 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub final_speed: f64,           // m/s
    pub peak_speed: f64,            // m/s
    pub overshoot_pct: f64,
    pub rise_time: Option<f64>,     // s
    pub settling_time: Option<f64>, // s
    pub iae: f64,                   // ∫|e| dt, m
    pub peak_control: f64,
}

impl RunSummary {
    pub fn from_result(result: &SimulationResult) -> Self {
        let final_speed = result.final_speed().unwrap_or(0.0);
        let target = result.setpoint.last().copied().unwrap_or(0.0);

        let peak_speed = result.speed.iter().copied().fold(0.0_f64, f64::max);
        let peak_control = result
            .control
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        let peak_control = if peak_control.is_finite() { peak_control } else { 0.0 };

        let overshoot_pct = if target > 0.0 {
            ((peak_speed - target) / target * 100.0).max(0.0)
        } else {
            0.0
        };

        // Rectangle rule over the recorded steps; the first step starts at t = 0.
        let mut iae = 0.0;
        let mut prev_t = 0.0;
        for s in result.samples() {
            iae += (s.setpoint - s.speed).abs() * (s.time - prev_t);
            prev_t = s.time;
        }

        let (rise_time, settling_time) = if target > 0.0 {
            (rise_time(result, target), settling_time(result, target))
        } else {
            (None, None)
        };

        Self {
            final_speed,
            peak_speed,
            overshoot_pct,
            rise_time,
            settling_time,
            iae,
            peak_control,
        }
    }
}

fn rise_time(result: &SimulationResult, target: f64) -> Option<f64> {
    result
        .samples()
        .find(|s| s.speed >= RISE_FRACTION * target)
        .map(|s| s.time)
}

/// Time from which every later sample stays within the settling band.
fn settling_time(result: &SimulationResult, target: f64) -> Option<f64> {
    let band = SETTLING_BAND * target;
    match result.speed.iter().rposition(|v| (v - target).abs() > band) {
        None => result.time.first().copied(),
        Some(i) => result.time.get(i + 1).copied(),
    }
}

#[derive(Serialize)]
struct SummaryDocument<'a> {
    run: &'a str,
    performance: &'a RunSummary,
}

/// Write a run summary as pretty-printed JSON.
pub fn write_summary<W: Write>(writer: &mut W, run: &str, summary: &RunSummary) -> io::Result<()> {
    let doc = SummaryDocument { run, performance: summary };
    serde_json::to_writer_pretty(&mut *writer, &doc)?;
    writeln!(writer)?;
    Ok(())
}

/// Write a run summary JSON to a file.
pub fn write_summary_file<P: AsRef<Path>>(
    path: P,
    run: &str,
    summary: &RunSummary,
) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_summary(&mut file, run, summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn step_response() -> SimulationResult {
        // Rises to 11, then settles on 10.
        SimulationResult {
            time: vec![1.0, 2.0, 3.0, 4.0, 5.0],
            speed: vec![5.0, 9.5, 11.0, 10.1, 10.0],
            control: vec![1.0, 0.8, 0.2, 0.4, 0.5],
            setpoint: vec![10.0; 5],
        }
    }

    #[test]
    fn summary_figures() {
        let s = RunSummary::from_result(&step_response());
        assert_eq!(s.final_speed, 10.0);
        assert_eq!(s.peak_speed, 11.0);
        assert_relative_eq!(s.overshoot_pct, 10.0, epsilon = 1e-9);
        assert_eq!(s.rise_time, Some(2.0));
        assert_eq!(s.settling_time, Some(4.0));
        assert_relative_eq!(s.iae, 5.0 + 0.5 + 1.0 + 0.1 + 0.0, epsilon = 1e-9);
        assert_eq!(s.peak_control, 1.0);
    }

    #[test]
    fn never_settling_run_has_no_settling_time() {
        let mut r = step_response();
        r.speed[4] = 9.0;
        let s = RunSummary::from_result(&r);
        assert_eq!(s.settling_time, None);
    }

    #[test]
    fn zero_target_and_empty_runs() {
        let r = SimulationResult {
            time: vec![0.5, 1.0],
            speed: vec![2.0, 1.0],
            control: vec![0.0, 0.0],
            setpoint: vec![0.0, 0.0],
        };
        let s = RunSummary::from_result(&r);
        assert_eq!(s.overshoot_pct, 0.0);
        assert_eq!(s.rise_time, None);
        assert_eq!(s.settling_time, None);
        assert_relative_eq!(s.iae, 1.0 + 0.5, epsilon = 1e-12);

        let empty = RunSummary::from_result(&SimulationResult::default());
        assert_eq!(empty.final_speed, 0.0);
        assert_eq!(empty.peak_control, 0.0);
        assert_eq!(empty.iae, 0.0);
    }

    #[test]
    fn json_output_is_valid() {
        let summary = RunSummary::from_result(&step_response());
        let mut buf = Vec::new();
        write_summary(&mut buf, "Test", &summary).unwrap();

        let v: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(v["run"], "Test");
        assert_eq!(v["performance"]["peak_speed"], 11.0);
        assert_eq!(v["performance"]["rise_time"], 2.0);
        assert!(v["performance"]["settling_time"].is_number());
    }
}
