use anyhow::{bail, Context, Result};

use cruise_sim::io::csv;
use cruise_sim::service::compare::SERVICE_DT;
use cruise_sim::service::{run_comparison, ComparisonReport, FuzzySurfaces, SimulationRequest};
use cruise_sim::vehicle::{Plant, KPH_PER_MPS};

fn main() -> Result<()> {
    env_logger::init();

    // -----------------------------------------------------------------------
    // Arguments: the service form fields as key=value, plus out=<prefix>
    // -----------------------------------------------------------------------
    let mut fields = Vec::new();
    let mut out_prefix = None;
    for arg in std::env::args().skip(1) {
        let Some((key, value)) = arg.split_once('=') else {
            bail!("expected key=value, got '{}'", arg);
        };
        if key == "out" {
            out_prefix = Some(value.to_string());
        } else {
            fields.push((key.to_string(), value.to_string()));
        }
    }

    let request = SimulationRequest::from_pairs(fields.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .context("invalid simulation request")?;

    // -----------------------------------------------------------------------
    // Run comparison
    // -----------------------------------------------------------------------
    let surfaces = FuzzySurfaces::build();
    let report = run_comparison(&request, &surfaces).context("simulation failed")?;

    print_report(&request, &report);

    // -----------------------------------------------------------------------
    // Export
    // -----------------------------------------------------------------------
    if let Some(prefix) = out_prefix {
        let pid_path = format!("{prefix}_pid.csv");
        let fuzzy_path = format!("{prefix}_fuzzy.csv");
        let report_path = format!("{prefix}_report.json");

        csv::write_result_file(&pid_path, &report.pid.result)
            .with_context(|| format!("writing {pid_path}"))?;
        csv::write_result_file(&fuzzy_path, &report.fuzzy.result)
            .with_context(|| format!("writing {fuzzy_path}"))?;
        std::fs::write(&report_path, report.to_json()?)
            .with_context(|| format!("writing {report_path}"))?;

        println!("  Wrote {pid_path}, {fuzzy_path}, {report_path}");
        println!();
    }

    Ok(())
}

fn print_report(request: &SimulationRequest, report: &ComparisonReport) {
    let plant = Plant::new(request.vehicle_params());
    let params = plant.params();

    println!();
    println!("====================================================================");
    println!("  CRUISE CONTROL — {} ({} membership)", report.vehicle, report.shape);
    println!("====================================================================");
    println!();
    println!("  Vehicle Parameters");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Mass:          {:>8.0} kg    Max force:    {:>8.0} N",
        params.mass(),
        params.max_tractive_force()
    );
    println!(
        "  Drag coeff:    {:>8.1} N·s/m  Top speed:    {:>8.1} km/h",
        params.drag_coefficient(),
        plant.terminal_speed(1.0) * KPH_PER_MPS
    );
    println!(
        "  PID gains:     Kp {:.1}  Ki {:.1}  Kd {:.1}  (N per m/s)",
        request.kp, request.ki, request.kd
    );
    println!(
        "  Target:        {:>8.1} km/h  Horizon:      {:>8.1} s",
        report.target_kph, request.horizon
    );
    println!();

    println!("  Performance Summary");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:<10} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "", "final", "peak", "overshoot", "rise", "settle"
    );
    for (label, trace) in [("PID", &report.pid), ("Fuzzy", &report.fuzzy)] {
        let s = &trace.summary;
        println!(
            "  {:<10} {:>8.1}km/h {:>6.1}km/h {:>9.1}% {:>10} {:>10}",
            label,
            s.final_speed * KPH_PER_MPS,
            s.peak_speed * KPH_PER_MPS,
            s.overshoot_pct,
            fmt_time(s.rise_time),
            fmt_time(s.settling_time),
        );
    }
    println!();

    // -----------------------------------------------------------------------
    // Trace table (sampled)
    // -----------------------------------------------------------------------
    println!("  Trace");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:>7}  {:>9}  {:>9}  {:>9}  {:>9}  {:>9}",
        "t (s)", "sp (km/h)", "PID", "Fuzzy", "F_pid (N)", "F_fuz (N)"
    );
    println!("  {}", "─".repeat(64));

    let n = report.time.len();
    let sample_interval = (n / 30).max(1);
    for i in (0..n).filter(|&i| i % sample_interval == 0 || i + 1 == n) {
        println!(
            "  {:>7.2}  {:>9.1}  {:>9.1}  {:>9.1}  {:>9.0}  {:>9.0}",
            report.time[i],
            report.setpoint_kph[i],
            report.pid.speed_kph[i],
            report.fuzzy.speed_kph[i],
            report.pid.force[i],
            report.fuzzy.force[i],
        );
    }

    println!();
    println!("  Simulation: {} steps, dt={} s", n, SERVICE_DT);
    println!("====================================================================");
    println!();
}

fn fmt_time(t: Option<f64>) -> String {
    match t {
        Some(t) => format!("{t:.1}s"),
        None => "—".to_string(),
    }
}
