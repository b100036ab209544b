use std::io::{self, Write};
use std::path::Path;

use crate::sim::SimulationResult;
use crate::vehicle::KPH_PER_MPS;

/// Write a run to CSV.
///
/// Columns: time, speed, speed_kph, control, setpoint (speeds in m/s unless
/// suffixed).
pub fn write_result<W: Write>(writer: &mut W, result: &SimulationResult) -> io::Result<()> {
    writeln!(writer, "time,speed,speed_kph,control,setpoint")?;

    for s in result.samples() {
        writeln!(
            writer,
            "{:.4},{:.6},{:.4},{:.6},{:.6}",
            s.time,
            s.speed,
            s.speed * KPH_PER_MPS,
            s.control,
            s.setpoint,
        )?;
    }

    Ok(())
}

/// Write a run to a CSV file at the given path.
pub fn write_result_file<P: AsRef<Path>>(path: P, result: &SimulationResult) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_result(&mut file, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::Pid;
    use crate::sim::{simulate, SimConfig, Setpoint};
    use crate::vehicle::{presets, Plant};

    #[test]
    fn csv_output_has_header_and_rows() {
        let mut plant = Plant::new(presets::fiat());
        let mut pid = Pid::default();
        let cfg = SimConfig::new(0.5, 1.0);
        let result = simulate(&mut plant, &mut pid, &Setpoint::Constant(10.0), &cfg).unwrap();

        let mut buf = Vec::new();
        write_result(&mut buf, &result).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "time,speed,speed_kph,control,setpoint");
        assert_eq!(lines.len(), 3); // header + 2 data rows
        assert!(lines[1].starts_with("0.5000,"));
        assert!(lines[2].ends_with(",10.000000"));
        assert_eq!(lines[1].split(',').count(), 5);
    }

    #[test]
    fn empty_result_writes_only_header() {
        let mut buf = Vec::new();
        write_result(&mut buf, &SimulationResult::default()).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "time,speed,speed_kph,control,setpoint\n");
    }
}
