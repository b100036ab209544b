use serde::Serialize;

use crate::vehicle::KPH_PER_MPS;

/// Parallel time series of one run, indexed by step.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SimulationResult {
    pub time: Vec<f64>,     // s, end of each step
    pub speed: Vec<f64>,    // m/s, after the step
    pub control: Vec<f64>,  // controller output applied during the step
    pub setpoint: Vec<f64>, // m/s
}

/// One row of a [`SimulationResult`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub time: f64,
    pub speed: f64,
    pub control: f64,
    pub setpoint: f64,
}

impl SimulationResult {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            time: Vec::with_capacity(n),
            speed: Vec::with_capacity(n),
            control: Vec::with_capacity(n),
            setpoint: Vec::with_capacity(n),
        }
    }

    pub(crate) fn push(&mut self, s: Sample) {
        self.time.push(s.time);
        self.speed.push(s.speed);
        self.control.push(s.control);
        self.setpoint.push(s.setpoint);
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn sample(&self, i: usize) -> Option<Sample> {
        Some(Sample {
            time: *self.time.get(i)?,
            speed: *self.speed.get(i)?,
            control: *self.control.get(i)?,
            setpoint: *self.setpoint.get(i)?,
        })
    }

    pub fn samples(&self) -> impl Iterator<Item = Sample> + '_ {
        (0..self.len()).filter_map(move |i| self.sample(i))
    }

    pub fn final_speed(&self) -> Option<f64> {
        self.speed.last().copied()
    }

    pub fn speed_kph(&self) -> Vec<f64> {
        self.speed.iter().map(|v| v * KPH_PER_MPS).collect()
    }

    pub fn setpoint_kph(&self) -> Vec<f64> {
        self.setpoint.iter().map(|v| v * KPH_PER_MPS).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_stay_parallel() {
        let mut r = SimulationResult::with_capacity(2);
        assert!(r.is_empty());
        r.push(Sample { time: 0.1, speed: 1.0, control: 0.5, setpoint: 10.0 });
        r.push(Sample { time: 0.2, speed: 2.0, control: 0.4, setpoint: 10.0 });
        assert_eq!(r.len(), 2);
        assert_eq!(r.final_speed(), Some(2.0));
        assert_eq!(r.samples().count(), 2);
        assert_eq!(r.sample(1).map(|s| s.control), Some(0.4));
        assert_eq!(r.sample(2), None);
        assert_eq!(r.speed_kph(), vec![3.6, 7.2]);
        assert_eq!(r.setpoint_kph(), vec![36.0, 36.0]);
    }
}
