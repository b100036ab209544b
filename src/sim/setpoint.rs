/// Target speed (m/s) per step: constant, or a precomputed profile.
#[derive(Debug, Clone, PartialEq)]
pub enum Setpoint {
    Constant(f64),
    /// One value per step. Steps past the end hold the last value.
    Profile(Vec<f64>),
}

impl Setpoint {
    /// Zero until `engage_time`, then `target` ("cruise engaged at t = 3 s").
    /// Step `k` is engaged when `k·dt ≥ engage_time`.
    pub fn engaged_at(engage_time: f64, target: f64, dt: f64, steps: usize) -> Self {
        let first = if dt > 0.0 {
            // tolerate engage_time / dt landing a hair above an integer
            (engage_time / dt - 1e-9).ceil().max(0.0) as usize
        } else {
            0
        };
        Setpoint::Profile((0..steps).map(|k| if k >= first { target } else { 0.0 }).collect())
    }

    pub fn at(&self, step: usize) -> f64 {
        match self {
            Setpoint::Constant(v) => *v,
            Setpoint::Profile(values) => values
                .get(step)
                .or_else(|| values.last())
                .copied()
                .unwrap_or(0.0),
        }
    }
}

impl From<f64> for Setpoint {
    fn from(v: f64) -> Self {
        Setpoint::Constant(v)
    }
}

impl From<Vec<f64>> for Setpoint {
    fn from(values: Vec<f64>) -> Self {
        Setpoint::Profile(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_is_constant() {
        let sp = Setpoint::from(8.0);
        assert_eq!(sp.at(0), 8.0);
        assert_eq!(sp.at(10_000), 8.0);
    }

    #[test]
    fn profile_holds_last_value() {
        let sp = Setpoint::from(vec![1.0, 2.0, 3.0]);
        assert_eq!(sp.at(1), 2.0);
        assert_eq!(sp.at(7), 3.0);
        assert_eq!(Setpoint::Profile(vec![]).at(0), 0.0);
    }

    #[test]
    fn engagement_step() {
        let sp = Setpoint::engaged_at(3.0, 20.0, 0.15, 40);
        assert_eq!(sp.at(19), 0.0);
        assert_eq!(sp.at(20), 20.0);
        assert_eq!(sp.at(39), 20.0);

        let sp = Setpoint::engaged_at(0.0, 5.0, 0.1, 3);
        assert_eq!(sp, Setpoint::Profile(vec![5.0, 5.0, 5.0]));
    }
}
