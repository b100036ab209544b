/// Capability shared by every speed controller.
///
/// The simulation loop only ever calls these two methods, so PID, fuzzy, or
/// user-supplied controllers are interchangeable.
pub trait Controller {
    /// Map the current speed error (setpoint − speed, m/s) to a control
    /// output, advancing any internal memory by `dt` seconds.
    fn step(&mut self, error: f64, dt: f64) -> f64;

    /// Clear internal memory (integrators, previous error).
    fn reset(&mut self);
}

impl<C: Controller + ?Sized> Controller for Box<C> {
    fn step(&mut self, error: f64, dt: f64) -> f64 {
        (**self).step(error, dt)
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}

impl<C: Controller + ?Sized> Controller for &mut C {
    fn step(&mut self, error: f64, dt: f64) -> f64 {
        (**self).step(error, dt)
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}
