//! Hardware seam.
//!
//! The control code never talks to a device directly. It goes through three
//! small traits so the same navigation and gripper logic runs on the V5 brain
//! and against the simulated devices in [`mock`]:
//!
//! - [`ServoMotor`]: a position-controlled motor with an integrated encoder.
//! - [`ColorSensor`]: a sensor that can lock onto a [`Color`].
//! - [`Ticker`]: the only way control loops suspend. Every polling wait goes
//!   through it, which is what lets the mission and the gripper task
//!   interleave on one executor.
//!
//! Devices are shared as [`Shared`] handles (`Rc<RefCell<_>>`). A borrow is
//! never held across a `.await`.

use std::{cell::RefCell, rc::Rc, time::Duration};

use crate::color::Color;

/// In-memory devices and a simulated clock for host testing.
pub mod mock;

/// V5 brain devices backed by `vexide`.
#[cfg(feature = "vexos")]
pub mod vex;

/// A device handle that can be cloned into several control loops.
pub type Shared<T> = Rc<RefCell<T>>;

/// Wraps a device so it can be shared between control loops.
pub fn shared<T>(t: T) -> Shared<T> { Rc::new(RefCell::new(t)) }

/// A motor that accepts speed and position commands.
///
/// Speeds are in degrees per second and angles in degrees of motor-shaft
/// rotation. Position commands are non-blocking; callers poll
/// [`is_done`](ServoMotor::is_done).
pub trait ServoMotor {
    /// Runs continuously at `speed` until another command arrives.
    fn run(&mut self, speed: f64);

    /// Rotates by `angle` relative to the current position.
    fn run_angle(&mut self, speed: f64, angle: f64);

    /// Rotates to the absolute encoder position `target` and holds there.
    fn run_target(&mut self, speed: f64, target: f64);

    /// Stops and actively holds the current position.
    fn hold(&mut self);

    /// Redefines the current encoder position as `angle`.
    fn reset_angle(&mut self, angle: f64);

    /// Current encoder position.
    fn angle(&self) -> f64;

    /// Returns `true` once the last position command has completed.
    ///
    /// Always `true` while running continuously or holding.
    fn is_done(&self) -> bool;
}

/// A reflectance/color sensor.
pub trait ColorSensor {
    /// Samples the sensor. `None` means no lock.
    fn color(&mut self) -> Option<Color>;
}

/// Cooperative suspension.
#[allow(async_fn_in_trait)]
pub trait Ticker {
    /// Suspends the calling loop for `duration`, letting other loops run.
    async fn sleep(&self, duration: Duration);
}

impl<T: Ticker> Ticker for &T {
    async fn sleep(&self, duration: Duration) { (**self).sleep(duration).await }
}
