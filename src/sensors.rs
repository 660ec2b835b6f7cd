//! Color sensor access and polling waits.
//!
//! [`Sensors`] wraps the ground-facing surface sensor and the cylinder sensor
//! that watches the gripper bay. Reads never fail: a sample without lock is
//! reported as [`Color::None`].
//!
//! [`wait_until`] and [`wait_for`] are the polling waits every blocking
//! operation is built on. They sleep on the [`Ticker`] between polls, which is
//! where the mission and the gripper task hand control to each other. There
//! is no timeout: a sensor that never reports the expected value blocks the
//! caller forever.

use std::time::Duration;

use crate::{
    color::Color,
    hardware::{ColorSensor, Shared, Ticker, shared},
};

/// The robot's two color sensors.
pub struct Sensors<S> {
    pub surface:  Shared<S>,
    pub cylinder: Shared<S>,
}

impl<S> Clone for Sensors<S> {
    fn clone(&self) -> Self {
        Self {
            surface:  self.surface.clone(),
            cylinder: self.cylinder.clone(),
        }
    }
}

impl<S: ColorSensor> Sensors<S> {
    pub fn new(surface: S, cylinder: S) -> Self {
        Self {
            surface:  shared(surface),
            cylinder: shared(cylinder),
        }
    }

    /// Samples the ground under the robot.
    pub fn read_surface(&self) -> Color { read(&self.surface) }

    /// Samples the gripper bay.
    pub fn read_cylinder(&self) -> Color { read(&self.cylinder) }
}

/// Samples a shared sensor, coercing "no lock" to [`Color::None`].
pub fn read<S: ColorSensor>(sensor: &Shared<S>) -> Color { Color::from_reading(sensor.borrow_mut().color()) }

/// Polls `probe` until `done` accepts a reading and returns that reading.
pub async fn wait_until<T, P, F>(ticker: &T, interval: Duration, mut probe: P, mut done: F) -> Color
where
    T: Ticker,
    P: FnMut() -> Color,
    F: FnMut(Color) -> bool,
{
    loop {
        let reading = probe();
        if done(reading) {
            return reading;
        }
        ticker.sleep(interval).await;
    }
}

/// Polls `probe` until `(reading == value) == coincidence`.
///
/// With `coincidence` set this waits for `value` to appear, otherwise it waits
/// for `value` to go away.
pub async fn wait_for<T, P>(ticker: &T, interval: Duration, probe: P, value: Color, coincidence: bool) -> Color
where
    T: Ticker,
    P: FnMut() -> Color,
{
    wait_until(ticker, interval, probe, |c| (c == value) == coincidence).await
}
