//! Heading tracking.
//!
//! The robot has no absolute heading sensor. [`HeadingTracker`] accumulates
//! every rotation it commands and uses that history to pick the shorter arc
//! to a requested heading. The accumulator is only reduced modulo 360 when a
//! new target is requested; it is never snapped to the target, so drift is
//! carried forward rather than hidden.
//!
//! # Example
//!
//! ```
//! use trailgrip::motion::heading::shortest_delta;
//!
//! assert_eq!(shortest_delta(0.0, -90.0), -90.0);
//! assert_eq!(shortest_delta(350.0, 10.0), 20.0);
//! ```

use std::time::Duration;

use log::debug;

use crate::{
    drivetrain::Differential,
    hardware::{ServoMotor, Ticker},
};

/// Reduces an angle into `[0, 360)`.
pub fn wrap_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Signed rotation from `current` to `target`, in `(-180, 180]`.
pub fn shortest_delta(current: f64, target: f64) -> f64 {
    let delta = wrap_degrees(target) - wrap_degrees(current);
    if delta > 180.0 {
        delta - 360.0
    } else if delta <= -180.0 {
        delta + 360.0
    } else {
        delta
    }
}

/// The robot's believed orientation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HeadingTracker {
    heading: f64,
}

impl HeadingTracker {
    /// Starts at heading zero.
    pub fn new() -> Self { Self::default() }

    /// Cumulative heading in degrees. Not reduced.
    pub fn heading(&self) -> f64 { self.heading }

    /// Heading reduced into `[0, 360)`.
    pub fn normalized(&self) -> f64 { wrap_degrees(self.heading) }

    /// Forgets all rotation history.
    pub fn reset(&mut self) { self.heading = 0.0; }

    /// Records a completed physical rotation.
    pub fn record_rotation(&mut self, delta: f64) { self.heading += delta; }

    /// Re-bases the heading without moving, e.g. after driving a road in
    /// reverse.
    pub fn assume_offset(&mut self, offset: f64) {
        debug!("heading re-based by {:.1}°", offset);
        self.heading += offset;
    }

    /// Reduces the accumulator and returns the rotation that reaches `target`
    /// along the shorter arc.
    pub fn plan(&mut self, target: f64) -> f64 {
        self.heading = wrap_degrees(self.heading);
        shortest_delta(self.heading, target)
    }

    /// Rotates in place by `delta` and records it.
    pub async fn rotate_by<M: ServoMotor, T: Ticker>(
        &mut self,
        delta: f64,
        drivetrain: &Differential<M>,
        ticker: &T,
        interval: Duration,
    ) {
        drivetrain.rotate_in_place(delta, ticker, interval).await;
        self.record_rotation(delta);
    }

    /// Turns to face `target` along the shorter arc and returns the rotation
    /// that was performed.
    pub async fn rotate_to<M: ServoMotor, T: Ticker>(
        &mut self,
        target: f64,
        drivetrain: &Differential<M>,
        ticker: &T,
        interval: Duration,
    ) -> f64 {
        let delta = self.plan(target);
        debug!(
            "heading {:.1}° -> {:.1}°: rotating {:.1}°",
            self.heading,
            wrap_degrees(target),
            delta
        );
        self.rotate_by(delta, drivetrain, ticker, interval)
            .await;
        delta
    }
}
