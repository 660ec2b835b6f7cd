//! Differential drivetrain control.
//!
//! This module provides the [`Differential`] struct, which turns chassis-level
//! requests (rotate in place, run forward, sweep an arc) into per-wheel angle
//! commands using the track and wheel geometry from [`DrivetrainConfig`].
//!
//! Turning the chassis by `θ` degrees in place moves each wheel by
//! `θ · track / wheel_diameter` degrees, in opposite directions. Positive
//! angles drive the left wheel forward.
//!
//! # Example
//!
//! ```
//! use trailgrip::{
//!     config::DrivetrainConfig,
//!     drivetrain::Differential,
//!     hardware::mock::{MockClock, MockMotor, MockTicker},
//! };
//!
//! let clock = MockClock::new();
//! let drivetrain = Differential::new(
//!     MockMotor::new(clock.clone()),
//!     MockMotor::new(clock.clone()),
//!     DrivetrainConfig::default(),
//! );
//! let ticker = MockTicker::new(clock);
//! embassy_futures::block_on(drivetrain.rotate_in_place(90.0, &ticker, std::time::Duration::from_millis(10)));
//! ```

use std::time::Duration;

use log::trace;

use crate::{
    config::DrivetrainConfig,
    hardware::{ServoMotor, Shared, Ticker, shared},
};

/// A two-wheel differential drivetrain.
///
/// The wheel motors are stored in shared cells so tests and other systems
/// can keep their own handle on them.
pub struct Differential<M> {
    /// The left wheel motor.
    pub left:   Shared<M>,
    /// The right wheel motor.
    pub right:  Shared<M>,
    /// Physical configuration of the drivetrain.
    pub config: DrivetrainConfig,
}

impl<M> Clone for Differential<M> {
    fn clone(&self) -> Self {
        Self {
            left:   self.left.clone(),
            right:  self.right.clone(),
            config: self.config,
        }
    }
}

impl<M: ServoMotor> Differential<M> {
    /// Creates a new drivetrain that owns the provided motors.
    pub fn new(left: M, right: M, config: DrivetrainConfig) -> Self {
        Self {
            left: shared(left),
            right: shared(right),
            config,
        }
    }

    /// Creates a new drivetrain with shared ownership of the motors.
    pub fn from_shared(left: Shared<M>, right: Shared<M>, config: DrivetrainConfig) -> Self {
        Self {
            left,
            right,
            config,
        }
    }

    /// Zeroes both wheel encoders.
    pub fn reset_odometry(&self) {
        self.left.borrow_mut().reset_angle(0.0);
        self.right.borrow_mut().reset_angle(0.0);
    }

    /// Drives both wheels forward at `speed` until halted.
    pub fn run_forward(&self, speed: f64) {
        self.right.borrow_mut().run(speed);
        self.left.borrow_mut().run(speed);
    }

    /// Stops and holds both wheels in place.
    pub fn halt(&self) {
        self.right.borrow_mut().hold();
        self.left.borrow_mut().hold();
    }

    /// Issues independent bounded moves to each wheel without waiting.
    ///
    /// Speeds are given as factors of the configured cruise speed.
    pub fn run_arc(&self, left_factor: f64, right_factor: f64, left_angle: f64, right_angle: f64) {
        let speed = self.config.default_speed;
        trace!("arc: left {:.1}° right {:.1}°", left_angle, right_angle);
        self.left
            .borrow_mut()
            .run_angle(speed * left_factor, left_angle);
        self.right
            .borrow_mut()
            .run_angle(speed * right_factor, right_angle);
    }

    /// Returns `true` once both wheels finished their last position move.
    pub fn is_done(&self) -> bool { self.left.borrow().is_done() && self.right.borrow().is_done() }

    /// Polls until both wheels finished their last position move.
    pub async fn wait_until_done<T: Ticker>(&self, ticker: &T, interval: Duration) {
        while !self.is_done() {
            ticker.sleep(interval).await;
        }
    }

    /// Rotates the chassis in place by `angle` degrees and waits for both
    /// wheels to arrive.
    pub async fn rotate_in_place<T: Ticker>(&self, angle: f64, ticker: &T, interval: Duration) {
        let speed = self.config.default_speed;
        let travel = angle * self.config.wheel_degrees_per_degree();

        self.reset_odometry();
        self.right.borrow_mut().run_angle(speed, -travel);
        self.left.borrow_mut().run_angle(speed, travel);

        self.wait_until_done(ticker, interval).await;
    }

    /// Drives both wheels back to encoder zero, undoing the displacement since
    /// the last odometry reset.
    pub async fn return_to_origin<T: Ticker>(&self, ticker: &T, interval: Duration) {
        let speed = self.config.default_speed;
        self.left.borrow_mut().run_target(speed, 0.0);
        self.right.borrow_mut().run_target(speed, 0.0);

        self.wait_until_done(ticker, interval).await;
    }

    /// Average encoder position of the two wheels in degrees.
    pub fn position(&self) -> f64 { (self.left.borrow().angle() + self.right.borrow().angle()) / 2.0 }
}
