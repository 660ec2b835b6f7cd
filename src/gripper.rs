//! Autonomous gripper.
//!
//! The gripper runs as its own control loop next to the mission. It opens,
//! waits for something to break the cylinder sensor's view, closes on it,
//! waits for the bay to empty again (the mission opens the jaw at a hatch)
//! and starts over. The loop never ends on its own; the
//! [`scheduler`](crate::scheduler) drops it when the mission finishes, which
//! may leave the jaw closed.
//!
//! The gripper owns the gripper motor and the cylinder sensor. The mission
//! only touches them through [`Gripper::open`] and [`Gripper::detect`].
//!
//! # Example
//!
//! ```ignore
//! let gripper = Gripper::new(motor, cylinder, ticker, GripperConfig::default(), poll, settle);
//! scheduler::race(mission(&mut robot), gripper.run()).await;
//! ```

use std::time::Duration;

use log::{debug, info};

use crate::{
    color::Color,
    config::GripperConfig,
    hardware::{ColorSensor, ServoMotor, Shared, Ticker},
    sensors::{read, wait_for},
};

/// A jaw driven by one motor, watching one color sensor.
pub struct Gripper<M, S, T> {
    pub motor:         Shared<M>,
    pub cylinder:      Shared<S>,
    pub ticker:        T,
    pub config:        GripperConfig,
    pub poll_interval: Duration,
    pub settle:        Duration,
}

impl<M, S, T: Clone> Clone for Gripper<M, S, T> {
    fn clone(&self) -> Self {
        Self {
            motor:         self.motor.clone(),
            cylinder:      self.cylinder.clone(),
            ticker:        self.ticker.clone(),
            config:        self.config.clone(),
            poll_interval: self.poll_interval,
            settle:        self.settle,
        }
    }
}

impl<M: ServoMotor, S: ColorSensor, T: Ticker> Gripper<M, S, T> {
    pub fn new(
        motor: Shared<M>,
        cylinder: Shared<S>,
        ticker: T,
        config: GripperConfig,
        poll_interval: Duration,
        settle: Duration,
    ) -> Self {
        Self {
            motor,
            cylinder,
            ticker,
            config,
            poll_interval,
            settle,
        }
    }

    /// Samples the bay.
    pub fn detect(&self) -> Color { read(&self.cylinder) }

    async fn move_jaw(&self, output: f64) {
        let target = self.config.motor_angle(output);
        self.motor
            .borrow_mut()
            .run_target(self.config.speed, target);
        while !self.motor.borrow().is_done() {
            self.ticker.sleep(self.poll_interval).await;
        }
    }

    /// Opens the jaw and holds it open.
    pub async fn open(&self) {
        debug!("gripper opening");
        self.move_jaw(self.config.open).await;
    }

    /// Closes the jaw and holds it closed.
    pub async fn close(&self) {
        debug!("gripper closing");
        self.move_jaw(self.config.close).await;
    }

    /// Grabs whatever enters the bay, forever.
    pub async fn run(&self) {
        info!("gripper task started");
        self.open().await;

        loop {
            let object = wait_for(
                &self.ticker,
                self.poll_interval,
                || self.detect(),
                Color::None,
                false,
            )
            .await;
            info!("{} object in bay, gripping", object);
            self.close().await;

            wait_for(
                &self.ticker,
                self.poll_interval,
                || self.detect(),
                Color::None,
                true,
            )
            .await;
            info!("bay empty, releasing");
            self.open().await;

            self.ticker.sleep(self.settle).await;
        }
    }
}
