//! The robot and its mission-facing API.
//!
//! [`Robot`] bundles the [`Navigator`], the [`Gripper`] handle and the
//! [`HatchMap`]. Mission scripts only ever call the methods here; they never
//! reach for a motor or sensor themselves.
//!
//! # Example
//!
//! ```ignore
//! use trailgrip::{config::RobotConfig, robot::Robot};
//!
//! let mut robot = Robot::new(left, right, jaw, surface, cylinder, ticker, RobotConfig::default())?;
//!
//! robot.calibrate_hatch(90.0).await;
//! robot.return_to_origin().await;
//!
//! robot.rotate_to_heading(-45.0).await;
//! robot.drive_to_checkpoint().await;
//! let object = robot.detect_cylinder_color();
//! if object.is_detected() {
//!     robot.release_at_heading(object).await;
//! }
//! ```

use log::info;

use crate::{
    color::Color,
    config::{ConfigError, RobotConfig},
    drivetrain::Differential,
    gripper::Gripper,
    hardware::{ColorSensor, ServoMotor, Ticker, shared},
    hatch::HatchMap,
    motion::Navigator,
    sensors::Sensors,
};

/// The navigation context plus the gripper and hatch calibration.
pub struct Robot<M, S, T> {
    pub nav:     Navigator<M, S, T>,
    pub gripper: Gripper<M, S, T>,
    pub hatches: HatchMap,
}

impl<M: ServoMotor, S: ColorSensor, T: Ticker + Clone> Robot<M, S, T> {
    /// Builds a robot from its devices after validating `config`.
    pub fn new(
        left: M,
        right: M,
        gripper_motor: M,
        surface: S,
        cylinder: S,
        ticker: T,
        config: RobotConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let RobotConfig {
            drivetrain,
            gripper,
            navigation,
        } = config;
        let sensors = Sensors::new(surface, cylinder);
        let gripper = Gripper::new(
            shared(gripper_motor),
            sensors.cylinder.clone(),
            ticker.clone(),
            gripper,
            navigation.poll_interval,
            navigation.gripper_settle,
        );
        let nav = Navigator::new(
            Differential::new(left, right, drivetrain),
            sensors,
            ticker,
            navigation,
        );

        Ok(Self {
            nav,
            gripper,
            hatches: HatchMap::default(),
        })
    }
}

impl<M: ServoMotor, S: ColorSensor, T: Ticker> Robot<M, S, T> {
    /// A handle on the gripper for running its task alongside the mission.
    pub fn gripper(&self) -> Gripper<M, S, T>
    where
        T: Clone,
    {
        self.gripper.clone()
    }

    /// Cumulative heading in degrees.
    pub fn heading(&self) -> f64 { self.nav.heading.heading() }

    /// Forgets heading, search memory and hatch calibration.
    pub fn reset(&mut self) {
        self.nav.reset();
        self.hatches = HatchMap::default();
    }

    /// Faces `heading`, hops to the hatch at the end of that road and records
    /// the hatch color. Returns the color recorded.
    pub async fn calibrate_hatch(&mut self, heading: f64) -> Color {
        self.nav.rotate_to_heading(heading).await;
        self.nav.drive_to_checkpoint_uncorrected().await;
        let color = self.nav.sensors.read_surface();
        self.hatches.record(color, heading);
        info!("hatch {} at {:.0}°", color, heading);
        color
    }

    /// Follows the road to the next checkpoint.
    pub async fn drive_to_checkpoint(&mut self) -> Color { self.nav.drive_to_checkpoint().await }

    /// Hops straight to the next checkpoint without correction.
    pub async fn drive_to_checkpoint_uncorrected(&mut self) -> Color {
        self.nav.drive_to_checkpoint_uncorrected().await
    }

    /// Backs up to where the last drive started.
    pub async fn return_to_origin(&mut self) { self.nav.return_to_origin().await }

    /// Rotates in place by `angle` degrees.
    pub async fn rotate_in_place(&mut self, angle: f64) { self.nav.rotate_in_place(angle).await }

    /// Turns to face `target` along the shorter arc.
    pub async fn rotate_to_heading(&mut self, target: f64) -> f64 { self.nav.rotate_to_heading(target).await }

    /// Re-bases the heading by `offset` degrees without moving.
    pub fn assume_turned(&mut self, offset: f64) { self.nav.heading.assume_offset(offset); }

    /// Color of the object in the gripper bay, [`Color::None`] if empty.
    pub fn detect_cylinder_color(&self) -> Color { self.gripper.detect() }

    /// Heading of the hatch for `color`, falling back to the default hatch.
    pub fn lookup_hatch_heading(&self, color: Color) -> f64 { self.hatches.lookup(color) }

    /// Opens the jaw and waits for it to get there.
    pub async fn open_gripper(&self) { self.gripper.open().await }

    /// Delivers the held object to the hatch for `color` and backs out.
    pub async fn release_at_heading(&mut self, color: Color) {
        let heading = self.lookup_hatch_heading(color);
        info!("delivering {} to hatch at {:.0}°", color, heading);

        self.rotate_to_heading(heading).await;
        self.drive_to_checkpoint_uncorrected().await;
        self.open_gripper().await;
        self.return_to_origin().await;
    }
}
