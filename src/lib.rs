//! # Trailgrip
//!
//! Trailgrip drives a differential-drive pickup robot around a course of
//! black roads on a white floor. The robot follows a road with one downward
//! color sensor, stops at checkpoints, and carries colored objects to the
//! hatch of the same color while a gripper task grabs whatever enters its bay.
//!
//! - **Navigation**: heading bookkeeping, arc search to reacquire a lost road
//!   and the drive-to-checkpoint loops.
//! - **Gripper**: an autonomous open/grab/release loop that runs next to the
//!   mission.
//! - **Missions**: scripted courses built only on the [`robot::Robot`] API.
//! - **Hardware**: everything above talks to devices through small traits, with
//!   a V5 backend on [vexide](https://vexide.dev) and simulated devices for
//!   host tests.
//!
//! ## Quick Start
//!
//! ```ignore
//! use trailgrip::{
//!     color::Palette,
//!     config::RobotConfig,
//!     hardware::vex::{VexColorSensor, VexMotor, VexTicker},
//!     mission::{self, CourseMission},
//!     robot::Robot,
//! };
//! use vexide::prelude::*;
//!
//! #[vexide::main]
//! async fn main(peripherals: Peripherals) {
//!     let mut robot = Robot::new(
//!         VexMotor::new(Motor::new(peripherals.port_1, Gearset::Green, Direction::Forward)),
//!         VexMotor::new(Motor::new(peripherals.port_2, Gearset::Green, Direction::Reverse)),
//!         VexMotor::new(Motor::new(peripherals.port_3, Gearset::Red, Direction::Forward)),
//!         VexColorSensor::new(OpticalSensor::new(peripherals.port_5), Palette::surface()),
//!         VexColorSensor::new(OpticalSensor::new(peripherals.port_6), Palette::cylinder()),
//!         VexTicker,
//!         RobotConfig::default(),
//!     )
//!     .unwrap();
//!
//!     mission::run(&mut robot, &mut CourseMission::default()).await;
//! }
//! ```

/// Color vocabulary and sensor palettes.
pub mod color;

/// Robot configuration and validation.
pub mod config;

/// Differential drivetrain built from two position-controlled motors.
pub mod drivetrain;

/// Filesystem utilities including logging.
pub mod fs;

/// The autonomous gripper task.
pub mod gripper;

/// Device traits, the V5 backend and simulated devices.
pub mod hardware;

/// Hatch color to heading calibration.
pub mod hatch;

/// Mission scripts and the mission runner.
pub mod mission;

/// Heading tracking, line search and checkpoint navigation.
pub mod motion;

/// The mission-facing robot API.
pub mod robot;

/// Running the mission and the gripper side by side.
pub mod scheduler;

/// Color sensor reads and polling waits.
pub mod sensors;
