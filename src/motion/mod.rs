//! Autonomous motion along the road network.
//!
//! All navigation state lives in a [`Navigator`]: the drivetrain, the
//! sensors, the heading accumulator and the search memory. Nothing is
//! process-wide; a fresh `Navigator` is a fresh mission.
//!
//! - [`heading`]: the heading accumulator and shortest-arc planning.
//! - [`search`]: the bidirectional arc search that reacquires the line.
//! - [`navigate`]: the drive-to-checkpoint control loops.
//!
//! # Example
//!
//! ```ignore
//! let mut nav = Navigator::new(drivetrain, sensors, ticker, NavigationConfig::default());
//!
//! nav.rotate_to_heading(-45.0).await;
//! nav.drive_to_checkpoint().await;
//! nav.rotate_in_place(180.0).await;
//! ```

use crate::{
    config::NavigationConfig,
    drivetrain::Differential,
    hardware::{ColorSensor, ServoMotor, Ticker},
    sensors::Sensors,
};

/// Heading accumulator and shortest-arc planning.
pub mod heading;

/// Drive-to-checkpoint control loops.
pub mod navigate;

/// Line reacquisition.
pub mod search;

use heading::HeadingTracker;
use search::SearchMemory;

/// Everything the navigation loops read and mutate.
pub struct Navigator<M, S, T> {
    pub drivetrain: Differential<M>,
    pub sensors:    Sensors<S>,
    pub ticker:     T,
    pub config:     NavigationConfig,
    pub heading:    HeadingTracker,
    pub memory:     SearchMemory,
}

impl<M: ServoMotor, S: ColorSensor, T: Ticker> Navigator<M, S, T> {
    /// Creates a navigator at heading zero with the search memory on the left.
    pub fn new(
        drivetrain: Differential<M>,
        sensors: Sensors<S>,
        ticker: T,
        config: NavigationConfig,
    ) -> Self {
        Self {
            drivetrain,
            sensors,
            ticker,
            config,
            heading: HeadingTracker::new(),
            memory: SearchMemory::default(),
        }
    }

    /// Resets heading and search memory for a new run.
    pub fn reset(&mut self) {
        self.heading.reset();
        self.memory = SearchMemory::default();
    }

    /// Rotates the chassis in place by `angle` degrees and records it.
    pub async fn rotate_in_place(&mut self, angle: f64) {
        self.heading
            .rotate_by(angle, &self.drivetrain, &self.ticker, self.config.poll_interval)
            .await;
    }

    /// Turns to face `target` along the shorter arc and returns the rotation
    /// performed.
    pub async fn rotate_to_heading(&mut self, target: f64) -> f64 {
        self.heading
            .rotate_to(target, &self.drivetrain, &self.ticker, self.config.poll_interval)
            .await
    }
}
