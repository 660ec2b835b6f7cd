//! Robot configuration.
//!
//! The defaults carry the values calibrated on the course robot: a 10.5 cm
//! track on 4.25 cm wheels, a 90° gripper throw and the 15°/55° correction
//! sweeps.
//!
//! # Example
//!
//! ```
//! use trailgrip::config::{DrivetrainConfig, RobotConfig};
//!
//! let config = RobotConfig {
//!     drivetrain: DrivetrainConfig {
//!         track:          12.0,
//!         wheel_diameter: 5.6,
//!         default_speed:  300.0,
//!     },
//!     ..RobotConfig::default()
//! };
//! config.validate().unwrap();
//! ```

use std::time::Duration;

use thiserror::Error;

/// Fraction of the sweep travelled by the near (pivoting) wheel during a
/// line search. Empirically tuned, do not re-derive.
pub const ARC_RATIO_NEAR: f64 = 2.0 / 3.0;

/// Fraction of the sweep travelled by the far wheel during a line search.
/// Empirically tuned, do not re-derive.
pub const ARC_RATIO_FAR: f64 = 4.0 / 3.0;

/// A configuration value that cannot drive the robot.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f64 },
    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f64 },
    #[error("gripper gear train is empty")]
    EmptyGearTrain,
    #[error("gear with zero teeth in stage {stage}")]
    ZeroTeeth { stage: usize },
    #[error("poll interval must be non-zero")]
    ZeroPollInterval,
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

/// Physical layout of the drivetrain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrivetrainConfig {
    /// Distance between the wheel contact points.
    pub track:          f64,
    /// Wheel diameter, same unit as `track`.
    pub wheel_diameter: f64,
    /// Cruise speed in degrees per second of wheel rotation.
    pub default_speed:  f64,
}

impl DrivetrainConfig {
    /// Wheel degrees needed to turn the chassis by one degree in place.
    pub fn wheel_degrees_per_degree(&self) -> f64 { self.track / self.wheel_diameter }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("track", self.track)?;
        positive("wheel_diameter", self.wheel_diameter)?;
        positive("default_speed", self.default_speed)
    }
}

impl Default for DrivetrainConfig {
    fn default() -> Self {
        Self {
            track:          10.5,
            wheel_diameter: 4.25,
            default_speed:  250.0,
        }
    }
}

/// Gripper throw and gearing.
#[derive(Debug, Clone, PartialEq)]
pub struct GripperConfig {
    /// Motor speed in degrees per second.
    pub speed:      f64,
    /// Output angle of the open jaw.
    pub open:       f64,
    /// Output angle of the closed jaw.
    pub close:      f64,
    /// Gear stages from motor to jaw as `[driving, driven]` tooth counts.
    pub gear_train: Vec<[u32; 2]>,
}

impl GripperConfig {
    /// Motor degrees per degree of jaw rotation.
    pub fn gear_ratio(&self) -> f64 {
        let driving: u64 = self.gear_train.iter().map(|[a, _]| *a as u64).product();
        let driven: u64 = self.gear_train.iter().map(|[_, b]| *b as u64).product();
        driven as f64 / driving as f64
    }

    /// Converts a jaw angle to a motor encoder target.
    pub fn motor_angle(&self, output: f64) -> f64 { output * self.gear_ratio() }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("gripper speed", self.speed)?;
        if self.gear_train.is_empty() {
            return Err(ConfigError::EmptyGearTrain);
        }
        if let Some(stage) = self
            .gear_train
            .iter()
            .position(|[a, b]| *a == 0 || *b == 0)
        {
            return Err(ConfigError::ZeroTeeth { stage });
        }
        Ok(())
    }
}

impl Default for GripperConfig {
    fn default() -> Self {
        Self {
            speed:      750.0,
            open:       90.0,
            close:      0.0,
            gear_train: vec![[8, 8], [36, 12], [8, 24]],
        }
    }
}

/// Tuning for the navigation loop and the gripper task.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigationConfig {
    /// Sweep budget in degrees used when the line is lost.
    pub fine_sweep:     f64,
    /// Sweep budget in degrees used on every pass to re-center.
    pub coarse_sweep:   f64,
    /// Delay between polls in every blocking wait.
    pub poll_interval:  Duration,
    /// Pause after the gripper reopens before watching the bay again.
    pub gripper_settle: Duration,
    /// Near-wheel share of a search sweep.
    pub arc_ratio_near: f64,
    /// Far-wheel share of a search sweep.
    pub arc_ratio_far:  f64,
}

impl NavigationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("fine_sweep", self.fine_sweep)?;
        non_negative("coarse_sweep", self.coarse_sweep)?;
        positive("arc_ratio_near", self.arc_ratio_near)?;
        positive("arc_ratio_far", self.arc_ratio_far)?;
        if self.poll_interval.is_zero() {
            return Err(ConfigError::ZeroPollInterval);
        }
        Ok(())
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            fine_sweep:     15.0,
            coarse_sweep:   55.0,
            poll_interval:  Duration::from_millis(10),
            gripper_settle: Duration::from_millis(20),
            arc_ratio_near: ARC_RATIO_NEAR,
            arc_ratio_far:  ARC_RATIO_FAR,
        }
    }
}

/// Everything needed to build a [`Robot`](crate::robot::Robot).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RobotConfig {
    pub drivetrain: DrivetrainConfig,
    pub gripper:    GripperConfig,
    pub navigation: NavigationConfig,
}

impl RobotConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.drivetrain.validate()?;
        self.gripper.validate()?;
        self.navigation.validate()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn defaults_are_valid() { assert_eq!(RobotConfig::default().validate(), Ok(())); }

    #[test]
    fn default_gear_train_is_direct() {
        let gripper = GripperConfig::default();
        assert_relative_eq!(gripper.gear_ratio(), 1.0);
        assert_relative_eq!(gripper.motor_angle(gripper.open), 90.0);
    }

    #[test]
    fn reduction_scales_targets() {
        let gripper = GripperConfig {
            gear_train: vec![[12, 36]],
            ..GripperConfig::default()
        };
        assert_relative_eq!(gripper.motor_angle(90.0), 270.0);
    }

    #[test]
    fn wheel_factor() {
        let dt = DrivetrainConfig::default();
        assert_relative_eq!(dt.wheel_degrees_per_degree(), 10.5 / 4.25);
    }

    #[test]
    fn rejects_bad_geometry() {
        let mut config = RobotConfig::default();
        config.drivetrain.wheel_diameter = 0.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::NotPositive {
                name:  "wheel_diameter",
                value: 0.0,
            })
        );
    }

    #[test]
    fn rejects_bad_gearing_and_polling() {
        let mut config = RobotConfig::default();
        config.gripper.gear_train = vec![[8, 8], [0, 12]];
        assert_eq!(config.validate(), Err(ConfigError::ZeroTeeth { stage: 1 }));

        config.gripper.gear_train.clear();
        assert_eq!(config.validate(), Err(ConfigError::EmptyGearTrain));

        let mut config = RobotConfig::default();
        config.navigation.poll_interval = Duration::ZERO;
        assert_eq!(config.validate(), Err(ConfigError::ZeroPollInterval));

        config.navigation.poll_interval = Duration::from_millis(10);
        config.navigation.coarse_sweep = -1.0;
        assert!(matches!(config.validate(), Err(ConfigError::Negative { .. })));
    }
}
