//! V5 brain devices.
//!
//! Wraps `vexide` smart devices behind the [`ServoMotor`], [`ColorSensor`] and
//! [`Ticker`] traits. Device errors are logged and degraded to a safe value:
//! a failed sensor read is "no lock", a failed encoder read is zero and a
//! position move whose encoder cannot be read counts as done.
//!
//! # Example
//!
//! ```ignore
//! use trailgrip::{color::Palette, hardware::vex::{VexColorSensor, VexMotor}};
//! use vexide::prelude::*;
//!
//! let left = VexMotor::new(Motor::new(peripherals.port_1, Gearset::Green, Direction::Forward));
//! let surface = VexColorSensor::new(OpticalSensor::new(peripherals.port_5), Palette::surface());
//! ```

use std::time::Duration;

use log::warn;
use vexide::{
    math::Angle,
    prelude::{Motor, OpticalSensor},
    smart::motor::BrakeMode,
};

use super::{ColorSensor, ServoMotor, Ticker};
use crate::color::{Color, Hsv, Palette};

/// How close the encoder must be to a position target to count as arrived,
/// in degrees.
const TARGET_TOLERANCE: f64 = 2.0;

/// Converts degrees per second to the RPM the motor firmware expects.
fn to_rpm(speed: f64) -> i32 { (speed / 6.0).round() as i32 }

/// A V5 smart motor driven by position targets.
pub struct VexMotor {
    motor:  Motor,
    target: Option<f64>,
}

impl VexMotor {
    pub fn new(motor: Motor) -> Self {
        Self {
            motor,
            target: None,
        }
    }

    fn move_to(&mut self, speed: f64, target: f64) {
        if let Err(e) = self
            .motor
            .set_position_target(Angle::from_degrees(target), to_rpm(speed))
        {
            warn!("Motor Position Target Error: {}", e);
        }
        self.target = Some(target);
    }
}

impl ServoMotor for VexMotor {
    fn run(&mut self, speed: f64) {
        if let Err(e) = self.motor.set_velocity(to_rpm(speed)) {
            warn!("Motor Velocity Error: {}", e);
        }
        self.target = None;
    }

    fn run_angle(&mut self, speed: f64, angle: f64) {
        let target = self.angle() + angle;
        self.move_to(speed, target);
    }

    fn run_target(&mut self, speed: f64, target: f64) { self.move_to(speed, target); }

    fn hold(&mut self) {
        if let Err(e) = self.motor.brake(BrakeMode::Hold) {
            warn!("Motor Brake Error: {}", e);
        }
        self.target = None;
    }

    fn reset_angle(&mut self, angle: f64) {
        if let Err(e) = self.motor.set_position(Angle::from_degrees(angle)) {
            warn!("Motor Encoder Reset Error: {}", e);
        }
    }

    fn angle(&self) -> f64 {
        self.motor
            .position()
            .map(|p| p.as_degrees())
            .unwrap_or_else(|e| {
                warn!("Error Getting Motor Encoder Position: {}", e);
                0.0
            })
    }

    fn is_done(&self) -> bool {
        match self.target {
            Some(target) => match self.motor.position() {
                Ok(p) => (p.as_degrees() - target).abs() < TARGET_TOLERANCE,
                Err(e) => {
                    warn!("Error Getting Motor Encoder Position: {}", e);
                    true
                }
            },
            None => true,
        }
    }
}

/// A V5 optical sensor restricted to a palette.
pub struct VexColorSensor {
    sensor:  OpticalSensor,
    palette: Palette,
}

impl VexColorSensor {
    pub fn new(sensor: OpticalSensor, palette: Palette) -> Self { Self { sensor, palette } }

    fn sample(&self) -> Option<Hsv> {
        let hue = self.sensor.hue();
        let saturation = self.sensor.saturation();
        let brightness = self.sensor.brightness();
        match (hue, saturation, brightness) {
            (Ok(h), Ok(s), Ok(v)) => Some(Hsv::new(h, s * 100.0, v * 100.0)),
            (Err(e), ..) | (_, Err(e), _) | (.., Err(e)) => {
                warn!("Optical Sensor Read Error: {}", e);
                None
            }
        }
    }
}

impl ColorSensor for VexColorSensor {
    fn color(&mut self) -> Option<Color> {
        self.sample()
            .and_then(|hsv| self.palette.classify(hsv))
    }
}

/// Suspends on the vexide executor.
#[derive(Debug, Clone, Copy, Default)]
pub struct VexTicker;

impl Ticker for VexTicker {
    async fn sleep(&self, duration: Duration) { vexide::time::sleep(duration).await; }
}
