//! Drive-to-checkpoint control loops.
//!
//! [`drive_to_checkpoint`](Navigator::drive_to_checkpoint) follows a road with
//! active correction: every pass runs the coarse sweep as a centering bias,
//! plus the fine sweep first when the line was lost outright. It then drives
//! forward until the surface sensor reports a checkpoint and holds.
//!
//! [`drive_to_checkpoint_uncorrected`](Navigator::drive_to_checkpoint_uncorrected)
//! is a blind hop for short, pre-aimed segments such as the approach to a
//! hatch.
//!
//! A checkpoint is the BLACK crossing or any colored marker off the road
//! palette (see [`Color::is_checkpoint`]). Both drives first carry the robot
//! off a crossing it starts on, so consecutive drives never end where they
//! began.

use log::{debug, info};

use super::Navigator;
use crate::{
    color::Color,
    hardware::{ColorSensor, ServoMotor, Ticker},
    sensors::wait_until,
};

impl<M: ServoMotor, S: ColorSensor, T: Ticker> Navigator<M, S, T> {
    /// Follows the road to the next checkpoint and returns the color it
    /// stopped on.
    pub async fn drive_to_checkpoint(&mut self) -> Color {
        let speed = self.drivetrain.config.default_speed;
        let interval = self.config.poll_interval;
        self.drivetrain.reset_odometry();

        let mut surface = self.sensors.read_surface();
        if surface == Color::Black {
            debug!("starting on a crossing, driving off it");
            self.drivetrain.run_forward(speed);
            surface = wait_until(
                &self.ticker,
                interval,
                || self.sensors.read_surface(),
                |c| c != Color::Black,
            )
            .await;
            self.drivetrain.halt();
        }

        loop {
            if surface.is_checkpoint() {
                info!("checkpoint reached on {}", surface);
                return surface;
            }

            if surface == Color::None {
                debug!("line lost, fine correction");
                self.correct_direction(self.config.fine_sweep).await;
            }
            self.correct_direction(self.config.coarse_sweep).await;

            self.drivetrain.run_forward(speed);
            wait_until(
                &self.ticker,
                interval,
                || self.sensors.read_surface(),
                Color::is_checkpoint,
            )
            .await;
            self.drivetrain.halt();

            surface = self.sensors.read_surface();
        }
    }

    /// Drives straight, without correction, to the next checkpoint and
    /// returns the color it stopped on. A crossing under the robot at the
    /// start is driven over.
    pub async fn drive_to_checkpoint_uncorrected(&mut self) -> Color {
        let speed = self.drivetrain.config.default_speed;
        self.drivetrain.reset_odometry();

        self.drivetrain.run_forward(speed);
        let mut off_crossing = false;
        let surface = wait_until(
            &self.ticker,
            self.config.poll_interval,
            || self.sensors.read_surface(),
            |c| {
                off_crossing |= c != Color::Black;
                off_crossing && c.is_checkpoint()
            },
        )
        .await;
        self.drivetrain.halt();

        info!("hop ended on {}", surface);
        surface
    }

    /// Backs up to where the last drive started.
    pub async fn return_to_origin(&mut self) {
        self.drivetrain
            .return_to_origin(&self.ticker, self.config.poll_interval)
            .await;
    }
}
