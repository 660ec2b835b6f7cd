//! Line reacquisition.
//!
//! When the robot drifts off the line it sweeps an arc to one side looking
//! for BLACK. If the sweep completes without a hit it swings back to where it
//! started and tries the other side. The far wheel travels twice the arc of
//! the near wheel ([`ARC_RATIO_FAR`](crate::config::ARC_RATIO_FAR) over
//! [`ARC_RATIO_NEAR`](crate::config::ARC_RATIO_NEAR)), a turn radius tuned on
//! the course.
//!
//! Courses tend to curve the same way for a while, so [`SearchMemory`]
//! remembers which side last found the line and that side is searched first.
//!
//! A successful sweep stops polling the moment BLACK is seen and leaves the
//! wheel moves in flight; the next drive command supersedes them.

use std::fmt;

use log::{debug, trace};

use super::Navigator;
use crate::{
    color::Color,
    hardware::{ColorSensor, ServoMotor, Ticker},
};

/// Pivot direction of a search sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    #[default]
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// `+1` for left, `-1` for right.
    pub fn sign(self) -> f64 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

/// The side that most recently found the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchMemory {
    pub last_found: Side,
}

/// Per-wheel travel of one search sweep, in wheel degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepArc {
    pub left:  f64,
    pub right: f64,
}

impl SweepArc {
    /// The move that undoes this one.
    pub fn reversed(self) -> SweepArc {
        SweepArc {
            left:  -self.left,
            right: -self.right,
        }
    }
}

/// Speed factor of the left wheel during a sweep.
const LEFT_SWEEP_SPEED: f64 = 0.5;
/// Speed factor of the right wheel during a sweep.
const RIGHT_SWEEP_SPEED: f64 = 1.0;

impl<M: ServoMotor, S: ColorSensor, T: Ticker> Navigator<M, S, T> {
    /// Wheel travel for a sweep of `allowed_angle` chassis degrees toward
    /// `side`.
    pub fn sweep_arc(&self, side: Side, allowed_angle: f64) -> SweepArc {
        let factor = self.drivetrain.config.wheel_degrees_per_degree();
        let near = allowed_angle * self.config.arc_ratio_near * factor;
        let far = allowed_angle * self.config.arc_ratio_far * factor;
        SweepArc {
            left:  -side.sign() * near,
            right: side.sign() * far,
        }
    }

    fn start_sweep(&self, arc: SweepArc) {
        self.drivetrain
            .run_arc(LEFT_SWEEP_SPEED, RIGHT_SWEEP_SPEED, arc.left, arc.right);
    }

    /// Sweeps toward `side` looking for the line.
    ///
    /// Returns `true` as soon as BLACK is seen. Otherwise swings back to the
    /// starting heading and returns `false`.
    pub async fn search_on_side(&self, side: Side, allowed_angle: f64) -> bool {
        let interval = self.config.poll_interval;
        let arc = self.sweep_arc(side, allowed_angle);
        trace!("searching {} within {:.0}°", side, allowed_angle);

        self.start_sweep(arc);
        while !self.drivetrain.is_done() && self.sensors.read_surface() != Color::Black {
            self.ticker.sleep(interval).await;
        }

        if self.sensors.read_surface() == Color::Black {
            trace!("line found on the {}", side);
            return true;
        }

        self.start_sweep(arc.reversed());
        self.drivetrain
            .wait_until_done(&self.ticker, interval)
            .await;
        false
    }

    /// Searches the remembered side first, then the other.
    ///
    /// A find on the other side flips the memory. If neither side finds the
    /// line the robot is back at its starting heading and `false` is
    /// returned; callers treat that as "no information", not as an error.
    pub async fn correct_direction(&mut self, allowed_angle: f64) -> bool {
        let primary = self.memory.last_found;
        if self.search_on_side(primary, allowed_angle).await {
            return true;
        }

        let secondary = primary.opposite();
        if self.search_on_side(secondary, allowed_angle).await {
            debug!("line found on the {} side, remembering it", secondary);
            self.memory.last_found = secondary;
            return true;
        }

        debug!("no line within {:.0}° either side", allowed_angle);
        false
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use approx::assert_relative_eq;
    use embassy_futures::block_on;

    use super::*;
    use crate::{
        config::{DrivetrainConfig, NavigationConfig},
        drivetrain::Differential,
        hardware::mock::{MockClock, MockColorSensor, MockMotor, MockTicker, MotorCommand},
        sensors::Sensors,
    };

    type MockNav = Navigator<MockMotor, MockColorSensor, MockTicker>;

    fn nav(surface: &[Color], move_time: Duration) -> MockNav {
        let clock = MockClock::new();
        Navigator::new(
            Differential::new(
                MockMotor::with_move_time(clock.clone(), move_time),
                MockMotor::with_move_time(clock.clone(), move_time),
                DrivetrainConfig::default(),
            ),
            Sensors::new(
                MockColorSensor::new(surface),
                MockColorSensor::constant(Color::None),
            ),
            MockTicker::new(clock),
            NavigationConfig::default(),
        )
    }

    fn first_arc(nav: &MockNav) -> (f64, f64) {
        let left = nav.drivetrain.left.borrow().commands()[0];
        let right = nav.drivetrain.right.borrow().commands()[0];
        match (left, right) {
            (MotorCommand::RunAngle { angle: l, .. }, MotorCommand::RunAngle { angle: r, .. }) => (l, r),
            other => panic!("unexpected commands {:?}", other),
        }
    }

    #[test]
    fn sweeps_mirror_each_other() {
        let nav = nav(&[], Duration::ZERO);
        let left = nav.sweep_arc(Side::Left, 55.0);
        let right = nav.sweep_arc(Side::Right, 55.0);

        assert_relative_eq!(left.left, -right.left);
        assert_relative_eq!(left.right, -right.right);
        assert!(left.left < 0.0 && left.right > 0.0);

        let factor = 10.5 / 4.25;
        assert_relative_eq!(left.left.abs(), 55.0 * 2.0 / 3.0 * factor);
        assert_relative_eq!(left.right, 55.0 * 4.0 / 3.0 * factor);
    }

    #[test]
    fn issued_sweeps_are_mirrored() {
        let left_nav = nav(&[Color::White], Duration::ZERO);
        assert!(!block_on(left_nav.search_on_side(Side::Left, 55.0)));
        let right_nav = nav(&[Color::White], Duration::ZERO);
        assert!(!block_on(right_nav.search_on_side(Side::Right, 55.0)));

        let (ll, lr) = first_arc(&left_nav);
        let (rl, rr) = first_arc(&right_nav);
        assert_relative_eq!(ll, -rl);
        assert_relative_eq!(lr, -rr);
    }

    #[test]
    fn left_wheel_sweeps_at_half_speed() {
        let nav = nav(&[Color::White], Duration::ZERO);
        block_on(nav.search_on_side(Side::Right, 15.0));
        let first = nav.drivetrain.left.borrow().commands()[0];
        match first {
            MotorCommand::RunAngle { speed, .. } => assert_eq!(speed, 125.0),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn black_during_sweep_stops_polling() {
        let nav = nav(
            &[Color::White, Color::White, Color::Black],
            Duration::from_millis(500),
        );
        assert!(block_on(nav.search_on_side(Side::Left, 55.0)));

        // No return swing was issued and the sweep is still in flight.
        assert_eq!(nav.drivetrain.left.borrow().commands().len(), 1);
        assert!(!nav.drivetrain.is_done());
    }

    #[test]
    fn failed_sweep_returns_to_start() {
        let nav = nav(&[Color::White], Duration::from_millis(200));
        assert!(!block_on(nav.search_on_side(Side::Left, 55.0)));

        assert!(nav.drivetrain.is_done());
        assert_relative_eq!(nav.drivetrain.left.borrow().angle(), 0.0, epsilon = 1e-9);
        assert_relative_eq!(nav.drivetrain.right.borrow().angle(), 0.0, epsilon = 1e-9);
        assert_eq!(nav.drivetrain.left.borrow().commands().len(), 2);
    }

    #[test]
    fn remembered_side_is_tried_first() {
        // Motors finish instantly: each sweep polls once after completing.
        let mut nav = nav(&[Color::Black], Duration::ZERO);
        assert!(block_on(nav.correct_direction(15.0)));
        assert_eq!(nav.memory.last_found, Side::Left);

        let (l, r) = first_arc(&nav);
        assert!(l < 0.0 && r > 0.0);
    }

    #[test]
    fn memory_flips_after_each_opposite_find() {
        // Every correction: primary sweep misses, opposite sweep hits.
        let mut nav = nav(&[], Duration::ZERO);
        let mut expected_first = Side::Left;
        for _ in 0..4 {
            nav.sensors
                .surface
                .borrow_mut()
                .extend(&[Color::White, Color::Black]);
            nav.drivetrain.left.borrow_mut().clear_commands();

            assert!(block_on(nav.correct_direction(55.0)));

            let first = nav.drivetrain.left.borrow().commands()[0];
            let arc = nav.sweep_arc(expected_first, 55.0);
            assert_eq!(
                first,
                MotorCommand::RunAngle {
                    speed: 125.0,
                    angle: arc.left,
                }
            );
            assert_eq!(nav.memory.last_found, expected_first.opposite());
            expected_first = expected_first.opposite();
        }
    }

    #[test]
    fn double_miss_leaves_heading_and_memory_alone() {
        let mut nav = nav(&[Color::White], Duration::from_millis(100));
        nav.memory.last_found = Side::Right;

        assert!(!block_on(nav.correct_direction(55.0)));

        assert_eq!(nav.memory.last_found, Side::Right);
        assert_relative_eq!(nav.drivetrain.left.borrow().net_relative_travel(), 0.0, epsilon = 1e-9);
        assert_relative_eq!(nav.drivetrain.right.borrow().net_relative_travel(), 0.0, epsilon = 1e-9);
        assert_relative_eq!(nav.drivetrain.left.borrow().angle(), 0.0, epsilon = 1e-9);
        assert_eq!(nav.heading.heading(), 0.0);
        // Out, back, out, back on each wheel.
        assert_eq!(nav.drivetrain.right.borrow().commands().len(), 4);
    }
}
