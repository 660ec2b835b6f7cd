//! Simulated devices.
//!
//! All mock devices read a shared [`MockClock`]. A [`MockTicker`] advances the
//! clock when a control loop sleeps and then yields once to the executor, so
//! two loops raced with [`scheduler::race`](crate::scheduler::race)
//! interleave exactly the way they would on the brain.
//!
//! ```
//! use std::time::Duration;
//! use trailgrip::hardware::{mock::{MockClock, MockTicker}, Ticker};
//!
//! let clock = MockClock::new();
//! let ticker = MockTicker::new(clock.clone());
//! embassy_futures::block_on(ticker.sleep(Duration::from_millis(10)));
//! assert_eq!(clock.now_ms(), 10);
//! ```

use std::{cell::Cell, collections::VecDeque, rc::Rc, time::Duration};

use super::{ColorSensor, ServoMotor, Ticker};
use crate::color::Color;

/// A millisecond clock shared by every mock device.
#[derive(Debug, Clone, Default)]
pub struct MockClock {
    now_ms: Rc<Cell<u64>>,
}

impl MockClock {
    pub fn new() -> Self { Self::default() }

    pub fn now_ms(&self) -> u64 { self.now_ms.get() }

    pub fn advance(&self, duration: Duration) {
        self.now_ms.set(self.now_ms.get() + duration.as_millis() as u64);
    }
}

/// A ticker that advances a [`MockClock`] instead of waiting.
#[derive(Debug, Clone)]
pub struct MockTicker {
    clock: MockClock,
}

impl MockTicker {
    pub fn new(clock: MockClock) -> Self { Self { clock } }

    pub fn clock(&self) -> &MockClock { &self.clock }
}

impl Ticker for MockTicker {
    async fn sleep(&self, duration: Duration) {
        self.clock.advance(duration);
        embassy_futures::yield_now().await;
    }
}

/// A command received by a [`MockMotor`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotorCommand {
    Run { speed: f64 },
    RunAngle { speed: f64, angle: f64 },
    RunTarget { speed: f64, target: f64 },
    Hold,
    ResetAngle { angle: f64 },
}

#[derive(Debug, Clone, Copy)]
struct Motion {
    from:      f64,
    to:        f64,
    start_ms:  u64,
    finish_ms: u64,
}

/// A motor that records its commands and completes position moves after a
/// fixed amount of simulated time.
#[derive(Debug, Clone)]
pub struct MockMotor {
    clock:     MockClock,
    move_time: Duration,
    angle:     f64,
    speed:     f64,
    motion:    Option<Motion>,
    commands:  Vec<MotorCommand>,
}

impl MockMotor {
    /// Creates a motor whose position moves complete as soon as they are
    /// polled.
    pub fn new(clock: MockClock) -> Self { Self::with_move_time(clock, Duration::ZERO) }

    /// Creates a motor whose position moves take `move_time` to complete.
    pub fn with_move_time(clock: MockClock, move_time: Duration) -> Self {
        Self {
            clock,
            move_time,
            angle: 0.0,
            speed: 0.0,
            motion: None,
            commands: Vec::new(),
        }
    }

    /// Every command received so far, oldest first.
    pub fn commands(&self) -> &[MotorCommand] { &self.commands }

    pub fn last_command(&self) -> Option<MotorCommand> { self.commands.last().copied() }

    pub fn clear_commands(&mut self) { self.commands.clear(); }

    /// Speed of the current continuous run, zero when stopped or holding.
    pub fn speed(&self) -> f64 { self.speed }

    /// Sum of all relative moves issued since the last clear.
    pub fn net_relative_travel(&self) -> f64 {
        self.commands
            .iter()
            .filter_map(|c| match c {
                MotorCommand::RunAngle { angle, .. } => Some(*angle),
                _ => None,
            })
            .sum()
    }

    /// Overrides the encoder without recording a command.
    pub fn set_angle(&mut self, angle: f64) {
        self.motion = None;
        self.angle = angle;
    }

    fn position(&self) -> f64 {
        match self.motion {
            Some(m) => {
                let now = self.clock.now_ms();
                if now >= m.finish_ms {
                    m.to
                } else {
                    let span = (m.finish_ms - m.start_ms) as f64;
                    m.from + (m.to - m.from) * (now - m.start_ms) as f64 / span
                }
            }
            None => self.angle,
        }
    }

    fn settle(&mut self) {
        self.angle = self.position();
        self.motion = None;
    }

    fn start_move(&mut self, to: f64) {
        self.settle();
        let start_ms = self.clock.now_ms();
        self.speed = 0.0;
        self.motion = Some(Motion {
            from: self.angle,
            to,
            start_ms,
            finish_ms: start_ms + self.move_time.as_millis() as u64,
        });
    }
}

impl ServoMotor for MockMotor {
    fn run(&mut self, speed: f64) {
        self.settle();
        self.speed = speed;
        self.commands.push(MotorCommand::Run { speed });
    }

    fn run_angle(&mut self, speed: f64, angle: f64) {
        let to = self.position() + angle;
        self.start_move(to);
        self.commands.push(MotorCommand::RunAngle { speed, angle });
    }

    fn run_target(&mut self, speed: f64, target: f64) {
        self.start_move(target);
        self.commands.push(MotorCommand::RunTarget { speed, target });
    }

    fn hold(&mut self) {
        self.settle();
        self.speed = 0.0;
        self.commands.push(MotorCommand::Hold);
    }

    fn reset_angle(&mut self, angle: f64) {
        self.settle();
        self.angle = angle;
        self.commands.push(MotorCommand::ResetAngle { angle });
    }

    fn angle(&self) -> f64 { self.position() }

    fn is_done(&self) -> bool {
        self.motion
            .map_or(true, |m| self.clock.now_ms() >= m.finish_ms)
    }
}

/// A color sensor that replays a script of readings.
///
/// Once the script runs out the last reading repeats forever.
#[derive(Debug, Clone, Default)]
pub struct MockColorSensor {
    script: VecDeque<Option<Color>>,
    last:   Option<Color>,
    polls:  usize,
}

impl MockColorSensor {
    /// Replays `colors`, treating [`Color::None`] as "no lock".
    pub fn new(colors: &[Color]) -> Self {
        Self {
            script: colors
                .iter()
                .map(|c| c.is_detected().then_some(*c))
                .collect(),
            last:   None,
            polls:  0,
        }
    }

    /// Always reads `color`.
    pub fn constant(color: Color) -> Self {
        let mut sensor = Self::new(&[]);
        sensor.last = color.is_detected().then_some(color);
        sensor
    }

    /// Appends readings to the end of the script.
    pub fn extend(&mut self, colors: &[Color]) {
        self.script
            .extend(colors.iter().map(|c| c.is_detected().then_some(*c)));
    }

    /// Number of times the sensor has been sampled.
    pub fn polls(&self) -> usize { self.polls }

    /// Readings not yet consumed.
    pub fn remaining(&self) -> usize { self.script.len() }
}

impl ColorSensor for MockColorSensor {
    fn color(&mut self) -> Option<Color> {
        self.polls += 1;
        if let Some(next) = self.script.pop_front() {
            self.last = next;
        }
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_moves_complete_after_move_time() {
        let clock = MockClock::new();
        let mut motor = MockMotor::with_move_time(clock.clone(), Duration::from_millis(100));
        motor.run_angle(250.0, 90.0);
        assert!(!motor.is_done());
        clock.advance(Duration::from_millis(50));
        assert_eq!(motor.angle(), 45.0);
        clock.advance(Duration::from_millis(50));
        assert!(motor.is_done());
        assert_eq!(motor.angle(), 90.0);
    }

    #[test]
    fn relative_moves_stack_from_current_position() {
        let clock = MockClock::new();
        let mut motor = MockMotor::new(clock);
        motor.run_angle(100.0, 30.0);
        motor.run_angle(100.0, -10.0);
        assert_eq!(motor.angle(), 20.0);
        motor.run_target(100.0, 0.0);
        assert_eq!(motor.angle(), 0.0);
        assert_eq!(motor.net_relative_travel(), 20.0);
    }

    #[test]
    fn hold_stops_a_run() {
        let mut motor = MockMotor::new(MockClock::new());
        motor.run(250.0);
        assert_eq!(motor.speed(), 250.0);
        motor.hold();
        assert_eq!(motor.speed(), 0.0);
        assert_eq!(motor.last_command(), Some(MotorCommand::Hold));
    }

    #[test]
    fn scripted_sensor_repeats_last_reading() {
        let mut sensor = MockColorSensor::new(&[Color::White, Color::None, Color::Red]);
        assert_eq!(sensor.color(), Some(Color::White));
        assert_eq!(sensor.color(), None);
        assert_eq!(sensor.color(), Some(Color::Red));
        assert_eq!(sensor.color(), Some(Color::Red));
        assert_eq!(sensor.polls(), 4);
        assert_eq!(sensor.remaining(), 0);
    }

    #[test]
    fn ticker_advances_clock() {
        let clock = MockClock::new();
        let ticker = MockTicker::new(clock.clone());
        embassy_futures::block_on(async {
            ticker.sleep(Duration::from_millis(10)).await;
            ticker.sleep(Duration::from_millis(10)).await;
        });
        assert_eq!(clock.now_ms(), 20);
    }
}
