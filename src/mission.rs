//! Mission scripts.
//!
//! A mission is the fixed sequence of headings, drives and deliveries for
//! one course layout. It only talks to the [`Robot`] API, so the navigation
//! core can be reused on a different course by swapping the script.
//!
//! [`run`] is the top-level entry point: it races the mission against the
//! gripper task and returns when the mission is done.
//!
//! # Example
//!
//! ```ignore
//! use trailgrip::mission::{self, CourseMission};
//!
//! let mut course = CourseMission::default();
//! mission::run(&mut robot, &mut course).await;
//! info!("delivered {} objects", course.deliveries.len());
//! ```

use log::info;

use crate::{
    color::Color,
    hardware::{ColorSensor, ServoMotor, Ticker},
    robot::Robot,
    scheduler::race,
};

/// A scripted sequence of robot operations.
#[allow(async_fn_in_trait)]
pub trait Mission {
    async fn run<M: ServoMotor, S: ColorSensor, T: Ticker>(&mut self, robot: &mut Robot<M, S, T>);
}

/// Runs `mission` with the gripper task alongside it.
///
/// The gripper is abandoned as soon as the mission returns.
pub async fn run<M, S, T, Mi>(robot: &mut Robot<M, S, T>, mission: &mut Mi)
where
    M: ServoMotor,
    S: ColorSensor,
    T: Ticker + Clone,
    Mi: Mission,
{
    let gripper = robot.gripper();
    info!("mission started");
    race(mission.run(robot), gripper.run()).await;
    info!("mission finished at heading {:.1}°", robot.heading());
}

/// Headings of the course, in degrees from the start orientation.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseLayout {
    /// Roads that end in a hatch, calibrated first.
    pub hatch_headings:  Vec<f64>,
    /// Diagonal roads with an object at their far end.
    pub pickup_headings: Vec<f64>,
    /// Heading of the road onto the outer ring.
    pub ring_entry:      f64,
    /// Turn between consecutive ring segments.
    pub ring_turn:       f64,
    /// Headings to resume the ring from after a delivery.
    pub ring_headings:   Vec<f64>,
}

impl Default for CourseLayout {
    fn default() -> Self {
        Self {
            hatch_headings:  vec![0.0, 90.0, -90.0],
            pickup_headings: vec![-45.0, 45.0, 135.0, -135.0],
            ring_entry:      -135.0,
            ring_turn:       45.0,
            ring_headings:   vec![-45.0, 45.0, 135.0],
        }
    }
}

/// The pickup-and-deliver course.
///
/// 1. Calibrate each hatch road and back out.
/// 2. Visit each diagonal road: drive out, turn around, drive back and
///    deliver whatever the gripper picked up.
/// 3. Enter the outer ring and walk its segments, delivering as objects are
///    found and resuming the ring afterwards.
#[derive(Debug, Clone, Default)]
pub struct CourseMission {
    pub layout:     CourseLayout,
    /// Objects delivered so far with the hatch heading used.
    pub deliveries: Vec<(Color, f64)>,
}

impl CourseMission {
    pub fn new(layout: CourseLayout) -> Self {
        Self {
            layout,
            deliveries: Vec::new(),
        }
    }

    async fn deliver<M, S, T>(&mut self, robot: &mut Robot<M, S, T>, color: Color)
    where
        M: ServoMotor,
        S: ColorSensor,
        T: Ticker,
    {
        self.deliveries
            .push((color, robot.lookup_hatch_heading(color)));
        robot.release_at_heading(color).await;
    }

    /// Drives one ring segment and turns back toward the road it came from.
    async fn ring_segment<M, S, T>(&self, robot: &mut Robot<M, S, T>)
    where
        M: ServoMotor,
        S: ColorSensor,
        T: Ticker,
    {
        robot.drive_to_checkpoint().await;
        robot.rotate_in_place(self.layout.ring_turn).await;
        robot.drive_to_checkpoint().await;
        // The segment is driven back along itself.
        robot.assume_turned(180.0);
    }
}

impl Mission for CourseMission {
    async fn run<M: ServoMotor, S: ColorSensor, T: Ticker>(&mut self, robot: &mut Robot<M, S, T>) {
        robot.nav.reset();
        let turn = self.layout.ring_turn;

        for heading in self.layout.hatch_headings.clone() {
            robot.calibrate_hatch(heading).await;
            robot.return_to_origin().await;
        }

        for heading in self.layout.pickup_headings.clone() {
            robot.rotate_to_heading(heading).await;
            robot.drive_to_checkpoint().await;
            robot.rotate_in_place(180.0).await;
            robot.drive_to_checkpoint().await;

            let object = robot.detect_cylinder_color();
            if object.is_detected() {
                self.deliver(robot, object).await;
            }
        }

        robot.rotate_to_heading(self.layout.ring_entry).await;
        robot.drive_to_checkpoint().await;
        robot.rotate_in_place(turn).await;

        for heading in self.layout.ring_headings.clone() {
            self.ring_segment(robot).await;

            let object = robot.detect_cylinder_color();
            if object.is_detected() {
                robot.rotate_in_place(turn).await;
                robot.drive_to_checkpoint().await;
                self.deliver(robot, object).await;

                robot.rotate_to_heading(heading).await;
                robot.drive_to_checkpoint().await;
                robot.rotate_in_place(turn).await;
            } else {
                robot.rotate_in_place(-turn).await;
            }
        }

        self.ring_segment(robot).await;

        // The last object is dropped at its hatch and the robot stays there.
        let object = robot.detect_cylinder_color();
        if object.is_detected() {
            robot.rotate_in_place(turn).await;
            robot.drive_to_checkpoint().await;
            let heading = robot.lookup_hatch_heading(object);
            self.deliveries.push((object, heading));
            robot.rotate_to_heading(heading).await;
            robot.drive_to_checkpoint_uncorrected().await;
            robot.open_gripper().await;
        }
    }
}
