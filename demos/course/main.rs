use log::{LevelFilter, error, info};
use trailgrip::{
    color::Palette,
    config::RobotConfig,
    fs::logger,
    hardware::vex::{VexColorSensor, VexMotor, VexTicker},
    mission::{self, CourseMission},
    robot::Robot,
};
use vexide::prelude::*;

#[vexide::main]
async fn main(peripherals: Peripherals) {
    if let Err(e) = logger::init(LevelFilter::Info) {
        println!("Logger Init Error: {}", e);
    }

    let robot = Robot::new(
        VexMotor::new(Motor::new(peripherals.port_1, Gearset::Green, Direction::Forward)),
        VexMotor::new(Motor::new(peripherals.port_2, Gearset::Green, Direction::Reverse)),
        VexMotor::new(Motor::new(peripherals.port_3, Gearset::Red, Direction::Forward)),
        VexColorSensor::new(OpticalSensor::new(peripherals.port_5), Palette::surface()),
        VexColorSensor::new(OpticalSensor::new(peripherals.port_6), Palette::cylinder()),
        VexTicker,
        RobotConfig::default(),
    );

    let mut robot = match robot {
        Ok(robot) => robot,
        Err(e) => {
            error!("Robot Config Error: {}", e);
            return;
        }
    };

    let mut course = CourseMission::default();
    mission::run(&mut robot, &mut course).await;
    info!("Delivered {} objects", course.deliveries.len());
}
