//! Run logger.
//!
//! Implements the [`log`] facade, writing every record both to the console
//! and to `log.txt` in the working directory (the SD card root on the
//! brain). A missing card only disables the file output.
//!
//! ```ignore
//! use log::{info, LevelFilter};
//! use trailgrip::fs::logger;
//!
//! #[vexide::main]
//! async fn main(peripherals: Peripherals) {
//!     logger::init(LevelFilter::Info).expect("Logger init failed");
//!     info!("Mission starting");
//! }
//! ```
//!
//! Each line carries the level, the time since the program started, the
//! module and the message:
//!
//! ```text
//! INFO [1m 12s 40ms] trailgrip::robot - hatch green at 90°
//! INFO [1m 30s 2ms] trailgrip::motion::navigate - checkpoint reached on black
//! ```

use std::{
    fs::OpenOptions,
    io::{BufWriter, Write},
    sync::{Mutex, OnceLock},
    time::Duration,
};

use humantime::{FormattedDuration, format_duration};
use log::{LevelFilter, Metadata, Record, SetLoggerError};

/// Name of the log file, truncated on every start.
pub const LOG_FILE: &str = "log.txt";

/// Console and file logger.
pub struct RunLogger {
    /// `None` when the file could not be opened.
    file_writer: Mutex<Option<BufWriter<std::fs::File>>>,
}

impl RunLogger {
    fn new() -> Self {
        let file_writer = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(LOG_FILE)
            .ok()
            .map(BufWriter::new);

        Self {
            file_writer: Mutex::new(file_writer),
        }
    }
}

impl log::Log for RunLogger {
    fn enabled(&self, metadata: &Metadata) -> bool { metadata.level() <= log::max_level() }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(record, uptime());
        print!("{}", line);

        if let Ok(mut guard) = self.file_writer.lock() {
            if let Some(writer) = guard.as_mut() {
                let _ = writer.write_all(line.as_bytes());
            }
        }
    }

    fn flush(&self) {
        if let Ok(mut guard) = self.file_writer.lock() {
            if let Some(writer) = guard.as_mut() {
                let _ = writer.flush();
            }
        }
    }
}

static LOGGER: OnceLock<RunLogger> = OnceLock::new();

/// Installs the run logger as the global logger.
///
/// Records below `level` are dropped.
///
/// # Errors
///
/// Returns [`SetLoggerError`] if a logger has already been set.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    // Start the clock at init on targets without a program uptime.
    let _ = uptime();
    let logger = LOGGER.get_or_init(RunLogger::new);
    log::set_logger(logger).map(|()| log::set_max_level(level))
}

fn format_line(record: &Record, time: FormattedDuration) -> String {
    format!(
        "{} [{}] {} - {}\n",
        record.level(),
        time,
        record.target(),
        record.args()
    )
}

#[cfg(feature = "vexos")]
fn uptime() -> FormattedDuration { format_duration(trim(vexide::time::user_uptime())) }

#[cfg(not(feature = "vexos"))]
fn uptime() -> FormattedDuration {
    static START: OnceLock<std::time::Instant> = OnceLock::new();
    format_duration(trim(START.get_or_init(std::time::Instant::now).elapsed()))
}

/// Drops sub-millisecond precision.
fn trim(duration: Duration) -> Duration { Duration::from_millis(duration.as_millis() as u64) }

#[cfg(test)]
mod tests {
    use log::{Level, LevelFilter, debug, error, info, trace, warn};

    use super::*;

    #[test]
    fn line_layout() {
        let line = format_line(
            &Record::builder()
                .level(Level::Warn)
                .target("trailgrip::gripper")
                .args(format_args!("bay empty"))
                .build(),
            format_duration(Duration::from_millis(65_040)),
        );
        assert_eq!(line, "WARN [1m 5s 40ms] trailgrip::gripper - bay empty\n");
    }

    #[test]
    fn uptime_has_millisecond_resolution() {
        assert_eq!(trim(Duration::from_micros(1_500_700)), Duration::from_millis(1_500));
    }

    #[test]
    #[ignore = "filesystem access needed (file write)"]
    fn log_full_test() {
        super::init(LevelFilter::Trace).expect("Failed to initialize logger");

        trace!("This is a trace message");
        debug!("This is a debug message");
        info!("This is an info message");
        warn!("This is a warning message");
        error!("This is an error message");

        log::logger().flush();

        assert!(log::logger().enabled(
            &log::Metadata::builder()
                .level(log::Level::Error)
                .target("test")
                .build()
        ));
    }
}
