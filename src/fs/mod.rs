//! Filesystem utilities.
//!
//! Currently only the run [`logger`], which keeps a copy of every log line on
//! the SD card so a failed run can be read back after the fact.
//!
//! ```ignore
//! use log::{info, LevelFilter};
//! use trailgrip::fs::logger;
//!
//! logger::init(LevelFilter::Debug).expect("Failed to initialize logger");
//! info!("Robot initialized");
//! ```

/// Console and SD card logging.
pub mod logger;
