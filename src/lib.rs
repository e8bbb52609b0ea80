//! Ranks probed addresses by packet loss, delay and download speed.
//!
//! The probing itself happens elsewhere; this crate takes the measurement
//! records it produces, keeps the addresses within the configured delay
//! window and loss-rate ceiling, ranks them, and writes the clean ones to a
//! file and a console table.

pub mod config;
pub mod errors;
pub mod export;
pub mod filter;
pub mod input;
pub mod measurement;
pub mod pipeline;
pub mod ranking;
pub mod report;

pub use config::{FilterSettings, OutputSettings, Settings};
pub use errors::CleanIpError;
pub use measurement::Measurement;
pub use pipeline::{RecordedThroughput, ThroughputProbe};
