//! Host telemetry core for the panel backend.
//!
//! A background collector samples CPU, memory, per-partition disk, network
//! and uptime once a minute, keeps the last 24 hours in a fixed-size ring
//! buffer, and serves current and historical views to concurrent readers.
//! The HTTP layer holds a [`Monitor`] for the process lifetime and calls its
//! read methods from request handlers.

pub mod config;
pub mod system;

pub use config::{MonitorConfig, load_config, load_config_from_path};
pub use system::{Monitor, parse_hours_param};
