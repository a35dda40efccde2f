//! Core module - settings, configuration and logging
//!
//! - [`GameplaySettings`] - player preferences, persisted as JSON
//! - [`ClientConfig`] - command line and environment
//! - [`init_logging`] - tracing subscriber for the binary
//! - [`CoreError`] - errors from all of the above

pub mod client_config;
pub mod error;
pub mod logging;
pub mod resources;
pub mod settings_persistence;

pub use client_config::{ClientConfig, SessionMode};
pub use error::{CoreError, CoreResult};
pub use logging::init_logging;
pub use resources::GameplaySettings;
pub use settings_persistence::{load_settings, save_settings, settings_path};
