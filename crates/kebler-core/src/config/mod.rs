//! Configuration loading for the page interaction layer.
//!
//! All tunables are centralized here and loaded from `conf/config.toml` if
//! present. Any missing or invalid entries fall back to defaults so the page
//! can still wire up its widgets.

mod defaults;
mod io;
mod models;
mod tables;

pub use io::{load_config, parse_config, serialize_config};
pub use models::{AppConfig, LayoutPolicy, LogLevel};
