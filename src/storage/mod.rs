//! # Storage Layer
//!
//! File handling for gpub. The core never touches the file system; everything
//! is read here first.
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Book | TOML | any path, games relative to it |
//! | Spec | JSON | any path, or stdout |
//! | Global config | TOML | `~/.config/gpub/config.toml` (platform config dir) |

mod book;
mod config;
mod spec_file;

pub use book::{BookConfig, GameEntry};
pub use config::{ConfigError, GlobalConfig, OutputFormat, RotationConfig, SpecDefaults};
pub use spec_file::{read_spec, write_spec};
