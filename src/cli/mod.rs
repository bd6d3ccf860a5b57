//! # Command-Line Interface
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `create <book.toml>` | Build a raw spec, one position per game |
//! | `process <spec.json>` | Expand positions into generated diagrams |
//! | `labels <spec.json>` | Summarize the labels of a processed spec |
//!
//! ## Output Formats
//!
//! All commands support the `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! Specs themselves are always written as JSON.
//!
//! ## Verbose Mode
//!
//! `--verbose` (or `-v`) prints progress and processing events to stderr:
//! ```bash
//! gpub --verbose process book.json -o processed.json
//! ```

mod app;
mod output;
mod spec_cmd;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
