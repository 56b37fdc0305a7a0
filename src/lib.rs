//! Screen buffer for interactive terminal prompts
//!
//! Redraws a prompt's lines in place using cursor movement and line-clear
//! escape sequences, so only the rows that change are rewritten and the
//! screen does not flicker. This crate provides:
//!
//! - `screen`: the `ScreenBuf` renderer and its row bookkeeping
//! - `ansi`: emitted sequences and the escape scanner used for width accounting
//! - `size`: terminal width sources
//! - `config`: renderer configuration

pub mod ansi;
pub mod config;
pub mod error;
pub mod screen;
pub mod size;

pub use config::{Config, ConfigError};
pub use error::{ScreenBufError, ScreenBufResult};
pub use screen::ScreenBuf;
pub use size::{ConfiguredWidth, FixedWidth, TtyWidth, WidthSource};
