//! SHL Core
//!
//! Core types shared by the header inliner and the command-line tool.

pub mod config;
pub mod error;
pub mod location;
pub mod types;

pub use config::{BuildConfig, InlinerConfig};
pub use error::{Error, Result};
pub use location::Location;
pub use types::*;
