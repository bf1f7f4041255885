// Utility module for common functionality
// Author: Gabriel Demetrios Lafis

mod config;
mod error;
mod logging;
mod validation;

pub use self::config::*;
pub use self::error::*;
pub use self::logging::*;
pub use self::validation::*;
