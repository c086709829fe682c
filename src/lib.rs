pub mod aggregate;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod report;
pub mod util;

pub use error::{Error, Result};
