pub mod changelog;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod manifest;
pub mod ui;

pub use error::{ReleaseError, Result};
