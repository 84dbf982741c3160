pub mod app;
pub mod cli;
pub mod config;
pub mod presentation;

pub use crate::cli::*;
pub use crate::config::*;
pub use crate::presentation::*;
