pub mod config;
pub mod core;
pub mod domain;
pub mod ingest;
pub mod submit;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{cli::LocalStorage, CliConfig};

pub use crate::core::{engine::PortalEngine, pipeline::PortalPipeline};
pub use crate::utils::error::{PortalError, Result};
