pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod portal;
pub mod utils;

pub use config::cli::LocalStorage;
pub use config::toml_config::TomlConfig;
#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use core::{engine::SitemapEngine, pipeline::SitemapPipeline};
pub use domain::model::{ChangeFrequency, GenerationReport, PageDescriptor, RouteEntry};
pub use utils::error::{Result, SitemapError};
