pub mod canonical;
pub mod engine;
pub mod pipeline;
pub mod sources;
pub mod xml;

pub use crate::domain::model::{BuildResult, GenerationReport, PageDescriptor, RouteEntry};
pub use crate::domain::ports::{ConfigProvider, PageSource, Pipeline, Storage};
pub use crate::utils::error::Result;
