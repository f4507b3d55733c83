use crate::domain::model::{
    BuildResult, ContentSourceConfig, EntryDefaults, GenerationReport, RouteEntry,
};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn output_path(&self) -> &str;
    fn routes(&self) -> &[RouteEntry];
    fn routes_file(&self) -> Option<&str>;
    fn include_builtin_routes(&self) -> bool;
    fn content_sources(&self) -> &[ContentSourceConfig];
    fn exclude_patterns(&self) -> &[String];
    fn defaults(&self) -> EntryDefaults;
    fn trailing_slash(&self) -> bool;
    fn max_urls_per_file(&self) -> usize;
    fn concurrent_requests(&self) -> usize;
    fn index_filename(&self) -> &str;
    fn file_prefix(&self) -> &str;
    fn always_index(&self) -> bool;
    fn robots_txt(&self) -> bool;
}

/// Something that can enumerate pages of the site.
#[async_trait]
pub trait PageSource: Send + Sync {
    fn name(&self) -> &str;
    async fn fetch_routes(&self) -> Result<Vec<RouteEntry>>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn collect(&self) -> Result<Vec<RouteEntry>>;
    async fn build(&self, entries: Vec<RouteEntry>) -> Result<BuildResult>;
    async fn write(&self, result: BuildResult) -> Result<GenerationReport>;
}
