use crate::core::Pipeline;
use crate::domain::model::{BuildResult, GenerationReport};
use crate::utils::error::Result;
use crate::utils::monitor::RunMonitor;

pub struct SitemapEngine<P: Pipeline> {
    pipeline: P,
    monitor: RunMonitor,
}

impl<P: Pipeline> SitemapEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: RunMonitor::new(monitor_enabled),
        }
    }

    /// Collects and builds without writing anything.
    pub async fn plan(&self) -> Result<BuildResult> {
        tracing::info!("🔎 Collecting pages...");
        let entries = self.pipeline.collect().await?;
        tracing::info!("Collected {} route entries", entries.len());
        self.monitor.log_phase("collect", entries.len());

        tracing::info!("🧱 Building sitemap files...");
        let result = self.pipeline.build(entries).await?;
        tracing::info!(
            "Built {} URLs into {} file(s) ({} excluded, {} duplicates)",
            result.url_count,
            result.files.len(),
            result.excluded_count,
            result.duplicate_count
        );
        self.monitor.log_phase("build", result.url_count);

        Ok(result)
    }

    pub async fn run(&self) -> Result<GenerationReport> {
        tracing::info!("🚀 Starting sitemap generation");

        let result = self.plan().await?;

        tracing::info!("💾 Writing sitemap files...");
        let report = self.pipeline.write(result).await?;
        tracing::info!(
            "Wrote {} file(s), {} unchanged, in {}",
            report.files_written.len(),
            report.files_unchanged.len(),
            report.output_path
        );
        self.monitor.log_phase("write", report.file_count());
        self.monitor.log_final_stats();

        Ok(report)
    }
}
