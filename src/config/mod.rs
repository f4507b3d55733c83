pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::config::toml_config::TomlConfig;
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "build-sitemap")]
#[command(about = "Generate sitemap files for the campus portal")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "sitemap.toml")]
    pub config: String,

    /// Override site.base_url
    #[arg(long)]
    pub base_url: Option<String>,

    /// Override output.path
    #[arg(long)]
    pub output_path: Option<String>,

    /// Collect and build, but do not write any file
    #[arg(long)]
    pub dry_run: bool,

    /// Log phase timings and memory usage
    #[arg(long)]
    pub monitor: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 套用命令列覆蓋設定
    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        if let Some(base_url) = &self.base_url {
            tracing::info!("🔧 site.base_url overridden to: {}", base_url);
            config.site.base_url = base_url.clone();
        }
        if let Some(output_path) = &self.output_path {
            tracing::info!("🔧 output.path overridden to: {}", output_path);
            config.output.path = output_path.clone();
        }
    }

    pub fn monitor_enabled(&self, config: &TomlConfig) -> bool {
        self.monitor || config.monitoring_enabled()
    }
}
