use campus_sitemap::app::runner::{report_generation, report_plan, EXIT_SUCCESS};
use campus_sitemap::utils::{logger, validation::Validate};
use campus_sitemap::{
    CliConfig, GenerationReport, LocalStorage, Result, SitemapEngine, SitemapPipeline, TomlConfig,
};
use clap::Parser;

fn load_config(cli: &CliConfig) -> Result<TomlConfig> {
    tracing::info!("📁 Loading configuration from: {}", cli.config);
    let mut config = TomlConfig::from_file(&cli.config)?;
    cli.apply_overrides(&mut config);
    config.validate()?;
    tracing::info!("✅ Configuration loaded and validated successfully");
    Ok(config)
}

fn engine_for(
    cli: &CliConfig,
    config: TomlConfig,
) -> SitemapEngine<SitemapPipeline<LocalStorage, TomlConfig>> {
    let monitor_enabled = cli.monitor_enabled(&config);
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(config.output.path.clone());
    let pipeline = SitemapPipeline::new(storage, config);
    SitemapEngine::new_with_monitoring(pipeline, monitor_enabled)
}

async fn generate(cli: &CliConfig) -> Result<GenerationReport> {
    let config = load_config(cli)?;
    engine_for(cli, config).run().await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting build-sitemap");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();

    if cli.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No files will be written");
        let plan = async {
            let config = load_config(&cli)?;
            engine_for(&cli, config).plan().await
        };
        let exit_code = report_plan(plan, &mut stdout, &mut stderr).await;
        if exit_code != EXIT_SUCCESS {
            std::process::exit(exit_code);
        }
        return Ok(());
    }

    let exit_code = report_generation(generate(&cli), &mut stdout, &mut stderr).await;
    if exit_code != EXIT_SUCCESS {
        std::process::exit(exit_code);
    }

    Ok(())
}
