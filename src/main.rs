use anyhow::Result;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use clap::{CommandFactory, Parser};
use ga_mapping_sync::accelerator::client::GlobalAcceleratorSource;
use ga_mapping_sync::config::{Cli, Config, MissingSettings, Settings};
use ga_mapping_sync::sync::MappingSync;
use ga_mapping_sync::table::dynamo::DynamoTable;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("ga_mapping_sync=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let settings = match load_settings(&cli) {
        Ok(s) => s,
        Err(e) if e.is::<MissingSettings>() => {
            eprintln!("{}\n", e);
            let _ = Cli::command().write_help(&mut std::io::stderr());
            return ExitCode::FAILURE;
        }
        Err(e) => {
            tracing::error!("{:#}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(&settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let file = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    Settings::resolve(cli, &file)
}

async fn sdk_config(region: &str) -> SdkConfig {
    aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_string()))
        .load()
        .await
}

async fn run(settings: &Settings) -> Result<()> {
    tracing::info!(
        table = %settings.table_name,
        table_region = %settings.table_region,
        accelerator = %settings.accelerator_arn,
        endpoint_group = %settings.endpoint_group_arn,
        dry_run = settings.dry_run,
        "starting mapping sync"
    );

    let source = GlobalAcceleratorSource::new(&sdk_config(&settings.accelerator_region).await);
    let table = DynamoTable::new(
        &sdk_config(&settings.table_region).await,
        &settings.table_name,
        settings.dry_run,
    );

    let summary = MappingSync::new(
        &source,
        &table,
        &settings.accelerator_arn,
        &settings.endpoint_group_arn,
        settings.page_size,
    )
    .run()
    .await?;

    tracing::info!(
        pages = summary.pages,
        written = summary.written,
        skipped = summary.skipped,
        "mapping sync complete"
    );
    Ok(())
}
