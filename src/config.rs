use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Global Accelerator's control plane is only served from this region.
pub const DEFAULT_ACCELERATOR_REGION: &str = "us-west-2";
pub const DEFAULT_PAGE_SIZE: i32 = 200;
const MAX_PAGE_SIZE: i32 = 20_000;

/// Command line flags. Flag names are camelCase to match existing invocations.
#[derive(Parser, Debug, Default, Clone)]
#[command(
    name = "ga-mapping-sync",
    version,
    about = "Copy Global Accelerator custom routing port mappings into a DynamoDB table"
)]
pub struct Cli {
    /// The name of the DynamoDB table to write mappings into
    #[arg(long = "dynamoTableName", env = "DYNAMO_TABLE_NAME")]
    pub dynamo_table_name: Option<String>,

    /// The region of the DynamoDB table
    #[arg(long = "dynamoTableRegion", env = "DYNAMO_TABLE_REGION")]
    pub dynamo_table_region: Option<String>,

    /// The ARN of the custom routing accelerator to read from
    #[arg(long = "acceleratorArn", env = "ACCELERATOR_ARN")]
    pub accelerator_arn: Option<String>,

    /// The ARN of the endpoint group to read port mappings from
    #[arg(long = "endpointGroupArn", env = "ENDPOINT_GROUP_ARN")]
    pub endpoint_group_arn: Option<String>,

    /// Mappings requested per page (1-20000)
    #[arg(long = "pageSize")]
    pub page_size: Option<i32>,

    /// Optional TOML file supplying any of the settings above
    #[arg(long, env = "GA_MAPPING_SYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Read everything but log records instead of writing them
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub table: TableConfig,
    #[serde(default)]
    pub accelerator: AcceleratorConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct TableConfig {
    pub name: Option<String>,
    pub region: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AcceleratorConfig {
    pub arn: Option<String>,
    pub endpoint_group_arn: Option<String>,
    #[serde(default = "default_accelerator_region")]
    pub region: String,
    pub page_size: Option<i32>,
}

fn default_accelerator_region() -> String {
    DEFAULT_ACCELERATOR_REGION.to_string()
}

impl Default for AcceleratorConfig {
    fn default() -> Self {
        Self {
            arn: None,
            endpoint_group_arn: None,
            region: default_accelerator_region(),
            page_size: None,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| "Failed to parse config TOML")?;
        Ok(config)
    }
}

/// Required settings that were supplied by neither a flag, an env var nor the
/// config file. Carries the flag names so the usage hint can point at them.
#[derive(Debug, thiserror::Error, PartialEq)]
#[error("missing required flags: {}", .0.iter().map(|f| format!("--{}", f)).collect::<Vec<_>>().join(", "))]
pub struct MissingSettings(pub Vec<&'static str>);

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub table_name: String,
    pub table_region: String,
    pub accelerator_arn: String,
    pub endpoint_group_arn: String,
    pub accelerator_region: String,
    pub page_size: i32,
    pub dry_run: bool,
}

impl Settings {
    /// Merge flags over the config file. Flags (and their env vars, which clap
    /// already folded in) win; blank values count as missing.
    pub fn resolve(cli: &Cli, file: &Config) -> Result<Self> {
        let mut missing = Vec::new();

        let table_name = pick(&cli.dynamo_table_name, &file.table.name);
        let table_region = pick(&cli.dynamo_table_region, &file.table.region);
        let accelerator_arn = pick(&cli.accelerator_arn, &file.accelerator.arn);
        let endpoint_group_arn =
            pick(&cli.endpoint_group_arn, &file.accelerator.endpoint_group_arn);

        if table_name.is_none() { missing.push("dynamoTableName"); }
        if table_region.is_none() { missing.push("dynamoTableRegion"); }
        if accelerator_arn.is_none() { missing.push("acceleratorArn"); }
        if endpoint_group_arn.is_none() { missing.push("endpointGroupArn"); }

        let (Some(table_name), Some(table_region), Some(accelerator_arn), Some(endpoint_group_arn)) =
            (table_name, table_region, accelerator_arn, endpoint_group_arn)
        else {
            return Err(MissingSettings(missing).into());
        };

        let page_size = cli
            .page_size
            .or(file.accelerator.page_size)
            .unwrap_or(DEFAULT_PAGE_SIZE);
        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            anyhow::bail!("page size must be 1-{}, got {}", MAX_PAGE_SIZE, page_size);
        }

        let accelerator_region = match file.accelerator.region.trim() {
            "" => default_accelerator_region(),
            r => r.to_string(),
        };

        Ok(Self {
            table_name,
            table_region,
            accelerator_arn,
            endpoint_group_arn,
            accelerator_region,
            page_size,
            dry_run: cli.dry_run,
        })
    }
}

fn pick(flag: &Option<String>, file: &Option<String>) -> Option<String> {
    [flag, file]
        .into_iter()
        .flatten()
        .map(|v| v.trim())
        .find(|v| !v.is_empty())
        .map(str::to_string)
}
