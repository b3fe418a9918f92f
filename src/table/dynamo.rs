use super::RecordSink;
use crate::record::RoutingRecord;
use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::Client;

pub struct DynamoTable {
    client: Client,
    table_name: String,
    dry_run: bool,
}

impl DynamoTable {
    pub fn new(sdk_config: &aws_config::SdkConfig, table_name: &str, dry_run: bool) -> Self {
        Self {
            client: Client::new(sdk_config),
            table_name: table_name.to_string(),
            dry_run,
        }
    }
}

#[async_trait]
impl RecordSink for DynamoTable {
    async fn put_record(&self, record: &RoutingRecord) -> Result<()> {
        if self.dry_run {
            let json = serde_json::to_string(record).context("failed to encode record")?;
            tracing::info!(table = %self.table_name, record = %json, "DRY RUN: would put item");
            return Ok(());
        }

        let item = record.to_item()?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| {
                anyhow::anyhow!(
                    "PutItem into {} failed: {}",
                    self.table_name,
                    DisplayErrorContext(&e)
                )
            })?;

        tracing::debug!(
            table = %self.table_name,
            external_port = record.external_port,
            destination = %format!("{}:{}", record.destination_ip, record.destination_port),
            "mapping written"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_config::{BehaviorVersion, Region, SdkConfig};

    fn offline_config() -> SdkConfig {
        SdkConfig::builder()
            .region(Region::new("us-east-1"))
            .behavior_version(BehaviorVersion::latest())
            .build()
    }

    #[tokio::test]
    async fn test_dry_run_does_not_call_the_service() {
        let table = DynamoTable::new(&offline_config(), "ga-port-mappings", true);
        let record = RoutingRecord {
            external_ip: vec!["192.0.2.10".to_string()],
            external_port: 10001,
            destination_ip: "10.0.1.17".to_string(),
            destination_port: 443,
        };
        // No credentials or endpoint are configured, so a real call would fail.
        table.put_record(&record).await.unwrap();
    }
}
