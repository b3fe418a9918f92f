use crate::accelerator::types::{IpSet, PageRequest};
use crate::accelerator::MappingSource;
use crate::record::RoutingRecord;
use crate::table::RecordSink;
use anyhow::{Context, Result};

/// Counts for one completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub pages: usize,
    pub written: usize,
    pub skipped: usize,
}

/// Copies every port mapping of one endpoint group into the table.
pub struct MappingSync<'a> {
    source: &'a dyn MappingSource,
    sink: &'a dyn RecordSink,
    accelerator_arn: String,
    endpoint_group_arn: String,
    page_size: i32,
}

impl<'a> MappingSync<'a> {
    pub fn new(
        source: &'a dyn MappingSource,
        sink: &'a dyn RecordSink,
        accelerator_arn: &str,
        endpoint_group_arn: &str,
        page_size: i32,
    ) -> Self {
        Self {
            source,
            sink,
            accelerator_arn: accelerator_arn.to_string(),
            endpoint_group_arn: endpoint_group_arn.to_string(),
            page_size,
        }
    }

    /// Run to completion. The first error from either service ends the run;
    /// rows already written stay written.
    pub async fn run(&self) -> Result<SyncSummary> {
        let external_ip = self.external_ip().await?;
        tracing::info!(
            accelerator = %self.accelerator_arn,
            ips = ?external_ip,
            "resolved accelerator IP set"
        );

        let mut summary = SyncSummary::default();
        let mut request = PageRequest {
            accelerator_arn: self.accelerator_arn.clone(),
            endpoint_group_arn: self.endpoint_group_arn.clone(),
            max_results: self.page_size,
            next_token: None,
        };

        loop {
            let page = self
                .source
                .list_port_mappings(&request)
                .await
                .context("listing port mappings")?;
            summary.pages += 1;
            tracing::info!(page = summary.pages, count = page.mappings.len(), "updating records");

            for mapping in &page.mappings {
                let Some(record) = RoutingRecord::from_mapping(&external_ip, mapping) else {
                    tracing::warn!(
                        endpoint = mapping.endpoint_id.as_deref().unwrap_or("-"),
                        accelerator_port = ?mapping.accelerator_port,
                        "skipping mapping without a complete destination"
                    );
                    summary.skipped += 1;
                    continue;
                };
                self.sink
                    .put_record(&record)
                    .await
                    .context("putting mapping into table")?;
                summary.written += 1;
            }

            match page.cursor() {
                Some(token) => request.next_token = Some(token.to_string()),
                None => break,
            }
        }

        Ok(summary)
    }

    /// First IP set the accelerator reports. Dual-stack accelerators report
    /// one set per family; the rest are logged and ignored.
    async fn external_ip(&self) -> Result<Vec<String>> {
        let mut sets = self
            .source
            .ip_sets(&self.accelerator_arn)
            .await
            .context("checking existing accelerator")?
            .into_iter();

        let Some(IpSet { addresses, family }) = sets.next() else {
            anyhow::bail!("accelerator {} has no IP sets", self.accelerator_arn);
        };
        for ignored in sets {
            tracing::warn!(
                used = family.as_deref().unwrap_or("-"),
                ignored = ignored.family.as_deref().unwrap_or("-"),
                addresses = ?ignored.addresses,
                "accelerator has more than one IP set; using the first"
            );
        }
        Ok(addresses)
    }
}
