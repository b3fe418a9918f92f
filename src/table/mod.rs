pub mod dynamo;

use crate::record::RoutingRecord;
use anyhow::Result;
use async_trait::async_trait;

/// Write side of the sync. Writes overwrite any existing row with the same key.
#[async_trait]
pub trait RecordSink: Send + Sync {
    async fn put_record(&self, record: &RoutingRecord) -> Result<()>;
}
