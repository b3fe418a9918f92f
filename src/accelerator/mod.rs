pub mod client;
pub mod types;

use anyhow::Result;
use async_trait::async_trait;
use types::{IpSet, MappingPage, PageRequest};

/// Read side of the sync: the custom routing accelerator's control plane.
#[async_trait]
pub trait MappingSource: Send + Sync {
    /// IP sets the accelerator exposes, in the order the service reports them.
    async fn ip_sets(&self, accelerator_arn: &str) -> Result<Vec<IpSet>>;

    /// One page of port mappings for an endpoint group.
    async fn list_port_mappings(&self, request: &PageRequest) -> Result<MappingPage>;
}
