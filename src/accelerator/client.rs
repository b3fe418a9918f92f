use super::types::*;
use super::MappingSource;
use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_globalaccelerator::error::DisplayErrorContext;
use aws_sdk_globalaccelerator::Client;

/// `MappingSource` backed by the Global Accelerator API.
pub struct GlobalAcceleratorSource {
    client: Client,
}

impl GlobalAcceleratorSource {
    pub fn new(sdk_config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }
}

#[async_trait]
impl MappingSource for GlobalAcceleratorSource {
    async fn ip_sets(&self, accelerator_arn: &str) -> Result<Vec<IpSet>> {
        let resp = self
            .client
            .describe_custom_routing_accelerator()
            .accelerator_arn(accelerator_arn)
            .send()
            .await
            .map_err(|e| {
                anyhow::anyhow!(
                    "DescribeCustomRoutingAccelerator {} failed: {}",
                    accelerator_arn,
                    DisplayErrorContext(&e)
                )
            })?;

        let accelerator = resp
            .accelerator()
            .with_context(|| format!("accelerator {} not returned by the service", accelerator_arn))?;

        let sets = accelerator
            .ip_sets()
            .iter()
            .map(|s| IpSet {
                family: s.ip_address_family().map(|f| f.as_str().to_string()),
                addresses: s.ip_addresses().to_vec(),
            })
            .collect();

        Ok(sets)
    }

    async fn list_port_mappings(&self, request: &PageRequest) -> Result<MappingPage> {
        let resp = self
            .client
            .list_custom_routing_port_mappings()
            .accelerator_arn(&request.accelerator_arn)
            .endpoint_group_arn(&request.endpoint_group_arn)
            .max_results(request.max_results)
            .set_next_token(request.next_token.clone())
            .send()
            .await
            .map_err(|e| {
                anyhow::anyhow!(
                    "ListCustomRoutingPortMappings {} failed: {}",
                    request.endpoint_group_arn,
                    DisplayErrorContext(&e)
                )
            })?;

        let mappings = resp
            .port_mappings()
            .iter()
            .map(|m| {
                let dest = m.destination_socket_address();
                PortMapping {
                    accelerator_port: m.accelerator_port(),
                    endpoint_id: m.endpoint_id().map(str::to_string),
                    destination_ip: dest.and_then(|d| d.ip_address()).map(str::to_string),
                    destination_port: dest.and_then(|d| d.port()),
                }
            })
            .collect();

        Ok(MappingPage {
            mappings,
            next_token: resp.next_token().map(str::to_string),
        })
    }
}
