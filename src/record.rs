use crate::accelerator::types::PortMapping;
use anyhow::{Context, Result};
use aws_sdk_dynamodb::types::AttributeValue;
use serde::Serialize;
use std::collections::HashMap;

/// One table row. Attribute names are what existing readers of the table
/// query on, so they stay fixed.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RoutingRecord {
    #[serde(rename = "ExternalIP")]
    pub external_ip: Vec<String>,
    #[serde(rename = "ExternalPort")]
    pub external_port: i32,
    #[serde(rename = "DestinationIP")]
    pub destination_ip: String,
    #[serde(rename = "DestinationPort")]
    pub destination_port: i32,
}

impl RoutingRecord {
    /// Flatten a mapping. Returns None when the mapping lacks the accelerator
    /// port or either half of the destination socket.
    pub fn from_mapping(external_ip: &[String], mapping: &PortMapping) -> Option<Self> {
        Some(Self {
            external_ip: external_ip.to_vec(),
            external_port: mapping.accelerator_port?,
            destination_ip: mapping.destination_ip.clone().filter(|ip| !ip.is_empty())?,
            destination_port: mapping.destination_port?,
        })
    }

    pub fn to_item(&self) -> Result<HashMap<String, AttributeValue>> {
        serde_dynamo::to_item(self).context("failed to marshal routing record")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping() -> PortMapping {
        PortMapping {
            accelerator_port: Some(10001),
            endpoint_id: Some("subnet-0abc".to_string()),
            destination_ip: Some("10.0.1.17".to_string()),
            destination_port: Some(443),
        }
    }

    fn ips() -> Vec<String> {
        vec!["192.0.2.10".to_string(), "198.51.100.20".to_string()]
    }

    #[test]
    fn test_from_complete_mapping() {
        let rec = RoutingRecord::from_mapping(&ips(), &mapping()).unwrap();
        assert_eq!(rec.external_ip, ips());
        assert_eq!(rec.external_port, 10001);
        assert_eq!(rec.destination_ip, "10.0.1.17");
        assert_eq!(rec.destination_port, 443);
    }

    #[test]
    fn test_missing_destination_port_is_rejected() {
        let m = PortMapping { destination_port: None, ..mapping() };
        assert!(RoutingRecord::from_mapping(&ips(), &m).is_none());
    }

    #[test]
    fn test_missing_or_blank_destination_ip_is_rejected() {
        let m = PortMapping { destination_ip: None, ..mapping() };
        assert!(RoutingRecord::from_mapping(&ips(), &m).is_none());
        let m = PortMapping { destination_ip: Some(String::new()), ..mapping() };
        assert!(RoutingRecord::from_mapping(&ips(), &m).is_none());
    }

    #[test]
    fn test_missing_accelerator_port_is_rejected() {
        let m = PortMapping { accelerator_port: None, ..mapping() };
        assert!(RoutingRecord::from_mapping(&ips(), &m).is_none());
    }

    #[test]
    fn test_item_attribute_names_and_types() {
        let rec = RoutingRecord::from_mapping(&ips(), &mapping()).unwrap();
        let item = rec.to_item().unwrap();

        assert_eq!(item.len(), 4);
        assert_eq!(item["ExternalPort"], AttributeValue::N("10001".to_string()));
        assert_eq!(item["DestinationPort"], AttributeValue::N("443".to_string()));
        assert_eq!(item["DestinationIP"], AttributeValue::S("10.0.1.17".to_string()));
        assert_eq!(
            item["ExternalIP"],
            AttributeValue::L(vec![
                AttributeValue::S("192.0.2.10".to_string()),
                AttributeValue::S("198.51.100.20".to_string()),
            ])
        );
    }

    #[test]
    fn test_json_shape_matches_item() {
        let rec = RoutingRecord::from_mapping(&ips(), &mapping()).unwrap();
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["ExternalPort"], 10001);
        assert_eq!(json["DestinationIP"], "10.0.1.17");
        assert_eq!(json["ExternalIP"][1], "198.51.100.20");
    }
}
