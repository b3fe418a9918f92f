/// Provider-agnostic views of the accelerator API responses.

#[derive(Debug, Clone, PartialEq)]
pub struct IpSet {
    pub family: Option<String>, // "IPv4" / "IPv6"
    pub addresses: Vec<String>,
}

/// A single accelerator-port to destination-socket mapping. Every field is
/// optional on the wire, so it is optional here too.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PortMapping {
    pub accelerator_port: Option<i32>,
    pub endpoint_id: Option<String>,
    pub destination_ip: Option<String>,
    pub destination_port: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    pub accelerator_arn: String,
    pub endpoint_group_arn: String,
    pub max_results: i32,
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct MappingPage {
    pub mappings: Vec<PortMapping>,
    pub next_token: Option<String>,
}

impl MappingPage {
    /// Continuation cursor, if the service handed back a usable one.
    pub fn cursor(&self) -> Option<&str> {
        self.next_token.as_deref().filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_absent() {
        let page = MappingPage::default();
        assert_eq!(page.cursor(), None);
    }

    #[test]
    fn test_cursor_empty_string_is_exhausted() {
        let page = MappingPage { mappings: vec![], next_token: Some(String::new()) };
        assert_eq!(page.cursor(), None);
    }

    #[test]
    fn test_cursor_present() {
        let page = MappingPage { mappings: vec![], next_token: Some("abc".to_string()) };
        assert_eq!(page.cursor(), Some("abc"));
    }
}
