//! Monitored-site registry.
//!
//! The registry is built once at startup and injected wherever site
//! information is needed; nothing mutates it afterwards.

use serde::{Deserialize, Serialize};

/// A web property registered for monitoring.
///
/// `property_url` is the exact identifier Search Console knows the
/// property by: either a URL-prefix form (`https://host/`) or a domain
/// property (`sc-domain:host`). It is passed through to the API
/// unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoredSite {
    pub id: String,
    pub name: String,
    pub property_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

/// Ordered, immutable collection of monitored sites.
#[derive(Debug, Clone)]
pub struct SiteRegistry {
    sites: Vec<MonitoredSite>,
}

impl SiteRegistry {
    pub fn new(sites: Vec<MonitoredSite>) -> Self {
        Self { sites }
    }

    /// Parse a registry from a JSON array of sites.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let sites: Vec<MonitoredSite> = serde_json::from_str(json)?;
        Ok(Self::new(sites))
    }

    /// Look up a site by its id slug.
    pub fn get(&self, id: &str) -> Option<&MonitoredSite> {
        self.sites.iter().find(|s| s.id == id)
    }

    /// All sites in registration order.
    pub fn sites(&self) -> &[MonitoredSite] {
        &self.sites
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}

/// Built-in registry used when no sites file is configured.
pub fn default_registry() -> SiteRegistry {
    SiteRegistry::new(vec![
        MonitoredSite {
            id: "example".to_string(),
            name: "Example".to_string(),
            property_url: "https://example.com/".to_string(),
            icon_url: None,
        },
        MonitoredSite {
            id: "example-blog".to_string(),
            name: "Example Blog".to_string(),
            property_url: "sc-domain:blog.example.com".to_string(),
            icon_url: None,
        },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_id() {
        let registry = default_registry();
        assert!(registry.get("example").is_some());
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_from_json_preserves_order_and_property_urls() {
        let json = r#"[
            {"id": "a", "name": "A", "property_url": "https://a.test/"},
            {"id": "b", "name": "B", "property_url": "sc-domain:b.test", "icon_url": "/b.ico"}
        ]"#;
        let registry = SiteRegistry::from_json(json).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.sites()[0].id, "a");
        // Domain-property identifiers must pass through untouched.
        assert_eq!(registry.sites()[1].property_url, "sc-domain:b.test");
        assert_eq!(registry.sites()[1].icon_url.as_deref(), Some("/b.ico"));
    }
}
