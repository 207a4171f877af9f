//! Resource summaries reported by hosts

use crate::key::{HostScoped, ResourceKey};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Runtime state of a container
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerState {
    Running,
    Paused,
    Restarting,
    Exited,
    Created,
    Dead,
    #[default]
    #[serde(other)]
    Unknown,
}

impl ContainerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerState::Running => "running",
            ContainerState::Paused => "paused",
            ContainerState::Restarting => "restarting",
            ContainerState::Exited => "exited",
            ContainerState::Created => "created",
            ContainerState::Dead => "dead",
            ContainerState::Unknown => "unknown",
        }
    }
}

/// A container as listed by one host's runtime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerSummary {
    pub host_id: String,
    /// Runtime ID, long or short form
    pub id: String,
    #[serde(default)]
    pub names: Vec<String>,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub state: ContainerState,
    /// Unix timestamp in seconds
    #[serde(default)]
    pub created: i64,
}

impl ContainerSummary {
    pub fn key(&self) -> ResourceKey {
        ResourceKey::container(self.host_id.as_str(), &self.id)
    }

    /// First name without the leading slash Docker adds
    pub fn display_name(&self) -> &str {
        self.names
            .first()
            .map(|n| n.trim_start_matches('/'))
            .unwrap_or_default()
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.created, 0)
    }
}

impl HostScoped for ContainerSummary {
    fn host_id(&self) -> &str {
        &self.host_id
    }

    fn resource_id(&self) -> &str {
        &self.id
    }
}

/// An image as listed by one host's runtime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSummary {
    pub host_id: String,
    pub id: String,
    #[serde(default)]
    pub repo_tags: Vec<String>,
    #[serde(default)]
    pub size_bytes: u64,
    #[serde(default)]
    pub created: i64,
}

impl ImageSummary {
    /// Image keys keep the full ID
    pub fn key(&self) -> ResourceKey {
        ResourceKey::image(self.host_id.as_str(), self.id.as_str())
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.created, 0)
    }
}

impl HostScoped for ImageSummary {
    fn host_id(&self) -> &str {
        &self.host_id
    }

    fn resource_id(&self) -> &str {
        &self.id
    }
}

/// Snapshot of resources gathered from any number of hosts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    #[serde(default)]
    pub containers: Vec<ContainerSummary>,
    #[serde(default)]
    pub images: Vec<ImageSummary>,
}

impl Inventory {
    /// Load an inventory from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read inventory {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse inventory {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::encode_container_key;
    use std::io::Write;

    #[test]
    fn test_container_key_is_truncated() {
        let summary = ContainerSummary {
            host_id: "host-1".to_string(),
            id: "abc123def4567890ff".to_string(),
            names: vec!["/web".to_string()],
            image: "nginx:latest".to_string(),
            state: ContainerState::Running,
            created: 0,
        };

        assert_eq!(summary.key().to_string(), "host-1:abc123def456");
        assert_eq!(encode_container_key(&summary), "host-1:abc123def456");
        assert_eq!(summary.display_name(), "web");
    }

    #[test]
    fn test_image_key_is_verbatim() {
        let image = ImageSummary {
            host_id: "host-1".to_string(),
            id: "sha256:0123456789abcdef0123".to_string(),
            repo_tags: vec![],
            size_bytes: 0,
            created: 0,
        };

        assert_eq!(image.key().to_string(), "host-1:sha256:0123456789abcdef0123");
    }

    #[test]
    fn test_unknown_state_deserializes() {
        let state: ContainerState = serde_json::from_str("\"removing\"").unwrap();
        assert_eq!(state, ContainerState::Unknown);

        let state: ContainerState = serde_json::from_str("\"exited\"").unwrap();
        assert_eq!(state, ContainerState::Exited);
    }

    #[test]
    fn test_created_at() {
        let summary: ContainerSummary =
            serde_json::from_str(r#"{"host_id": "h", "id": "abc", "created": 1700000000}"#)
                .unwrap();
        let created = summary.created_at().unwrap();
        assert_eq!(created.timestamp(), 1_700_000_000);
        assert_eq!(summary.state, ContainerState::Unknown);
        assert_eq!(summary.display_name(), "");
    }

    #[test]
    fn test_inventory_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"containers": [{{"host_id": "h1", "id": "abc123def456", "state": "running"}}]}}"#
        )
        .unwrap();

        let inventory = Inventory::load(file.path()).unwrap();
        assert_eq!(inventory.containers.len(), 1);
        assert!(inventory.images.is_empty());
    }

    #[test]
    fn test_inventory_load_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = Inventory::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse inventory"));
    }
}
