//! Fleet-wide resource registry
//!
//! Indexes containers and images from every host by their composite key,
//! so resources with colliding runtime IDs on different hosts stay apart
//! while repeated reports from the same host collapse into one entry.

use crate::key::{classify_container_id, ResourceKey};
use crate::models::{ContainerSummary, ImageSummary, Inventory};
use dashmap::DashMap;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// Outcome of loading an inventory into a registry
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DedupReport {
    pub containers_seen: usize,
    pub images_seen: usize,
    /// Keys reported more than once, in the order they were seen
    pub duplicate_keys: Vec<ResourceKey>,
}

/// Registry of resources across all hosts
#[derive(Debug, Default)]
pub struct FleetRegistry {
    containers: DashMap<ResourceKey, ContainerSummary>,
    images: DashMap<ResourceKey, ImageSummary>,
}

impl FleetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from an inventory snapshot
    pub fn from_inventory(inventory: &Inventory) -> (Self, DedupReport) {
        let registry = Self::new();
        let mut report = DedupReport {
            containers_seen: inventory.containers.len(),
            images_seen: inventory.images.len(),
            duplicate_keys: Vec::new(),
        };

        for container in &inventory.containers {
            let key = container.key();
            if !registry.register_container(container.clone()) {
                report.duplicate_keys.push(key);
            }
        }

        for image in &inventory.images {
            let key = image.key();
            if !registry.register_image(image.clone()) {
                report.duplicate_keys.push(key);
            }
        }

        info!(
            hosts = registry.hosts().len(),
            containers = registry.container_count(),
            images = registry.image_count(),
            duplicates = report.duplicate_keys.len(),
            "Loaded inventory"
        );

        (registry, report)
    }

    /// Register a container, replacing any entry with the same key.
    /// Returns false if the key was already present.
    pub fn register_container(&self, summary: ContainerSummary) -> bool {
        let key = summary.key();

        let form = classify_container_id(&summary.id);
        if !form.is_runtime_id() {
            warn!(
                host_id = %summary.host_id,
                container_id = %summary.id,
                form = %form,
                "Container ID does not look like a runtime ID"
            );
        }

        debug!(key = %key, "Registering container");
        self.containers.insert(key, summary).is_none()
    }

    /// Register an image, replacing any entry with the same key.
    /// Returns false if the key was already present.
    pub fn register_image(&self, summary: ImageSummary) -> bool {
        let key = summary.key();
        debug!(key = %key, "Registering image");
        self.images.insert(key, summary).is_none()
    }

    /// Remove a container. Full-length container IDs in `key` are shortened
    /// before the lookup.
    pub fn unregister_container(&self, key: &ResourceKey) -> Option<ContainerSummary> {
        let key = key.clone().normalize_container();
        debug!(key = %key, "Unregistering container");
        self.containers.remove(&key).map(|(_, v)| v)
    }

    pub fn unregister_image(&self, key: &ResourceKey) -> Option<ImageSummary> {
        debug!(key = %key, "Unregistering image");
        self.images.remove(key).map(|(_, v)| v)
    }

    /// Look up a container. Full-length container IDs in `key` are
    /// shortened before the lookup.
    pub fn get_container(&self, key: &ResourceKey) -> Option<ContainerSummary> {
        let key = key.clone().normalize_container();
        self.containers.get(&key).map(|r| r.clone())
    }

    pub fn get_image(&self, key: &ResourceKey) -> Option<ImageSummary> {
        self.images.get(key).map(|r| r.clone())
    }

    /// All containers, sorted by key
    pub fn containers(&self) -> Vec<(ResourceKey, ContainerSummary)> {
        let mut entries: Vec<_> = self
            .containers
            .iter()
            .map(|r| (r.key().clone(), r.value().clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    /// All images, sorted by key
    pub fn images(&self) -> Vec<(ResourceKey, ImageSummary)> {
        let mut entries: Vec<_> = self
            .images
            .iter()
            .map(|r| (r.key().clone(), r.value().clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    /// Containers on one host, sorted by key
    pub fn containers_on_host(&self, host_id: &str) -> Vec<(ResourceKey, ContainerSummary)> {
        self.containers()
            .into_iter()
            .filter(|(key, _)| key.host_id() == host_id)
            .collect()
    }

    /// Images on one host, sorted by key
    pub fn images_on_host(&self, host_id: &str) -> Vec<(ResourceKey, ImageSummary)> {
        self.images()
            .into_iter()
            .filter(|(key, _)| key.host_id() == host_id)
            .collect()
    }

    /// Distinct host IDs with at least one resource, sorted
    pub fn hosts(&self) -> Vec<String> {
        let mut hosts = BTreeSet::new();
        for entry in self.containers.iter() {
            hosts.insert(entry.key().host_id().to_string());
        }
        for entry in self.images.iter() {
            hosts.insert(entry.key().host_id().to_string());
        }
        hosts.into_iter().collect()
    }

    pub fn container_count(&self) -> usize {
        self.containers.len()
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// Total number of resources
    pub fn len(&self) -> usize {
        self.containers.len() + self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty() && self.images.is_empty()
    }
}
