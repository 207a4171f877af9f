//! Inventory deduplication command

use anyhow::Result;
use colored::Colorize;
use fleetkey_lib::{DedupReport, FleetRegistry, Inventory};
use serde::Serialize;
use std::path::Path;
use tabled::Tabled;
use tracing::info;

use crate::output::{
    color_state, format_bytes, format_timestamp, print_success, print_table, print_warning,
    OutputFormat,
};

/// Row for the resources table
#[derive(Tabled, Serialize)]
struct ResourceRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "State / Size")]
    detail: String,
    #[tabled(rename = "Created")]
    created: String,
}

#[derive(Serialize)]
struct DedupOutput {
    hosts: Vec<String>,
    resources: Vec<ResourceRow>,
    report: DedupReport,
}

/// Load an inventory and list each resource once per composite key.
///
/// With `host`, the rows, host list, counts and duplicate report all cover
/// that host only.
pub fn dedup_inventory(path: &Path, host: Option<&str>, format: OutputFormat) -> Result<()> {
    let inventory = Inventory::load(path)?;
    let (registry, report) = FleetRegistry::from_inventory(&inventory);
    info!(path = %path.display(), host = ?host, "Inventory deduplicated");

    let (containers, images, hosts, report) = match host {
        Some(host) => (
            registry.containers_on_host(host),
            registry.images_on_host(host),
            registry.hosts().into_iter().filter(|h| h == host).collect::<Vec<_>>(),
            scope_report(report, &inventory, host),
        ),
        None => (
            registry.containers(),
            registry.images(),
            registry.hosts(),
            report,
        ),
    };
    let container_count = containers.len();
    let image_count = images.len();

    let mut rows: Vec<ResourceRow> = containers
        .into_iter()
        .map(|(key, c)| ResourceRow {
            key: key.to_string(),
            kind: "container".to_string(),
            name: c.display_name().to_string(),
            detail: match format {
                OutputFormat::Table => color_state(c.state),
                OutputFormat::Json => c.state.as_str().to_string(),
            },
            created: format_timestamp(c.created),
        })
        .collect();

    rows.extend(images.into_iter().map(|(key, image)| ResourceRow {
        key: key.to_string(),
        kind: "image".to_string(),
        name: image.repo_tags.first().cloned().unwrap_or_default(),
        detail: format_bytes(image.size_bytes),
        created: format_timestamp(image.created),
    }));

    match format {
        OutputFormat::Json => crate::output::print_json(&DedupOutput {
            hosts,
            resources: rows,
            report,
        })?,
        OutputFormat::Table => {
            println!("{}", "Fleet Resources".bold());
            println!("{}", "=".repeat(60));
            println!(
                "Hosts: {}  Containers: {}  Images: {}",
                hosts.len().to_string().cyan(),
                container_count.to_string().cyan(),
                image_count.to_string().cyan()
            );
            println!();

            print_table(&rows, format)?;
            println!();

            if report.duplicate_keys.is_empty() {
                print_success("No duplicate keys");
            } else {
                print_warning(&format!(
                    "{} duplicate key(s) collapsed:",
                    report.duplicate_keys.len()
                ));
                for key in &report.duplicate_keys {
                    println!("  {}", key);
                }
            }
        }
    }

    Ok(())
}

/// Restrict a fleet-wide report to one host
fn scope_report(report: DedupReport, inventory: &Inventory, host: &str) -> DedupReport {
    DedupReport {
        containers_seen: inventory
            .containers
            .iter()
            .filter(|c| c.host_id == host)
            .count(),
        images_seen: inventory.images.iter().filter(|i| i.host_id == host).count(),
        duplicate_keys: report
            .duplicate_keys
            .into_iter()
            .filter(|key| key.host_id() == host)
            .collect(),
    }
}
