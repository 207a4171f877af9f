//! Key decoding command

use anyhow::{Context, Result};
use colored::Colorize;
use fleetkey_lib::{classify_container_id, ContainerIdForm, ResourceKey};
use serde::Serialize;

use crate::output::{color_form, display_segment, print_json, OutputFormat};

#[derive(Debug, Serialize)]
struct DecodedKey<'a> {
    key: &'a str,
    host_id: &'a str,
    resource_id: &'a str,
}

/// Decode a composite key into its host and resource parts
pub fn decode_key(key: &str, strict: bool, format: OutputFormat) -> Result<()> {
    let decoded = if strict {
        ResourceKey::parse_strict(key).context("Invalid composite key")?
    } else {
        ResourceKey::parse(key)
    };

    match format {
        OutputFormat::Json => print_json(&DecodedKey {
            key,
            host_id: decoded.host_id(),
            resource_id: decoded.resource_id(),
        })?,
        OutputFormat::Table => {
            println!("{}", "Composite Key".bold());
            println!("{}", "=".repeat(40));
            println!("Host:     {}", display_segment(decoded.host_id()).cyan());
            println!("Resource: {}", display_segment(decoded.resource_id()).cyan());
            if let Some(form) = container_form(decoded.resource_id()) {
                println!("Container ID form: {}", color_form(form));
            }
        }
    }

    Ok(())
}

/// Form of the resource part when it looks like a container ID.
///
/// Image IDs (`sha256:...`) and other foreign shapes get no form line.
fn container_form(resource_id: &str) -> Option<ContainerIdForm> {
    let form = classify_container_id(resource_id);
    form.is_runtime_id().then_some(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_form_only_for_container_ids() {
        assert_eq!(container_form("abc123def456"), Some(ContainerIdForm::Short));
        assert_eq!(container_form(&"a".repeat(64)), Some(ContainerIdForm::Full));
        assert_eq!(container_form("sha256:abcdef"), None);
        assert_eq!(container_form(""), None);
    }
}
