//! Key encoding commands

use anyhow::Result;
use colored::Colorize;
use fleetkey_lib::{classify_container_id, encode_image_key, ResourceKey};
use serde::Serialize;
use tracing::warn;

use crate::output::{print_json, OutputFormat};

/// Encoded key with the parts it was built from
#[derive(Debug, Serialize)]
struct EncodedKey<'a> {
    kind: &'a str,
    key: String,
    host_id: &'a str,
    resource_id: &'a str,
    input_id: &'a str,
    truncated: bool,
}

/// Encode a container key
pub fn encode_container(host: &str, id: &str, check: bool, format: OutputFormat) -> Result<()> {
    let key = if check {
        ResourceKey::container_checked(host, id)?
    } else {
        let form = classify_container_id(id);
        if !form.is_runtime_id() {
            warn!(container_id = %id, form = %form, "Container ID does not look like a runtime ID");
        }
        ResourceKey::container(host, id)
    };

    print_key(
        EncodedKey {
            kind: "container",
            key: key.to_key_string(),
            host_id: host,
            resource_id: key.resource_id(),
            input_id: id,
            truncated: key.resource_id() != id,
        },
        format,
    )
}

/// Encode an image key
pub fn encode_image(host: &str, id: &str, format: OutputFormat) -> Result<()> {
    let key = encode_image_key(host, id);

    print_key(
        EncodedKey {
            kind: "image",
            key,
            host_id: host,
            resource_id: id,
            input_id: id,
            truncated: false,
        },
        format,
    )
}

fn print_key(encoded: EncodedKey<'_>, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&encoded)?,
        OutputFormat::Table => {
            println!("{}", encoded.key.bold());
            if encoded.truncated {
                println!(
                    "{} {} -> {}",
                    "shortened".dimmed(),
                    encoded.input_id.dimmed(),
                    encoded.resource_id.cyan()
                );
            }
        }
    }
    Ok(())
}
