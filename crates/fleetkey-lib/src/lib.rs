//! Fleet-wide identity for containers and images
//!
//! This crate provides:
//! - Composite keys joining a host ID with a runtime resource ID
//! - Container ID format checks
//! - Resource summaries and a fleet-wide registry keyed by composite key
//! - Logging setup for the fleetkey binaries

pub mod key;
pub mod models;
pub mod observability;
pub mod registry;

pub use key::{
    classify_container_id, encode_container_key, encode_container_key_from_parts,
    encode_image_key, parse_composite_key, short_id, ContainerIdForm, HostId, HostScoped,
    KeyError, ResourceKey, FULL_ID_LEN, KEY_DELIMITER, SHORT_ID_LEN,
};
pub use models::*;
pub use observability::{init_logging, LogFormat};
pub use registry::{DedupReport, FleetRegistry};
