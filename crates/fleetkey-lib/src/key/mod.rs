//! Composite keys for resources spread across many hosts
//!
//! A container or image only carries a runtime-assigned identifier, and
//! independent hosts (cloned VMs in particular) can report the exact same
//! one. Prefixing the identifier with the host ID gives every resource a
//! single fleet-wide key:
//!
//! ```text
//! f07d655f-ce9a-4da8-a7a3-7ac6e15a9efb:abc123def456
//! └──────────── host ID ─────────────┘ └ short ID ┘
//! ```
//!
//! Container IDs are always cut down to [`SHORT_ID_LEN`] characters before
//! composing, since time-series lookups and the rest of the dashboard index
//! containers by that short form. Image IDs are used verbatim. The host
//! prefix is what disambiguates across hosts; truncation is only about
//! agreeing on one canonical container ID length.
//!
//! Decoding is lossy for full-length container IDs: only the short form can
//! be recovered from a key.

mod inspect;


pub use inspect::{classify_container_id, ContainerIdForm};

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Separator between the host part and the resource part of a key
pub const KEY_DELIMITER: char = ':';

/// Length of a short container ID, as shown by `docker ps`
pub const SHORT_ID_LEN: usize = 12;

/// Length of a full container ID as reported by the runtime
pub const FULL_ID_LEN: usize = 64;

/// Errors from the strict parsing and checked construction paths.
///
/// The plain encoders and [`parse_composite_key`] never fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("composite key {0:?} has no ':' delimiter")]
    MissingDelimiter(String),

    #[error("composite key {0:?} has an empty host part")]
    EmptyHost(String),

    #[error("composite key {0:?} has an empty resource part")]
    EmptyResource(String),

    #[error("host ID {0:?} contains the ':' delimiter")]
    DelimiterInHost(String),

    #[error("container ID {id:?} is not a recognised runtime ID ({form})")]
    UnexpectedIdFormat { id: String, form: ContainerIdForm },
}

/// Anything that belongs to a single host and carries a runtime ID
pub trait HostScoped {
    fn host_id(&self) -> &str;
    fn resource_id(&self) -> &str;
}

/// Opaque identifier of one host in the fleet
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HostId(String);

impl HostId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for HostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HostId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for HostId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Return the short form of a container ID.
///
/// Counts characters rather than bytes so a malformed ID with multi-byte
/// characters is never split mid-character. IDs already at or below
/// [`SHORT_ID_LEN`] are returned unchanged.
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(SHORT_ID_LEN) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

/// Encode a container key from anything exposing a host and resource ID
pub fn encode_container_key<T: HostScoped + ?Sized>(resource: &T) -> String {
    encode_container_key_from_parts(resource.host_id(), resource.resource_id())
}

/// Encode a container key from its two parts.
///
/// The container ID is shortened to [`SHORT_ID_LEN`] characters. Empty
/// inputs are accepted and produce empty segments.
pub fn encode_container_key_from_parts(host_id: &str, container_id: &str) -> String {
    compose(host_id, short_id(container_id))
}

/// Encode an image key. The image ID is kept verbatim.
pub fn encode_image_key(host_id: &str, image_id: &str) -> String {
    compose(host_id, image_id)
}

/// Split a composite key into its host and resource parts.
///
/// Splits on the first delimiter. A key without a delimiter is treated as
/// a bare host ID with an empty resource part, and an empty key yields two
/// empty parts. Display code relies on this never failing.
pub fn parse_composite_key(key: &str) -> ResourceKey {
    let (host, resource) = key.split_once(KEY_DELIMITER).unwrap_or((key, ""));
    ResourceKey {
        host_id: HostId::from(host),
        resource_id: resource.to_string(),
    }
}

fn compose(host_id: &str, resource_id: &str) -> String {
    let mut key = String::with_capacity(host_id.len() + 1 + resource_id.len());
    key.push_str(host_id);
    key.push(KEY_DELIMITER);
    key.push_str(resource_id);
    key
}

/// A resource identity that is unique across the whole fleet.
///
/// Keys built with [`ResourceKey::container`] or
/// [`ResourceKey::parse_container`] hold the short container ID. Keys from
/// [`ResourceKey::parse`], [`FromStr`] or deserialization keep the resource
/// part exactly as written, since a decoded key cannot tell a container
/// from an image; call [`ResourceKey::normalize_container`] before using
/// such a key for a container lookup. Serializes as the composite key
/// string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct ResourceKey {
    host_id: HostId,
    resource_id: String,
}

impl ResourceKey {
    /// Key for a container; the ID is shortened
    pub fn container(host_id: impl Into<HostId>, container_id: &str) -> Self {
        Self {
            host_id: host_id.into(),
            resource_id: short_id(container_id).to_string(),
        }
    }

    /// Key for an image; the ID is kept as is
    pub fn image(host_id: impl Into<HostId>, image_id: impl Into<String>) -> Self {
        Self {
            host_id: host_id.into(),
            resource_id: image_id.into(),
        }
    }

    /// Like [`ResourceKey::container`], but rejects inputs that would make
    /// an ambiguous or foreign-looking key.
    ///
    /// Hex IDs shorter than the short form, or IDs that are not hex at all,
    /// usually come from a different ID scheme rather than from truncation.
    pub fn container_checked(
        host_id: impl Into<HostId>,
        container_id: &str,
    ) -> Result<Self, KeyError> {
        let host_id = host_id.into();
        if host_id.as_str().contains(KEY_DELIMITER) {
            return Err(KeyError::DelimiterInHost(host_id.into_inner()));
        }

        let form = classify_container_id(container_id);
        if !form.is_runtime_id() {
            return Err(KeyError::UnexpectedIdFormat {
                id: container_id.to_string(),
                form,
            });
        }

        Ok(Self::container(host_id, container_id))
    }

    /// Lenient decode, see [`parse_composite_key`]
    pub fn parse(key: &str) -> Self {
        parse_composite_key(key)
    }

    /// Lenient decode of a container key; the resource part is shortened
    pub fn parse_container(key: &str) -> Self {
        parse_composite_key(key).normalize_container()
    }

    /// Apply the container truncation rule to the resource part
    pub fn normalize_container(self) -> Self {
        if self.resource_id.chars().count() <= SHORT_ID_LEN {
            return self;
        }
        let resource_id = short_id(&self.resource_id).to_string();
        Self {
            host_id: self.host_id,
            resource_id,
        }
    }

    /// Decode a key, rejecting anything without both a host and a resource
    pub fn parse_strict(key: &str) -> Result<Self, KeyError> {
        let Some((host, resource)) = key.split_once(KEY_DELIMITER) else {
            return Err(KeyError::MissingDelimiter(key.to_string()));
        };
        if host.is_empty() {
            return Err(KeyError::EmptyHost(key.to_string()));
        }
        if resource.is_empty() {
            return Err(KeyError::EmptyResource(key.to_string()));
        }

        Ok(Self {
            host_id: HostId::from(host),
            resource_id: resource.to_string(),
        })
    }

    pub fn host_id(&self) -> &str {
        self.host_id.as_str()
    }

    pub fn resource_id(&self) -> &str {
        &self.resource_id
    }

    /// The composite key string
    pub fn to_key_string(&self) -> String {
        compose(self.host_id.as_str(), &self.resource_id)
    }

    pub fn into_parts(self) -> (HostId, String) {
        (self.host_id, self.resource_id)
    }
}

impl HostScoped for ResourceKey {
    fn host_id(&self) -> &str {
        self.host_id.as_str()
    }

    fn resource_id(&self) -> &str {
        &self.resource_id
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.host_id, KEY_DELIMITER, self.resource_id)
    }
}

impl FromStr for ResourceKey {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(parse_composite_key(s))
    }
}

impl From<String> for ResourceKey {
    fn from(value: String) -> Self {
        parse_composite_key(&value)
    }
}

impl From<ResourceKey> for String {
    fn from(value: ResourceKey) -> Self {
        value.to_key_string()
    }
}
