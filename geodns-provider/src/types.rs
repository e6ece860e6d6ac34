use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::credentials::{CredentialShape, CredentialShapeCatalog};
use crate::error::{ProviderError, Result};

/// Provider name used for errors raised while building model values.
const MODEL: &str = "model";

// ============ Record Types ============

/// One rdata entry: an opaque, ordered key/value map (e.g. `{"address": "192.0.2.1"}`).
///
/// See [`crate::rdata::for_type_and_rdata`] for the positional-to-named conversion.
pub type RData = BTreeMap<String, serde_json::Value>;

/// A named, typed, TTL-bearing set of rdata entries.
///
/// # Serialization
///
/// ```json
/// { "name": "www.denominator.io.", "type": "A", "ttl": 300, "rdata": [{ "address": "192.0.2.1" }] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecordSet {
    /// Fully-qualified owner name.
    pub name: String,
    /// Record type code (`"A"`, `"CNAME"`, ...).
    #[serde(rename = "type")]
    pub record_type: String,
    /// TTL in seconds, if the backend reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    /// Rdata entries in backend order.
    pub rdata: Vec<RData>,
}

impl ResourceRecordSet {
    /// Start building a record set.
    pub fn builder() -> ResourceRecordSetBuilder {
        ResourceRecordSetBuilder::default()
    }
}

impl fmt::Display for ResourceRecordSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.record_type)?;
        if let Some(ttl) = self.ttl {
            write!(f, " {ttl}")?;
        }
        f.write_str(" [")?;
        for (i, rdata) in self.rdata.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str("{")?;
            for (j, (key, value)) in rdata.iter().enumerate() {
                if j > 0 {
                    f.write_str(", ")?;
                }
                match value {
                    serde_json::Value::String(s) => write!(f, "{key}={s}")?,
                    other => write!(f, "{key}={other}")?,
                }
            }
            f.write_str("}")?;
        }
        f.write_str("]")
    }
}

/// Builder for [`ResourceRecordSet`].
#[derive(Debug, Clone, Default)]
pub struct ResourceRecordSetBuilder {
    name: Option<String>,
    record_type: Option<String>,
    ttl: Option<u32>,
    rdata: Vec<RData>,
}

impl ResourceRecordSetBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn record_type(mut self, record_type: impl Into<String>) -> Self {
        self.record_type = Some(record_type.into());
        self
    }

    #[must_use]
    pub fn ttl(mut self, ttl: Option<u32>) -> Self {
        self.ttl = ttl;
        self
    }

    /// Append one rdata entry.
    #[must_use]
    pub fn add(mut self, rdata: RData) -> Self {
        self.rdata.push(rdata);
        self
    }

    /// Append several rdata entries, keeping their order.
    #[must_use]
    pub fn add_all(mut self, rdata: impl IntoIterator<Item = RData>) -> Self {
        self.rdata.extend(rdata);
        self
    }

    /// In-place variant of [`add`](Self::add), used while merging runs.
    pub(crate) fn push(&mut self, rdata: RData) {
        self.rdata.push(rdata);
    }

    /// Finish the record set. `name` and `type` are required and must be non-empty.
    pub fn build(self) -> Result<ResourceRecordSet> {
        let name = required(self.name, "name")?;
        let record_type = required(self.record_type, "type")?;
        Ok(ResourceRecordSet {
            name,
            record_type,
            ttl: self.ttl,
            rdata: self.rdata,
        })
    }
}

fn required(value: Option<String>, param: &str) -> Result<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ProviderError::invalid_argument(
            MODEL,
            param,
            "must not be empty",
        )),
    }
}

// ============ Config Types ============

/// Kind name of [`RecordConfig::Geo`].
pub const GEO_KIND: &str = "geo";

/// Geographic routing config attached to a record set.
///
/// Equality is structural, so two configs with the same group name and territories
/// are the same config.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoConfig {
    /// Display name of the geo group.
    pub group_name: String,
    /// Territory codes covered by the group, in resolver order.
    pub territories: Vec<String>,
    /// `true` when the group deliberately answers with nothing.
    #[serde(default)]
    pub no_response: bool,
}

impl GeoConfig {
    pub fn new(group_name: impl Into<String>, territories: Vec<String>) -> Self {
        Self {
            group_name: group_name.into(),
            territories,
            no_response: false,
        }
    }

    /// A group that answers queries with an empty response.
    pub fn no_response(group_name: impl Into<String>, territories: Vec<String>) -> Self {
        Self {
            no_response: true,
            ..Self::new(group_name, territories)
        }
    }
}

impl fmt::Display for GeoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "geo(group={}, territories=[{}]",
            self.group_name,
            self.territories.join(", ")
        )?;
        if self.no_response {
            f.write_str(", noResponse")?;
        }
        f.write_str(")")
    }
}

/// A config attached to a record set, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RecordConfig {
    /// Geographic routing.
    Geo(GeoConfig),
}

impl RecordConfig {
    /// The kind name this config is keyed by.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Geo(_) => GEO_KIND,
        }
    }
}

impl fmt::Display for RecordConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Geo(geo) => geo.fmt(f),
        }
    }
}

/// A record set plus the configs that route it. Geo-aware APIs only ever produce
/// values with a non-empty config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecordSetWithConfig {
    #[serde(flatten)]
    pub rrset: ResourceRecordSet,
    /// Configs keyed by [`RecordConfig::kind`].
    pub config: BTreeMap<String, RecordConfig>,
}

impl ResourceRecordSetWithConfig {
    pub fn builder() -> ResourceRecordSetWithConfigBuilder {
        ResourceRecordSetWithConfigBuilder::default()
    }

    /// The geo config, if this record set has one.
    pub fn geo(&self) -> Option<&GeoConfig> {
        match self.config.get(GEO_KIND) {
            Some(RecordConfig::Geo(geo)) => Some(geo),
            None => None,
        }
    }

    /// Whether a config of the given kind is attached.
    pub fn has_config_kind(&self, kind: &str) -> bool {
        self.config.contains_key(kind)
    }

    pub fn name(&self) -> &str {
        &self.rrset.name
    }

    pub fn record_type(&self) -> &str {
        &self.rrset.record_type
    }
}

impl fmt::Display for ResourceRecordSetWithConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.rrset.fmt(f)?;
        for config in self.config.values() {
            write!(f, " {config}")?;
        }
        Ok(())
    }
}

/// Builder for [`ResourceRecordSetWithConfig`].
#[derive(Debug, Clone, Default)]
pub struct ResourceRecordSetWithConfigBuilder {
    rrset: ResourceRecordSetBuilder,
    config: BTreeMap<String, RecordConfig>,
}

impl ResourceRecordSetWithConfigBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.rrset = self.rrset.name(name);
        self
    }

    #[must_use]
    pub fn record_type(mut self, record_type: impl Into<String>) -> Self {
        self.rrset = self.rrset.record_type(record_type);
        self
    }

    #[must_use]
    pub fn ttl(mut self, ttl: Option<u32>) -> Self {
        self.rrset = self.rrset.ttl(ttl);
        self
    }

    #[must_use]
    pub fn add(mut self, rdata: RData) -> Self {
        self.rrset = self.rrset.add(rdata);
        self
    }

    #[must_use]
    pub fn add_all(mut self, rdata: impl IntoIterator<Item = RData>) -> Self {
        self.rrset = self.rrset.add_all(rdata);
        self
    }

    /// Attach a config, replacing any earlier config of the same kind.
    #[must_use]
    pub fn config(mut self, config: RecordConfig) -> Self {
        self.config.insert(config.kind().to_string(), config);
        self
    }

    #[must_use]
    pub fn geo(self, geo: GeoConfig) -> Self {
        self.config(RecordConfig::Geo(geo))
    }

    pub(crate) fn push(&mut self, rdata: RData) {
        self.rrset.push(rdata);
    }

    /// Finish the value.
    ///
    /// Fails when no config is attached, or when a geo config's `no_response`
    /// flag disagrees with whether rdata is empty.
    pub fn build(self) -> Result<ResourceRecordSetWithConfig> {
        let rrset = self.rrset.build()?;
        if self.config.is_empty() {
            return Err(ProviderError::invalid_argument(
                MODEL,
                "config",
                format!("{} {} has no config", rrset.name, rrset.record_type),
            ));
        }
        if let Some(RecordConfig::Geo(geo)) = self.config.get(GEO_KIND) {
            if geo.group_name.is_empty() {
                return Err(ProviderError::invalid_argument(
                    MODEL,
                    "groupName",
                    "must not be empty",
                ));
            }
            if geo.no_response != rrset.rdata.is_empty() {
                return Err(ProviderError::invalid_argument(
                    MODEL,
                    "rdata",
                    format!(
                        "{} {} group {}: rdata must be empty exactly when noResponse is set",
                        rrset.name, rrset.record_type, geo.group_name
                    ),
                ));
            }
            if !geo.no_response && geo.territories.is_empty() {
                return Err(ProviderError::invalid_argument(
                    MODEL,
                    "territories",
                    format!("group {} covers no territories", geo.group_name),
                ));
            }
        }
        Ok(ResourceRecordSetWithConfig {
            rrset,
            config: self.config,
        })
    }
}

// ============ Provider Types ============

/// Identifies which backend implementation to use.
///
/// Each variant is gated behind its corresponding feature flag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    /// In-memory backend. Requires feature `mock`.
    #[cfg(feature = "mock")]
    Mock,
    /// Directional-pool backend. Requires feature `ultradns`.
    #[cfg(feature = "ultradns")]
    Ultradns,
    /// Geo-service backend. Requires feature `dynect`.
    #[cfg(feature = "dynect")]
    Dynect,
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            #[cfg(feature = "mock")]
            Self::Mock => write!(f, "mock"),
            #[cfg(feature = "ultradns")]
            Self::Ultradns => write!(f, "ultradns"),
            #[cfg(feature = "dynect")]
            Self::Dynect => write!(f, "dynect"),
        }
    }
}

// ============ Provider Metadata Types ============

/// Optional capabilities of a provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderFeatures {
    /// Whether the provider exposes geo record sets.
    pub geo: bool,
}

/// Static metadata describing a provider.
///
/// Obtain via [`DnsProvider::metadata()`](crate::DnsProvider::metadata) or
/// [`get_all_provider_metadata()`](crate::get_all_provider_metadata).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderMetadata {
    /// Provider type identifier.
    pub id: ProviderType,
    /// Human-readable provider name.
    pub name: String,
    /// Short description of the provider.
    pub description: String,
    /// Accepted credential shapes, in declaration order. Empty means anonymous.
    pub credential_shapes: Vec<CredentialShape>,
    /// Feature flags for this provider.
    pub features: ProviderFeatures,
}

impl ProviderMetadata {
    /// The catalog [`check_valid_for_provider`](crate::check_valid_for_provider) validates against.
    pub fn credential_catalog(&self) -> CredentialShapeCatalog {
        CredentialShapeCatalog::new(self.id.to_string(), self.credential_shapes.clone())
    }
}
