//! Geo service native types and the collaborator that serves them.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A name a geo service answers for. Services may span several zones.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node {
    pub zone: String,
    pub fqdn: String,
}

impl Node {
    pub fn new(zone: impl Into<String>, fqdn: impl Into<String>) -> Self {
        Self {
            zone: zone.into(),
            fqdn: fqdn.into(),
        }
    }
}

/// Records of one type answered to a region group. The record set carries no
/// owner name; it applies to every node of the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoRecordSet {
    #[serde(rename = "type")]
    pub record_type: String,
    pub ttl: Option<u32>,
    /// Positional rdata of each value. No values means "answer with nothing".
    pub values: Vec<Vec<String>>,
}

/// Countries (or a single region name) and the record sets answered to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoRegionGroup {
    pub name: String,
    pub countries: Vec<String>,
    pub record_sets: Vec<GeoRecordSet>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoService {
    pub name: String,
    pub nodes: Vec<Node>,
    pub groups: Vec<GeoRegionGroup>,
}

/// Backend serving geo services, implemented by the vendor client.
pub trait GeoServiceApi: Send + Sync {
    fn zone_exists(&self, zone: &str) -> Result<bool>;

    /// Every geo service of the account, across all zones.
    fn list_services(&self) -> Result<Vec<GeoService>>;
}
