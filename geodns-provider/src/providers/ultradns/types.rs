//! Directional pool native types and the collaborator that serves them.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geo::DirectionalRecord;
use crate::providers::common::record_type_code;

/// Bucket a directional row is stored under.
///
/// Address buckets also hold CNAME rows, so one bucket can yield two record types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DirectionalRecordType {
    Ipv4,
    Ipv6,
    Mx,
    Txt,
    Srv,
    Ptr,
    Naptr,
    Spf,
}

impl DirectionalRecordType {
    /// Every bucket, in listing order.
    pub const ALL: [Self; 8] = [
        Self::Ipv4,
        Self::Ipv6,
        Self::Mx,
        Self::Txt,
        Self::Srv,
        Self::Ptr,
        Self::Naptr,
        Self::Spf,
    ];

    /// Numeric record type code of the bucket.
    pub const fn code(self) -> u16 {
        match self {
            Self::Ipv4 => 1,
            Self::Ipv6 => 28,
            Self::Mx => 15,
            Self::Txt => 16,
            Self::Srv => 33,
            Self::Ptr => 12,
            Self::Naptr => 35,
            Self::Spf => 99,
        }
    }

    pub fn from_code(code: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    /// Bucket holding rows of `record_type`. `CNAME` has no single bucket.
    pub fn for_record_type(record_type: &str) -> Option<Self> {
        record_type_code(record_type).and_then(Self::from_code)
    }

    /// Buckets to read for a query of `record_type`.
    pub fn buckets_for(record_type: &str) -> Vec<Self> {
        if record_type == "CNAME" {
            vec![Self::Ipv4, Self::Ipv6]
        } else {
            Self::for_record_type(record_type).into_iter().collect()
        }
    }
}

/// How a pool routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PoolKind {
    Geolocation,
    SourceIp,
}

/// A directional pool. Its name is the owner name of the records it holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionalPool {
    pub name: String,
    pub kind: PoolKind,
}

/// Address of the rows of one group of one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectionalGroupCoordinates {
    pub zone_name: String,
    pub record_name: String,
    /// Numeric type code, as in [`DirectionalRecordType::code`].
    pub record_type: u16,
    pub group_name: String,
}

/// Backend serving directional pools, implemented by the vendor client.
///
/// Rows are returned in backend order; the geo engine sorts them.
pub trait DirectionalPoolApi: Send + Sync {
    fn zone_exists(&self, zone: &str) -> Result<bool>;

    fn list_pools(&self, zone: &str) -> Result<Vec<DirectionalPool>>;

    fn list_records_by_name_and_type(
        &self,
        zone: &str,
        name: &str,
        bucket: DirectionalRecordType,
    ) -> Result<Vec<DirectionalRecord>>;

    fn list_records_by_group(
        &self,
        coordinates: &DirectionalGroupCoordinates,
    ) -> Result<Vec<DirectionalRecord>>;

    fn territories_for_group_id(&self, group_id: &str) -> Result<Vec<String>>;
}
