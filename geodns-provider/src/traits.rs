use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::error::Result;
use crate::types::{ProviderMetadata, ResourceRecordSetWithConfig};

/// Lazy, forward-only sequence of geo record sets.
///
/// Stop pulling to abandon a listing; nothing needs to be closed.
pub type GeoRecordIter<'a> = Box<dyn Iterator<Item = Result<ResourceRecordSetWithConfig>> + 'a>;

/// Read access to the geo record sets of one zone.
///
/// Every operation fails with [`ZoneNotFound`](crate::ProviderError::ZoneNotFound)
/// before yielding anything when the zone does not exist. Listings are ordered
/// deterministically for unchanged backend data.
pub trait GeoResourceRecordSetApi: Send + Sync {
    /// Zone this handle reads.
    fn zone(&self) -> &str;

    /// Record types that can carry a geo config on this backend.
    fn supported_types(&self) -> BTreeSet<String>;

    /// Region name → territories this backend can route on.
    fn supported_regions(&self) -> BTreeMap<String, Vec<String>>;

    /// Every geo record set in the zone.
    fn list(&self) -> Result<GeoRecordIter<'_>>;

    /// Geo record sets named `name`; empty when there are none.
    fn list_by_name(&self, name: &str) -> Result<GeoRecordIter<'_>>;

    /// Geo record sets named `name` of type `record_type`.
    ///
    /// `CNAME` and address types are told apart even when the backend stores them
    /// together. Unknown types yield an empty sequence.
    fn list_by_name_and_type(&self, name: &str, record_type: &str) -> Result<GeoRecordIter<'_>>;

    /// The record set of `name`/`record_type` routed by `group`, if any.
    ///
    /// Absence is `Ok(None)`, never an error.
    fn get_by_name_type_and_group(
        &self,
        name: &str,
        record_type: &str,
        group: &str,
    ) -> Result<Option<ResourceRecordSetWithConfig>>;
}

/// DNS 提供商 Trait
pub trait DnsProvider: Send + Sync {
    /// 提供商标识符
    fn id(&self) -> &'static str;

    /// 获取 Provider 元数据（类型级别）
    ///
    /// 返回该 Provider 的元数据，包括名称、描述、凭证形态等。
    /// 此方法不需要实例，可以在创建 Provider 之前调用。
    fn metadata() -> ProviderMetadata
    where
        Self: Sized;

    /// Geo record access for `zone`.
    ///
    /// `Ok(None)` means the backend has no geo support, which is a normal outcome.
    fn geo_api_for_zone(&self, zone: &str) -> Result<Option<Arc<dyn GeoResourceRecordSetApi>>>;
}
