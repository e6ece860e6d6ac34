//! Geo record access over directional pools.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::iter;
use std::sync::Arc;

use crate::error::{ProviderError, Result};
use crate::geo::{DirectionalRecord, GroupGeoRecordIter, RegionIndex, TerritoryResolver};
use crate::providers::common::{normalize_record_type, require_non_empty, stop_after_error};
use crate::traits::{GeoRecordIter, GeoResourceRecordSetApi};
use crate::types::ResourceRecordSetWithConfig;

use super::PROVIDER;
use super::types::{
    DirectionalGroupCoordinates, DirectionalPoolApi, DirectionalRecordType, PoolKind,
};

pub(crate) struct UltradnsGeoApi {
    api: Arc<dyn DirectionalPoolApi>,
    regions: Arc<RegionIndex>,
    zone: String,
}

fn group_name(row: &DirectionalRecord) -> Option<&str> {
    row.group_ref().map(|g| g.name.as_str())
}

/// `(type, group name)`; rows without a group sort first so grouping reports them.
fn by_type_and_group(left: &DirectionalRecord, right: &DirectionalRecord) -> Ordering {
    left.record_type
        .cmp(&right.record_type)
        .then_with(|| group_name(left).cmp(&group_name(right)))
}

fn keep_type(record_type: String) -> impl Fn(&Result<ResourceRecordSetWithConfig>) -> bool {
    move |item: &Result<ResourceRecordSetWithConfig>| {
        !matches!(item, Ok(rrset) if rrset.record_type() != record_type)
    }
}

impl UltradnsGeoApi {
    pub(crate) fn new(
        api: Arc<dyn DirectionalPoolApi>,
        regions: Arc<RegionIndex>,
        zone: &str,
    ) -> Self {
        Self {
            api,
            regions,
            zone: zone.to_string(),
        }
    }

    /// One resolver, and so one territory cache, per listing call.
    fn resolver(&self) -> TerritoryResolver {
        let api = Arc::clone(&self.api);
        TerritoryResolver::new(Arc::new(move |group_id: &str| {
            api.territories_for_group_id(group_id)
        }))
        .with_regions(Arc::clone(&self.regions))
    }

    fn check_zone(&self) -> Result<()> {
        if self.api.zone_exists(&self.zone)? {
            Ok(())
        } else {
            log::warn!("[{PROVIDER}] zone {} not found", self.zone);
            Err(ProviderError::zone_not_found(PROVIDER, &self.zone))
        }
    }

    /// Grouped record sets of one bucket of `name`. Fetches when first pulled.
    fn bucket(
        &self,
        name: &str,
        bucket: DirectionalRecordType,
        resolver: TerritoryResolver,
    ) -> GeoRecordIter<'_> {
        log::debug!(
            "[{PROVIDER}] list directional records zone={} name={name} bucket={bucket:?}",
            self.zone
        );
        match self
            .api
            .list_records_by_name_and_type(&self.zone, name, bucket)
        {
            Ok(mut rows) => {
                rows.sort_by(by_type_and_group);
                Box::new(GroupGeoRecordIter::new(PROVIDER, rows, resolver))
            }
            Err(e) => Box::new(iter::once(Err(e))),
        }
    }

    fn buckets(
        &self,
        name: String,
        buckets: Vec<DirectionalRecordType>,
        resolver: TerritoryResolver,
    ) -> impl Iterator<Item = Result<ResourceRecordSetWithConfig>> + '_ {
        buckets
            .into_iter()
            .flat_map(move |bucket| self.bucket(&name, bucket, resolver.clone()))
    }
}

impl GeoResourceRecordSetApi for UltradnsGeoApi {
    fn zone(&self) -> &str {
        &self.zone
    }

    fn supported_types(&self) -> BTreeSet<String> {
        ["A", "AAAA", "CNAME", "MX", "NAPTR", "PTR", "SPF", "SRV", "TXT"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    fn supported_regions(&self) -> BTreeMap<String, Vec<String>> {
        self.regions.as_map().clone()
    }

    fn list(&self) -> Result<GeoRecordIter<'_>> {
        self.check_zone()?;
        log::debug!("[{PROVIDER}] list geo records zone={}", self.zone);
        let pools = self.api.list_pools(&self.zone)?;
        let resolver = self.resolver();
        let records = pools
            .into_iter()
            .filter(|pool| pool.kind == PoolKind::Geolocation)
            .flat_map(move |pool| {
                self.buckets(pool.name, DirectionalRecordType::ALL.to_vec(), resolver.clone())
            });
        Ok(stop_after_error(records))
    }

    fn list_by_name(&self, name: &str) -> Result<GeoRecordIter<'_>> {
        let name = require_non_empty(PROVIDER, "name", name)?;
        self.check_zone()?;
        Ok(stop_after_error(self.buckets(
            name.to_string(),
            DirectionalRecordType::ALL.to_vec(),
            self.resolver(),
        )))
    }

    fn list_by_name_and_type(&self, name: &str, record_type: &str) -> Result<GeoRecordIter<'_>> {
        let name = require_non_empty(PROVIDER, "name", name)?;
        let record_type = normalize_record_type(PROVIDER, record_type)?;
        self.check_zone()?;

        let buckets = DirectionalRecordType::buckets_for(&record_type);
        if buckets.is_empty() {
            log::debug!("[{PROVIDER}] no directional bucket holds {record_type}");
        }
        let records = self
            .buckets(name.to_string(), buckets, self.resolver())
            .filter(keep_type(record_type));
        Ok(stop_after_error(records))
    }

    fn get_by_name_type_and_group(
        &self,
        name: &str,
        record_type: &str,
        group: &str,
    ) -> Result<Option<ResourceRecordSetWithConfig>> {
        let name = require_non_empty(PROVIDER, "name", name)?;
        let record_type = normalize_record_type(PROVIDER, record_type)?;
        let group = require_non_empty(PROVIDER, "group", group)?;
        self.check_zone()?;

        let mut rows = Vec::new();
        for bucket in DirectionalRecordType::buckets_for(&record_type) {
            let coordinates = DirectionalGroupCoordinates {
                zone_name: self.zone.clone(),
                record_name: name.to_string(),
                record_type: bucket.code(),
                group_name: group.to_string(),
            };
            rows.extend(self.api.list_records_by_group(&coordinates)?);
        }
        rows.retain(|row| row.record_type == record_type);

        GroupGeoRecordIter::new(PROVIDER, rows, self.resolver())
            .next()
            .transpose()
    }
}
