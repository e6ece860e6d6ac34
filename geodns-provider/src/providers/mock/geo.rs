//! Geo record access backed by [`MockStore`].

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::error::Result;
use crate::providers::common::{
    names_equal, normalize_record_type, require_non_empty, sort_by_display,
};
use crate::traits::{GeoRecordIter, GeoResourceRecordSetApi};
use crate::types::{GEO_KIND, ResourceRecordSetWithConfig};

use super::{MockStore, PROVIDER};

pub(crate) struct MockGeoApi {
    store: Arc<MockStore>,
    zone: String,
}

impl MockGeoApi {
    pub(crate) fn new(store: Arc<MockStore>, zone: &str) -> Self {
        Self {
            store,
            zone: zone.to_string(),
        }
    }

    /// Sorted snapshot of the geo record sets matching `filter`.
    fn sorted(
        &self,
        filter: impl Fn(&ResourceRecordSetWithConfig) -> bool,
    ) -> Result<GeoRecordIter<'_>> {
        let mut records = self
            .store
            .snapshot(&self.zone, |r| r.has_config_kind(GEO_KIND) && filter(r))?;
        sort_by_display(&mut records);
        log::debug!(
            "[{PROVIDER}] {} geo records in zone={}",
            records.len(),
            self.zone
        );
        Ok(Box::new(records.into_iter().map(Ok)))
    }
}

impl GeoResourceRecordSetApi for MockGeoApi {
    fn zone(&self) -> &str {
        &self.zone
    }

    fn supported_types(&self) -> BTreeSet<String> {
        ["A", "AAAA", "CNAME", "MX", "NS", "PTR", "SPF", "SRV", "TXT"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    fn supported_regions(&self) -> BTreeMap<String, Vec<String>> {
        let mut regions: BTreeMap<String, Vec<String>> = BTreeMap::new();
        if let Ok(records) = self.store.snapshot(&self.zone, |_| true) {
            for geo in records.iter().filter_map(ResourceRecordSetWithConfig::geo) {
                let territories = regions.entry(geo.group_name.clone()).or_default();
                for territory in &geo.territories {
                    if !territories.contains(territory) {
                        territories.push(territory.clone());
                    }
                }
            }
        }
        regions
    }

    fn list(&self) -> Result<GeoRecordIter<'_>> {
        log::debug!("[{PROVIDER}] list geo records zone={}", self.zone);
        self.sorted(|_| true)
    }

    fn list_by_name(&self, name: &str) -> Result<GeoRecordIter<'_>> {
        let name = require_non_empty(PROVIDER, "name", name)?;
        self.sorted(|r| names_equal(r.name(), name))
    }

    fn list_by_name_and_type(&self, name: &str, record_type: &str) -> Result<GeoRecordIter<'_>> {
        let name = require_non_empty(PROVIDER, "name", name)?;
        let record_type = normalize_record_type(PROVIDER, record_type)?;
        self.sorted(|r| names_equal(r.name(), name) && r.record_type() == record_type)
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
        let found = self.store.snapshot(&self.zone, |r| {
            names_equal(r.name(), name)
                && r.record_type() == record_type
                && r.geo().is_some_and(|geo| geo.group_name == group)
        })?;
        Ok(found.into_iter().next())
    }
}
