//! In-memory zone → record set storage.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::error::{ProviderError, Result};
use crate::types::{GeoConfig, RData, ResourceRecordSetWithConfig};
use crate::utils::log_sanitizer::truncate_for_log;

use super::PROVIDER;

/// Zone name → record sets. Readers run concurrently; writers are exclusive.
#[derive(Debug, Default)]
pub struct MockStore {
    zones: RwLock<HashMap<String, Vec<ResourceRecordSetWithConfig>>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding the `denominator.io.` demo zone.
    pub fn seeded() -> Result<Self> {
        let store = Self::new();
        let zone = "denominator.io.";
        store.add_zone(zone);
        for rrset in seed_records()? {
            store.put(zone, rrset)?;
        }
        Ok(store)
    }

    /// Create an empty zone. Existing zones are left untouched.
    pub fn add_zone(&self, zone: &str) {
        self.zones
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(zone.to_string())
            .or_default();
    }

    /// Add a record set to an existing zone.
    pub fn put(&self, zone: &str, rrset: ResourceRecordSetWithConfig) -> Result<()> {
        let mut zones = self.zones.write().unwrap_or_else(PoisonError::into_inner);
        let records = zones
            .get_mut(zone)
            .ok_or_else(|| ProviderError::zone_not_found(PROVIDER, zone))?;
        log::debug!(
            "[{PROVIDER}] put {zone} {}",
            truncate_for_log(&rrset.to_string())
        );
        records.push(rrset);
        Ok(())
    }

    pub fn contains_zone(&self, zone: &str) -> bool {
        self.zones
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(zone)
    }

    pub fn zones(&self) -> Vec<String> {
        let mut zones: Vec<String> = self
            .zones
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        zones.sort();
        zones
    }

    /// Copy of the record sets of `zone` that match `filter`, in insertion order.
    pub(crate) fn snapshot(
        &self,
        zone: &str,
        filter: impl Fn(&ResourceRecordSetWithConfig) -> bool,
    ) -> Result<Vec<ResourceRecordSetWithConfig>> {
        let zones = self.zones.read().unwrap_or_else(PoisonError::into_inner);
        let records = zones
            .get(zone)
            .ok_or_else(|| ProviderError::zone_not_found(PROVIDER, zone))?;
        Ok(records.iter().filter(|r| filter(r)).cloned().collect())
    }
}

fn rdata(key: &str, value: &str) -> RData {
    RData::from([(key.to_string(), serde_json::Value::from(value))])
}

fn seed_records() -> Result<Vec<ResourceRecordSetWithConfig>> {
    let alazona = GeoConfig::new("alazona", vec!["Alaska".into(), "Arizona".into()]);
    let columbador = GeoConfig::new("columbador", vec!["Colombia".into(), "Ecuador".into()]);
    let antarctica = GeoConfig::new(
        "antarctica",
        vec![
            "Bouvet Island".into(),
            "French Southern Territories".into(),
            "Antarctica".into(),
        ],
    );

    Ok(vec![
        ResourceRecordSetWithConfig::builder()
            .name("www2.geo.denominator.io.")
            .record_type("A")
            .ttl(Some(300))
            .add(rdata("address", "192.0.2.1"))
            .geo(alazona.clone())
            .build()?,
        ResourceRecordSetWithConfig::builder()
            .name("www.geo.denominator.io.")
            .record_type("CNAME")
            .ttl(Some(300))
            .add(rdata("cname", "a.denominator.io."))
            .geo(alazona)
            .build()?,
        ResourceRecordSetWithConfig::builder()
            .name("www.geo.denominator.io.")
            .record_type("CNAME")
            .ttl(Some(86400))
            .add(rdata("cname", "b.denominator.io."))
            .geo(columbador)
            .build()?,
        ResourceRecordSetWithConfig::builder()
            .name("www.geo.denominator.io.")
            .record_type("CNAME")
            .ttl(Some(0))
            .add(rdata("cname", "c.denominator.io."))
            .geo(antarctica)
            .build()?,
    ])
}
