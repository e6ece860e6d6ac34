//! Geo record access over geo services.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use crate::error::{ProviderError, Result};
use crate::geo::{DirectionalGroup, DirectionalRecord, GroupGeoRecordIter, RegionIndex, TerritoryResolver};
use crate::providers::common::{names_equal, normalize_record_type, require_non_empty};
use crate::traits::{GeoRecordIter, GeoResourceRecordSetApi};
use crate::types::ResourceRecordSetWithConfig;

use super::PROVIDER;
use super::types::{GeoRegionGroup, GeoService, GeoServiceApi, Node};

/// Which nodes, groups and record types a listing covers.
#[derive(Debug, Default)]
struct Query {
    name: Option<String>,
    record_type: Option<String>,
    group: Option<String>,
}

impl Query {
    fn node(&self, zone: &str, node: &Node) -> bool {
        node.zone == zone && self.name.as_ref().is_none_or(|n| names_equal(&node.fqdn, n))
    }

    fn group(&self, group: &GeoRegionGroup) -> bool {
        self.group.as_ref().is_none_or(|g| *g == group.name)
    }

    fn record_type(&self, record_type: &str) -> bool {
        self.record_type.as_ref().is_none_or(|t| t == record_type)
    }
}

fn group_id(service: &GeoService, group: &GeoRegionGroup) -> String {
    format!("{}/{}", service.name, group.name)
}

/// Native rows of one service, one per value per node, runs kept contiguous.
fn service_rows(service: &GeoService, query: &Query, zone: &str) -> Vec<DirectionalRecord> {
    let nodes: Vec<&Node> = service.nodes.iter().filter(|n| query.node(zone, n)).collect();
    let mut rows = Vec::new();
    for group in service.groups.iter().filter(|g| query.group(g)) {
        let directional = DirectionalGroup::new(group_id(service, group), group.name.clone());
        for record_set in group
            .record_sets
            .iter()
            .filter(|rs| query.record_type(&rs.record_type))
        {
            for node in &nodes {
                let row = |rdata: Vec<String>, no_response: bool| DirectionalRecord {
                    name: node.fqdn.clone(),
                    record_type: record_set.record_type.clone(),
                    ttl: record_set.ttl,
                    rdata,
                    no_response,
                    geolocation_group: Some(directional.clone()),
                    group: None,
                };
                if record_set.values.is_empty() {
                    rows.push(row(Vec::new(), true));
                } else {
                    rows.extend(record_set.values.iter().map(|v| row(v.clone(), false)));
                }
            }
        }
    }
    rows
}

pub(crate) struct DynectGeoApi {
    api: Arc<dyn GeoServiceApi>,
    regions: Arc<RegionIndex>,
    zone: String,
}

impl DynectGeoApi {
    pub(crate) fn new(api: Arc<dyn GeoServiceApi>, regions: Arc<RegionIndex>, zone: &str) -> Self {
        Self {
            api,
            regions,
            zone: zone.to_string(),
        }
    }

    fn check_zone(&self) -> Result<()> {
        if self.api.zone_exists(&self.zone)? {
            Ok(())
        } else {
            log::warn!("[{PROVIDER}] zone {} not found", self.zone);
            Err(ProviderError::zone_not_found(PROVIDER, &self.zone))
        }
    }

    /// Services touching this zone, flattened to rows and grouped lazily.
    fn transform(&self, query: Query) -> Result<GeoRecordIter<'_>> {
        self.check_zone()?;
        log::debug!("[{PROVIDER}] list geo services zone={} {query:?}", self.zone);

        let services: Vec<GeoService> = self
            .api
            .list_services()?
            .into_iter()
            .filter(|s| s.nodes.iter().any(|n| query.node(&self.zone, n)))
            .collect();

        let countries: HashMap<String, Vec<String>> = services
            .iter()
            .flat_map(|s| {
                s.groups
                    .iter()
                    .map(move |g| (group_id(s, g), g.countries.clone()))
            })
            .collect();
        let resolver = TerritoryResolver::new(Arc::new(move |id: &str| {
            countries.get(id).cloned().ok_or_else(|| ProviderError::Backend {
                provider: PROVIDER.to_string(),
                detail: format!("no region group {id}"),
            })
        }))
        .with_regions(Arc::clone(&self.regions));

        let zone = self.zone.clone();
        let rows = services
            .into_iter()
            .flat_map(move |service| service_rows(&service, &query, &zone));
        Ok(Box::new(GroupGeoRecordIter::new(PROVIDER, rows, resolver)))
    }
}

impl GeoResourceRecordSetApi for DynectGeoApi {
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
        self.regions.as_map().clone()
    }

    fn list(&self) -> Result<GeoRecordIter<'_>> {
        self.transform(Query::default())
    }

    fn list_by_name(&self, name: &str) -> Result<GeoRecordIter<'_>> {
        let name = require_non_empty(PROVIDER, "name", name)?;
        self.transform(Query {
            name: Some(name.to_string()),
            ..Query::default()
        })
    }

    fn list_by_name_and_type(&self, name: &str, record_type: &str) -> Result<GeoRecordIter<'_>> {
        let name = require_non_empty(PROVIDER, "name", name)?;
        let record_type = normalize_record_type(PROVIDER, record_type)?;
        self.transform(Query {
            name: Some(name.to_string()),
            record_type: Some(record_type),
            group: None,
        })
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
        self.transform(Query {
            name: Some(name.to_string()),
            record_type: Some(record_type),
            group: Some(group.to_string()),
        })?
        .next()
        .transpose()
    }
}
