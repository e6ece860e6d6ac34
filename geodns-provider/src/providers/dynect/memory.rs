//! In-memory [`GeoServiceApi`].

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{PoisonError, RwLock};

use crate::error::{ProviderError, Result};

use super::PROVIDER;
use super::types::{GeoService, GeoServiceApi};

#[derive(Debug, Default)]
struct State {
    zones: BTreeSet<String>,
    services: BTreeMap<String, GeoService>,
}

/// Geo services held in memory, for tests and demos. Listed by service name.
#[derive(Debug, Default)]
pub struct InMemoryGeoServices {
    state: RwLock<State>,
}

impl InMemoryGeoServices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_zone(&self, zone: &str) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .zones
            .insert(zone.to_string());
    }

    /// Add or replace a service. Every node must sit in a known zone.
    pub fn put_service(&self, service: GeoService) -> Result<()> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(node) = service.nodes.iter().find(|n| !state.zones.contains(&n.zone)) {
            return Err(ProviderError::zone_not_found(PROVIDER, &node.zone));
        }
        state.services.insert(service.name.clone(), service);
        Ok(())
    }
}

impl GeoServiceApi for InMemoryGeoServices {
    fn zone_exists(&self, zone: &str) -> Result<bool> {
        Ok(self
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .zones
            .contains(zone))
    }

    fn list_services(&self) -> Result<Vec<GeoService>> {
        Ok(self
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .services
            .values()
            .cloned()
            .collect())
    }
}
