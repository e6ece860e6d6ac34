//! In-memory [`DirectionalPoolApi`].

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::error::{ProviderError, Result};
use crate::geo::DirectionalRecord;
use crate::providers::common::names_equal;

use super::PROVIDER;
use super::types::{
    DirectionalGroupCoordinates, DirectionalPool, DirectionalPoolApi, DirectionalRecordType,
    PoolKind,
};

#[derive(Debug, Default)]
struct ZonePools {
    pools: Vec<DirectionalPool>,
    rows: Vec<(DirectionalRecordType, DirectionalRecord)>,
}

#[derive(Debug, Default)]
struct State {
    zones: HashMap<String, ZonePools>,
    territories: HashMap<String, Vec<String>>,
}

/// Directional pools held in memory, for tests and demos.
#[derive(Debug, Default)]
pub struct InMemoryDirectionalPools {
    state: RwLock<State>,
}

impl InMemoryDirectionalPools {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_zone(&self, zone: &str) {
        self.write().zones.entry(zone.to_string()).or_default();
    }

    pub fn add_pool(&self, zone: &str, pool: DirectionalPool) -> Result<()> {
        let mut state = self.write();
        let zone_pools = Self::zone_mut(&mut state, zone)?;
        if !zone_pools.pools.iter().any(|p| names_equal(&p.name, &pool.name)) {
            zone_pools.pools.push(pool);
        }
        Ok(())
    }

    /// Store a row under `bucket`. A name without a pool gets a geolocation pool.
    pub fn add_record(
        &self,
        zone: &str,
        bucket: DirectionalRecordType,
        record: DirectionalRecord,
    ) -> Result<()> {
        let mut state = self.write();
        let zone_pools = Self::zone_mut(&mut state, zone)?;
        if !zone_pools
            .pools
            .iter()
            .any(|p| names_equal(&p.name, &record.name))
        {
            zone_pools.pools.push(DirectionalPool {
                name: record.name.clone(),
                kind: PoolKind::Geolocation,
            });
        }
        zone_pools.rows.push((bucket, record));
        Ok(())
    }

    pub fn set_territories(&self, group_id: &str, territories: Vec<String>) {
        self.write()
            .territories
            .insert(group_id.to_string(), territories);
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn zone_mut<'a>(state: &'a mut State, zone: &str) -> Result<&'a mut ZonePools> {
        state
            .zones
            .get_mut(zone)
            .ok_or_else(|| ProviderError::zone_not_found(PROVIDER, zone))
    }

    fn rows_where(
        &self,
        zone: &str,
        keep: impl Fn(DirectionalRecordType, &DirectionalRecord) -> bool,
    ) -> Result<Vec<DirectionalRecord>> {
        let state = self.read();
        let zone_pools = state
            .zones
            .get(zone)
            .ok_or_else(|| ProviderError::zone_not_found(PROVIDER, zone))?;
        Ok(zone_pools
            .rows
            .iter()
            .filter(|(bucket, row)| keep(*bucket, row))
            .map(|(_, row)| row.clone())
            .collect())
    }
}

impl DirectionalPoolApi for InMemoryDirectionalPools {
    fn zone_exists(&self, zone: &str) -> Result<bool> {
        Ok(self.read().zones.contains_key(zone))
    }

    fn list_pools(&self, zone: &str) -> Result<Vec<DirectionalPool>> {
        let state = self.read();
        state
            .zones
            .get(zone)
            .map(|z| z.pools.clone())
            .ok_or_else(|| ProviderError::zone_not_found(PROVIDER, zone))
    }

    fn list_records_by_name_and_type(
        &self,
        zone: &str,
        name: &str,
        bucket: DirectionalRecordType,
    ) -> Result<Vec<DirectionalRecord>> {
        self.rows_where(zone, |b, row| b == bucket && names_equal(&row.name, name))
    }

    fn list_records_by_group(
        &self,
        coordinates: &DirectionalGroupCoordinates,
    ) -> Result<Vec<DirectionalRecord>> {
        self.rows_where(&coordinates.zone_name, |b, row| {
            b.code() == coordinates.record_type
                && names_equal(&row.name, &coordinates.record_name)
                && row
                    .group_ref()
                    .is_some_and(|g| g.name == coordinates.group_name)
        })
    }

    fn territories_for_group_id(&self, group_id: &str) -> Result<Vec<String>> {
        self.read()
            .territories
            .get(group_id)
            .cloned()
            .ok_or_else(|| ProviderError::Backend {
                provider: PROVIDER.to_string(),
                detail: format!("no directional group {group_id}"),
            })
    }
}
