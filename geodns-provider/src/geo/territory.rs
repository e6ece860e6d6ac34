//! Group id → territory resolution with a per-call cache.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{ProviderError, Result};

/// Loads the territory codes of a geo group from the backend.
pub trait TerritoryLoader: Send + Sync {
    fn territories_for_group_id(&self, group_id: &str) -> Result<Vec<String>>;
}

impl<F> TerritoryLoader for F
where
    F: Fn(&str) -> Result<Vec<String>> + Send + Sync,
{
    fn territories_for_group_id(&self, group_id: &str) -> Result<Vec<String>> {
        self(group_id)
    }
}

/// Region name → countries of that region.
///
/// Deserializes from a plain JSON object:
///
/// ```json
/// { "Antarctica": ["Bouvet Island", "French Southern Territories", "Antarctica"] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionIndex {
    regions: BTreeMap<String, Vec<String>>,
}

impl RegionIndex {
    pub fn new(regions: BTreeMap<String, Vec<String>>) -> Self {
        Self { regions }
    }

    /// Parse a region table from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            ProviderError::invalid_argument("config", "regions", format!("invalid region table: {e}"))
        })
    }

    /// Whether `code` names a region rather than a country.
    pub fn is_region(&self, code: &str) -> bool {
        self.regions.contains_key(code)
    }

    /// Countries of `region`, if it is known.
    pub fn countries(&self, region: &str) -> Option<&[String]> {
        self.regions.get(region).map(Vec::as_slice)
    }

    /// The region `country` belongs to.
    pub fn region_of(&self, country: &str) -> Option<&str> {
        self.regions
            .iter()
            .find(|(_, countries)| countries.iter().any(|c| c == country))
            .map(|(region, _)| region.as_str())
    }

    pub fn as_map(&self) -> &BTreeMap<String, Vec<String>> {
        &self.regions
    }

    /// Apply the "whole region" shortcut: a list made of exactly one region name
    /// stands for every country of that region. Anything else is returned as-is.
    pub fn expand(&self, codes: Vec<String>) -> Vec<String> {
        if let [only] = codes.as_slice()
            && let Some(countries) = self.countries(only)
        {
            return countries.to_vec();
        }
        codes
    }
}

/// Resolves group ids to territories for one listing call.
///
/// Clones share one cache, so every iterator spawned by the same call asks the
/// loader at most once per group id. A new call builds a new resolver and sees
/// fresh data. Failed loads are not cached.
#[derive(Clone)]
pub struct TerritoryResolver {
    loader: Arc<dyn TerritoryLoader>,
    regions: Option<Arc<RegionIndex>>,
    cache: Rc<RefCell<HashMap<String, Vec<String>>>>,
}

impl TerritoryResolver {
    pub fn new(loader: Arc<dyn TerritoryLoader>) -> Self {
        Self {
            loader,
            regions: None,
            cache: Rc::default(),
        }
    }

    /// Enable the whole-region shortcut.
    #[must_use]
    pub fn with_regions(mut self, regions: Arc<RegionIndex>) -> Self {
        self.regions = Some(regions);
        self
    }

    pub fn resolve(&self, group_id: &str) -> Result<Vec<String>> {
        if let Some(hit) = self.cache.borrow().get(group_id) {
            return Ok(hit.clone());
        }

        log::trace!("loading territories for group {group_id}");
        let loaded = self.loader.territories_for_group_id(group_id)?;
        let territories = match &self.regions {
            Some(regions) => regions.expand(loaded),
            None => loaded,
        };
        self.cache
            .borrow_mut()
            .insert(group_id.to_string(), territories.clone());
        Ok(territories)
    }
}

impl std::fmt::Debug for TerritoryResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerritoryResolver")
            .field("regions", &self.regions)
            .field("cached", &self.cache.borrow().len())
            .finish_non_exhaustive()
    }
}
