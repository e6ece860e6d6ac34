//! Geo service provider
//!
//! A geo service spans nodes in any number of zones and answers each region
//! group with its own record sets.

mod geo;
mod memory;
mod provider;
mod types;

use std::sync::Arc;

use crate::geo::RegionIndex;

pub use memory::InMemoryGeoServices;
pub use types::{GeoRecordSet, GeoRegionGroup, GeoService, GeoServiceApi, Node};

pub(crate) const PROVIDER: &str = "dynect";

/// Geo service provider
pub struct DynectProvider {
    pub(crate) api: Arc<dyn GeoServiceApi>,
    pub(crate) regions: Arc<RegionIndex>,
}

impl DynectProvider {
    pub fn new(api: Arc<dyn GeoServiceApi>, regions: Arc<RegionIndex>) -> Self {
        Self { api, regions }
    }
}
