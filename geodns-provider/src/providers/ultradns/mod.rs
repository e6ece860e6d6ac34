//! Directional pool provider
//!
//! Rows live in per-type buckets (`IPV4`, `IPV6`, `MX`, ...). The address buckets
//! also hold CNAME rows, which the geo engine separates again by record type.

mod geo;
mod memory;
mod provider;
mod types;

use std::sync::Arc;

use crate::geo::RegionIndex;

pub use memory::InMemoryDirectionalPools;
pub use types::{
    DirectionalGroupCoordinates, DirectionalPool, DirectionalPoolApi, DirectionalRecordType,
    PoolKind,
};

pub(crate) const PROVIDER: &str = "ultradns";

/// Directional pool provider
pub struct UltradnsProvider {
    pub(crate) api: Arc<dyn DirectionalPoolApi>,
    pub(crate) regions: Arc<RegionIndex>,
}

impl UltradnsProvider {
    pub fn new(api: Arc<dyn DirectionalPoolApi>, regions: Arc<RegionIndex>) -> Self {
        Self { api, regions }
    }
}
