//! Mock DnsProvider trait 实现

use std::sync::Arc;

use crate::error::{ProviderError, Result};
use crate::traits::{DnsProvider, GeoResourceRecordSetApi};
use crate::types::{ProviderFeatures, ProviderMetadata, ProviderType};

use super::geo::MockGeoApi;
use super::{MockProvider, PROVIDER};

impl DnsProvider for MockProvider {
    fn id(&self) -> &'static str {
        PROVIDER
    }

    fn metadata() -> ProviderMetadata {
        ProviderMetadata {
            id: ProviderType::Mock,
            name: "Mock".to_string(),
            description: "In-memory geo records for tests and demos".to_string(),
            credential_shapes: Vec::new(),
            features: ProviderFeatures { geo: true },
        }
    }

    fn geo_api_for_zone(&self, zone: &str) -> Result<Option<Arc<dyn GeoResourceRecordSetApi>>> {
        if !self.store.contains_zone(zone) {
            log::warn!("[{PROVIDER}] zone {zone} not found");
            return Err(ProviderError::zone_not_found(PROVIDER, zone));
        }
        Ok(Some(Arc::new(MockGeoApi::new(Arc::clone(&self.store), zone))))
    }
}
