//! Dynect DnsProvider trait 实现

use std::sync::Arc;

use crate::credentials::CredentialShape;
use crate::error::Result;
use crate::providers::common::require_non_empty;
use crate::traits::{DnsProvider, GeoResourceRecordSetApi};
use crate::types::{ProviderFeatures, ProviderMetadata, ProviderType};

use super::geo::DynectGeoApi;
use super::{DynectProvider, PROVIDER};

impl DnsProvider for DynectProvider {
    fn id(&self) -> &'static str {
        PROVIDER
    }

    fn metadata() -> ProviderMetadata {
        ProviderMetadata {
            id: ProviderType::Dynect,
            name: "DynECT".to_string(),
            description: "Geo services answering region groups across zones".to_string(),
            credential_shapes: vec![CredentialShape::new(
                "password",
                ["customer", "username", "password"],
            )],
            features: ProviderFeatures { geo: true },
        }
    }

    fn geo_api_for_zone(&self, zone: &str) -> Result<Option<Arc<dyn GeoResourceRecordSetApi>>> {
        let zone = require_non_empty(PROVIDER, "zone", zone)?;
        Ok(Some(Arc::new(DynectGeoApi::new(
            Arc::clone(&self.api),
            Arc::clone(&self.regions),
            zone,
        ))))
    }
}
