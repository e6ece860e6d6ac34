//! Provider factory functions and metadata.

use std::sync::Arc;

use crate::credentials::{Credentials, check_valid_for_provider};
use crate::error::{ProviderError, Result};
use crate::traits::DnsProvider;
use crate::types::ProviderMetadata;

#[cfg(any(feature = "ultradns", feature = "dynect"))]
use crate::geo::RegionIndex;
#[cfg(feature = "dynect")]
use crate::providers::DynectProvider;
#[cfg(feature = "mock")]
use crate::providers::MockProvider;
#[cfg(feature = "dynect")]
use crate::providers::dynect::GeoServiceApi;
#[cfg(feature = "mock")]
use crate::providers::mock::MockStore;
#[cfg(feature = "ultradns")]
use crate::providers::UltradnsProvider;
#[cfg(feature = "ultradns")]
use crate::providers::ultradns::DirectionalPoolApi;

/// Which backend to build, with the collaborators it reads from.
///
/// Each variant is gated behind its corresponding feature flag.
pub enum BackendConfig {
    /// In-memory records. Requires feature `mock`.
    #[cfg(feature = "mock")]
    Mock { store: Arc<MockStore> },
    /// Directional pools. Requires feature `ultradns`.
    #[cfg(feature = "ultradns")]
    Ultradns {
        api: Arc<dyn DirectionalPoolApi>,
        regions: Arc<RegionIndex>,
    },
    /// Geo services. Requires feature `dynect`.
    #[cfg(feature = "dynect")]
    Dynect {
        api: Arc<dyn GeoServiceApi>,
        regions: Arc<RegionIndex>,
    },
}

/// Creates a [`DnsProvider`] for `config` once `credentials` fit one of its
/// accepted credential shapes.
///
/// # Errors
///
/// [`ProviderError::InvalidArgument`] with `param = "credentials"` when the
/// credentials are rejected; the detail is the validator's message.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use geodns_provider::{BackendConfig, MockStore, create_provider};
///
/// let store = Arc::new(MockStore::seeded().unwrap());
/// let provider = create_provider(BackendConfig::Mock { store }, None).unwrap();
/// assert_eq!(provider.id(), "mock");
/// ```
pub fn create_provider(
    config: BackendConfig,
    credentials: Option<&Credentials>,
) -> Result<Arc<dyn DnsProvider>> {
    let (metadata, provider): (ProviderMetadata, Arc<dyn DnsProvider>) = match config {
        #[cfg(feature = "mock")]
        BackendConfig::Mock { store } => {
            (MockProvider::metadata(), Arc::new(MockProvider::new(store)))
        }
        #[cfg(feature = "ultradns")]
        BackendConfig::Ultradns { api, regions } => (
            UltradnsProvider::metadata(),
            Arc::new(UltradnsProvider::new(api, regions)),
        ),
        #[cfg(feature = "dynect")]
        BackendConfig::Dynect { api, regions } => (
            DynectProvider::metadata(),
            Arc::new(DynectProvider::new(api, regions)),
        ),
    };

    let catalog = metadata.credential_catalog();
    check_valid_for_provider(credentials, Some(&catalog)).map_err(|e| {
        log::warn!("[{}] rejected credentials: {e}", catalog.provider);
        ProviderError::from_credentials(&catalog.provider, &e)
    })?;
    log::debug!("[{}] provider created", catalog.provider);
    Ok(provider)
}

/// Returns metadata for all providers enabled via feature flags.
pub fn get_all_provider_metadata() -> Vec<ProviderMetadata> {
    vec![
        #[cfg(feature = "mock")]
        MockProvider::metadata(),
        #[cfg(feature = "ultradns")]
        UltradnsProvider::metadata(),
        #[cfg(feature = "dynect")]
        DynectProvider::metadata(),
    ]
}
