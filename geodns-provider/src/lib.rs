//! # geodns-provider
//!
//! Provider-agnostic normalization of geo (directional) DNS records.
//!
//! Backends store geo answers in their own shapes: one row per value in a
//! directional pool, or region groups inside a geo service. This crate turns
//! those rows into uniform [`ResourceRecordSetWithConfig`] values, one per
//! `(name, type, group)`, each carrying a [`GeoConfig`] with the territories
//! the group answers for.
//!
//! ## Supported Providers
//!
//! | Provider | Feature Flag | Credential Shapes |
//! |----------|-------------|-------------------|
//! | In-memory mock | `mock` | anonymous |
//! | Directional pools (UltraDNS style) | `ultradns` | `password`: username, password |
//! | Geo services (DynECT style) | `dynect` | `password`: customer, username, password |
//!
//! ## Feature Flags
//!
//! - **`all-providers`** *(default)*: enable all providers listed above.
//! - **`mock`**, **`ultradns`**, **`dynect`**: enable a single provider.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use geodns_provider::{BackendConfig, MockStore, create_provider};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Create a provider; the mock accepts no credentials
//!     let store = Arc::new(MockStore::seeded()?);
//!     let provider = create_provider(BackendConfig::Mock { store }, None)?;
//!
//!     // 2. Geo record sets of one zone
//!     let Some(geo) = provider.geo_api_for_zone("denominator.io.")? else {
//!         return Ok(());
//!     };
//!
//!     // 3. Listings are lazy; each item is a Result
//!     for rrset in geo.list_by_name_and_type("www.geo.denominator.io.", "CNAME")? {
//!         let rrset = rrset?;
//!         println!("{rrset}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Credentials
//!
//! [`check_valid_for_provider`] checks that credentials fit one of the shapes
//! a provider declares, before any backend is touched:
//!
//! ```rust
//! use geodns_provider::{CredentialShapeCatalog, Credentials, check_valid_for_provider};
//!
//! let catalog = CredentialShapeCatalog::new("ultradns", vec![])
//!     .with_shape("password", ["username", "password"]);
//!
//! let creds = Credentials::list(["joe", "letmein"]);
//! assert!(check_valid_for_provider(Some(&creds), Some(&catalog)).is_ok());
//!
//! let err = check_valid_for_provider(None, Some(&catalog)).unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "no credentials supplied. password requires username, password"
//! );
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ProviderError>`](ProviderError):
//!
//! - [`ProviderError::ZoneNotFound`]: the zone does not exist in the backend
//! - [`ProviderError::InvalidArgument`]: a blank argument, bad rdata, or rejected credentials
//! - [`ProviderError::ContractViolation`]: backend rows that cannot be normalized
//! - [`ProviderError::UnsupportedRecordType`]: rdata of an unknown record type
//!
//! A listing that hits an error yields it once and then ends.

mod credentials;
mod error;
mod factory;
pub mod geo;
mod providers;
pub mod rdata;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ProviderError, Result};

// Re-export credential checking
pub use credentials::{
    CredentialShape, CredentialShapeCatalog, CredentialValidationError, Credentials,
    check_valid_for_provider,
};

// Re-export factory functions
pub use factory::{BackendConfig, create_provider, get_all_provider_metadata};

// Re-export core traits
pub use traits::{DnsProvider, GeoRecordIter, GeoResourceRecordSetApi};

// Re-export types
pub use types::{
    GEO_KIND, GeoConfig, ProviderFeatures, ProviderMetadata, ProviderType, RData, RecordConfig,
    ResourceRecordSet, ResourceRecordSetBuilder, ResourceRecordSetWithConfig,
    ResourceRecordSetWithConfigBuilder,
};

// Re-export concrete providers (behind feature flags)
#[cfg(feature = "mock")]
pub use providers::{MockProvider, mock::MockStore};

#[cfg(feature = "ultradns")]
pub use providers::{
    UltradnsProvider,
    ultradns::{
        DirectionalGroupCoordinates, DirectionalPool, DirectionalPoolApi, DirectionalRecordType,
        InMemoryDirectionalPools, PoolKind,
    },
};

#[cfg(feature = "dynect")]
pub use providers::{
    DynectProvider,
    dynect::{GeoRecordSet, GeoRegionGroup, GeoService, GeoServiceApi, InMemoryGeoServices, Node},
};
