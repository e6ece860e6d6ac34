//! Geo provider implementations

/// Shared utilities used by provider implementations.
pub mod common;

#[cfg(feature = "dynect")]
pub mod dynect;
#[cfg(feature = "mock")]
pub mod mock;
#[cfg(feature = "ultradns")]
pub mod ultradns;

#[cfg(feature = "dynect")]
pub use dynect::DynectProvider;
#[cfg(feature = "mock")]
pub use mock::MockProvider;
#[cfg(feature = "ultradns")]
pub use ultradns::UltradnsProvider;
