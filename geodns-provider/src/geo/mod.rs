//! Backend-independent geo normalization: territory resolution and row grouping.

pub mod grouping;
pub mod territory;

pub use grouping::{DirectionalGroup, DirectionalRecord, GroupGeoRecordIter};
pub use territory::{RegionIndex, TerritoryLoader, TerritoryResolver};
