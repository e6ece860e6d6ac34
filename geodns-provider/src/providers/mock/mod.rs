//! In-memory provider

mod geo;
mod provider;
mod store;

use std::sync::Arc;

pub use store::MockStore;

pub(crate) const PROVIDER: &str = "mock";

/// In-memory provider, serving geo record sets from a shared [`MockStore`].
pub struct MockProvider {
    pub(crate) store: Arc<MockStore>,
}

impl MockProvider {
    pub fn new(store: Arc<MockStore>) -> Self {
        Self { store }
    }
}
