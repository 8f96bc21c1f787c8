mod mutations;
mod queries;

use std::sync::Arc;

use crate::repo::PriceRepository;

/// Reconciles inserted price periods against a product's stored timeline.
///
/// Each [`insert`](PriceBook::insert) is a read-classify-write sequence over
/// the injected repository and is not internally atomic: callers must
/// serialize inserts per product key. The engine holds no locks and does no
/// blocking work of its own; repository calls may be remote and slow.
pub struct PriceBook {
    repo: Arc<dyn PriceRepository>,
}

impl PriceBook {
    pub fn new(repo: Arc<dyn PriceRepository>) -> Self {
        Self { repo }
    }
}
