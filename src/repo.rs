use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::PriceError;
use crate::model::{Ms, Period, PeriodId, ProductKey};

/// Keyed period store the reconciliation engine reads from and writes to.
///
/// Implementations make no ordering promise for multi-row lookups; the
/// engine never relies on iteration order. A miss from `find_by_id` is not
/// an error at this layer. Remote backends surface their failures as
/// [`PriceError::Storage`].
#[async_trait]
pub trait PriceRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Period>, PriceError>;

    async fn find_by_id(&self, id: PeriodId) -> Result<Option<Period>, PriceError>;

    /// All periods sharing the product key, whatever their span.
    async fn find_by_product(&self, product: &ProductKey) -> Result<Vec<Period>, PriceError>;

    /// Periods whose span matches both bounds exactly.
    async fn find_by_span(&self, start: Ms, end: Ms) -> Result<Vec<Period>, PriceError>;

    /// Upsert by id.
    async fn save(&self, period: Period) -> Result<Period, PriceError>;

    /// Remove by id. Removing an absent id is a no-op.
    async fn delete(&self, id: PeriodId) -> Result<(), PriceError>;

    async fn clear(&self) -> Result<(), PriceError>;
}

/// Reference store: a concurrent map keyed by period id, scanned for the
/// product and span lookups.
pub struct MemoryRepository {
    periods: DashMap<PeriodId, Period>,
}

impl Default for MemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self {
            periods: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }
}

#[async_trait]
impl PriceRepository for MemoryRepository {
    async fn find_all(&self) -> Result<Vec<Period>, PriceError> {
        Ok(self.periods.iter().map(|e| e.value().clone()).collect())
    }

    async fn find_by_id(&self, id: PeriodId) -> Result<Option<Period>, PriceError> {
        Ok(self.periods.get(&id).map(|e| e.value().clone()))
    }

    async fn find_by_product(&self, product: &ProductKey) -> Result<Vec<Period>, PriceError> {
        Ok(self
            .periods
            .iter()
            .filter(|e| e.value().product == *product)
            .map(|e| e.value().clone())
            .collect())
    }

    async fn find_by_span(&self, start: Ms, end: Ms) -> Result<Vec<Period>, PriceError> {
        Ok(self
            .periods
            .iter()
            .filter(|e| e.value().span.start == start && e.value().span.end == end)
            .map(|e| e.value().clone())
            .collect())
    }

    async fn save(&self, period: Period) -> Result<Period, PriceError> {
        self.periods.insert(period.id, period.clone());
        Ok(period)
    }

    async fn delete(&self, id: PeriodId) -> Result<(), PriceError> {
        self.periods.remove(&id);
        Ok(())
    }

    async fn clear(&self) -> Result<(), PriceError> {
        self.periods.clear();
        Ok(())
    }
}
