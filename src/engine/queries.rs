use crate::error::PriceError;
use crate::model::{Ms, Period, PeriodId};

use super::PriceBook;

impl PriceBook {
    /// Look up one period by id.
    pub async fn find_by_id(&self, id: PeriodId) -> Result<Period, PriceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(PriceError::NotFound(id))
    }

    pub async fn find_all(&self) -> Result<Vec<Period>, PriceError> {
        self.repo.find_all().await
    }

    /// Periods whose span matches both bounds exactly.
    pub async fn find_by_span(&self, start: Ms, end: Ms) -> Result<Vec<Period>, PriceError> {
        self.repo.find_by_span(start, end).await
    }
}
