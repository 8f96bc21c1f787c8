use tracing::debug;
use ulid::Ulid;

use crate::error::PriceError;
use crate::model::{Overlap, Period, Span};

use super::PriceBook;

impl PriceBook {
    /// Insert a period into its product's timeline.
    ///
    /// Stored periods overlapped by the new span are split, trimmed or
    /// deleted; the new period is then persisted with equal-amount
    /// neighbors collapsed. Afterwards the product's stored spans are
    /// pairwise disjoint and no two adjacent records carry the same amount.
    ///
    /// Every overlap decision is taken against the snapshot fetched up
    /// front. Stored spans are pairwise disjoint, so at most one period
    /// brackets the new span, at most one loses its start and at most one
    /// loses its end; the order the snapshot is walked in does not matter.
    ///
    /// A repository failure aborts mid-sequence without rollback; the
    /// caller must treat the product's timeline as possibly inconsistent
    /// and re-read before retrying.
    pub async fn insert(&self, period: Period) -> Result<(), PriceError> {
        if period.span.start >= period.span.end {
            return Err(PriceError::InvalidPeriod {
                start: period.span.start,
                end: period.span.end,
            });
        }
        debug!(id = %period.id, code = %period.product.code, number = period.product.number,
            start = period.span.start, end = period.span.end, "insert price period");

        let existing = self.repo.find_by_product(&period.product).await?;
        for current in &existing {
            match current.span.classify(&period.span) {
                Overlap::Brackets => {
                    let (left, right) = current.split_around(&period.span, Ulid::new());
                    debug!(id = %current.id, "split stored period around insert");
                    self.save_merged(left).await?;
                    self.save_merged(right).await?;
                }
                Overlap::Covered => {
                    debug!(id = %current.id, "delete period covered by insert");
                    self.repo.delete(current.id).await?;
                }
                Overlap::ClipsStart => {
                    debug!(id = %current.id, "trim start of overlapped period");
                    let trimmed =
                        current.with_span(Span::new(period.span.end, current.span.end));
                    self.save_merged(trimmed).await?;
                }
                Overlap::ClipsEnd => {
                    debug!(id = %current.id, "trim end of overlapped period");
                    let trimmed =
                        current.with_span(Span::new(current.span.start, period.span.start));
                    self.save_merged(trimmed).await?;
                }
                Overlap::Disjoint => {}
            }
        }

        // The new period goes in last, once every remnant is in place.
        self.save_merged(period).await?;
        Ok(())
    }

    /// Persist a period, absorbing equal-amount neighbors on both sides so
    /// one continuous equal-valued stretch never spans two records.
    async fn save_merged(&self, period: Period) -> Result<Period, PriceError> {
        let siblings = self.repo.find_by_product(&period.product).await?;
        let mut merged = period;

        if let Some(pred) = siblings
            .iter()
            .find(|p| p.id != merged.id && p.extends_into(&merged))
        {
            // The write moves into the left neighbor; a stored record still
            // carrying the absorbed id must not survive it.
            self.repo.delete(merged.id).await?;
            debug!(id = %pred.id, "extend left neighbor over saved period");
            merged = pred.with_span(Span::new(pred.span.start, merged.span.end));
        }

        if let Some(succ) = siblings
            .iter()
            .find(|p| p.id != merged.id && merged.extends_into(p))
        {
            self.repo.delete(succ.id).await?;
            debug!(id = %succ.id, "absorb right neighbor into saved period");
            merged = merged.with_span(Span::new(merged.span.start, succ.span.end));
        }

        self.repo.save(merged).await
    }
}
