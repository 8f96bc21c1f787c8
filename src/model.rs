use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::error::PriceError;

/// Unix milliseconds — the only time type.
pub type Ms = i64;

/// Period identity, stable across span-changing copies.
pub type PeriodId = Ulid;

/// Half-open interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: Ms,
    pub end: Ms,
}

impl Span {
    pub fn new(start: Ms, end: Ms) -> Self {
        debug_assert!(start < end, "Span start must be before end");
        Self { start, end }
    }

    pub fn duration_ms(&self) -> Ms {
        self.end - self.start
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn contains_instant(&self, t: Ms) -> bool {
        self.start <= t && t < self.end
    }

    /// How `self`, a stored span, relates to a newly inserted `incoming` span.
    ///
    /// Spans that only touch at a boundary share no instant and classify
    /// `Disjoint`; adjacency is the merge rule's business, never trim/split's.
    pub fn classify(&self, incoming: &Span) -> Overlap {
        if !self.overlaps(incoming) {
            return Overlap::Disjoint;
        }
        match (self.start < incoming.start, incoming.end < self.end) {
            (true, true) => Overlap::Brackets,
            (false, false) => Overlap::Covered,
            (false, true) => Overlap::ClipsStart,
            (true, false) => Overlap::ClipsEnd,
        }
    }
}

/// How a stored span relates to an inserted one. Exactly one non-`Disjoint`
/// variant holds for any pair of spans that share at least one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlap {
    /// Stored span strictly brackets the inserted one on both sides.
    Brackets,
    /// Stored span lies entirely under the inserted one.
    Covered,
    /// Inserted span covers a prefix of the stored one.
    ClipsStart,
    /// Inserted span covers a suffix of the stored one.
    ClipsEnd,
    /// No shared instant.
    Disjoint,
}

/// Strictly positive price amount.
///
/// Construction is the only validation point: a zero or negative value never
/// becomes an `Amount`, so downstream code compares amounts without
/// re-checking. Comparison is numeric (`200` equals `200.00`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, PriceError> {
        if value <= Decimal::ZERO {
            return Err(PriceError::InvalidAmount(value));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = PriceError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

/// The grouping under which periods may overlap or merge with each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductKey {
    pub code: String,
    pub number: u32,
}

impl ProductKey {
    pub fn new(code: impl Into<String>, number: u32) -> Self {
        Self {
            code: code.into(),
            number,
        }
    }
}

/// One stored price period: an amount valid over `[span.start, span.end)`
/// for a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub id: PeriodId,
    pub product: ProductKey,
    /// Carried on the record but not part of the grouping key.
    pub depart: u32,
    pub span: Span,
    pub amount: Amount,
}

impl Period {
    pub fn new(id: PeriodId, product: ProductKey, depart: u32, span: Span, amount: Amount) -> Self {
        Self {
            id,
            product,
            depart,
            span,
            amount,
        }
    }

    /// Span-changing copy: identity, product, depart and amount carry over.
    pub fn with_span(&self, span: Span) -> Self {
        Self {
            span,
            ..self.clone()
        }
    }

    /// Split around an inner span, producing the remnants on either side.
    /// The left remnant keeps this period's identity; the right one becomes
    /// a new record under `right_id`.
    pub fn split_around(&self, inner: &Span, right_id: PeriodId) -> (Period, Period) {
        let left = self.with_span(Span::new(self.span.start, inner.start));
        let mut right = self.with_span(Span::new(inner.end, self.span.end));
        right.id = right_id;
        (left, right)
    }

    /// True when `self` ends exactly where `next` starts and both carry the
    /// same amount, i.e. the two records describe one continuous stretch.
    pub fn extends_into(&self, next: &Period) -> bool {
        self.span.end == next.span.start && self.amount == next.amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amount(v: i64) -> Amount {
        Amount::new(Decimal::from(v)).unwrap()
    }

    fn period(start: Ms, end: Ms, value: i64) -> Period {
        Period::new(
            Ulid::new(),
            ProductKey::new("code", 1),
            2,
            Span::new(start, end),
            amount(value),
        )
    }

    #[test]
    fn span_basics() {
        let s = Span::new(100, 200);
        assert_eq!(s.duration_ms(), 100);
        assert!(s.contains_instant(100));
        assert!(s.contains_instant(199));
        assert!(!s.contains_instant(200)); // half-open
    }

    #[test]
    fn span_overlap() {
        let a = Span::new(100, 200);
        let b = Span::new(150, 250);
        let c = Span::new(200, 300);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c)); // adjacent, not overlapping
    }

    #[test]
    fn classify_brackets() {
        let stored = Span::new(100, 400);
        assert_eq!(stored.classify(&Span::new(200, 300)), Overlap::Brackets);
    }

    #[test]
    fn classify_covered() {
        let stored = Span::new(200, 300);
        assert_eq!(stored.classify(&Span::new(100, 400)), Overlap::Covered);
        // Inclusive on both ends: identical and shared-boundary full covers.
        assert_eq!(stored.classify(&Span::new(200, 300)), Overlap::Covered);
        assert_eq!(stored.classify(&Span::new(200, 400)), Overlap::Covered);
        assert_eq!(stored.classify(&Span::new(100, 300)), Overlap::Covered);
    }

    #[test]
    fn classify_clips() {
        let stored = Span::new(200, 400);
        assert_eq!(stored.classify(&Span::new(100, 300)), Overlap::ClipsStart);
        assert_eq!(stored.classify(&Span::new(300, 500)), Overlap::ClipsEnd);
        // Shared start clips the start; shared end clips the end.
        assert_eq!(stored.classify(&Span::new(200, 300)), Overlap::ClipsStart);
        assert_eq!(stored.classify(&Span::new(300, 400)), Overlap::ClipsEnd);
    }

    #[test]
    fn classify_touching_is_disjoint() {
        let stored = Span::new(200, 400);
        assert_eq!(stored.classify(&Span::new(100, 200)), Overlap::Disjoint);
        assert_eq!(stored.classify(&Span::new(400, 500)), Overlap::Disjoint);
        assert_eq!(stored.classify(&Span::new(500, 600)), Overlap::Disjoint);
    }

    #[test]
    fn amount_rejects_non_positive() {
        assert!(matches!(
            Amount::new(Decimal::ZERO),
            Err(PriceError::InvalidAmount(_))
        ));
        assert!(matches!(
            Amount::new(Decimal::from(-5)),
            Err(PriceError::InvalidAmount(_))
        ));
        assert!(Amount::new(Decimal::from(1)).is_ok());
    }

    #[test]
    fn amount_compares_numerically() {
        let a = Amount::new(Decimal::from(200)).unwrap();
        let b = Amount::new(Decimal::new(20_000, 2)).unwrap(); // 200.00
        assert_eq!(a, b);
    }

    #[test]
    fn split_keeps_identity_on_left() {
        let outer = period(100, 400, 200);
        let right_id = Ulid::new();
        let (left, right) = outer.split_around(&Span::new(200, 300), right_id);

        assert_eq!(left.id, outer.id);
        assert_eq!(left.span, Span::new(100, 200));
        assert_eq!(right.id, right_id);
        assert_eq!(right.span, Span::new(300, 400));
        for remnant in [&left, &right] {
            assert_eq!(remnant.product, outer.product);
            assert_eq!(remnant.depart, outer.depart);
            assert_eq!(remnant.amount, outer.amount);
        }
    }

    #[test]
    fn extends_into_needs_touching_span_and_equal_amount() {
        let a = period(100, 200, 150);
        let b = period(200, 300, 150);
        let c = period(200, 300, 160);
        let d = period(250, 300, 150);
        assert!(a.extends_into(&b));
        assert!(!a.extends_into(&c)); // amounts differ
        assert!(!a.extends_into(&d)); // gap between spans
        assert!(!b.extends_into(&a)); // direction matters
    }

    #[test]
    fn period_serialization_roundtrip() {
        let p = period(100, 200, 150);
        let json = serde_json::to_string(&p).unwrap();
        let decoded: Period = serde_json::from_str(&json).unwrap();
        assert_eq!(p, decoded);
    }

    #[test]
    fn amount_deserialization_validates() {
        let err = serde_json::from_str::<Amount>("\"-3\"");
        assert!(err.is_err());
        let ok: Amount = serde_json::from_str("\"3.50\"").unwrap();
        assert_eq!(ok.value(), Decimal::new(350, 2));
    }
}
