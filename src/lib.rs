//! Per-product price timelines with insert-time reconciliation.
//!
//! Every product (code + variant number) owns a set of price periods over
//! half-open millisecond spans. Inserting a period splits, trims, deletes
//! and merges the stored ones so the product's timeline stays
//! non-overlapping and never keeps two adjacent records with the same
//! amount.
//!
//! - `model`: spans, overlap classification, amounts, the `Period` entity.
//! - `engine`: [`PriceBook`], the reconciliation engine.
//! - `repo`: the async [`PriceRepository`] contract and the bundled
//!   in-memory reference store.
//!
//! The engine holds no locks; callers serialize inserts per product key
//! (see [`PriceBook::insert`]). Inserts on different products are
//! independent.

pub mod engine;
pub mod error;
pub mod model;
pub mod repo;

pub use engine::PriceBook;
pub use error::PriceError;
pub use model::{Amount, Ms, Overlap, Period, PeriodId, ProductKey, Span};
pub use repo::{MemoryRepository, PriceRepository};
