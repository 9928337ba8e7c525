//! Spare-parts inventory domain module.
//!
//! This crate contains the business rules for parts and stock movements,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod movement;
pub mod part;
pub mod summary;

pub use movement::{
    Direction, StockAdjustment, StockMovement, TIMESTAMP_FORMAT, format_timestamp, parse_timestamp,
};
pub use part::{Part, PartDraft};
pub use summary::{StockSummary, low_stock};
