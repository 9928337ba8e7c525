use serde::{Deserialize, Serialize};

use crate::part::Part;

/// Headline stock figures over a set of parts.
///
/// `total_quantity` is widened to `i128`: each part may hold up to `i64::MAX`
/// units, so the sum over many parts does not fit an `i64`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockSummary {
    pub total_parts: usize,
    pub total_quantity: i128,
    pub low_stock_count: usize,
}

impl StockSummary {
    pub fn from_parts(parts: &[Part]) -> Self {
        parts.iter().fold(Self::default(), |mut acc, part| {
            acc.total_parts += 1;
            acc.total_quantity += i128::from(part.current_qty);
            if part.is_low_stock() {
                acc.low_stock_count += 1;
            }
            acc
        })
    }
}

/// Parts whose stock on hand is below their minimum, in input order.
pub fn low_stock(parts: &[Part]) -> Vec<Part> {
    parts.iter().filter(|p| p.is_low_stock()).cloned().collect()
}
