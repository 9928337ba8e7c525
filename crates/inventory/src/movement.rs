use chrono::{NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, PartId};

/// Storage and display format of ledger timestamps (local time, whole seconds).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Format a ledger timestamp, dropping sub-second precision.
pub fn format_timestamp(ts: NaiveDateTime) -> String {
    ts.trunc_subsecs(0).format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a ledger timestamp written by [`format_timestamp`].
pub fn parse_timestamp(s: &str) -> DomainResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .map_err(|e| DomainError::validation("ts", format!("{s:?}: {e}")))
}

/// Direction of a stock movement.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Stock received into the stockroom.
    #[serde(rename = "IN")]
    In,
    /// Stock issued out of the stockroom.
    #[serde(rename = "OUT")]
    Out,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::In => "IN",
            Direction::Out => "OUT",
        }
    }

    /// New stock level after moving `quantity` units in this direction.
    ///
    /// Fails if the result would be negative; nothing is applied in that case.
    pub fn apply(self, on_hand: i64, quantity: i64) -> DomainResult<i64> {
        let next = match self {
            Direction::In => on_hand.checked_add(quantity),
            Direction::Out => on_hand.checked_sub(quantity),
        }
        .ok_or_else(|| DomainError::invalid_operation("stock quantity overflow"))?;

        if next < 0 {
            return Err(DomainError::invalid_operation(format!(
                "insufficient stock: {on_hand} on hand, {quantity} requested"
            )));
        }
        Ok(next)
    }
}

impl core::fmt::Display for Direction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for Direction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IN" => Ok(Direction::In),
            "OUT" => Ok(Direction::Out),
            other => Err(DomainError::invalid_operation(format!(
                "action must be IN or OUT, got {other:?}"
            ))),
        }
    }
}

/// Command: move stock for one part and record who did it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockAdjustment {
    pub part_id: PartId,
    pub direction: Direction,
    pub quantity: i64,
    pub user: String,
    pub remarks: String,
}

impl StockAdjustment {
    pub fn new(
        part_id: PartId,
        direction: Direction,
        quantity: i64,
        user: impl Into<String>,
    ) -> Self {
        Self {
            part_id,
            direction,
            quantity,
            user: user.into(),
            remarks: String::new(),
        }
    }

    pub fn with_remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = remarks.into();
        self
    }

    /// Check the request shape before touching the store.
    pub fn validate(&self) -> DomainResult<()> {
        if self.quantity <= 0 {
            return Err(DomainError::validation("quantity", "must be a positive integer"));
        }
        if self.user.trim().is_empty() {
            return Err(DomainError::validation("user", "acting user is required"));
        }
        Ok(())
    }

    /// Decide the movement against the current stock level.
    ///
    /// Pure: the caller persists the returned movement (quantity write and
    /// ledger row) as one unit.
    pub fn decide(&self, on_hand: i64, recorded_at: NaiveDateTime) -> DomainResult<StockMovement> {
        self.validate()?;
        let new_qty = self.direction.apply(on_hand, self.quantity)?;

        Ok(StockMovement {
            part_id: self.part_id,
            direction: self.direction,
            quantity: self.quantity,
            user: self.user.trim().to_string(),
            remarks: self.remarks.trim().to_string(),
            previous_qty: on_hand,
            new_qty,
            recorded_at: recorded_at.trunc_subsecs(0),
        })
    }
}

/// Outcome of an accepted adjustment: what to write to the part and the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockMovement {
    pub part_id: PartId,
    pub direction: Direction,
    pub quantity: i64,
    pub user: String,
    pub remarks: String,
    pub previous_qty: i64,
    pub new_qty: i64,
    pub recorded_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn test_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_milli_opt(8, 30, 15, 750)
            .unwrap()
    }

    fn adjustment(direction: Direction, quantity: i64) -> StockAdjustment {
        StockAdjustment::new(PartId::new(1), direction, quantity, "employee")
    }

    #[test]
    fn direction_parses_only_upper_case_tokens() {
        assert_eq!("IN".parse::<Direction>().unwrap(), Direction::In);
        assert_eq!("OUT".parse::<Direction>().unwrap(), Direction::Out);

        let err = "out".parse::<Direction>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidOperation(_)));
    }

    #[test]
    fn direction_serializes_as_action_code() {
        assert_eq!(serde_json::to_string(&Direction::Out).unwrap(), "\"OUT\"");
        let d: Direction = serde_json::from_str("\"IN\"").unwrap();
        assert_eq!(d, Direction::In);
    }

    #[test]
    fn issue_beyond_stock_is_rejected() {
        let err = adjustment(Direction::Out, 10).decide(3, test_time()).unwrap_err();
        match err {
            DomainError::InvalidOperation(msg) if msg.contains("insufficient stock") => {}
            other => panic!("expected insufficient stock, got {other:?}"),
        }
    }

    #[test]
    fn zero_and_negative_quantities_are_rejected() {
        for qty in [0, -4] {
            let err = adjustment(Direction::In, qty).decide(3, test_time()).unwrap_err();
            assert!(matches!(err, DomainError::Validation { field: "quantity", .. }));
        }
    }

    #[test]
    fn blank_user_is_rejected() {
        let cmd = StockAdjustment::new(PartId::new(1), Direction::In, 1, "  ");
        assert!(matches!(
            cmd.validate(),
            Err(DomainError::Validation { field: "user", .. })
        ));
    }

    #[test]
    fn movement_timestamp_is_second_precision() {
        let movement = adjustment(Direction::In, 2)
            .with_remarks(" WO#123 ")
            .decide(0, test_time())
            .unwrap();
        assert_eq!(format_timestamp(movement.recorded_at), "2024-03-01T08:30:15");
        assert_eq!(movement.remarks, "WO#123");
        assert_eq!(parse_timestamp("2024-03-01T08:30:15").unwrap(), movement.recorded_at);
    }

    #[test]
    fn receive_overflow_is_an_invalid_operation() {
        let err = Direction::In.apply(i64::MAX, 1).unwrap_err();
        assert!(matches!(err, DomainError::InvalidOperation(_)));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: an issue no larger than stock on hand lowers it by exactly that amount.
        #[test]
        fn issue_within_stock_decreases_exactly(on_hand in 0i64..1_000_000, pick in 0.0f64..1.0) {
            let quantity = ((on_hand as f64) * pick) as i64 + 1;
            prop_assume!(quantity <= on_hand);

            let movement = adjustment(Direction::Out, quantity)
                .decide(on_hand, test_time())
                .unwrap();
            prop_assert_eq!(movement.new_qty, on_hand - quantity);
            prop_assert_eq!(movement.previous_qty, on_hand);
            prop_assert_eq!(movement.direction, Direction::Out);
        }

        /// Property: an issue larger than stock on hand always fails.
        #[test]
        fn issue_beyond_stock_always_fails(on_hand in 0i64..1_000_000, excess in 1i64..1_000_000) {
            let result = adjustment(Direction::Out, on_hand + excess).decide(on_hand, test_time());
            prop_assert!(matches!(result, Err(DomainError::InvalidOperation(_))));
        }

        /// Property: a receipt raises stock by exactly the received amount.
        #[test]
        fn receipt_increases_exactly(on_hand in 0i64..1_000_000, quantity in 1i64..1_000_000) {
            let movement = adjustment(Direction::In, quantity)
                .decide(on_hand, test_time())
                .unwrap();
            prop_assert_eq!(movement.new_qty, on_hand + quantity);
        }
    }
}
