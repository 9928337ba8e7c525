//! Stock adjustment service: the audited mutator of quantity on hand.
//!
//! An adjustment reads the part's stock, decides the movement with the pure
//! domain rule, writes the new quantity and appends the ledger row, all inside
//! one SQLite transaction. Either both writes commit or neither does.
//!
//! ## Concurrency
//!
//! The transaction opens with a no-op write on the part's row. That statement
//! takes SQLite's write lock before the stock level is read, so two
//! adjustments of the same part are strictly ordered: the second one waits
//! (bounded by the busy timeout) and then sees the first one's result. SQLite
//! has a single writer, so adjustments of different parts also queue on that
//! lock, but only for the length of one short transaction.

use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use tracing::instrument;

use stockroom_core::{DomainError, PartId, TransactionId};
use stockroom_inventory::{Direction, StockAdjustment};

use crate::db::Database;
use crate::error::{StoreResult, map_sqlx_error};
use crate::ledger;

/// Result of a committed adjustment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdjustmentReceipt {
    pub transaction_id: TransactionId,
    pub part_id: PartId,
    pub direction: Direction,
    pub quantity: i64,
    pub previous_qty: i64,
    pub new_qty: i64,
    pub ts: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct StockAdjustmentService {
    db: Database,
}

impl StockAdjustmentService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Apply one IN/OUT movement and record it in the ledger.
    #[instrument(
        skip(self, cmd),
        fields(
            part_id = %cmd.part_id,
            direction = %cmd.direction,
            quantity = cmd.quantity,
            user = %cmd.user
        ),
        err
    )]
    pub async fn adjust(&self, cmd: StockAdjustment) -> StoreResult<AdjustmentReceipt> {
        cmd.validate()?;

        let mut tx = self
            .db
            .pool()
            .begin()
            .await
            .map_err(|e| map_sqlx_error("begin_transaction", e))?;

        // Lock first, then read: see the module docs.
        let on_hand: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE spare_parts
            SET current_qty = current_qty
            WHERE id = ?1
            RETURNING current_qty
            "#,
        )
        .bind(cmd.part_id.get())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("lock_part", e))?;

        let Some(on_hand) = on_hand else {
            tx.rollback()
                .await
                .map_err(|e| map_sqlx_error("rollback", e))?;
            return Err(DomainError::not_found(cmd.part_id).into());
        };

        let movement = match cmd.decide(on_hand, Local::now().naive_local()) {
            Ok(movement) => movement,
            Err(e) => {
                tx.rollback()
                    .await
                    .map_err(|e| map_sqlx_error("rollback", e))?;
                tracing::warn!(on_hand, "adjustment rejected: {e}");
                return Err(e.into());
            }
        };

        sqlx::query("UPDATE spare_parts SET current_qty = ?1 WHERE id = ?2")
            .bind(movement.new_qty)
            .bind(movement.part_id.get())
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("write_quantity", e))?;

        let transaction_id = ledger::append(&mut *tx, &movement).await?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("commit_transaction", e))?;

        tracing::info!(
            transaction_id = %transaction_id,
            previous_qty = movement.previous_qty,
            new_qty = movement.new_qty,
            "stock adjusted"
        );

        Ok(AdjustmentReceipt {
            transaction_id,
            part_id: movement.part_id,
            direction: movement.direction,
            quantity: movement.quantity,
            previous_qty: movement.previous_qty,
            new_qty: movement.new_qty,
            ts: movement.recorded_at,
        })
    }
}
