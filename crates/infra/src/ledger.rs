//! Append-only transaction ledger.
//!
//! Rows are only ever written by [`append`], inside the transaction of a stock
//! adjustment, and only ever removed by the cascade from a deleted part.

use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::{FromRow, SqliteConnection};
use tracing::instrument;

use stockroom_core::{DomainError, PartId, TransactionId};
use stockroom_inventory::{Direction, StockMovement, format_timestamp, parse_timestamp};

use crate::db::Database;
use crate::error::{StoreError, StoreResult, map_sqlx_error};

/// A ledger row joined with its part's number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionView {
    pub id: TransactionId,
    pub part_id: PartId,
    pub part_number: String,
    pub ts: NaiveDateTime,
    pub user: String,
    pub action: Direction,
    pub quantity: i64,
    pub remarks: String,
}

/// Read side of the ledger.
#[derive(Debug, Clone)]
pub struct TransactionLedger {
    db: Database,
}

impl TransactionLedger {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Newest transactions first, at most `limit` rows.
    #[instrument(skip(self), err)]
    pub async fn recent(&self, limit: u32) -> StoreResult<Vec<TransactionView>> {
        let rows = sqlx::query_as::<_, TransactionRow>(
            r#"
            SELECT t.id, t.part_id, s.part_number, t.ts, t.user, t.action, t.quantity, t.remarks
            FROM transactions t
            JOIN spare_parts s ON s.id = t.part_id
            ORDER BY t.ts DESC, t.id DESC
            LIMIT ?1
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(self.db.pool())
        .await
        .map_err(|e| map_sqlx_error("recent_transactions", e))?;

        rows.into_iter().map(TransactionView::try_from).collect()
    }

    /// Full history of one part, newest first.
    #[instrument(skip(self), err)]
    pub async fn for_part(&self, part_id: PartId) -> StoreResult<Vec<TransactionView>> {
        let rows = sqlx::query_as::<_, TransactionRow>(
            r#"
            SELECT t.id, t.part_id, s.part_number, t.ts, t.user, t.action, t.quantity, t.remarks
            FROM transactions t
            JOIN spare_parts s ON s.id = t.part_id
            WHERE t.part_id = ?1
            ORDER BY t.ts DESC, t.id DESC
            "#,
        )
        .bind(part_id.get())
        .fetch_all(self.db.pool())
        .await
        .map_err(|e| map_sqlx_error("part_transactions", e))?;

        rows.into_iter().map(TransactionView::try_from).collect()
    }

    /// Number of ledger rows referencing `part_id` (joined or not).
    pub async fn count_for_part(&self, part_id: PartId) -> StoreResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM transactions WHERE part_id = ?1")
            .bind(part_id.get())
            .fetch_one(self.db.pool())
            .await
            .map_err(|e| map_sqlx_error("count_part_transactions", e))
    }
}

/// Append the ledger row for an accepted movement.
///
/// Must run on the connection of the adjustment's open transaction.
pub(crate) async fn append(
    conn: &mut SqliteConnection,
    movement: &StockMovement,
) -> StoreResult<TransactionId> {
    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO transactions (part_id, ts, user, action, quantity, remarks)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        RETURNING id
        "#,
    )
    .bind(movement.part_id.get())
    .bind(format_timestamp(movement.recorded_at))
    .bind(&movement.user)
    .bind(movement.direction.as_str())
    .bind(movement.quantity)
    .bind(&movement.remarks)
    .fetch_one(conn)
    .await
    .map_err(|e| map_sqlx_error("append_transaction", e))?;

    Ok(TransactionId::new(id))
}

#[derive(Debug, FromRow)]
struct TransactionRow {
    id: i64,
    part_id: i64,
    part_number: String,
    ts: String,
    user: String,
    action: String,
    quantity: i64,
    remarks: String,
}

impl TryFrom<TransactionRow> for TransactionView {
    type Error = StoreError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        let corrupt = |e: DomainError| StoreError::Database {
            operation: "decode_transaction",
            message: format!("transaction {}: {e}", row.id),
        };

        Ok(TransactionView {
            id: TransactionId::new(row.id),
            part_id: PartId::new(row.part_id),
            ts: parse_timestamp(&row.ts).map_err(corrupt)?,
            action: row.action.parse().map_err(corrupt)?,
            part_number: row.part_number,
            user: row.user,
            quantity: row.quantity,
            remarks: row.remarks,
        })
    }
}
