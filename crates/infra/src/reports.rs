//! Read-only query layer.
//!
//! Every call re-derives its answer from the store; nothing is cached.

use serde::Serialize;
use tracing::instrument;

use stockroom_inventory::{Part, StockSummary};

use crate::catalog::{PartCatalog, PartRow, part_columns};
use crate::db::Database;
use crate::error::{StoreResult, map_sqlx_error};
use crate::ledger::{TransactionLedger, TransactionView};

/// Everything the dashboard page shows, from one consistent set of calls.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub summary: StockSummary,
    pub low_stock: Vec<Part>,
    pub recent: Vec<TransactionView>,
}

#[derive(Debug, Clone)]
pub struct Reports {
    db: Database,
    catalog: PartCatalog,
    ledger: TransactionLedger,
}

impl Reports {
    pub fn new(db: Database) -> Self {
        Self {
            catalog: PartCatalog::new(db.clone()),
            ledger: TransactionLedger::new(db.clone()),
            db,
        }
    }

    /// Parts with `current_qty < min_qty`, ordered by part number.
    #[instrument(skip(self), err)]
    pub async fn low_stock(&self) -> StoreResult<Vec<Part>> {
        let rows = sqlx::query_as::<_, PartRow>(&format!(
            r#"
            SELECT {}
            FROM spare_parts
            WHERE current_qty < min_qty
            ORDER BY part_number ASC
            "#,
            part_columns()
        ))
        .fetch_all(self.db.pool())
        .await
        .map_err(|e| map_sqlx_error("low_stock", e))?;

        Ok(rows.into_iter().map(Part::from).collect())
    }

    /// Totals over the parts matching `query` (all parts when empty).
    pub async fn summary(&self, query: &str) -> StoreResult<StockSummary> {
        let parts = self.catalog.search(query).await?;
        Ok(StockSummary::from_parts(&parts))
    }

    /// Ledger history, newest first; unbounded when `limit` is `None`.
    pub async fn history(&self, limit: Option<u32>) -> StoreResult<Vec<TransactionView>> {
        self.ledger.recent(limit.unwrap_or(u32::MAX)).await
    }

    /// Summary and low-stock list over the parts matching `query`, plus the
    /// `recent_limit` newest transactions.
    #[instrument(skip(self), err)]
    pub async fn dashboard(&self, query: &str, recent_limit: u32) -> StoreResult<Dashboard> {
        let parts = self.catalog.search(query).await?;
        let recent = self.ledger.recent(recent_limit).await?;

        Ok(Dashboard {
            summary: StockSummary::from_parts(&parts),
            low_stock: stockroom_inventory::low_stock(&parts),
            recent,
        })
    }
}
