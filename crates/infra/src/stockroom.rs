//! Service wiring: one database, the four components over it.

use crate::adjustment::StockAdjustmentService;
use crate::catalog::PartCatalog;
use crate::db::{Database, DatabaseOptions};
use crate::error::StoreResult;
use crate::ledger::TransactionLedger;
use crate::reports::Reports;

/// The inventory core as consumed by a presentation shell.
///
/// Stateless apart from the database; cheap to clone.
#[derive(Debug, Clone)]
pub struct Stockroom {
    pub catalog: PartCatalog,
    pub ledger: TransactionLedger,
    pub adjustments: StockAdjustmentService,
    pub reports: Reports,
}

impl Stockroom {
    pub async fn open(options: DatabaseOptions) -> StoreResult<Self> {
        let db = Database::open(options).await?;
        Ok(Self::with_database(db))
    }

    fn with_database(db: Database) -> Self {
        Self {
            catalog: PartCatalog::new(db.clone()),
            ledger: TransactionLedger::new(db.clone()),
            adjustments: StockAdjustmentService::new(db.clone()),
            reports: Reports::new(db),
        }
    }
}
