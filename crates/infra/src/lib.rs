//! Infrastructure layer: SQLite persistence for the catalog and ledger, the
//! stock adjustment service, the query layer and CSV export.

pub mod adjustment;
pub mod catalog;
pub mod db;
pub mod error;
pub mod export;
pub mod ledger;
pub mod reports;
pub mod stockroom;


pub use adjustment::{AdjustmentReceipt, StockAdjustmentService};
pub use catalog::PartCatalog;
pub use db::{Database, DatabaseOptions};
pub use error::{StoreError, StoreResult};
pub use ledger::{TransactionLedger, TransactionView};
pub use reports::{Dashboard, Reports};
pub use stockroom::Stockroom;
