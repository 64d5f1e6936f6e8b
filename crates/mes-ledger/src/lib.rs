//! # MES Inventory Ledger
//!
//! 批號庫存帳：FIFO 發料、入庫、預留與可售量計算

pub mod ledger;

// Re-export 主要類型
pub use ledger::{ConsumptionEvent, InventoryLedger};
