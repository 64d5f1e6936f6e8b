//! # MES 製造執行核心
//!
//! 小批量製造的執行核心：FIFO 庫存帳、配方展開與工單狀態機。
//! 各子系統拆為獨立 crate，此門面統一 re-export。
//!
//! - [`core`]：資料模型、單位換算、主檔介面與錯誤類型
//! - [`ledger`]：批號庫存帳（FIFO 發料、預留、沖銷）
//! - [`bom`]：配方展開引擎
//! - [`exec`]：工單狀態機、成本歸集與製造費用

pub use mes_bom as bom;
pub use mes_core as core;
pub use mes_exec as exec;
pub use mes_ledger as ledger;

pub use mes_bom::{RecipeExplosionEngine, RequiredLine};
pub use mes_core::{
    Batch, Lot, LotSource, MesError, Product, ProductRepository, QcStatus, QcTest, Recipe,
    RecipeLine, RecipeRepository, ReferenceType, Reservation, ReservationSource, Result,
    StaticCatalog, StockTransaction, UnitOfMeasure, WorkOrder, WorkOrderStatus,
};
pub use mes_exec::{
    CompletionOutcome, CreateOutcome, EngineConfig, EngineWarning, OverheadRate, WorkOrderEngine,
};
pub use mes_ledger::{ConsumptionEvent, InventoryLedger};
