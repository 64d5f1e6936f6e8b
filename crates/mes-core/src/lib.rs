//! # MES Core
//!
//! 核心資料模型與類型定義

pub mod catalog;
pub mod lot;
pub mod product;
pub mod recipe;
pub mod reservation;
pub mod transaction;
pub mod units;
pub mod work_order;

// Re-export 主要類型
pub use catalog::{ProductRepository, RecipeRepository, StaticCatalog};
pub use lot::{Lot, LotSource};
pub use product::Product;
pub use recipe::{Recipe, RecipeLine};
pub use reservation::{Reservation, ReservationSource, ReservationStatus};
pub use transaction::{ReferenceType, StockTransaction};
pub use units::{UnitOfMeasure, round_money, round_qty, to_canonical};
pub use work_order::{
    Batch, BatchStatus, LineType, QcStatus, QcTest, WorkOrder, WorkOrderLine, WorkOrderStatus,
};

use rust_decimal::Decimal;

/// MES 錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum MesError {
    #[error("找不到產品: {0}")]
    ProductNotFound(String),

    #[error("找不到配方: {0}")]
    RecipeNotFound(String),

    #[error("產品 {0} 沒有可用的現行配方")]
    NoRecipeForProduct(String),

    #[error("配方 {0} 未啟用")]
    RecipeInactive(String),

    #[error("配方 {0} 沒有任何組成行")]
    EmptyRecipe(String),

    #[error("找不到工單: {0}")]
    WorkOrderNotFound(uuid::Uuid),

    #[error("工單 {work_order_id} 沒有物料 {component_id} 的投料行")]
    MaterialLineNotFound {
        work_order_id: uuid::Uuid,
        component_id: String,
    },

    #[error("找不到品檢記錄: {0}")]
    QcTestNotFound(uuid::Uuid),

    #[error("找不到預留: {0}")]
    ReservationNotFound(uuid::Uuid),

    #[error("找不到批號: {0}")]
    LotNotFound(uuid::Uuid),

    #[error("工單 {work_order_id} 狀態 {current} 不允許執行 {operation}")]
    InvalidStatus {
        work_order_id: uuid::Uuid,
        current: work_order::WorkOrderStatus,
        operation: &'static str,
    },

    #[error("庫存不足: 產品 {product_id} 需要 {requested}, 可用 {available}")]
    InsufficientStock {
        product_id: String,
        requested: Decimal,
        available: Decimal,
    },

    #[error("重複預留: 產品 {product_id} 在 ({channel}, {reference_id}) 已有生效中的預留")]
    DuplicateReservation {
        product_id: String,
        channel: reservation::ReservationSource,
        reference_id: String,
    },

    #[error("預留 {reservation_id} 狀態 {status} 不是生效中")]
    ReservationNotActive {
        reservation_id: uuid::Uuid,
        status: reservation::ReservationStatus,
    },

    #[error("不支援的單位換算: {unit} 需要密度才能換算為質量")]
    UnsupportedConversion { unit: units::UnitOfMeasure },

    #[error("品檢未通過: 工單 {work_order_id} 有 {pending} 筆待判定、{failed} 筆不合格")]
    QcNotSatisfied {
        work_order_id: uuid::Uuid,
        pending: usize,
        failed: usize,
    },

    #[error("無效的數量: {context} 為 {quantity}")]
    InvalidQuantity {
        context: &'static str,
        quantity: Decimal,
    },

    #[error("儲存層不可用: {0}")]
    StorageUnavailable(String),
}

pub type Result<T> = std::result::Result<T, MesError>;
