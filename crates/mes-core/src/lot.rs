//! 庫存批號模型

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 批號來源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LotSource {
    /// 採購入庫
    Purchase,
    /// 生產完工入庫
    Production,
    /// 發料退回
    MaterialReturn,
}

/// 庫存批號
///
/// 同一批號內數量與成本同質。餘量只由交易異動，
/// 耗盡的批號保留為零量記錄供稽核，不刪除。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lot {
    /// 批號ID
    pub id: Uuid,

    /// 產品ID
    pub product_id: String,

    /// 批號代碼（人讀）
    pub lot_code: String,

    /// 入庫時間（FIFO 排序鍵）
    pub received_at: DateTime<Utc>,

    /// 有效期限
    pub expires_at: Option<DateTime<Utc>>,

    /// 剩餘數量（標準單位 kg）
    pub remaining_qty: Decimal,

    /// 單位成本
    pub unit_cost: Decimal,

    /// 批號來源
    pub source: LotSource,

    /// 是否啟用
    pub is_active: bool,
}

impl Lot {
    /// 創建新的批號
    pub fn new(
        product_id: impl Into<String>,
        lot_code: impl Into<String>,
        quantity: Decimal,
        unit_cost: Decimal,
        received_at: DateTime<Utc>,
        source: LotSource,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            product_id: product_id.into(),
            lot_code: lot_code.into(),
            received_at,
            expires_at: None,
            remaining_qty: quantity,
            unit_cost,
            source,
            is_active: true,
        }
    }

    /// 建構器模式：設置有效期限
    pub fn with_expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// 是否已耗盡
    pub fn is_exhausted(&self) -> bool {
        self.remaining_qty <= Decimal::ZERO
    }
}
