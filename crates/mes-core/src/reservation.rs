//! 庫存預留模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 預留來源通路
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReservationSource {
    /// 內部生產（工單）
    Production,
    /// 外部銷售通路
    SalesChannel,
}

impl std::fmt::Display for ReservationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Production => write!(f, "production"),
            Self::SalesChannel => write!(f, "sales_channel"),
        }
    }
}

/// 預留狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReservationStatus {
    /// 生效中
    Active,
    /// 已轉耗用
    Committed,
    /// 已釋放
    Released,
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Committed => write!(f, "committed"),
            Self::Released => write!(f, "released"),
        }
    }
}

/// 庫存預留
///
/// 對未來可用庫存的宣告，不綁定特定批號。
/// 唯一性：同一 (來源, 單據, 產品) 同時間至多一筆生效中的預留。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    /// 預留ID
    pub id: Uuid,

    /// 產品ID
    pub product_id: String,

    /// 預留數量（標準單位 kg）
    pub quantity: Decimal,

    /// 來源通路
    pub source: ReservationSource,

    /// 外部單據ID
    pub reference_id: String,

    /// 狀態
    pub status: ReservationStatus,
}

impl Reservation {
    /// 創建新的預留（生效中）
    pub fn new(
        product_id: impl Into<String>,
        quantity: Decimal,
        source: ReservationSource,
        reference_id: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            product_id: product_id.into(),
            quantity,
            source,
            reference_id: reference_id.into(),
            status: ReservationStatus::Active,
        }
    }

    /// 是否生效中
    pub fn is_active(&self) -> bool {
        self.status == ReservationStatus::Active
    }
}
