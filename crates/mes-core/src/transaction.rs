//! 庫存交易模型

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 交易來源類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceType {
    /// 入庫（採購或完工）
    Receipt,
    /// 工單發料/退料
    WorkOrder,
    /// 預留轉耗用
    ReservationCommit,
    /// 作廢沖銷
    VoidCompensation,
}

/// 庫存交易
///
/// 不可變的異動記錄：正數為入庫，負數為出庫。
/// 對帳不變式：批號所有交易的帶號總和 == 批號剩餘數量。
/// 交易建立後不再修改，作廢以反向沖銷交易表達。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockTransaction {
    /// 交易ID
    pub id: Uuid,

    /// 批號ID
    pub lot_id: Uuid,

    /// 產品ID
    pub product_id: String,

    /// 帶號數量（標準單位 kg）
    pub quantity: Decimal,

    /// 異動當下單位成本
    pub unit_cost: Decimal,

    /// 來源類型
    pub reference_type: ReferenceType,

    /// 來源單據ID（工單ID、預留ID等）
    pub reference_id: String,

    /// 備註
    pub note: Option<String>,

    /// 異動時間
    pub posted_at: DateTime<Utc>,
}

impl StockTransaction {
    /// 創建新的交易
    pub fn new(
        lot_id: Uuid,
        product_id: impl Into<String>,
        quantity: Decimal,
        unit_cost: Decimal,
        reference_type: ReferenceType,
        reference_id: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            lot_id,
            product_id: product_id.into(),
            quantity,
            unit_cost,
            reference_type,
            reference_id: reference_id.into(),
            note: None,
            posted_at: Utc::now(),
        }
    }

    /// 建構器模式：設置備註
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// 是否為入庫
    pub fn is_receipt(&self) -> bool {
        self.quantity > Decimal::ZERO
    }

    /// 是否為出庫
    pub fn is_issue(&self) -> bool {
        self.quantity < Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_sign() {
        let lot_id = Uuid::new_v4();

        let receipt = StockTransaction::new(
            lot_id,
            "RESIN-X",
            Decimal::from(50),
            Decimal::from(4),
            ReferenceType::Receipt,
            "PO-001",
        );
        assert!(receipt.is_receipt());
        assert!(!receipt.is_issue());

        let issue = StockTransaction::new(
            lot_id,
            "RESIN-X",
            Decimal::from(-30),
            Decimal::from(4),
            ReferenceType::WorkOrder,
            "WO-001",
        )
        .with_note("發料".to_string());
        assert!(issue.is_issue());
        assert_eq!(issue.note.as_deref(), Some("發料"));
    }
}
