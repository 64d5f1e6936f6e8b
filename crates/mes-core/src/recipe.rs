//! 配方模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::units::UnitOfMeasure;

/// 配方組成行
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeLine {
    /// 組成物料ID
    pub component_id: String,

    /// 基準產量下的用量
    pub quantity: Decimal,

    /// 用量單位
    pub unit: UnitOfMeasure,

    /// 行序（展開時保持順序）
    pub sequence: u32,
}

impl RecipeLine {
    /// 創建新的組成行
    pub fn new(
        component_id: impl Into<String>,
        quantity: Decimal,
        unit: UnitOfMeasure,
        sequence: u32,
    ) -> Self {
        Self {
            component_id: component_id.into(),
            quantity,
            unit,
            sequence,
        }
    }
}

/// 配方
///
/// 組成行用量以 `base_yield_qty`（標準單位 kg 的產出）為基準表達。
/// 一個產品可有多張配方；展開時取現行主要配方，除非呼叫端指名。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// 配方ID
    pub id: String,

    /// 產出產品ID
    pub product_id: String,

    /// 配方名稱
    pub name: String,

    /// 基準產量（標準單位 kg）
    pub base_yield_qty: Decimal,

    /// 組成行（有序）
    pub lines: Vec<RecipeLine>,

    /// 是否啟用
    pub is_active: bool,

    /// 是否為現行主要配方
    pub is_primary: bool,
}

impl Recipe {
    /// 創建新的配方
    pub fn new(
        id: impl Into<String>,
        product_id: impl Into<String>,
        name: impl Into<String>,
        base_yield_qty: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            product_id: product_id.into(),
            name: name.into(),
            base_yield_qty,
            lines: Vec::new(),
            is_active: true,
            is_primary: false,
        }
    }

    /// 建構器模式：添加組成行
    pub fn with_line(mut self, line: RecipeLine) -> Self {
        self.lines.push(line);
        self
    }

    /// 建構器模式：設置為主要配方
    pub fn as_primary(mut self) -> Self {
        self.is_primary = true;
        self
    }

    /// 建構器模式：設置啟用狀態
    pub fn with_active(mut self, active: bool) -> Self {
        self.is_active = active;
        self
    }
}
