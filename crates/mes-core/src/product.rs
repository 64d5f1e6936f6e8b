//! 產品模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::units::UnitOfMeasure;

/// 產品（原料、半成品、成品）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// 產品ID
    pub id: String,

    /// 產品名稱
    pub name: String,

    /// 標準單位
    pub base_unit: UnitOfMeasure,

    /// 密度（kg/L），僅體積換算需要
    pub density: Option<Decimal>,

    /// 是否允許負庫存
    /// - true: 發料可使最後一個批號餘量為負（適用於流程性損耗回沖）
    /// - false: 庫存不足時發料失敗（預設）
    pub allow_negative_inventory: bool,
}

impl Product {
    /// 創建新的產品
    pub fn new(id: impl Into<String>, name: impl Into<String>, base_unit: UnitOfMeasure) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            base_unit,
            density: None,
            allow_negative_inventory: false,
        }
    }

    /// 建構器模式：設置密度
    pub fn with_density(mut self, density: Decimal) -> Self {
        self.density = Some(density);
        self
    }

    /// 建構器模式：設置是否允許負庫存
    pub fn with_allow_negative_inventory(mut self, allow: bool) -> Self {
        self.allow_negative_inventory = allow;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_product() {
        let product = Product::new("RESIN-X", "環氧樹脂", UnitOfMeasure::Kilogram);

        assert_eq!(product.id, "RESIN-X");
        assert_eq!(product.base_unit, UnitOfMeasure::Kilogram);
        assert!(product.density.is_none());
        assert!(!product.allow_negative_inventory);
    }

    #[test]
    fn test_product_builder() {
        let product = Product::new("SOLVENT-Y", "稀釋溶劑", UnitOfMeasure::Liter)
            .with_density(Decimal::new(8, 1))
            .with_allow_negative_inventory(true);

        assert_eq!(product.density, Some(Decimal::new(8, 1)));
        assert!(product.allow_negative_inventory);
    }
}
