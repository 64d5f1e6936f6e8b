//! 單位與換算
//!
//! 所有庫存數量以公斤（kg）為標準單位。體積單位需透過產品密度換算。

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{MesError, Result};

/// 計量單位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitOfMeasure {
    /// 公斤（標準單位）
    Kilogram,
    /// 公克
    Gram,
    /// 公噸
    Tonne,
    /// 公升
    Liter,
    /// 毫升
    Milliliter,
}

impl UnitOfMeasure {
    /// 是否為質量單位
    pub fn is_mass(&self) -> bool {
        matches!(self, Self::Kilogram | Self::Gram | Self::Tonne)
    }

    /// 是否為體積單位
    pub fn is_volume(&self) -> bool {
        !self.is_mass()
    }

    /// 質量單位換算為公斤的係數；體積單位返回換算為公升的係數
    fn base_factor(&self) -> Decimal {
        match self {
            Self::Kilogram => Decimal::ONE,
            Self::Gram => Decimal::new(1, 3), // 0.001
            Self::Tonne => Decimal::from(1000),
            Self::Liter => Decimal::ONE,
            Self::Milliliter => Decimal::new(1, 3),
        }
    }

    /// 單位代碼
    pub fn code(&self) -> &'static str {
        match self {
            Self::Kilogram => "kg",
            Self::Gram => "g",
            Self::Tonne => "t",
            Self::Liter => "L",
            Self::Milliliter => "mL",
        }
    }
}

impl std::fmt::Display for UnitOfMeasure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// 換算為標準質量數量（kg）
///
/// 質量單位直接依係數換算；體積單位需要密度（kg/L），
/// 缺少密度時返回 `UnsupportedConversion`。
///
/// 換算本身不做捨入，精度處理由呼叫端以 [`round_qty`] / [`round_money`] 套用。
pub fn to_canonical(
    quantity: Decimal,
    unit: UnitOfMeasure,
    density: Option<Decimal>,
) -> Result<Decimal> {
    if unit.is_mass() {
        return Ok(quantity * unit.base_factor());
    }

    let density = density.ok_or(MesError::UnsupportedConversion { unit })?;
    let liters = quantity * unit.base_factor();
    Ok(liters * density)
}

/// 數量捨入（3 位小數）
pub fn round_qty(quantity: Decimal) -> Decimal {
    quantity.round_dp(3)
}

/// 金額捨入（2 位小數）
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp(2)
}
