//! 製造費用

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use mes_core::units::round_money;
use mes_core::{MesError, Result};

/// 費用分攤方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverheadMethod {
    /// 工時制：費率 × 經過小時數
    PerHour,
    /// 產量制：費率 × 基準數量
    PerOutputUnit,
}

/// 費率
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverheadRate {
    /// 費率代碼
    pub code: String,

    /// 費率（每小時或每單位）
    pub rate: Decimal,

    /// 分攤方式
    pub method: OverheadMethod,
}

impl OverheadRate {
    /// 創建工時制費率
    pub fn per_hour(code: impl Into<String>, rate: Decimal) -> Self {
        Self {
            code: code.into(),
            rate,
            method: OverheadMethod::PerHour,
        }
    }

    /// 創建產量制費率
    pub fn per_output_unit(code: impl Into<String>, rate: Decimal) -> Self {
        Self {
            code: code.into(),
            rate,
            method: OverheadMethod::PerOutputUnit,
        }
    }
}

/// 費用計算器
pub struct OverheadCalculator;

impl OverheadCalculator {
    /// 工時制費用：費率 × (until - started_at) 的小時數
    pub fn time_based(
        rate: &OverheadRate,
        started_at: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Decimal {
        let seconds = (until - started_at).num_seconds().max(0);
        let hours = Decimal::from(seconds) / Decimal::from(3600);
        round_money(rate.rate * hours)
    }

    /// 產量制費用：費率 × 基準數量
    pub fn quantity_based(rate: &OverheadRate, basis_qty: Decimal) -> Result<Decimal> {
        if basis_qty <= Decimal::ZERO {
            return Err(MesError::InvalidQuantity {
                context: "費用基準數量",
                quantity: basis_qty,
            });
        }
        Ok(round_money(rate.rate * basis_qty))
    }
}
