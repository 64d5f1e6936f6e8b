//! 成本歸集

use rust_decimal::Decimal;

use mes_core::units::round_money;
use mes_core::{LineType, WorkOrder};

/// 成本計算器
pub struct CostingCalculator;

impl CostingCalculator {
    /// 物料成本：物料行實際成本合計
    pub fn material_cost(order: &WorkOrder) -> Decimal {
        order
            .lines
            .iter()
            .filter(|l| l.line_type == LineType::Material)
            .map(|l| l.actual_cost)
            .sum()
    }

    /// 費用成本：費用行合計
    pub fn overhead_cost(order: &WorkOrder) -> Decimal {
        order
            .lines
            .iter()
            .filter(|l| l.line_type == LineType::Overhead)
            .map(|l| l.actual_cost)
            .sum()
    }

    /// 實際總成本（2 位小數）
    pub fn total_cost(order: &WorkOrder) -> Decimal {
        round_money(Self::material_cost(order) + Self::overhead_cost(order))
    }

    /// 單位成本：總成本 / 實際產量；產量為零時為零
    ///
    /// 不捨入：產出批號的單位成本保留完整精度，
    /// 避免大量出入庫後的累積誤差。
    pub fn unit_cost(total_cost: Decimal, actual_qty: Decimal) -> Decimal {
        if actual_qty <= Decimal::ZERO {
            Decimal::ZERO
        } else {
            total_cost / actual_qty
        }
    }

    /// 重算工單的滾動實際成本（每次發料/費用後呼叫）
    pub fn recompute_running(order: &mut WorkOrder) {
        order.actual_cost = Some(Self::total_cost(order));
    }
}
