//! 配方展開

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use mes_core::units::{round_qty, to_canonical, UnitOfMeasure};
use mes_core::{MesError, ProductRepository, Recipe, Result};

/// 展開後的投料需求行
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequiredLine {
    /// 組成物料ID
    pub component_id: String,

    /// 需求數量（顯示單位）
    pub quantity: Decimal,

    /// 顯示單位
    pub unit: UnitOfMeasure,

    /// 需求數量（標準單位 kg，3 位小數）
    pub canonical_qty: Decimal,

    /// 行序（沿用配方行序）
    pub sequence: u32,
}

/// 配方展開引擎
pub struct RecipeExplosionEngine;

impl RecipeExplosionEngine {
    /// 展開配方
    ///
    /// 縮放係數 = 計劃量(kg) / 基準產量(kg)。基準產量為零或負值時
    /// 視為 1；係數本身非正時也鉗制為 1，保證展開一定有進度，
    /// 並以警告留痕。
    ///
    /// 逐行：需求量 = 行用量 × 係數，再經單位換算取得標準量
    /// （體積行使用組成物料的密度）。輸出保持配方行序。
    pub fn explode(
        recipe: &Recipe,
        planned_canonical_qty: Decimal,
        products: &impl ProductRepository,
    ) -> Result<Vec<RequiredLine>> {
        if !recipe.is_active {
            return Err(MesError::RecipeInactive(recipe.id.clone()));
        }
        if recipe.lines.is_empty() {
            return Err(MesError::EmptyRecipe(recipe.id.clone()));
        }

        let base_yield = if recipe.base_yield_qty <= Decimal::ZERO {
            tracing::warn!(
                "配方 {} 基準產量 {} 非正值，鉗制為 1",
                recipe.id,
                recipe.base_yield_qty
            );
            Decimal::ONE
        } else {
            recipe.base_yield_qty
        };

        let mut scale = planned_canonical_qty / base_yield;
        if scale <= Decimal::ZERO {
            tracing::warn!("配方 {} 縮放係數 {} 非正值，鉗制為 1", recipe.id, scale);
            scale = Decimal::ONE;
        }

        tracing::debug!(
            "展開配方 {}: 計劃量 {} / 基準產量 {} = 係數 {}",
            recipe.id,
            planned_canonical_qty,
            base_yield,
            scale
        );

        let mut lines = Vec::with_capacity(recipe.lines.len());
        for line in &recipe.lines {
            let quantity = line.quantity * scale;
            let density = products.density_of(&line.component_id);
            let canonical_qty = round_qty(to_canonical(quantity, line.unit, density)?);

            lines.push(RequiredLine {
                component_id: line.component_id.clone(),
                quantity,
                unit: line.unit,
                canonical_qty,
                sequence: line.sequence,
            });
        }

        Ok(lines)
    }
}
