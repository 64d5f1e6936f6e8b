//! 主檔查詢介面
//!
//! 產品與配方主檔由外部儲存層提供，核心只透過這兩個 trait 查詢。
//! `StaticCatalog` 為 HashMap 後端的實現，供引擎、測試與示例使用。

use std::collections::HashMap;

use crate::product::Product;
use crate::recipe::Recipe;
use crate::{MesError, Result};

/// 產品主檔查詢
pub trait ProductRepository {
    /// 依ID取得產品
    fn product(&self, product_id: &str) -> Result<&Product>;

    /// 依ID取得密度（產品不存在視同無密度）
    fn density_of(&self, product_id: &str) -> Option<rust_decimal::Decimal> {
        self.product(product_id).ok().and_then(|p| p.density)
    }
}

/// 配方主檔查詢
pub trait RecipeRepository {
    /// 依ID取得配方
    fn recipe(&self, recipe_id: &str) -> Result<&Recipe>;

    /// 取得產品的現行主要配方
    fn primary_recipe(&self, product_id: &str) -> Result<&Recipe>;
}

/// HashMap 後端的主檔
#[derive(Debug, Default)]
pub struct StaticCatalog {
    products: HashMap<String, Product>,
    recipes: HashMap<String, Recipe>,
}

impl StaticCatalog {
    /// 創建空主檔
    pub fn new() -> Self {
        Self::default()
    }

    /// 登錄產品
    pub fn add_product(&mut self, product: Product) {
        self.products.insert(product.id.clone(), product);
    }

    /// 登錄配方
    pub fn add_recipe(&mut self, recipe: Recipe) {
        self.recipes.insert(recipe.id.clone(), recipe);
    }

    /// 建構器模式：登錄產品
    pub fn with_product(mut self, product: Product) -> Self {
        self.add_product(product);
        self
    }

    /// 建構器模式：登錄配方
    pub fn with_recipe(mut self, recipe: Recipe) -> Self {
        self.add_recipe(recipe);
        self
    }
}

impl ProductRepository for StaticCatalog {
    fn product(&self, product_id: &str) -> Result<&Product> {
        self.products
            .get(product_id)
            .ok_or_else(|| MesError::ProductNotFound(product_id.to_string()))
    }
}

impl RecipeRepository for StaticCatalog {
    fn recipe(&self, recipe_id: &str) -> Result<&Recipe> {
        self.recipes
            .get(recipe_id)
            .ok_or_else(|| MesError::RecipeNotFound(recipe_id.to_string()))
    }

    fn primary_recipe(&self, product_id: &str) -> Result<&Recipe> {
        self.recipes
            .values()
            .find(|r| r.product_id == product_id && r.is_primary && r.is_active)
            .ok_or_else(|| MesError::NoRecipeForProduct(product_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::UnitOfMeasure;
    use rust_decimal::Decimal;

    #[test]
    fn test_catalog_lookup() {
        let catalog = StaticCatalog::new()
            .with_product(Product::new("PAINT-A", "水性漆A", UnitOfMeasure::Kilogram))
            .with_recipe(
                Recipe::new("RCP-1", "PAINT-A", "標準配方", Decimal::from(100)).as_primary(),
            );

        assert!(catalog.product("PAINT-A").is_ok());
        assert!(matches!(
            catalog.product("MISSING"),
            Err(MesError::ProductNotFound(_))
        ));
        assert_eq!(catalog.primary_recipe("PAINT-A").unwrap().id, "RCP-1");
    }

    #[test]
    fn test_primary_recipe_requires_active() {
        let catalog = StaticCatalog::new().with_recipe(
            Recipe::new("RCP-OLD", "PAINT-B", "停用配方", Decimal::from(100))
                .as_primary()
                .with_active(false),
        );

        assert!(matches!(
            catalog.primary_recipe("PAINT-B"),
            Err(MesError::NoRecipeForProduct(_))
        ));
    }
}
