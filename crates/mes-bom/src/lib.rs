//! # MES BOM Explosion
//!
//! 配方展開引擎：將基準產量配方縮放為指定計劃量的投料需求

pub mod explosion;

// Re-export 主要類型
pub use explosion::{RecipeExplosionEngine, RequiredLine};
