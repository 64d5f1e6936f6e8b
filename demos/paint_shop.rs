//! 小型塗料廠示例：從進料到完工入庫的完整流程

use chrono::Utc;
use mes::{
    EngineConfig, LotSource, OverheadRate, Product, QcStatus, QcTest, Recipe, RecipeLine,
    StaticCatalog, UnitOfMeasure, WorkOrderEngine,
};
use rust_decimal::Decimal;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    println!("=== 塗料廠工單示例 ===\n");

    // 主檔：產品與配方（基準產量 100 kg）
    let catalog = StaticCatalog::new()
        .with_product(Product::new("PAINT-A", "水性漆A", UnitOfMeasure::Kilogram))
        .with_product(Product::new("RESIN-X", "樹脂X", UnitOfMeasure::Kilogram))
        .with_product(
            Product::new("SOLVENT-Y", "溶劑Y", UnitOfMeasure::Liter)
                .with_density(Decimal::new(8, 1)),
        )
        .with_recipe(
            Recipe::new("RCP-PAINT-A", "PAINT-A", "標準配方", Decimal::from(100))
                .with_line(RecipeLine::new(
                    "RESIN-X",
                    Decimal::from(60),
                    UnitOfMeasure::Kilogram,
                    10,
                ))
                .with_line(RecipeLine::new(
                    "SOLVENT-Y",
                    Decimal::from(50),
                    UnitOfMeasure::Liter,
                    20,
                ))
                .as_primary(),
        );

    let mut engine = WorkOrderEngine::new(catalog, EngineConfig::new().with_code_prefix("PT"));

    // 採購進料
    engine.ledger_mut().receive(
        "RESIN-X",
        "R-2401",
        Decimal::from(200),
        Decimal::from(4),
        Utc::now(),
        None,
        LotSource::Purchase,
        "PO-1001",
    )?;
    engine.ledger_mut().receive(
        "SOLVENT-Y",
        "S-2401",
        Decimal::from(100),
        Decimal::from(2),
        Utc::now(),
        None,
        LotSource::Purchase,
        "PO-1002",
    )?;

    // 建立 50 kg 的工單並下達開工
    let outcome = engine.create("PAINT-A", Decimal::from(50), UnitOfMeasure::Kilogram, None)?;
    let wo_id = outcome.work_order_id;
    for w in &outcome.warnings {
        println!("警告 [{}]: {}", w.component_id, w.message);
    }

    engine.release(wo_id)?;
    engine.start(wo_id)?;

    let order = engine.order(wo_id)?;
    println!("工單 {} 投料需求:", order.code);
    for line in &order.lines {
        if let Some(component) = &line.component_id {
            println!("  - {}: {} kg", component, line.required_canonical_qty);
        }
    }

    // 發料（溶劑以公升計，帳上換算為 kg）
    engine.issue_material(wo_id, "RESIN-X", Decimal::from(30), UnitOfMeasure::Kilogram)?;
    engine.issue_material(wo_id, "SOLVENT-Y", Decimal::from(25), UnitOfMeasure::Liter)?;

    // 品檢與製造費用
    let qc_id = engine.record_qc(wo_id, QcTest::new("黏度"))?;
    engine.update_qc(wo_id, qc_id, QcStatus::Pass, Some(Decimal::from(92)), None)?;
    engine.apply_overhead(
        wo_id,
        &OverheadRate::per_output_unit("ENERGY", Decimal::new(5, 1)),
        Some(Decimal::from(48)),
    )?;

    // 完工 48 kg
    let completion = engine.complete(wo_id, Decimal::from(48), Some("PT-B001"))?;
    println!("\n完工結果:");
    println!("  總成本: {}", completion.actual_cost);
    println!("  單位成本: {}", completion.unit_cost);
    if let Some(batch_id) = completion.batch_id {
        if let Some(batch) = engine.batch(batch_id) {
            println!("  批次產量: {} kg, 投入批號 {} 個", batch.produced_qty, batch.genealogy.len());
        }
    }
    println!("  成品庫存: {} kg", engine.ledger().on_hand("PAINT-A"));

    Ok(())
}
