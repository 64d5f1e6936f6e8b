//! 工單狀態機

use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use mes_bom::{RecipeExplosionEngine, RequiredLine};
use mes_core::units::{round_money, round_qty, to_canonical, UnitOfMeasure};
use mes_core::{
    Batch, BatchStatus, LotSource, MesError, ProductRepository, QcStatus, QcTest, RecipeRepository,
    ReferenceType, ReservationSource, Result, WorkOrder, WorkOrderLine, WorkOrderStatus,
};
use mes_ledger::InventoryLedger;

use crate::config::EngineConfig;
use crate::costing::CostingCalculator;
use crate::overhead::{OverheadCalculator, OverheadMethod, OverheadRate};
use crate::EngineWarning;

/// 建立工單的結果
///
/// 建立時的預留失敗與庫存缺口以警告回傳而非丟棄。
/// 可用性在建立階段只是參考值，發料時才強制檢查。
#[derive(Debug)]
pub struct CreateOutcome {
    /// 工單ID
    pub work_order_id: Uuid,

    /// 非致命警告
    pub warnings: Vec<EngineWarning>,
}

/// 完工結果
#[derive(Debug)]
pub struct CompletionOutcome {
    /// 完工批次ID（產量為零時無批次）
    pub batch_id: Option<Uuid>,

    /// 產出批號ID
    pub output_lot_id: Option<Uuid>,

    /// 完工入庫交易ID
    pub movement_id: Option<Uuid>,

    /// 實際總成本
    pub actual_cost: Decimal,

    /// 單位成本
    pub unit_cost: Decimal,
}

/// 工單引擎
///
/// 串接配方展開與庫存帳，負責工單生命週期：
/// `draft → released → in_progress → complete`，任何非終結狀態可作廢，
/// 完工可經 `reopen` 回到生產中。
pub struct WorkOrderEngine<C>
where
    C: ProductRepository + RecipeRepository,
{
    catalog: C,
    ledger: InventoryLedger,
    orders: HashMap<Uuid, WorkOrder>,
    batches: HashMap<Uuid, Batch>,
    config: EngineConfig,
    next_sequence: u64,
}

fn invalid_status(order: &WorkOrder, operation: &'static str) -> MesError {
    MesError::InvalidStatus {
        work_order_id: order.id,
        current: order.status,
        operation,
    }
}

impl<C> WorkOrderEngine<C>
where
    C: ProductRepository + RecipeRepository,
{
    /// 創建新的工單引擎
    pub fn new(catalog: C, config: EngineConfig) -> Self {
        let next_sequence = config.starting_sequence;
        Self {
            catalog,
            ledger: InventoryLedger::new(),
            orders: HashMap::new(),
            batches: HashMap::new(),
            config,
            next_sequence,
        }
    }

    fn next_code(&mut self) -> String {
        let seq = self.next_sequence;
        self.next_sequence += 1;
        format!("{}-{:04}", self.config.code_prefix, seq)
    }

    // ---- 建立與計劃 ----

    /// 建立工單（草稿）
    ///
    /// 解析配方（指名配方或產品的現行主要配方）、換算計劃量、
    /// 展開投料需求，並對每一物料行嘗試建立預留。
    pub fn create(
        &mut self,
        product_id: &str,
        planned_qty: Decimal,
        planned_unit: UnitOfMeasure,
        recipe_id: Option<&str>,
    ) -> Result<CreateOutcome> {
        if planned_qty <= Decimal::ZERO {
            return Err(MesError::InvalidQuantity {
                context: "計劃數量",
                quantity: planned_qty,
            });
        }

        let product = self.catalog.product(product_id)?.clone();
        let recipe = match recipe_id {
            Some(rid) => {
                let recipe = RecipeRepository::recipe(&self.catalog, rid)?;
                if recipe.product_id != product_id {
                    return Err(MesError::NoRecipeForProduct(product_id.to_string()));
                }
                recipe.clone()
            }
            None => self.catalog.primary_recipe(product_id)?.clone(),
        };

        let planned_canonical = round_qty(to_canonical(planned_qty, planned_unit, product.density)?);
        let required = RecipeExplosionEngine::explode(&recipe, planned_canonical, &self.catalog)?;

        let code = self.next_code();
        let mut order = WorkOrder::new(
            code.clone(),
            product_id,
            recipe.id.clone(),
            planned_qty,
            planned_unit,
            planned_canonical,
        );
        let reference_id = order.id.to_string();

        let (lines, warnings, estimated) = self.build_material_lines(&reference_id, &required);
        order.lines = lines;
        order.estimated_cost = estimated;

        tracing::info!(
            "建立工單 {}: 產品 {} 計劃 {} kg, {} 行投料, {} 筆警告",
            code,
            product_id,
            planned_canonical,
            order.lines.len(),
            warnings.len()
        );

        let work_order_id = order.id;
        self.orders.insert(work_order_id, order);
        Ok(CreateOutcome {
            work_order_id,
            warnings,
        })
    }

    /// 依展開結果建立物料行並逐行嘗試預留
    fn build_material_lines(
        &mut self,
        reference_id: &str,
        required: &[RequiredLine],
    ) -> (Vec<WorkOrderLine>, Vec<EngineWarning>, Decimal) {
        let mut lines = Vec::with_capacity(required.len());
        let mut warnings = Vec::new();
        let mut estimated = Decimal::ZERO;

        for req in required {
            let mut line = WorkOrderLine::material(
                req.component_id.clone(),
                req.canonical_qty,
                req.quantity,
                req.unit,
                req.sequence,
            );

            match self.ledger.reserve(
                &req.component_id,
                req.canonical_qty,
                ReservationSource::Production,
                reference_id,
            ) {
                Ok(reservation) => line.reservation_id = Some(reservation.id),
                Err(e) => {
                    tracing::warn!("物料 {} 預留失敗: {}", req.component_id, e);
                    warnings.push(EngineWarning::warning(
                        req.component_id.clone(),
                        e.to_string(),
                    ));
                }
            }

            let on_hand = self.ledger.on_hand(&req.component_id);
            if on_hand < req.canonical_qty {
                warnings.push(EngineWarning::info(
                    req.component_id.clone(),
                    format!("庫存缺口: 需要 {}, 現有 {}", req.canonical_qty, on_hand),
                ));
            }

            if let Some(avg) = self.average_unit_cost(&req.component_id) {
                estimated += req.canonical_qty * avg;
            }

            lines.push(line);
        }

        (lines, warnings, round_money(estimated))
    }

    /// 現有庫存的加權平均單位成本（預估成本用）
    fn average_unit_cost(&self, product_id: &str) -> Option<Decimal> {
        let mut qty = Decimal::ZERO;
        let mut value = Decimal::ZERO;
        for lot in self.ledger.active_lots_for_product(product_id) {
            qty += lot.remaining_qty;
            value += lot.remaining_qty * lot.unit_cost;
        }
        if qty > Decimal::ZERO {
            Some(value / qty)
        } else {
            None
        }
    }

    /// 變更計劃數量（僅草稿）
    ///
    /// 釋放既有預留、捨棄既有行，按新數量重新展開並重新預留。
    pub fn update_planned_quantity(
        &mut self,
        work_order_id: Uuid,
        planned_qty: Decimal,
        planned_unit: UnitOfMeasure,
    ) -> Result<Vec<EngineWarning>> {
        if planned_qty <= Decimal::ZERO {
            return Err(MesError::InvalidQuantity {
                context: "計劃數量",
                quantity: planned_qty,
            });
        }

        let order = self.order(work_order_id)?;
        if order.status != WorkOrderStatus::Draft {
            return Err(invalid_status(order, "update_planned_quantity"));
        }
        let product_id = order.product_id.clone();
        let recipe_id = order.recipe_id.clone();

        let product = self.catalog.product(&product_id)?.clone();
        let recipe = RecipeRepository::recipe(&self.catalog, &recipe_id)?.clone();
        let planned_canonical = round_qty(to_canonical(planned_qty, planned_unit, product.density)?);
        let required = RecipeExplosionEngine::explode(&recipe, planned_canonical, &self.catalog)?;

        let reference_id = work_order_id.to_string();
        self.ledger
            .release_reservations_for(ReservationSource::Production, &reference_id);
        let (lines, warnings, estimated) = self.build_material_lines(&reference_id, &required);

        let order = self.order_mut(work_order_id)?;
        order.planned_qty = planned_qty;
        order.planned_unit = planned_unit;
        order.planned_canonical_qty = planned_canonical;
        order.lines = lines;
        order.estimated_cost = estimated;

        tracing::info!(
            "工單 {} 計劃量改為 {} kg，重新展開 {} 行",
            order.code,
            planned_canonical,
            order.lines.len()
        );
        Ok(warnings)
    }

    // ---- 狀態推進 ----

    /// 下達工單（草稿 → 已下達）
    ///
    /// 驗證配方仍啟用；物料可用性只做軟性檢查，缺口回傳警告
    /// 不擋下達，因為開工前上游入庫可能補足。
    pub fn release(&mut self, work_order_id: Uuid) -> Result<Vec<EngineWarning>> {
        let order = self.order(work_order_id)?;
        if order.status != WorkOrderStatus::Draft {
            return Err(invalid_status(order, "release"));
        }

        let recipe = RecipeRepository::recipe(&self.catalog, &order.recipe_id)?;
        if !recipe.is_active {
            return Err(MesError::RecipeInactive(recipe.id.clone()));
        }

        let mut warnings = Vec::new();
        for line in order.lines.iter().filter(|l| l.is_material()) {
            if let Some(component_id) = &line.component_id {
                let on_hand = self.ledger.on_hand(component_id);
                if on_hand < line.required_canonical_qty {
                    warnings.push(EngineWarning::warning(
                        component_id.clone(),
                        format!(
                            "庫存缺口: 需要 {}, 現有 {}",
                            line.required_canonical_qty, on_hand
                        ),
                    ));
                }
            }
        }

        let order = self.order_mut(work_order_id)?;
        order.status = WorkOrderStatus::Released;
        order.released_at = Some(Utc::now());
        tracing::info!("下達工單 {}，{} 筆缺口警告", order.code, warnings.len());
        Ok(warnings)
    }

    /// 開工（已下達 → 生產中）
    pub fn start(&mut self, work_order_id: Uuid) -> Result<()> {
        let order = self.order_mut(work_order_id)?;
        if order.status != WorkOrderStatus::Released {
            return Err(invalid_status(order, "start"));
        }
        order.status = WorkOrderStatus::InProgress;
        order.started_at = Some(Utc::now());
        tracing::info!("工單 {} 開工", order.code);
        Ok(())
    }

    // ---- 投料 ----

    /// 追加臨時投料行（非配方內物料）
    pub fn add_input_line(
        &mut self,
        work_order_id: Uuid,
        component_id: &str,
        quantity: Decimal,
        unit: UnitOfMeasure,
    ) -> Result<Uuid> {
        if quantity <= Decimal::ZERO {
            return Err(MesError::InvalidQuantity {
                context: "投料行數量",
                quantity,
            });
        }

        let order = self.order(work_order_id)?;
        if order.status.is_terminal() {
            return Err(invalid_status(order, "add_input_line"));
        }
        let sequence = order.lines.iter().map(|l| l.sequence).max().unwrap_or(0) + 10;

        let product = self.catalog.product(component_id)?.clone();
        let canonical = round_qty(to_canonical(quantity, unit, product.density)?);

        let mut line = WorkOrderLine::material(component_id, canonical, quantity, unit, sequence);
        let reference_id = work_order_id.to_string();
        match self.ledger.reserve(
            component_id,
            canonical,
            ReservationSource::Production,
            &reference_id,
        ) {
            Ok(reservation) => line.reservation_id = Some(reservation.id),
            Err(e) => tracing::warn!("臨時投料行 {} 預留失敗: {}", component_id, e),
        }

        let line_id = line.id;
        let estimated = self
            .average_unit_cost(component_id)
            .map(|avg| canonical * avg)
            .unwrap_or(Decimal::ZERO);

        let order = self.order_mut(work_order_id)?;
        order.lines.push(line);
        order.estimated_cost = round_money(order.estimated_cost + estimated);
        tracing::info!("工單 {} 追加投料行 {} ({} kg)", order.code, component_id, canonical);
        Ok(line_id)
    }

    /// 發料 / 退料
    ///
    /// 正數為發料：FIFO 扣帳並把成本掛上該行；該行的預留按實發量
    /// 遞減兌現，未發的餘量繼續保留到完工。
    /// 負數為退料：以該行已發量為上限，按行平均成本回補庫存。
    /// 返回實際異動的標準量（發料為正、退料為負）。
    pub fn issue_material(
        &mut self,
        work_order_id: Uuid,
        component_id: &str,
        quantity: Decimal,
        unit: UnitOfMeasure,
    ) -> Result<Decimal> {
        if quantity == Decimal::ZERO {
            return Err(MesError::InvalidQuantity {
                context: "發料數量",
                quantity,
            });
        }

        let order = self.order(work_order_id)?;
        if !order.status.allows_issue() {
            return Err(invalid_status(order, "issue_material"));
        }
        let line = order
            .material_line(component_id)
            .ok_or_else(|| MesError::MaterialLineNotFound {
                work_order_id,
                component_id: component_id.to_string(),
            })?;
        let line_id = line.id;
        let issued = line.issued_qty();
        let line_cost = line.actual_cost;
        let reservation_id = line.reservation_id;

        let product = self.catalog.product(component_id)?.clone();
        let canonical = round_qty(to_canonical(quantity.abs(), unit, product.density)?);
        let reference_id = work_order_id.to_string();

        if quantity > Decimal::ZERO {
            let events = self.ledger.consume_fifo(
                component_id,
                canonical,
                product.allow_negative_inventory,
                ReferenceType::WorkOrder,
                &reference_id,
                None,
            )?;

            // 預留按實發量兌現，未發的餘量繼續壓低可售量
            if let Some(rid) = reservation_id {
                if self.ledger.reservation(rid)?.is_active() {
                    self.ledger.redeem_reservation(rid, canonical)?;
                }
            }

            let cost: Decimal = events.iter().map(|e| e.quantity * e.unit_cost).sum();

            let order = self.order_mut(work_order_id)?;
            if let Some(line) = order.lines.iter_mut().find(|l| l.id == line_id) {
                line.actual_qty = Some(issued + canonical);
                line.actual_cost = round_money(line_cost + cost);
            }
            CostingCalculator::recompute_running(order);
            tracing::info!("工單 {} 發料 {} {} kg", order.code, component_id, canonical);
            Ok(canonical)
        } else {
            // 退料：上限為已發量
            let returned = canonical.min(issued);
            if returned <= Decimal::ZERO {
                return Err(MesError::InvalidQuantity {
                    context: "退料數量",
                    quantity: canonical,
                });
            }
            let avg_cost = line_cost / issued;

            self.ledger.return_material(
                component_id,
                returned,
                avg_cost,
                ReferenceType::WorkOrder,
                &reference_id,
            )?;

            let order = self.order_mut(work_order_id)?;
            if let Some(line) = order.lines.iter_mut().find(|l| l.id == line_id) {
                line.actual_qty = Some(issued - returned);
                line.actual_cost = round_money(line_cost - returned * avg_cost);
            }
            CostingCalculator::recompute_running(order);
            tracing::info!("工單 {} 退料 {} {} kg", order.code, component_id, returned);
            Ok(-returned)
        }
    }

    // ---- 品檢 ----

    /// 記錄品檢結果
    pub fn record_qc(&mut self, work_order_id: Uuid, test: QcTest) -> Result<Uuid> {
        let order = self.order_mut(work_order_id)?;
        if order.status.is_terminal() {
            return Err(invalid_status(order, "record_qc"));
        }
        let test_id = test.id;
        order.qc_tests.push(test);
        Ok(test_id)
    }

    /// 更新品檢判定
    pub fn update_qc(
        &mut self,
        work_order_id: Uuid,
        test_id: Uuid,
        status: QcStatus,
        result_value: Option<Decimal>,
        note: Option<String>,
    ) -> Result<()> {
        let order = self.order_mut(work_order_id)?;
        if order.status.is_terminal() {
            return Err(invalid_status(order, "update_qc"));
        }
        let test = order
            .qc_tests
            .iter_mut()
            .find(|t| t.id == test_id)
            .ok_or(MesError::QcTestNotFound(test_id))?;
        test.status = status;
        if result_value.is_some() {
            test.result_value = result_value;
        }
        if note.is_some() {
            test.note = note;
        }
        Ok(())
    }

    /// 刪除品檢記錄
    pub fn delete_qc(&mut self, work_order_id: Uuid, test_id: Uuid) -> Result<()> {
        let order = self.order_mut(work_order_id)?;
        if order.status.is_terminal() {
            return Err(invalid_status(order, "delete_qc"));
        }
        let before = order.qc_tests.len();
        order.qc_tests.retain(|t| t.id != test_id);
        if order.qc_tests.len() == before {
            return Err(MesError::QcTestNotFound(test_id));
        }
        Ok(())
    }

    // ---- 費用 ----

    /// 套用製造費用
    ///
    /// 工時制以開工時間起算到當下；產量制需給基準數量。
    /// 產生一筆費用行並重算滾動成本，返回費用金額。
    pub fn apply_overhead(
        &mut self,
        work_order_id: Uuid,
        rate: &OverheadRate,
        basis_qty: Option<Decimal>,
    ) -> Result<Decimal> {
        let order = self.order(work_order_id)?;
        if !order.status.allows_issue() {
            return Err(invalid_status(order, "apply_overhead"));
        }

        let amount = match rate.method {
            OverheadMethod::PerHour => {
                let started_at = order
                    .started_at
                    .ok_or_else(|| invalid_status(order, "apply_overhead"))?;
                OverheadCalculator::time_based(rate, started_at, Utc::now())
            }
            OverheadMethod::PerOutputUnit => {
                let basis = basis_qty.ok_or(MesError::InvalidQuantity {
                    context: "費用基準數量",
                    quantity: Decimal::ZERO,
                })?;
                OverheadCalculator::quantity_based(rate, basis)?
            }
        };

        let sequence = order.lines.iter().map(|l| l.sequence).max().unwrap_or(0) + 10;
        let order = self.order_mut(work_order_id)?;
        order
            .lines
            .push(WorkOrderLine::overhead(rate.code.clone(), amount, sequence));
        CostingCalculator::recompute_running(order);
        tracing::info!("工單 {} 套用費用 {} 金額 {}", order.code, rate.code, amount);
        Ok(amount)
    }

    // ---- 完工 ----

    /// 完工（生產中 → 已完工）
    ///
    /// 品檢關卡：任何待判定或不合格的品檢記錄都擋完工。
    /// 歸集物料與費用成本、計算單位成本、產出入庫為新批號、
    /// 建立完工批次（產量為零時免），並釋放殘餘預留。
    pub fn complete(
        &mut self,
        work_order_id: Uuid,
        actual_qty: Decimal,
        lot_code: Option<&str>,
    ) -> Result<CompletionOutcome> {
        if actual_qty < Decimal::ZERO {
            return Err(MesError::InvalidQuantity {
                context: "實際產量",
                quantity: actual_qty,
            });
        }

        let order = self.order(work_order_id)?;
        if order.status != WorkOrderStatus::InProgress {
            return Err(invalid_status(order, "complete"));
        }

        let pending = order.qc_pending_count();
        let failed = order.qc_failed_count();
        if pending > 0 || failed > 0 {
            return Err(MesError::QcNotSatisfied {
                work_order_id,
                pending,
                failed,
            });
        }

        let actual_cost = CostingCalculator::total_cost(order);
        let unit_cost = CostingCalculator::unit_cost(actual_cost, actual_qty);
        let product_id = order.product_id.clone();
        let code = order.code.clone();
        let reference_id = work_order_id.to_string();

        // 投入履歷：本工單發料動用到的來源批號
        let mut genealogy: Vec<Uuid> = Vec::new();
        for txn in self
            .ledger
            .transactions_for_reference(ReferenceType::WorkOrder, &reference_id)
        {
            if txn.is_issue() && !genealogy.contains(&txn.lot_id) {
                genealogy.push(txn.lot_id);
            }
        }

        self.ledger
            .release_reservations_for(ReservationSource::Production, &reference_id);

        let (batch_id, output_lot_id, movement_id) = if actual_qty > Decimal::ZERO {
            let generated_code = format!("FG-{}", code);
            let lot_code = lot_code.unwrap_or(generated_code.as_str());
            let lot = self.ledger.receive(
                &product_id,
                lot_code,
                actual_qty,
                unit_cost,
                Utc::now(),
                None,
                LotSource::Production,
                &reference_id,
            )?;
            let movement_id = self
                .ledger
                .transactions_for_lot(lot.id)
                .first()
                .map(|t| t.id);

            let batch = Batch {
                id: Uuid::new_v4(),
                work_order_id,
                product_id: product_id.clone(),
                lot_id: lot.id,
                produced_qty: actual_qty,
                genealogy,
                status: BatchStatus::Open,
                created_at: Utc::now(),
            };
            let batch_id = batch.id;
            self.batches.insert(batch_id, batch);
            (Some(batch_id), Some(lot.id), movement_id)
        } else {
            (None, None, None)
        };

        let order = self.order_mut(work_order_id)?;
        order.status = WorkOrderStatus::Complete;
        order.completed_at = Some(Utc::now());
        order.actual_output_qty = Some(actual_qty);
        order.actual_cost = Some(actual_cost);
        order.batch_id = batch_id;

        tracing::info!(
            "工單 {} 完工: 產量 {} kg 總成本 {} 單位成本 {}",
            order.code,
            actual_qty,
            actual_cost,
            unit_cost
        );

        Ok(CompletionOutcome {
            batch_id,
            output_lot_id,
            movement_id,
            actual_cost,
            unit_cost,
        })
    }

    // ---- 作廢與重開 ----

    /// 作廢（任何非終結狀態）
    ///
    /// 對本工單的每筆庫存異動寫入反向沖銷交易：發料回補原批號、
    /// 退料扣回退料批號，淨效果為本工單從未動過庫存。
    /// 原交易不動；已轉耗用的預留不受影響。
    pub fn void(&mut self, work_order_id: Uuid, reason: &str) -> Result<()> {
        let order = self.order(work_order_id)?;
        if order.status.is_terminal() {
            return Err(invalid_status(order, "void"));
        }

        let reference_id = work_order_id.to_string();
        let note = format!("作廢: {}", reason);
        self.ledger
            .compensate_movements(ReferenceType::WorkOrder, &reference_id, &note)?;
        self.ledger
            .release_reservations_for(ReservationSource::Production, &reference_id);

        let order = self.order_mut(work_order_id)?;
        order.append_note(note);
        order.status = WorkOrderStatus::Void;
        tracing::info!("工單 {} 作廢: {}", order.code, reason);
        Ok(())
    }

    /// 重開已完工的工單（已完工 → 生產中）
    ///
    /// 刻意的、留痕的撤銷：撤除完工批次、產出批號與完工入庫交易，
    /// 清除實際產量與完工時間。物料行的耗用保持不動：
    /// 庫存帳上的發料仍然成立，成本歸集照舊。
    pub fn reopen(&mut self, work_order_id: Uuid, reason: &str) -> Result<()> {
        let order = self.order(work_order_id)?;
        if order.status != WorkOrderStatus::Complete {
            return Err(invalid_status(order, "reopen"));
        }
        let batch_id = order.batch_id;

        if let Some(batch_id) = batch_id {
            let batch = self
                .batches
                .remove(&batch_id)
                .ok_or(MesError::WorkOrderNotFound(work_order_id))?;
            self.ledger.remove_receipt(batch.lot_id)?;
        }

        let order = self.order_mut(work_order_id)?;
        order.batch_id = None;
        order.actual_output_qty = None;
        order.completed_at = None;
        order.status = WorkOrderStatus::InProgress;
        order.append_note(format!("重開: {}", reason));
        CostingCalculator::recompute_running(order);
        tracing::info!("工單 {} 重開: {}", order.code, reason);
        Ok(())
    }

    // ---- 查詢 ----

    /// 依ID取得工單
    pub fn order(&self, work_order_id: Uuid) -> Result<&WorkOrder> {
        self.orders
            .get(&work_order_id)
            .ok_or(MesError::WorkOrderNotFound(work_order_id))
    }

    fn order_mut(&mut self, work_order_id: Uuid) -> Result<&mut WorkOrder> {
        self.orders
            .get_mut(&work_order_id)
            .ok_or(MesError::WorkOrderNotFound(work_order_id))
    }

    /// 依ID取得完工批次
    pub fn batch(&self, batch_id: Uuid) -> Option<&Batch> {
        self.batches.get(&batch_id)
    }

    /// 庫存帳（唯讀）
    pub fn ledger(&self) -> &InventoryLedger {
        &self.ledger
    }

    /// 庫存帳（可寫，供入庫採購原料等外部補給）
    pub fn ledger_mut(&mut self) -> &mut InventoryLedger {
        &mut self.ledger
    }

    /// 主檔引用
    pub fn catalog(&self) -> &C {
        &self.catalog
    }
}
