//! 批號庫存帳

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mes_core::{
    Lot, LotSource, MesError, ReferenceType, Reservation, ReservationSource, ReservationStatus,
    Result, StockTransaction,
};

/// 單一批號的耗用事件
///
/// `consume_fifo` 對每個被扣帳的批號回傳一筆，
/// 數量與該批號當下的單位成本供呼叫端做成本歸集。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsumptionEvent {
    /// 批號ID
    pub lot_id: Uuid,

    /// 批號代碼
    pub lot_code: String,

    /// 扣帳數量（正值，標準單位 kg）
    pub quantity: Decimal,

    /// 該批號單位成本
    pub unit_cost: Decimal,
}

/// 庫存帳
///
/// 擁有批號、交易與預留三類記錄。所有異動方法都以 `&mut self`
/// 為交易邊界：單一一致性域內一次呼叫即一個原子工作單元。
#[derive(Debug, Default)]
pub struct InventoryLedger {
    lots: Vec<Lot>,
    transactions: Vec<StockTransaction>,
    reservations: Vec<Reservation>,
}

impl InventoryLedger {
    /// 創建空帳本
    pub fn new() -> Self {
        Self::default()
    }

    // ---- 入庫 ----

    /// 採購/完工入庫：建立新批號與正向交易
    pub fn receive(
        &mut self,
        product_id: &str,
        lot_code: &str,
        quantity: Decimal,
        unit_cost: Decimal,
        received_at: DateTime<Utc>,
        expires_at: Option<DateTime<Utc>>,
        source: LotSource,
        reference_id: &str,
    ) -> Result<Lot> {
        if quantity <= Decimal::ZERO {
            return Err(MesError::InvalidQuantity {
                context: "入庫數量",
                quantity,
            });
        }

        let mut lot = Lot::new(product_id, lot_code, quantity, unit_cost, received_at, source);
        if let Some(expires_at) = expires_at {
            lot = lot.with_expires_at(expires_at);
        }

        self.transactions.push(StockTransaction::new(
            lot.id,
            product_id,
            quantity,
            unit_cost,
            ReferenceType::Receipt,
            reference_id,
        ));

        tracing::info!(
            "入庫: 產品 {} 批號 {} 數量 {} 成本 {}",
            product_id,
            lot_code,
            quantity,
            unit_cost
        );

        self.lots.push(lot.clone());
        Ok(lot)
    }

    /// 發料退回：以退回來源建立新批號，交易掛在呼叫端單據上
    pub fn return_material(
        &mut self,
        product_id: &str,
        quantity: Decimal,
        unit_cost: Decimal,
        reference_type: ReferenceType,
        reference_id: &str,
    ) -> Result<Lot> {
        if quantity <= Decimal::ZERO {
            return Err(MesError::InvalidQuantity {
                context: "退料數量",
                quantity,
            });
        }

        let lot_code = format!("RET-{}", &Uuid::new_v4().to_string()[..8]);
        let lot = Lot::new(
            product_id,
            lot_code.as_str(),
            quantity,
            unit_cost,
            Utc::now(),
            LotSource::MaterialReturn,
        );

        self.transactions.push(StockTransaction::new(
            lot.id,
            product_id,
            quantity,
            unit_cost,
            reference_type,
            reference_id,
        ));

        tracing::info!(
            "退料入庫: 產品 {} 批號 {} 數量 {}",
            product_id,
            lot_code,
            quantity
        );

        self.lots.push(lot.clone());
        Ok(lot)
    }

    // ---- FIFO 發料 ----

    /// FIFO 發料
    ///
    /// 依 (入庫時間, 批號ID) 升冪走訪生效中的批號逐批扣帳。
    /// 全有或全無：可用量不足且不允許負庫存時不產生任何異動，
    /// 返回 `InsufficientStock`。允許負庫存時由最後一個批號承受負值。
    pub fn consume_fifo(
        &mut self,
        product_id: &str,
        quantity: Decimal,
        allow_negative: bool,
        reference_type: ReferenceType,
        reference_id: &str,
        note: Option<&str>,
    ) -> Result<Vec<ConsumptionEvent>> {
        if quantity <= Decimal::ZERO {
            return Err(MesError::InvalidQuantity {
                context: "發料數量",
                quantity,
            });
        }

        // 候選批號：生效中且有餘量，FIFO 排序
        let mut candidates: Vec<usize> = self
            .lots
            .iter()
            .enumerate()
            .filter(|(_, l)| l.product_id == product_id && l.is_active && l.remaining_qty > Decimal::ZERO)
            .map(|(i, _)| i)
            .collect();
        candidates.sort_by(|&a, &b| {
            let (la, lb) = (&self.lots[a], &self.lots[b]);
            la.received_at
                .cmp(&lb.received_at)
                .then(la.id.cmp(&lb.id))
        });

        let available: Decimal = candidates.iter().map(|&i| self.lots[i].remaining_qty).sum();

        if available < quantity && !allow_negative {
            return Err(MesError::InsufficientStock {
                product_id: product_id.to_string(),
                requested: quantity,
                available,
            });
        }
        if candidates.is_empty() {
            // 允許負庫存仍需有批號可承受負值
            return Err(MesError::InsufficientStock {
                product_id: product_id.to_string(),
                requested: quantity,
                available: Decimal::ZERO,
            });
        }

        // 先規劃再套用：規劃階段不異動任何批號
        let mut debits: Vec<(usize, Decimal)> = Vec::new();
        let mut outstanding = quantity;
        for &i in &candidates {
            if outstanding <= Decimal::ZERO {
                break;
            }
            let take = outstanding.min(self.lots[i].remaining_qty);
            debits.push((i, take));
            outstanding -= take;
        }
        if outstanding > Decimal::ZERO {
            // 允許負庫存：缺口由最後一個批號承受
            let (_, take) = debits
                .last_mut()
                .ok_or_else(|| MesError::InsufficientStock {
                    product_id: product_id.to_string(),
                    requested: quantity,
                    available,
                })?;
            *take += outstanding;
        }

        let mut events = Vec::with_capacity(debits.len());
        for (i, take) in debits {
            let lot = &mut self.lots[i];
            lot.remaining_qty -= take;
            let lot_id = lot.id;
            let lot_code = lot.lot_code.clone();
            let unit_cost = lot.unit_cost;
            let remaining = lot.remaining_qty;

            let mut txn = StockTransaction::new(
                lot_id,
                product_id,
                -take,
                unit_cost,
                reference_type,
                reference_id,
            );
            if let Some(note) = note {
                txn = txn.with_note(note);
            }
            self.transactions.push(txn);

            tracing::debug!("FIFO 扣帳: 批號 {} 取 {} 餘 {}", lot_code, take, remaining);

            events.push(ConsumptionEvent {
                lot_id,
                lot_code,
                quantity: take,
                unit_cost,
            });
        }

        tracing::info!(
            "發料完成: 產品 {} 數量 {} 動用 {} 個批號",
            product_id,
            quantity,
            events.len()
        );

        Ok(events)
    }

    // ---- 預留 ----

    /// 建立預留
    ///
    /// 同一 (來源, 單據, 產品) 已有生效中的預留時返回 `DuplicateReservation`。
    pub fn reserve(
        &mut self,
        product_id: &str,
        quantity: Decimal,
        source: ReservationSource,
        reference_id: &str,
    ) -> Result<Reservation> {
        if quantity <= Decimal::ZERO {
            return Err(MesError::InvalidQuantity {
                context: "預留數量",
                quantity,
            });
        }

        let duplicate = self.reservations.iter().any(|r| {
            r.is_active()
                && r.product_id == product_id
                && r.source == source
                && r.reference_id == reference_id
        });
        if duplicate {
            return Err(MesError::DuplicateReservation {
                product_id: product_id.to_string(),
                channel: source,
                reference_id: reference_id.to_string(),
            });
        }

        let reservation = Reservation::new(product_id, quantity, source, reference_id);
        tracing::debug!(
            "建立預留: 產品 {} 數量 {} 來源 {} 單據 {}",
            product_id,
            quantity,
            source,
            reference_id
        );
        self.reservations.push(reservation.clone());
        Ok(reservation)
    }

    /// 預留轉耗用：對預留的產品/數量執行 FIFO 發料後標記為已轉耗用
    pub fn commit_reservation(&mut self, reservation_id: Uuid) -> Result<Vec<ConsumptionEvent>> {
        let reservation = self
            .reservations
            .iter()
            .find(|r| r.id == reservation_id)
            .ok_or(MesError::ReservationNotFound(reservation_id))?;

        if !reservation.is_active() {
            return Err(MesError::ReservationNotActive {
                reservation_id,
                status: reservation.status,
            });
        }

        let product_id = reservation.product_id.clone();
        let quantity = reservation.quantity;
        let reference_id = reservation_id.to_string();

        let events = self.consume_fifo(
            &product_id,
            quantity,
            false,
            ReferenceType::ReservationCommit,
            &reference_id,
            None,
        )?;

        let reservation = self
            .reservations
            .iter_mut()
            .find(|r| r.id == reservation_id)
            .ok_or(MesError::ReservationNotFound(reservation_id))?;
        reservation.status = ReservationStatus::Committed;

        tracing::info!("預留轉耗用: {} 產品 {} 數量 {}", reservation_id, product_id, quantity);
        Ok(events)
    }

    /// 預留兌現：按實際發料量遞減生效中的預留
    ///
    /// 殘餘數量繼續壓低可售量；遞減至零（或超量發料）即標記為
    /// 已轉耗用。不動庫存，實際扣帳由呼叫端的發料完成。
    pub fn redeem_reservation(&mut self, reservation_id: Uuid, quantity: Decimal) -> Result<()> {
        let reservation = self
            .reservations
            .iter_mut()
            .find(|r| r.id == reservation_id)
            .ok_or(MesError::ReservationNotFound(reservation_id))?;

        if !reservation.is_active() {
            return Err(MesError::ReservationNotActive {
                reservation_id,
                status: reservation.status,
            });
        }

        if quantity >= reservation.quantity {
            reservation.quantity = Decimal::ZERO;
            reservation.status = ReservationStatus::Committed;
        } else {
            reservation.quantity -= quantity;
        }
        tracing::debug!(
            "預留兌現: {} 扣減 {} 餘 {}",
            reservation_id,
            quantity,
            reservation.quantity
        );
        Ok(())
    }

    /// 釋放預留（不動庫存）
    pub fn release_reservation(&mut self, reservation_id: Uuid) -> Result<()> {
        let reservation = self
            .reservations
            .iter_mut()
            .find(|r| r.id == reservation_id)
            .ok_or(MesError::ReservationNotFound(reservation_id))?;

        if !reservation.is_active() {
            return Err(MesError::ReservationNotActive {
                reservation_id,
                status: reservation.status,
            });
        }

        reservation.status = ReservationStatus::Released;
        tracing::debug!("釋放預留: {}", reservation_id);
        Ok(())
    }

    /// 釋放某單據下所有生效中的預留，返回釋放筆數
    pub fn release_reservations_for(
        &mut self,
        source: ReservationSource,
        reference_id: &str,
    ) -> usize {
        let mut released = 0;
        for r in self
            .reservations
            .iter_mut()
            .filter(|r| r.is_active() && r.source == source && r.reference_id == reference_id)
        {
            r.status = ReservationStatus::Released;
            released += 1;
        }
        if released > 0 {
            tracing::debug!("釋放單據 {} 的 {} 筆預留", reference_id, released);
        }
        released
    }

    // ---- 作廢沖銷 ----

    /// 沖銷某單據的所有庫存異動
    ///
    /// 對每筆交易寫入反號的 `VoidCompensation` 交易：發料回補原批號，
    /// 退料入庫則扣回退料批號，淨效果歸零。原交易保持不變
    /// （帳不可改，只能沖）。
    pub fn compensate_movements(
        &mut self,
        reference_type: ReferenceType,
        reference_id: &str,
        note: &str,
    ) -> Result<Vec<ConsumptionEvent>> {
        let movements: Vec<(Uuid, Decimal, Decimal)> = self
            .transactions
            .iter()
            .filter(|t| t.reference_type == reference_type && t.reference_id == reference_id)
            .map(|t| (t.lot_id, t.quantity, t.unit_cost))
            .collect();

        let mut events = Vec::with_capacity(movements.len());
        for (lot_id, quantity, unit_cost) in movements {
            let lot = self
                .lots
                .iter_mut()
                .find(|l| l.id == lot_id)
                .ok_or(MesError::LotNotFound(lot_id))?;

            let restored = -quantity; // 發料為負反號回補，退料為正反號扣回
            lot.remaining_qty += restored;

            let product_id = lot.product_id.clone();
            let lot_code = lot.lot_code.clone();
            self.transactions.push(
                StockTransaction::new(
                    lot_id,
                    product_id,
                    restored,
                    unit_cost,
                    ReferenceType::VoidCompensation,
                    reference_id,
                )
                .with_note(note),
            );

            tracing::debug!("沖銷回補: 批號 {} 數量 {}", lot_code, restored);
            events.push(ConsumptionEvent {
                lot_id,
                lot_code,
                quantity: restored,
                unit_cost,
            });
        }

        tracing::info!("作廢沖銷: 單據 {} 沖銷 {} 筆交易", reference_id, events.len());
        Ok(events)
    }

    /// 移除入庫批號及其交易
    ///
    /// 僅供完工重開使用：完工產出的批號連同入庫交易一併撤除。
    pub fn remove_receipt(&mut self, lot_id: Uuid) -> Result<()> {
        let idx = self
            .lots
            .iter()
            .position(|l| l.id == lot_id)
            .ok_or(MesError::LotNotFound(lot_id))?;

        self.lots.remove(idx);
        self.transactions.retain(|t| t.lot_id != lot_id);
        tracing::info!("撤除完工批號: {}", lot_id);
        Ok(())
    }

    // ---- 查詢 ----

    /// 現有庫存量（生效中批號餘量合計）
    pub fn on_hand(&self, product_id: &str) -> Decimal {
        self.lots
            .iter()
            .filter(|l| l.product_id == product_id && l.is_active)
            .map(|l| l.remaining_qty)
            .sum()
    }

    /// 可售量 = 現有庫存 - 生效中預留合計
    ///
    /// 超額預留時可能為負，屬可回報狀況而非錯誤。
    pub fn available_to_sell(&self, product_id: &str) -> Decimal {
        let reserved: Decimal = self
            .reservations
            .iter()
            .filter(|r| r.is_active() && r.product_id == product_id)
            .map(|r| r.quantity)
            .sum();
        self.on_hand(product_id) - reserved
    }

    /// 產品的批號（FIFO 順序，含已耗盡批號）
    pub fn lots_for_product(&self, product_id: &str) -> Vec<&Lot> {
        let mut lots: Vec<&Lot> = self
            .lots
            .iter()
            .filter(|l| l.product_id == product_id)
            .collect();
        lots.sort_by(|a, b| a.received_at.cmp(&b.received_at).then(a.id.cmp(&b.id)));
        lots
    }

    /// 產品的生效中且有餘量的批號（庫存視圖），FIFO 排序
    pub fn active_lots_for_product(&self, product_id: &str) -> Vec<&Lot> {
        let mut lots: Vec<&Lot> = self
            .lots
            .iter()
            .filter(|l| l.product_id == product_id && l.is_active && !l.is_exhausted())
            .collect();
        lots.sort_by(|a, b| a.received_at.cmp(&b.received_at).then(a.id.cmp(&b.id)));
        lots
    }

    /// 依ID取得批號
    pub fn lot(&self, lot_id: Uuid) -> Result<&Lot> {
        self.lots
            .iter()
            .find(|l| l.id == lot_id)
            .ok_or(MesError::LotNotFound(lot_id))
    }

    /// 批號的所有交易
    pub fn transactions_for_lot(&self, lot_id: Uuid) -> Vec<&StockTransaction> {
        self.transactions
            .iter()
            .filter(|t| t.lot_id == lot_id)
            .collect()
    }

    /// 某單據的所有交易
    pub fn transactions_for_reference(
        &self,
        reference_type: ReferenceType,
        reference_id: &str,
    ) -> Vec<&StockTransaction> {
        self.transactions
            .iter()
            .filter(|t| t.reference_type == reference_type && t.reference_id == reference_id)
            .collect()
    }

    /// 依ID取得預留
    pub fn reservation(&self, reservation_id: Uuid) -> Result<&Reservation> {
        self.reservations
            .iter()
            .find(|r| r.id == reservation_id)
            .ok_or(MesError::ReservationNotFound(reservation_id))
    }

    /// 帳務守恆檢查：每個批號的餘額 = 該批號交易量的累計
    pub fn reconciles(&self) -> bool {
        self.lots.iter().all(|lot| {
            let sum: Decimal = self
                .transactions
                .iter()
                .filter(|t| t.lot_id == lot.id)
                .map(|t| t.quantity)
                .sum();
            sum == lot.remaining_qty
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, d, 8, 0, 0).unwrap()
    }

    fn reconciles(ledger: &InventoryLedger, lot_id: Uuid) -> bool {
        let sum: Decimal = ledger
            .transactions_for_lot(lot_id)
            .iter()
            .map(|t| t.quantity)
            .sum();
        sum == ledger.lot(lot_id).unwrap().remaining_qty
    }

    #[test]
    fn test_receive_creates_lot_and_transaction() {
        let mut ledger = InventoryLedger::new();
        let lot = ledger
            .receive(
                "RESIN-X",
                "LOT-001",
                Decimal::from(50),
                Decimal::from(4),
                day(1),
                None,
                LotSource::Purchase,
                "PO-001",
            )
            .unwrap();

        assert_eq!(ledger.on_hand("RESIN-X"), Decimal::from(50));
        assert_eq!(ledger.transactions_for_lot(lot.id).len(), 1);
        assert!(reconciles(&ledger, lot.id));
    }

    #[test]
    fn test_receive_rejects_non_positive_quantity() {
        let mut ledger = InventoryLedger::new();
        let result = ledger.receive(
            "RESIN-X",
            "LOT-001",
            Decimal::ZERO,
            Decimal::from(4),
            day(1),
            None,
            LotSource::Purchase,
            "PO-001",
        );
        assert!(matches!(result, Err(MesError::InvalidQuantity { .. })));
    }

    #[test]
    fn test_fifo_order_is_deterministic() {
        // L1 第1天 50kg，L2 第2天 50kg → 消耗 60kg 必定是 [L1: 50, L2: 10]
        let mut ledger = InventoryLedger::new();
        let l1 = ledger
            .receive("RESIN-X", "L1", Decimal::from(50), Decimal::from(4), day(1), None, LotSource::Purchase, "PO-1")
            .unwrap();
        let l2 = ledger
            .receive("RESIN-X", "L2", Decimal::from(50), Decimal::from(5), day(2), None, LotSource::Purchase, "PO-2")
            .unwrap();

        let events = ledger
            .consume_fifo("RESIN-X", Decimal::from(60), false, ReferenceType::WorkOrder, "WO-1", None)
            .unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].lot_id, l1.id);
        assert_eq!(events[0].quantity, Decimal::from(50));
        assert_eq!(events[0].unit_cost, Decimal::from(4));
        assert_eq!(events[1].lot_id, l2.id);
        assert_eq!(events[1].quantity, Decimal::from(10));
        assert_eq!(events[1].unit_cost, Decimal::from(5));

        assert!(reconciles(&ledger, l1.id));
        assert!(reconciles(&ledger, l2.id));
    }

    #[test]
    fn test_consume_insufficient_is_all_or_nothing() {
        let mut ledger = InventoryLedger::new();
        let lot = ledger
            .receive("RESIN-X", "L1", Decimal::from(30), Decimal::from(4), day(1), None, LotSource::Purchase, "PO-1")
            .unwrap();

        let result = ledger.consume_fifo(
            "RESIN-X",
            Decimal::from(40),
            false,
            ReferenceType::WorkOrder,
            "WO-1",
            None,
        );

        assert!(matches!(
            result,
            Err(MesError::InsufficientStock { ref product_id, requested, available })
                if product_id == "RESIN-X"
                    && requested == Decimal::from(40)
                    && available == Decimal::from(30)
        ));
        // 沒有任何批號被扣帳
        assert_eq!(ledger.on_hand("RESIN-X"), Decimal::from(30));
        assert_eq!(ledger.transactions_for_lot(lot.id).len(), 1);
    }

    #[test]
    fn test_consume_allow_negative_drives_last_lot_negative() {
        let mut ledger = InventoryLedger::new();
        let lot = ledger
            .receive("FILLER-Z", "L1", Decimal::from(30), Decimal::from(2), day(1), None, LotSource::Purchase, "PO-1")
            .unwrap();

        let events = ledger
            .consume_fifo("FILLER-Z", Decimal::from(40), true, ReferenceType::WorkOrder, "WO-1", None)
            .unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].quantity, Decimal::from(40));
        assert_eq!(ledger.lot(lot.id).unwrap().remaining_qty, Decimal::from(-10));
        assert!(reconciles(&ledger, lot.id));
    }

    #[test]
    fn test_consume_allow_negative_without_lots_fails() {
        let mut ledger = InventoryLedger::new();
        let result = ledger.consume_fifo(
            "GHOST",
            Decimal::from(5),
            true,
            ReferenceType::WorkOrder,
            "WO-1",
            None,
        );
        assert!(matches!(result, Err(MesError::InsufficientStock { .. })));
    }

    #[test]
    fn test_duplicate_reservation_rejected() {
        let mut ledger = InventoryLedger::new();
        ledger
            .reserve("RESIN-X", Decimal::from(10), ReservationSource::SalesChannel, "SO-1")
            .unwrap();

        let result = ledger.reserve(
            "RESIN-X",
            Decimal::from(5),
            ReservationSource::SalesChannel,
            "SO-1",
        );
        assert!(matches!(result, Err(MesError::DuplicateReservation { .. })));

        // 錯誤訊息帶出通路與單據
        let message = result.unwrap_err().to_string();
        assert!(message.contains("sales_channel"));
        assert!(message.contains("SO-1"));

        // 不同單據或不同來源不衝突
        assert!(ledger
            .reserve("RESIN-X", Decimal::from(5), ReservationSource::SalesChannel, "SO-2")
            .is_ok());
        assert!(ledger
            .reserve("RESIN-X", Decimal::from(5), ReservationSource::Production, "SO-1")
            .is_ok());
    }

    #[test]
    fn test_reservation_released_then_reservable_again() {
        let mut ledger = InventoryLedger::new();
        let r = ledger
            .reserve("RESIN-X", Decimal::from(10), ReservationSource::SalesChannel, "SO-1")
            .unwrap();
        ledger.release_reservation(r.id).unwrap();

        // 釋放後同一組鍵可再預留
        assert!(ledger
            .reserve("RESIN-X", Decimal::from(10), ReservationSource::SalesChannel, "SO-1")
            .is_ok());

        // 已釋放不可再釋放
        assert!(matches!(
            ledger.release_reservation(r.id),
            Err(MesError::ReservationNotActive { .. })
        ));
    }

    #[test]
    fn test_redeem_reservation_partial_then_full() {
        let mut ledger = InventoryLedger::new();
        ledger
            .receive("RESIN-X", "L1", Decimal::from(100), Decimal::from(4), day(1), None, LotSource::Purchase, "PO-1")
            .unwrap();
        let r = ledger
            .reserve("RESIN-X", Decimal::from(30), ReservationSource::Production, "WO-1")
            .unwrap();

        // 部分兌現：餘量仍生效、繼續壓低可售量
        ledger.redeem_reservation(r.id, Decimal::from(10)).unwrap();
        let reservation = ledger.reservation(r.id).unwrap();
        assert!(reservation.is_active());
        assert_eq!(reservation.quantity, Decimal::from(20));
        assert_eq!(ledger.available_to_sell("RESIN-X"), Decimal::from(80));

        // 超量兌現視同全額：轉為已轉耗用
        ledger.redeem_reservation(r.id, Decimal::from(25)).unwrap();
        let reservation = ledger.reservation(r.id).unwrap();
        assert_eq!(reservation.status, ReservationStatus::Committed);
        assert_eq!(reservation.quantity, Decimal::ZERO);

        // 已轉耗用不可再兌現
        assert!(matches!(
            ledger.redeem_reservation(r.id, Decimal::ONE),
            Err(MesError::ReservationNotActive { .. })
        ));
    }

    #[test]
    fn test_commit_reservation_consumes_fifo() {
        let mut ledger = InventoryLedger::new();
        ledger
            .receive("RESIN-X", "L1", Decimal::from(50), Decimal::from(4), day(1), None, LotSource::Purchase, "PO-1")
            .unwrap();
        let r = ledger
            .reserve("RESIN-X", Decimal::from(20), ReservationSource::SalesChannel, "SO-1")
            .unwrap();

        let events = ledger.commit_reservation(r.id).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].quantity, Decimal::from(20));
        assert_eq!(ledger.on_hand("RESIN-X"), Decimal::from(30));
        assert_eq!(
            ledger.reservation(r.id).unwrap().status,
            ReservationStatus::Committed
        );

        // 已轉耗用不可再轉
        assert!(matches!(
            ledger.commit_reservation(r.id),
            Err(MesError::ReservationNotActive { .. })
        ));
    }

    #[test]
    fn test_available_to_sell_subtracts_active_reservations() {
        let mut ledger = InventoryLedger::new();
        ledger
            .receive("RESIN-X", "L1", Decimal::from(100), Decimal::from(4), day(1), None, LotSource::Purchase, "PO-1")
            .unwrap();
        let r = ledger
            .reserve("RESIN-X", Decimal::from(30), ReservationSource::Production, "WO-1")
            .unwrap();
        ledger
            .reserve("RESIN-X", Decimal::from(90), ReservationSource::SalesChannel, "SO-1")
            .unwrap();

        // 超額預留：可售量為負屬可回報狀況
        assert_eq!(ledger.available_to_sell("RESIN-X"), Decimal::from(-20));

        ledger.release_reservation(r.id).unwrap();
        assert_eq!(ledger.available_to_sell("RESIN-X"), Decimal::from(10));
    }

    #[test]
    fn test_return_material_creates_return_lot() {
        let mut ledger = InventoryLedger::new();
        let lot = ledger
            .return_material("RESIN-X", Decimal::from(5), Decimal::from(4), ReferenceType::WorkOrder, "WO-1")
            .unwrap();

        assert_eq!(lot.source, LotSource::MaterialReturn);
        assert_eq!(ledger.on_hand("RESIN-X"), Decimal::from(5));
        assert!(reconciles(&ledger, lot.id));
    }

    #[test]
    fn test_compensate_movements_restores_stock() {
        let mut ledger = InventoryLedger::new();
        let lot = ledger
            .receive("RESIN-X", "L1", Decimal::from(50), Decimal::from(4), day(1), None, LotSource::Purchase, "PO-1")
            .unwrap();
        ledger
            .consume_fifo("RESIN-X", Decimal::from(10), false, ReferenceType::WorkOrder, "WO-1", None)
            .unwrap();
        assert_eq!(ledger.on_hand("RESIN-X"), Decimal::from(40));

        let events = ledger
            .compensate_movements(ReferenceType::WorkOrder, "WO-1", "作廢: 客戶取消")
            .unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].quantity, Decimal::from(10));
        assert_eq!(ledger.on_hand("RESIN-X"), Decimal::from(50));

        // 原發料交易未被修改，而是多了一筆沖銷交易
        let txns = ledger.transactions_for_lot(lot.id);
        assert_eq!(txns.len(), 3);
        assert!(txns.iter().any(|t| t.quantity == Decimal::from(-10)));
        assert!(txns
            .iter()
            .any(|t| t.reference_type == ReferenceType::VoidCompensation
                && t.quantity == Decimal::from(10)));
        assert!(reconciles(&ledger, lot.id));
    }

    #[test]
    fn test_compensate_movements_nets_out_returns() {
        // 發 30 後退 10：沖銷須扣回退料批號，總量回到 100 而非 110
        let mut ledger = InventoryLedger::new();
        let lot = ledger
            .receive("RESIN-X", "L1", Decimal::from(100), Decimal::from(4), day(1), None, LotSource::Purchase, "PO-1")
            .unwrap();
        ledger
            .consume_fifo("RESIN-X", Decimal::from(30), false, ReferenceType::WorkOrder, "WO-1", None)
            .unwrap();
        let return_lot = ledger
            .return_material("RESIN-X", Decimal::from(10), Decimal::from(4), ReferenceType::WorkOrder, "WO-1")
            .unwrap();
        assert_eq!(ledger.on_hand("RESIN-X"), Decimal::from(80));

        let events = ledger
            .compensate_movements(ReferenceType::WorkOrder, "WO-1", "作廢: 客戶取消")
            .unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(ledger.on_hand("RESIN-X"), Decimal::from(100));
        assert_eq!(ledger.lot(lot.id).unwrap().remaining_qty, Decimal::from(100));
        assert_eq!(
            ledger.lot(return_lot.id).unwrap().remaining_qty,
            Decimal::ZERO
        );
        assert!(reconciles(&ledger, lot.id));
        assert!(reconciles(&ledger, return_lot.id));
    }

    #[test]
    fn test_lots_for_product_fifo_order_includes_exhausted() {
        let mut ledger = InventoryLedger::new();
        let l2 = ledger
            .receive("RESIN-X", "L2", Decimal::from(10), Decimal::from(4), day(2), None, LotSource::Purchase, "PO-2")
            .unwrap();
        let l1 = ledger
            .receive("RESIN-X", "L1", Decimal::from(10), Decimal::from(4), day(1), None, LotSource::Purchase, "PO-1")
            .unwrap();

        // 耗盡 L1
        ledger
            .consume_fifo("RESIN-X", Decimal::from(10), false, ReferenceType::WorkOrder, "WO-1", None)
            .unwrap();

        let lots = ledger.lots_for_product("RESIN-X");
        assert_eq!(lots.len(), 2);
        assert_eq!(lots[0].id, l1.id);
        assert!(lots[0].is_exhausted());
        assert_eq!(lots[1].id, l2.id);

        // 庫存視圖：耗盡的批號不出現
        let active = ledger.active_lots_for_product("RESIN-X");
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, l2.id);
    }

    #[test]
    fn test_remove_receipt_erases_lot_and_transactions() {
        let mut ledger = InventoryLedger::new();
        let lot = ledger
            .receive("PAINT-A", "FG-1", Decimal::from(48), Decimal::from(3), day(5), None, LotSource::Production, "WO-1")
            .unwrap();

        ledger.remove_receipt(lot.id).unwrap();
        assert!(matches!(ledger.lot(lot.id), Err(MesError::LotNotFound(_))));
        assert!(ledger.transactions_for_lot(lot.id).is_empty());
        assert_eq!(ledger.on_hand("PAINT-A"), Decimal::ZERO);
    }
}
