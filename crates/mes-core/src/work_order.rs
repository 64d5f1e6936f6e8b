//! 工單模型

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::units::UnitOfMeasure;

/// 工單狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkOrderStatus {
    /// 草稿
    Draft,
    /// 已下達
    Released,
    /// 生產中
    InProgress,
    /// 已完工
    Complete,
    /// 已作廢
    Void,
}

impl WorkOrderStatus {
    /// 是否為終結狀態（完工可經 reopen 回到生產中）
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete | Self::Void)
    }

    /// 是否允許發料/退料
    pub fn allows_issue(&self) -> bool {
        matches!(self, Self::Released | Self::InProgress)
    }
}

impl std::fmt::Display for WorkOrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Released => write!(f, "released"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Complete => write!(f, "complete"),
            Self::Void => write!(f, "void"),
        }
    }
}

/// 工單行類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineType {
    /// 物料投入
    Material,
    /// 製造費用
    Overhead,
}

/// 工單行
///
/// 一行代表一項物料投入或一筆製造費用。
/// 物料行由發料/退料異動 `actual_qty` 與 `actual_cost`；
/// 費用行在建立時即定額。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkOrderLine {
    /// 行ID
    pub id: Uuid,

    /// 行類型
    pub line_type: LineType,

    /// 物料ID（純費用行為 None）
    pub component_id: Option<String>,

    /// 需求數量（標準單位 kg）
    pub required_canonical_qty: Decimal,

    /// 計劃數量（顯示單位）
    pub planned_qty: Decimal,

    /// 顯示單位
    pub planned_unit: UnitOfMeasure,

    /// 實際耗用淨量（發料 - 退料，標準單位 kg）
    pub actual_qty: Option<Decimal>,

    /// 實際成本（物料行為耗用成本，費用行為定額）
    pub actual_cost: Decimal,

    /// 費率代碼（費用行）
    pub rate_code: Option<String>,

    /// 關聯預留ID
    pub reservation_id: Option<Uuid>,

    /// 行序
    pub sequence: u32,
}

impl WorkOrderLine {
    /// 創建物料行
    pub fn material(
        component_id: impl Into<String>,
        required_canonical_qty: Decimal,
        planned_qty: Decimal,
        planned_unit: UnitOfMeasure,
        sequence: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            line_type: LineType::Material,
            component_id: Some(component_id.into()),
            required_canonical_qty,
            planned_qty,
            planned_unit,
            actual_qty: None,
            actual_cost: Decimal::ZERO,
            rate_code: None,
            reservation_id: None,
            sequence,
        }
    }

    /// 創建費用行（定額）
    pub fn overhead(rate_code: impl Into<String>, amount: Decimal, sequence: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            line_type: LineType::Overhead,
            component_id: None,
            required_canonical_qty: Decimal::ZERO,
            planned_qty: Decimal::ZERO,
            planned_unit: UnitOfMeasure::Kilogram,
            actual_qty: None,
            actual_cost: amount,
            rate_code: Some(rate_code.into()),
            reservation_id: None,
            sequence,
        }
    }

    /// 已發出的淨量
    pub fn issued_qty(&self) -> Decimal {
        self.actual_qty.unwrap_or(Decimal::ZERO)
    }

    /// 是否為物料行
    pub fn is_material(&self) -> bool {
        self.line_type == LineType::Material
    }
}

/// 品檢狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QcStatus {
    /// 待判定
    Pending,
    /// 合格
    Pass,
    /// 不合格
    Fail,
}

/// 品檢記錄
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QcTest {
    /// 記錄ID
    pub id: Uuid,

    /// 檢驗項目名稱
    pub name: String,

    /// 判定狀態
    pub status: QcStatus,

    /// 量測值
    pub result_value: Option<Decimal>,

    /// 備註
    pub note: Option<String>,

    /// 記錄時間
    pub recorded_at: DateTime<Utc>,
}

impl QcTest {
    /// 創建新的品檢記錄（預設待判定）
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            status: QcStatus::Pending,
            result_value: None,
            note: None,
            recorded_at: Utc::now(),
        }
    }

    /// 建構器模式：設置判定狀態
    pub fn with_status(mut self, status: QcStatus) -> Self {
        self.status = status;
        self
    }

    /// 建構器模式：設置量測值
    pub fn with_result_value(mut self, value: Decimal) -> Self {
        self.result_value = Some(value);
        self
    }

    /// 是否阻擋完工
    pub fn blocks_completion(&self) -> bool {
        matches!(self.status, QcStatus::Pending | QcStatus::Fail)
    }
}

/// 批次狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchStatus {
    /// 開放（可出貨/再加工）
    Open,
    /// 已結案
    Closed,
}

/// 完工批次（產出履歷）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Batch {
    /// 批次ID
    pub id: Uuid,

    /// 工單ID
    pub work_order_id: Uuid,

    /// 產出產品ID
    pub product_id: String,

    /// 產出批號ID
    pub lot_id: Uuid,

    /// 產出數量（標準單位 kg）
    pub produced_qty: Decimal,

    /// 投入履歷（耗用來源批號ID）
    pub genealogy: Vec<Uuid>,

    /// 狀態
    pub status: BatchStatus,

    /// 建立時間
    pub created_at: DateTime<Utc>,
}

/// 工單
///
/// 一次生產運行。配方於建立時鎖定，之後配方異動不影響既有工單。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkOrder {
    /// 工單ID
    pub id: Uuid,

    /// 工單代碼（人讀）
    pub code: String,

    /// 產出產品ID
    pub product_id: String,

    /// 配方ID（建立時鎖定）
    pub recipe_id: String,

    /// 計劃數量（顯示單位）
    pub planned_qty: Decimal,

    /// 顯示單位
    pub planned_unit: UnitOfMeasure,

    /// 計劃數量（標準單位 kg）
    pub planned_canonical_qty: Decimal,

    /// 狀態
    pub status: WorkOrderStatus,

    /// 建立時間
    pub created_at: DateTime<Utc>,

    /// 下達時間
    pub released_at: Option<DateTime<Utc>>,

    /// 開工時間
    pub started_at: Option<DateTime<Utc>>,

    /// 完工時間
    pub completed_at: Option<DateTime<Utc>>,

    /// 預估成本
    pub estimated_cost: Decimal,

    /// 實際成本（完工時結算）
    pub actual_cost: Option<Decimal>,

    /// 實際產出數量（標準單位 kg）
    pub actual_output_qty: Option<Decimal>,

    /// 工單行
    pub lines: Vec<WorkOrderLine>,

    /// 品檢記錄
    pub qc_tests: Vec<QcTest>,

    /// 完工批次ID
    pub batch_id: Option<Uuid>,

    /// 備註（作廢原因等，逐筆附加）
    pub notes: Vec<String>,
}

impl WorkOrder {
    /// 創建新的工單（草稿）
    pub fn new(
        code: impl Into<String>,
        product_id: impl Into<String>,
        recipe_id: impl Into<String>,
        planned_qty: Decimal,
        planned_unit: UnitOfMeasure,
        planned_canonical_qty: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            code: code.into(),
            product_id: product_id.into(),
            recipe_id: recipe_id.into(),
            planned_qty,
            planned_unit,
            planned_canonical_qty,
            status: WorkOrderStatus::Draft,
            created_at: Utc::now(),
            released_at: None,
            started_at: None,
            completed_at: None,
            estimated_cost: Decimal::ZERO,
            actual_cost: None,
            actual_output_qty: None,
            lines: Vec::new(),
            qc_tests: Vec::new(),
            batch_id: None,
            notes: Vec::new(),
        }
    }

    /// 依物料ID找物料行
    pub fn material_line(&self, component_id: &str) -> Option<&WorkOrderLine> {
        self.lines
            .iter()
            .find(|l| l.is_material() && l.component_id.as_deref() == Some(component_id))
    }

    /// 待判定的品檢筆數
    pub fn qc_pending_count(&self) -> usize {
        self.qc_tests
            .iter()
            .filter(|t| t.status == QcStatus::Pending)
            .count()
    }

    /// 不合格的品檢筆數
    pub fn qc_failed_count(&self) -> usize {
        self.qc_tests
            .iter()
            .filter(|t| t.status == QcStatus::Fail)
            .count()
    }

    /// 附加備註
    pub fn append_note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_predicates() {
        assert!(!WorkOrderStatus::Draft.is_terminal());
        assert!(WorkOrderStatus::Complete.is_terminal());
        assert!(WorkOrderStatus::Void.is_terminal());
        assert!(WorkOrderStatus::Released.allows_issue());
        assert!(WorkOrderStatus::InProgress.allows_issue());
        assert!(!WorkOrderStatus::Draft.allows_issue());
    }

    #[test]
    fn test_qc_blocking() {
        assert!(QcTest::new("黏度").blocks_completion());
        assert!(QcTest::new("黏度")
            .with_status(QcStatus::Fail)
            .blocks_completion());
        let passed = QcTest::new("黏度")
            .with_status(QcStatus::Pass)
            .with_result_value(Decimal::from(92));
        assert!(!passed.blocks_completion());
        assert_eq!(passed.result_value, Some(Decimal::from(92)));
    }

    #[test]
    fn test_material_line_lookup() {
        let mut order = WorkOrder::new(
            "WO-0001",
            "PAINT-A",
            "RCP-PAINT-A",
            Decimal::from(50),
            UnitOfMeasure::Kilogram,
            Decimal::from(50),
        );
        order.lines.push(WorkOrderLine::material(
            "RESIN-X",
            Decimal::from(30),
            Decimal::from(30),
            UnitOfMeasure::Kilogram,
            10,
        ));
        order
            .lines
            .push(WorkOrderLine::overhead("LABOR", Decimal::from(20), 20));

        assert!(order.material_line("RESIN-X").is_some());
        assert!(order.material_line("LABOR").is_none());
        assert_eq!(order.qc_pending_count(), 0);
    }
}
