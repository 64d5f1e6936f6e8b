//! # MES Work Order Engine
//!
//! 工單狀態機：配方展開、發料、品檢關卡、費用歸集、完工與作廢

pub mod config;
pub mod costing;
pub mod engine;
pub mod overhead;

// Re-export 主要類型
pub use config::EngineConfig;
pub use costing::CostingCalculator;
pub use engine::{CompletionOutcome, CreateOutcome, WorkOrderEngine};
pub use overhead::{OverheadCalculator, OverheadMethod, OverheadRate};

/// 引擎警告
///
/// 建立/下達工單時的非致命狀況（預留失敗、庫存缺口）。
/// 不中斷流程，由呼叫端決定是否處置；發料時才強制檢查庫存。
#[derive(Debug, Clone)]
pub struct EngineWarning {
    pub component_id: String,
    pub message: String,
    pub severity: WarningSeverity,
}

impl EngineWarning {
    pub fn new(component_id: String, message: String, severity: WarningSeverity) -> Self {
        Self {
            component_id,
            message,
            severity,
        }
    }

    pub fn info(component_id: String, message: String) -> Self {
        Self::new(component_id, message, WarningSeverity::Info)
    }

    pub fn warning(component_id: String, message: String) -> Self {
        Self::new(component_id, message, WarningSeverity::Warning)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningSeverity {
    Info,
    Warning,
}
