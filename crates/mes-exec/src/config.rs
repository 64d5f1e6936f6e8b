//! 引擎配置

/// 工單引擎配置
///
/// 於程序啟動時建構並顯式傳入引擎，不使用全域可變設定。
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// 工單代碼前綴
    pub code_prefix: String,

    /// 工單代碼起始流水號
    pub starting_sequence: u64,
}

impl EngineConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self {
            code_prefix: "WO".to_string(),
            starting_sequence: 1,
        }
    }

    /// 建構器模式：設置代碼前綴
    pub fn with_code_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.code_prefix = prefix.into();
        self
    }

    /// 建構器模式：設置起始流水號
    pub fn with_starting_sequence(mut self, seq: u64) -> Self {
        self.starting_sequence = seq;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = EngineConfig::new()
            .with_code_prefix("MO")
            .with_starting_sequence(100);

        assert_eq!(config.code_prefix, "MO");
        assert_eq!(config.starting_sequence, 100);
    }
}
