// ==========================================
// 制造分析演示引擎 - 配置层
// ==========================================
// 职责: 系统配置管理,支持文件与环境变量覆写
// 存储: JSON 文件（可选）
// ==========================================

pub mod config_manager;

// 重导出核心配置管理器
pub use config_manager::{
    config_keys, default_config_path, ConfigError, ConfigManager, DemoConfig, FixturePaths,
};
