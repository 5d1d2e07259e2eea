// ==========================================
// 制造分析演示引擎 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 顺序: 默认值 → JSON 配置文件 → 环境变量 → 校验
// ==========================================

use crate::domain::types::LotSizing;
use crate::domain::SupplierWeights;
use crate::engine::requirements::MrpPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

// ==========================================
// 配置错误
// ==========================================
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    FileReadError { path: String, message: String },

    #[error("配置文件解析失败 ({path}): {message}")]
    ParseError { path: String, message: String },

    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },
}

// ==========================================
// 夹具路径覆写（缺省使用内置夹具）
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixturePaths {
    pub bom: Option<PathBuf>,
    pub production: Option<PathBuf>,
    pub quality: Option<PathBuf>,
    pub suppliers: Option<PathBuf>,
}

// ==========================================
// DemoConfig - 演示引擎配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// 默认顶层需求
    pub default_demand_qty: u32,
    /// 默认批量策略
    pub default_lot_sizing: LotSizing,
    /// 固定批量倍数
    pub fixed_lot_multiple: f64,
    /// 最小订货量
    pub min_order_qty: f64,
    /// 每次模拟延误追加的天数
    pub delay_increment_days: i64,
    /// 在库量伪值的取模基数
    pub on_hand_modulus: u32,
    /// 初始折叠的节点
    pub initially_collapsed: Vec<String>,
    /// 实时模拟刷新间隔（毫秒）
    pub live_feed_interval_ms: u64,
    /// 实时模拟单次最大波动（百分点）
    pub live_feed_max_delta: f64,
    /// 供应商评分默认权重
    pub default_supplier_weights: SupplierWeights,
    /// 界面语言（en / zh-CN）
    pub locale: String,
    /// 外部夹具路径
    pub fixtures: FixturePaths,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            default_demand_qty: 100,
            default_lot_sizing: LotSizing::LotForLot,
            fixed_lot_multiple: 50.0,
            min_order_qty: 100.0,
            delay_increment_days: 5,
            on_hand_modulus: 50,
            initially_collapsed: Vec::new(),
            live_feed_interval_ms: 3000,
            live_feed_max_delta: 2.0,
            default_supplier_weights: SupplierWeights::default(),
            locale: "en".to_string(),
            fixtures: FixturePaths::default(),
        }
    }
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    config: DemoConfig,
    source: Option<PathBuf>,
}

impl ConfigManager {
    /// 仅使用默认值
    pub fn new() -> Self {
        Self::default()
    }

    /// 加载配置
    ///
    /// # 参数
    /// - explicit_path: 命令行指定的配置文件（优先级最高）
    ///
    /// # 说明
    /// 未显式指定时依次尝试 `NKJ_DEMO_CONFIG` 与用户配置目录下的
    /// `nkj-demo/config.json`;都不存在则只用默认值。
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit_path {
            Some(p) => Some(p.to_path_buf()),
            None => std::env::var(config_keys::ENV_CONFIG_PATH)
                .ok()
                .map(PathBuf::from)
                .or_else(|| default_config_path().filter(|p| p.exists())),
        };

        let mut manager = match path {
            Some(p) => Self::from_file(&p)?,
            None => Self::new(),
        };

        manager.apply_overrides_from(|key| std::env::var(key).ok())?;
        manager.validate()?;

        tracing::info!(
            source = ?manager.source,
            lot_sizing = %manager.config.default_lot_sizing,
            demand = manager.config.default_demand_qty,
            "配置加载完成"
        );
        Ok(manager)
    }

    /// 从 JSON 文件读取（缺省字段取默认值）
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::FileReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config: DemoConfig = serde_json::from_str(&raw).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            config,
            source: Some(path.to_path_buf()),
        })
    }

    /// 从已有配置构造（测试/嵌入使用）
    pub fn from_config(config: DemoConfig) -> Self {
        Self {
            config,
            source: None,
        }
    }

    /// 应用环境变量覆写
    ///
    /// lookup 用于注入取值来源,便于测试时不触碰进程环境
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(config_keys::ENV_DEFAULT_DEMAND) {
            self.config.default_demand_qty =
                v.trim().parse().map_err(|e| ConfigError::InvalidValue {
                    key: config_keys::DEFAULT_DEMAND_QTY.to_string(),
                    value: v.clone(),
                    message: format!("{}", e),
                })?;
        }

        if let Some(v) = lookup(config_keys::ENV_LOT_SIZING) {
            self.config.default_lot_sizing =
                LotSizing::from_str(&v).ok_or_else(|| ConfigError::InvalidValue {
                    key: config_keys::DEFAULT_LOT_SIZING.to_string(),
                    value: v.clone(),
                    message: "应为 lfl / fixed / eoq".to_string(),
                })?;
        }

        if let Some(v) = lookup(config_keys::ENV_LIVE_INTERVAL_MS) {
            self.config.live_feed_interval_ms =
                v.trim().parse().map_err(|e| ConfigError::InvalidValue {
                    key: config_keys::LIVE_FEED_INTERVAL_MS.to_string(),
                    value: v.clone(),
                    message: format!("{}", e),
                })?;
        }

        if let Some(v) = lookup(config_keys::ENV_LOCALE) {
            let locale = v.trim();
            if !locale.is_empty() {
                self.config.locale = locale.to_string();
            }
        }

        Ok(())
    }

    /// 校验配置取值
    pub fn validate(&self) -> Result<(), ConfigError> {
        let c = &self.config;

        if !(c.fixed_lot_multiple.is_finite() && c.fixed_lot_multiple > 0.0) {
            return Err(invalid(
                config_keys::FIXED_LOT_MULTIPLE,
                c.fixed_lot_multiple,
                "必须为正数",
            ));
        }
        if !(c.min_order_qty.is_finite() && c.min_order_qty >= 0.0) {
            return Err(invalid(config_keys::MIN_ORDER_QTY, c.min_order_qty, "不能为负数"));
        }
        if c.on_hand_modulus == 0 {
            return Err(invalid(config_keys::ON_HAND_MODULUS, c.on_hand_modulus, "必须大于 0"));
        }
        if c.delay_increment_days <= 0 {
            return Err(invalid(
                config_keys::DELAY_INCREMENT_DAYS,
                c.delay_increment_days,
                "必须大于 0",
            ));
        }
        if c.live_feed_interval_ms == 0 {
            return Err(invalid(
                config_keys::LIVE_FEED_INTERVAL_MS,
                c.live_feed_interval_ms,
                "必须大于 0",
            ));
        }
        if !(c.live_feed_max_delta.is_finite() && c.live_feed_max_delta >= 0.0) {
            return Err(invalid(
                config_keys::LIVE_FEED_MAX_DELTA,
                c.live_feed_max_delta,
                "不能为负数",
            ));
        }

        Ok(())
    }

    // ==========================================
    // 查询
    // ==========================================

    pub fn config(&self) -> &DemoConfig {
        &self.config
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// 需求计算策略参数
    pub fn mrp_policy(&self) -> MrpPolicy {
        MrpPolicy {
            fixed_lot_multiple: self.config.fixed_lot_multiple,
            min_order_qty: self.config.min_order_qty,
            on_hand_modulus: self.config.on_hand_modulus,
        }
    }

    /// 获取所有配置的快照（JSON格式）
    ///
    /// 用于日志记录与 `--json` 输出
    pub fn get_config_snapshot(&self) -> String {
        serde_json::to_string(&self.config).unwrap_or_else(|_| "{}".to_string())
    }
}

fn invalid(key: &str, value: impl std::fmt::Display, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        message: message.to_string(),
    }
}

/// 用户配置目录下的默认配置文件路径
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("nkj-demo").join("config.json"))
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 需求计算
    pub const DEFAULT_DEMAND_QTY: &str = "default_demand_qty";
    pub const DEFAULT_LOT_SIZING: &str = "default_lot_sizing";
    pub const FIXED_LOT_MULTIPLE: &str = "fixed_lot_multiple";
    pub const MIN_ORDER_QTY: &str = "min_order_qty";
    pub const DELAY_INCREMENT_DAYS: &str = "delay_increment_days";
    pub const ON_HAND_MODULUS: &str = "on_hand_modulus";

    // 实时模拟
    pub const LIVE_FEED_INTERVAL_MS: &str = "live_feed_interval_ms";
    pub const LIVE_FEED_MAX_DELTA: &str = "live_feed_max_delta";

    // 环境变量
    pub const ENV_CONFIG_PATH: &str = "NKJ_DEMO_CONFIG";
    pub const ENV_DEFAULT_DEMAND: &str = "NKJ_DEMO_DEFAULT_DEMAND";
    pub const ENV_LOT_SIZING: &str = "NKJ_DEMO_LOT_SIZING";
    pub const ENV_LIVE_INTERVAL_MS: &str = "NKJ_DEMO_LIVE_INTERVAL_MS";
    pub const ENV_LOCALE: &str = "NKJ_DEMO_LOCALE";
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_match_demo_constants() {
        let manager = ConfigManager::new();
        let c = manager.config();
        assert_eq!(c.default_demand_qty, 100);
        assert_eq!(c.fixed_lot_multiple, 50.0);
        assert_eq!(c.min_order_qty, 100.0);
        assert_eq!(c.delay_increment_days, 5);
        assert_eq!(c.on_hand_modulus, 50);
        assert!(manager.validate().is_ok());
    }

    #[test]
    fn test_env_overrides_applied() {
        let env: HashMap<&str, &str> = HashMap::from([
            (config_keys::ENV_DEFAULT_DEMAND, "250"),
            (config_keys::ENV_LOT_SIZING, "eoq"),
            (config_keys::ENV_LOCALE, "zh-CN"),
        ]);
        let mut manager = ConfigManager::new();
        manager
            .apply_overrides_from(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(manager.config().default_demand_qty, 250);
        assert_eq!(manager.config().default_lot_sizing, LotSizing::MinEoq);
        assert_eq!(manager.config().locale, "zh-CN");
    }

    #[test]
    fn test_bad_env_value_rejected() {
        let mut manager = ConfigManager::new();
        let err = manager
            .apply_overrides_from(|k| {
                (k == config_keys::ENV_LOT_SIZING).then(|| "weekly".to_string())
            })
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == config_keys::DEFAULT_LOT_SIZING));
    }

    #[test]
    fn test_zero_modulus_invalid() {
        let config = DemoConfig {
            on_hand_modulus: 0,
            ..DemoConfig::default()
        };
        let manager = ConfigManager::from_config(config);
        assert!(manager.validate().is_err(), "取模基数为 0 应校验失败");
    }

    #[test]
    fn test_snapshot_is_json() {
        let snapshot = ConfigManager::new().get_config_snapshot();
        let value: serde_json::Value = serde_json::from_str(&snapshot).unwrap();
        assert_eq!(value["default_lot_sizing"], "lot-for-lot");
    }
}
