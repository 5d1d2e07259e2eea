// ==========================================
// 制造分析演示引擎 - 领域类型定义
// ==========================================
// 职责: 批量策略、OEE 等级、供应商评分等级、缺陷严重度
// 红线: 纯值类型,不含计算逻辑
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 批量策略 (Lot Sizing)
// ==========================================
// 纯函数选择器: 只决定毛需求如何调整
// 序列化格式: kebab-case (lot-for-lot / fixed / min-eoq)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LotSizing {
    #[default]
    LotForLot, // 按需批量(不调整)
    Fixed,     // 固定批量(向上取整到批量倍数)
    MinEoq,    // 最小订货量(下限)
}

impl fmt::Display for LotSizing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LotSizing::LotForLot => write!(f, "lot-for-lot"),
            LotSizing::Fixed => write!(f, "fixed"),
            LotSizing::MinEoq => write!(f, "min-eoq"),
        }
    }
}

impl LotSizing {
    /// 从字符串解析批量策略
    ///
    /// 同时接受界面短码（lfl / fixed / eoq）与完整名称，大小写不敏感
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "lfl" | "lot-for-lot" | "lot_for_lot" => Some(LotSizing::LotForLot),
            "fixed" => Some(LotSizing::Fixed),
            "eoq" | "min-eoq" | "min/eoq" | "min_eoq" => Some(LotSizing::MinEoq),
            _ => None,
        }
    }
}

// ==========================================
// OEE 等级 (OEE Band)
// ==========================================
// 顺序: Low < Typical < WorldClass
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OeeBand {
    Low,        // < 60
    Typical,    // 60 ~ 85
    WorldClass, // >= 85
}

impl fmt::Display for OeeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OeeBand::Low => write!(f, "LOW"),
            OeeBand::Typical => write!(f, "TYPICAL"),
            OeeBand::WorldClass => write!(f, "WORLD_CLASS"),
        }
    }
}

// ==========================================
// 供应商评分等级 (Score Band)
// ==========================================
// 顺序: AtRisk < Watch < Preferred
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScoreBand {
    AtRisk,    // < 75
    Watch,     // 75 ~ 90
    Preferred, // >= 90
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreBand::AtRisk => write!(f, "AT_RISK"),
            ScoreBand::Watch => write!(f, "WATCH"),
            ScoreBand::Preferred => write!(f, "PREFERRED"),
        }
    }
}

// ==========================================
// 缺陷严重度 (Defect Severity)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefectSeverity {
    Minor,
    Major,
    Critical,
}

impl fmt::Display for DefectSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefectSeverity::Minor => write!(f, "minor"),
            DefectSeverity::Major => write!(f, "major"),
            DefectSeverity::Critical => write!(f, "critical"),
        }
    }
}
