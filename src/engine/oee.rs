// ==========================================
// 制造分析演示引擎 - OEE 计算引擎
// ==========================================
// 公式: OEE = 可用率 × 性能率 × 质量率 / 10000（输入为百分比）
// 等级: >= 85 世界级 / >= 60 一般 / 其他 偏低
// ==========================================

use crate::domain::production::{OeeFactors, ProductionRecord};
use crate::domain::types::OeeBand;
use serde::{Deserialize, Serialize};

/// 世界级 OEE 阈值
pub const WORLD_CLASS_THRESHOLD: f64 = 85.0;
/// 一般水平阈值
pub const TYPICAL_THRESHOLD: f64 = 60.0;

/// what-if: 可用率提升幅度（减少换型时间）
pub const AVAILABILITY_IMPROVEMENT: f64 = 5.0;
/// what-if: 质量率提升幅度（减少报废）
pub const QUALITY_IMPROVEMENT: f64 = 2.0;

/// 把百分比裁剪到 0~100,非有限值视为 0
pub fn clamp_percent(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// OEE 结果
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OeeResult {
    pub availability: f64,
    pub performance: f64,
    pub quality: f64,
    pub oee: f64,
    pub band: OeeBand,
    /// 各要素损失（100 - 要素）
    pub availability_loss: f64,
    pub performance_loss: f64,
    pub quality_loss: f64,
}

// ==========================================
// OeeCalculator - OEE 计算器
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct OeeCalculator;

impl OeeCalculator {
    pub fn new() -> Self {
        Self
    }

    /// 计算 OEE（输入先裁剪到 0~100）
    pub fn calculate(&self, availability: f64, performance: f64, quality: f64) -> OeeResult {
        let a = clamp_percent(availability);
        let p = clamp_percent(performance);
        let q = clamp_percent(quality);
        let oee = a * p * q / 10000.0;

        OeeResult {
            availability: a,
            performance: p,
            quality: q,
            oee,
            band: Self::band_for(oee),
            availability_loss: 100.0 - a,
            performance_loss: 100.0 - p,
            quality_loss: 100.0 - q,
        }
    }

    pub fn calculate_factors(&self, factors: &OeeFactors) -> OeeResult {
        self.calculate(factors.availability, factors.performance, factors.quality)
    }

    /// OEE 等级
    pub fn band_for(oee: f64) -> OeeBand {
        if oee >= WORLD_CLASS_THRESHOLD {
            OeeBand::WorldClass
        } else if oee >= TYPICAL_THRESHOLD {
            OeeBand::Typical
        } else {
            OeeBand::Low
        }
    }

    /// 第一条带 OEE 要素的生产记录
    pub fn first_sample<'a>(&self, records: &'a [ProductionRecord]) -> Option<&'a OeeFactors> {
        records.iter().find_map(|r| r.oee.as_ref())
    }
}
