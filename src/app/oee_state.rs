// ==========================================
// 制造分析演示引擎 - OEE 计算器状态
// ==========================================
// 职责: 三个滑块 + "使用样例数据"标记
// 规则: 任何手动修改（滑块 / what-if）都会清除样例标记
// ==========================================

use crate::domain::production::OeeFactors;
use crate::engine::oee::{clamp_percent, OeeCalculator, OeeResult, AVAILABILITY_IMPROVEMENT, QUALITY_IMPROVEMENT};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum OeeAction {
    SetAvailability(f64),
    SetPerformance(f64),
    SetQuality(f64),
    /// what-if: 减少停机,可用率 +5
    ImproveAvailability,
    /// what-if: 减少报废,质量率 +2
    ImproveQuality,
    /// 载入样例生产数据
    LoadSample(OeeFactors),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OeeState {
    availability: f64,
    performance: f64,
    quality: f64,
    using_sample_data: bool,
}

impl Default for OeeState {
    fn default() -> Self {
        Self {
            availability: 85.0,
            performance: 90.0,
            quality: 95.0,
            using_sample_data: false,
        }
    }
}

impl OeeState {
    pub fn new(availability: f64, performance: f64, quality: f64) -> Self {
        Self {
            availability: clamp_percent(availability),
            performance: clamp_percent(performance),
            quality: clamp_percent(quality),
            using_sample_data: false,
        }
    }

    pub fn availability(&self) -> f64 {
        self.availability
    }

    pub fn performance(&self) -> f64 {
        self.performance
    }

    pub fn quality(&self) -> f64 {
        self.quality
    }

    pub fn using_sample_data(&self) -> bool {
        self.using_sample_data
    }

    pub fn result(&self) -> OeeResult {
        OeeCalculator::new().calculate(self.availability, self.performance, self.quality)
    }

    pub fn reduce(&self, action: OeeAction) -> OeeState {
        debug!(action = ?action, "OEE 动作");
        let mut next = *self;
        next.using_sample_data = false;

        match action {
            OeeAction::SetAvailability(v) => next.availability = clamp_percent(v),
            OeeAction::SetPerformance(v) => next.performance = clamp_percent(v),
            OeeAction::SetQuality(v) => next.quality = clamp_percent(v),
            OeeAction::ImproveAvailability => {
                next.availability = clamp_percent(self.availability + AVAILABILITY_IMPROVEMENT);
            }
            OeeAction::ImproveQuality => {
                next.quality = clamp_percent(self.quality + QUALITY_IMPROVEMENT);
            }
            OeeAction::LoadSample(factors) => {
                next.availability = clamp_percent(factors.availability);
                next.performance = clamp_percent(factors.performance);
                next.quality = clamp_percent(factors.quality);
                next.using_sample_data = true;
            }
        }

        next
    }
}
