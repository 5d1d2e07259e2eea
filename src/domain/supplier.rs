// ==========================================
// 制造分析演示引擎 - 供应商领域模型
// ==========================================
// 对齐: data/sample-suppliers.json
// 红线: 事故计数只能通过 reducer 生成新快照来变更
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 供应商绩效指标
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierMetric {
    pub overall_score: f64,
    pub on_time_delivery: f64, // 准时交付率（%）
    #[serde(rename = "qualityPPM")]
    pub quality_ppm: f64,      // 百万分之不良
    pub responsiveness: f64,
}

/// 资质认证
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    pub name: String,
    pub valid_until: NaiveDate,
}

impl Certification {
    /// 在给定日期是否已过期
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.valid_until < today
    }
}

/// 供应商
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub supplier_id: String,
    pub name: String,
    pub country: String,
    pub category: String,
    pub metrics: SupplierMetric,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    pub incidents: u32,
    pub annual_spend: f64,
}

impl Supplier {
    /// 在给定日期已过期的认证
    pub fn expired_certifications(&self, today: NaiveDate) -> Vec<&Certification> {
        self.certifications
            .iter()
            .filter(|c| c.is_expired(today))
            .collect()
    }
}

/// 供应商评分权重（各 0~100,计算时按总和归一化）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupplierWeights {
    pub delivery: u32,
    pub quality: u32,
    pub incidents: u32,
}

impl Default for SupplierWeights {
    fn default() -> Self {
        Self {
            delivery: 40,
            quality: 40,
            incidents: 20,
        }
    }
}

impl SupplierWeights {
    /// 单项权重上限
    pub const MAX: u32 = 100;

    /// 构造并把每项裁剪到 0~100
    pub fn clamped(delivery: u32, quality: u32, incidents: u32) -> Self {
        Self {
            delivery: delivery.min(Self::MAX),
            quality: quality.min(Self::MAX),
            incidents: incidents.min(Self::MAX),
        }
    }

    pub fn total(&self) -> u32 {
        self.delivery + self.quality + self.incidents
    }
}
