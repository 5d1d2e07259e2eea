// ==========================================
// 制造分析演示引擎 - 生产记录领域模型
// ==========================================
// 用途: OEE 计算器的样例数据来源
// 对齐: data/sample-production.json
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// OEE 三要素（百分比,0~100）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OeeFactors {
    pub availability: f64, // 可用率: 计划时间 vs 实际运行时间
    pub performance: f64,  // 性能率: 理想节拍 vs 实际节拍
    pub quality: f64,      // 质量率: 良品 vs 总产出

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall: Option<f64>, // 源数据记录的综合值（仅参考）
}

/// 生产班次记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionRecord {
    pub date: NaiveDate,
    pub production_line: String,
    pub shift: String,
    pub part_number: String,
    pub planned_units: u32,
    pub produced_units: u32,
    pub good_units: u32,
    pub downtime_minutes: u32,

    #[serde(default)]
    pub oee: Option<OeeFactors>, // 停线班次没有 OEE
}
