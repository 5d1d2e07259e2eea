// ==========================================
// 制造分析演示引擎 - 质量记录领域模型
// ==========================================
// 对齐: data/sample-quality.json
// ==========================================

use crate::domain::types::DefectSeverity;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 单类缺陷计数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefectCount {
    #[serde(rename = "type")]
    pub defect_type: String,
    pub count: u32,
    pub severity: DefectSeverity,
}

/// 批次检验记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityRecord {
    pub date: NaiveDate,
    pub production_line: String,
    pub part_category: String,
    pub inspected_units: u32,
    pub defective_units: u32,
    pub first_pass_yield: f64, // 一次合格率（%）
    #[serde(default)]
    pub top_defect_types: Vec<DefectCount>,
    pub supplier_id: String,
}
