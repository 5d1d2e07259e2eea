// ==========================================
// 制造分析演示引擎 - 质量帕累托分析
// ==========================================
// 职责: 按产线过滤、汇总检验量/不良、缺陷帕累托排序
// 排序: 计数降序,同数按缺陷类型名升序
// ==========================================

use crate::domain::quality::QualityRecord;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use tracing::instrument;

/// 全部产线的过滤值
pub const ALL_LINES: &str = "All";

/// 产线过滤
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LineFilter {
    #[default]
    All,
    Line(String),
}

impl LineFilter {
    /// "All"（大小写不敏感）或空串视为全部
    pub fn parse(value: &str) -> Self {
        let v = value.trim();
        if v.is_empty() || v.eq_ignore_ascii_case(ALL_LINES) {
            LineFilter::All
        } else {
            LineFilter::Line(v.to_string())
        }
    }

    pub fn matches(&self, record: &QualityRecord) -> bool {
        match self {
            LineFilter::All => true,
            LineFilter::Line(line) => &record.production_line == line,
        }
    }
}

/// 帕累托条目
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParetoEntry {
    pub defect_type: String,
    pub count: u32,
    /// 占总不良的百分比
    pub share_pct: f64,
    /// 累计百分比
    pub cumulative_pct: f64,
}

/// 质量汇总
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QualitySummary {
    pub record_count: usize,
    pub total_inspected: u64,
    pub total_defects: u64,
    /// 不良率（%）,无检验量时为 0
    pub defect_rate_pct: f64,
    /// 平均一次合格率（%）,无记录时为 0
    pub avg_first_pass_yield: f64,
    pub pareto: Vec<ParetoEntry>,
}

// ==========================================
// QualityAnalyzer
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct QualityAnalyzer;

impl QualityAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// 产线列表: "All" + 按首次出现顺序去重的产线
    pub fn lines(&self, records: &[QualityRecord]) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut lines = vec![ALL_LINES.to_string()];
        for r in records {
            if seen.insert(r.production_line.as_str()) {
                lines.push(r.production_line.clone());
            }
        }
        lines
    }

    /// 按过滤条件汇总
    #[instrument(skip(self, records), fields(records = records.len()))]
    pub fn summarize(&self, records: &[QualityRecord], filter: &LineFilter) -> QualitySummary {
        let filtered: Vec<&QualityRecord> = records.iter().filter(|r| filter.matches(r)).collect();

        let total_inspected: u64 = filtered.iter().map(|r| u64::from(r.inspected_units)).sum();
        let total_defects: u64 = filtered.iter().map(|r| u64::from(r.defective_units)).sum();

        let defect_rate_pct = if total_inspected > 0 {
            total_defects as f64 / total_inspected as f64 * 100.0
        } else {
            0.0
        };

        let avg_first_pass_yield = if filtered.is_empty() {
            0.0
        } else {
            filtered.iter().map(|r| r.first_pass_yield).sum::<f64>() / filtered.len() as f64
        };

        QualitySummary {
            record_count: filtered.len(),
            total_inspected,
            total_defects,
            defect_rate_pct,
            avg_first_pass_yield,
            pareto: self.pareto(&filtered),
        }
    }

    /// 缺陷帕累托
    ///
    /// 占比分母为各缺陷类型计数之和
    fn pareto(&self, records: &[&QualityRecord]) -> Vec<ParetoEntry> {
        let mut counts: BTreeMap<&str, u32> = BTreeMap::new();
        for r in records {
            for d in &r.top_defect_types {
                *counts.entry(d.defect_type.as_str()).or_insert(0) += d.count;
            }
        }

        // BTreeMap 已按类型名升序,稳定排序后同数保持名序
        let mut sorted: Vec<(&str, u32)> = counts.into_iter().collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));

        let total: u64 = sorted.iter().map(|(_, c)| u64::from(*c)).sum();
        let mut cumulative = 0u64;

        sorted
            .into_iter()
            .map(|(defect_type, count)| {
                cumulative += u64::from(count);
                let (share_pct, cumulative_pct) = if total > 0 {
                    (
                        f64::from(count) / total as f64 * 100.0,
                        cumulative as f64 / total as f64 * 100.0,
                    )
                } else {
                    (0.0, 0.0)
                };
                ParetoEntry {
                    defect_type: defect_type.to_string(),
                    count,
                    share_pct,
                    cumulative_pct,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::quality::DefectCount;
    use crate::domain::types::DefectSeverity;
    use chrono::NaiveDate;

    fn record(line: &str, inspected: u32, defective: u32, fpy: f64, defects: &[(&str, u32)]) -> QualityRecord {
        QualityRecord {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            production_line: line.to_string(),
            part_category: "Caliper".to_string(),
            inspected_units: inspected,
            defective_units: defective,
            first_pass_yield: fpy,
            top_defect_types: defects
                .iter()
                .map(|(t, c)| DefectCount {
                    defect_type: t.to_string(),
                    count: *c,
                    severity: DefectSeverity::Major,
                })
                .collect(),
            supplier_id: "SUP-001".to_string(),
        }
    }

    fn sample() -> Vec<QualityRecord> {
        vec![
            record("A", 1000, 20, 98.0, &[("Porosity", 12), ("Dimensional", 8)]),
            record("B", 500, 15, 97.0, &[("Dimensional", 10), ("Runout", 5)]),
            record("A", 500, 5, 99.0, &[("Runout", 5)]),
        ]
    }

    #[test]
    fn test_lines_first_appearance_order() {
        let lines = QualityAnalyzer::new().lines(&sample());
        assert_eq!(lines, vec!["All", "A", "B"]);
    }

    #[test]
    fn test_summary_all_lines() {
        let summary = QualityAnalyzer::new().summarize(&sample(), &LineFilter::All);
        assert_eq!(summary.total_inspected, 2000);
        assert_eq!(summary.total_defects, 40);
        assert!((summary.defect_rate_pct - 2.0).abs() < 1e-9);
        assert!((summary.avg_first_pass_yield - 98.0).abs() < 1e-9);

        let types: Vec<&str> = summary.pareto.iter().map(|e| e.defect_type.as_str()).collect();
        // Dimensional 18, Porosity 12, Runout 10
        assert_eq!(types, vec!["Dimensional", "Porosity", "Runout"]);
        let last = summary.pareto.last().unwrap();
        assert!((last.cumulative_pct - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_summary_single_line() {
        let summary = QualityAnalyzer::new().summarize(&sample(), &LineFilter::parse("A"));
        assert_eq!(summary.record_count, 2);
        assert_eq!(summary.total_inspected, 1500);
        assert_eq!(summary.pareto[0].defect_type, "Porosity");
    }

    #[test]
    fn test_pareto_ties_sorted_by_name() {
        let records = vec![record("A", 10, 2, 90.0, &[("Zeta", 3), ("Alpha", 3)])];
        let summary = QualityAnalyzer::new().summarize(&records, &LineFilter::All);
        assert_eq!(summary.pareto[0].defect_type, "Alpha");
        assert_eq!(summary.pareto[1].defect_type, "Zeta");
    }

    #[test]
    fn test_empty_filter_result() {
        let summary = QualityAnalyzer::new().summarize(&sample(), &LineFilter::parse("Z"));
        assert_eq!(summary.record_count, 0);
        assert_eq!(summary.defect_rate_pct, 0.0);
        assert_eq!(summary.avg_first_pass_yield, 0.0);
        assert!(summary.pareto.is_empty());
    }

    #[test]
    fn test_line_filter_parse() {
        assert_eq!(LineFilter::parse("all"), LineFilter::All);
        assert_eq!(LineFilter::parse(""), LineFilter::All);
        assert_eq!(LineFilter::parse(" B "), LineFilter::Line("B".to_string()));
    }
}
