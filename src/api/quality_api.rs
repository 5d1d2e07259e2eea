// ==========================================
// 制造分析演示引擎 - 质量看板 API
// ==========================================

use std::sync::Arc;

use serde::Serialize;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::quality::QualityRecord;
use crate::engine::pareto::{LineFilter, QualityAnalyzer, QualitySummary};
use crate::perf::PerfGuard;
use crate::render::tables::render_quality;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityView {
    pub lines: Vec<String>,
    #[serde(skip)]
    pub filter: LineFilter,
    pub summary: QualitySummary,
}

impl QualityView {
    pub fn to_text(&self) -> String {
        render_quality(&self.summary, &self.filter, &self.lines)
    }
}

pub struct QualityApi {
    records: Arc<Vec<QualityRecord>>,
    analyzer: QualityAnalyzer,
}

impl QualityApi {
    pub fn new(records: Arc<Vec<QualityRecord>>) -> Self {
        Self {
            records,
            analyzer: QualityAnalyzer::new(),
        }
    }

    /// 可选产线（"All" + 夹具中出现的产线）
    pub fn lines(&self) -> Vec<String> {
        self.analyzer.lines(&self.records)
    }

    /// 按产线查看;产线不在夹具中时返回 NotFound
    pub fn view(&self, line: &str) -> ApiResult<QualityView> {
        let _perf = PerfGuard::new("quality_view");
        let filter = LineFilter::parse(line);
        let lines = self.lines();

        if let LineFilter::Line(name) = &filter {
            if !lines.iter().any(|l| l == name) {
                return Err(ApiError::NotFound(format!("产线 {}", name)));
            }
        }

        let summary = self.analyzer.summarize(&self.records, &filter);
        Ok(QualityView {
            lines,
            filter,
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::bundled::bundled_quality;

    fn api() -> QualityApi {
        QualityApi::new(Arc::new(bundled_quality().unwrap().clone()))
    }

    #[test]
    fn test_lines_start_with_all() {
        let lines = api().lines();
        assert_eq!(lines[0], "All");
        assert!(lines.len() > 1);
    }

    #[test]
    fn test_unknown_line_not_found() {
        assert!(matches!(api().view("Z9"), Err(ApiError::NotFound(_))));
    }

    #[test]
    fn test_all_lines_view() {
        let view = api().view("All").unwrap();
        assert_eq!(view.filter, LineFilter::All);
        assert!(view.summary.record_count > 0);
    }
}
