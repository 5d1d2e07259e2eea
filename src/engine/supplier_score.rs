// ==========================================
// 制造分析演示引擎 - 供应商风险评分
// ==========================================
// 子项得分（0~100）:
// - 交付: 准时交付率
// - 质量: max(0, 100 - PPM / 5)   （0 PPM = 100,500 PPM = 0）
// - 事故: max(0, 100 - 事故数 × 20)（0 次 = 100,5 次 = 0）
// 综合: 按权重总和归一化的加权平均;权重总和为 0 时得分 0
// ==========================================

use crate::domain::supplier::{Supplier, SupplierWeights};
use crate::domain::types::ScoreBand;
use chrono::NaiveDate;
use serde::Serialize;

/// 优选阈值
pub const PREFERRED_THRESHOLD: f64 = 90.0;
/// 观察阈值
pub const WATCH_THRESHOLD: f64 = 75.0;

/// 单个供应商的评分明细
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierScore {
    pub supplier_id: String,
    pub name: String,
    pub category: String,
    pub delivery_score: f64,
    pub quality_score: f64,
    pub incident_score: f64,
    pub score: f64,
    pub band: ScoreBand,
    pub incidents: u32,
    /// 已过期认证名称
    pub expired_certifications: Vec<String>,
}

// ==========================================
// SupplierScorer
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct SupplierScorer;

impl SupplierScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn quality_score(quality_ppm: f64) -> f64 {
        (100.0 - quality_ppm / 5.0).max(0.0)
    }

    pub fn incident_score(incidents: u32) -> f64 {
        (100.0 - f64::from(incidents) * 20.0).max(0.0)
    }

    pub fn band_for(score: f64) -> ScoreBand {
        if score >= PREFERRED_THRESHOLD {
            ScoreBand::Preferred
        } else if score >= WATCH_THRESHOLD {
            ScoreBand::Watch
        } else {
            ScoreBand::AtRisk
        }
    }

    /// 加权综合得分
    pub fn dynamic_score(&self, supplier: &Supplier, weights: &SupplierWeights) -> f64 {
        let total = weights.total();
        if total == 0 {
            return 0.0;
        }

        let delivery = supplier.metrics.on_time_delivery;
        let quality = Self::quality_score(supplier.metrics.quality_ppm);
        let incidents = Self::incident_score(supplier.incidents);

        (delivery * f64::from(weights.delivery)
            + quality * f64::from(weights.quality)
            + incidents * f64::from(weights.incidents))
            / f64::from(total)
    }

    pub fn score(&self, supplier: &Supplier, weights: &SupplierWeights, today: NaiveDate) -> SupplierScore {
        let score = self.dynamic_score(supplier, weights);
        SupplierScore {
            supplier_id: supplier.supplier_id.clone(),
            name: supplier.name.clone(),
            category: supplier.category.clone(),
            delivery_score: supplier.metrics.on_time_delivery,
            quality_score: Self::quality_score(supplier.metrics.quality_ppm),
            incident_score: Self::incident_score(supplier.incidents),
            score,
            band: Self::band_for(score),
            incidents: supplier.incidents,
            expired_certifications: supplier
                .expired_certifications(today)
                .into_iter()
                .map(|c| c.name.clone())
                .collect(),
        }
    }

    /// 排名: 得分降序,同分按供应商编号升序
    pub fn rank(&self, suppliers: &[Supplier], weights: &SupplierWeights, today: NaiveDate) -> Vec<SupplierScore> {
        let mut scores: Vec<SupplierScore> = suppliers
            .iter()
            .map(|s| self.score(s, weights, today))
            .collect();

        scores.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.supplier_id.cmp(&b.supplier_id))
        });
        scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::supplier::SupplierMetric;

    fn supplier(id: &str, otd: f64, ppm: f64, incidents: u32) -> Supplier {
        Supplier {
            supplier_id: id.to_string(),
            name: format!("{} Inc", id),
            country: "USA".to_string(),
            category: "Castings".to_string(),
            metrics: SupplierMetric {
                overall_score: 0.0,
                on_time_delivery: otd,
                quality_ppm: ppm,
                responsiveness: 0.0,
            },
            certifications: vec![],
            incidents,
            annual_spend: 0.0,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    #[test]
    fn test_sub_scores() {
        assert_eq!(SupplierScorer::quality_score(0.0), 100.0);
        assert_eq!(SupplierScorer::quality_score(500.0), 0.0);
        assert_eq!(SupplierScorer::quality_score(900.0), 0.0, "下限为 0");
        assert_eq!(SupplierScorer::incident_score(0), 100.0);
        assert_eq!(SupplierScorer::incident_score(5), 0.0);
        assert_eq!(SupplierScorer::incident_score(9), 0.0);
    }

    #[test]
    fn test_default_weights_score() {
        // (95×40 + 90×40 + 80×20) / 100 = 90
        let s = supplier("S1", 95.0, 50.0, 1);
        let score = SupplierScorer::new().dynamic_score(&s, &SupplierWeights::default());
        assert!((score - 90.0).abs() < 1e-9);
        assert_eq!(SupplierScorer::band_for(score), ScoreBand::Preferred);
    }

    #[test]
    fn test_zero_weights_score_zero() {
        let s = supplier("S1", 95.0, 50.0, 1);
        let weights = SupplierWeights::clamped(0, 0, 0);
        assert_eq!(SupplierScorer::new().dynamic_score(&s, &weights), 0.0);
    }

    #[test]
    fn test_weights_are_normalised() {
        let s = supplier("S1", 80.0, 0.0, 0);
        let scorer = SupplierScorer::new();
        let a = scorer.dynamic_score(&s, &SupplierWeights::clamped(1, 1, 1));
        let b = scorer.dynamic_score(&s, &SupplierWeights::clamped(50, 50, 50));
        assert!((a - b).abs() < 1e-9, "等比例权重得分相同");
    }

    #[test]
    fn test_rank_order_and_ties() {
        let suppliers = vec![
            supplier("S2", 90.0, 0.0, 0),
            supplier("S1", 90.0, 0.0, 0),
            supplier("S3", 99.0, 0.0, 0),
        ];
        let ranked = SupplierScorer::new().rank(&suppliers, &SupplierWeights::default(), today());
        let ids: Vec<&str> = ranked.iter().map(|s| s.supplier_id.as_str()).collect();
        assert_eq!(ids, vec!["S3", "S1", "S2"]);
    }

    #[test]
    fn test_rank_is_total_order_with_nan_metrics() {
        let mut suppliers: Vec<Supplier> = (0..12)
            .map(|i| supplier(&format!("S{:02}", i), 70.0 + i as f64 * 2.0, 20.0, 0))
            .collect();
        for s in suppliers.iter_mut().step_by(3) {
            s.metrics.on_time_delivery = f64::NAN;
        }

        let ranked = SupplierScorer::new().rank(&suppliers, &SupplierWeights::default(), today());
        assert_eq!(ranked.len(), 12);
        let finite: Vec<f64> = ranked.iter().map(|s| s.score).filter(|v| v.is_finite()).collect();
        assert_eq!(finite.len(), 8);
        for pair in finite.windows(2) {
            assert!(pair[0] >= pair[1], "有限得分应降序: {:?}", finite);
        }
        // NaN 得分集中排在一端,不打乱其余顺序
        let nan_positions: Vec<usize> = ranked
            .iter()
            .enumerate()
            .filter(|(_, s)| s.score.is_nan())
            .map(|(i, _)| i)
            .collect();
        assert!(
            nan_positions == vec![0, 1, 2, 3] || nan_positions == vec![8, 9, 10, 11],
            "NaN 位置: {:?}",
            nan_positions
        );
    }

    #[test]
    fn test_band_thresholds() {
        assert_eq!(SupplierScorer::band_for(90.0), ScoreBand::Preferred);
        assert_eq!(SupplierScorer::band_for(75.0), ScoreBand::Watch);
        assert_eq!(SupplierScorer::band_for(74.9), ScoreBand::AtRisk);
    }
}
