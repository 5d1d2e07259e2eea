// ==========================================
// 制造分析演示引擎 - 表格渲染
// ==========================================
// 职责: OEE 结果 / 质量帕累托 / 供应商排名 / 实时快照 的文本输出
// ==========================================

use crate::domain::supplier::SupplierWeights;
use crate::domain::types::{OeeBand, ScoreBand};
use crate::engine::live_feed::LiveUpdate;
use crate::engine::oee::{OeeResult, WORLD_CLASS_THRESHOLD};
use crate::engine::pareto::{LineFilter, QualitySummary, ALL_LINES};
use crate::engine::supplier_score::SupplierScore;
use crate::i18n::{t, t_with_args};
use crate::render::join_lines;

/// 百分比条形图宽度
const BAR_WIDTH: usize = 30;

fn bar(pct: f64) -> String {
    let filled = ((pct.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

pub fn oee_band_label(band: OeeBand) -> String {
    match band {
        OeeBand::WorldClass => t("oee.band_world_class"),
        OeeBand::Typical => t("oee.band_typical"),
        OeeBand::Low => t("oee.band_low"),
    }
}

pub fn score_band_label(band: ScoreBand) -> String {
    match band {
        ScoreBand::Preferred => t("supplier.band_preferred"),
        ScoreBand::Watch => t("supplier.band_watch"),
        ScoreBand::AtRisk => t("supplier.band_at_risk"),
    }
}

// ==========================================
// OEE
// ==========================================

pub fn render_oee(result: &OeeResult, using_sample_data: bool) -> String {
    let mut lines = vec![t("oee.title")];
    if using_sample_data {
        lines.push(t("oee.using_sample"));
    }
    lines.push(String::new());

    for (label, value) in [
        (t("oee.availability"), result.availability),
        (t("oee.performance"), result.performance),
        (t("oee.quality"), result.quality),
    ] {
        lines.push(format!("{:<14} {} {:>5.1}%", label, bar(value), value));
    }

    lines.push(String::new());
    lines.push(format!(
        "{:<14} {} {:>5.1}%  ({})",
        t("oee.oee"),
        bar(result.oee),
        result.oee,
        oee_band_label(result.band)
    ));
    lines.push(t_with_args(
        "oee.world_class_gap",
        &[("gap", &format!("{:.1}", (WORLD_CLASS_THRESHOLD - result.oee).max(0.0)))],
    ));

    lines.push(String::new());
    lines.push(t("oee.losses"));
    lines.push(format!("  {:<12} {:>5.1}%", t("oee.availability"), result.availability_loss));
    lines.push(format!("  {:<12} {:>5.1}%", t("oee.performance"), result.performance_loss));
    lines.push(format!("  {:<12} {:>5.1}%", t("oee.quality"), result.quality_loss));
    join_lines(&lines)
}

// ==========================================
// 质量帕累托
// ==========================================

pub fn render_quality(summary: &QualitySummary, filter: &LineFilter, lines: &[String]) -> String {
    let selected = match filter {
        LineFilter::All => ALL_LINES,
        LineFilter::Line(line) => line.as_str(),
    };

    let mut out = vec![
        t("quality.title"),
        t_with_args("quality.line_filter", &[("line", selected), ("lines", &lines.join(", "))]),
        String::new(),
        format!("{:<22} {:>10}", t("quality.inspected"), summary.total_inspected),
        format!("{:<22} {:>10}", t("quality.defects"), summary.total_defects),
        format!("{:<22} {:>9.2}%", t("quality.defect_rate"), summary.defect_rate_pct),
        format!("{:<22} {:>9.2}%", t("quality.first_pass_yield"), summary.avg_first_pass_yield),
        String::new(),
    ];

    if summary.pareto.is_empty() {
        out.push(t("quality.no_defects"));
        return join_lines(&out);
    }

    out.push(format!(
        "{:<24} {:>7} {:>8} {:>8}",
        t("quality.col_defect"),
        t("quality.col_count"),
        t("quality.col_share"),
        t("quality.col_cumulative"),
    ));
    out.extend(summary.pareto.iter().map(|entry| {
        format!(
            "{:<24} {:>7} {:>7.1}% {:>7.1}%",
            entry.defect_type, entry.count, entry.share_pct, entry.cumulative_pct
        )
    }));
    join_lines(&out)
}

// ==========================================
// 供应商排名
// ==========================================

pub fn render_supplier_ranking(scores: &[SupplierScore], weights: &SupplierWeights) -> String {
    let mut lines = vec![
        t("supplier.title"),
        t_with_args(
            "supplier.weights",
            &[
                ("delivery", &weights.delivery.to_string()),
                ("quality", &weights.quality.to_string()),
                ("incidents", &weights.incidents.to_string()),
            ],
        ),
        String::new(),
        format!(
            "{:>3}  {:<9} {:<28} {:>6} {:>9}  {}",
            "#",
            t("supplier.col_id"),
            t("supplier.col_name"),
            t("supplier.col_score"),
            t("supplier.col_incidents"),
            t("supplier.col_band"),
        ),
    ];

    for (rank, s) in scores.iter().enumerate() {
        lines.push(format!(
            "{:>3}  {:<9} {:<28} {:>6.1} {:>9}  {}",
            rank + 1,
            s.supplier_id,
            s.name,
            s.score,
            s.incidents,
            score_band_label(s.band)
        ));
        if !s.expired_certifications.is_empty() {
            lines.push(format!(
                "     {}",
                t_with_args("supplier.expired", &[("certs", &s.expired_certifications.join(", "))])
            ));
        }
    }
    join_lines(&lines)
}

// ==========================================
// 实时快照
// ==========================================

pub fn render_live_update(update: &LiveUpdate) -> String {
    let s = &update.snapshot;
    format!(
        "#{:<4} {}  A {:>5.1}%  P {:>5.1}%  Q {:>5.1}%  OEE {:>5.1}% ({})",
        s.tick,
        update.emitted_at.format("%H:%M:%S"),
        s.availability,
        s.performance,
        s.quality,
        s.oee,
        oee_band_label(s.band)
    )
}
