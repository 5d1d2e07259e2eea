// ==========================================
// 制造分析演示引擎 - 渲染层
// ==========================================
// 职责: 把引擎结果输出为终端文本（标签经 i18n 翻译）
// ==========================================

pub mod tables;
pub mod tree;

pub use tables::{render_live_update, render_oee, render_quality, render_supplier_ranking};
pub use tree::{render_summary, render_tree, visible_rows, Toggle, TreeRow};

/// 数量显示: 整数不带小数,否则保留两位
pub fn fmt_qty(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}

/// 逐行拼接文本,末尾保留换行
pub(crate) fn join_lines(lines: &[String]) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
