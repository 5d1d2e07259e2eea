// ==========================================
// 制造分析演示引擎 - BOM 树渲染
// ==========================================
// 职责: 把展开结果 + 浏览器状态变成可见行,再输出为文本
// 规则: 折叠节点的子树不输出;折叠只影响可见性,数值来自完整展开结果
// ==========================================

use crate::app::mrp_state::ExplorerState;
use crate::engine::explosion::{ExplodedNode, ExplosionSummary};
use crate::i18n::{t, t_with_args};
use crate::render::{fmt_qty, join_lines};
use serde::Serialize;

/// 节点前的展开/折叠标记
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Toggle {
    Expanded,
    Collapsed,
    Leaf,
}

impl Toggle {
    pub fn marker(&self) -> &'static str {
        match self {
            Toggle::Expanded => "[-]",
            Toggle::Collapsed => "[+]",
            Toggle::Leaf => " · ",
        }
    }
}

/// 一行可见节点
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeRow {
    pub depth: usize,
    pub toggle: Toggle,
    pub item_number: String,
    pub description: String,
    pub uom: String,
    pub gross_req: f64,
    pub on_hand: f64,
    pub net_req: f64,
    pub total_lead_time: i64,
    pub cost: f64,
    pub has_shortage: bool,
    /// 叶子节点可执行"模拟延误"
    pub can_delay: bool,
}

/// 计算可见行（先序,跳过折叠节点的子树）
pub fn visible_rows(tree: &ExplodedNode, state: &ExplorerState) -> Vec<TreeRow> {
    let mut rows = Vec::new();
    collect_rows(tree, state, 0, &mut rows);
    rows
}

fn collect_rows(node: &ExplodedNode, state: &ExplorerState, depth: usize, rows: &mut Vec<TreeRow>) {
    let expanded = state.is_expanded(&node.item_number);
    let toggle = if node.children.is_empty() {
        Toggle::Leaf
    } else if expanded {
        Toggle::Expanded
    } else {
        Toggle::Collapsed
    };

    let req = &node.requirements;
    rows.push(TreeRow {
        depth,
        toggle,
        item_number: node.item_number.clone(),
        description: node.description.clone(),
        uom: node.uom.clone(),
        gross_req: req.gross_req,
        on_hand: req.on_hand,
        net_req: req.net_req,
        total_lead_time: req.total_lead_time,
        cost: req.cost,
        has_shortage: req.has_shortage,
        can_delay: node.is_leaf,
    });

    if toggle == Toggle::Expanded {
        for child in &node.children {
            collect_rows(child, state, depth + 1, rows);
        }
    }
}

/// 渲染 BOM 树文本
pub fn render_tree(tree: &ExplodedNode, state: &ExplorerState) -> String {
    let rows = visible_rows(tree, state);
    let mut lines = Vec::with_capacity(rows.len() + 4);

    lines.push(t("mrp.title"));
    lines.push(t_with_args(
        "mrp.demand_line",
        &[
            ("qty", &state.demand_qty().to_string()),
            ("lot_sizing", &state.lot_sizing().to_string()),
        ],
    ));
    lines.push(String::new());
    lines.push(format!(
        "{:<44} {:<28} {:>10} {:>8} {:>10} {:>6} {:>12}",
        t("mrp.col_item"),
        t("mrp.col_description"),
        t("mrp.col_gross"),
        t("mrp.col_on_hand"),
        t("mrp.col_net"),
        t("mrp.col_lead_time"),
        t("mrp.col_cost"),
    ));

    for row in &rows {
        let label = format!("{}{} {}", "  ".repeat(row.depth), row.toggle.marker(), row.item_number);
        let mut line = format!(
            "{:<44} {:<28} {:>10} {:>8} {:>10} {:>6} {:>12}",
            label,
            truncate(&row.description, 28),
            fmt_qty(row.gross_req),
            fmt_qty(row.on_hand),
            fmt_qty(row.net_req),
            format!("{}d", row.total_lead_time),
            format!("{:.2}", row.cost),
        );
        if row.has_shortage {
            let extra = state.extra_delay(&row.item_number);
            line.push_str("  ⚠ ");
            line.push_str(&t_with_args("mrp.delayed", &[("days", &extra.to_string())]));
        }
        lines.push(line.trim_end().to_string());
    }

    join_lines(&lines)
}

/// 渲染展开汇总
pub fn render_summary(summary: &ExplosionSummary) -> String {
    let lines = [
        format!("{}: {}", t("mrp.summary_nodes"), summary.node_count),
        format!("{}: {}", t("mrp.summary_shortages"), summary.shortage_count),
        format!("{}: {:.2}", t("mrp.summary_total_cost"), summary.total_cost),
        format!("{}: {}d", t("mrp.summary_critical_path"), summary.critical_lead_time),
    ];
    join_lines(&lines)
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}
