// ==========================================
// 制造分析演示引擎 - BOM 展开引擎
// ==========================================
// 职责: 自顶向下递归展开需求
// 规则: 每层批量调整后的毛需求作为下一层的父项需求;
//       每层累计提前期作为下一层的父项延误
// 红线: 纯计算,每次全量重算,不缓存
// ==========================================

use crate::domain::bom::BomItem;
use crate::domain::types::LotSizing;
use crate::engine::requirements::{Requirements, RequirementsCalculator};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::instrument;

/// 模拟缺料台账: 物料号 → 累计追加延误天数
pub type ShortageLedger = BTreeMap<String, i64>;

// ==========================================
// ExplodedNode - 展开结果节点
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplodedNode {
    pub item_number: String,
    pub description: String,
    pub level: u32,
    pub qty_per: f64,
    pub uom: String,
    pub lead_time_days: i64,
    pub standard_cost: f64,
    pub is_leaf: bool,
    /// 父项需求量（根节点为顶层需求）
    pub parent_qty: f64,
    pub requirements: Requirements,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ExplodedNode>,
}

impl ExplodedNode {
    /// 先序遍历
    pub fn iter(&self) -> impl Iterator<Item = &ExplodedNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }

    pub fn find(&self, item_number: &str) -> Option<&ExplodedNode> {
        self.iter().find(|n| n.item_number == item_number)
    }
}

// ==========================================
// ExplosionSummary - 展开汇总
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplosionSummary {
    pub node_count: usize,
    pub leaf_count: usize,
    pub shortage_count: usize,
    /// 所有节点成本之和
    pub total_cost: f64,
    /// 所有节点净需求之和
    pub total_net_req: f64,
    /// 关键路径: 最大累计提前期
    pub critical_lead_time: i64,
}

// ==========================================
// ExplosionEngine - BOM 展开引擎
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplosionEngine {
    calculator: RequirementsCalculator,
}

impl ExplosionEngine {
    pub fn new(calculator: RequirementsCalculator) -> Self {
        Self { calculator }
    }

    /// 从根节点展开整棵树
    ///
    /// # 参数
    /// - root: BOM 根
    /// - demand_qty: 顶层需求（已裁剪,>= 1）
    /// - lot_sizing: 批量策略
    /// - shortages: 模拟缺料台账
    #[instrument(skip(self, root, shortages), fields(root = %root.item_number, shortages = shortages.len()))]
    pub fn explode(
        &self,
        root: &BomItem,
        demand_qty: u32,
        lot_sizing: LotSizing,
        shortages: &ShortageLedger,
    ) -> ExplodedNode {
        self.explode_node(root, f64::from(demand_qty), 0, lot_sizing, shortages)
    }

    fn explode_node(
        &self,
        item: &BomItem,
        parent_qty: f64,
        parent_delay: i64,
        lot_sizing: LotSizing,
        shortages: &ShortageLedger,
    ) -> ExplodedNode {
        let extra_delay = shortages.get(&item.item_number).copied().unwrap_or(0);
        let requirements =
            self.calculator
                .calculate(item, parent_qty, parent_delay, extra_delay, lot_sizing);

        let children = item
            .components
            .iter()
            .map(|child| {
                self.explode_node(
                    child,
                    requirements.gross_req,
                    requirements.total_lead_time,
                    lot_sizing,
                    shortages,
                )
            })
            .collect();

        ExplodedNode {
            item_number: item.item_number.clone(),
            description: item.description.clone(),
            level: item.level,
            qty_per: item.qty_per,
            uom: item.uom.clone(),
            lead_time_days: item.lead_time_days,
            standard_cost: item.standard_cost,
            is_leaf: item.is_leaf(),
            parent_qty,
            requirements,
            children,
        }
    }

    /// 汇总展开结果
    pub fn summarize(&self, root: &ExplodedNode) -> ExplosionSummary {
        root.iter().fold(
            ExplosionSummary {
                node_count: 0,
                leaf_count: 0,
                shortage_count: 0,
                total_cost: 0.0,
                total_net_req: 0.0,
                critical_lead_time: 0,
            },
            |mut acc, node| {
                acc.node_count += 1;
                if node.is_leaf {
                    acc.leaf_count += 1;
                }
                if node.requirements.has_shortage {
                    acc.shortage_count += 1;
                }
                acc.total_cost += node.requirements.cost;
                acc.total_net_req += node.requirements.net_req;
                acc.critical_lead_time = acc.critical_lead_time.max(node.requirements.total_lead_time);
                acc
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, qty_per: f64, lead: i64, level: u32, children: Vec<BomItem>) -> BomItem {
        BomItem {
            item_number: id.to_string(),
            description: id.to_string(),
            qty_per,
            uom: "EA".to_string(),
            lead_time_days: lead,
            standard_cost: 2.0,
            level,
            supplier_id: None,
            components: children,
        }
    }

    fn two_level() -> BomItem {
        node(
            "ROOT",
            1.0,
            3,
            0,
            vec![node("CHILD", 2.0, 5, 1, vec![node("LEAF", 3.0, 7, 2, vec![])])],
        )
    }

    #[test]
    fn test_explosion_cascades_gross_requirements() {
        let engine = ExplosionEngine::default();
        let tree = engine.explode(&two_level(), 100, LotSizing::LotForLot, &ShortageLedger::new());

        assert_eq!(tree.requirements.gross_req, 100.0);
        let child = tree.find("CHILD").unwrap();
        assert_eq!(child.parent_qty, 100.0);
        assert_eq!(child.requirements.gross_req, 200.0);
        let leaf = tree.find("LEAF").unwrap();
        assert_eq!(leaf.requirements.gross_req, 600.0);
    }

    #[test]
    fn test_explosion_uses_lot_sized_parent_qty() {
        // 父项先按最小订货量抬到 100,子项再乘用量
        let engine = ExplosionEngine::default();
        let tree = engine.explode(&two_level(), 10, LotSizing::MinEoq, &ShortageLedger::new());

        assert_eq!(tree.requirements.gross_req, 100.0);
        let child = tree.find("CHILD").unwrap();
        assert_eq!(child.parent_qty, 100.0);
        assert_eq!(child.requirements.gross_req, 200.0);
    }

    #[test]
    fn test_lead_time_accumulates_down_the_tree() {
        let engine = ExplosionEngine::default();
        let tree = engine.explode(&two_level(), 1, LotSizing::LotForLot, &ShortageLedger::new());

        assert_eq!(tree.requirements.total_lead_time, 3);
        assert_eq!(tree.find("CHILD").unwrap().requirements.total_lead_time, 8);
        assert_eq!(tree.find("LEAF").unwrap().requirements.total_lead_time, 15);
    }

    #[test]
    fn test_shortage_only_affects_its_item() {
        let engine = ExplosionEngine::default();
        let mut ledger = ShortageLedger::new();
        ledger.insert("LEAF".to_string(), 5);
        let tree = engine.explode(&two_level(), 1, LotSizing::LotForLot, &ledger);

        let leaf = tree.find("LEAF").unwrap();
        assert!(leaf.requirements.has_shortage);
        assert_eq!(leaf.requirements.total_lead_time, 20);
        assert!(!tree.find("CHILD").unwrap().requirements.has_shortage);
    }

    #[test]
    fn test_summary() {
        let engine = ExplosionEngine::default();
        let mut ledger = ShortageLedger::new();
        ledger.insert("LEAF".to_string(), 5);
        let tree = engine.explode(&two_level(), 1, LotSizing::LotForLot, &ledger);
        let summary = engine.summarize(&tree);

        assert_eq!(summary.node_count, 3);
        assert_eq!(summary.leaf_count, 1);
        assert_eq!(summary.shortage_count, 1);
        assert_eq!(summary.critical_lead_time, 20);
        // 成本: (1 + 2 + 6) × 2.0
        assert_eq!(summary.total_cost, 18.0);
    }
}
