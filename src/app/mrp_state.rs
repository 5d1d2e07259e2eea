// ==========================================
// 制造分析演示引擎 - BOM 浏览器状态
// ==========================================
// 职责: 保存操作员输入（需求量 / 批量策略 / 模拟延误 / 展开状态）
// 模式: 不可变快照 + reduce;每个动作返回新状态,旧状态不变
// 红线: 展开状态只影响显示,不参与任何计算
// ==========================================

use crate::config::DemoConfig;
use crate::domain::bom::BomItem;
use crate::domain::types::LotSizing;
use crate::engine::explosion::ShortageLedger;
use crate::engine::requirements::{clamp_demand, parse_demand_input};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// 默认每次模拟延误追加天数
pub const DEFAULT_DELAY_INCREMENT_DAYS: i64 = 5;

// ==========================================
// ExplorerAction - 操作员动作
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub enum ExplorerAction {
    /// 直接设置需求量（裁剪到 >= 1）
    SetDemand(i64),
    /// 原始文本输入（非数字按 0 处理后裁剪）
    SetDemandInput(String),
    SetLotSizing(LotSizing),
    /// 对叶子物料追加一次模拟延误
    SimulateDelay(String),
    /// 清除全部模拟延误
    ClearDelays,
    ToggleNode(String),
    ExpandAll,
    CollapseAll,
}

// ==========================================
// ExplorerState - BOM 浏览器快照
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplorerState {
    demand_qty: u32,
    lot_sizing: LotSizing,
    shortages: ShortageLedger,
    /// 显式设置过的展开状态;未出现的节点默认展开
    expanded: BTreeMap<String, bool>,
    delay_increment_days: i64,
}

impl Default for ExplorerState {
    fn default() -> Self {
        Self {
            demand_qty: 100,
            lot_sizing: LotSizing::LotForLot,
            shortages: ShortageLedger::new(),
            expanded: BTreeMap::new(),
            delay_increment_days: DEFAULT_DELAY_INCREMENT_DAYS,
        }
    }
}

impl ExplorerState {
    pub fn new(demand_qty: i64, lot_sizing: LotSizing) -> Self {
        Self {
            demand_qty: clamp_demand(demand_qty),
            lot_sizing,
            ..Self::default()
        }
    }

    /// 按配置初始化（默认需求 / 批量策略 / 延误步长 / 初始折叠节点）
    pub fn from_config(config: &DemoConfig) -> Self {
        let expanded = config
            .initially_collapsed
            .iter()
            .map(|item| (item.clone(), false))
            .collect();

        Self {
            demand_qty: clamp_demand(i64::from(config.default_demand_qty)),
            lot_sizing: config.default_lot_sizing,
            shortages: ShortageLedger::new(),
            expanded,
            delay_increment_days: config.delay_increment_days,
        }
    }

    pub fn with_collapsed<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for item in items {
            self.expanded.insert(item.into(), false);
        }
        self
    }

    pub fn demand_qty(&self) -> u32 {
        self.demand_qty
    }

    pub fn lot_sizing(&self) -> LotSizing {
        self.lot_sizing
    }

    pub fn shortages(&self) -> &ShortageLedger {
        &self.shortages
    }

    pub fn delay_increment_days(&self) -> i64 {
        self.delay_increment_days
    }

    /// 某物料累计的模拟延误天数
    pub fn extra_delay(&self, item_number: &str) -> i64 {
        self.shortages.get(item_number).copied().unwrap_or(0)
    }

    pub fn is_expanded(&self, item_number: &str) -> bool {
        self.expanded.get(item_number).copied().unwrap_or(true)
    }

    /// 应用动作,返回新快照
    ///
    /// bom 用于判断叶子节点;非叶子或不存在的物料上的延误动作被忽略
    pub fn reduce(&self, action: ExplorerAction, bom: &BomItem) -> ExplorerState {
        debug!(action = ?action, "BOM 浏览器动作");
        let mut next = self.clone();

        match action {
            ExplorerAction::SetDemand(qty) => {
                next.demand_qty = clamp_demand(qty);
            }
            ExplorerAction::SetDemandInput(text) => {
                next.demand_qty = parse_demand_input(&text);
            }
            ExplorerAction::SetLotSizing(lot_sizing) => {
                next.lot_sizing = lot_sizing;
            }
            ExplorerAction::SimulateDelay(item_number) => match bom.find(&item_number) {
                Some(item) if item.is_leaf() => {
                    *next.shortages.entry(item_number).or_insert(0) += self.delay_increment_days;
                }
                Some(_) => {
                    debug!(item = %item_number, "非叶子节点不支持模拟延误,忽略");
                }
                None => {
                    warn!(item = %item_number, "物料不存在,忽略模拟延误");
                }
            },
            ExplorerAction::ClearDelays => {
                next.shortages.clear();
            }
            ExplorerAction::ToggleNode(item_number) => {
                let current = self.is_expanded(&item_number);
                next.expanded.insert(item_number, !current);
            }
            ExplorerAction::ExpandAll => {
                next.expanded.clear();
            }
            ExplorerAction::CollapseAll => {
                next.expanded = bom
                    .iter()
                    .filter(|item| !item.is_leaf())
                    .map(|item| (item.item_number.clone(), false))
                    .collect();
            }
        }

        next
    }

    /// 依次应用多个动作
    pub fn reduce_all<I>(&self, actions: I, bom: &BomItem) -> ExplorerState
    where
        I: IntoIterator<Item = ExplorerAction>,
    {
        actions
            .into_iter()
            .fold(self.clone(), |state, action| state.reduce(action, bom))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bom() -> BomItem {
        let leaf = BomItem {
            item_number: "LEAF".to_string(),
            description: "leaf".to_string(),
            qty_per: 2.0,
            uom: "EA".to_string(),
            lead_time_days: 4,
            standard_cost: 1.0,
            level: 1,
            supplier_id: None,
            components: vec![],
        };
        BomItem {
            item_number: "ROOT".to_string(),
            description: "root".to_string(),
            qty_per: 1.0,
            uom: "EA".to_string(),
            lead_time_days: 2,
            standard_cost: 10.0,
            level: 0,
            supplier_id: None,
            components: vec![leaf],
        }
    }

    #[test]
    fn test_demand_clamped() {
        let bom = bom();
        let state = ExplorerState::default();
        assert_eq!(state.reduce(ExplorerAction::SetDemand(-4), &bom).demand_qty(), 1);
        assert_eq!(state.reduce(ExplorerAction::SetDemand(0), &bom).demand_qty(), 1);
        assert_eq!(
            state.reduce(ExplorerAction::SetDemandInput("abc".to_string()), &bom).demand_qty(),
            1
        );
        assert_eq!(
            state.reduce(ExplorerAction::SetDemandInput("250".to_string()), &bom).demand_qty(),
            250
        );
    }

    #[test]
    fn test_reduce_leaves_previous_snapshot_untouched() {
        let bom = bom();
        let before = ExplorerState::default();
        let after = before.reduce(ExplorerAction::SimulateDelay("LEAF".to_string()), &bom);
        assert_eq!(before.extra_delay("LEAF"), 0);
        assert_eq!(after.extra_delay("LEAF"), 5);
    }

    #[test]
    fn test_delay_accumulates_and_clears() {
        let bom = bom();
        let state = ExplorerState::default().reduce_all(
            vec![
                ExplorerAction::SimulateDelay("LEAF".to_string()),
                ExplorerAction::SimulateDelay("LEAF".to_string()),
            ],
            &bom,
        );
        assert_eq!(state.extra_delay("LEAF"), 10);

        let cleared = state.reduce(ExplorerAction::ClearDelays, &bom);
        assert!(cleared.shortages().is_empty());
    }

    #[test]
    fn test_delay_on_non_leaf_is_ignored() {
        let bom = bom();
        let state = ExplorerState::default();
        let next = state.reduce(ExplorerAction::SimulateDelay("ROOT".to_string()), &bom);
        assert_eq!(next, state);
        let next = state.reduce(ExplorerAction::SimulateDelay("MISSING".to_string()), &bom);
        assert_eq!(next, state);
    }

    #[test]
    fn test_toggle_defaults_to_expanded() {
        let bom = bom();
        let state = ExplorerState::default();
        assert!(state.is_expanded("ROOT"));
        let collapsed = state.reduce(ExplorerAction::ToggleNode("ROOT".to_string()), &bom);
        assert!(!collapsed.is_expanded("ROOT"));
        let expanded = collapsed.reduce(ExplorerAction::ToggleNode("ROOT".to_string()), &bom);
        assert!(expanded.is_expanded("ROOT"));
    }

    #[test]
    fn test_from_config_initially_collapsed() {
        let config = DemoConfig {
            default_demand_qty: 40,
            delay_increment_days: 3,
            initially_collapsed: vec!["ROOT".to_string()],
            ..DemoConfig::default()
        };
        let state = ExplorerState::from_config(&config);
        assert_eq!(state.demand_qty(), 40);
        assert!(!state.is_expanded("ROOT"));

        let delayed = state.reduce(ExplorerAction::SimulateDelay("LEAF".to_string()), &bom());
        assert_eq!(delayed.extra_delay("LEAF"), 3, "延误步长来自配置");
    }

    #[test]
    fn test_collapse_all_then_expand_all() {
        let bom = bom();
        let collapsed = ExplorerState::default().reduce(ExplorerAction::CollapseAll, &bom);
        assert!(!collapsed.is_expanded("ROOT"));
        let expanded = collapsed.reduce(ExplorerAction::ExpandAll, &bom);
        assert!(expanded.is_expanded("ROOT"));
    }
}
