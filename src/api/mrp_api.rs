// ==========================================
// 制造分析演示引擎 - MRP 浏览器 API
// ==========================================
// 职责: BOM 夹具 + 展开引擎 + 浏览器状态 的组合入口
// 规则: 每次查看都从根节点全量重算,不缓存展开结果
// ==========================================

use std::sync::Arc;

use serde::Serialize;
use tracing::instrument;

use crate::api::error::{ApiError, ApiResult};
use crate::app::mrp_state::{ExplorerAction, ExplorerState};
use crate::config::ConfigManager;
use crate::domain::bom::BomItem;
use crate::engine::explosion::{ExplodedNode, ExplosionEngine, ExplosionSummary};
use crate::engine::requirements::{MrpPolicy, RequirementsCalculator};
use crate::perf::PerfGuard;
use crate::render::tree::{render_summary, render_tree, visible_rows, TreeRow};

/// 一次查看的完整结果
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MrpView {
    pub state: ExplorerState,
    /// 完整展开结果（与折叠状态无关）
    pub tree: ExplodedNode,
    pub summary: ExplosionSummary,
    /// 当前可见行
    pub rows: Vec<TreeRow>,
}

impl MrpView {
    /// 文本输出（树 + 汇总）
    pub fn to_text(&self) -> String {
        format!(
            "{}\n{}",
            render_tree(&self.tree, &self.state),
            render_summary(&self.summary)
        )
    }
}

// ==========================================
// MrpApi - MRP 浏览器 API
// ==========================================
pub struct MrpApi {
    bom: Arc<BomItem>,
    engine: ExplosionEngine,
}

impl MrpApi {
    pub fn new(bom: Arc<BomItem>, policy: MrpPolicy) -> Self {
        Self {
            bom,
            engine: ExplosionEngine::new(RequirementsCalculator::new(policy)),
        }
    }

    pub fn from_config(bom: Arc<BomItem>, config: &ConfigManager) -> Self {
        Self::new(bom, config.mrp_policy())
    }

    pub fn bom(&self) -> &BomItem {
        &self.bom
    }

    /// 展开整棵树
    pub fn explode(&self, state: &ExplorerState) -> ExplodedNode {
        let _perf = PerfGuard::new("mrp_explode");
        self.engine
            .explode(&self.bom, state.demand_qty(), state.lot_sizing(), state.shortages())
    }

    /// 展开 + 汇总 + 可见行
    #[instrument(skip(self, state), fields(demand = state.demand_qty(), lot_sizing = %state.lot_sizing()))]
    pub fn view(&self, state: &ExplorerState) -> MrpView {
        let _perf = PerfGuard::new("mrp_view");
        let tree = self.explode(state);
        let summary = self.engine.summarize(&tree);
        let rows = visible_rows(&tree, state);
        MrpView {
            state: state.clone(),
            tree,
            summary,
            rows,
        }
    }

    /// 应用动作（对物料做存在性 / 叶子校验）
    ///
    /// reducer 本身忽略非法目标;这里把它们作为输入错误报告给调用方
    pub fn apply(&self, state: &ExplorerState, action: ExplorerAction) -> ApiResult<ExplorerState> {
        match &action {
            ExplorerAction::SimulateDelay(item_number) => {
                let item = self.find_item(item_number)?;
                if !item.is_leaf() {
                    return Err(ApiError::InvalidInput(format!(
                        "只能对叶子物料模拟延误: {}",
                        item_number
                    )));
                }
            }
            ExplorerAction::ToggleNode(item_number) => {
                self.find_item(item_number)?;
            }
            _ => {}
        }

        Ok(state.reduce(action, &self.bom))
    }

    /// 依次应用多个动作,遇到第一个错误即返回
    pub fn apply_all<I>(&self, state: &ExplorerState, actions: I) -> ApiResult<ExplorerState>
    where
        I: IntoIterator<Item = ExplorerAction>,
    {
        actions
            .into_iter()
            .try_fold(state.clone(), |s, action| self.apply(&s, action))
    }

    fn find_item(&self, item_number: &str) -> ApiResult<&BomItem> {
        self.bom
            .find(item_number)
            .ok_or_else(|| ApiError::NotFound(format!("物料 {}", item_number)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::bundled::bundled_bom;

    fn api() -> MrpApi {
        MrpApi::new(Arc::new(bundled_bom().unwrap().clone()), MrpPolicy::default())
    }

    #[test]
    fn test_view_covers_bundled_tree() {
        let api = api();
        let view = api.view(&ExplorerState::default());
        assert_eq!(view.summary.node_count, api.bom().node_count());
        assert_eq!(view.rows.len(), view.summary.node_count, "默认全部展开");
    }

    #[test]
    fn test_apply_rejects_unknown_item() {
        let api = api();
        let err = api
            .apply(&ExplorerState::default(), ExplorerAction::ToggleNode("NOPE".to_string()))
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn test_apply_rejects_delay_on_assembly() {
        let api = api();
        let root = api.bom().item_number.clone();
        let err = api
            .apply(&ExplorerState::default(), ExplorerAction::SimulateDelay(root))
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }
}
