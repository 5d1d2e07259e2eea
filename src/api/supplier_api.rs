// ==========================================
// 制造分析演示引擎 - 供应商评分 API
// ==========================================
// 职责: 供应商快照 + 权重 的评分排名;支持从 CSV / JSON 导入自定义供应商
// ==========================================

use std::path::Path;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::info;

use crate::api::error::{ApiError, ApiResult};
use crate::app::supplier_state::{SupplierAction, SupplierState};
use crate::domain::supplier::{Supplier, SupplierWeights};
use crate::engine::supplier_score::SupplierScore;
use crate::fixtures::loader::load_suppliers_file;
use crate::perf::PerfGuard;
use crate::render::tables::render_supplier_ranking;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierView {
    pub weights: SupplierWeights,
    pub as_of: NaiveDate,
    pub ranking: Vec<SupplierScore>,
}

impl SupplierView {
    pub fn to_text(&self) -> String {
        render_supplier_ranking(&self.ranking, &self.weights)
    }
}

pub struct SupplierApi {
    suppliers: Arc<Vec<Supplier>>,
    default_weights: SupplierWeights,
}

impl SupplierApi {
    pub fn new(suppliers: Arc<Vec<Supplier>>, default_weights: SupplierWeights) -> Self {
        Self {
            suppliers,
            default_weights,
        }
    }

    /// 导入自定义供应商文件（.json / .csv）
    pub fn import(path: &Path, default_weights: SupplierWeights) -> ApiResult<Self> {
        let suppliers = load_suppliers_file(path)?;
        if suppliers.is_empty() {
            return Err(ApiError::InvalidInput(format!(
                "供应商文件为空: {}",
                path.display()
            )));
        }
        info!(path = %path.display(), count = suppliers.len(), "导入供应商");
        Ok(Self::new(Arc::new(suppliers), default_weights))
    }

    pub fn initial_state(&self) -> SupplierState {
        SupplierState::new(Arc::clone(&self.suppliers), self.default_weights)
    }

    pub fn apply(&self, state: &SupplierState, action: SupplierAction) -> ApiResult<SupplierState> {
        if let SupplierAction::RecordIncident(id) = &action {
            if state.incidents_of(id).is_none() {
                return Err(ApiError::NotFound(format!("供应商 {}", id)));
            }
        }
        Ok(state.reduce(action))
    }

    pub fn apply_all<I>(&self, state: &SupplierState, actions: I) -> ApiResult<SupplierState>
    where
        I: IntoIterator<Item = SupplierAction>,
    {
        actions
            .into_iter()
            .try_fold(state.clone(), |s, action| self.apply(&s, action))
    }

    /// 以今天为基准排名（认证过期判断）
    pub fn view(&self, state: &SupplierState) -> SupplierView {
        self.view_as_of(state, Local::now().date_naive())
    }

    pub fn view_as_of(&self, state: &SupplierState, as_of: NaiveDate) -> SupplierView {
        let _perf = PerfGuard::new("supplier_view");
        SupplierView {
            weights: state.weights(),
            as_of,
            ranking: state.ranking(as_of),
        }
    }
}
