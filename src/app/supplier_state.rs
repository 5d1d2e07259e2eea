// ==========================================
// 制造分析演示引擎 - 供应商评分器状态
// ==========================================
// 职责: 权重滑块 + 供应商快照（含事故计数）
// 红线: 事故计数只通过 reduce 生成新快照变更,原夹具数据不被修改
// ==========================================

use crate::domain::supplier::{Supplier, SupplierWeights};
use crate::engine::supplier_score::{SupplierScore, SupplierScorer};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, warn};

/// 权重项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightKey {
    Delivery,
    Quality,
    Incidents,
}

impl WeightKey {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "delivery" => Some(WeightKey::Delivery),
            "quality" => Some(WeightKey::Quality),
            "incidents" | "incident" => Some(WeightKey::Incidents),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SupplierAction {
    /// 设置单项权重（裁剪到 0~100）
    SetWeight(WeightKey, u32),
    /// 为供应商记录一次事故
    RecordIncident(String),
    /// 恢复夹具中的事故计数
    ResetIncidents,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SupplierState {
    weights: SupplierWeights,
    /// 夹具原始快照（ResetIncidents 的恢复点）
    baseline: Arc<Vec<Supplier>>,
    suppliers: Arc<Vec<Supplier>>,
}

impl SupplierState {
    pub fn new(suppliers: Arc<Vec<Supplier>>, weights: SupplierWeights) -> Self {
        Self {
            weights,
            baseline: Arc::clone(&suppliers),
            suppliers,
        }
    }

    pub fn weights(&self) -> SupplierWeights {
        self.weights
    }

    pub fn suppliers(&self) -> &[Supplier] {
        &self.suppliers
    }

    pub fn incidents_of(&self, supplier_id: &str) -> Option<u32> {
        self.suppliers
            .iter()
            .find(|s| s.supplier_id == supplier_id)
            .map(|s| s.incidents)
    }

    pub fn ranking(&self, today: NaiveDate) -> Vec<SupplierScore> {
        SupplierScorer::new().rank(&self.suppliers, &self.weights, today)
    }

    pub fn reduce(&self, action: SupplierAction) -> SupplierState {
        debug!(action = ?action, "供应商评分动作");
        let mut next = self.clone();

        match action {
            SupplierAction::SetWeight(key, value) => {
                let w = self.weights;
                next.weights = match key {
                    WeightKey::Delivery => SupplierWeights::clamped(value, w.quality, w.incidents),
                    WeightKey::Quality => SupplierWeights::clamped(w.delivery, value, w.incidents),
                    WeightKey::Incidents => SupplierWeights::clamped(w.delivery, w.quality, value),
                };
            }
            SupplierAction::RecordIncident(supplier_id) => {
                if self.incidents_of(&supplier_id).is_none() {
                    warn!(supplier = %supplier_id, "供应商不存在,忽略事故记录");
                    return next;
                }
                let updated: Vec<Supplier> = self
                    .suppliers
                    .iter()
                    .map(|s| {
                        if s.supplier_id == supplier_id {
                            Supplier {
                                incidents: s.incidents.saturating_add(1),
                                ..s.clone()
                            }
                        } else {
                            s.clone()
                        }
                    })
                    .collect();
                next.suppliers = Arc::new(updated);
            }
            SupplierAction::ResetIncidents => {
                next.suppliers = Arc::clone(&self.baseline);
            }
        }

        next
    }
}
