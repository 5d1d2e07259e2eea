// ==========================================
// 制造分析演示引擎 - 应用层
// ==========================================
// 职责: 各演示的交互状态（不可变快照 + reducer）
// ==========================================

pub mod mrp_state;
pub mod oee_state;
pub mod supplier_state;

// 重导出
pub use mrp_state::{ExplorerAction, ExplorerState};
pub use oee_state::{OeeAction, OeeState};
pub use supplier_state::{SupplierAction, SupplierState, WeightKey};
