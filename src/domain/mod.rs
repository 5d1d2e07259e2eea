// ==========================================
// 制造分析演示引擎 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含加载逻辑,不含引擎逻辑
// ==========================================

pub mod bom;
pub mod production;
pub mod quality;
pub mod supplier;
pub mod types;

// 重导出核心类型
pub use bom::{BomItem, BomIter};
pub use production::{OeeFactors, ProductionRecord};
pub use quality::{DefectCount, QualityRecord};
pub use supplier::{Certification, Supplier, SupplierMetric, SupplierWeights};
pub use types::{DefectSeverity, LotSizing, OeeBand, ScoreBand};
