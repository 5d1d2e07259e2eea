// ==========================================
// 制造分析演示引擎 - 引擎层
// ==========================================
// 职责: 实现演示计算规则（BOM 展开 / OEE / 帕累托 / 供应商评分）
// 红线: 引擎不读文件、不持有可变状态;实时数据源除外（周期任务）
// ==========================================

pub mod explosion;
pub mod live_feed;
pub mod oee;
pub mod pareto;
pub mod requirements;
pub mod supplier_score;

// 重导出核心引擎
pub use explosion::{ExplodedNode, ExplosionEngine, ExplosionSummary, ShortageLedger};
pub use live_feed::{spawn_live_feed, LiveFeedHandle, LiveFeedSettings, LiveUpdate, OeeSnapshot};
pub use oee::{OeeCalculator, OeeResult};
pub use pareto::{LineFilter, ParetoEntry, QualityAnalyzer, QualitySummary};
pub use requirements::{
    apply_lot_sizing, clamp_demand, on_hand_for, parse_demand_input, MrpPolicy, Requirements,
    RequirementsCalculator,
};
pub use supplier_score::{SupplierScore, SupplierScorer};
