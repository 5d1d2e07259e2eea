// ==========================================
// 制造分析演示引擎 - 核心库
// ==========================================
// 内容: BOM 展开 / OEE 计算 / 质量帕累托 / 供应商评分 / 实时模拟
// 技术栈: Rust + serde + tokio + tracing
// 系统定位: 演示引擎（内置夹具,不连接真实业务系统）
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 夹具层 - 内置与外部数据
pub mod fixtures;

// 引擎层 - 计算规则
pub mod engine;

// 应用层 - 交互状态
pub mod app;

// 渲染层 - 文本输出
pub mod render;

// 配置层
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// 性能统计
pub mod perf;

// API 层
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{DefectSeverity, LotSizing, OeeBand, ScoreBand};

// 领域实体
pub use domain::{BomItem, ProductionRecord, QualityRecord, Supplier, SupplierWeights};

// 引擎
pub use engine::{
    ExplodedNode, ExplosionEngine, OeeCalculator, QualityAnalyzer, RequirementsCalculator,
    SupplierScorer,
};

// 状态
pub use app::{ExplorerAction, ExplorerState, OeeAction, OeeState, SupplierAction, SupplierState};

// API
pub use api::{ApiError, ApiResult, DemoApis};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "NKJ 制造分析演示引擎";
