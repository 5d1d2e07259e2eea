// ==========================================
// 制造分析演示引擎 - API 层
// ==========================================
// 职责: 组合夹具、引擎与交互状态,供命令行调用
// ==========================================

pub mod context;
pub mod error;
pub mod mrp_api;
pub mod oee_api;
pub mod quality_api;
pub mod supplier_api;

// 重导出核心类型
pub use context::DemoApis;
pub use error::{ApiError, ApiResult};
pub use mrp_api::{MrpApi, MrpView};
pub use oee_api::{live_feed_settings, OeeApi, OeeView};
pub use quality_api::{QualityApi, QualityView};
pub use supplier_api::{SupplierApi, SupplierView};
