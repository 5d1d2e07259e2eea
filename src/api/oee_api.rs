// ==========================================
// 制造分析演示引擎 - OEE 计算器 API
// ==========================================
// 职责: 样例数据读取、OEE 计算、实时数据源启动
// ==========================================

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tokio::sync::mpsc;

use crate::api::error::{ApiError, ApiResult};
use crate::app::oee_state::{OeeAction, OeeState};
use crate::config::DemoConfig;
use crate::domain::production::{OeeFactors, ProductionRecord};
use crate::engine::live_feed::{spawn_live_feed, LiveFeedHandle, LiveFeedSettings, LiveUpdate, OeeSnapshot};
use crate::engine::oee::{OeeCalculator, OeeResult};
use crate::perf::PerfGuard;
use crate::render::tables::render_oee;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OeeView {
    pub state: OeeState,
    pub result: OeeResult,
}

impl OeeView {
    pub fn to_text(&self) -> String {
        render_oee(&self.result, self.state.using_sample_data())
    }
}

// ==========================================
// OeeApi - OEE 计算器 API
// ==========================================
pub struct OeeApi {
    production: Arc<Vec<ProductionRecord>>,
    calculator: OeeCalculator,
}

impl OeeApi {
    pub fn new(production: Arc<Vec<ProductionRecord>>) -> Self {
        Self {
            production,
            calculator: OeeCalculator::new(),
        }
    }

    /// 第一条带 OEE 要素的生产记录
    pub fn sample_factors(&self) -> ApiResult<OeeFactors> {
        self.calculator
            .first_sample(&self.production)
            .copied()
            .ok_or_else(|| ApiError::NotFound("带 OEE 数据的生产记录".to_string()))
    }

    /// 载入样例数据
    pub fn load_sample(&self, state: &OeeState) -> ApiResult<OeeState> {
        Ok(state.reduce(OeeAction::LoadSample(self.sample_factors()?)))
    }

    pub fn view(&self, state: &OeeState) -> OeeView {
        let _perf = PerfGuard::new("oee_view");
        OeeView {
            state: *state,
            result: self
                .calculator
                .calculate(state.availability(), state.performance(), state.quality()),
        }
    }

    /// 启动实时数据源
    ///
    /// seed 为 None 时使用系统熵源;需要在 tokio 运行时内调用
    pub fn start_live_feed(
        &self,
        state: &OeeState,
        settings: LiveFeedSettings,
        seed: Option<u64>,
    ) -> (LiveFeedHandle, mpsc::Receiver<LiveUpdate>) {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let initial = OeeSnapshot::new(state.availability(), state.performance(), state.quality());
        spawn_live_feed(settings, initial, rng)
    }
}

/// 由配置构造实时数据源参数
pub fn live_feed_settings(config: &DemoConfig) -> LiveFeedSettings {
    LiveFeedSettings {
        interval: Duration::from_millis(config.live_feed_interval_ms),
        max_delta: config.live_feed_max_delta,
    }
}
