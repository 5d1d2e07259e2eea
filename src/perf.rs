use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;

/// 慢渲染阈值环境变量（毫秒）
pub const ENV_SLOW_RENDER_MS: &str = "NKJ_DEMO_SLOW_RENDER_MS";

static SLOW_RENDER_THRESHOLD_MS: OnceLock<AtomicU64> = OnceLock::new();

fn threshold_cell() -> &'static AtomicU64 {
    SLOW_RENDER_THRESHOLD_MS.get_or_init(|| {
        let ms = std::env::var(ENV_SLOW_RENDER_MS)
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(if cfg!(debug_assertions) { 50 } else { 200 });
        AtomicU64::new(ms)
    })
}

/// 当前慢渲染阈值（毫秒）;0 表示关闭告警
pub fn slow_render_threshold_ms() -> u64 {
    threshold_cell().load(Ordering::Relaxed)
}

/// 覆写慢渲染阈值
pub fn set_slow_render_threshold_ms(ms: u64) {
    threshold_cell().store(ms, Ordering::Relaxed);
}

/// 性能统计 Guard：记录 elapsed_ms,超过阈值时告警
///
/// 使用方式：
/// ```ignore
/// let _perf = nkj_demo_engine::perf::PerfGuard::new("explode_bom");
/// // do work...
/// ```
pub struct PerfGuard {
    op: &'static str,
    start: Instant,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        Self {
            op,
            start: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed_ms();

        tracing::debug!(
            target: "perf",
            op = self.op,
            elapsed_ms,
            "done"
        );

        let threshold = slow_render_threshold_ms();
        if threshold > 0 && elapsed_ms >= threshold {
            tracing::warn!(
                target: "slow_render",
                op = self.op,
                elapsed_ms,
                threshold_ms = threshold,
                "slow render"
            );
        }
    }
}
