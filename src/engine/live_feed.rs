// ==========================================
// 制造分析演示引擎 - 实时模拟数据源
// ==========================================
// 职责: 周期性地对 OEE 三要素施加随机波动,推送新快照
// 生命周期: 由 LiveFeedHandle 持有;cancel() 停止,drop 即中止,
//           接收端关闭时任务自行退出
// 红线: 波动计算是纯函数（apply_tick）,随机源由调用方注入
// ==========================================

use crate::domain::types::OeeBand;
use crate::engine::oee::{clamp_percent, OeeCalculator};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};
use uuid::Uuid;

/// 推送通道容量
const UPDATE_CHANNEL_CAPACITY: usize = 16;

/// 实时数据源参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiveFeedSettings {
    pub interval: Duration,
    /// 单次最大波动（百分点）
    pub max_delta: f64,
}

impl Default for LiveFeedSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(3000),
            max_delta: 2.0,
        }
    }
}

/// OEE 快照（不可变,每个 tick 生成新值）
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OeeSnapshot {
    pub tick: u64,
    pub availability: f64,
    pub performance: f64,
    pub quality: f64,
    pub oee: f64,
    pub band: OeeBand,
}

impl OeeSnapshot {
    pub fn new(availability: f64, performance: f64, quality: f64) -> Self {
        Self::at_tick(0, availability, performance, quality)
    }

    fn at_tick(tick: u64, availability: f64, performance: f64, quality: f64) -> Self {
        let result = OeeCalculator::new().calculate(availability, performance, quality);
        Self {
            tick,
            availability: result.availability,
            performance: result.performance,
            quality: result.quality,
            oee: result.oee,
            band: result.band,
        }
    }
}

/// 推送给订阅方的更新
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveUpdate {
    pub feed_id: Uuid,
    pub emitted_at: DateTime<Utc>,
    pub snapshot: OeeSnapshot,
}

/// 施加一次波动（纯函数）
///
/// deltas 依次作用于 可用率 / 性能率 / 质量率,结果裁剪到 0~100
pub fn apply_tick(current: &OeeSnapshot, deltas: [f64; 3]) -> OeeSnapshot {
    OeeSnapshot::at_tick(
        current.tick + 1,
        clamp_percent(current.availability + deltas[0]),
        clamp_percent(current.performance + deltas[1]),
        clamp_percent(current.quality + deltas[2]),
    )
}

/// 生成 [-max_delta, max_delta] 内的三个随机波动
pub fn random_deltas<R: Rng>(rng: &mut R, max_delta: f64) -> [f64; 3] {
    let max = if max_delta.is_finite() { max_delta.abs() } else { 0.0 };
    [
        rng.random_range(-max..=max),
        rng.random_range(-max..=max),
        rng.random_range(-max..=max),
    ]
}

// ==========================================
// LiveFeedHandle - 周期任务句柄
// ==========================================
pub struct LiveFeedHandle {
    feed_id: Uuid,
    cancel_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl LiveFeedHandle {
    pub fn feed_id(&self) -> Uuid {
        self.feed_id
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// 停止任务并等待退出
    pub async fn cancel(mut self) {
        if let Some(tx) = self.cancel_tx.take() {
            // 任务已退出时接收端不存在,忽略
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
        debug!(feed_id = %self.feed_id, "实时数据源已停止");
    }
}

impl Drop for LiveFeedHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// 启动实时数据源
///
/// 需要在 tokio 运行时内调用。首个更新在一个间隔之后推送。
pub fn spawn_live_feed<R>(
    settings: LiveFeedSettings,
    initial: OeeSnapshot,
    mut rng: R,
) -> (LiveFeedHandle, mpsc::Receiver<LiveUpdate>)
where
    R: Rng + Send + 'static,
{
    let feed_id = Uuid::new_v4();
    let (tx, rx) = mpsc::channel(UPDATE_CHANNEL_CAPACITY);
    let (cancel_tx, mut cancel_rx) = oneshot::channel::<()>();

    info!(
        feed_id = %feed_id,
        interval_ms = settings.interval.as_millis() as u64,
        max_delta = settings.max_delta,
        "实时数据源启动"
    );

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(settings.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // interval 的第一次 tick 立即完成,跳过
        ticker.tick().await;

        let mut current = initial;
        loop {
            tokio::select! {
                _ = &mut cancel_rx => {
                    debug!(feed_id = %feed_id, "收到取消信号");
                    break;
                }
                _ = ticker.tick() => {
                    let deltas = random_deltas(&mut rng, settings.max_delta);
                    current = apply_tick(&current, deltas);
                    let update = LiveUpdate {
                        feed_id,
                        emitted_at: Utc::now(),
                        snapshot: current,
                    };
                    // 通道已满时发送会挂起,此时仍须响应取消
                    tokio::select! {
                        _ = &mut cancel_rx => {
                            debug!(feed_id = %feed_id, "发送等待中收到取消信号");
                            break;
                        }
                        sent = tx.send(update) => {
                            if sent.is_err() {
                                debug!(feed_id = %feed_id, "订阅方已关闭,任务退出");
                                break;
                            }
                        }
                    }
                }
            }
        }
    });

    (
        LiveFeedHandle {
            feed_id,
            cancel_tx: Some(cancel_tx),
            task: Some(task),
        },
        rx,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_apply_tick_clamps_and_counts() {
        let start = OeeSnapshot::new(99.0, 50.0, 1.0);
        let next = apply_tick(&start, [5.0, -2.0, -3.0]);
        assert_eq!(next.tick, 1);
        assert_eq!(next.availability, 100.0);
        assert_eq!(next.performance, 48.0);
        assert_eq!(next.quality, 0.0);
        assert_eq!(next.oee, 0.0);
        assert_eq!(start.tick, 0, "原快照不变");
    }

    #[test]
    fn test_random_deltas_bounded_and_seeded() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let da = random_deltas(&mut a, 2.0);
            let db = random_deltas(&mut b, 2.0);
            assert_eq!(da, db, "同种子序列一致");
            assert!(da.iter().all(|d| (-2.0..=2.0).contains(d)));
        }
    }

    #[test]
    fn test_zero_delta_is_stationary() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(random_deltas(&mut rng, 0.0), [0.0, 0.0, 0.0]);
    }

    #[tokio::test]
    async fn test_feed_emits_then_cancels() {
        let settings = LiveFeedSettings {
            interval: Duration::from_millis(10),
            max_delta: 1.0,
        };
        let (handle, mut rx) =
            spawn_live_feed(settings, OeeSnapshot::new(85.0, 90.0, 95.0), StdRng::seed_from_u64(3));

        let first = rx.recv().await.expect("first update");
        let second = rx.recv().await.expect("second update");
        assert_eq!(first.feed_id, handle.feed_id());
        assert_eq!(first.snapshot.tick, 1);
        assert_eq!(second.snapshot.tick, 2);

        handle.cancel().await;
        // 任务退出后发送端被释放,通道最终关闭
        while rx.recv().await.is_some() {}
    }

    #[tokio::test]
    async fn test_feed_stops_when_receiver_dropped() {
        let settings = LiveFeedSettings {
            interval: Duration::from_millis(5),
            max_delta: 1.0,
        };
        let (handle, rx) =
            spawn_live_feed(settings, OeeSnapshot::new(80.0, 80.0, 80.0), StdRng::seed_from_u64(9));
        drop(rx);

        for _ in 0..100 {
            if handle.is_finished() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert!(handle.is_finished(), "接收端关闭后任务应退出");
    }
}
