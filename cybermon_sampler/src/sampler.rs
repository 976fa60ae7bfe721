//! Background sampler: ticks the engine on a fixed period and publishes the
//! newest snapshot into a single-slot watch channel, so the renderer always
//! reads the latest value and never waits on a sample.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{info, warn};

use crate::engine::{Clock, SamplingEngine};
use crate::source::StatsSource;
use crate::types::MetricsSnapshot;

pub type LatestSnapshot = watch::Receiver<Arc<MetricsSnapshot>>;

/// Takes the first sample right away on the calling thread, then one per
/// `period` on a spawned task. Must be called inside a tokio runtime. The
/// task ends once every receiver has been dropped.
pub fn spawn_sampler<S, C>(
    mut engine: SamplingEngine<S, C>,
    period: Duration,
) -> (JoinHandle<()>, LatestSnapshot)
where
    S: StatsSource + Send + 'static,
    C: Clock + Send + 'static,
{
    let first = engine.tick();
    let (tx, rx) = watch::channel(Arc::new(first));

    let handle = tokio::spawn(async move {
        info!(?period, "sampler started");
        let mut ticker = interval(period.max(Duration::from_millis(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // interval fires immediately; the first sample is already published
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if tx.is_closed() {
                break;
            }
            let res = tokio::task::spawn_blocking(move || {
                let snap = engine.tick();
                (engine, snap)
            })
            .await;
            let snap = match res {
                Ok((e, snap)) => {
                    engine = e;
                    snap
                }
                Err(e) => {
                    warn!("sampling tick aborted: {e}");
                    break;
                }
            };
            if tx.send(Arc::new(snap)).is_err() {
                break;
            }
        }
        info!("sampler stopped");
    });

    (handle, rx)
}
