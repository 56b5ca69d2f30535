//! Timer-driven promotion processes.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::promotion::{Promotion, PromotionConfig};
use crate::session::{lock, SharedStorefront};

/// Owns the background tasks running the flash sale and suggestion ticks.
///
/// Each process waits a random initial delay, then ticks once per period, so
/// the first tick lands at `delay + period`. Ticks run with the storefront
/// locked and never interleave with shopper commands.
#[derive(Debug, Default)]
pub struct PromotionScheduler {
    tasks: Vec<JoinHandle<()>>,
}

impl PromotionScheduler {
    /// Scheduler with no running processes.
    pub fn idle() -> Self {
        Self::default()
    }

    /// Spawn both processes on the current tokio runtime.
    ///
    /// Notifications go to `sink`; a closed receiver is ignored.
    pub fn start(
        storefront: &SharedStorefront,
        config: &PromotionConfig,
        sink: UnboundedSender<Promotion>,
        mut rng: StdRng,
    ) -> Self {
        let flash_delay = sample_delay(&mut rng, config.flash_sale.initial_delay_max());
        let suggestion_delay = sample_delay(&mut rng, config.suggestion.initial_delay_max());
        let mut flash_rng = StdRng::seed_from_u64(rng.gen());

        let flash_sale = {
            let storefront = Arc::clone(storefront);
            let sink = sink.clone();
            spawn_recurring(
                "flash_sale",
                flash_delay,
                config.flash_sale.period(),
                move || {
                    let mut storefront = lock(&storefront);
                    if let Some(promotion) = storefront.flash_sale_tick(&mut flash_rng) {
                        let _ = sink.send(promotion);
                    }
                },
            )
        };

        let suggestion = {
            let storefront = Arc::clone(storefront);
            spawn_recurring(
                "suggestion",
                suggestion_delay,
                config.suggestion.period(),
                move || {
                    let mut storefront = lock(&storefront);
                    if let Some(promotion) = storefront.suggestion_tick() {
                        let _ = sink.send(promotion);
                    }
                },
            )
        };

        info!(?flash_delay, ?suggestion_delay, "promotion processes started");
        Self {
            tasks: vec![flash_sale, suggestion],
        }
    }

    pub fn is_running(&self) -> bool {
        self.tasks.iter().any(|task| !task.is_finished())
    }

    /// Cancel both processes. Idempotent.
    pub fn stop(&mut self) {
        if self.tasks.is_empty() {
            return;
        }
        for task in self.tasks.drain(..) {
            task.abort();
        }
        info!("promotion processes stopped");
    }
}

impl Drop for PromotionScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Uniform delay in `[0, max)`.
fn sample_delay<R: Rng + ?Sized>(rng: &mut R, max: Duration) -> Duration {
    if max.is_zero() {
        Duration::ZERO
    } else {
        max.mul_f64(rng.gen::<f64>())
    }
}

fn spawn_recurring<F>(
    process: &'static str,
    initial_delay: Duration,
    period: Duration,
    mut tick: F,
) -> JoinHandle<()>
where
    F: FnMut() + Send + 'static,
{
    tokio::spawn(async move {
        let start = Instant::now() + initial_delay + period;
        let mut interval = time::interval_at(start, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            debug!(process, "promotion tick");
            tick();
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_delay_bounds() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(sample_delay(&mut rng, Duration::ZERO), Duration::ZERO);
        for _ in 0..50 {
            assert!(sample_delay(&mut rng, Duration::from_secs(10)) < Duration::from_secs(10));
        }
    }

    #[test]
    fn test_idle_scheduler_is_not_running() {
        let mut scheduler = PromotionScheduler::idle();
        assert!(!scheduler.is_running());
        scheduler.stop();
    }
}
