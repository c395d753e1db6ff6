//! Admission control for the batch runner.
//!
//! The free API tier allows a handful of requests per minute. The batch runner
//! asks its [`Pacer`] for permission before every request and never sends two
//! requests at once, so the pacer alone decides the request rate.
//!
//! - [`FixedDelay`] sleeps a fixed duration before every request except the
//!   first, i.e. between consecutive requests and never after the last one.
//! - [`QuotaPacer`] is a `governor` token bucket with burst 1 that gates every
//!   request, including the first. With `N` requests per window `W` cells are
//!   spaced `W / N` apart, so no half-open window of length `W` ever admits
//!   more than `N` requests.

use std::future::Future;
use std::num::NonZeroU32;
use std::pin::Pin;
use std::sync::Arc;
use std::time::{Duration, Instant};

use governor::clock::DefaultClock;
use governor::state::direct::NotKeyed;
use governor::state::InMemoryState;
use governor::{Quota, RateLimiter};

/// Free-tier ceiling for Alpha Vantage.
pub const ALPHAVANTAGE_QUOTA_PER_MINUTE: u32 = 5;

const QUOTA_WINDOW: Duration = Duration::from_secs(60);

/// Which pacer a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PacingMode {
    #[default]
    FixedDelay,
    Quota {
        per_minute: u32,
    },
}

/// Gate consulted before each request of a run.
pub trait Pacer: Send + Sync {
    /// Waits until the request at `position` (0-based, in run order) may be
    /// sent, and returns how long it waited.
    fn ready<'a>(&'a self, position: usize) -> Pin<Box<dyn Future<Output = Duration> + Send + 'a>>;
}

/// Builds the pacer selected by `mode`. `delay` only applies to
/// [`PacingMode::FixedDelay`].
pub fn pacer_for(mode: PacingMode, delay: Duration) -> Arc<dyn Pacer> {
    match mode {
        PacingMode::FixedDelay => Arc::new(FixedDelay::new(delay)),
        PacingMode::Quota { per_minute } => Arc::new(QuotaPacer::new(QUOTA_WINDOW, per_minute)),
    }
}

/// Fixed sleep between consecutive requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Sleep owed before the request at `position`. The first request goes
    /// out immediately; every later one waits the full delay.
    pub fn delay_before(&self, position: usize) -> Option<Duration> {
        (position > 0 && !self.delay.is_zero()).then_some(self.delay)
    }
}

impl Pacer for FixedDelay {
    fn ready<'a>(&'a self, position: usize) -> Pin<Box<dyn Future<Output = Duration> + Send + 'a>> {
        Box::pin(async move {
            match self.delay_before(position) {
                Some(delay) => {
                    tokio::time::sleep(delay).await;
                    delay
                }
                None => Duration::ZERO,
            }
        })
    }
}

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Token bucket sized to the remote ceiling.
pub struct QuotaPacer {
    limiter: DirectRateLimiter,
}

impl QuotaPacer {
    pub fn new(quota_window: Duration, quota_limit: u32) -> Self {
        let quota = Quota::with_period(cell_period(quota_window, quota_limit))
            .unwrap_or_else(|| Quota::per_second(NonZeroU32::MIN))
            .allow_burst(NonZeroU32::MIN);
        Self {
            limiter: RateLimiter::direct(quota),
        }
    }
}

impl Pacer for QuotaPacer {
    fn ready<'a>(&'a self, _position: usize) -> Pin<Box<dyn Future<Output = Duration> + Send + 'a>> {
        Box::pin(async move {
            let started = Instant::now();
            self.limiter.until_ready().await;
            started.elapsed()
        })
    }
}

fn cell_period(quota_window: Duration, quota_limit: u32) -> Duration {
    let safe_limit = quota_limit.max(1);
    let seconds_per_cell = (quota_window.as_secs_f64() / f64::from(safe_limit)).max(0.001);
    Duration::from_secs_f64(seconds_per_cell)
}
