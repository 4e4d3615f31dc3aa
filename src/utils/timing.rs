//! Rate-limiting wrappers for event handlers.
//!
//! Both wrappers read time from `tokio::time`, so tests can drive them with a
//! paused clock.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Leading-edge throttle around a handler.
///
/// The first call runs immediately; later calls are dropped until `interval`
/// has elapsed since the last call that ran. A dropped call is never replayed
/// at the trailing edge.
pub struct Throttled<F> {
    f: F,
    interval: Duration,
    last_run: Option<Instant>,
}

/// Wrap `f` so that it runs at most once per `interval`.
///
pub fn throttle<F>(f: F, interval: Duration) -> Throttled<F> {
    Throttled {
        f,
        interval,
        last_run: None,
    }
}

impl<F> Throttled<F> {
    /// Invoke the handler unless throttled. Returns the handler's result, or
    /// None when the call was dropped.
    ///
    pub fn call<A, R>(&mut self, arg: A) -> Option<R>
    where
        F: FnMut(A) -> R,
    {
        let now = Instant::now();
        if let Some(last_run) = self.last_run {
            if now.duration_since(last_run) < self.interval {
                return None;
            }
        }
        self.last_run = Some(now);
        Some((self.f)(arg))
    }
}

/// Trailing-edge debounce around a handler.
///
/// Each call cancels the pending invocation and schedules a new one `wait`
/// after it, carrying the latest argument. Must be called from within a tokio
/// runtime.
pub struct Debounced<F> {
    f: Arc<F>,
    wait: Duration,
    pending: Option<JoinHandle<()>>,
}

/// Wrap `f` so that it runs once `wait` has passed without another call.
///
pub fn debounce<F>(f: F, wait: Duration) -> Debounced<F> {
    Debounced {
        f: Arc::new(f),
        wait,
        pending: None,
    }
}

impl<F> Debounced<F> {
    pub fn call<A>(&mut self, arg: A)
    where
        F: Fn(A) + Send + Sync + 'static,
        A: Send + 'static,
    {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
        let f = Arc::clone(&self.f);
        let wait = self.wait;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(wait).await;
            f(arg);
        }));
    }

    /// Return whether an invocation is scheduled and has not run yet.
    ///
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .map_or(false, |pending| !pending.is_finished())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[tokio::test(start_paused = true)]
    async fn throttle_runs_leading_call_only() {
        let mut calls = 0;
        let mut throttled = throttle(|n: usize| n * 2, Duration::from_millis(16));

        let mut results = vec![];
        for i in 0..10 {
            results.push(throttled.call(i));
            tokio::time::advance(Duration::from_millis(1)).await;
        }
        calls += results.iter().filter(|r| r.is_some()).count();
        assert_eq!(calls, 1);
        assert_eq!(results[0], Some(0));

        // 15ms after the leading call
        tokio::time::advance(Duration::from_millis(5)).await;
        assert_eq!(throttled.call(20), None);

        tokio::time::advance(Duration::from_millis(1)).await;
        assert_eq!(throttled.call(21), Some(42));
    }

    #[tokio::test(start_paused = true)]
    async fn throttle_drops_trailing_call() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let mut throttled = throttle(
            move |_: ()| {
                counter.fetch_add(1, Ordering::SeqCst);
            },
            Duration::from_millis(16),
        );

        throttled.call(());
        throttled.call(());
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn debounce_fires_once_after_burst() {
        let hits = Arc::new(AtomicUsize::new(0));
        let last = Arc::new(Mutex::new(None));
        let (counter, latest) = (Arc::clone(&hits), Arc::clone(&last));
        let mut debounced = debounce(
            move |n: usize| {
                counter.fetch_add(1, Ordering::SeqCst);
                *latest.lock().unwrap() = Some(n);
            },
            Duration::from_millis(250),
        );

        // One call every 50ms for 1000ms, the last one at 950ms
        for i in 0..20 {
            debounced.call(i);
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert!(debounced.is_pending());

        // Due at 1200ms
        tokio::time::sleep(Duration::from_millis(199)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(*last.lock().unwrap(), Some(19));
        assert!(!debounced.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn debounce_separate_bursts_fire_separately() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let mut debounced = debounce(
            move |_: ()| {
                counter.fetch_add(1, Ordering::SeqCst);
            },
            Duration::from_millis(250),
        );

        debounced.call(());
        tokio::time::sleep(Duration::from_millis(300)).await;
        debounced.call(());
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }
}
