//! Last-write-wins delay of a rapidly changing value.

use std::{sync::Arc, time::Duration};

use tokio::{sync::watch, task::JoinHandle};

pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

/// Publishes a value only after it has stayed unchanged for `delay`.
///
/// Each [`Debouncer::set`] restarts the timer; intermediate values are dropped.
/// The pending timer is aborted on [`Debouncer::cancel`] and when the debouncer
/// is dropped, so nothing is published after teardown.
///
/// Timers are spawned on the current tokio runtime, so `set` must be called
/// from within one.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    output: Arc<watch::Sender<T>>,
    pending: Option<JoinHandle<()>>,
}

impl<T> Debouncer<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    pub fn new(initial: T, delay: Duration) -> Self {
        let (output, _) = watch::channel(initial);
        Self { delay, output: Arc::new(output), pending: None }
    }

    /// Receiver of the settled values.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.output.subscribe()
    }

    /// Latest settled value.
    pub fn current(&self) -> T {
        self.output.borrow().clone()
    }

    /// Record a new input value and restart the quiet period.
    pub fn set(&mut self, value: T) {
        self.cancel();

        let output = Arc::clone(&self.output);
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            publish(&output, value);
        }));
    }

    /// Cancel the pending value and publish `value` immediately.
    pub fn reset(&mut self, value: T) {
        self.cancel();
        publish(&self.output, value);
    }

    /// Drop the pending value, if any, without publishing it.
    pub fn cancel(&mut self) {
        if let Some(timer) = self.pending.take() {
            timer.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|timer| !timer.is_finished())
    }
}

/// Settling on the value already published is not a change.
fn publish<T: PartialEq>(output: &watch::Sender<T>, value: T) {
    output.send_if_modified(|current| {
        if *current == value {
            false
        } else {
            *current = value;
            true
        }
    });
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(timer) = self.pending.take() {
            timer.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{Instant, sleep, timeout};

    const DELAY: Duration = Duration::from_millis(500);

    #[tokio::test(start_paused = true)]
    async fn rapid_changes_publish_only_the_last_value() {
        let mut debouncer = Debouncer::new(String::new(), DELAY);
        let mut rx = debouncer.subscribe();
        let start = Instant::now();

        debouncer.set("l".to_string());
        sleep(Duration::from_millis(100)).await;
        debouncer.set("lo".to_string());
        sleep(Duration::from_millis(200)).await;
        debouncer.set("lon".to_string());

        rx.changed().await.expect("debouncer alive");
        assert_eq!(*rx.borrow_and_update(), "lon");

        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(800), "published too early: {elapsed:?}");
        assert!(elapsed < Duration::from_millis(810), "published too late: {elapsed:?}");

        assert!(timeout(Duration::from_secs(5), rx.changed()).await.is_err());
        assert_eq!(debouncer.current(), "lon");
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_published_before_delay() {
        let mut debouncer = Debouncer::new(0u32, DELAY);
        let rx = debouncer.subscribe();

        debouncer.set(7);
        sleep(Duration::from_millis(499)).await;
        assert!(!rx.has_changed().unwrap());
        assert!(debouncer.is_pending());

        sleep(Duration::from_millis(2)).await;
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow(), 7);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_discards_pending_value() {
        let mut debouncer = Debouncer::new(0u32, DELAY);
        let rx = debouncer.subscribe();

        debouncer.set(1);
        sleep(Duration::from_millis(200)).await;
        debouncer.cancel();
        sleep(Duration::from_secs(2)).await;

        assert!(!rx.has_changed().unwrap());
        assert_eq!(*rx.borrow(), 0);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn drop_before_delay_never_publishes() {
        let mut debouncer = Debouncer::new("initial".to_string(), DELAY);
        let mut rx = debouncer.subscribe();

        debouncer.set("late".to_string());
        sleep(Duration::from_millis(100)).await;
        drop(debouncer);

        let outcome = timeout(Duration::from_secs(2), rx.changed()).await;
        assert!(matches!(outcome, Ok(Err(_))), "channel should close without a new value");
        assert_eq!(*rx.borrow(), "initial");
    }

    #[tokio::test(start_paused = true)]
    async fn reset_publishes_at_once_and_drops_pending_value() {
        let mut debouncer = Debouncer::new("lon".to_string(), DELAY);
        let mut rx = debouncer.subscribe();

        debouncer.set("lond".to_string());
        debouncer.reset(String::new());

        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), "");
        assert!(!debouncer.is_pending());

        sleep(Duration::from_secs(1)).await;
        assert!(!rx.has_changed().unwrap());

        debouncer.set("lon".to_string());
        rx.changed().await.expect("debouncer alive");
        assert_eq!(*rx.borrow_and_update(), "lon");
    }

    #[tokio::test(start_paused = true)]
    async fn settling_on_current_value_is_not_a_change() {
        let mut debouncer = Debouncer::new("lon".to_string(), DELAY);
        let rx = debouncer.subscribe();

        debouncer.set("lond".to_string());
        sleep(Duration::from_millis(100)).await;
        debouncer.set("lon".to_string());
        sleep(Duration::from_secs(1)).await;

        assert!(!rx.has_changed().unwrap());
    }
}
