use std::{
	collections::BTreeMap,
	sync::{
		atomic::{AtomicU64, Ordering},
		Mutex, MutexGuard,
	},
	time::Duration,
};
use tokio::{
	task::JoinHandle,
	time::{interval_at, Instant, MissedTickBehavior},
};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(3000);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

/// Runs callbacks at a fixed interval. Each started callback is an independent timer that can be stopped on its own.
///
/// A callback is invoked synchronously. Any async work it spawns is not awaited, and stopping the timer does not cancel it.
pub struct PollingManager {
	interval: Duration,
	next_id: AtomicU64,
	timers: Mutex<BTreeMap<TimerId, JoinHandle<()>>>,
}

impl PollingManager {
	pub fn new(interval: Duration) -> PollingManager {
		PollingManager {
			interval,
			next_id: AtomicU64::new(0),
			timers: Mutex::new(BTreeMap::new()),
		}
	}

	pub fn interval(&self) -> Duration {
		self.interval
	}

	/// Invoke `callback` now, then once every interval until the timer is stopped. Must be called within a tokio runtime.
	pub fn start<F>(&self, mut callback: F) -> TimerId
	where
		F: FnMut() + Send + 'static,
	{
		callback();
		let period = self.interval;
		let handle = tokio::spawn(async move {
			let mut interval = interval_at(Instant::now() + period, period);
			interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
			loop {
				interval.tick().await;
				callback();
			}
		});
		let id = TimerId(self.next_id.fetch_add(1, Ordering::Relaxed));
		self.timers().insert(id, handle);
		tracing::debug!(timer = id.0, "started polling");
		id
	}

	/// Stop one timer. Stopping a timer that was already stopped does nothing.
	pub fn stop(&self, id: TimerId) {
		if let Some(handle) = self.timers().remove(&id) {
			handle.abort();
			tracing::debug!(timer = id.0, "stopped polling");
		}
	}

	pub fn stop_all(&self) {
		let timers = std::mem::take(&mut *self.timers());
		for handle in timers.into_values() {
			handle.abort();
		}
	}

	pub fn active_timers(&self) -> usize {
		self.timers().len()
	}

	fn timers(&self) -> MutexGuard<BTreeMap<TimerId, JoinHandle<()>>> {
		// A poisoned lock still holds a usable set of handles.
		self.timers
			.lock()
			.unwrap_or_else(|poisoned| poisoned.into_inner())
	}
}

impl Default for PollingManager {
	fn default() -> PollingManager {
		PollingManager::new(DEFAULT_POLL_INTERVAL)
	}
}

impl Drop for PollingManager {
	fn drop(&mut self) {
		self.stop_all();
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use std::sync::{atomic::AtomicUsize, Arc};

	fn counter() -> (Arc<AtomicUsize>, impl FnMut() + Send + 'static) {
		let count = Arc::new(AtomicUsize::new(0));
		let callback_count = count.clone();
		(count, move || {
			callback_count.fetch_add(1, Ordering::SeqCst);
		})
	}

	#[tokio::test(start_paused = true)]
	async fn test_start_invokes_immediately_then_every_interval() {
		let polling = PollingManager::new(Duration::from_secs(1));
		let (count, callback) = counter();
		let id = polling.start(callback);
		assert_eq!(count.load(Ordering::SeqCst), 1);
		tokio::time::sleep(Duration::from_millis(3500)).await;
		assert_eq!(count.load(Ordering::SeqCst), 4);
		polling.stop(id);
		tokio::time::sleep(Duration::from_secs(5)).await;
		assert_eq!(count.load(Ordering::SeqCst), 4);
		assert_eq!(polling.active_timers(), 0);
	}

	#[tokio::test(start_paused = true)]
	async fn test_timers_are_independent() {
		let polling = PollingManager::new(Duration::from_secs(1));
		let (first_count, first) = counter();
		let (second_count, second) = counter();
		let first_id = polling.start(first);
		polling.start(second);
		assert_eq!(polling.active_timers(), 2);
		polling.stop(first_id);
		tokio::time::sleep(Duration::from_millis(2500)).await;
		assert_eq!(first_count.load(Ordering::SeqCst), 1);
		assert_eq!(second_count.load(Ordering::SeqCst), 3);
		polling.stop_all();
		assert_eq!(polling.active_timers(), 0);
		tokio::time::sleep(Duration::from_secs(2)).await;
		assert_eq!(second_count.load(Ordering::SeqCst), 3);
	}

	#[tokio::test(start_paused = true)]
	async fn test_stop_does_not_cancel_spawned_work() {
		let polling = PollingManager::new(Duration::from_secs(1));
		let finished = Arc::new(AtomicUsize::new(0));
		let task_finished = finished.clone();
		let id = polling.start(move || {
			let finished = task_finished.clone();
			tokio::spawn(async move {
				tokio::time::sleep(Duration::from_millis(500)).await;
				finished.fetch_add(1, Ordering::SeqCst);
			});
		});
		polling.stop(id);
		tokio::time::sleep(Duration::from_secs(1)).await;
		assert_eq!(finished.load(Ordering::SeqCst), 1);
	}
}
