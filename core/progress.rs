/*!
Progress reporting for training runs. The trainer takes an observer callback
(`&mut dyn FnMut(Progress)`) and reports phase transitions and counters
through it; callers that do not care pass `&mut |_| {}`. This replaces the
original design's process-global logger object with an explicitly injected
sink.
*/

use std::sync::{
	atomic::{AtomicU64, Ordering},
	Arc,
};

/// A shared advisory counter. Cloning shares the underlying count.
#[derive(Clone, Debug)]
pub struct ProgressCounter {
	current: Arc<AtomicU64>,
	total: u64,
}

impl ProgressCounter {
	pub fn new(total: u64) -> Self {
		Self {
			current: Arc::new(AtomicU64::new(0)),
			total,
		}
	}

	pub fn total(&self) -> u64 {
		self.total
	}

	pub fn get(&self) -> u64 {
		self.current.load(Ordering::Relaxed)
	}

	pub fn set(&self, value: u64) {
		self.current.store(value, Ordering::Relaxed);
	}

	pub fn inc(&self, amount: u64) {
		self.current.fetch_add(amount, Ordering::Relaxed);
	}
}

/// One training-run event, always tagged with the target attribute it
/// concerns.
#[derive(Clone, Debug)]
pub struct Progress {
	pub attribute: String,
	pub phase: TrainPhase,
}

#[derive(Clone, Debug)]
pub enum TrainPhase {
	/// Training for this attribute started; `record_count` records matched
	/// the training scopes and `source_count` source attributes feed it.
	Starting {
		record_count: u64,
		source_count: usize,
	},
	/// Records are being paged in; the counter advances per page.
	Loading(ProgressCounter),
	/// One fit over the full dataset.
	TrainingBatch,
	/// Incremental training; the counter advances per fold.
	TrainingOnline(ProgressCounter),
	/// The trained model is being written.
	Saving,
	/// Training for this attribute finished.
	Complete,
}

#[test]
fn test_progress_counter() {
	let counter = ProgressCounter::new(10);
	let shared = counter.clone();
	counter.inc(3);
	shared.inc(2);
	assert_eq!(counter.get(), 5);
	assert_eq!(counter.total(), 10);
	counter.set(9);
	assert_eq!(shared.get(), 9);
}
