use std::sync::Arc;

use super::types::ImportProgress;
use crate::modules::data_import::application::ports::NotificationSink;

/// Manages progress reporting and batching for import operations
#[derive(Clone)]
pub struct ProgressTracker {
    sink: Option<Arc<dyn NotificationSink>>,
    batch_config: ProgressBatchConfig,
}

#[derive(Clone)]
struct ProgressBatchConfig {
    batch_size: usize,
    min_percentage_change: u8,
}

impl Default for ProgressBatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1,
            min_percentage_change: 1,
        }
    }
}

impl ProgressTracker {
    pub fn new(sink: Option<Arc<dyn NotificationSink>>) -> Self {
        Self {
            sink,
            batch_config: ProgressBatchConfig::default(),
        }
    }

    /// Roughly 50 events per batch regardless of size
    pub fn with_batch_config(mut self, total_items: usize) -> Self {
        self.batch_config.batch_size = std::cmp::max(1, total_items / 50);
        self
    }

    /// `processed/total*100`, floored; 100 when `total` is 0
    pub fn percentage(processed: usize, total: usize) -> u8 {
        if total == 0 {
            return 100;
        }
        ((processed.min(total) * 100) / total) as u8
    }

    pub fn emit_import_progress(&self, progress: ImportProgress) -> bool {
        match self.sink {
            Some(ref sink) => {
                sink.progress(&progress);
                true
            }
            None => false,
        }
    }

    /// Helper for batched progress; initial and final events are always emitted
    pub fn should_emit_progress(
        &self,
        processed: usize,
        total: usize,
        last_emitted_percentage: &mut u8,
        is_initial: bool,
        is_final: bool,
    ) -> bool {
        let current_percentage = Self::percentage(processed, total);
        let should_emit_percentage = current_percentage.saturating_sub(*last_emitted_percentage)
            >= self.batch_config.min_percentage_change;
        let should_emit_batch = processed % self.batch_config.batch_size == 0;

        let should_emit = is_initial || is_final || should_emit_percentage || should_emit_batch;

        if should_emit {
            *last_emitted_percentage = current_percentage;
        }

        should_emit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_is_floored_and_capped() {
        assert_eq!(ProgressTracker::percentage(1, 3), 33);
        assert_eq!(ProgressTracker::percentage(3, 3), 100);
        assert_eq!(ProgressTracker::percentage(5, 3), 100);
        assert_eq!(ProgressTracker::percentage(0, 0), 100);
    }

    #[test]
    fn large_batches_emit_less_often() {
        let tracker = ProgressTracker::new(None).with_batch_config(10_000);
        let mut last = 0;
        assert!(tracker.should_emit_progress(0, 10_000, &mut last, true, false));
        assert!(!tracker.should_emit_progress(7, 10_000, &mut last, false, false));
        assert!(tracker.should_emit_progress(200, 10_000, &mut last, false, false));
        assert!(tracker.should_emit_progress(10_000, 10_000, &mut last, false, true));
        assert_eq!(last, 100);
    }

    #[test]
    fn without_sink_nothing_is_emitted() {
        let tracker = ProgressTracker::new(None);
        assert!(!tracker.emit_import_progress(ImportProgress {
            current: 1,
            total: 1,
            percentage: 100,
            succeeded: 1,
            failed: 0,
            label: "done".into(),
        }));
    }
}
