//=========================================================================
// Frame Metrics
//=========================================================================
//
// Rolling frame-rate statistics.
//
// Samples are grouped into batches of `batch_size`. Batches older than
// `batch_ttl` are dropped, so statistics cover roughly the last minute.
//
//   batches: [b0][b1][b2]...[bn]   (oldest → newest)
//   fps stats    → over every sample in every batch
//   delta stats  → mean of (b[i+1].stat - b[i].stat) over adjacent pairs
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::VecDeque;
use std::time::{Duration, Instant};

//=== Constants ===========================================================

pub const DEFAULT_BATCH_SIZE: usize = 100;
pub const DEFAULT_BATCH_TTL: Duration = Duration::from_secs(60);

//=== SampleBatch =========================================================

#[derive(Debug, Clone)]
struct SampleBatch {
    started: Instant,
    samples: Vec<f32>,
}

impl SampleBatch {
    fn mean(&self) -> f32 {
        self.samples.iter().sum::<f32>() / self.samples.len().max(1) as f32
    }

    fn max(&self) -> f32 {
        self.samples.iter().copied().fold(f32::MIN, f32::max)
    }

    fn min(&self) -> f32 {
        self.samples.iter().copied().fold(f32::MAX, f32::min)
    }
}

//=== FrameMetrics ========================================================

#[derive(Debug, Clone)]
pub struct FrameMetrics {
    batch_size: usize,
    batch_ttl: Duration,
    batches: VecDeque<SampleBatch>,
    current_fps: f32,
}

impl FrameMetrics {
    pub fn new() -> Self {
        Self::with_batching(DEFAULT_BATCH_SIZE, DEFAULT_BATCH_TTL)
    }

    /// # Panics
    ///
    /// Panics if `batch_size` is zero.
    pub fn with_batching(batch_size: usize, batch_ttl: Duration) -> Self {
        assert!(batch_size > 0, "Batch size must be positive");
        Self {
            batch_size,
            batch_ttl,
            batches: VecDeque::new(),
            current_fps: 0.0,
        }
    }

    //--- Recording --------------------------------------------------------

    /// Records one frame that took `delta`.
    pub fn record_frame(&mut self, delta: Duration) {
        self.record_frame_at(delta, Instant::now());
    }

    /// Records one frame observed at `now`. Zero-length frames are ignored.
    pub fn record_frame_at(&mut self, delta: Duration, now: Instant) {
        let seconds = delta.as_secs_f32();
        if seconds <= 0.0 {
            return;
        }
        self.current_fps = 1.0 / seconds;

        let needs_batch = self
            .batches
            .back()
            .map_or(true, |batch| batch.samples.len() >= self.batch_size);
        if needs_batch {
            self.batches.push_back(SampleBatch {
                started: now,
                samples: Vec::with_capacity(self.batch_size),
            });
        }

        while self.batches.len() > 1
            && self
                .batches
                .front()
                .is_some_and(|batch| now.duration_since(batch.started) > self.batch_ttl)
        {
            self.batches.pop_front();
        }

        if let Some(batch) = self.batches.back_mut() {
            batch.samples.push(self.current_fps);
        }
    }

    //=====================================================================
    // Statistics
    //=====================================================================

    pub fn current_fps(&self) -> f32 {
        self.current_fps
    }

    pub fn mean_fps(&self) -> f32 {
        let (sum, count) = self
            .samples()
            .fold((0.0, 0usize), |(sum, count), fps| (sum + fps, count + 1));
        if count == 0 { 0.0 } else { sum / count as f32 }
    }

    pub fn max_fps(&self) -> f32 {
        self.samples().reduce(f32::max).unwrap_or(0.0)
    }

    pub fn min_fps(&self) -> f32 {
        self.samples().reduce(f32::min).unwrap_or(0.0)
    }

    /// Mean change of batch means between adjacent batches.
    pub fn mean_fps_delta(&self) -> f32 {
        self.batch_delta(SampleBatch::mean)
    }

    pub fn max_fps_delta(&self) -> f32 {
        self.batch_delta(SampleBatch::max)
    }

    pub fn min_fps_delta(&self) -> f32 {
        self.batch_delta(SampleBatch::min)
    }

    pub fn batch_count(&self) -> usize {
        self.batches.len()
    }

    //--- Internal ---------------------------------------------------------

    fn samples(&self) -> impl Iterator<Item = f32> + '_ {
        self.batches.iter().flat_map(|batch| batch.samples.iter().copied())
    }

    fn batch_delta(&self, stat: fn(&SampleBatch) -> f32) -> f32 {
        let pairs = self.batches.len().saturating_sub(1);
        if pairs == 0 {
            return 0.0;
        }
        let total: f32 = self
            .batches
            .iter()
            .zip(self.batches.iter().skip(1))
            .map(|(older, newer)| stat(newer) - stat(older))
            .sum();
        total / pairs as f32
    }
}

impl Default for FrameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn empty_metrics_report_zero() {
        let metrics = FrameMetrics::new();
        assert_eq!(metrics.mean_fps(), 0.0);
        assert_eq!(metrics.max_fps(), 0.0);
        assert_eq!(metrics.mean_fps_delta(), 0.0);
    }

    #[test]
    fn fps_statistics_over_samples() {
        let mut metrics = FrameMetrics::new();
        let now = Instant::now();
        metrics.record_frame_at(ms(10), now);
        metrics.record_frame_at(ms(20), now);
        metrics.record_frame_at(ms(40), now);

        assert!((metrics.current_fps() - 25.0).abs() < 1e-3);
        assert!((metrics.max_fps() - 100.0).abs() < 1e-3);
        assert!((metrics.min_fps() - 25.0).abs() < 1e-3);
        assert!((metrics.mean_fps() - 58.333).abs() < 1e-2);
    }

    #[test]
    fn batches_roll_over_and_report_deltas() {
        let mut metrics = FrameMetrics::with_batching(2, DEFAULT_BATCH_TTL);
        let now = Instant::now();
        metrics.record_frame_at(ms(20), now); // 50
        metrics.record_frame_at(ms(20), now); // 50
        metrics.record_frame_at(ms(10), now); // 100
        metrics.record_frame_at(ms(10), now); // 100

        assert_eq!(metrics.batch_count(), 2);
        assert!((metrics.mean_fps_delta() - 50.0).abs() < 1e-3);
    }

    #[test]
    fn expired_batches_are_dropped() {
        let mut metrics = FrameMetrics::with_batching(1, Duration::from_secs(1));
        let start = Instant::now();
        metrics.record_frame_at(ms(10), start);
        metrics.record_frame_at(ms(20), start + Duration::from_secs(5));

        assert_eq!(metrics.batch_count(), 1);
        assert!((metrics.mean_fps() - 50.0).abs() < 1e-3);
    }

    #[test]
    fn zero_length_frames_ignored() {
        let mut metrics = FrameMetrics::new();
        metrics.record_frame(Duration::ZERO);
        assert_eq!(metrics.batch_count(), 0);
    }

    #[test]
    #[should_panic(expected = "Batch size must be positive")]
    fn zero_batch_size_panics() {
        FrameMetrics::with_batching(0, DEFAULT_BATCH_TTL);
    }
}
