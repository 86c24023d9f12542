//=========================================================================
// Queued Logger
//=========================================================================
//
// `log` backend that never blocks the calling thread.
//
// Architecture:
//   log::info!() → QueuedLogger::log() ──try_send──► bounded channel
//                                                        │
//                                   worker thread ◄──────┘
//                                        │
//                                        ▼
//                                     LogSink
//
// A full queue is retried a bounded number of times, then the record is
// dropped and counted. Logging is best effort.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Sender, TrySendError};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

//=== Constants ===========================================================

/// Default queue depth used by [`install`].
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

/// Attempts made to enqueue a record before it is dropped.
const MAX_SEND_ATTEMPTS: usize = 3;

//=== LogLine =============================================================

/// A formatted record in transit to the sink.
#[derive(Debug, Clone, PartialEq)]
pub struct LogLine {
    pub level: Level,
    pub target: String,
    pub message: String,
    /// Time since the logger was created.
    pub elapsed: Duration,
}

impl std::fmt::Display for LogLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{:>9.3}s] {:<5} [{}] {}",
            self.elapsed.as_secs_f64(),
            self.level,
            self.target,
            self.message
        )
    }
}

//=== LogSink =============================================================

/// Destination for log lines, driven by the worker thread.
pub trait LogSink: Send + 'static {
    fn write(&mut self, line: &LogLine);

    fn flush(&mut self) {}
}

/// Writes lines to standard error.
#[derive(Debug, Default)]
pub struct StderrSink;

impl LogSink for StderrSink {
    fn write(&mut self, line: &LogLine) {
        let _ = writeln!(std::io::stderr().lock(), "{}", line);
    }

    fn flush(&mut self) {
        let _ = std::io::stderr().flush();
    }
}

//=== QueuedLogger ========================================================

pub struct QueuedLogger {
    level: LevelFilter,
    sender: Sender<LogLine>,
    dropped: Arc<AtomicU64>,
    started: Instant,
}

impl QueuedLogger {
    /// Creates the logger and starts its worker thread.
    ///
    /// The worker exits once every logger handle is dropped and the
    /// queue is drained.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn spawn<K: LogSink>(
        level: LevelFilter,
        capacity: usize,
        mut sink: K,
    ) -> (Self, thread::JoinHandle<()>) {
        assert!(capacity > 0, "Log queue capacity must be positive");
        let (sender, receiver) = bounded::<LogLine>(capacity);

        let worker = thread::spawn(move || {
            for line in receiver {
                sink.write(&line);
            }
            sink.flush();
        });

        (Self::with_sender(level, sender), worker)
    }

    fn with_sender(level: LevelFilter, sender: Sender<LogLine>) -> Self {
        Self {
            level,
            sender,
            dropped: Arc::new(AtomicU64::new(0)),
            started: Instant::now(),
        }
    }

    /// Records discarded because the queue stayed full.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Shared handle to the drop counter, readable after installation.
    pub fn dropped_counter(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.dropped)
    }

    fn enqueue(&self, mut line: LogLine) {
        for attempt in 1..=MAX_SEND_ATTEMPTS {
            match self.sender.try_send(line) {
                Ok(()) => return,
                Err(TrySendError::Full(returned)) => {
                    line = returned;
                    if attempt < MAX_SEND_ATTEMPTS {
                        thread::yield_now();
                    }
                }
                Err(TrySendError::Disconnected(_)) => break,
            }
        }
        self.dropped.fetch_add(1, Ordering::Relaxed);
    }
}

impl Log for QueuedLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        self.enqueue(LogLine {
            level: record.level(),
            target: record.target().to_string(),
            message: record.args().to_string(),
            elapsed: self.started.elapsed(),
        });
    }

    fn flush(&self) {}
}

//=== Installation ========================================================

/// Installs a [`QueuedLogger`] writing to stderr as the global logger.
///
/// The worker thread is detached and lives for the rest of the process.
///
/// # Errors
///
/// Returns an error if a global logger is already set.
pub fn install(level: LevelFilter) -> Result<(), SetLoggerError> {
    let (logger, _worker) = QueuedLogger::spawn(level, DEFAULT_QUEUE_CAPACITY, StderrSink);
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(level);
    Ok(())
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    //--- Test Helpers -----------------------------------------------------

    #[derive(Clone, Default)]
    struct Collect(Arc<Mutex<Vec<LogLine>>>);

    impl LogSink for Collect {
        fn write(&mut self, line: &LogLine) {
            self.0.lock().unwrap().push(line.clone());
        }
    }

    fn emit(logger: &QueuedLogger, level: Level, target: &str, message: &str) {
        logger.log(
            &Record::builder()
                .level(level)
                .target(target)
                .args(format_args!("{}", message))
                .build(),
        );
    }

    //=====================================================================
    // Tests
    //=====================================================================

    #[test]
    fn records_reach_sink_in_order() {
        let sink = Collect::default();
        let (logger, worker) = QueuedLogger::spawn(LevelFilter::Debug, 16, sink.clone());

        emit(&logger, Level::Info, "scene", "first");
        emit(&logger, Level::Debug, "input", "second");
        emit(&logger, Level::Trace, "input", "filtered");

        drop(logger);
        worker.join().unwrap();

        let lines = sink.0.lock().unwrap();
        let messages: Vec<_> = lines.iter().map(|l| l.message.as_str()).collect();
        assert_eq!(messages, ["first", "second"]);
        assert_eq!(lines[0].target, "scene");
    }

    #[test]
    fn full_queue_drops_and_counts() {
        let (sender, _receiver) = bounded(1);
        let logger = QueuedLogger::with_sender(LevelFilter::Info, sender);

        emit(&logger, Level::Info, "test", "kept");
        emit(&logger, Level::Info, "test", "dropped");
        emit(&logger, Level::Warn, "test", "dropped too");

        assert_eq!(logger.dropped(), 2);
        assert_eq!(logger.dropped_counter().load(Ordering::Relaxed), 2);
    }

    #[test]
    fn line_format_includes_level_and_target() {
        let line = LogLine {
            level: Level::Warn,
            target: "platform".into(),
            message: "hello".into(),
            elapsed: Duration::from_millis(1500),
        };

        let text = line.to_string();
        assert!(text.contains("WARN"));
        assert!(text.ends_with("[platform] hello"));
    }

    #[test]
    #[should_panic(expected = "Log queue capacity must be positive")]
    fn zero_capacity_panics() {
        let _ = QueuedLogger::spawn(LevelFilter::Info, 0, StderrSink);
    }
}
