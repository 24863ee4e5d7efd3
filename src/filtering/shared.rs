// Thread-safe access to line processors for concurrent log producers
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::Config;
use crate::filtering::types::{ProcessedLine, ProcessorStats};
use crate::filtering::LineProcessor;

/// A line processor shared between threads
///
/// The lock is held for the whole push-classify-decide sequence of a line,
/// so concurrent producers never interleave window updates.
#[derive(Debug, Clone)]
pub struct SharedProcessor {
    inner: Arc<Mutex<LineProcessor>>,
}

impl SharedProcessor {
    pub fn new(processor: LineProcessor) -> Self {
        Self {
            inner: Arc::new(Mutex::new(processor)),
        }
    }

    pub fn process_line(&self, line: &str) -> ProcessedLine {
        self.lock().process_line(line)
    }

    pub fn process(&self, line: &str, styled: bool) -> Option<String> {
        self.lock().process(line, styled)
    }

    pub fn stats(&self) -> ProcessorStats {
        self.lock().stats()
    }

    pub fn reset(&self) {
        self.lock().reset();
    }

    /// Recovers from poisoning; every window is valid after a partial push
    fn lock(&self) -> MutexGuard<'_, LineProcessor> {
        self.inner.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("Line processor lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

/// Independent processors keyed by stream (device) name
///
/// Each stream gets its own repetition history, created on first use.
pub struct StreamRegistry {
    config: Arc<Config>,
    streams: Mutex<HashMap<String, SharedProcessor>>,
}

impl StreamRegistry {
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            config,
            streams: Mutex::new(HashMap::new()),
        }
    }

    /// Get or create the processor for a stream
    pub fn stream(&self, stream_id: &str) -> SharedProcessor {
        let mut streams = self.streams();
        streams
            .entry(stream_id.to_string())
            .or_insert_with(|| {
                tracing::debug!(stream_id, "Creating line processor for stream");
                SharedProcessor::new(LineProcessor::from_config(&self.config))
            })
            .clone()
    }

    /// Process a line on the given stream
    pub fn process(&self, stream_id: &str, line: &str, styled: bool) -> Option<String> {
        self.stream(stream_id).process(line, styled)
    }

    /// Drop a stream's state (called when its producer goes away)
    pub fn clear_stream(&self, stream_id: &str) {
        self.streams().remove(stream_id);
    }

    /// Number of streams being tracked
    pub fn active_streams(&self) -> usize {
        self.streams().len()
    }

    fn streams(&self) -> MutexGuard<'_, HashMap<String, SharedProcessor>> {
        self.streams
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
