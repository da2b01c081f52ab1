use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

const MAX_SAMPLES: usize = 100;
const DEFAULT_SLOW_THRESHOLD: Duration = Duration::from_millis(100);

/// Rolling timing samples per label, in milliseconds.
///
/// Constructed explicitly and handed to whatever needs timing; clones share
/// the same samples.
#[derive(Debug, Clone)]
pub struct Metrics {
    samples: Arc<Mutex<HashMap<String, VecDeque<f64>>>>,
    slow_threshold: Duration,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        Self::with_slow_threshold(DEFAULT_SLOW_THRESHOLD)
    }

    pub fn with_slow_threshold(slow_threshold: Duration) -> Self {
        Self {
            samples: Arc::new(Mutex::new(HashMap::new())),
            slow_threshold,
        }
    }

    /// Start timing `label`; the sample is recorded when the guard drops.
    pub fn start(&self, label: &str) -> Measurement<'_> {
        Measurement {
            metrics: self,
            label: label.to_string(),
            started: Instant::now(),
        }
    }

    pub fn record(&self, label: &str, elapsed: Duration) {
        if elapsed > self.slow_threshold {
            tracing::warn!(
                label,
                elapsed_ms = elapsed.as_secs_f64() * 1000.0,
                "slow operation"
            );
        }

        let mut samples = self.samples.lock().unwrap_or_else(PoisonError::into_inner);
        let entry = samples.entry(label.to_string()).or_default();
        entry.push_back(elapsed.as_secs_f64() * 1000.0);
        while entry.len() > MAX_SAMPLES {
            entry.pop_front();
        }
    }

    /// Mean of the retained samples, or 0 when none exist.
    pub fn average(&self, label: &str) -> f64 {
        let samples = self.samples.lock().unwrap_or_else(PoisonError::into_inner);
        samples.get(label).map(mean).unwrap_or(0.0)
    }

    pub fn sample_count(&self, label: &str) -> usize {
        let samples = self.samples.lock().unwrap_or_else(PoisonError::into_inner);
        samples.get(label).map(VecDeque::len).unwrap_or(0)
    }

    pub fn snapshot(&self) -> BTreeMap<String, f64> {
        let samples = self.samples.lock().unwrap_or_else(PoisonError::into_inner);
        samples
            .iter()
            .filter(|(_, values)| !values.is_empty())
            .map(|(label, values)| (label.clone(), mean(values)))
            .collect()
    }

    pub fn clear(&self) {
        self.samples
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

fn mean(values: &VecDeque<f64>) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[derive(Debug)]
pub struct Measurement<'a> {
    metrics: &'a Metrics,
    label: String,
    started: Instant,
}

impl Drop for Measurement<'_> {
    fn drop(&mut self) {
        self.metrics.record(&self.label, self.started.elapsed());
    }
}
