//! Relayout timing
//!
//! Keeps per-operation duration samples so the JavaScript side can inspect
//! how expensive relayouts are on a given page.

use serde::Serialize;
use std::collections::{HashMap, VecDeque};

/// Summary of one operation's samples
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OperationStats {
    pub count: usize,
    pub average_ms: f64,
    pub max_ms: f64,
}

/// Performance monitor for measuring operation times
#[derive(Debug, Default)]
pub struct PerformanceMonitor {
    measurements: HashMap<String, VecDeque<f64>>,
}

impl PerformanceMonitor {
    /// Samples kept per operation; older ones are discarded
    pub const MAX_SAMPLES: usize = 64;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_measurement(&mut self, operation: &str, duration_ms: f64) {
        let samples = self.measurements.entry(operation.to_string()).or_default();
        if samples.len() == Self::MAX_SAMPLES {
            samples.pop_front();
        }
        samples.push_back(duration_ms);
    }

    pub fn get_average_time(&self, operation: &str) -> Option<f64> {
        self.measurements.get(operation).map(|times| {
            if times.is_empty() {
                0.0
            } else {
                times.iter().sum::<f64>() / times.len() as f64
            }
        })
    }

    pub fn stats(&self, operation: &str) -> OperationStats {
        match self.measurements.get(operation) {
            Some(times) if !times.is_empty() => OperationStats {
                count: times.len(),
                average_ms: times.iter().sum::<f64>() / times.len() as f64,
                max_ms: times.iter().copied().fold(0.0, f64::max),
            },
            _ => OperationStats::default(),
        }
    }
}
