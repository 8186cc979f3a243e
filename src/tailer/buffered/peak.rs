//! Peak queue depth per measurement window

use crate::metrics::{MetricsRegistry, MetricsResult, Summary};
use std::sync::Arc;

/// Running maximum of the queue depth for the current window
///
/// Owned by the producer task alone. Consumed by [`deregister`](Self::deregister)
/// so the summary can only be removed from the registry once.
#[derive(Debug)]
pub(crate) struct PeakLoad {
    registry: Arc<MetricsRegistry>,
    summary: Summary,
    window_peak: usize,
}

impl PeakLoad {
    pub(crate) fn register(
        registry: Arc<MetricsRegistry>,
        name: &str,
        help: &str,
    ) -> MetricsResult<Self> {
        let summary = registry.register(name, help)?;
        Ok(Self {
            registry,
            summary,
            window_peak: 0,
        })
    }

    pub(crate) fn summary(&self) -> Summary {
        self.summary.clone()
    }

    pub(crate) fn record(&mut self, depth: usize) {
        if depth > self.window_peak {
            self.window_peak = depth;
        }
    }

    pub(crate) fn window_peak(&self) -> usize {
        self.window_peak
    }

    /// Emit the window's peak as one sample and start a new window
    pub(crate) fn flush(&mut self) -> usize {
        let peak = self.window_peak;
        self.summary.observe(peak as f64);
        self.window_peak = 0;
        peak
    }

    pub(crate) fn deregister(self) {
        match self.registry.unregister(&self.summary) {
            Ok(true) => {}
            Ok(false) => log::warn!(
                "Metric '{}' was already removed from the registry",
                self.summary.name()
            ),
            Err(e) => log::error!("Failed to deregister '{}': {}", self.summary.name(), e),
        }
    }
}
