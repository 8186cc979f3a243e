//! Public API for the metrics system
//!
//! External modules should import from here rather than directly from internal modules.

use std::sync::{Arc, LazyLock};

pub use crate::metrics::error::{MetricsError, MetricsResult};
pub use crate::metrics::registry::MetricsRegistry;
pub use crate::metrics::summary::{Summary, SummarySnapshot};

/// Process-wide metrics registry, backed by prometheus' default registry
static METRICS_REGISTRY: LazyLock<Arc<MetricsRegistry>> = LazyLock::new(|| {
    log::trace!("Initializing metrics registry");
    Arc::new(MetricsRegistry::from_registry(
        prometheus::default_registry().clone(),
    ))
});

/// Access the process-wide metrics registry
///
/// Each call returns the same shared instance.
pub fn get_metrics_registry() -> Arc<MetricsRegistry> {
    Arc::clone(&METRICS_REGISTRY)
}
