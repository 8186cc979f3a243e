//! MetricsRegistry - named observation sinks on a prometheus registry

use crate::metrics::error::{MetricsError, MetricsResult};
use crate::metrics::summary::Summary;
use prometheus::{Encoder, Registry, TextEncoder};

/// Registry holding every live [`Summary`]
///
/// # Example
///
/// ```rust
/// use tailbuffer::metrics::MetricsRegistry;
///
/// let registry = MetricsRegistry::new();
/// let summary = registry.register("queue_depth", "Depth of the queue").unwrap();
/// summary.observe(3.0);
/// assert!(registry.render_text().unwrap().contains("queue_depth_count 1"));
/// assert!(registry.unregister(&summary).unwrap());
/// ```
#[derive(Clone, Default)]
pub struct MetricsRegistry {
    registry: Registry,
}

impl std::fmt::Debug for MetricsRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricsRegistry").finish_non_exhaustive()
    }
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing prometheus registry
    pub fn from_registry(registry: Registry) -> Self {
        Self { registry }
    }

    /// The underlying prometheus registry, for serving or gathering
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Register a new summary under `name`
    ///
    /// Fails if the name is malformed or already taken.
    pub fn register(&self, name: &str, help: &str) -> MetricsResult<Summary> {
        let summary = Summary::new(name, help)?;

        self.registry
            .register(Box::new(summary.clone()))
            .map_err(|e| match e {
                prometheus::Error::AlreadyReg => MetricsError::AlreadyRegistered {
                    name: name.to_string(),
                },
                prometheus::Error::Msg(reason) => MetricsError::InvalidMetric {
                    name: name.to_string(),
                    reason,
                },
                other => MetricsError::Prometheus(other),
            })?;

        log::debug!("Registered metric '{}'", name);
        Ok(summary)
    }

    /// Remove `summary` from the registry
    ///
    /// Returns `false` if it was not registered. Outstanding handles keep
    /// working but are no longer exported.
    pub fn unregister(&self, summary: &Summary) -> MetricsResult<bool> {
        match self.registry.unregister(Box::new(summary.clone())) {
            Ok(()) => {
                log::debug!("Unregistered metric '{}'", summary.name());
                Ok(true)
            }
            Err(prometheus::Error::Msg(_)) => Ok(false),
            Err(e) => Err(MetricsError::Prometheus(e)),
        }
    }

    /// True if a metric family called `name` is currently exported
    pub fn contains(&self, name: &str) -> bool {
        self.registry
            .gather()
            .iter()
            .any(|family| family.get_name() == name)
    }

    /// Render every registered metric in Prometheus text exposition format
    pub fn render_text(&self) -> MetricsResult<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
