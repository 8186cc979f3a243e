//! Metrics Component
//!
//! Named observation sinks on top of a `prometheus::Registry`. Each sink is a
//! [`Summary`]: a histogram of its samples plus gauges for the latest and the
//! largest sample. Registration is unique per name and a sink can be
//! deregistered once its owner shuts down. [`MetricsRegistry::render_text`]
//! produces the Prometheus text exposition format.

mod error;
mod registry;
mod summary;

pub mod api;

pub use error::{MetricsError, MetricsResult};
pub use registry::MetricsRegistry;
pub use summary::{Summary, SummarySnapshot};
