//! Summary of per-window samples backed by prometheus collectors

use crate::metrics::error::{MetricsError, MetricsResult};
use prometheus::core::{Collector, Desc};
use prometheus::proto::MetricFamily;
use prometheus::{Gauge, Histogram, HistogramOpts, Opts};

/// Bucket upper bounds for queue-depth samples: 1, 4, 16, ... 262144
fn depth_buckets() -> MetricsResult<Vec<f64>> {
    Ok(prometheus::exponential_buckets(1.0, 4.0, 10)?)
}

/// Point-in-time copy of a summary's aggregates
#[derive(Debug, Clone, PartialEq)]
pub struct SummarySnapshot {
    pub name: String,
    pub help: String,
    /// Number of samples observed
    pub count: u64,
    /// Sum of all samples
    pub sum: f64,
    /// Most recent sample
    pub last: Option<f64>,
    pub max: Option<f64>,
}

impl SummarySnapshot {
    /// Mean of all samples, zero when nothing was observed
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

/// Named sink accepting one numeric sample at a time
///
/// Exported as three prometheus metrics: a histogram under `name` plus
/// `<name>_last` and `<name>_max` gauges. Clones share the same collectors.
/// Samples are expected from a single writer.
#[derive(Clone)]
pub struct Summary {
    name: String,
    help: String,
    samples: Histogram,
    last: Gauge,
    max: Gauge,
}

impl std::fmt::Debug for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Summary")
            .field("name", &self.name)
            .field("count", &self.samples.get_sample_count())
            .finish()
    }
}

impl Summary {
    pub(crate) fn new(name: &str, help: &str) -> MetricsResult<Self> {
        let invalid = |e: prometheus::Error| match e {
            prometheus::Error::Msg(reason) => MetricsError::InvalidMetric {
                name: name.to_string(),
                reason,
            },
            other => MetricsError::Prometheus(other),
        };

        let samples = Histogram::with_opts(HistogramOpts::new(name, help).buckets(depth_buckets()?))
            .map_err(invalid)?;
        let last = Gauge::with_opts(Opts::new(
            format!("{}_last", name),
            format!("Most recent sample of {}", name),
        ))
        .map_err(invalid)?;
        let max = Gauge::with_opts(Opts::new(
            format!("{}_max", name),
            format!("Largest sample of {}", name),
        ))
        .map_err(invalid)?;

        Ok(Self {
            name: name.to_string(),
            help: help.to_string(),
            samples,
            last,
            max,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    /// Record one sample
    pub fn observe(&self, value: f64) {
        let first = self.samples.get_sample_count() == 0;
        self.samples.observe(value);
        self.last.set(value);
        if first || value > self.max.get() {
            self.max.set(value);
        }
    }

    pub fn snapshot(&self) -> SummarySnapshot {
        let count = self.samples.get_sample_count();
        let observed = count > 0;
        SummarySnapshot {
            name: self.name.clone(),
            help: self.help.clone(),
            count,
            sum: self.samples.get_sample_sum(),
            last: observed.then(|| self.last.get()),
            max: observed.then(|| self.max.get()),
        }
    }
}

impl Collector for Summary {
    fn desc(&self) -> Vec<&Desc> {
        let mut descs = self.samples.desc();
        descs.extend(self.last.desc());
        descs.extend(self.max.desc());
        descs
    }

    fn collect(&self) -> Vec<MetricFamily> {
        let mut families = self.samples.collect();
        families.extend(self.last.collect());
        families.extend(self.max.collect());
        families
    }
}
