pub mod app;
pub mod core;
pub mod metrics;
pub mod queue;
pub mod tailer;
