//! Tailer Component
//!
//! A tailer is anything that yields an ordered stream of lines, reports
//! asynchronous errors on a separate channel and can be asked to stop.
//! [`BufferedTailer`](buffered::BufferedTailer) wraps any tailer and decouples
//! its production rate from the rate at which lines are read downstream.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐ lines ┌──────────┐ append ┌───────────┐ remove ┌──────────┐ lines ┌────────────┐
//! │ inner tailer │──────▶│ producer │───────▶│ LineQueue │───────▶│ consumer │──────▶│ downstream │
//! └──────┬───────┘       └────┬─────┘        └───────────┘        └──────────┘       └────────────┘
//!        │ errors             │ peak load / window
//!        ▼                    ▼
//!   (passed through)     metrics::Summary
//! ```
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use tailbuffer::tailer::api::{BufferedTailer, ChannelTailer, Tailer};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let (upstream, feed) = ChannelTailer::new();
//! let mut buffered = BufferedTailer::new(upstream)?;
//! let mut lines = buffered.take_lines().expect("fresh tailer");
//!
//! feed.send("hello").await?;
//! drop(feed);
//!
//! while let Some(line) = lines.recv().await {
//!     println!("{}", line);
//! }
//! # Ok(())
//! # }
//! ```

mod channel;
mod error;
mod reader;
mod traits;

pub mod api;
pub mod buffered;

pub use channel::{ChannelFeed, ChannelTailer};
pub use error::{BufferError, BufferResult, TailerError, TailerResult};
pub use reader::ReaderTailer;
pub use traits::{ErrorReceiver, LineReceiver, Tailer};
