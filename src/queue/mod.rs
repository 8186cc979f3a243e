//! Line Queue Component
//!
//! The unbounded FIFO that sits between the producer and consumer tasks of a
//! [`BufferedTailer`](crate::tailer::api::BufferedTailer).
//!
//! # Overview
//!
//! - **Single producer**: only the producer task appends, always at the tail
//! - **Single consumer**: only the consumer task removes, always from the head
//! - **Unbounded**: appends never wait; depth is observed, not limited
//! - **One-way close**: `Open → Draining → Closed`, never reopened
//!
//! # Architecture
//!
//! ```text
//!   producer task                                   consumer task
//!        │ append                                        ▲ remove_front
//!        ▼                                               │
//! ┌──────────────────────────────────────────────────────┴──┐
//! │  Mutex<QueueState>                                      │
//! │  ┌───┬───┬───┬───┬───┬───┐                              │
//! │  │ a │ b │ c │ d │ e │...│   Open | Draining | Closed   │
//! │  └───┴───┴───┴───┴───┴───┘                              │
//! │  Notify  (append → notify_one, close → notify_waiters)  │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use tailbuffer::queue::LineQueue;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let queue = LineQueue::new();
//! queue.append("first".to_string())?;
//! queue.close()?;
//!
//! while let Some(line) = queue.remove_front().await? {
//!     println!("{}", line);
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod internal;

pub use error::{QueueError, QueueResult};
pub use internal::{LineQueue, QueuePhase};

/// One unit of text handed from the upstream source, preserved verbatim
pub type Line = String;
