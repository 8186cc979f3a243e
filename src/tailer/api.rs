//! Public API for tailers
//!
//! External modules should import from here rather than directly from internal modules.

pub use crate::tailer::buffered::{BufferConfig, BufferedTailer};
pub use crate::tailer::channel::{ChannelFeed, ChannelTailer};
pub use crate::tailer::error::{BufferError, BufferResult, TailerError, TailerResult};
pub use crate::tailer::reader::ReaderTailer;
pub use crate::tailer::traits::{ErrorReceiver, LineReceiver, Tailer};

pub use crate::queue::{Line, QueuePhase};
