//! Clipboard implementations

mod command;
mod memory;

pub use command::CommandClipboard;
pub use memory::MemoryClipboard;
