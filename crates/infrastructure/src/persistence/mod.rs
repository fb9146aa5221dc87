//! Persistent storage for the session flag.

mod entry;
mod file_storage;
mod memory_storage;

pub use entry::Entry;
pub use file_storage::FileKeyValueStorage;
pub use memory_storage::MemoryKeyValueStorage;
