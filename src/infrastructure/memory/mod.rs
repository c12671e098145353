//! Volatile store kept in process memory.

pub mod memory_store;

pub use memory_store::MemoryUrlStore;
