//! Bounded execution memory shared by the planning loop

pub mod store;

pub use store::{MemoryRecord, MemoryStats, MemoryStore};
