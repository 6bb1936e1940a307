//! Notification sinks.

mod memory;

pub use memory::InMemoryNotifier;
