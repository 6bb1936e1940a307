//! Session stores - in-memory and a JSON file that survives restarts.

mod file;
mod memory;

pub use file::FileSessionStore;
pub use memory::InMemorySessionStore;
