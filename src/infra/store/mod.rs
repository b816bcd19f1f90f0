//! Post store adapters.

mod file;
mod memory;

pub use file::JsonFilePostStore;
pub use memory::InMemoryPostStore;
