// Owned codeplug image with bounds-checked windows
pub mod memory_map;

pub use memory_map::{MemoryMap, MemoryMapError};
