// Core module containing RT73 protocol constants and tone values
pub mod constants;
pub mod tone;

// Re-export commonly used types
pub use constants::*;
pub use tone::{Tone, ToneError, ToneKind};
