// RT73-CODEPLUG: Retevis RT73 codeplug codec and programming tool

pub mod bitwise;
pub mod codec;
pub mod codeplug;
pub mod core;
pub mod diagnostics;
pub mod error;
pub mod formats;
pub mod memmap;
pub mod schema;
pub mod serial;

// Re-export commonly used types
pub use codeplug::{assemble, disassemble, Codeplug, Counts, Layout};
pub use self::core::{constants::*, Tone};
pub use diagnostics::{Diagnostics, Verbosity, Warning};
pub use error::{CodeplugError, Result};
pub use formats::{load_document, load_image, save_document, save_image};
pub use memmap::MemoryMap;
pub use serial::{ProgressCallback, Rt73Protocol, SerialConfig, SerialPort, Transport};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
