// RT73 codeplug: schema tables, typed document, and image conversion
pub mod assembler;
pub mod collections;
pub mod document;
pub mod labels;
pub mod layout;
pub mod resolve;
pub mod schemas;

// Re-export commonly used types
pub use assembler::{assemble, disassemble};
pub use document::{
    Aprs, AprsDmrChannel, BasicParameters, Channel, Codeplug, CommonMenuParameters, Contact,
    DeviceInfo, DmrService, Indicators, MicGain, PresetButtons, PromptTone, RxGroup, ScanList,
    ScanMember, Zone,
};
pub use layout::{contact_block_size, Counts, Layout};
