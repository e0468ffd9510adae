// Byte-level helpers for the codeplug image
// Little-endian integers, fixed-width ASCII text and textual tone parsing

pub mod elements;
pub mod parser;

pub use elements::{
    decode_ascii, encode_ascii, or_into, read_u16_le, read_uint_le, uint_le_bytes, write_u16_le,
    ElementError,
};
pub use parser::{parse_tone, ToneSyntax};
