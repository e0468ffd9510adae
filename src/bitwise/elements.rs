// Data element reading/writing for the little-endian codeplug layout
// Integers are unsigned, 1 to 4 bytes wide. Text is single-byte ASCII,
// NUL padded on the right.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ElementError {
    #[error("Insufficient data: expected {expected} bytes, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    #[error("Unsupported integer width: {0} bytes")]
    InvalidWidth(usize),

    #[error("Value {value} does not fit in {width} bytes")]
    ValueTooLarge { value: u64, width: usize },
}

pub type Result<T> = std::result::Result<T, ElementError>;

/// Largest integer width the codeplug uses
pub const MAX_WIDTH: usize = 4;

fn check_width(width: usize) -> Result<()> {
    if width == 0 || width > MAX_WIDTH {
        return Err(ElementError::InvalidWidth(width));
    }
    Ok(())
}

/// Read an unsigned little-endian integer of `width` bytes
pub fn read_uint_le(data: &[u8], width: usize) -> Result<u32> {
    check_width(width)?;
    if data.len() < width {
        return Err(ElementError::InsufficientData {
            expected: width,
            actual: data.len(),
        });
    }
    let mut bytes = [0u8; 4];
    bytes[..width].copy_from_slice(&data[..width]);
    Ok(u32::from_le_bytes(bytes))
}

/// Encode `value` as `width` little-endian bytes, refusing to truncate
pub fn uint_le_bytes(value: u64, width: usize) -> Result<Vec<u8>> {
    check_width(width)?;
    if value >> (width * 8) != 0 {
        return Err(ElementError::ValueTooLarge { value, width });
    }
    Ok(value.to_le_bytes()[..width].to_vec())
}

/// Read a u16 in little-endian format
pub fn read_u16_le(data: &[u8]) -> Result<u16> {
    if data.len() < 2 {
        return Err(ElementError::InsufficientData {
            expected: 2,
            actual: data.len(),
        });
    }
    Ok(u16::from_le_bytes([data[0], data[1]]))
}

/// Write a u16 in little-endian format
pub fn write_u16_le(value: u16) -> [u8; 2] {
    value.to_le_bytes()
}

/// OR `src` into the front of `dst`, keeping bits already set
pub fn or_into(dst: &mut [u8], src: &[u8]) -> Result<()> {
    if dst.len() < src.len() {
        return Err(ElementError::InsufficientData {
            expected: src.len(),
            actual: dst.len(),
        });
    }
    for (d, s) in dst.iter_mut().zip(src) {
        *d |= *s;
    }
    Ok(())
}

fn is_text_byte(b: u8) -> bool {
    b == 0 || (0x20..=0x7e).contains(&b)
}

/// Decode fixed-width text, dropping trailing NUL padding.
///
/// Returns `None` when a byte is neither printable ASCII nor NUL. NULs that
/// sit before the trailing padding are kept as they are.
pub fn decode_ascii(bytes: &[u8]) -> Option<String> {
    if !bytes.iter().all(|&b| is_text_byte(b)) {
        return None;
    }
    let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    Some(bytes[..end].iter().map(|&b| b as char).collect())
}

/// Bytes for `text` if `decode_ascii` reads them back unchanged.
///
/// Control characters are refused, and so is a trailing NUL, which would
/// read back as padding.
pub fn encode_ascii(text: &str) -> Option<&[u8]> {
    let bytes = text.as_bytes();
    (bytes.iter().all(|&b| is_text_byte(b)) && bytes.last() != Some(&0)).then_some(bytes)
}
