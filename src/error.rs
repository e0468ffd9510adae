// Error taxonomy for the codeplug codec
// Local-field corruption is never an error here: it is reported through
// `Diagnostics` and decoding carries on.

use crate::bitwise::ElementError;
use crate::memmap::MemoryMapError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodeplugError {
    #[error("Image truncated: {len} bytes at {offset:#x} exceed image of {size} bytes")]
    Truncated {
        offset: usize,
        len: usize,
        size: usize,
    },

    #[error("{field}: value {value} does not fit in {bits} bits")]
    ValueOutOfRange {
        field: String,
        value: i64,
        bits: u32,
    },

    #[error("{field}: value {value} has no stored representation")]
    NotRepresentable { field: String, value: i64 },

    #[error("{field}: text is {len} bytes, field holds {max}")]
    TextTooLong {
        field: String,
        len: usize,
        max: usize,
    },

    #[error("{field}: text {text:?} contains characters the radio cannot store")]
    InvalidText { field: String, text: String },

    #[error("{field}: {label:?} is not a valid choice")]
    UnknownLabel { field: String, label: String },

    #[error("{field}: missing from record")]
    MissingField { field: String },

    #[error("{field}: value has the wrong type for a {expected} field")]
    TypeMismatch {
        field: String,
        expected: &'static str,
    },

    #[error("{field}: tone {tone} cannot be stored")]
    ToneNotEncodable { field: String, tone: String },

    #[error("{collection}: {message}")]
    InvalidMember { collection: String, message: String },

    #[error("Overlapping regions: {0}")]
    RegionConflict(String),

    #[error("{what}: {count} exceeds the maximum of {max}")]
    CapacityExceeded {
        what: String,
        count: usize,
        max: usize,
    },

    #[error(transparent)]
    Element(#[from] ElementError),

    #[error("Codeplug size has been altered: planned {expected} bytes, built {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}

impl CodeplugError {
    /// True for failures that indicate a logic defect rather than bad input
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            CodeplugError::SizeMismatch { .. }
                | CodeplugError::MissingField { .. }
                | CodeplugError::TypeMismatch { .. }
        )
    }
}

impl From<MemoryMapError> for CodeplugError {
    fn from(err: MemoryMapError) -> Self {
        match err {
            MemoryMapError::OutOfBounds { offset, len, size } => {
                CodeplugError::Truncated { offset, len, size }
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, CodeplugError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = CodeplugError::CapacityExceeded {
            what: "Codeplug blocks".to_string(),
            count: 300,
            max: 255,
        };
        assert_eq!(e.to_string(), "Codeplug blocks: 300 exceeds the maximum of 255");

        let e = CodeplugError::SizeMismatch {
            expected: 2048,
            actual: 4096,
        };
        assert!(e.is_internal());
    }

    #[test]
    fn test_from_memory_map_error() {
        let e: CodeplugError = MemoryMapError::OutOfBounds {
            offset: 0x10,
            len: 4,
            size: 8,
        }
        .into();
        assert!(matches!(e, CodeplugError::Truncated { offset: 0x10, .. }));
        assert!(!e.is_internal());
    }
}
