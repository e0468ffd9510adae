// File format handlers
pub mod bin;
pub mod ham;
pub mod json;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse codeplug JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FormatError>;

pub use bin::{decompiled_path, load_image, save_image};
pub use ham::{
    load_ham_contacts, load_ham_groups, pack_ham_contacts, pack_ham_groups, ContactRecordSize, HamContact,
    HamError, HamGroup,
};
pub use json::{from_json_str, load_document, save_document, to_json_string};
