// Ham contact and ham group databases
// Read from CSV and packed into the fixed-size records of the radio's
// database area: a 3-byte little-endian ID, then ASCII text to the end of
// the record.

use crate::bitwise::uint_le_bytes;
use crate::core::constants::{BLOCK_SIZE, HAM_GROUP_RECORD_SIZE, HAM_ID_WIDTH};
use crate::memmap::MemoryMap;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HamError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Ham contact records are 16 or 128 bytes, not {0}")]
    RecordSize(usize),

    #[error("Radio ID {0} does not fit in 3 bytes")]
    InvalidId(u32),

    #[error("No {0} in the file")]
    Empty(&'static str),
}

pub type Result<T> = std::result::Result<T, HamError>;

impl HamError {
    /// Process exit status for the command-line tool
    pub fn exit_code(&self) -> i32 {
        match self {
            HamError::RecordSize(_) => 6,
            HamError::Empty(_) => 2,
            _ => 1,
        }
    }
}

/// Width of one ham contact record, chosen to match the radio's database
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactRecordSize {
    Short = 16,
    Long = 128,
}

impl ContactRecordSize {
    pub fn from_bytes(bytes: usize) -> Result<Self> {
        match bytes {
            16 => Ok(ContactRecordSize::Short),
            128 => Ok(ContactRecordSize::Long),
            other => Err(HamError::RecordSize(other)),
        }
    }

    pub fn bytes(self) -> usize {
        self as usize
    }
}

/// One row of a RadioID.net style contact export
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HamContact {
    #[serde(rename = "Radio ID")]
    pub radio_id: u32,
    #[serde(rename = "Callsign")]
    pub callsign: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "Country")]
    pub country: String,
}

impl HamContact {
    /// Text shown on the radio: the columns joined with commas
    pub fn info(&self) -> String {
        [&self.callsign, &self.name, &self.city, &self.state, &self.country]
            .map(String::as_str)
            .join(",")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HamGroup {
    #[serde(rename = "GROUP_ID")]
    pub id: u32,
    #[serde(rename = "GROUP_NAME")]
    pub name: String,
}

/// Parse CSV rows by header name; columns not named here are ignored.
/// Bytes that are not valid UTF-8 survive as replacement characters and are
/// dropped when packed.
fn read_rows<T: DeserializeOwned>(filename: &Path) -> Result<Vec<T>> {
    let raw = fs::read(filename)?;
    let text = String::from_utf8_lossy(&raw);
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());
    let rows = reader.deserialize().collect::<std::result::Result<Vec<T>, _>>()?;
    tracing::info!("Read {} rows from {}", rows.len(), filename.display());
    Ok(rows)
}

pub fn load_ham_contacts(filename: impl AsRef<Path>) -> Result<Vec<HamContact>> {
    read_rows(filename.as_ref())
}

pub fn load_ham_groups(filename: impl AsRef<Path>) -> Result<Vec<HamGroup>> {
    read_rows(filename.as_ref())
}

/// Write one record: ID, then the ASCII characters of `text` cut to fit
fn pack_record(id: u32, text: &str, record: &mut [u8]) -> Result<()> {
    let id_bytes = uint_le_bytes(u64::from(id), HAM_ID_WIDTH).map_err(|_| HamError::InvalidId(id))?;
    record[..HAM_ID_WIDTH].copy_from_slice(&id_bytes);
    let room = &mut record[HAM_ID_WIDTH..];
    for (dst, src) in room.iter_mut().zip(text.bytes().filter(u8::is_ascii)) {
        *dst = src;
    }
    Ok(())
}

fn pack_table(
    rows: impl ExactSizeIterator<Item = (u32, String)>,
    record_size: usize,
    what: &'static str,
) -> Result<MemoryMap> {
    if rows.len() == 0 {
        return Err(HamError::Empty(what));
    }
    let mut data = vec![0u8; rows.len() * record_size];
    for (record, (id, text)) in data.chunks_mut(record_size).zip(rows) {
        pack_record(id, &text, record)?;
    }
    let mut table = MemoryMap::new(data);
    table.pad_to_multiple(BLOCK_SIZE);
    Ok(table)
}

/// Contact table, zero-padded to whole transfer blocks
pub fn pack_ham_contacts(contacts: &[HamContact], size: ContactRecordSize) -> Result<MemoryMap> {
    pack_table(
        contacts.iter().map(|c| (c.radio_id, c.info())),
        size.bytes(),
        "ham contacts",
    )
}

/// Group table, zero-padded to whole transfer blocks
pub fn pack_ham_groups(groups: &[HamGroup]) -> Result<MemoryMap> {
    pack_table(
        groups.iter().map(|g| (g.id, g.name.clone())),
        HAM_GROUP_RECORD_SIZE,
        "ham groups",
    )
}
