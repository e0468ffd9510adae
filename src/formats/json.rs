// JSON codeplug documents
// Pretty-printed with two-space indentation so files diff cleanly by hand.

use super::Result;
use crate::codeplug::Codeplug;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

pub fn to_json_string(doc: &Codeplug) -> Result<String> {
    Ok(serde_json::to_string_pretty(doc)?)
}

pub fn from_json_str(text: &str) -> Result<Codeplug> {
    Ok(serde_json::from_str(text)?)
}

/// Load a codeplug document from a JSON file
pub fn load_document(filename: impl AsRef<Path>) -> Result<Codeplug> {
    let file = File::open(filename)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// Save a codeplug document as pretty JSON
pub fn save_document(filename: impl AsRef<Path>, doc: &Codeplug) -> Result<()> {
    let mut writer = BufWriter::new(File::create(filename)?);
    serde_json::to_writer_pretty(&mut writer, doc)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
