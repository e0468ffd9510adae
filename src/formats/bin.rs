// Raw codeplug image files, exactly the bytes exchanged with the radio

use super::Result;
use crate::memmap::MemoryMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Load a raw image file
pub fn load_image(filename: impl AsRef<Path>) -> Result<MemoryMap> {
    let mut file = File::open(filename)?;
    let mut data = Vec::new();
    file.read_to_end(&mut data)?;
    Ok(MemoryMap::new(data))
}

/// Save an image as raw bytes
pub fn save_image(filename: impl AsRef<Path>, image: &MemoryMap) -> Result<()> {
    let mut file = File::create(filename)?;
    file.write_all(image.get_packed())?;
    Ok(())
}

/// Where `decompile_bin` writes its document: `plug.bin` becomes `plug.json`
pub fn decompiled_path(image_path: impl AsRef<Path>) -> PathBuf {
    image_path.as_ref().with_extension("json")
}
