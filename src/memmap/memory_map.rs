// Memory map holding a raw codeplug image
// Every record window is taken through `get`/`get_mut` so a short or corrupt
// image surfaces as an error instead of a panic.

use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MemoryMapError {
    #[error("Window {offset:#x}+{len} is outside the {size} byte image")]
    OutOfBounds {
        offset: usize,
        len: usize,
        size: usize,
    },
}

pub type Result<T> = std::result::Result<T, MemoryMapError>;

/// Byte image of the radio's configuration memory
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MemoryMap {
    data: Vec<u8>,
}

impl MemoryMap {
    /// Wrap an image received from the radio or read from disk
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Zero-filled image of `size` bytes
    pub fn new_with_size(size: usize) -> Self {
        Self {
            data: vec![0u8; size],
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn check(&self, start: usize, len: usize) -> Result<usize> {
        match start.checked_add(len) {
            Some(end) if end <= self.data.len() => Ok(end),
            _ => Err(MemoryMapError::OutOfBounds {
                offset: start,
                len,
                size: self.data.len(),
            }),
        }
    }

    /// Get a chunk of memory from @start for @length bytes
    /// If length is None, returns all data from @start to end
    pub fn get(&self, start: usize, length: Option<usize>) -> Result<&[u8]> {
        let len = length.unwrap_or_else(|| self.data.len().saturating_sub(start));
        let end = self.check(start, len)?;
        Ok(&self.data[start..end])
    }

    /// Get a mutable chunk of memory
    pub fn get_mut(&mut self, start: usize, length: Option<usize>) -> Result<&mut [u8]> {
        let len = length.unwrap_or_else(|| self.data.len().saturating_sub(start));
        let end = self.check(start, len)?;
        Ok(&mut self.data[start..end])
    }

    /// Overwrite bytes starting at @pos
    pub fn set_bytes(&mut self, pos: usize, bytes: &[u8]) -> Result<()> {
        let end = self.check(pos, bytes.len())?;
        self.data[pos..end].copy_from_slice(bytes);
        Ok(())
    }

    /// OR bytes into the image starting at @pos, leaving set bits untouched
    pub fn or_bytes(&mut self, pos: usize, bytes: &[u8]) -> Result<()> {
        let end = self.check(pos, bytes.len())?;
        for (dst, src) in self.data[pos..end].iter_mut().zip(bytes) {
            *dst |= *src;
        }
        Ok(())
    }

    /// Zero-pad the image up to the next multiple of @block bytes
    pub fn pad_to_multiple(&mut self, block: usize) {
        let rem = self.data.len() % block;
        if rem != 0 {
            self.data.resize(self.data.len() + block - rem, 0);
        }
    }

    /// Get the entire memory map as raw bytes
    pub fn get_packed(&self) -> &[u8] {
        &self.data
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }

    /// Get a printable hex representation of the memory map
    pub fn printable(&self, start: Option<usize>, end: Option<usize>) -> String {
        let end = end.unwrap_or(self.data.len()).min(self.data.len());
        let start = start.unwrap_or(0).min(end);
        hexdump(&self.data[start..end], start)
    }
}

impl From<Vec<u8>> for MemoryMap {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl From<&[u8]> for MemoryMap {
    fn from(data: &[u8]) -> Self {
        Self::new(data.to_vec())
    }
}

impl AsRef<[u8]> for MemoryMap {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl fmt::Display for MemoryMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MemoryMap({} bytes, {} blocks)",
            self.data.len(),
            self.data.len().div_ceil(2048)
        )
    }
}

/// Create a hex dump of bytes (similar to hexdump -C)
fn hexdump(data: &[u8], base: usize) -> String {
    let mut output = String::new();

    for (i, chunk) in data.chunks(16).enumerate() {
        output.push_str(&format!("{:08x}  ", base + i * 16));

        for j in 0..16 {
            if j == 8 {
                output.push(' ');
            }
            match chunk.get(j) {
                Some(byte) => output.push_str(&format!("{:02x} ", byte)),
                None => output.push_str("   "),
            }
        }

        output.push_str(" |");
        for byte in chunk {
            if (0x20..=0x7e).contains(byte) {
                output.push(*byte as char);
            } else {
                output.push('.');
            }
        }
        output.push_str("|\n");
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_map_creation() {
        let mmap = MemoryMap::new(vec![1, 2, 3, 4, 5]);
        assert_eq!(mmap.len(), 5);
        assert!(!mmap.is_empty());

        let sized = MemoryMap::new_with_size(10);
        assert_eq!(sized.get(0, Some(10)).unwrap(), &[0u8; 10]);
        assert!(MemoryMap::default().is_empty());
    }

    #[test]
    fn test_or_bytes_keeps_existing_bits() {
        let mut mmap = MemoryMap::new_with_size(4);
        mmap.or_bytes(1, &[0x0F]).unwrap();
        mmap.or_bytes(1, &[0xF0]).unwrap();
        assert_eq!(mmap.get_packed(), &[0x00, 0xFF, 0x00, 0x00]);

        mmap.set_bytes(1, &[0x01]).unwrap();
        assert_eq!(mmap.get(1, Some(1)).unwrap(), &[0x01]);
    }

    #[test]
    fn test_bounds_checking() {
        let mut mmap = MemoryMap::new(vec![1, 2, 3]);

        assert!(mmap.get(5, Some(1)).is_err());
        assert_eq!(
            mmap.get(2, Some(5)),
            Err(MemoryMapError::OutOfBounds {
                offset: 2,
                len: 5,
                size: 3
            })
        );
        assert!(mmap.get(usize::MAX, Some(2)).is_err());
        assert!(mmap.or_bytes(2, &[0, 0]).is_err());
        assert_eq!(mmap.get(1, None).unwrap(), &[2, 3]);
        assert!(mmap.get_mut(3, None).unwrap().is_empty());
    }

    #[test]
    fn test_pad_to_multiple() {
        let mut mmap = MemoryMap::new(vec![0xAA; 3000]);
        mmap.pad_to_multiple(2048);
        assert_eq!(mmap.len(), 4096);
        assert_eq!(mmap.get(3000, Some(1)).unwrap(), &[0]);

        mmap.pad_to_multiple(2048);
        assert_eq!(mmap.len(), 4096);
    }

    #[test]
    fn test_hexdump() {
        let mmap = MemoryMap::new(b"\x00\x01RT73\xff".to_vec());
        let dump = mmap.printable(None, None);
        assert!(dump.starts_with("00000000  00 01 52 54"));
        assert!(dump.contains("|..RT73.|"));

        let dump = mmap.printable(Some(2), Some(4));
        assert!(dump.starts_with("00000002  52 54"));
    }
}
