// RT73 block transfer protocol
// Codeplug download/upload, ham database uploads and firmware flashing, all
// in 2048-byte blocks.

use super::comm::{SerialError, Transport};
use crate::core::constants::{BLOCK_SIZE, MAX_BLOCKS, MAX_HAM_CONTACT_BLOCKS, MAX_HAM_GROUP_BLOCKS};
use crate::formats::ContactRecordSize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Progress callback type
/// Arguments: (bytes_transferred, total_bytes, status_message)
pub type ProgressCallback = Arc<dyn Fn(usize, usize, &str) + Send + Sync>;

#[derive(Error, Debug)]
pub enum TransferError {
    #[error("No response from radio during {0}")]
    NoResponse(&'static str),

    #[error("Unexpected response from radio during {stage}: {got:02x?}")]
    UnexpectedResponse { stage: &'static str, got: Vec<u8> },

    #[error("Image of {blocks} blocks exceeds the maximum of {max}")]
    TooLarge { blocks: usize, max: usize },

    #[error("Ham contact table of {blocks} blocks exceeds the maximum of {max}")]
    TooManyHamContacts { blocks: usize, max: usize },

    #[error("Ham group table of {blocks} blocks exceeds the maximum of {max}")]
    TooManyHamGroups { blocks: usize, max: usize },

    #[error("{count} records do not fit the 3-byte count of the upload header")]
    TooManyRecords { count: usize },

    #[error("Nothing to transfer")]
    Empty,

    #[error("Radio did not confirm the firmware checksum; the update may still have succeeded")]
    Unconfirmed,

    #[error(transparent)]
    Serial(#[from] SerialError),
}

pub type Result<T> = std::result::Result<T, TransferError>;

impl TransferError {
    /// Process exit status for the command-line tool
    pub fn exit_code(&self) -> i32 {
        match self {
            TransferError::NoResponse(_) | TransferError::Serial(_) => 1,
            TransferError::UnexpectedResponse { .. } | TransferError::Empty => 2,
            TransferError::TooLarge { .. } | TransferError::TooManyRecords { .. } => 3,
            TransferError::Unconfirmed => 5,
            TransferError::TooManyHamContacts { .. } => 7,
            TransferError::TooManyHamGroups { .. } => 8,
        }
    }
}

const READ_COMMAND: &[u8] = b"Flash Read ";
const READ_HEADER: [u8; 20] = [
    0x00, 0x3C, 0x00, 0x00, 0x00, 0x00, 0x00, 0x39, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00,
];
const READ_REPLY_LEN: usize = 103;
const READ_BLOCK: &[u8] = b"Read";

const WRITE_COMMAND: &[u8] = b"Flash Write";
const WRITE_HEADER: [u8; 20] = [
    0x00, 0x3C, 0x00, 0x00, 0x00, 0x00, 0x00, 0xFF, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00,
];
/// Byte of the whole write command that carries the block count
const WRITE_COUNT_INDEX: usize = 18;
const WRITE_REPLY_LEN: usize = 93;
const WRITE_ACK: &[u8] = b"Write";
const WRITE_DONE: &[u8] = b"Check";

// Ham databases use their own write header: kind, block count (big-endian),
// a record-size marker, then the record count (3 bytes, big-endian)
const HAM_CONTACTS_KIND: [u8; 2] = [0x81, 0x10];
const HAM_GROUPS_KIND: [u8; 2] = [0x82, 0x98];
const HAM_RECORD_MARKER: u8 = 0x2B;

const ERASE_COMMAND: &[u8] = b"Erase";
const ERASE_PARAMS: [u8; 12] = [0x20, 0x20, 0x20, 0x20, 0x20, 0x20, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
const ERASE_BANNER_LEN: usize = 33;
const ERASE_OK: &[u8] = b"Erase ok";
const FIRMWARE_ACK: &[u8] = b"kyd";
const CHECKSUM_REPLY_LEN: usize = 13;
const CHECKSUM_PREFIX: &[u8] = b"Checksum";

/// Block bookkeeping shared by all three transfers
pub struct BlockProtocol {
    block_size: usize,
    total_size: usize,
}

impl BlockProtocol {
    pub fn new(block_size: usize, total_size: usize) -> Self {
        Self {
            block_size,
            total_size,
        }
    }

    /// Calculate number of blocks needed
    pub fn num_blocks(&self) -> usize {
        self.total_size.div_ceil(self.block_size)
    }

    /// Copy of `data` zero-padded to whole blocks
    pub fn padded(&self, data: &[u8]) -> Vec<u8> {
        let mut padded = data.to_vec();
        padded.resize(self.num_blocks() * self.block_size, 0);
        padded
    }

    /// Calculate progress percentage
    pub fn progress_percent(&self, bytes_transferred: usize) -> f32 {
        if self.total_size == 0 {
            return 100.0;
        }
        (bytes_transferred as f32 / self.total_size as f32) * 100.0
    }

    fn report(&self, progress: &Option<ProgressCallback>, verb: &str, block_idx: usize) {
        let bytes = ((block_idx + 1) * self.block_size).min(self.total_size);
        let msg = format!(
            "{} block {}/{} ({:.1}%)",
            verb,
            block_idx + 1,
            self.num_blocks(),
            self.progress_percent(bytes)
        );
        debug!("{}", msg);
        if let Some(callback) = progress {
            callback(bytes, self.total_size, &msg);
        }
    }
}

/// The RT73 programming protocol over any transport
pub struct Rt73Protocol<T: Transport> {
    transport: T,
    progress: Option<ProgressCallback>,
}

impl<T: Transport> Rt73Protocol<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            progress: None,
        }
    }

    pub fn with_progress(mut self, progress: ProgressCallback) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn into_inner(self) -> T {
        self.transport
    }

    /// Read a reply of exactly `len` bytes; silence is `NoResponse`
    async fn reply(&mut self, len: usize, stage: &'static str) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; len];
        match self.transport.read_exact(&mut buf).await {
            Ok(()) => Ok(buf),
            Err(SerialError::Timeout(_)) => Err(TransferError::NoResponse(stage)),
            Err(e) => Err(e.into()),
        }
    }

    async fn expect(&mut self, expected: &[u8], stage: &'static str) -> Result<()> {
        let got = self.reply(expected.len(), stage).await?;
        if got != expected {
            return Err(TransferError::UnexpectedResponse { stage, got });
        }
        Ok(())
    }

    /// Read the whole codeplug image from the radio
    pub async fn download(&mut self) -> Result<Vec<u8>> {
        info!("Establishing connection to radio");
        self.transport.write_all(READ_COMMAND).await?;
        self.transport.write_all(&READ_HEADER).await?;
        let handshake = self.reply(READ_REPLY_LEN, "download handshake").await?;
        debug!("Download handshake: {:02x?}", handshake);

        let pages = usize::from(handshake[18]) + usize::from(handshake[20]);
        info!("Expecting {} blocks", pages);
        let blocks = BlockProtocol::new(BLOCK_SIZE, pages * BLOCK_SIZE);
        let mut image = Vec::with_capacity(pages * BLOCK_SIZE);
        for i in 0..pages {
            self.transport.write_all(READ_BLOCK).await?;
            image.extend(self.reply(BLOCK_SIZE, "block read").await?);
            blocks.report(&self.progress, "Read", i);
        }
        info!("Download complete, {} bytes", image.len());
        Ok(image)
    }

    /// Write a codeplug image, padded to whole blocks
    pub async fn upload(&mut self, data: &[u8]) -> Result<()> {
        let blocks = BlockProtocol::new(BLOCK_SIZE, data.len());
        let count = blocks.num_blocks();
        if count > MAX_BLOCKS {
            return Err(TransferError::TooLarge {
                blocks: count,
                max: MAX_BLOCKS,
            });
        }
        if count == 0 {
            return Err(TransferError::Empty);
        }
        let data = blocks.padded(data);
        let mut command = [WRITE_COMMAND, &WRITE_HEADER[..]].concat();
        command[WRITE_COUNT_INDEX] = count as u8;
        self.write_blocks(&command, &blocks, &data).await?;
        info!("Upload complete");
        Ok(())
    }

    /// Write the ham contact database packed into `size`-byte records
    pub async fn upload_ham_contacts(&mut self, table: &[u8], count: usize, size: ContactRecordSize) -> Result<()> {
        let blocks = BlockProtocol::new(BLOCK_SIZE, table.len());
        if blocks.num_blocks() > MAX_HAM_CONTACT_BLOCKS {
            return Err(TransferError::TooManyHamContacts {
                blocks: blocks.num_blocks(),
                max: MAX_HAM_CONTACT_BLOCKS,
            });
        }
        info!("Uploading {} ham contacts ({} bytes each)", count, size.bytes());
        let marker = [HAM_RECORD_MARKER, size.bytes() as u8, HAM_RECORD_MARKER, 0x00];
        let command = ham_command(HAM_CONTACTS_KIND, &blocks, marker, count)?;
        self.write_blocks(&command, &blocks, &blocks.padded(table)).await?;
        info!("Ham contact upload complete");
        Ok(())
    }

    /// Write the ham group database packed into 16-byte records
    pub async fn upload_ham_groups(&mut self, table: &[u8], count: usize) -> Result<()> {
        let blocks = BlockProtocol::new(BLOCK_SIZE, table.len());
        if blocks.num_blocks() > MAX_HAM_GROUP_BLOCKS {
            return Err(TransferError::TooManyHamGroups {
                blocks: blocks.num_blocks(),
                max: MAX_HAM_GROUP_BLOCKS,
            });
        }
        info!("Uploading {} ham groups", count);
        let marker = [HAM_RECORD_MARKER, 0x10, HAM_RECORD_MARKER, 0x00];
        let command = ham_command(HAM_GROUPS_KIND, &blocks, marker, count)?;
        self.write_blocks(&command, &blocks, &blocks.padded(table)).await?;
        info!("Ham group upload complete");
        Ok(())
    }

    /// Send a "Flash Write" command, then `data` block by block.
    /// Each block is acknowledged with "Write", the last may be "Check".
    async fn write_blocks(&mut self, command: &[u8], blocks: &BlockProtocol, data: &[u8]) -> Result<()> {
        let count = blocks.num_blocks();
        info!("Establishing connection to radio");
        self.transport.write_all(command).await?;
        let reply = self.reply(WRITE_REPLY_LEN, "upload handshake").await?;
        if reply.get(2..7) != Some(WRITE_ACK) {
            return Err(TransferError::UnexpectedResponse {
                stage: "upload handshake",
                got: reply,
            });
        }

        info!("Writing {} blocks", count);
        for (i, block) in data.chunks(BLOCK_SIZE).enumerate() {
            self.transport.write_all(block).await?;
            let ack = self.reply(WRITE_ACK.len(), "block write").await?;
            let last = i + 1 == count;
            if ack != WRITE_ACK && !(last && ack == WRITE_DONE) {
                return Err(TransferError::UnexpectedResponse {
                    stage: "block write",
                    got: ack,
                });
            }
            blocks.report(&self.progress, "Wrote", i);
        }
        Ok(())
    }

    /// Flash a firmware file; the radio must already be in its bootloader
    pub async fn flash_firmware(&mut self, data: &[u8]) -> Result<()> {
        let blocks = BlockProtocol::new(BLOCK_SIZE, data.len());
        let count = blocks.num_blocks();
        if count == 0 {
            return Err(TransferError::Empty);
        }
        let last_index = u16::try_from(count - 1).map_err(|_| TransferError::TooLarge {
            blocks: count,
            max: usize::from(u16::MAX) + 1,
        })?;
        let data = blocks.padded(data);

        info!("Starting firmware upload of {} blocks", count);
        self.transport.write_all(ERASE_COMMAND).await?;
        self.transport.write_all(&ERASE_PARAMS).await?;
        self.transport.write_all(&last_index.to_be_bytes()).await?;

        let banner = self.reply(ERASE_BANNER_LEN, "erase").await?;
        debug!("Bootloader banner: {:?}", String::from_utf8_lossy(&banner));
        self.expect(ERASE_OK, "erase").await?;

        for (i, block) in data.chunks(BLOCK_SIZE).enumerate() {
            self.transport.write_all(block).await?;
            self.expect(FIRMWARE_ACK, "firmware write").await?;
            blocks.report(&self.progress, "Flashed", i);
        }

        match self.reply(CHECKSUM_REPLY_LEN, "checksum").await {
            Ok(reply) if reply.starts_with(CHECKSUM_PREFIX) => {
                info!("Firmware upload complete");
                Ok(())
            }
            Ok(_) | Err(TransferError::NoResponse(_)) => {
                warn!("Firmware checksum was not confirmed");
                Err(TransferError::Unconfirmed)
            }
            Err(e) => Err(e),
        }
    }
}

/// "Flash Write" header for a ham database table
fn ham_command(kind: [u8; 2], blocks: &BlockProtocol, marker: [u8; 4], count: usize) -> Result<Vec<u8>> {
    let block_count = blocks.num_blocks();
    if block_count == 0 {
        return Err(TransferError::Empty);
    }
    let block_count = u16::try_from(block_count).map_err(|_| TransferError::TooLarge {
        blocks: block_count,
        max: usize::from(u16::MAX),
    })?;
    let record_count = u32::try_from(count)
        .ok()
        .filter(|&n| n < 1 << 24)
        .ok_or(TransferError::TooManyRecords { count })?;

    let mut command = WRITE_COMMAND.to_vec();
    command.extend_from_slice(&kind);
    command.extend_from_slice(&[0x00; 4]);
    command.extend_from_slice(&block_count.to_be_bytes());
    command.extend_from_slice(&[0x00; 12]);
    command.extend_from_slice(&marker);
    command.extend_from_slice(&record_count.to_be_bytes()[1..]);
    Ok(command)
}
