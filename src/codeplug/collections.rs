// Variable-Collection Codec
// Zero-sentinel member arrays inside scan list and RX group records, the
// split quick-message blocks, and the fixed APRS DMR channel records.

use crate::bitwise::{read_u16_le, write_u16_le};
use crate::codec;
use crate::core::constants::*;
use crate::diagnostics::Diagnostics;
use crate::error::{CodeplugError, Result};
use crate::memmap::MemoryMap;
use crate::schema::RecordStruct;

use super::document::{AprsDmrChannel, RxGroup, ScanList, ScanMember};
use super::schemas::{APRS_DMR_CHANNEL, RX_GROUP, SCAN_LIST};

/// Last logical slot that holds message text; slot 99 lies on the APRS
/// DMR channel records
const MESSAGE_SLOTS: usize = MAX_MESSAGES - 1;

fn capacity(what: &str, count: usize, max: usize) -> Result<()> {
    if count > max {
        return Err(CodeplugError::CapacityExceeded {
            what: what.to_string(),
            count,
            max,
        });
    }
    Ok(())
}

fn u16_at(window: &[u8], offset: usize) -> Result<u16> {
    let bytes = window.get(offset..offset + 2).ok_or(CodeplugError::Truncated {
        offset,
        len: 2,
        size: window.len(),
    })?;
    Ok(read_u16_le(bytes)?)
}

fn put_u16(window: &mut [u8], offset: usize, value: u16) -> Result<()> {
    let size = window.len();
    window
        .get_mut(offset..offset + 2)
        .ok_or(CodeplugError::Truncated { offset, len: 2, size })?
        .copy_from_slice(&write_u16_le(value));
    Ok(())
}

/// Non-zero (group, channel) pairs of a scan list record, in slot order
pub fn decode_scan_members(window: &[u8]) -> Result<Vec<ScanMember>> {
    let mut members = Vec::new();
    for slot in 0..SCAN_LIST_PAIRS {
        let offset = SCAN_LIST_PAIRS_OFFSET + slot * 4;
        let group = u16_at(window, offset)?;
        let channel = u16_at(window, offset + 2)?;
        if group != 0 && channel != 0 {
            members.push(ScanMember { group, channel });
        }
    }
    Ok(members)
}

/// Write pairs densely from the first slot; later slots stay zero
pub fn encode_scan_members(members: &[ScanMember], window: &mut [u8]) -> Result<()> {
    capacity("Scan list channels", members.len(), SCAN_LIST_PAIRS)?;
    for (slot, member) in members.iter().enumerate() {
        if member.group == 0 || member.channel == 0 {
            return Err(CodeplugError::InvalidMember {
                collection: "Scan list".to_string(),
                message: format!(
                    "entry {} (group {}, channel {}) uses the empty-slot value 0",
                    slot, member.group, member.channel
                ),
            });
        }
        let offset = SCAN_LIST_PAIRS_OFFSET + slot * 4;
        put_u16(window, offset, member.group)?;
        put_u16(window, offset + 2, member.channel)?;
    }
    Ok(())
}

/// Non-zero contact IDs of an RX group record, in slot order
pub fn decode_rx_members(window: &[u8]) -> Result<Vec<u16>> {
    let mut ids = Vec::new();
    for slot in 0..RX_GROUP_MEMBERS {
        let id = u16_at(window, RX_GROUP_MEMBERS_OFFSET + slot * 2)?;
        if id != 0 {
            ids.push(id);
        }
    }
    Ok(ids)
}

pub fn encode_rx_members(ids: &[u16], window: &mut [u8]) -> Result<()> {
    capacity("RX group contacts", ids.len(), RX_GROUP_MEMBERS)?;
    for (slot, &id) in ids.iter().enumerate() {
        if id == 0 {
            return Err(CodeplugError::InvalidMember {
                collection: "RX group".to_string(),
                message: format!("entry {} uses the empty-slot contact ID 0", slot),
            });
        }
        put_u16(window, RX_GROUP_MEMBERS_OFFSET + slot * 2, id)?;
    }
    Ok(())
}

/// Scan list records worth keeping: named, or with members
pub fn decode_scan_lists(image: &MemoryMap, diag: &mut Diagnostics) -> Result<Vec<ScanList>> {
    let mut lists = Vec::new();
    for i in 0..SCAN_LIST_COUNT {
        let window = image.get(SCAN_LIST_START_ADDR + i * SCAN_LIST_RECORD_SIZE, Some(SCAN_LIST_RECORD_SIZE))?;
        let context = format!("Scan list {}", i);
        let record = codec::decode(SCAN_LIST, window, diag, &context)?;
        let mut list = ScanList::from_record(&record, diag, &context);
        list.members = decode_scan_members(window)?;
        if !list.name.is_empty() || !list.members.is_empty() {
            diag.record(format_args!("Parsed scan list {} {:?}", i, list.name));
            lists.push(list);
        }
    }
    Ok(lists)
}

pub fn encode_scan_lists(lists: &[ScanList], image: &mut MemoryMap) -> Result<()> {
    capacity("Scan lists", lists.len(), SCAN_LIST_COUNT)?;
    for (i, list) in lists.iter().enumerate() {
        let window = image.get_mut(SCAN_LIST_START_ADDR + i * SCAN_LIST_RECORD_SIZE, Some(SCAN_LIST_RECORD_SIZE))?;
        codec::encode(SCAN_LIST, &list.to_record(), window)?;
        encode_scan_members(&list.members, window)?;
    }
    Ok(())
}

/// RX group records worth keeping: named, or with members
pub fn decode_rx_groups(image: &MemoryMap, diag: &mut Diagnostics) -> Result<Vec<RxGroup>> {
    let mut groups = Vec::new();
    for i in 0..RX_GROUP_COUNT {
        let window = image.get(RX_GROUP_START_ADDR + i * RX_GROUP_RECORD_SIZE, Some(RX_GROUP_RECORD_SIZE))?;
        let context = format!("RX group {}", i);
        let record = codec::decode(RX_GROUP, window, diag, &context)?;
        let mut group = RxGroup::from_record(&record, diag, &context);
        group.contacts = decode_rx_members(window)?;
        if !group.name.is_empty() || !group.contacts.is_empty() {
            diag.record(format_args!("Parsed RX group {} {:?}", i, group.name));
            groups.push(group);
        }
    }
    Ok(groups)
}

pub fn encode_rx_groups(groups: &[RxGroup], image: &mut MemoryMap) -> Result<()> {
    capacity("RX groups", groups.len(), RX_GROUP_COUNT)?;
    for (i, group) in groups.iter().enumerate() {
        let window = image.get_mut(RX_GROUP_START_ADDR + i * RX_GROUP_RECORD_SIZE, Some(RX_GROUP_RECORD_SIZE))?;
        codec::encode(RX_GROUP, &group.to_record(), window)?;
        encode_rx_members(&group.contacts, window)?;
    }
    Ok(())
}

/// Non-empty quick messages in logical order; unreadable slots are skipped
pub fn decode_messages(image: &MemoryMap, diag: &mut Diagnostics) -> Result<Vec<String>> {
    let mut messages = Vec::new();
    for index in 0..MESSAGE_SLOTS {
        let Some(addr) = message_address(index) else {
            break;
        };
        let window = image.get(addr, Some(MESSAGE_RECORD_SIZE))?;
        match crate::bitwise::decode_ascii(window) {
            Some(text) if !text.is_empty() => {
                diag.record(format_args!("Adding message {:?}", text));
                messages.push(text);
            }
            Some(_) => {}
            None => diag.warn(
                "Quick messages",
                format!("skipped message {} containing non-ASCII text", index),
            ),
        }
    }
    Ok(messages)
}

pub fn encode_messages(messages: &[String], image: &mut MemoryMap) -> Result<()> {
    capacity("Quick messages", messages.len(), MAX_MESSAGES)?;
    if messages.len() > MESSAGE_SLOTS {
        return Err(CodeplugError::RegionConflict(format!(
            "quick message {} would overwrite the APRS DMR channels at {:#x}",
            MESSAGE_SLOTS, APRS_DMR_START_ADDR
        )));
    }
    for (index, text) in messages.iter().enumerate() {
        let field = format!("Quick message {}", index);
        if text.is_empty() {
            return Err(CodeplugError::InvalidMember {
                collection: "Quick messages".to_string(),
                message: format!("message {} is empty", index),
            });
        }
        let bytes = crate::bitwise::encode_ascii(text).ok_or_else(|| CodeplugError::InvalidText {
            field: field.clone(),
            text: text.clone(),
        })?;
        if bytes.len() > MESSAGE_RECORD_SIZE {
            return Err(CodeplugError::TextTooLong {
                field,
                len: bytes.len(),
                max: MESSAGE_RECORD_SIZE,
            });
        }
        let addr = message_address(index).ok_or(CodeplugError::CapacityExceeded {
            what: "Quick messages".to_string(),
            count: messages.len(),
            max: MAX_MESSAGES,
        })?;
        image.or_bytes(addr, bytes)?;
    }
    Ok(())
}

/// All eight APRS DMR channel records
pub fn decode_aprs_channels(image: &MemoryMap, diag: &mut Diagnostics) -> Result<Vec<AprsDmrChannel>> {
    (0..APRS_DMR_COUNT)
        .map(|i| {
            let window = image.get(APRS_DMR_START_ADDR + i * APRS_DMR_RECORD_SIZE, Some(APRS_DMR_RECORD_SIZE))?;
            let context = format!("APRS DMR channel {}", i);
            let record = codec::decode(APRS_DMR_CHANNEL, window, diag, &context)?;
            Ok(AprsDmrChannel::from_record(&record, diag, &context))
        })
        .collect()
}

/// Missing trailing records stay zero
pub fn encode_aprs_channels(channels: &[AprsDmrChannel], image: &mut MemoryMap) -> Result<()> {
    capacity("APRS DMR channels", channels.len(), APRS_DMR_COUNT)?;
    for (i, channel) in channels.iter().enumerate() {
        let window = image.get_mut(APRS_DMR_START_ADDR + i * APRS_DMR_RECORD_SIZE, Some(APRS_DMR_RECORD_SIZE))?;
        codec::encode(APRS_DMR_CHANNEL, &channel.to_record(), window)?;
    }
    Ok(())
}
