// Codeplug Assembler/Disassembler
// Composes the layout planner, record codec, resolver and collection codec
// into whole-image conversions.

use crate::codec::{self, Record, Value};
use crate::core::constants::*;
use crate::diagnostics::{Diagnostics, Verbosity};
use crate::error::{CodeplugError, Result};
use crate::memmap::MemoryMap;
use crate::schema::{RecordStruct, Schema};

use super::collections;
use super::document::*;
use super::labels::OnOff;
use super::layout::{Counts, Layout};
use super::resolve::{resolve_aprs, resolve_channel, unresolve_aprs, unresolve_channel};
use super::schemas;

fn decode_section<T: RecordStruct>(
    image: &MemoryMap,
    schema: Schema,
    name: &str,
    diag: &mut Diagnostics,
) -> Result<T> {
    diag.section(format_args!("Parsing {}", name));
    let record = codec::decode(schema, image.get(0, None)?, diag, name)?;
    Ok(T::from_record(&record, diag, name))
}

fn encode_section(image: &mut MemoryMap, schema: Schema, record: &Record) -> Result<()> {
    codec::encode(schema, record, image.get_mut(0, None)?)
}

/// Flag fields that share stored bits and will read back as their OR
fn warn_shared_bits(doc: &Codeplug, diag: &mut Diagnostics) {
    let roaming = doc.prompt_tone.roaming_restart_prompt;
    let repeater = doc.prompt_tone.repeater_selected_prompt;
    if roaming != repeater {
        diag.warn(
            "Prompt Tone",
            format!(
                "roaming restart prompt {} and repeater selected prompt {} share one nibble, both read back as {}",
                roaming,
                repeater,
                roaming | repeater
            ),
        );
    }

    let serial_bit = doc
        .device_info
        .serial_number
        .as_bytes()
        .first()
        .is_some_and(|b| b & 0x10 != 0);
    let scan_running = matches!(doc.common_menu.scan_running, OnOff::On);
    if serial_bit != scan_running {
        diag.warn(
            "Common menu parameters",
            format!(
                "scan running {} disagrees with bit 0x10 of serial number {:?}, which it shares",
                doc.common_menu.scan_running, doc.device_info.serial_number
            ),
        );
    }
}

/// Decode a raw image into a document.
///
/// Local corruption (unknown enum bits, unreadable text, bad tone indexes)
/// is reported through `diag`; only structural problems fail.
pub fn disassemble(image: &[u8], diag: &mut Diagnostics) -> Result<Codeplug> {
    let image = MemoryMap::from(image);
    let layout = Layout::from_image(&image)?;
    diag.section(format_args!("Layout: {}", layout));
    if diag.verbosity() >= Verbosity::Fields {
        let counters = image.printable(Some(ZONE_COUNT_ADDR), Some(CONTACT_COUNT_ADDR + 2));
        diag.field(format_args!("Counters:\n{}", counters.trim_end()));
    }

    let device_info = decode_section(&image, schemas::DEVICE_INFO, "Device info", diag)?;
    let basic = decode_section(&image, schemas::BASIC_PARAMETERS, "Basic parameters", diag)?;
    let common_menu = decode_section(&image, schemas::COMMON_MENU_PARAMETERS, "Common menu parameters", diag)?;
    let prompt_tone = decode_section(&image, schemas::PROMPT_TONE, "Prompt Tone", diag)?;
    let indicators = decode_section(&image, schemas::INDICATORS, "Indicators", diag)?;
    let buttons = decode_section(&image, schemas::PRESET_BUTTONS, "Preset buttons", diag)?;
    let mic_gain = decode_section(&image, schemas::MIC_GAIN, "Mic gain", diag)?;
    let dmr_service = decode_section(&image, schemas::DMR_SERVICE, "DMR Service", diag)?;

    diag.section("Parsing APRS");
    let mut record = codec::decode(schemas::APRS, image.get(0, None)?, diag, "APRS")?;
    resolve_aprs(&mut record, diag);
    let mut aprs = Aprs::from_record(&record, diag, "APRS");
    aprs.dmr_channels = collections::decode_aprs_channels(&image, diag)?;

    diag.section("Parsing quick messages");
    let messages = collections::decode_messages(&image, diag)?;

    diag.section(format_args!("Parsing {} contacts", layout.counts.contacts));
    let contacts = (0..layout.counts.contacts)
        .map(|i| {
            let window = image.get(layout.contact_address(i), Some(CONTACT_RECORD_SIZE))?;
            let context = format!("Contact {}", i);
            let record = codec::decode(schemas::CONTACT, window, diag, &context)?;
            let contact = Contact::from_record(&record, diag, &context);
            diag.record(format_args!("Parsed contact {} {:?}", i, contact.name));
            Ok(contact)
        })
        .collect::<Result<Vec<_>>>()?;

    diag.section("Parsing scan lists");
    let scan_lists = collections::decode_scan_lists(&image, diag)?;
    diag.section("Parsing RX groups");
    let rx_groups = collections::decode_rx_groups(&image, diag)?;

    diag.section(format_args!("Parsing {} zones", layout.counts.zones));
    let zones = (0..layout.counts.zones)
        .map(|i| decode_zone(&image, &layout, i, diag))
        .collect::<Result<Vec<_>>>()?;

    Ok(Codeplug {
        device_info,
        basic,
        common_menu,
        prompt_tone,
        indicators,
        buttons,
        mic_gain,
        aprs,
        dmr_service,
        messages,
        contacts,
        scan_lists,
        rx_groups,
        zones,
    })
}

fn decode_zone(image: &MemoryMap, layout: &Layout, index: usize, diag: &mut Diagnostics) -> Result<Zone> {
    let context = format!("Zone {}", index);
    let window = image.get(layout.zone_address(index), Some(ZONE_RECORD_SIZE))?;
    let record = codec::decode(schemas::ZONE, window, diag, &context)?;
    let mut zone = Zone::from_record(&record, diag, &context);

    let placement = codec::decode(schemas::ZONE_CHANNELS, window, diag, &context)?;
    let slot = placement.int("Channel slot").unwrap_or(0) as usize;
    let count = placement.int("Channel count").unwrap_or(0) as usize;
    diag.record(format_args!(
        "Parsed zone {} {:?}: {} channels from slot {}",
        index, zone.name, count, slot
    ));
    if count == 0 {
        return Ok(zone);
    }

    let start = layout.channel_slot_address(slot)?;
    zone.channels = (0..count)
        .map(|j| {
            let context = format!("Zone {} channel {}", index, j);
            let window = image.get(start + j * CHANNEL_RECORD_SIZE, Some(CHANNEL_RECORD_SIZE))?;
            let mut record = codec::decode(schemas::CHANNEL, window, diag, &context)?;
            let flags = codec::decode(schemas::TIMESLOT_FLAGS, window, diag, &context)?;
            resolve_channel(&mut record, &flags, diag, &context);
            Ok(Channel::from_record(&record, diag, &context))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(zone)
}

/// Encode a document into a raw image sized by the layout planner.
///
/// Any field that cannot be stored aborts the whole image.
pub fn assemble(doc: &Codeplug, diag: &mut Diagnostics) -> Result<Vec<u8>> {
    let layout = Layout::plan(Counts {
        zones: doc.zones.len(),
        channels: doc.channel_count(),
        contacts: doc.contacts.len(),
    })?;
    diag.section(format_args!("Layout: {}", layout));

    let mut image = MemoryMap::new_with_size(layout.image_size);
    layout.write_counts(&mut image)?;

    warn_shared_bits(doc, diag);
    encode_section(&mut image, schemas::DEVICE_INFO, &doc.device_info.to_record())?;
    encode_section(&mut image, schemas::BASIC_PARAMETERS, &doc.basic.to_record())?;
    encode_section(&mut image, schemas::COMMON_MENU_PARAMETERS, &doc.common_menu.to_record())?;
    encode_section(&mut image, schemas::PROMPT_TONE, &doc.prompt_tone.to_record())?;
    encode_section(&mut image, schemas::INDICATORS, &doc.indicators.to_record())?;
    encode_section(&mut image, schemas::PRESET_BUTTONS, &doc.buttons.to_record())?;
    encode_section(&mut image, schemas::MIC_GAIN, &doc.mic_gain.to_record())?;
    encode_section(&mut image, schemas::DMR_SERVICE, &doc.dmr_service.to_record())?;

    let mut record = doc.aprs.to_record();
    unresolve_aprs(&mut record)?;
    encode_section(&mut image, schemas::APRS, &record)?;
    collections::encode_aprs_channels(&doc.aprs.dmr_channels, &mut image)?;

    diag.section(format_args!("Writing {} quick messages", doc.messages.len()));
    collections::encode_messages(&doc.messages, &mut image)?;

    diag.section(format_args!("Writing {} contacts", doc.contacts.len()));
    for (i, contact) in doc.contacts.iter().enumerate() {
        let window = image.get_mut(layout.contact_address(i), Some(CONTACT_RECORD_SIZE))?;
        codec::encode(schemas::CONTACT, &contact.to_record(), window)?;
    }

    collections::encode_scan_lists(&doc.scan_lists, &mut image)?;
    collections::encode_rx_groups(&doc.rx_groups, &mut image)?;

    diag.section(format_args!(
        "Writing {} zones with {} channels",
        layout.counts.zones, layout.counts.channels
    ));
    let channel_counts: Vec<usize> = doc.zones.iter().map(|z| z.channels.len()).collect();
    let slots = layout.zone_channel_slots(&channel_counts);
    let mut next_channel = 0;
    for (i, (zone, slot)) in doc.zones.iter().zip(slots).enumerate() {
        let window = image.get_mut(layout.zone_address(i), Some(ZONE_RECORD_SIZE))?;
        codec::encode(schemas::ZONE, &zone.to_record(), window)?;
        let mut placement = Record::new();
        placement.push("Channel slot", Value::Int(slot as i64));
        placement.push("Channel count", Value::Int(zone.channels.len() as i64));
        codec::encode(schemas::ZONE_CHANNELS, &placement, window)?;

        for (j, channel) in zone.channels.iter().enumerate() {
            let context = format!("Zone {} channel {}", i, j);
            let mut record = channel.to_record();
            let flags = unresolve_channel(&mut record, diag, &context)?;
            let address = layout.channel_start + next_channel * CHANNEL_RECORD_SIZE;
            let window = image.get_mut(address, Some(CHANNEL_RECORD_SIZE))?;
            codec::encode(schemas::CHANNEL, &record, window)?;
            codec::encode(schemas::TIMESLOT_FLAGS, &flags, window)?;
            next_channel += 1;
        }
    }

    if image.len() != layout.image_size {
        return Err(CodeplugError::SizeMismatch {
            expected: layout.image_size,
            actual: image.len(),
        });
    }
    Ok(image.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codeplug::labels::*;
    use crate::core::Tone;

    fn quiet() -> Diagnostics {
        Diagnostics::new(Verbosity::Quiet)
    }

    fn channel(id: u16, name: &str, rx: u32, tx: u32) -> Channel {
        Channel {
            id,
            channel_type: ChannelType::Digital,
            name: name.to_string(),
            rx_freq: rx,
            tx_freq: tx,
            tx_power: PowerLevel::High,
            bandwidth: Bandwidth::Wide,
            rx_cc: 1,
            tx_cc: 1,
            ts_tx: Timeslot::Ts2,
            tx_policy: TxPolicy::PoliteToAll,
            tone_tx: Tone::Ctcss(885),
            tone_rx: Tone::Dcs {
                code: 23,
                inverted: true,
            },
            ..Channel::default()
        }
    }

    fn sample() -> Codeplug {
        let mut doc = Codeplug::blank().unwrap();
        doc.device_info.model_number = "RT73".to_string();
        doc.device_info.serial_number = "A1234567".to_string();
        doc.basic.radio_name = "N0CALL".to_string();
        doc.basic.dmr_id = 3_100_001;
        doc.basic.vox_sensitivity = 5;
        doc.basic.rssi_set = -100;
        doc.buttons.p1_long = ButtonFunction::Monitor;
        doc.aprs.tone = "D754I".parse().unwrap();
        doc.aprs.callsign = "N0CALL".to_string();
        doc.aprs.dmr_channels[2].talkgroup = 91;
        doc.messages = vec!["On my way".to_string(), "QRT".to_string()];
        doc.contacts = (0..70)
            .map(|i| Contact {
                id: i + 1,
                name: format!("TG {}", i),
                dmr_id: 1000 + u32::from(i),
                contact_type: ContactType::Group,
            })
            .collect();
        doc.scan_lists = vec![ScanList {
            name: "Local".to_string(),
            members: vec![ScanMember { group: 1, channel: 2 }],
            ..ScanList::default()
        }];
        doc.rx_groups = vec![RxGroup {
            name: "Monitor".to_string(),
            contacts: vec![1, 2, 3],
        }];
        let mut simplex = channel(3, "Simplex", 43_345_000, 43_345_000);
        simplex.ts_rx = Timeslot::On;
        simplex.ts_tx = Timeslot::On;
        doc.zones = vec![
            Zone {
                id: 1,
                name: "Home".to_string(),
                channels: vec![
                    channel(1, "Rptr A", 43_900_000, 43_140_000),
                    channel(2, "Rptr B", 43_910_000, 43_150_000),
                ],
            },
            Zone {
                id: 2,
                name: "Empty".to_string(),
                channels: Vec::new(),
            },
            Zone {
                id: 3,
                name: "Direct".to_string(),
                channels: vec![simplex],
            },
        ];
        doc
    }

    #[test]
    fn test_round_trip() {
        let doc = sample();
        let mut diag = quiet();
        let image = assemble(&doc, &mut diag).unwrap();
        assert_eq!(image.len() % BLOCK_SIZE, 0);
        let decoded = disassemble(&image, &mut diag).unwrap();
        assert!(!diag.has_warnings(), "{:?}", diag.warnings());
        assert_eq!(decoded, doc);
    }

    #[test]
    fn test_reencode_is_byte_identical() {
        let mut diag = quiet();
        let first = assemble(&sample(), &mut diag).unwrap();
        let doc = disassemble(&first, &mut diag).unwrap();
        let second = assemble(&doc, &mut diag).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_blank_image_round_trip() {
        let blank = Codeplug::blank().unwrap();
        let image = assemble(&blank, &mut quiet()).unwrap();
        assert_eq!(image.len(), Layout::derive(Counts::default()).image_size);
        assert_eq!(disassemble(&image, &mut quiet()).unwrap(), blank);
    }

    #[test]
    fn test_zone_placement_fields() {
        let image = assemble(&sample(), &mut quiet()).unwrap();
        let layout = Layout::from_image(&MemoryMap::from(image.as_slice())).unwrap();
        assert_eq!(layout.counts, Counts { zones: 3, channels: 3, contacts: 70 });
        // 70 contacts need 2 KB, padded to 3
        assert_eq!(layout.zone_start, CONTACT_START_ADDR + 3 * KB);

        let zone = |i: usize| &image[layout.zone_address(i)..layout.zone_address(i) + ZONE_RECORD_SIZE];
        assert_eq!(&zone(0)[ZONE_CHANNEL_SLOT_OFFSET..ZONE_CHANNEL_SLOT_OFFSET + 4], &[4, 0, 2, 0]);
        assert_eq!(&zone(2)[ZONE_CHANNEL_SLOT_OFFSET..ZONE_CHANNEL_SLOT_OFFSET + 4], &[6, 0, 1, 0]);
        let third = layout.channel_start + 2 * CHANNEL_RECORD_SIZE;
        assert_eq!(&image[third + 2..third + 9], b"Simplex");
    }

    #[test]
    fn test_bad_zone_slot_is_rejected() {
        let mut image = assemble(&sample(), &mut quiet()).unwrap();
        let layout = Layout::from_image(&MemoryMap::from(image.as_slice())).unwrap();
        let slot = layout.zone_address(0) + ZONE_CHANNEL_SLOT_OFFSET;
        image[slot] = 2;
        assert!(matches!(
            disassemble(&image, &mut quiet()),
            Err(CodeplugError::RegionConflict(_))
        ));

        image[slot] = 0xF0;
        image[slot + 1] = 0xFF;
        assert!(matches!(
            disassemble(&image, &mut quiet()),
            Err(CodeplugError::Truncated { .. })
        ));
    }

    #[test]
    fn test_local_corruption_warns() {
        let mut image = assemble(&sample(), &mut quiet()).unwrap();
        // Scan mode bits hold an unlisted value, message 0 turns non-ASCII
        image[0x137D] |= 0x03;
        image[MESSAGE_BLOCK_1_ADDR] = 0xFF;
        let mut diag = quiet();
        let doc = disassemble(&image, &mut diag).unwrap();
        assert_eq!(doc.messages, vec!["QRT".to_string()]);
        assert_eq!(diag.warnings().len(), 2);
    }

    #[test]
    fn test_unencodable_document_fails_whole() {
        let mut doc = sample();
        doc.zones[0].channels[0].tone_tx = Tone::Ctcss(886);
        assert!(matches!(
            assemble(&doc, &mut quiet()),
            Err(CodeplugError::ToneNotEncodable { .. })
        ));

        let mut doc = sample();
        doc.basic.radio_name = "A much too long name".to_string();
        assert!(matches!(
            assemble(&doc, &mut quiet()),
            Err(CodeplugError::TextTooLong { .. })
        ));
    }

    #[test]
    fn test_text_that_would_not_read_back_is_rejected() {
        for bad in ["AB\u{1}", "AB\u{7f}", "AB\0", "\r\n"] {
            let mut doc = sample();
            doc.basic.radio_name = bad.to_string();
            assert!(
                matches!(assemble(&doc, &mut quiet()), Err(CodeplugError::InvalidText { .. })),
                "radio name {:?}",
                bad
            );

            let mut doc = sample();
            doc.messages[1] = bad.to_string();
            assert!(
                matches!(assemble(&doc, &mut quiet()), Err(CodeplugError::InvalidText { .. })),
                "message {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_text_edges_round_trip() {
        let mut doc = sample();
        doc.basic.radio_name = "TENLETTERS".to_string();
        doc.aprs.callsign = "M0ABCD".to_string();
        doc.contacts[0].name = "{[~`|]}!?_".to_string();
        doc.zones[0].name = "Z\0NE".to_string();
        doc.zones[0].channels[1].name = "0123456789".to_string();
        doc.scan_lists[0].name = "\0Leading".to_string();
        doc.messages = vec!["x".repeat(MESSAGE_RECORD_SIZE), "Mid\0NUL".to_string()];

        let mut diag = quiet();
        let image = assemble(&doc, &mut diag).unwrap();
        let decoded = disassemble(&image, &mut diag).unwrap();
        assert!(!diag.has_warnings(), "{:?}", diag.warnings());
        assert_eq!(decoded, doc);

        let mut doc = sample();
        doc.messages[0] = "x".repeat(MESSAGE_RECORD_SIZE + 1);
        assert!(matches!(
            assemble(&doc, &mut quiet()),
            Err(CodeplugError::TextTooLong { .. })
        ));
    }

    #[test]
    fn test_shared_bits_warn_on_assemble() {
        let mut doc = sample();
        doc.prompt_tone.roaming_restart_prompt = 0x01;
        doc.prompt_tone.repeater_selected_prompt = 0x02;
        let mut diag = quiet();
        let image = assemble(&doc, &mut diag).unwrap();
        assert_eq!(diag.warnings().len(), 1);
        assert_eq!(diag.warnings()[0].context, "Prompt Tone");
        assert_eq!(image[0x1383] & 0x0F, 0x03);

        let mut doc = sample();
        doc.prompt_tone.roaming_restart_prompt = 0x05;
        doc.prompt_tone.repeater_selected_prompt = 0x05;
        let mut diag = quiet();
        assemble(&doc, &mut diag).unwrap();
        assert!(!diag.has_warnings());

        let mut doc = sample();
        doc.common_menu.scan_running = OnOff::On;
        let mut diag = quiet();
        assemble(&doc, &mut diag).unwrap();
        assert_eq!(diag.warnings().len(), 1);
        assert_eq!(diag.warnings()[0].context, "Common menu parameters");
    }

    #[test]
    fn test_verbose_decode_matches_quiet_decode() {
        let image = assemble(&sample(), &mut quiet()).unwrap();
        let mut verbose = Diagnostics::new(Verbosity::Fields);
        assert_eq!(
            disassemble(&image, &mut verbose).unwrap(),
            disassemble(&image, &mut quiet()).unwrap()
        );
        assert!(!verbose.has_warnings());
    }

    #[test]
    fn test_capacity_checked_before_encoding() {
        let mut doc = Codeplug::blank().unwrap();
        doc.zones = vec![Zone {
            id: 1,
            name: "Big".to_string(),
            channels: vec![Channel::default(); 13_000],
        }];
        assert!(matches!(
            assemble(&doc, &mut quiet()),
            Err(CodeplugError::CapacityExceeded { .. })
        ));
    }
}
