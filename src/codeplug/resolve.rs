// Tone/Enum Resolver
// Rewrites raw channel and APRS records into their document form and back:
// (tone type, table index) pairs and the packed QT/DQT word become `Tone`
// values, and the inverted timeslot flags fold into the nominal timeslot.

use crate::codec::{Record, Value};
use crate::core::Tone;
use crate::diagnostics::Diagnostics;
use crate::error::{CodeplugError, Result};

use super::labels::{Timeslot, Toggle, ToneType};

const TONE_FIELDS: [(&str, &str); 2] = [("Tone Type Tx", "Tone Tx"), ("Tone Type Rx", "Tone Rx")];
const TIMESLOT_FIELDS: [(&str, &str); 2] = [("TS Rx", "TS Rx ON"), ("TS Tx", "TS Tx ON")];
const APRS_TONE: &str = "AX25 QT/DQT";

fn label(value: Option<&Value>) -> Option<&'static str> {
    match value {
        Some(Value::Label(l)) => Some(*l),
        _ => None,
    }
}

fn is_simplex(record: &Record) -> bool {
    record.int("Rx Freq") == record.int("Tx Freq")
}

/// Decode-side rewrite of a raw channel record.
///
/// `flags` is the same channel window decoded with the timeslot flag
/// schema. Bad tone data is local corruption and resolves to `Off`.
pub fn resolve_channel(record: &mut Record, flags: &Record, diag: &mut Diagnostics, context: &str) {
    for (type_key, index_key) in TONE_FIELDS {
        let tone = resolve_channel_tone(record, type_key, index_key, diag, context);
        record.remove(type_key);
        record.set(index_key, Value::Tone(tone));
    }

    let simplex = is_simplex(record);
    for (nominal, flag) in TIMESLOT_FIELDS {
        let forced = label(flags.get(flag)) == Toggle::On.label();
        if simplex && forced {
            record.set(nominal, Value::Label("ON"));
        }
    }
}

fn resolve_channel_tone(
    record: &Record,
    type_key: &str,
    index_key: &str,
    diag: &mut Diagnostics,
    context: &str,
) -> Tone {
    let kind = match record.get(type_key) {
        Some(Value::Label(l)) => ToneType::from_label(l).and_then(|t| t.kind()),
        _ => None,
    };
    let Some(kind) = kind else {
        let shown = record.get(type_key).map(|v| v.to_string()).unwrap_or_default();
        diag.warn(context, format!("{}: {} is not a tone type, using Off", type_key, shown));
        return Tone::Off;
    };
    let index = record.int(index_key).unwrap_or(0);
    match usize::try_from(index)
        .ok()
        .and_then(|i| Tone::from_index(kind, i).ok())
    {
        Some(tone) => tone,
        None => {
            diag.warn(
                context,
                format!("{}: index {} is outside the tone table, using Off", index_key, index),
            );
            Tone::Off
        }
    }
}

/// Encode-side rewrite of a document channel record; returns the timeslot
/// flag record to encode over the same window.
pub fn unresolve_channel(record: &mut Record, diag: &mut Diagnostics, context: &str) -> Result<Record> {
    for (type_key, index_key) in TONE_FIELDS {
        let tone = match record.get(index_key) {
            Some(Value::Tone(t)) => *t,
            _ => {
                return Err(CodeplugError::TypeMismatch {
                    field: index_key.to_string(),
                    expected: "tone",
                })
            }
        };
        let index = tone.index().map_err(|_| CodeplugError::ToneNotEncodable {
            field: index_key.to_string(),
            tone: tone.to_string(),
        })?;
        let tone_type = ToneType::from(tone.kind());
        record.set(type_key, Value::Label(tone_type.label().unwrap_or("OFF")));
        record.set(index_key, Value::Int(index as i64));
    }

    let simplex = is_simplex(record);
    let mut flags = Record::new();
    for (nominal, flag) in TIMESLOT_FIELDS {
        let mut forced = Toggle::Off;
        if label(record.get(nominal)) == Timeslot::On.label() {
            if simplex {
                forced = Toggle::On;
            } else {
                diag.warn(
                    context,
                    format!("{}: ON needs equal Rx and Tx frequencies, stored as TS1", nominal),
                );
            }
            record.set(nominal, Value::Label("TS1"));
        }
        flags.push(flag, Value::Label(forced.label().unwrap_or("OFF")));
    }
    Ok(flags)
}

/// Decode-side rewrite of the APRS section's packed tone word
pub fn resolve_aprs(record: &mut Record, diag: &mut Diagnostics) {
    let raw = record.int(APRS_TONE).unwrap_or(0);
    let tone = match u16::try_from(raw).ok().map(Tone::from_packed) {
        Some(Ok(tone)) => tone,
        _ => {
            diag.warn("APRS", format!("{}: packed value {} is not a tone, using Off", APRS_TONE, raw));
            Tone::Off
        }
    };
    record.set(APRS_TONE, Value::Tone(tone));
}

/// Encode-side rewrite of the APRS section's tone into its packed word
pub fn unresolve_aprs(record: &mut Record) -> Result<()> {
    let tone = match record.get(APRS_TONE) {
        Some(Value::Tone(t)) => *t,
        _ => {
            return Err(CodeplugError::TypeMismatch {
                field: APRS_TONE.to_string(),
                expected: "tone",
            })
        }
    };
    let packed = tone.to_packed().map_err(|_| CodeplugError::ToneNotEncodable {
        field: APRS_TONE.to_string(),
        tone: tone.to_string(),
    })?;
    record.set(APRS_TONE, Value::Int(i64::from(packed)));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode, encode};
    use crate::codeplug::schemas::{CHANNEL, TIMESLOT_FLAGS};
    use crate::core::CHANNEL_RECORD_SIZE;
    use crate::diagnostics::Verbosity;

    fn raw_channel(rx: u32, tx: u32, byte_1d: u8) -> [u8; CHANNEL_RECORD_SIZE] {
        let mut window = [0u8; CHANNEL_RECORD_SIZE];
        window[0x0C..0x10].copy_from_slice(&rx.to_le_bytes());
        window[0x10..0x14].copy_from_slice(&tx.to_le_bytes());
        window[0x1D] = byte_1d;
        window
    }

    fn decode_channel(window: &[u8], diag: &mut Diagnostics) -> Record {
        let mut record = decode(CHANNEL, window, diag, "Channel").unwrap();
        let flags = decode(TIMESLOT_FLAGS, window, diag, "Channel").unwrap();
        resolve_channel(&mut record, &flags, diag, "Channel");
        record
    }

    #[test]
    fn test_ctcss_index_zero_is_first_tone() {
        let mut window = raw_channel(1, 1, 0x05);
        window[0x1A] = 0x04 | 0x01;
        window[0x1C] = 0;
        window[0x1B] = 9;
        let mut diag = Diagnostics::new(Verbosity::Quiet);
        let record = decode_channel(&window, &mut diag);
        assert_eq!(record.get("Tone Tx"), Some(&Value::Tone(Tone::Ctcss(625))));
        assert_eq!(record.get("Tone Rx"), Some(&Value::Tone(Tone::Ctcss(885))));
        assert!(record.get("Tone Type Tx").is_none());
        assert!(!diag.has_warnings());
    }

    #[test]
    fn test_channel_tone_round_trip() {
        let mut window = raw_channel(1, 1, 0x05);
        window[0x1A] = 0x0C | 0x02;
        window[0x1C] = 1;
        window[0x1B] = 107;
        let mut diag = Diagnostics::new(Verbosity::Quiet);
        let mut record = decode_channel(&window, &mut diag);
        assert_eq!(record.get("Tone Tx").unwrap().to_string(), "D023I");
        assert_eq!(record.get("Tone Rx").unwrap().to_string(), "D754N");

        let flags = unresolve_channel(&mut record, &mut diag, "Channel").unwrap();
        let mut out = [0u8; CHANNEL_RECORD_SIZE];
        encode(CHANNEL, &record, &mut out).unwrap();
        encode(TIMESLOT_FLAGS, &flags, &mut out).unwrap();
        assert_eq!(out, window);
    }

    #[test]
    fn test_bad_tone_index_is_local() {
        let mut window = raw_channel(1, 1, 0x05);
        window[0x1A] = 0x04;
        window[0x1C] = 200;
        let mut diag = Diagnostics::new(Verbosity::Quiet);
        let record = decode_channel(&window, &mut diag);
        assert_eq!(record.get("Tone Tx"), Some(&Value::Tone(Tone::Off)));
        assert_eq!(diag.warnings().len(), 1);
    }

    #[test]
    fn test_unknown_tone_rejected_on_encode() {
        let mut diag = Diagnostics::new(Verbosity::Quiet);
        let mut record = decode_channel(&raw_channel(1, 1, 0x05), &mut diag);
        record.set("Tone Tx", Value::Tone(Tone::Ctcss(886)));
        assert!(matches!(
            unresolve_channel(&mut record, &mut diag, "Channel"),
            Err(CodeplugError::ToneNotEncodable { .. })
        ));
    }

    #[test]
    fn test_timeslot_forced_on_needs_simplex() {
        let mut diag = Diagnostics::new(Verbosity::Quiet);

        // flags clear means forced on; TS Tx nominal bit says TS2
        let duplex = decode_channel(&raw_channel(43_000_000, 43_500_000, 0x02), &mut diag);
        assert_eq!(duplex.get("TS Rx"), Some(&Value::Label("TS1")));
        assert_eq!(duplex.get("TS Tx"), Some(&Value::Label("TS2")));

        let simplex = decode_channel(&raw_channel(43_000_000, 43_000_000, 0x02), &mut diag);
        assert_eq!(simplex.get("TS Rx"), Some(&Value::Label("ON")));
        assert_eq!(simplex.get("TS Tx"), Some(&Value::Label("ON")));

        let normal = decode_channel(&raw_channel(43_000_000, 43_000_000, 0x05), &mut diag);
        assert_eq!(normal.get("TS Rx"), Some(&Value::Label("TS1")));
        assert!(!diag.has_warnings());
    }

    #[test]
    fn test_timeslot_encode_mirror() {
        let mut diag = Diagnostics::new(Verbosity::Quiet);
        let mut record = decode_channel(&raw_channel(5, 5, 0x00), &mut diag);
        let flags = unresolve_channel(&mut record, &mut diag, "Channel").unwrap();
        assert_eq!(record.get("TS Rx"), Some(&Value::Label("TS1")));
        assert_eq!(flags.get("TS Rx ON"), Some(&Value::Label("ON")));
        assert_eq!(flags.get("TS Tx ON"), Some(&Value::Label("ON")));

        let mut record = decode_channel(&raw_channel(5, 5, 0x00), &mut diag);
        record.set("Tx Freq", Value::Int(6));
        let flags = unresolve_channel(&mut record, &mut diag, "Channel").unwrap();
        assert_eq!(flags.get("TS Rx ON"), Some(&Value::Label("OFF")));
        assert_eq!(flags.get("TS Tx ON"), Some(&Value::Label("OFF")));
        assert_eq!(diag.warnings().len(), 2);
    }

    #[test]
    fn test_aprs_packed_tone() {
        let mut diag = Diagnostics::new(Verbosity::Quiet);
        let mut record = Record::new();
        record.push(APRS_TONE, Value::Int(53));
        resolve_aprs(&mut record, &mut diag);
        assert_eq!(record.get(APRS_TONE).unwrap().to_string(), "D017N");
        unresolve_aprs(&mut record).unwrap();
        assert_eq!(record.int(APRS_TONE), Some(53));

        record.set(APRS_TONE, Value::Int(52));
        resolve_aprs(&mut record, &mut diag);
        assert_eq!(record.get(APRS_TONE), Some(&Value::Tone(Tone::Off)));
        assert_eq!(diag.warnings().len(), 1);

        record.set(APRS_TONE, Value::Tone("D754N".parse().unwrap()));
        assert!(matches!(
            unresolve_aprs(&mut record),
            Err(CodeplugError::ToneNotEncodable { .. })
        ));
    }
}
