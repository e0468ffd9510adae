// Record Codec
// Generic decode/encode of one byte window against a schema. Encoding ORs
// into a pre-zeroed window, so fields sharing a byte compose in any order.

pub mod record;

pub use record::{take_field, FieldValue, Record, Value};

use crate::bitwise::{decode_ascii, encode_ascii, or_into, read_uint_le, uint_le_bytes};
use crate::diagnostics::Diagnostics;
use crate::error::{CodeplugError, Result};
use crate::schema::{lookup_label, lookup_raw, Field, FieldDef, Schema};

fn window_at(window: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    window
        .get(offset..offset + len)
        .ok_or(CodeplugError::Truncated {
            offset,
            len,
            size: window.len(),
        })
}

fn window_at_mut(window: &mut [u8], offset: usize, len: usize) -> Result<&mut [u8]> {
    let size = window.len();
    window
        .get_mut(offset..offset + len)
        .ok_or(CodeplugError::Truncated { offset, len, size })
}

/// Decode every field of `schema` from `window`.
///
/// Unreadable text and bitmask values missing from their table are reported
/// to `diag` and replaced by an empty string / `Value::Unrecognized`; only a
/// window too short for the schema is an error.
pub fn decode(
    schema: Schema,
    window: &[u8],
    diag: &mut Diagnostics,
    context: &str,
) -> Result<Record> {
    let mut record = Record::new();
    for def in schema {
        let value = decode_field(def, window, diag, context)?;
        diag.field(format_args!("{} {} = {}", context, def.name, value));
        record.push(def.name, value);
    }
    Ok(record)
}

fn decode_field(
    def: &FieldDef,
    window: &[u8],
    diag: &mut Diagnostics,
    context: &str,
) -> Result<Value> {
    let value = match def.field {
        Field::Text { offset, len } => match decode_ascii(window_at(window, offset, len)?) {
            Some(text) => Value::Text(text),
            None => {
                diag.warn(context, format!("{}: text is not ASCII, cleared", def.name));
                Value::Text(String::new())
            }
        },
        Field::Number { offset, width } => {
            Value::Int(i64::from(read_uint_le(window_at(window, offset, width)?, width)?))
        }
        Field::Bitmask {
            offset,
            mask,
            table,
        } => {
            let raw = window_at(window, offset, 1)?[0] & mask;
            match lookup_label(table, raw) {
                Some(label) => Value::Label(label),
                None => {
                    diag.warn(
                        context,
                        format!("{}: unrecognized value {:#04x}", def.name, raw),
                    );
                    Value::Unrecognized(raw)
                }
            }
        }
        Field::MaskedNumber {
            offset,
            mask,
            transform,
        } => Value::Int(transform.decode(window_at(window, offset, 1)?[0] & mask)),
    };
    Ok(value)
}

/// Encode every field of `schema` from `record` into `window`
pub fn encode(schema: Schema, record: &Record, window: &mut [u8]) -> Result<()> {
    for def in schema {
        let value = record.get(def.name).ok_or_else(|| CodeplugError::MissingField {
            field: def.name.to_string(),
        })?;
        encode_field(def, value, window)?;
    }
    Ok(())
}

fn mismatch(def: &FieldDef, expected: &'static str) -> CodeplugError {
    CodeplugError::TypeMismatch {
        field: def.name.to_string(),
        expected,
    }
}

fn encode_field(def: &FieldDef, value: &Value, window: &mut [u8]) -> Result<()> {
    let field = def.name.to_string();
    match def.field {
        Field::Text { offset, len } => {
            let Value::Text(text) = value else {
                return Err(mismatch(def, "text"));
            };
            let bytes = encode_ascii(text).ok_or_else(|| CodeplugError::InvalidText {
                field: field.clone(),
                text: text.clone(),
            })?;
            if bytes.len() > len {
                return Err(CodeplugError::TextTooLong {
                    field,
                    len: bytes.len(),
                    max: len,
                });
            }
            or_into(window_at_mut(window, offset, len)?, bytes)?;
        }
        Field::Number { offset, width } => {
            let Value::Int(n) = *value else {
                return Err(mismatch(def, "number"));
            };
            let out_of_range = || CodeplugError::ValueOutOfRange {
                field: field.clone(),
                value: n,
                bits: width as u32 * 8,
            };
            let unsigned = u64::try_from(n).map_err(|_| out_of_range())?;
            let bytes = uint_le_bytes(unsigned, width).map_err(|_| out_of_range())?;
            or_into(window_at_mut(window, offset, width)?, &bytes)?;
        }
        Field::Bitmask {
            offset,
            mask,
            table,
        } => {
            let raw = match value {
                Value::Label(label) => lookup_raw(table, label),
                Value::Unrecognized(raw) => Some(*raw),
                _ => return Err(mismatch(def, "label")),
            };
            let raw = raw.ok_or_else(|| CodeplugError::UnknownLabel {
                field,
                label: value.to_string(),
            })?;
            or_into(window_at_mut(window, offset, 1)?, &[raw & mask])?;
        }
        Field::MaskedNumber {
            offset,
            mask,
            transform,
        } => {
            let Value::Int(n) = *value else {
                return Err(mismatch(def, "number"));
            };
            let stored = transform
                .encode(n)
                .ok_or_else(|| CodeplugError::NotRepresentable {
                    field: field.clone(),
                    value: n,
                })?;
            let byte = u8::try_from(stored)
                .ok()
                .filter(|b| b & !mask == 0)
                .ok_or(CodeplugError::ValueOutOfRange {
                    field,
                    value: n,
                    bits: mask.count_ones(),
                })?;
            or_into(window_at_mut(window, offset, 1)?, &[byte])?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Verbosity;
    use crate::schema::{def, Transform};

    const CHANNELISH: &[FieldDef] = &[
        def("Name", Field::text(0x00, 6)),
        def("Freq", Field::number(0x06, 4)),
        def("Power", Field::bitmask(0x0A, 0x20, &[(0x00, "LOW"), (0x20, "HIGH")])),
        def("Type", Field::bitmask(0x0A, 0xC0, &[(0x00, "ANALOG"), (0x40, "DIGITAL")])),
        def("RX CC", Field::masked(0x0B, 0x0F)),
        def("TX CC", Field::masked_with(0x0B, 0xF0, Transform::Shift(4))),
        def("Hang", Field::masked_with(0x0C, 0x0F, Transform::scale(500))),
    ];

    fn sample() -> Record {
        let mut r = Record::new();
        r.push("Name", Value::Text("RPT1".to_string()));
        r.push("Freq", Value::Int(43_912_500));
        r.push("Power", Value::Label("HIGH"));
        r.push("Type", Value::Label("DIGITAL"));
        r.push("RX CC", Value::Int(1));
        r.push("TX CC", Value::Int(12));
        r.push("Hang", Value::Int(1500));
        r
    }

    #[test]
    fn test_encode_then_decode() {
        let mut window = [0u8; 13];
        encode(CHANNELISH, &sample(), &mut window).unwrap();
        assert_eq!(&window[..6], b"RPT1\0\0");
        assert_eq!(window[0x0A], 0x60);
        assert_eq!(window[0x0B], 0xC1);
        assert_eq!(window[0x0C], 0x03);

        let mut diag = Diagnostics::new(Verbosity::Quiet);
        let decoded = decode(CHANNELISH, &window, &mut diag, "Channel").unwrap();
        assert_eq!(decoded, sample());
        assert!(!diag.has_warnings());
    }

    #[test]
    fn test_shared_byte_order_independent() {
        let mut reversed = Record::new();
        for key in ["Hang", "TX CC", "RX CC", "Type", "Power", "Freq", "Name"] {
            reversed.push(key, sample().get(key).cloned().unwrap());
        }
        let mut a = [0u8; 13];
        let mut b = [0u8; 13];
        encode(CHANNELISH, &sample(), &mut a).unwrap();
        for d in CHANNELISH.iter().rev() {
            encode(std::slice::from_ref(d), &reversed, &mut b).unwrap();
        }
        assert_eq!(a, b);
    }

    #[test]
    fn test_unrecognized_bitmask_survives() {
        let mut window = [0u8; 13];
        window[0x0A] = 0x80;
        let mut diag = Diagnostics::new(Verbosity::Quiet);
        let decoded = decode(CHANNELISH, &window, &mut diag, "Channel").unwrap();
        assert_eq!(decoded.get("Type"), Some(&Value::Unrecognized(0x80)));
        assert_eq!(diag.warnings().len(), 1);
        assert_eq!(diag.warnings()[0].message, "Type: unrecognized value 0x80");

        let mut out = [0u8; 13];
        encode(CHANNELISH, &decoded, &mut out).unwrap();
        assert_eq!(out, window);
    }

    #[test]
    fn test_bad_text_is_local() {
        let mut window = [0u8; 13];
        window[0] = 0xC3;
        window[6] = 0x01;
        let mut diag = Diagnostics::new(Verbosity::Quiet);
        let decoded = decode(CHANNELISH, &window, &mut diag, "Channel").unwrap();
        assert_eq!(decoded.get("Name"), Some(&Value::Text(String::new())));
        assert_eq!(decoded.int("Freq"), Some(1));
        assert!(diag.has_warnings());
    }

    #[test]
    fn test_short_window_is_fatal() {
        let mut diag = Diagnostics::new(Verbosity::Quiet);
        let err = decode(CHANNELISH, &[0u8; 8], &mut diag, "Channel").unwrap_err();
        assert!(matches!(err, CodeplugError::Truncated { offset: 6, len: 4, size: 8 }));
    }

    #[test]
    fn test_encode_failures() {
        let mut window = [0u8; 13];
        let mut r = sample();
        r.set("Name", Value::Text("TOOLONG".to_string()));
        assert!(matches!(
            encode(CHANNELISH, &r, &mut window),
            Err(CodeplugError::TextTooLong { len: 7, max: 6, .. })
        ));

        let mut r = sample();
        r.set("Name", Value::Text("Café".to_string()));
        assert!(matches!(
            encode(CHANNELISH, &r, &mut window),
            Err(CodeplugError::InvalidText { .. })
        ));

        let mut r = sample();
        r.set("Freq", Value::Int(-1));
        assert!(matches!(
            encode(CHANNELISH, &r, &mut window),
            Err(CodeplugError::ValueOutOfRange { bits: 32, .. })
        ));

        let mut r = sample();
        r.set("Power", Value::Label("MEDIUM"));
        assert!(matches!(
            encode(CHANNELISH, &r, &mut window),
            Err(CodeplugError::UnknownLabel { .. })
        ));

        let mut r = sample();
        r.set("TX CC", Value::Int(16));
        assert!(matches!(
            encode(CHANNELISH, &r, &mut window),
            Err(CodeplugError::ValueOutOfRange { bits: 4, .. })
        ));

        let mut r = sample();
        r.set("Hang", Value::Int(1200));
        assert!(matches!(
            encode(CHANNELISH, &r, &mut window),
            Err(CodeplugError::NotRepresentable { value: 1200, .. })
        ));

        let mut r = sample();
        r.remove("RX CC");
        let err = encode(CHANNELISH, &r, &mut window).unwrap_err();
        assert!(err.is_internal());

        let mut r = sample();
        r.set("RX CC", Value::Label("On"));
        assert!(matches!(
            encode(CHANNELISH, &r, &mut window),
            Err(CodeplugError::TypeMismatch { expected: "number", .. })
        ));
    }
}
