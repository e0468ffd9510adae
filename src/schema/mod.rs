// Field Schema Model
// Declarative description of where each named attribute lives in a record.
// Pure data: behavior lives in `codec`.

pub mod labels;
pub mod transform;

pub use labels::{LabelError, RecordStruct};
pub use transform::Transform;

/// Raw masked value to label, both directions
pub type EnumTable = &'static [(u8, &'static str)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Fixed-width ASCII, trailing NUL padded
    Text { offset: usize, len: usize },
    /// Little-endian unsigned integer, 1 to 4 bytes
    Number { offset: usize, width: usize },
    /// One byte, masked, then looked up in `table`
    Bitmask {
        offset: usize,
        mask: u8,
        table: EnumTable,
    },
    /// One byte, masked, then passed through `transform`
    MaskedNumber {
        offset: usize,
        mask: u8,
        transform: Transform,
    },
}

impl Field {
    pub const fn text(offset: usize, len: usize) -> Self {
        Field::Text { offset, len }
    }

    pub const fn number(offset: usize, width: usize) -> Self {
        Field::Number { offset, width }
    }

    pub const fn bitmask(offset: usize, mask: u8, table: EnumTable) -> Self {
        Field::Bitmask {
            offset,
            mask,
            table,
        }
    }

    pub const fn masked(offset: usize, mask: u8) -> Self {
        Field::MaskedNumber {
            offset,
            mask,
            transform: Transform::Identity,
        }
    }

    pub const fn masked_with(offset: usize, mask: u8, transform: Transform) -> Self {
        Field::MaskedNumber {
            offset,
            mask,
            transform,
        }
    }

    pub fn offset(&self) -> usize {
        match *self {
            Field::Text { offset, .. }
            | Field::Number { offset, .. }
            | Field::Bitmask { offset, .. }
            | Field::MaskedNumber { offset, .. } => offset,
        }
    }

    /// Number of bytes the field touches
    pub fn span(&self) -> usize {
        match *self {
            Field::Text { len, .. } => len,
            Field::Number { width, .. } => width,
            Field::Bitmask { .. } | Field::MaskedNumber { .. } => 1,
        }
    }

    /// Bits used in the byte at `offset + i`, for overlap checks
    pub fn bits_at(&self, i: usize) -> u8 {
        if i >= self.span() {
            return 0;
        }
        match *self {
            Field::Text { .. } | Field::Number { .. } => 0xFF,
            Field::Bitmask { mask, .. } | Field::MaskedNumber { mask, .. } => mask,
        }
    }
}

/// A named field of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub field: Field,
}

pub const fn def(name: &'static str, field: Field) -> FieldDef {
    FieldDef { name, field }
}

/// Ordered fields of one record kind
pub type Schema = &'static [FieldDef];

pub fn lookup_label(table: EnumTable, raw: u8) -> Option<&'static str> {
    table.iter().find(|(r, _)| *r == raw).map(|(_, l)| *l)
}

pub fn lookup_raw(table: EnumTable, label: &str) -> Option<u8> {
    table.iter().find(|(_, l)| *l == label).map(|(r, _)| *r)
}

/// Bytes from the record start to the end of its last field
pub fn extent(schema: &[FieldDef]) -> usize {
    schema
        .iter()
        .map(|d| d.field.offset() + d.field.span())
        .max()
        .unwrap_or(0)
}

/// Definition problems: bad widths, table values outside their mask,
/// transforms that do not invert
pub fn problems(schema: &[FieldDef]) -> Vec<String> {
    let mut found = Vec::new();
    for d in schema {
        match d.field {
            Field::Number { width, .. } if !(1..=4).contains(&width) => {
                found.push(format!("{}: width {} outside 1..=4", d.name, width));
            }
            Field::Bitmask { mask, table, .. } => {
                for (raw, label) in table {
                    if raw & !mask != 0 {
                        found.push(format!(
                            "{}: {:?} = {:#04x} outside mask {:#04x}",
                            d.name, label, raw, mask
                        ));
                    }
                }
                for (i, (raw, _)) in table.iter().enumerate() {
                    if table[..i].iter().any(|(r, _)| r == raw) {
                        found.push(format!("{}: duplicate raw value {:#04x}", d.name, raw));
                    }
                }
            }
            Field::MaskedNumber {
                mask, transform, ..
            } if !transform.round_trips(mask) => {
                found.push(format!("{}: {:?} does not invert under mask {:#04x}", d.name, transform, mask));
            }
            _ => {}
        }
    }
    found
}

/// Pairs of fields that claim the same bits
pub fn overlaps(schema: &[FieldDef]) -> Vec<(&'static str, &'static str)> {
    let mut found = Vec::new();
    for (i, a) in schema.iter().enumerate() {
        for b in &schema[i + 1..] {
            let start = a.field.offset().max(b.field.offset());
            let end = (a.field.offset() + a.field.span()).min(b.field.offset() + b.field.span());
            let clash = (start..end).any(|addr| {
                a.field.bits_at(addr - a.field.offset()) & b.field.bits_at(addr - b.field.offset())
                    != 0
            });
            if clash {
                found.push((a.name, b.name));
            }
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &[FieldDef] = &[
        def("Name", Field::text(0x00, 10)),
        def("ID", Field::number(0x0A, 2)),
        def("Power", Field::bitmask(0x0C, 0x20, &[(0x00, "LOW"), (0x20, "HIGH")])),
        def("Level", Field::masked_with(0x0C, 0xF0 & !0x20, Transform::Shift(4))),
    ];

    const BROKEN: &[FieldDef] = &[
        def("Wide", Field::number(0x00, 5)),
        def("Mode", Field::bitmask(0x05, 0x01, &[(0x00, "A"), (0x02, "B"), (0x00, "C")])),
        def("Odd", Field::masked_with(0x05, 0x0F, Transform::Shift(2))),
    ];

    #[test]
    fn test_lookup() {
        let table: EnumTable = &[(0x00, "Off"), (0x80, "On")];
        assert_eq!(lookup_label(table, 0x80), Some("On"));
        assert_eq!(lookup_label(table, 0x40), None);
        assert_eq!(lookup_raw(table, "Off"), Some(0x00));
        assert_eq!(lookup_raw(table, "on"), None);
    }

    #[test]
    fn test_extent_and_span() {
        assert_eq!(extent(SAMPLE), 0x0D);
        assert_eq!(SAMPLE[0].field.span(), 10);
        assert_eq!(SAMPLE[2].field.bits_at(0), 0x20);
        assert_eq!(SAMPLE[2].field.bits_at(1), 0);
    }

    #[test]
    fn test_problems() {
        assert!(problems(SAMPLE).is_empty());
        let found = problems(BROKEN);
        assert_eq!(found.len(), 4, "{:?}", found);
    }

    #[test]
    fn test_overlaps() {
        assert!(overlaps(SAMPLE).is_empty());
        assert_eq!(overlaps(BROKEN), vec![("Mode", "Odd")]);
    }
}
