// Decoded record: ordered field name to value pairs

use crate::core::Tone;
use crate::diagnostics::Diagnostics;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Int(i64),
    Label(&'static str),
    /// Masked raw bits that matched no table entry
    Unrecognized(u8),
    Tone(Tone),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{:?}", s),
            Value::Int(n) => write!(f, "{}", n),
            Value::Label(l) => f.write_str(l),
            Value::Unrecognized(raw) => write!(f, "Unrecognized({:#04x})", raw),
            Value::Tone(t) => write!(f, "{}", t),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    entries: Vec<(&'static str, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &'static str, value: Value) {
        self.entries.push((key, value));
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// Replace the value under `key`, appending it if absent
    pub fn set(&mut self, key: &'static str, value: Value) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let pos = self.entries.iter().position(|(k, _)| *k == key)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn int(&self, key: &str) -> Option<i64> {
        match self.get(key)? {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Conversion between a typed struct field and a record value
pub trait FieldValue: Sized {
    /// Name used in diagnostics
    const KIND: &'static str;

    fn from_value(value: &Value) -> Option<Self>;
    fn to_value(&self) -> Value;
}

impl FieldValue for String {
    const KIND: &'static str = "text";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(s) => Some(s.clone()),
            _ => None,
        }
    }

    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl FieldValue for Tone {
    const KIND: &'static str = "tone";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Tone(t) => Some(*t),
            _ => None,
        }
    }

    fn to_value(&self) -> Value {
        Value::Tone(*self)
    }
}

macro_rules! int_field_value {
    ($($ty:ty),+) => {
        $(
            impl FieldValue for $ty {
                const KIND: &'static str = "number";

                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::Int(n) => <$ty>::try_from(*n).ok(),
                        _ => None,
                    }
                }

                fn to_value(&self) -> Value {
                    Value::Int(i64::from(*self))
                }
            }
        )+
    };
}

int_field_value!(u8, u16, u32, i16, i32, i64);

/// Typed value under `key`, or the default with a warning
pub fn take_field<T: FieldValue + Default>(
    record: &Record,
    key: &str,
    diag: &mut Diagnostics,
    context: &str,
) -> T {
    match record.get(key) {
        Some(value) => T::from_value(value).unwrap_or_else(|| {
            diag.warn(
                context,
                format!("{}: {} does not fit a {} field", key, value, T::KIND),
            );
            T::default()
        }),
        None => {
            diag.warn(context, format!("{}: missing", key));
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Verbosity;

    #[test]
    fn test_record_access() {
        let mut record = Record::new();
        record.push("Name", Value::Text("Home".to_string()));
        record.push("ID", Value::Int(3));
        assert_eq!(record.int("ID"), Some(3));
        assert_eq!(record.int("Name"), None);

        record.set("ID", Value::Int(4));
        record.set("Extra", Value::Label("On"));
        assert_eq!(record.keys().collect::<Vec<_>>(), ["Name", "ID", "Extra"]);
        assert_eq!(record.remove("Name"), Some(Value::Text("Home".to_string())));
        assert_eq!(record.len(), 2);
        assert!(record.remove("Name").is_none());
    }

    #[test]
    fn test_int_conversion_is_checked() {
        assert_eq!(u8::from_value(&Value::Int(255)), Some(255));
        assert_eq!(u8::from_value(&Value::Int(256)), None);
        assert_eq!(u16::from_value(&Value::Int(-1)), None);
        assert_eq!(i32::from_value(&Value::Int(-345)), Some(-345));
        assert_eq!(7u32.to_value(), Value::Int(7));
    }

    #[test]
    fn test_take_field_defaults() {
        let mut record = Record::new();
        record.push("ID", Value::Int(70_000));
        let mut diag = Diagnostics::new(Verbosity::Quiet);

        let id: u16 = take_field(&record, "ID", &mut diag, "Zone");
        let name: String = take_field(&record, "Name", &mut diag, "Zone");
        assert_eq!(id, 0);
        assert_eq!(name, "");
        assert_eq!(diag.warnings()[0].message, "ID: 70000 does not fit a number field");
        assert_eq!(diag.warnings()[1].message, "Name: missing");
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Text("A".to_string()).to_string(), "\"A\"");
        assert_eq!(Value::Unrecognized(0x0B).to_string(), "Unrecognized(0x0b)");
        assert_eq!(Value::Tone(Tone::Ctcss(885)).to_string(), "88.5");
    }
}
