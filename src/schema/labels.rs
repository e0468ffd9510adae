// Typed views over schema records
// `label_enum!` declares a closed set of labels plus an `Unrecognized(raw)`
// catch-all; `record_struct!` declares a serde struct whose fields are the
// named keys of a decoded record.

use crate::codec::Record;
use crate::diagnostics::Diagnostics;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("{0:?} is not a valid choice")]
pub struct LabelError(pub String);

/// Parse the `Unrecognized(0xNN)` spelling used for corrupt values
pub fn parse_unrecognized(text: &str) -> Option<u8> {
    let hex = text
        .strip_prefix("Unrecognized(0x")?
        .strip_suffix(')')?;
    u8::from_str_radix(hex, 16).ok()
}

/// A section or record type built from named record keys
pub trait RecordStruct: Sized {
    /// Record keys, in schema order
    const KEYS: &'static [&'static str];

    /// Build from a decoded record; missing or mistyped keys become a
    /// warning and the field's default
    fn from_record(record: &Record, diag: &mut Diagnostics, context: &str) -> Self;

    fn to_record(&self) -> Record;
}

#[macro_export]
macro_rules! label_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $first:ident => $first_label:literal
            $(, $variant:ident => $label:literal)* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $first,
            $($variant,)*
            /// Masked raw value absent from the table
            Unrecognized(u8),
        }

        impl $name {
            pub const LABELS: &'static [&'static str] = &[$first_label $(, $label)*];

            pub fn label(&self) -> Option<&'static str> {
                match self {
                    $name::$first => Some($first_label),
                    $($name::$variant => Some($label),)*
                    $name::Unrecognized(_) => None,
                }
            }

            pub fn from_label(label: &str) -> Option<Self> {
                match label {
                    $first_label => Some($name::$first),
                    $($label => Some($name::$variant),)*
                    other => $crate::schema::labels::parse_unrecognized(other)
                        .map($name::Unrecognized),
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$first
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                match self {
                    $name::Unrecognized(raw) => write!(f, "Unrecognized({:#04x})", raw),
                    other => f.write_str(other.label().unwrap_or_default()),
                }
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::schema::LabelError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                Self::from_label(s).ok_or_else(|| $crate::schema::LabelError(s.to_string()))
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(
                &self,
                serializer: S,
            ) -> ::std::result::Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(
                deserializer: D,
            ) -> ::std::result::Result<Self, D::Error> {
                let text = String::deserialize(deserializer)?;
                text.parse().map_err(::serde::de::Error::custom)
            }
        }

        impl $crate::codec::FieldValue for $name {
            const KIND: &'static str = "label";

            fn from_value(value: &$crate::codec::Value) -> Option<Self> {
                match value {
                    $crate::codec::Value::Label(label) => Self::from_label(label),
                    $crate::codec::Value::Unrecognized(raw) => Some($name::Unrecognized(*raw)),
                    _ => None,
                }
            }

            fn to_value(&self) -> $crate::codec::Value {
                match self {
                    $name::$first => $crate::codec::Value::Label($first_label),
                    $($name::$variant => $crate::codec::Value::Label($label),)*
                    $name::Unrecognized(raw) => $crate::codec::Value::Unrecognized(*raw),
                }
            }
        }
    };
}

#[macro_export]
macro_rules! record_struct {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $($key:literal => $field:ident: $ty:ty),+ $(,)?
        }
        $(nested {
            $($(#[$nmeta:meta])* $nfield:ident: $nty:ty),+ $(,)?
        })?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Default, ::serde::Serialize, ::serde::Deserialize)]
        $vis struct $name {
            $(
                #[serde(rename = $key)]
                pub $field: $ty,
            )+
            $($(
                $(#[$nmeta])*
                pub $nfield: $nty,
            )+)?
        }

        impl $crate::schema::RecordStruct for $name {
            const KEYS: &'static [&'static str] = &[$($key),+];

            fn from_record(
                record: &$crate::codec::Record,
                diag: &mut $crate::diagnostics::Diagnostics,
                context: &str,
            ) -> Self {
                Self {
                    $($field: $crate::codec::take_field(record, $key, diag, context),)+
                    $($($nfield: Default::default(),)+)?
                }
            }

            fn to_record(&self) -> $crate::codec::Record {
                let mut record = $crate::codec::Record::new();
                $(record.push($key, $crate::codec::FieldValue::to_value(&self.$field));)+
                record
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{FieldValue, Value};
    use crate::diagnostics::Verbosity;

    crate::label_enum! {
        enum Power {
            Low => "LOW",
            High => "HIGH",
        }
    }

    crate::record_struct! {
        struct Sample {
            "Name" => name: String,
            "Tx Power" => power: Power,
            "ID" => id: u16,
        }
        nested {
            #[serde(rename = "Members")]
            members: Vec<u16>,
        }
    }

    #[test]
    fn test_label_enum() {
        assert_eq!(Power::default(), Power::Low);
        assert_eq!(Power::LABELS, &["LOW", "HIGH"]);
        assert_eq!("HIGH".parse::<Power>().unwrap(), Power::High);
        assert_eq!(
            "high".parse::<Power>(),
            Err(LabelError("high".to_string()))
        );
        assert_eq!(Power::Unrecognized(0x07).to_string(), "Unrecognized(0x07)");
        assert_eq!(
            "Unrecognized(0x07)".parse::<Power>().unwrap(),
            Power::Unrecognized(0x07)
        );
    }

    #[test]
    fn test_label_serde() {
        assert_eq!(serde_json::to_string(&Power::High).unwrap(), "\"HIGH\"");
        let p: Power = serde_json::from_str("\"Unrecognized(0x40)\"").unwrap();
        assert_eq!(p, Power::Unrecognized(0x40));
        assert!(serde_json::from_str::<Power>("\"MEDIUM\"").is_err());
    }

    #[test]
    fn test_label_field_value() {
        assert_eq!(Power::High.to_value(), Value::Label("HIGH"));
        assert_eq!(Power::from_value(&Value::Unrecognized(3)), Some(Power::Unrecognized(3)));
        assert_eq!(Power::from_value(&Value::Int(1)), None);
    }

    #[test]
    fn test_record_struct_round_trip() {
        let sample = Sample {
            name: "Local".to_string(),
            power: Power::High,
            id: 7,
            members: vec![1, 2],
        };
        let record = sample.to_record();
        assert_eq!(record.keys().collect::<Vec<_>>(), Sample::KEYS);

        let mut diag = Diagnostics::new(Verbosity::Quiet);
        let back = Sample::from_record(&record, &mut diag, "Sample");
        assert_eq!(back.name, "Local");
        assert_eq!(back.power, Power::High);
        assert_eq!(back.id, 7);
        assert!(back.members.is_empty());
        assert!(!diag.has_warnings());

        let json = serde_json::to_value(&sample).unwrap();
        assert_eq!(json["Tx Power"], "HIGH");
        assert_eq!(json["Members"][1], 2);
    }

    #[test]
    fn test_record_struct_missing_key_warns() {
        let mut record = Record::new();
        record.push("Name", Value::Text("X".to_string()));
        record.push("ID", Value::Text("not a number".to_string()));

        let mut diag = Diagnostics::new(Verbosity::Quiet);
        let s = Sample::from_record(&record, &mut diag, "Sample");
        assert_eq!(s.power, Power::Low);
        assert_eq!(s.id, 0);
        assert_eq!(diag.warnings().len(), 2);
    }
}
