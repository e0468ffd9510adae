// Tone values: CTCSS frequencies and DCS codes
// The image stores tones either as a (type, table index) pair or as a single
// packed 16-bit word; documents always carry the resolved value.

use super::constants::{ctcss_index, dcs_index, CTCSS_TONES, DCS_CODES};
use crate::bitwise::parser::{parse_tone, ToneSyntax, ToneSyntaxError};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ToneError {
    #[error(transparent)]
    Syntax(#[from] ToneSyntaxError),

    #[error("{0} Hz is not a CTCSS tone")]
    UnknownFrequency(String),

    #[error("D{0:03} is not a DCS code")]
    UnknownCode(u16),

    #[error("Index {index} is outside the {table} table")]
    IndexOutOfRange { table: &'static str, index: usize },

    #[error("Packed tone word {0} has no meaning")]
    InvalidPacked(u16),

    #[error("{0} cannot be stored in a packed tone word")]
    NotPackable(Tone),
}

pub type Result<T> = std::result::Result<T, ToneError>;

/// How a stored tone index is to be read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneKind {
    Off,
    Ctcss,
    Dcs,
    DcsInverted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Off,
    /// Frequency in tenths of a hertz, always a CTCSS table entry
    Ctcss(u16),
    /// Code from the DCS table, normal or inverted polarity
    Dcs { code: u16, inverted: bool },
}

// Packed word ranges
const PACKED_CTCSS_BASE: u16 = 1;
const PACKED_DCS_BASE: u16 = 53;
const PACKED_DCS_LAST: u16 = 158;
const PACKED_DCS_INV_BASE: u16 = 160;

impl Tone {
    /// Resolve a stored table index for the given tone type
    pub fn from_index(kind: ToneKind, index: usize) -> Result<Self> {
        match kind {
            ToneKind::Off => Ok(Tone::Off),
            ToneKind::Ctcss => CTCSS_TONES
                .get(index)
                .map(|&t| Tone::Ctcss(t))
                .ok_or(ToneError::IndexOutOfRange {
                    table: "CTCSS",
                    index,
                }),
            ToneKind::Dcs | ToneKind::DcsInverted => DCS_CODES
                .get(index)
                .map(|&code| Tone::Dcs {
                    code,
                    inverted: kind == ToneKind::DcsInverted,
                })
                .ok_or(ToneError::IndexOutOfRange { table: "DCS", index }),
        }
    }

    pub fn kind(&self) -> ToneKind {
        match self {
            Tone::Off => ToneKind::Off,
            Tone::Ctcss(_) => ToneKind::Ctcss,
            Tone::Dcs {
                inverted: false, ..
            } => ToneKind::Dcs,
            Tone::Dcs { inverted: true, .. } => ToneKind::DcsInverted,
        }
    }

    /// Table index to store alongside `kind()`; `Off` stores 0
    pub fn index(&self) -> Result<usize> {
        match *self {
            Tone::Off => Ok(0),
            Tone::Ctcss(t) => ctcss_index(t).ok_or_else(|| ToneError::UnknownFrequency(self.to_string())),
            Tone::Dcs { code, .. } => dcs_index(code).ok_or(ToneError::UnknownCode(code)),
        }
    }

    /// Decode the packed QT/DQT word used by the APRS settings
    pub fn from_packed(raw: u16) -> Result<Self> {
        let ctcss_last = PACKED_CTCSS_BASE + CTCSS_TONES.len() as u16 - 1;
        let dcs_inv_last = PACKED_DCS_INV_BASE + DCS_CODES.len() as u16 - 1;
        match raw {
            0 => Ok(Tone::Off),
            r if (PACKED_CTCSS_BASE..=ctcss_last).contains(&r) => {
                Self::from_index(ToneKind::Ctcss, (r - PACKED_CTCSS_BASE) as usize)
            }
            r if (PACKED_DCS_BASE..=PACKED_DCS_LAST).contains(&r) => {
                Self::from_index(ToneKind::Dcs, (r - PACKED_DCS_BASE) as usize)
            }
            r if (PACKED_DCS_INV_BASE..=dcs_inv_last).contains(&r) => {
                Self::from_index(ToneKind::DcsInverted, (r - PACKED_DCS_INV_BASE) as usize)
            }
            r => Err(ToneError::InvalidPacked(r)),
        }
    }

    /// Encode into the packed QT/DQT word
    pub fn to_packed(&self) -> Result<u16> {
        let index = self.index()? as u16;
        match self.kind() {
            ToneKind::Off => Ok(0),
            ToneKind::Ctcss => Ok(PACKED_CTCSS_BASE + index),
            ToneKind::Dcs if PACKED_DCS_BASE + index <= PACKED_DCS_LAST => {
                Ok(PACKED_DCS_BASE + index)
            }
            ToneKind::Dcs => Err(ToneError::NotPackable(*self)),
            ToneKind::DcsInverted => Ok(PACKED_DCS_INV_BASE + index),
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tone::Off => write!(f, "Off"),
            Tone::Ctcss(t) => write!(f, "{}.{}", t / 10, t % 10),
            Tone::Dcs { code, inverted } => {
                write!(f, "D{:03}{}", code, if *inverted { 'I' } else { 'N' })
            }
        }
    }
}

impl FromStr for Tone {
    type Err = ToneError;

    fn from_str(s: &str) -> Result<Self> {
        match parse_tone(s)? {
            ToneSyntax::Off => Ok(Tone::Off),
            ToneSyntax::Ctcss(t) => match ctcss_index(t) {
                Some(_) => Ok(Tone::Ctcss(t)),
                None => Err(ToneError::UnknownFrequency(s.trim().to_string())),
            },
            ToneSyntax::Dcs { code, inverted } => match dcs_index(code) {
                Some(_) => Ok(Tone::Dcs { code, inverted }),
                None => Err(ToneError::UnknownCode(code)),
            },
        }
    }
}

impl Serialize for Tone {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Tone {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}
