// Numeric transforms between a masked stored byte and its logical value

/// Invertible mapping applied to `MaskedNumber` fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    Identity,
    /// value = stored >> n
    Shift(u32),
    /// value = stored * scale + offset
    Affine { scale: i64, offset: i64 },
}

impl Transform {
    pub const fn affine(scale: i64, offset: i64) -> Self {
        Transform::Affine { scale, offset }
    }

    pub const fn scale(scale: i64) -> Self {
        Transform::Affine { scale, offset: 0 }
    }

    /// Logical value of a masked stored byte
    pub fn decode(&self, stored: u8) -> i64 {
        let stored = i64::from(stored);
        match *self {
            Transform::Identity => stored,
            Transform::Shift(n) => stored >> n,
            Transform::Affine { scale, offset } => stored * scale + offset,
        }
    }

    /// Stored form of `value`, or `None` when no integer stored form maps to it
    pub fn encode(&self, value: i64) -> Option<i64> {
        match *self {
            Transform::Identity => Some(value),
            Transform::Shift(n) => {
                if value < 0 {
                    return None;
                }
                let stored = value.checked_shl(n)?;
                (stored >> n == value).then_some(stored)
            }
            Transform::Affine { scale, offset } => {
                let shifted = value.checked_sub(offset)?;
                if scale == 0 || shifted % scale != 0 {
                    return None;
                }
                Some(shifted / scale)
            }
        }
    }

    /// True when every raw value reachable under `mask` survives decode then encode
    pub fn round_trips(&self, mask: u8) -> bool {
        (0..=u8::MAX)
            .map(|b| b & mask)
            .all(|raw| self.encode(self.decode(raw)) == Some(i64::from(raw)))
    }
}
