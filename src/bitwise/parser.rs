// Parser combinators using nom for textual tone values
// Accepted forms: "Off", CTCSS frequencies such as "88.5" or "100",
// and DCS codes such as "D023N" / "D754I".

use nom::{
    branch::alt,
    bytes::complete::tag_no_case,
    character::complete::{char, digit1, one_of},
    combinator::{all_consuming, map, map_res, opt, value},
    sequence::preceded,
    IResult, Parser,
};
use thiserror::Error;

/// Tone as written, before it is checked against the reference tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneSyntax {
    Off,
    /// Frequency in tenths of a hertz
    Ctcss(u16),
    Dcs { code: u16, inverted: bool },
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Cannot parse tone {0:?}")]
pub struct ToneSyntaxError(pub String);

fn off(input: &str) -> IResult<&str, ToneSyntax> {
    value(ToneSyntax::Off, tag_no_case("off")).parse(input)
}

fn dcs(input: &str) -> IResult<&str, ToneSyntax> {
    map(
        (
            tag_no_case("d"),
            map_res(digit1, |s: &str| s.parse::<u16>()),
            one_of("NnIi"),
        ),
        |(_, code, polarity)| ToneSyntax::Dcs {
            code,
            inverted: matches!(polarity, 'I' | 'i'),
        },
    )
    .parse(input)
}

fn decihertz(whole: &str, frac: Option<&str>) -> Option<u16> {
    let whole: u16 = whole.parse().ok()?;
    let tenths = match frac {
        None => 0,
        Some(d) if d.len() == 1 => d.parse::<u16>().ok()?,
        Some(_) => return None,
    };
    whole.checked_mul(10)?.checked_add(tenths)
}

fn ctcss(input: &str) -> IResult<&str, ToneSyntax> {
    map_res(
        (digit1, opt(preceded(char('.'), digit1))),
        |(whole, frac): (&str, Option<&str>)| {
            decihertz(whole, frac)
                .map(ToneSyntax::Ctcss)
                .ok_or("frequency needs at most one decimal place")
        },
    )
    .parse(input)
}

/// Parse a complete tone string, ignoring surrounding whitespace
pub fn parse_tone(text: &str) -> Result<ToneSyntax, ToneSyntaxError> {
    all_consuming(alt((off, dcs, ctcss)))
        .parse(text.trim())
        .map(|(_, tone)| tone)
        .map_err(|_| ToneSyntaxError(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_off() {
        assert_eq!(parse_tone("Off"), Ok(ToneSyntax::Off));
        assert_eq!(parse_tone(" OFF "), Ok(ToneSyntax::Off));
    }

    #[test]
    fn test_parse_ctcss() {
        assert_eq!(parse_tone("88.5"), Ok(ToneSyntax::Ctcss(885)));
        assert_eq!(parse_tone("100"), Ok(ToneSyntax::Ctcss(1000)));
        assert_eq!(parse_tone("254.1"), Ok(ToneSyntax::Ctcss(2541)));
        assert!(parse_tone("88.50").is_err());
        assert!(parse_tone("88.").is_err());
    }

    #[test]
    fn test_parse_dcs() {
        assert_eq!(
            parse_tone("D023N"),
            Ok(ToneSyntax::Dcs {
                code: 23,
                inverted: false
            })
        );
        assert_eq!(
            parse_tone("d754i"),
            Ok(ToneSyntax::Dcs {
                code: 754,
                inverted: true
            })
        );
        assert!(parse_tone("D023").is_err());
        assert!(parse_tone("D023X").is_err());
    }

    #[test]
    fn test_parse_garbage() {
        assert_eq!(
            parse_tone("tone"),
            Err(ToneSyntaxError("tone".to_string()))
        );
        assert!(parse_tone("").is_err());
        assert!(parse_tone("88.5Hz").is_err());
    }
}
