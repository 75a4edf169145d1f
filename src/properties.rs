use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::CodecError;

/// The config artifact: image dimensions plus the codeword table, persisted
/// as text. The first three lines are width, height and channel count; every
/// following line is a `<symbol> <codeword>` pair.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Properties {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
    pub codes: BTreeMap<u8, String>,
}

impl Properties {
    pub fn num_samples(&self) -> usize {
        self.width * self.height * self.channels
    }
}

impl From<&Properties> for String {
    fn from(val: &Properties) -> Self {
        let mut s = String::new();

        s.push_str(&format!("{}\n", val.width));
        s.push_str(&format!("{}\n", val.height));
        s.push_str(&format!("{}\n", val.channels));

        for (symbol, code) in val.codes.iter() {
            s.push_str(&format!("{symbol} {code}\n"));
        }

        s
    }
}

fn parse_dimension(line: Option<&str>, name: &str, number: usize) -> Result<usize, CodecError> {
    let line = line.ok_or_else(|| CodecError::ConfigFormat {
        message: format!("missing {name} on line {number}"),
    })?;

    line.trim().parse().map_err(|_| CodecError::ConfigFormat {
        message: format!("line {number}: {name} is not an integer: {line:?}"),
    })
}

impl FromStr for Properties {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s.lines();

        let width = parse_dimension(lines.next(), "width", 1)?;
        let height = parse_dimension(lines.next(), "height", 2)?;
        let channels = parse_dimension(lines.next(), "channel count", 3)?;

        let mut codes = BTreeMap::new();
        for (offset, line) in lines.enumerate() {
            let number = offset + 4;

            // Lines without a symbol and a codeword, such as the trailing
            // empty line, are skipped.
            let Some((symbol, code)) = line.split_once(' ') else {
                continue;
            };

            let symbol: u8 = symbol.parse().map_err(|_| CodecError::ConfigFormat {
                message: format!("line {number}: symbol is not a byte value: {symbol:?}"),
            })?;

            if code.is_empty() || code.bytes().any(|b| b != b'0' && b != b'1') {
                return Err(CodecError::ConfigFormat {
                    message: format!(
                        "line {number}: codeword of symbol {symbol} is not binary: {code:?}"
                    ),
                });
            }

            codes.insert(symbol, code.to_string());
        }

        Ok(Properties { width, height, channels, codes })
    }
}

#[test]
fn test_serialize_parse_roundtrip() {
    let mut codes = BTreeMap::new();
    codes.insert(0u8, "1".to_string());
    codes.insert(255u8, "01".to_string());
    codes.insert(17u8, "00".to_string());

    let properties = Properties { width: 640, height: 480, channels: 3, codes };
    let text = String::from(&properties);

    assert_eq!(text, "640\n480\n3\n0 1\n17 00\n255 01\n");
    assert_eq!(text.parse::<Properties>().unwrap(), properties);
}

#[test]
fn test_parse_rejects_short_config() {
    let result = "640\n480\n".parse::<Properties>();

    assert!(matches!(result, Err(CodecError::ConfigFormat { .. })));
}

#[test]
fn test_parse_rejects_non_integer_dimension() {
    let result = "640\nwide\n3\n".parse::<Properties>();

    assert!(matches!(result, Err(CodecError::ConfigFormat { .. })));
}

#[test]
fn test_parse_skips_single_token_lines() {
    let properties = "2\n2\n1\n0 1\nstray\n1 0\n".parse::<Properties>().unwrap();

    assert_eq!(properties.codes.len(), 2);
    assert_eq!(properties.codes[&0], "1");
    assert_eq!(properties.codes[&1], "0");
}

#[test]
fn test_parse_rejects_bad_symbol() {
    let result = "2\n2\n1\n300 1\n".parse::<Properties>();

    assert!(matches!(result, Err(CodecError::ConfigFormat { .. })));
}

#[test]
fn test_parse_rejects_non_binary_codeword() {
    let result = "2\n2\n1\n0 10x1\n".parse::<Properties>();

    assert!(matches!(result, Err(CodecError::ConfigFormat { .. })));
}

#[test]
fn test_parse_rejects_empty_codeword() {
    let result = "2\n2\n1\n0 \n".parse::<Properties>();

    assert!(matches!(result, Err(CodecError::ConfigFormat { .. })));
}
