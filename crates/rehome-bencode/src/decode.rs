//! Streaming decoder from raw bytes into the generic [`Value`] tree.

use std::collections::BTreeMap;

use crate::error::{BencodeError, BencodeResult};
use crate::value::Value;

/// Decode a complete document, rejecting trailing bytes.
pub(crate) fn decode_document(input: &[u8]) -> BencodeResult<Value> {
    let mut decoder = Decoder { input, pos: 0 };
    let value = decoder.value()?;
    if decoder.pos != input.len() {
        return Err(BencodeError::TrailingData {
            offset: decoder.pos,
        });
    }
    Ok(value)
}

struct Decoder<'a> {
    input: &'a [u8],
    pos: usize,
}

impl Decoder<'_> {
    fn peek(&self) -> BencodeResult<u8> {
        self.input
            .get(self.pos)
            .copied()
            .ok_or(BencodeError::Truncated { offset: self.pos })
    }

    fn value(&mut self) -> BencodeResult<Value> {
        match self.peek()? {
            b'i' => self.integer(),
            b'l' => self.list(),
            b'd' => self.dict(),
            b'0'..=b'9' => Ok(Value::Bytes(self.byte_string()?)),
            byte => Err(BencodeError::UnexpectedByte {
                offset: self.pos,
                byte,
            }),
        }
    }

    fn integer(&mut self) -> BencodeResult<Value> {
        let start = self.pos;
        self.pos += 1;
        let mut end = self.pos;
        while let Some(&byte) = self.input.get(end) {
            if byte == b'e' {
                let digits = &self.input[self.pos..end];
                let value = parse_i64(digits)
                    .ok_or(BencodeError::InvalidInteger { offset: start })?;
                self.pos = end + 1;
                return Ok(Value::Integer(value));
            }
            end += 1;
        }
        Err(BencodeError::Truncated { offset: start })
    }

    fn byte_string(&mut self) -> BencodeResult<Vec<u8>> {
        let start = self.pos;
        let mut end = self.pos;
        while let Some(&byte) = self.input.get(end) {
            if byte == b':' {
                let digits = &self.input[self.pos..end];
                let length = parse_len(digits)
                    .ok_or(BencodeError::InvalidLength { offset: start })?;
                let payload_start = end + 1;
                let payload_end = payload_start
                    .checked_add(length)
                    .ok_or(BencodeError::InvalidLength { offset: start })?;
                if payload_end > self.input.len() {
                    return Err(BencodeError::Truncated { offset: payload_start });
                }
                self.pos = payload_end;
                return Ok(self.input[payload_start..payload_end].to_vec());
            }
            if !byte.is_ascii_digit() {
                return Err(BencodeError::InvalidLength { offset: start });
            }
            end += 1;
        }
        Err(BencodeError::Truncated { offset: start })
    }

    fn list(&mut self) -> BencodeResult<Value> {
        let start = self.pos;
        self.pos += 1;
        let mut items = Vec::new();
        loop {
            match self.peek() {
                Ok(b'e') => {
                    self.pos += 1;
                    return Ok(Value::List(items));
                }
                Ok(_) => items.push(self.value()?),
                Err(_) => return Err(BencodeError::UnterminatedContainer { offset: start }),
            }
        }
    }

    fn dict(&mut self) -> BencodeResult<Value> {
        let start = self.pos;
        self.pos += 1;
        let mut entries = BTreeMap::new();
        loop {
            match self.peek() {
                Ok(b'e') => {
                    self.pos += 1;
                    return Ok(Value::Dict(entries));
                }
                Ok(byte) if byte.is_ascii_digit() => {
                    let key = self.byte_string()?;
                    let value = self.value()?;
                    entries.insert(key, value);
                }
                Ok(_) => return Err(BencodeError::InvalidKey { offset: self.pos }),
                Err(_) => return Err(BencodeError::UnterminatedContainer { offset: start }),
            }
        }
    }
}

fn parse_i64(digits: &[u8]) -> Option<i64> {
    let text = std::str::from_utf8(digits).ok()?;
    if text.is_empty() || text == "-" {
        return None;
    }
    text.parse::<i64>().ok()
}

fn parse_len(digits: &[u8]) -> Option<usize> {
    let text = std::str::from_utf8(digits).ok()?;
    if text.is_empty() {
        return None;
    }
    text.parse::<usize>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_scalars() {
        assert_eq!(Value::decode(b"4:spam"), Ok(Value::from("spam")));
        assert_eq!(Value::decode(b"0:"), Ok(Value::Bytes(Vec::new())));
        assert_eq!(Value::decode(b"i42e"), Ok(Value::Integer(42)));
        assert_eq!(Value::decode(b"i-7e"), Ok(Value::Integer(-7)));
        assert_eq!(Value::decode(b"i0e"), Ok(Value::Integer(0)));
    }

    #[test]
    fn decodes_nested_containers() {
        let value = Value::decode(b"d4:infod5:filesld4:pathl3:dir4:filee6:lengthi10eeeee")
            .expect("nested document decodes");
        let files = value
            .get("info")
            .and_then(|info| info.get("files"))
            .and_then(Value::as_list)
            .expect("files list present");
        assert_eq!(files.len(), 1);
        let length = files[0].get("length").and_then(Value::as_int);
        assert_eq!(length, Some(10));
    }

    #[test]
    fn decodes_binary_payloads() {
        let mut input = b"3:".to_vec();
        input.extend_from_slice(&[0x00, 0xff, 0x80]);
        let value = Value::decode(&input).expect("binary string decodes");
        assert_eq!(value.as_bytes(), Some([0x00, 0xff, 0x80].as_slice()));
        assert!(value.as_str().is_none());
    }

    #[test]
    fn rejects_truncated_input() {
        assert_eq!(
            Value::decode(b"5:spam"),
            Err(BencodeError::Truncated { offset: 2 })
        );
        assert_eq!(
            Value::decode(b"i42"),
            Err(BencodeError::Truncated { offset: 0 })
        );
        assert_eq!(
            Value::decode(b"4"),
            Err(BencodeError::Truncated { offset: 0 })
        );
    }

    #[test]
    fn rejects_malformed_integers() {
        assert_eq!(
            Value::decode(b"ie"),
            Err(BencodeError::InvalidInteger { offset: 0 })
        );
        assert_eq!(
            Value::decode(b"i-e"),
            Err(BencodeError::InvalidInteger { offset: 0 })
        );
        assert_eq!(
            Value::decode(b"iabce"),
            Err(BencodeError::InvalidInteger { offset: 0 })
        );
        assert_eq!(
            Value::decode(b"i9223372036854775808e"),
            Err(BencodeError::InvalidInteger { offset: 0 })
        );
    }

    #[test]
    fn rejects_unterminated_containers() {
        assert_eq!(
            Value::decode(b"l4:spam"),
            Err(BencodeError::UnterminatedContainer { offset: 0 })
        );
        assert_eq!(
            Value::decode(b"d4:spami1e"),
            Err(BencodeError::UnterminatedContainer { offset: 0 })
        );
    }

    #[test]
    fn rejects_non_string_dict_keys() {
        assert_eq!(
            Value::decode(b"di1ei2ee"),
            Err(BencodeError::InvalidKey { offset: 1 })
        );
    }

    #[test]
    fn rejects_trailing_data() {
        assert_eq!(
            Value::decode(b"i1ei2e"),
            Err(BencodeError::TrailingData { offset: 3 })
        );
    }

    #[test]
    fn rejects_unexpected_leading_byte() {
        assert_eq!(
            Value::decode(b"x"),
            Err(BencodeError::UnexpectedByte {
                offset: 0,
                byte: b'x'
            })
        );
    }
}
