//! Encoder from the generic [`Value`] tree back to raw bytes.

use crate::value::Value;

/// Append the bencoded form of `value` to `out`.
///
/// Dictionary entries come from a `BTreeMap`, so keys are always written in
/// sorted byte order regardless of how the tree was built.
pub(crate) fn encode_value(value: &Value, out: &mut Vec<u8>) {
    match value {
        Value::Bytes(bytes) => {
            out.extend_from_slice(bytes.len().to_string().as_bytes());
            out.push(b':');
            out.extend_from_slice(bytes);
        }
        Value::Integer(number) => {
            out.push(b'i');
            out.extend_from_slice(number.to_string().as_bytes());
            out.push(b'e');
        }
        Value::List(items) => {
            out.push(b'l');
            for item in items {
                encode_value(item, out);
            }
            out.push(b'e');
        }
        Value::Dict(entries) => {
            out.push(b'd');
            for (key, entry) in entries {
                out.extend_from_slice(key.len().to_string().as_bytes());
                out.push(b':');
                out.extend_from_slice(key);
                encode_value(entry, out);
            }
            out.push(b'e');
        }
    }
}
