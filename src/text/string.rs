use std::fmt::Write;

#[inline]
pub fn has_line_break(value: &str) -> bool {
    memchr::memchr(b'\n', value.as_bytes()).is_some()
}

/// Double-quotes `value`, escaping quotes, backslashes and control bytes.
pub fn quote_into(out: &mut String, value: &str) {
    out.push('"');
    escape_string_into(out, value);
    out.push('"');
}

pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    quote_into(&mut out, value);
    out
}

pub fn escape_string_into(out: &mut String, value: &str) {
    let bytes = value.as_bytes();
    let mut start = 0;
    for (idx, byte) in bytes.iter().enumerate() {
        let escaped = match byte {
            b'\n' => "\\n",
            b'\r' => "\\r",
            b'\t' => "\\t",
            b'"' => "\\\"",
            b'\\' => "\\\\",
            0x07 => "\\a",
            0x08 => "\\b",
            0x0b => "\\v",
            0x0c => "\\f",
            0x00..=0x1f | 0x7f => "",
            _ => continue,
        };
        if start < idx {
            out.push_str(&value[start..idx]);
        }
        if escaped.is_empty() {
            let _ = write!(out, "\\x{byte:02x}");
        } else {
            out.push_str(escaped);
        }
        start = idx + 1;
    }
    if start < value.len() {
        out.push_str(&value[start..]);
    }
}
