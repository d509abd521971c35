use std::fmt::Write;

/// Largest magnitude that still round-trips through `i64`.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

#[inline]
pub fn is_integral(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0 && value.abs() < I64_BOUND
}

pub fn format_int(value: i64) -> String {
    let mut buffer = itoa::Buffer::new();
    buffer.format(value).to_string()
}

/// Formats a float for a property line: integral values print as integers,
/// everything else with at most six decimals and no trailing zeros.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }
    if is_integral(value) {
        return format_int(value as i64);
    }
    let mut out = String::with_capacity(24);
    let _ = write!(out, "{value:.6}");
    trim_number(out)
}

fn trim_number(mut value: String) -> String {
    if let Some(dot) = value.find('.') {
        let mut end = value.len();
        while end > dot + 1 && value.as_bytes()[end - 1] == b'0' {
            end -= 1;
        }
        value.truncate(end);
        if value.ends_with('.') {
            value.pop();
        }
    }
    if value == "-0" {
        return "0".to_string();
    }
    value
}
