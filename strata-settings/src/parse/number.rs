//! Permissive number scanning
//!
//! Setting text is converted by reading the longest numeric prefix, after
//! optional leading whitespace. Trailing garbage is ignored and text without
//! a numeric prefix is reported as `None`, which the lenient callers map to 0.

/// Whitespace as recognised by the C locale (`isspace`).
fn is_space(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

fn skip_space(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && is_space(bytes[pos]) {
        pos += 1;
    }
    pos
}

fn skip_digits(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    pos
}

fn starts_with_ignore_case(bytes: &[u8], prefix: &str) -> bool {
    bytes.len() >= prefix.len() && bytes[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

/// Read a leading integer, if any.
///
/// Values beyond the `i64` range saturate.
pub fn leading_int(text: &str) -> Option<i64> {
    let bytes = text.as_bytes();
    let mut pos = skip_space(bytes, 0);
    let negative = match bytes.get(pos) {
        Some(b'-') => {
            pos += 1;
            true
        }
        Some(b'+') => {
            pos += 1;
            false
        }
        _ => false,
    };

    let digits_start = pos;
    let digits_end = skip_digits(bytes, pos);
    if digits_end == digits_start {
        return None;
    }

    let mut value: i64 = 0;
    for &digit in &bytes[digits_start..digits_end] {
        let digit = i64::from(digit - b'0');
        value = value
            .saturating_mul(10)
            .saturating_add(if negative { -digit } else { digit });
    }
    Some(value)
}

/// Read a leading floating point number, if any.
///
/// Accepts an optional sign, decimal digits with an optional fraction and
/// exponent, hexadecimal `0x` numbers with an optional binary `p` exponent,
/// and the special values `inf`, `infinity` and `nan`.
pub fn leading_float(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let start = skip_space(bytes, 0);
    let mut pos = start;
    if matches!(bytes.get(pos), Some(b'-') | Some(b'+')) {
        pos += 1;
    }
    let negative = bytes.get(start) == Some(&b'-');

    let rest = &bytes[pos..];
    if starts_with_ignore_case(rest, "infinity") || starts_with_ignore_case(rest, "inf") {
        return Some(if negative { f64::NEG_INFINITY } else { f64::INFINITY });
    }
    if starts_with_ignore_case(rest, "nan") {
        return Some(f64::NAN);
    }
    if let Some(magnitude) = leading_hex_float(rest) {
        return Some(if negative { -magnitude } else { magnitude });
    }

    let int_start = pos;
    pos = skip_digits(bytes, pos);
    let mut mantissa_digits = pos - int_start;
    if bytes.get(pos) == Some(&b'.') {
        let frac_start = pos + 1;
        let frac_end = skip_digits(bytes, frac_start);
        mantissa_digits += frac_end - frac_start;
        pos = frac_end;
    }
    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(pos), Some(b'e') | Some(b'E')) {
        let mut exp_pos = pos + 1;
        if matches!(bytes.get(exp_pos), Some(b'-') | Some(b'+')) {
            exp_pos += 1;
        }
        let exp_end = skip_digits(bytes, exp_pos);
        if exp_end > exp_pos {
            pos = exp_end;
        }
    }

    // Only ASCII was consumed, so the slice is on a char boundary.
    text[start..pos].parse::<f64>().ok()
}

/// Read an unsigned `0x` hexadecimal float such as `0x1.8p3`.
///
/// Returns `None` when no hex digit follows the prefix, leaving `0x` to be
/// read as a plain decimal zero.
fn leading_hex_float(bytes: &[u8]) -> Option<f64> {
    if !starts_with_ignore_case(bytes, "0x") {
        return None;
    }
    let mut pos = 2;
    let mut mantissa = 0.0f64;
    let mut digits = 0;
    let mut exponent: i64 = 0;

    while let Some(digit) = bytes.get(pos).and_then(|&b| (b as char).to_digit(16)) {
        mantissa = mantissa * 16.0 + f64::from(digit);
        digits += 1;
        pos += 1;
    }
    if bytes.get(pos) == Some(&b'.') {
        pos += 1;
        while let Some(digit) = bytes.get(pos).and_then(|&b| (b as char).to_digit(16)) {
            mantissa = mantissa * 16.0 + f64::from(digit);
            exponent -= 4;
            digits += 1;
            pos += 1;
        }
    }
    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(pos), Some(b'p') | Some(b'P')) {
        let mut exp_pos = pos + 1;
        let exp_negative = bytes.get(exp_pos) == Some(&b'-');
        if matches!(bytes.get(exp_pos), Some(b'-') | Some(b'+')) {
            exp_pos += 1;
        }
        let exp_end = skip_digits(bytes, exp_pos);
        if exp_end > exp_pos {
            let mut binary: i64 = 0;
            for &digit in &bytes[exp_pos..exp_end] {
                binary = binary.saturating_mul(10).saturating_add(i64::from(digit - b'0'));
            }
            exponent = exponent.saturating_add(if exp_negative { -binary } else { binary });
        }
    }

    let exponent = exponent.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
    Some(mantissa * 2f64.powi(exponent))
}

/// `leading_int`, with text that has no numeric prefix read as 0.
pub fn int_or_zero(text: &str) -> i64 {
    leading_int(text).unwrap_or(0)
}

/// `leading_float`, with text that has no numeric prefix read as 0.0.
pub fn float_or_zero(text: &str) -> f64 {
    leading_float(text).unwrap_or(0.0)
}
