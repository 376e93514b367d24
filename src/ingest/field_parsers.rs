//! Field parsing utilities for record payloads
//!
//! Parsing never fails: a field decodes from its longest leading number, so
//! `"18.4km"` reads as `18.4`. A field with no leading number decodes to the
//! absent value of its type (`NaN` or `None`).

const INFINITY: &str = "Infinity";

/// Parse a floating point field, `NaN` when the text does not start with a number
///
/// Accepts an optional sign, digits with an optional fraction, and an
/// exponent when it is followed by digits. `Infinity` is the only spelled-out
/// value; `inf` and `NaN` are absent.
pub fn parse_float(raw: &str) -> f64 {
    let text = raw.trim_start();
    let bytes = text.as_bytes();

    let mut end = sign_len(bytes);
    let unsigned = &text[end..];
    if unsigned.starts_with(INFINITY) {
        return if text.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_digits = digits_len(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits_len(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let exp_sign = sign_len(&bytes[end + 1..]);
        let exp_digits = digits_len(&bytes[end + 1 + exp_sign..]);
        if exp_digits > 0 {
            end += 1 + exp_sign + exp_digits;
        }
    }

    text[..end].parse::<f64>().unwrap_or(f64::NAN)
}

/// Parse an integer field, `None` when the text does not start with digits
///
/// Only the leading digits count, so counters written with a fraction
/// (`"12.9"`) or an exponent (`"1e3"`) keep their integer part.
pub fn parse_int(raw: &str) -> Option<i64> {
    let text = raw.trim_start();
    let bytes = text.as_bytes();

    let sign = sign_len(bytes);
    let digits = digits_len(&bytes[sign..]);
    if digits == 0 {
        return None;
    }

    // out of i64 range counts as absent
    text[..sign + digits].parse::<i64>().ok()
}

fn sign_len(bytes: &[u8]) -> usize {
    usize::from(matches!(bytes.first(), Some(b'+' | b'-')))
}

fn digits_len(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
