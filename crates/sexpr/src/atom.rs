//! Rendering of atoms: floats and quoted strings.
//!
//! Integers and symbols need no help beyond `Display` and are written
//! directly by the encoder.

use crate::encode::Float;
use std::io;

/// Exponent at or above which shortest-form floats switch to exponential
/// notation, matching `%g` with default precision.
const EXPONENT_THRESHOLD: i32 = 6;

/// Smallest exponent still written in plain decimal form.
const MIN_DECIMAL_EXPONENT: i32 = -4;

/// Format a finite float in shortest general form.
///
/// The digits are the shortest that round-trip at the value's own width.
/// Plain decimal is used for exponents in `-4..6`, otherwise `d.ddde±XX`
/// with at least two exponent digits.
pub(crate) fn format_float(value: Float) -> String {
    let scientific = match value {
        Float::F32(x) => format!("{x:e}"),
        Float::F64(x) => format!("{x:e}"),
    };
    general_form(&scientific)
}

/// Emacs Lisp reader syntax for infinities and NaN.
pub(crate) fn non_finite_literal(value: f64) -> &'static str {
    if value.is_nan() {
        "0.0e+NaN"
    } else if value.is_sign_negative() {
        "-1.0e+INF"
    } else {
        "1.0e+INF"
    }
}

/// Rewrite Rust's shortest `LowerExp` output (`-1.2345e6`) in `%g` style.
fn general_form(scientific: &str) -> String {
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific.to_string();
    };
    let exponent: i32 = exponent.parse().unwrap_or_default();
    let (negative, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, mantissa),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    let mut out = String::with_capacity(digits.len() + 8);
    if negative {
        out.push('-');
    }

    if !(MIN_DECIMAL_EXPONENT..EXPONENT_THRESHOLD).contains(&exponent) {
        out.push_str(&digits[..1]);
        if digits.len() > 1 {
            out.push('.');
            out.push_str(&digits[1..]);
        }
        out.push('e');
        out.push(if exponent < 0 { '-' } else { '+' });
        out.push_str(&format!("{:02}", exponent.unsigned_abs()));
    } else if exponent < 0 {
        out.push_str("0.");
        for _ in 0..(-exponent - 1) {
            out.push('0');
        }
        out.push_str(&digits);
    } else {
        let integer_len = exponent as usize + 1;
        if digits.len() <= integer_len {
            out.push_str(&digits);
            for _ in digits.len()..integer_len {
                out.push('0');
            }
        } else {
            out.push_str(&digits[..integer_len]);
            out.push('.');
            out.push_str(&digits[integer_len..]);
        }
    }
    out
}

fn escape(c: char) -> Option<&'static str> {
    match c {
        '"' => Some("\\\""),
        '\\' => Some("\\\\"),
        '\x07' => Some("\\a"),
        '\x08' => Some("\\b"),
        '\x0c' => Some("\\f"),
        '\n' => Some("\\n"),
        '\r' => Some("\\r"),
        '\t' => Some("\\t"),
        '\x0b' => Some("\\v"),
        _ => None,
    }
}

/// Write `text` as a double-quoted string literal.
///
/// Unescaped runs are copied in one write each.
pub(crate) fn write_quoted<W: io::Write + ?Sized>(out: &mut W, text: &str) -> io::Result<()> {
    out.write_all(b"\"")?;
    let bytes = text.as_bytes();
    let mut start = 0;
    for (i, c) in text.char_indices() {
        if let Some(escaped) = escape(c) {
            out.write_all(&bytes[start..i])?;
            out.write_all(escaped.as_bytes())?;
        } else if c.is_control() {
            out.write_all(&bytes[start..i])?;
            write!(out, "\\u{:04x}", u32::from(c))?;
        } else {
            continue;
        }
        start = i + c.len_utf8();
    }
    out.write_all(&bytes[start..])?;
    out.write_all(b"\"")
}
