//! Parsers for component property text.
//!
//! Properties arrive from the schematic as free text.  These helpers accept
//! the spellings schematic editors commonly produce; callers that want the
//! simulator's "default on missing or bad value" behaviour use
//! `.unwrap_or(default)` on the result.

use crate::{VsmError, VsmResult};

/// Parse a boolean: `1/0`, `true/false`, `yes/no`, `on/off` (any case).
pub fn parse_bool(text: &str) -> VsmResult<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(VsmError::Parse(format!("invalid boolean {other:?}"))),
    }
}

/// Parse a number with an optional SI multiplier suffix and optional unit.
///
/// `"4.7k"` → 4700, `"10u"` → 1e-5, `"1MHz"` → 1e6, `"2.5"` → 2.5.  The
/// multiplier letters are `p n u m k M G`; anything alphabetic after the
/// multiplier is treated as a unit and ignored.
pub fn parse_number(text: &str) -> VsmResult<f64> {
    let text = text.trim();
    if let Ok(plain) = text.parse::<f64>() {
        return Ok(plain);
    }
    let split = text
        .find(|c: char| c.is_ascii_alphabetic())
        .unwrap_or(text.len());
    let (digits, suffix) = text.split_at(split);

    let value: f64 = digits
        .trim()
        .parse()
        .map_err(|_| VsmError::Parse(format!("invalid number {text:?}")))?;

    let scale = suffix.chars().next().and_then(si_multiplier).unwrap_or(1.0);
    Ok(value * scale)
}

/// Scale factor for an SI multiplier letter (`p n u m k K M G`).
pub fn si_multiplier(letter: char) -> Option<f64> {
    match letter {
        'p' => Some(1e-12),
        'n' => Some(1e-9),
        'u' => Some(1e-6),
        'm' => Some(1e-3),
        'k' | 'K' => Some(1e3),
        'M' => Some(1e6),
        'G' => Some(1e9),
        _ => None,
    }
}

/// Parse a hexadecimal value written as `0x1F`, `$1F`, `1Fh`, or bare `1F`.
pub fn parse_hex(text: &str) -> VsmResult<u32> {
    let text = text.trim();
    let digits = if let Some(rest) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        rest
    } else if let Some(rest) = text.strip_prefix('$') {
        rest
    } else if let Some(rest) = text.strip_suffix('h').or_else(|| text.strip_suffix('H')) {
        rest
    } else {
        text
    };
    u32::from_str_radix(digits, 16).map_err(|_| VsmError::Parse(format!("invalid hex value {text:?}")))
}

/// Parse a signed initial value; accepts decimal or any [`parse_hex`] form
/// that carries an explicit hex marker.
pub fn parse_init(text: &str) -> VsmResult<i64> {
    let trimmed = text.trim();
    if let Ok(n) = trimmed.parse::<i64>() {
        return Ok(n);
    }
    let has_marker = trimmed.starts_with("0x")
        || trimmed.starts_with("0X")
        || trimmed.starts_with('$')
        || trimmed.ends_with('h')
        || trimmed.ends_with('H');
    if has_marker {
        return parse_hex(trimmed).map(i64::from);
    }
    Err(VsmError::Parse(format!("invalid initial value {trimmed:?}")))
}
