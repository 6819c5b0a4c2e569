//! JSON number grammar and float formatting.

use crate::error::{JsonError, Result};
use regex::Regex;
use std::fmt::{Display, LowerExp};
use std::sync::LazyLock;

static NUMBER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?(?:0|[1-9][0-9]*)(?:\.[0-9]+)?(?:[eE][+-]?[0-9]+)?$").expect("Invalid regex")
});

pub(crate) fn is_valid_number(literal: &str) -> bool {
    NUMBER_PATTERN.is_match(literal)
}

pub(crate) fn format_f32(value: f32) -> Result<String> {
    if !value.is_finite() {
        return Err(non_finite("float", f64::from(value)));
    }
    Ok(format_float(value, f64::from(value)))
}

pub(crate) fn format_f64(value: f64) -> Result<String> {
    if !value.is_finite() {
        return Err(non_finite("double", value));
    }
    Ok(format_float(value, value))
}

/// Plain decimal for `1e-3 <= |x| < 1e7` (and zero), scientific otherwise.
/// Either way the mantissa carries a fractional part, so floats stay floats.
fn format_float<F: Display + LowerExp>(value: F, magnitude: f64) -> String {
    let magnitude = magnitude.abs();
    if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
        let mut text = value.to_string();
        if !text.contains('.') {
            text.push_str(".0");
        }
        text
    } else {
        let text = format!("{value:e}");
        match text.split_once('e') {
            Some((mantissa, exponent)) if !mantissa.contains('.') => {
                format!("{mantissa}.0e{exponent}")
            }
            _ => text,
        }
    }
}

fn non_finite(kind: &'static str, value: f64) -> JsonError {
    let value = if value.is_nan() {
        "NaN"
    } else if value > 0.0 {
        "Infinity"
    } else {
        "-Infinity"
    };
    JsonError::NonFiniteNumber {
        kind,
        value: value.to_string(),
    }
}
