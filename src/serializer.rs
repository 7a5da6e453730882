//! Fixed-precision text encoding for [`Value`] trees.
//!
//! The layout is JSON, but every number is printed with exactly the same count
//! of decimal digits (`1` at 6 digits is `1.000000`, never `1` or `1e0`), so the
//! output is byte-stable for a given document and precision.

use crate::float_types::{Real, MIN_DIGITS};
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrecisionSerializer {
    digits: usize,
    indent: usize,
}

impl PrecisionSerializer {
    /// Serializer printing `digits` decimals (at least one) with two-space indentation.
    pub fn new(digits: usize) -> Self {
        PrecisionSerializer {
            digits: digits.max(MIN_DIGITS),
            indent: 2,
        }
    }

    /// Spaces per nesting level; `0` gives single-line output.
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn digits(&self) -> usize {
        self.digits
    }

    /// One numeric leaf. NaN and infinities print as zero.
    pub fn format_number(&self, n: Real) -> String {
        let n = if n.is_finite() { n } else { 0.0 };
        format!("{:.*}", self.digits, round_to(n, self.digits))
    }

    pub fn to_string(&self, value: &Value) -> String {
        let mut out = String::new();
        self.write(&mut out, value, 0);
        out
    }

    fn write(&self, out: &mut String, value: &Value, depth: usize) {
        match value {
            Value::Null => out.push_str("null"),
            Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Value::Number(n) => out.push_str(&self.format_number(*n)),
            Value::String(s) => out.push_str(&escape(s)),
            Value::Array(items) if items.is_empty() => out.push_str("[]"),
            Value::Object(members) if members.is_empty() => out.push_str("{}"),
            Value::Array(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    self.separator(out, i, depth + 1);
                    self.write(out, item, depth + 1);
                }
                self.newline(out, depth);
                out.push(']');
            }
            Value::Object(members) => {
                out.push('{');
                for (i, (key, item)) in members.iter().enumerate() {
                    self.separator(out, i, depth + 1);
                    out.push_str(&escape(key));
                    out.push(':');
                    if self.indent > 0 {
                        out.push(' ');
                    }
                    self.write(out, item, depth + 1);
                }
                self.newline(out, depth);
                out.push('}');
            }
        }
    }

    fn separator(&self, out: &mut String, index: usize, depth: usize) {
        if index > 0 {
            out.push(',');
        }
        self.newline(out, depth);
    }

    fn newline(&self, out: &mut String, depth: usize) {
        if self.indent > 0 {
            out.push('\n');
            out.push_str(&" ".repeat(self.indent * depth));
        }
    }
}

/// Serialize `value` with `digits` decimals and two-space indentation.
pub fn to_fixed_string(value: &Value, digits: usize) -> String {
    PrecisionSerializer::new(digits).to_string(value)
}

/// Round half away from zero to `digits` decimals; `-0` comes back as `0`.
///
/// Ties on negative numbers go away from zero (`-0.25` becomes `-0.3` at one
/// digit), unlike the `Math.round` rule of the original exporter, which sends
/// ties toward positive infinity (`-0.2`).
pub fn round_to(n: Real, digits: usize) -> Real {
    let factor = 10f64.powi(digits as i32);
    let scaled = n * factor;
    if !scaled.is_finite() {
        return n + 0.0;
    }
    scaled.round() / factor + 0.0
}

/// Quoted, JSON-escaped string.
fn escape(s: &str) -> String {
    serde_json::Value::from(s).to_string()
}
