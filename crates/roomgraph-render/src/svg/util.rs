// Shared SVG string helpers.

use std::fmt::Write as _;

pub(crate) fn fmt(v: f64) -> String {
    let mut out = String::new();
    fmt_into(&mut out, v);
    out
}

/// Writes `v` rounded to 2 decimals without trailing zeros, avoiding `-0`.
pub(crate) fn fmt_into(out: &mut String, v: f64) {
    if !v.is_finite() {
        out.push('0');
        return;
    }
    let mut v = (v * 100.0).round() / 100.0;
    if v == -0.0 {
        v = 0.0;
    }
    let _ = write!(out, "{v}");
}

pub(crate) fn escape_xml_into(out: &mut String, text: &str) {
    let bytes = text.as_bytes();
    let mut start = 0usize;
    for (i, &b) in bytes.iter().enumerate() {
        let esc = match b {
            b'&' => "&amp;",
            b'<' => "&lt;",
            b'>' => "&gt;",
            b'"' => "&quot;",
            b'\'' => "&#39;",
            _ => continue,
        };
        if start < i {
            out.push_str(&text[start..i]);
        }
        out.push_str(esc);
        start = i + 1;
    }
    if start < text.len() {
        out.push_str(&text[start..]);
    }
}
