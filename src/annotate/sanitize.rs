//! Make model output safe for an SGF comment property (`C[...]`).
//!
//! SGF reserves `]` and `\` inside property values. Both are escaped with a
//! backslash; a backslash that already starts an escape pair (`\]` or `\\`) is
//! kept as-is so sanitizing twice changes nothing.

/// Sanitize optional model text. Absent input becomes an empty string.
pub fn sanitize(text: Option<&str>) -> String {
    text.map(sanitize_str).unwrap_or_default()
}

pub fn sanitize_str(text: &str) -> String {
    let collapsed = collapse_line_breaks(text);
    escape(collapsed.trim())
}

/// Replace every run of CR/LF characters with a single space.
fn collapse_line_breaks(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_break = false;
    for c in text.chars() {
        if c == '\r' || c == '\n' {
            if !in_break {
                out.push(' ');
            }
            in_break = true;
        } else {
            out.push(c);
            in_break = false;
        }
    }
    out
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.peek() {
                Some(&next) if next == '\\' || next == ']' => {
                    chars.next();
                    out.push('\\');
                    out.push(next);
                }
                _ => out.push_str("\\\\"),
            },
            ']' => out.push_str("\\]"),
            other => out.push(other),
        }
    }
    out
}
