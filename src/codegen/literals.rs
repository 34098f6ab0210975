/// Interpreted strings keep their escapes; the two the target reader lacks are spelled out.
pub fn interpreted_string(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 2);
    out.push('"');
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('a') => out.push_str("\\u0007"),
            Some('v') => out.push_str("\\u000B"),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out.push('"');
    out
}

/// Backtick strings carry no escapes, so every special character gets one.
pub fn raw_string(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 2);
    out.push('"');
    for c in raw.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\u{0C}' => out.push_str("\\f"),
            '\u{08}' => out.push_str("\\b"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

pub fn regex(body: &str) -> String {
    format!("#\"{body}\"")
}
