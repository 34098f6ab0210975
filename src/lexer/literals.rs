//! Normalization of numeric, character, and regex literals into the spelling
//! the target reader expects. Called from the token callbacks.

/// `0xff` → `255`. Values past `i64::MAX` get the arbitrary-precision `N` suffix.
pub fn hex_int(slice: &str) -> Option<String> {
    let decimal = radix_to_decimal(&slice[2..], 16)?;
    Some(with_big_suffix(decimal, false))
}

/// Decimal integers pass through; a leading zero means octal (`0664` → `436`).
pub fn decimal_int(slice: &str) -> Option<String> {
    let (digits, big) = match slice.strip_suffix('N') {
        Some(d) => (d, true),
        None => (slice, false),
    };
    if digits.len() > 1 && digits.starts_with('0') {
        let decimal = radix_to_decimal(&digits[1..], 8)?;
        return Some(with_big_suffix(decimal, big));
    }
    let suffix = if big { "N" } else { "" };
    Some(format!("{digits}{suffix}"))
}

fn with_big_suffix(decimal: String, big: bool) -> String {
    if big || exceeds_long(&decimal) { format!("{decimal}N") } else { decimal }
}

/// Compares canonical decimal strings (no sign, no leading zeros) against `i64::MAX`.
fn exceeds_long(decimal: &str) -> bool {
    const MAX: &str = "9223372036854775807";
    decimal.len() > MAX.len() || (decimal.len() == MAX.len() && decimal > MAX)
}

/// Digit-wise conversion to a decimal string, so literals of any width survive.
/// Works in little-endian base-10^9 limbs.
fn radix_to_decimal(digits: &str, radix: u32) -> Option<String> {
    const LIMB: u64 = 1_000_000_000;
    let mut limbs: Vec<u64> = vec![0];
    for c in digits.chars() {
        let mut carry = u64::from(c.to_digit(radix)?);
        for limb in limbs.iter_mut() {
            let v = *limb * u64::from(radix) + carry;
            *limb = v % LIMB;
            carry = v / LIMB;
        }
        if carry > 0 {
            limbs.push(carry);
        }
    }
    let mut high_first = limbs.iter().rev();
    let mut out = high_first.next().map(u64::to_string).unwrap_or_default();
    for limb in high_first {
        out.push_str(&format!("{limb:09}"));
    }
    Some(out)
}

/// Floats are re-printed the way the host runtime prints a double:
/// `0.` → `0.0`, `1E6` → `1000000.0`, `6.67428e-11` → `6.67428E-11`.
/// A leading-dot float (`.25`, `.12345E+5`) and an `M` (arbitrary-precision
/// decimal) literal are kept as written.
pub fn float(slice: &str) -> Option<String> {
    if slice.starts_with('.') || slice.ends_with('M') {
        return Some(slice.to_string());
    }
    let value: f64 = slice.parse().ok()?;
    Some(host_double(value))
}

/// Canonical double spelling: plain notation in [1e-3, 1e7), scientific otherwise,
/// always with at least one fractional digit.
pub fn host_double(value: f64) -> String {
    if value.is_infinite() {
        return if value > 0.0 { "##Inf".to_string() } else { "##-Inf".to_string() };
    }
    if value.is_nan() {
        return "##NaN".to_string();
    }
    let magnitude = value.abs();
    if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
        let plain = format!("{value}");
        if plain.contains('.') { plain } else { format!("{plain}.0") }
    } else {
        let sci = format!("{value:E}");
        match sci.split_once('E') {
            Some((mantissa, exp)) if !mantissa.contains('.') => format!("{mantissa}.0E{exp}"),
            _ => sci,
        }
    }
}

/// Position and character of the first escape sequence a string literal may not contain.
pub fn first_bad_escape(raw: &str) -> Option<(usize, char)> {
    let mut chars = raw.char_indices();
    while let Some((_, c)) = chars.next() {
        if c != '\\' {
            continue;
        }
        let (i, esc) = chars.next()?;
        match esc {
            'n' | 't' | 'r' | 'b' | 'f' | 'a' | 'v' | '"' | '\\' => {}
            'u' => {
                for _ in 0..4 {
                    match chars.next() {
                        Some((_, h)) if h.is_ascii_hexdigit() => {}
                        Some((j, h)) => return Some((j, h)),
                        None => return Some((i, esc)),
                    }
                }
            }
            '0'..='7' => {
                for _ in 0..2 {
                    match chars.next() {
                        Some((_, d)) if ('0'..='7').contains(&d) => {}
                        Some((j, d)) => return Some((j, d)),
                        None => return Some((i, esc)),
                    }
                }
            }
            other => return Some((i, other)),
        }
    }
    None
}

/// `'a'` → `\a`, `'\n'` → `\newline`, `'\234'` → `\o234`.
pub fn char_lit(slice: &str) -> Option<String> {
    let inner = &slice[1..slice.len() - 1];
    let rendered = match inner {
        " " => "\\space".to_string(),
        "\\n" => "\\newline".to_string(),
        "\\t" => "\\tab".to_string(),
        "\\b" => "\\backspace".to_string(),
        "\\r" => "\\return".to_string(),
        "\\f" => "\\formfeed".to_string(),
        "\\\\" => "\\\\".to_string(),
        "\\'" => "\\'".to_string(),
        "\\\"" => "\\\"".to_string(),
        _ => {
            if let Some(hex) = inner.strip_prefix("\\u") {
                format!("\\u{hex}")
            } else if let Some(oct) = inner.strip_prefix('\\') {
                if oct.len() == 3 && oct.chars().all(|c| ('0'..='7').contains(&c)) {
                    format!("\\o{oct}")
                } else {
                    return None;
                }
            } else {
                format!("\\{inner}")
            }
        }
    };
    Some(rendered)
}

/// `aaa\/bbb` → `aaa/bbb`, `"` → `\"`; every other character is verbatim.
pub fn regex_body(inner: &str) -> String {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'/') => {
                out.push('/');
                chars.next();
            }
            '\\' => {
                out.push('\\');
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            }
            '"' => out.push_str("\\\""),
            other => out.push(other),
        }
    }
    out
}
