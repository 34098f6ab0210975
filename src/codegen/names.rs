//! Identifier spelling in the generated code.

/// Transcode an identifier, label, escaped identifier, operator name, or
/// argument reference as written in source into its target symbol.
pub fn symbol(raw: &str) -> String {
    if let Some(inner) = escaped(raw) {
        return inner.to_string();
    }
    if let Some(arg) = raw.strip_prefix('$') {
        return if arg == "*" { "%&".to_string() } else { format!("%{arg}") };
    }
    if let Some(op) = operator_function(raw) {
        return op.to_string();
    }
    if is_label(raw) {
        return label(raw);
    }
    match raw {
        "len" => return "count".to_string(),
        "_" => return "_".to_string(),
        _ => {}
    }
    if let Some(rest) = raw.strip_prefix('_') {
        return format!("-{}", symbol(rest));
    }
    if let Some(rest) = capitalized_suffix(raw, "is") {
        return format!("{}?", camel_to_dashed(&lower_first(rest)));
    }
    if let Some(rest) = capitalized_suffix(raw, "mutate") {
        return format!("{}!", camel_to_dashed(&lower_first(rest)));
    }
    camel_to_dashed(raw)
}

/// `\anything\` → `anything`
pub fn escaped(raw: &str) -> Option<&str> {
    raw.strip_prefix('\\')?.strip_suffix('\\')
}

/// All uppercase letters, digits, and underscores, with optional
/// `#`/`.` selector segments; must start with a letter.
pub fn is_label(raw: &str) -> bool {
    let mut chars = raw.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_uppercase())
        && raw.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || matches!(c, '_' | '#' | '.'))
}

/// `FOO_BAR` → `:foo-bar`, `IS_EXISTS` → `:exists?`, `DIV#ID.CLASS` → `:div#id.class`
pub fn label(raw: &str) -> String {
    let (body, question) = match raw.strip_prefix("IS_") {
        Some(rest) if !rest.is_empty() => (rest, "?"),
        _ => (raw, ""),
    };
    format!(":{}{question}", body.to_lowercase().replace('_', "-"))
}

/// Method and static member names keep their spelling; only a leading
/// underscore becomes a dash.
pub fn member(raw: &str) -> String {
    if let Some(inner) = escaped(raw) {
        return inner.to_string();
    }
    match raw.strip_prefix('_') {
        Some(rest) => format!("-{rest}"),
        None => raw.to_string(),
    }
}

/// Top-level definitions are private when they start with a lowercase letter.
/// `main` is the program entry point and stays public.
pub fn is_private(raw: &str) -> bool {
    raw != "main" && raw.chars().next().is_some_and(char::is_lowercase)
}

/// Target function for an operator used as a definition or value name.
pub fn operator_function(raw: &str) -> Option<&'static str> {
    Some(match raw {
        "+" => "+",
        "-" => "-",
        "*" => "*",
        "/" => "/",
        "<" => "<",
        ">" => ">",
        "<=" => "<=",
        ">=" => ">=",
        "==" => "=",
        "!=" => "not=",
        "!" => "not",
        "%" => "mod",
        "^" => "bit-xor",
        "|" => "bit-or",
        "&" => "bit-and",
        "&^" => "bit-and-not",
        "<<" => "bit-shift-left",
        ">>" => "bit-shift-right",
        "||" => "or",
        "&&" => "and",
        _ => return None,
    })
}

fn capitalized_suffix<'a>(raw: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = raw.strip_prefix(prefix)?;
    rest.chars().next().filter(|c| c.is_uppercase()).map(|_| rest)
}

fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Insert a dash at each lowercase→uppercase boundary and lowercase the
/// uppercase letter: `fooBarBaz` → `foo-bar-baz`, `FooBar` → `Foo-bar`.
pub fn camel_to_dashed(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 4);
    let mut prev_lower = false;
    for c in raw.chars() {
        if prev_lower && c.is_uppercase() {
            out.push('-');
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
        prev_lower = c.is_lowercase();
    }
    out
}
