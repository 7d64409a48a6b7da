//! Shared string helpers for emitting C.

/// C and C++ keywords. Generated stubs are compiled as either language, so
/// names from the manifest must avoid both sets.
const C_KEYWORDS: &[&str] = &[
    // C
    "auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else",
    "enum", "extern", "float", "for", "goto", "if", "inline", "int", "long", "register",
    "restrict", "return", "short", "signed", "sizeof", "static", "struct", "switch", "typedef",
    "union", "unsigned", "void", "volatile", "while",
    // C++
    "bool", "catch", "class", "delete", "false", "friend", "mutable", "namespace", "new",
    "noexcept", "nullptr", "operator", "private", "protected", "public", "template", "this",
    "throw", "true", "try", "typename", "using", "virtual",
];

/// Check if a name is a C or C++ keyword
pub fn is_c_keyword(name: &str) -> bool {
    C_KEYWORDS.contains(&name)
}

/// Check if a name is a syntactically valid C identifier (keywords are not rejected here)
pub fn is_c_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Convert an identifier to SCREAMING_SNAKE_CASE (e.g., "stoch_rsi" -> "STOCH_RSI")
pub fn to_upper_snake_case(s: &str) -> String {
    s.replace('-', "_").to_ascii_uppercase()
}

/// Quote a string as a C string literal, escaping quotes, backslashes and control characters
pub fn c_string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_c_identifier() {
        assert!(is_c_identifier("sma"));
        assert!(is_c_identifier("stoch_rsi"));
        assert!(is_c_identifier("_tmp1"));
        assert!(!is_c_identifier(""));
        assert!(!is_c_identifier("1st"));
        assert!(!is_c_identifier("my-ind"));
        assert!(!is_c_identifier("a b"));
    }

    #[test]
    fn test_is_c_keyword() {
        assert!(is_c_keyword("int"));
        assert!(is_c_keyword("new"));
        assert!(is_c_keyword("delete"));
        assert!(!is_c_keyword("period"));
    }

    #[test]
    fn test_to_upper_snake_case() {
        assert_eq!(to_upper_snake_case("sma"), "SMA");
        assert_eq!(to_upper_snake_case("stoch_rsi"), "STOCH_RSI");
        assert_eq!(to_upper_snake_case(""), "");
    }

    #[test]
    fn test_c_string_literal() {
        assert_eq!(c_string_literal("Simple Moving Average"), "\"Simple Moving Average\"");
        assert_eq!(c_string_literal("a \"b\""), "\"a \\\"b\\\"\"");
        assert_eq!(c_string_literal("C:\\x"), "\"C:\\\\x\"");
        assert_eq!(c_string_literal("a\nb"), "\"a\\nb\"");
    }
}
