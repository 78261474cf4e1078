use std::fmt::Write;

/// Quotes `value` as a C string literal, the form the writer always emits.
#[must_use]
pub fn escape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\x07' => out.push_str("\\a"),
            '\x08' => out.push_str("\\b"),
            '\x0c' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\x0b' => out.push_str("\\v"),
            c if c.is_ascii_control() => {
                let _ = write!(out, "\\{:03o}", u32::from(c));
            }
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
    fn test_plain_value() {
        assert_eq!(escape_value("/proj/a:/proj/b"), "\"/proj/a:/proj/b\"");
    }

    #[test]
    fn test_special_characters() {
        assert_eq!(escape_value("say \"hi\"\n"), r#""say \"hi\"\n""#);
        assert_eq!(escape_value("C:\\upp"), r#""C:\\upp""#);
        assert_eq!(escape_value("\x01\x7f"), r#""\001\177""#);
    }

    #[test]
    fn test_non_ascii_kept() {
        assert_eq!(escape_value("Größe"), "\"Größe\"");
    }
}
