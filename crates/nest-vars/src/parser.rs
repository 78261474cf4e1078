use std::fmt;

/// One entry of a var file, either a variable or a skipped malformed entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedEntry {
    Var { key: String, value: String },
    Skipped(SkippedEntry),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    /// 1-based line the entry starts on.
    pub line: usize,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingIdentifier,
    UnterminatedString,
    MissingHexDigits,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingIdentifier => write!(f, "expected a variable name"),
            Self::UnterminatedString => write!(f, "unterminated string"),
            Self::MissingHexDigits => write!(f, "\\x escape without hex digits"),
        }
    }
}

impl fmt::Display for SkippedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.reason)
    }
}

#[must_use]
pub fn is_valid_var_name(name: &str) -> bool {
    let mut bytes = name.bytes();
    bytes
        .next()
        .is_some_and(|b| b.is_ascii_alphabetic() || b == b'_')
        && bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Parses var file content into entries, in file order.
///
/// Each entry is `NAME [=] value [;]` where the value is one or more
/// adjacent quoted strings or a bare token running to `;` or end of line.
/// Malformed entries are reported as [`ParsedEntry::Skipped`] and parsing
/// resumes after the `;` or line break that ends the bad entry.
#[must_use]
pub fn parse_vars(text: impl AsRef<[u8]>) -> Vec<ParsedEntry> {
    let mut cursor = Cursor::new(text.as_ref());
    let mut entries = Vec::new();

    loop {
        cursor.skip_blanks();
        if cursor.at_end() {
            break;
        }
        entries.push(cursor.entry());
    }

    entries
}

struct Cursor<'a> {
    src: &'a [u8],
    pos: usize,
    line: usize,
}

impl<'a> Cursor<'a> {
    const fn new(src: &'a [u8]) -> Self {
        Self {
            src,
            pos: 0,
            line: 1,
        }
    }

    const fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn peek_next(&self) -> Option<u8> {
        self.src.get(self.pos + 1).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let c = self.peek()?;
        self.pos += 1;
        if c == b'\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn eat(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Whitespace and C/C++ comments.
    fn skip_blanks(&mut self) {
        loop {
            match (self.peek(), self.peek_next()) {
                (Some(c), _) if c.is_ascii_whitespace() => {
                    self.bump();
                }
                (Some(b'/'), Some(b'/')) => {
                    while self.peek().is_some_and(|c| c != b'\n') {
                        self.bump();
                    }
                }
                (Some(b'/'), Some(b'*')) => {
                    self.pos += 2;
                    while !self.at_end()
                        && !(self.peek() == Some(b'*') && self.peek_next() == Some(b'/'))
                    {
                        self.bump();
                    }
                    self.pos = (self.pos + 2).min(self.src.len());
                }
                _ => break,
            }
        }
    }

    fn entry(&mut self) -> ParsedEntry {
        let line = self.line;
        let skipped = |cursor: &mut Self, reason| {
            cursor.recover();
            ParsedEntry::Skipped(SkippedEntry { line, reason })
        };

        let Some(key) = self.identifier() else {
            return skipped(self, SkipReason::MissingIdentifier);
        };

        self.skip_blanks();
        self.eat(b'=');
        self.skip_blanks();

        let value = if self.peek() == Some(b'"') {
            match self.strings() {
                Ok(value) => value,
                Err(reason) => {
                    self.skip_string_rest();
                    return skipped(self, reason);
                }
            }
        } else {
            self.raw_token()
        };

        self.skip_blanks();
        self.eat(b';');

        ParsedEntry::Var { key, value }
    }

    fn identifier(&mut self) -> Option<String> {
        let start = self.pos;
        if !self.peek().is_some_and(|c| c.is_ascii_alphabetic() || c == b'_') {
            return None;
        }
        while self.peek().is_some_and(|c| c.is_ascii_alphanumeric() || c == b'_') {
            self.bump();
        }
        self.src
            .get(start..self.pos)
            .map(|id| String::from_utf8_lossy(id).into_owned())
    }

    fn raw_token(&mut self) -> String {
        let start = self.pos;
        while self.peek().is_some_and(|c| !matches!(c, b';' | b'\r' | b'\n')) {
            self.bump();
        }
        let token = self.src.get(start..self.pos).unwrap_or_default();
        String::from_utf8_lossy(token).trim_end().to_string()
    }

    /// One or more adjacent quoted strings, concatenated.
    fn strings(&mut self) -> Result<String, SkipReason> {
        let mut bytes = Vec::new();
        loop {
            self.quoted(&mut bytes)?;
            self.skip_blanks();
            if self.peek() != Some(b'"') {
                break;
            }
        }
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn quoted(&mut self, out: &mut Vec<u8>) -> Result<(), SkipReason> {
        self.bump();
        loop {
            match self.peek() {
                None | Some(b'\n' | b'\r') => return Err(SkipReason::UnterminatedString),
                Some(b'"') => {
                    self.bump();
                    return Ok(());
                }
                Some(b'\\') => {
                    self.bump();
                    self.escape(out)?;
                }
                Some(c) => {
                    self.bump();
                    out.push(c);
                }
            }
        }
    }

    fn escape(&mut self, out: &mut Vec<u8>) -> Result<(), SkipReason> {
        let c = match self.peek() {
            None | Some(b'\n' | b'\r') => return Err(SkipReason::UnterminatedString),
            Some(c) => c,
        };
        self.bump();

        let byte = match c {
            b'a' => 0x07,
            b'b' => 0x08,
            b'f' => 0x0c,
            b'n' => b'\n',
            b'r' => b'\r',
            b't' => b'\t',
            b'v' => 0x0b,
            b'x' => self.digits(16, 2).ok_or(SkipReason::MissingHexDigits)?,
            b'0'..=b'7' => {
                self.pos -= 1;
                self.digits(8, 3).unwrap_or_default()
            }
            other => other,
        };
        out.push(byte);
        Ok(())
    }

    /// Up to `max` digits in `radix`, folded into a byte.
    fn digits(&mut self, radix: u32, max: usize) -> Option<u8> {
        let mut value: u32 = 0;
        let mut count = 0;
        while count < max {
            let Some(digit) = self.peek().and_then(|c| char::from(c).to_digit(radix)) else {
                break;
            };
            self.bump();
            value = value * radix + digit;
            count += 1;
        }
        (count > 0).then(|| u8::try_from(value & 0xff).unwrap_or_default())
    }

    /// Moves past the closing quote of a string abandoned mid-way, stopping
    /// at a line break, so a `;` inside the string is not taken as the end
    /// of the entry.
    fn skip_string_rest(&mut self) {
        while let Some(c) = self.peek() {
            match c {
                b'\n' | b'\r' => break,
                b'"' => {
                    self.bump();
                    break;
                }
                b'\\' => {
                    self.bump();
                    if self.peek().is_some_and(|c| !matches!(c, b'\n' | b'\r')) {
                        self.bump();
                    }
                }
                _ => {
                    self.bump();
                }
            }
        }
    }

    /// Skips past the rest of a malformed entry.
    fn recover(&mut self) {
        while let Some(c) = self.bump() {
            if matches!(c, b';' | b'\n') {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(key: &str, value: &str) -> ParsedEntry {
        ParsedEntry::Var {
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_quoted_and_bare() {
        let entries = parse_vars("UPP = \"/proj/a:/proj/b\";\nOUTPUT = /tmp/out;\n");
        assert_eq!(
            entries,
            vec![var("UPP", "/proj/a:/proj/b"), var("OUTPUT", "/tmp/out")]
        );
    }

    #[test]
    fn test_whitespace_tolerance() {
        let entries = parse_vars("  \tA=\"x\" ;\r\n\r\n B   =   y z  \r\nC\t=\"\";");
        assert_eq!(entries, vec![var("A", "x"), var("B", "y z"), var("C", "")]);
    }

    #[test]
    fn test_optional_separators() {
        let entries = parse_vars("A \"one\"\nB = two");
        assert_eq!(entries, vec![var("A", "one"), var("B", "two")]);
    }

    #[test]
    fn test_adjacent_strings_concatenate() {
        let entries = parse_vars("A = \"/x\"\n    \"/y\";");
        assert_eq!(entries, vec![var("A", "/x/y")]);
    }

    #[test]
    fn test_escapes() {
        let entries = parse_vars(r#"A = "q\"\\\n\t\x41\101\0end";"#);
        assert_eq!(entries, vec![var("A", "q\"\\\n\tAA\0end")]);
    }

    #[test]
    fn test_comments_ignored() {
        let entries = parse_vars("// header\nA = \"1\"; /* block\n comment */ B = \"2\";");
        assert_eq!(entries, vec![var("A", "1"), var("B", "2")]);
    }

    #[test]
    fn test_malformed_entry_is_skipped() {
        let entries = parse_vars("A = \"1\";\n123 = bad;\nB = \"2\";\n");
        assert_eq!(
            entries,
            vec![
                var("A", "1"),
                ParsedEntry::Skipped(SkippedEntry {
                    line: 2,
                    reason: SkipReason::MissingIdentifier,
                }),
                var("B", "2"),
            ]
        );
    }

    #[test]
    fn test_unterminated_string_is_skipped() {
        let entries = parse_vars("A = \"open\nB = \"2\";");
        assert_eq!(
            entries,
            vec![
                ParsedEntry::Skipped(SkippedEntry {
                    line: 1,
                    reason: SkipReason::UnterminatedString,
                }),
                var("B", "2"),
            ]
        );
    }

    #[test]
    fn test_bad_hex_escape_is_skipped() {
        let entries = parse_vars("A = \"\\xZZ\";\nB = ok;");
        assert_eq!(entries.len(), 2);
        assert!(matches!(
            entries.first(),
            Some(ParsedEntry::Skipped(SkippedEntry {
                reason: SkipReason::MissingHexDigits,
                ..
            }))
        ));
        assert_eq!(entries.get(1), Some(&var("B", "ok")));
    }

    #[test]
    fn test_bad_escape_before_semicolon_in_string() {
        let entries = parse_vars("A = \"\\xZZ;x\";\nB = \"2\";");
        assert_eq!(
            entries,
            vec![
                ParsedEntry::Skipped(SkippedEntry {
                    line: 1,
                    reason: SkipReason::MissingHexDigits,
                }),
                var("B", "2"),
            ]
        );
    }

    #[test]
    fn test_bad_escape_with_escaped_quote_after_it() {
        let entries = parse_vars("A = \"\\x;\\\";\";\nB = ok;");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries.get(1), Some(&var("B", "ok")));
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_vars("").is_empty());
        assert!(parse_vars("  \n// only a comment\n").is_empty());
    }

    #[test]
    fn test_valid_var_names() {
        assert!(is_valid_var_name("UPP"));
        assert!(is_valid_var_name("_build_2"));
        assert!(!is_valid_var_name(""));
        assert!(!is_valid_var_name("2x"));
        assert!(!is_valid_var_name("A-B"));
    }
}
