//! Text output for generated script code

/// Append-only text buffer for generated code
///
/// In compact mode the optional whitespace calls (`newline_opt`,
/// `space_opt`) write nothing.
#[derive(Debug, Clone, Default)]
pub struct TextOutput {
    buf: String,
    compact: bool,
}

impl TextOutput {
    /// Create an empty buffer
    #[inline]
    #[must_use]
    pub fn new(compact: bool) -> Self {
        Self {
            buf: String::new(),
            compact,
        }
    }

    /// Whether optional whitespace is suppressed
    #[inline]
    #[must_use]
    pub fn is_compact(&self) -> bool {
        self.compact
    }

    /// Append text verbatim
    #[inline]
    pub fn print(&mut self, text: &str) {
        self.buf.push_str(text);
    }

    /// Append a line break
    #[inline]
    pub fn newline(&mut self) {
        self.buf.push('\n');
    }

    /// Append a line break unless compact
    #[inline]
    pub fn newline_opt(&mut self) {
        if !self.compact {
            self.newline();
        }
    }

    /// Append a space unless compact
    #[inline]
    pub fn space_opt(&mut self) {
        if !self.compact {
            self.buf.push(' ');
        }
    }

    /// Text written so far
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Consume the buffer
    #[inline]
    #[must_use]
    pub fn into_string(self) -> String {
        self.buf
    }
}

/// Quote `value` as a JavaScript string literal using `quote`
///
/// Only backslashes, the quote character, and line terminators are escaped.
#[must_use]
pub fn js_string_literal(value: &str, quote: char) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_output_drops_optional_whitespace() {
        let mut out = TextOutput::new(true);
        out.print("a;");
        out.newline_opt();
        out.space_opt();
        out.print("b;");
        assert_eq!(out.into_string(), "a;b;");
    }

    #[test]
    fn pretty_output_keeps_optional_whitespace() {
        let mut out = TextOutput::new(false);
        out.print("a;");
        out.newline_opt();
        out.space_opt();
        out.print("b;");
        out.newline();
        assert_eq!(out.as_str(), "a;\n b;\n");
    }

    #[test]
    fn forced_newline_survives_compact() {
        let mut out = TextOutput::new(true);
        out.newline();
        assert_eq!(out.as_str(), "\n");
    }

    #[test]
    fn string_literal_plain() {
        assert_eq!(js_string_literal("ABCD1234", '\''), "'ABCD1234'");
        assert_eq!(js_string_literal("2.9.0", '"'), "\"2.9.0\"");
    }

    #[test]
    fn string_literal_escapes_only_what_is_needed() {
        assert_eq!(js_string_literal(r"a'b\c", '\''), r"'a\'b\\c'");
        assert_eq!(js_string_literal("a\"b", '\''), "'a\"b'");
        assert_eq!(js_string_literal("a\nb", '"'), "\"a\\nb\"");
    }
}
