/// One whitespace-delimited token and the 1-based source line it came from.
#[derive(Debug, Clone, Copy)]
pub struct Token<'a> {
    pub text: &'a str,
    pub line: usize,
}

/// Pull-based token stream over a fully buffered .bvh file.
///
/// The grammar is whitespace/newline-insensitive with no quoting or
/// comments, so tokenizing is plain whitespace splitting; line numbers are
/// kept per token for error reporting.
pub struct TokenStream<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
}

impl<'a> TokenStream<'a> {
    pub fn new(content: &'a str) -> Self {
        let mut tokens = Vec::new();
        for (line_index, line) in content.lines().enumerate() {
            for word in line.split_whitespace() {
                tokens.push(Token {
                    text: word,
                    line: line_index + 1,
                });
            }
        }
        Self { tokens, pos: 0 }
    }

    pub fn next(&mut self) -> Option<Token<'a>> {
        let token = self.tokens.get(self.pos).copied();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Line of the next unconsumed token, or of the last token once the
    /// stream is exhausted. Used to locate end-of-file errors.
    pub fn line(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map(|token| token.line)
            .unwrap_or(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_any_whitespace_and_tracks_lines() {
        let mut tokens = TokenStream::new("ROOT Hips\n{\n\tOFFSET  0.0 1.5\t-2.0\n}");
        let expected = [
            ("ROOT", 1),
            ("Hips", 1),
            ("{", 2),
            ("OFFSET", 3),
            ("0.0", 3),
            ("1.5", 3),
            ("-2.0", 3),
            ("}", 4),
        ];
        for (text, line) in expected {
            let token = tokens.next().unwrap();
            assert_eq!((token.text, token.line), (text, line));
        }
        assert!(tokens.next().is_none());
    }

    #[test]
    fn line_reports_last_line_after_exhaustion() {
        let mut tokens = TokenStream::new("a\nb\nc");
        assert_eq!(tokens.line(), 1);
        while tokens.next().is_some() {}
        assert_eq!(tokens.line(), 3);
        assert_eq!(TokenStream::new("").line(), 1);
    }
}
