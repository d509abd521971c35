use crate::{Error, Result};

const KEYWORDS: &[&str] = &[
    "and", "break", "do", "else", "elseif", "end", "false", "for", "function", "goto", "if", "in",
    "local", "nil", "not", "or", "repeat", "return", "then", "true", "until", "while",
];

// Longest first so that greedy matching picks `...` over `..` over `.`.
const SYMBOLS: &[&str] = &[
    "...", "..", "==", "~=", "<=", ">=", "<<", ">>", "//", "::", "+", "-", "*", "/", "%", "^", "#",
    "&", "~", "|", "<", ">", "=", "(", ")", "{", "}", "[", "]", ";", ":", ",", ".",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Name,
    Keyword,
    Number,
    String,
    Symbol,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

impl<'a> Token<'a> {
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text == keyword
    }

    pub fn is_symbol(&self, symbol: &str) -> bool {
        self.kind == TokenKind::Symbol && self.text == symbol
    }
}

#[inline]
pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

/// Splits Lua source into tokens, dropping whitespace and comments.
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token()? {
        tokens.push(token);
    }
    Ok(tokens)
}

struct Lexer<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    line: usize,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            line: 1,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn error(&self, message: &str) -> Error {
        Error::minifier(format!("lua:{}: {message}", self.line))
    }

    fn next_token(&mut self) -> Result<Option<Token<'a>>> {
        self.skip_trivia()?;
        let Some(byte) = self.peek() else {
            return Ok(None);
        };
        let start = self.pos;

        let kind = match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => {
                while self
                    .peek()
                    .is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_')
                {
                    self.pos += 1;
                }
                if is_keyword(&self.src[start..self.pos]) {
                    TokenKind::Keyword
                } else {
                    TokenKind::Name
                }
            }
            b'0'..=b'9' => {
                self.read_numeral()?;
                TokenKind::Number
            }
            b'.' if self.peek_at(1).is_some_and(|b| b.is_ascii_digit()) => {
                self.read_numeral()?;
                TokenKind::Number
            }
            b'"' | b'\'' => {
                self.read_short_string(byte)?;
                TokenKind::String
            }
            b'[' => match self.long_bracket_level() {
                Some(level) => {
                    self.read_long_bracket(level, "unfinished long string")?;
                    TokenKind::String
                }
                None if self.peek_at(1) == Some(b'=') => {
                    return Err(self.error("invalid long string delimiter"));
                }
                None => {
                    self.pos += 1;
                    TokenKind::Symbol
                }
            },
            _ => {
                let rest = &self.src[self.pos..];
                match SYMBOLS.iter().find(|sym| rest.starts_with(**sym)) {
                    Some(sym) => {
                        self.pos += sym.len();
                        TokenKind::Symbol
                    }
                    None => {
                        let ch = rest.chars().next().unwrap_or_default();
                        return Err(self.error(&format!("unexpected symbol near '{ch}'")));
                    }
                }
            }
        };

        Ok(Some(Token {
            kind,
            text: &self.src[start..self.pos],
        }))
    }

    fn skip_trivia(&mut self) -> Result<()> {
        while let Some(byte) = self.peek() {
            match byte {
                b'\n' => {
                    self.line += 1;
                    self.pos += 1;
                }
                b' ' | b'\t' | b'\r' | 0x0b | 0x0c => self.pos += 1,
                b'-' if self.peek_at(1) == Some(b'-') => {
                    self.pos += 2;
                    if self.peek() == Some(b'[') {
                        if let Some(level) = self.long_bracket_level() {
                            self.read_long_bracket(level, "unfinished long comment")?;
                            continue;
                        }
                    }
                    while self.peek().is_some_and(|b| b != b'\n') {
                        self.pos += 1;
                    }
                }
                _ => break,
            }
        }
        Ok(())
    }

    /// At `[`: the level of a long bracket opener (`[[`, `[==[`), if any.
    fn long_bracket_level(&self) -> Option<usize> {
        let mut offset = 1;
        while self.peek_at(offset) == Some(b'=') {
            offset += 1;
        }
        (self.peek_at(offset) == Some(b'[')).then_some(offset - 1)
    }

    fn read_long_bracket(&mut self, level: usize, unfinished: &str) -> Result<()> {
        self.pos += level + 2;
        loop {
            match self.peek() {
                None => return Err(self.error(unfinished)),
                Some(b']') => {
                    let closes = (1..=level).all(|i| self.peek_at(i) == Some(b'='))
                        && self.peek_at(level + 1) == Some(b']');
                    if closes {
                        self.pos += level + 2;
                        return Ok(());
                    }
                    self.pos += 1;
                }
                Some(b'\n') => {
                    self.line += 1;
                    self.pos += 1;
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    fn read_short_string(&mut self, quote: u8) -> Result<()> {
        self.pos += 1;
        loop {
            match self.peek() {
                None | Some(b'\n') | Some(b'\r') => {
                    return Err(self.error("unfinished string"));
                }
                Some(b'\\') => match self.peek_at(1) {
                    None => return Err(self.error("unfinished string")),
                    Some(newline @ (b'\n' | b'\r')) => {
                        self.pos += 2;
                        // `\r\n` and `\n\r` count as one line break.
                        if matches!(self.peek(), Some(b @ (b'\n' | b'\r')) if b != newline) {
                            self.pos += 1;
                        }
                        self.line += 1;
                    }
                    Some(b'z') => {
                        self.pos += 2;
                        self.skip_whitespace();
                    }
                    Some(_) => self.pos += 2,
                },
                Some(b) if b == quote => {
                    self.pos += 1;
                    return Ok(());
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(byte) = self.peek() {
            match byte {
                b'\n' => {
                    self.line += 1;
                    self.pos += 1;
                }
                b' ' | b'\t' | b'\r' | 0x0b | 0x0c => self.pos += 1,
                _ => break,
            }
        }
    }

    fn read_numeral(&mut self) -> Result<()> {
        let start = self.pos;
        let hex = self.peek() == Some(b'0') && matches!(self.peek_at(1), Some(b'x' | b'X'));
        let exponent: &[u8] = if hex {
            self.pos += 2;
            b"Pp"
        } else {
            b"Ee"
        };
        loop {
            match self.peek() {
                Some(b) if exponent.contains(&b) => {
                    self.pos += 1;
                    if matches!(self.peek(), Some(b'+' | b'-')) {
                        self.pos += 1;
                    }
                }
                Some(b) if b.is_ascii_hexdigit() || b == b'.' => self.pos += 1,
                _ => break,
            }
        }
        if self
            .peek()
            .is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_')
        {
            return Err(self.error("malformed number"));
        }
        let text = &self.bytes[start..self.pos];
        let valid = if hex {
            text.len() > 2
        } else {
            text.iter()
                .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
                && text.iter().filter(|b| **b == b'.').count() <= 1
        };
        if !valid {
            return Err(self.error("malformed number"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(source: &str) -> Vec<&str> {
        tokenize(source).unwrap().into_iter().map(|t| t.text).collect()
    }

    #[rstest::rstest]
    fn test_names_keywords_and_symbols() {
        let tokens = tokenize("local x = a..b ~= c").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Keyword);
        assert_eq!(tokens[1].kind, TokenKind::Name);
        assert_eq!(
            tokens.iter().map(|t| t.text).collect::<Vec<_>>(),
            vec!["local", "x", "=", "a", "..", "b", "~=", "c"]
        );
    }

    #[rstest::rstest]
    fn test_comments_are_dropped() {
        assert_eq!(
            texts("a -- trailing\nb --[[ block\n ]] c --[==[ x ]==] d --[= line\ne"),
            vec!["a", "b", "c", "d", "e"]
        );
    }

    #[rstest::rstest]
    #[case("3")]
    #[case("3.25")]
    #[case("0x1F")]
    #[case("1e-3")]
    #[case("0x1p4")]
    #[case(".5")]
    fn test_numerals(#[case] source: &str) {
        let tokens = tokenize(source).unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Number);
        assert_eq!(tokens[0].text, source);
    }

    #[rstest::rstest]
    fn test_strings_keep_their_quotes_and_escapes() {
        assert_eq!(
            texts(r#"x = "a \"q\" b" .. 'c' .. [[long
string]]"#),
            vec!["x", "=", r#""a \"q\" b""#, "..", "'c'", "..", "[[long\nstring]]"]
        );
    }

    #[rstest::rstest]
    #[case("'a\\\nb'")]
    #[case("'a\\\r\nb'")]
    #[case("\"a\\z\n     b\"")]
    fn test_escaped_line_breaks_stay_in_one_string(#[case] source: &str) {
        let tokens = tokenize(source).unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].text, source);
    }

    #[rstest::rstest]
    fn test_escaped_line_break_advances_line() {
        let err = tokenize("s = 'a\\\nb'\nt = 'x\n").unwrap_err();
        assert!(err.message.starts_with("lua:3:"), "{}", err.message);
    }

    #[rstest::rstest]
    #[case("x = 'open")]
    #[case("--[[ never closed")]
    #[case("x = [[ never closed")]
    #[case("x = 3abc")]
    #[case("x = 3xyz")]
    #[case("x = 1..2")]
    #[case("x = $")]
    #[case("x = [=")]
    fn test_lexical_errors(#[case] source: &str) {
        let err = tokenize(source).unwrap_err();
        assert_eq!(err.kind, crate::ErrorKind::Minifier);
    }

    #[rstest::rstest]
    fn test_error_reports_line() {
        let err = tokenize("a = 1\nb = 'x\n").unwrap_err();
        assert!(err.message.starts_with("lua:2:"), "{}", err.message);
    }
}
