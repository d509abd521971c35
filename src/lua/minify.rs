use std::borrow::Cow;

use super::lexer::{tokenize, Token, TokenKind};

/// Joins tokens on one line, keeping a single space only where two
/// neighbours would otherwise lex differently.
///
/// String literals that span lines are rewritten as equivalent short strings
/// with `\n` escapes, so the result never contains a line break.
pub(crate) fn join_compact(tokens: &[Token<'_>]) -> String {
    let texts: Vec<Cow<'_, str>> = tokens.iter().map(single_line).collect();
    let tokens: Vec<Token<'_>> = tokens
        .iter()
        .zip(&texts)
        .map(|(token, text)| Token {
            kind: token.kind,
            text: text.as_ref(),
        })
        .collect();

    let mut out = String::with_capacity(tokens.iter().map(|t| t.text.len() + 1).sum());
    let mut prev: Option<&Token<'_>> = None;
    for token in &tokens {
        if let Some(prev) = prev {
            if needs_space(prev, token) {
                out.push(' ');
            }
        }
        out.push_str(token.text);
        prev = Some(token);
    }
    out
}

fn single_line<'a>(token: &Token<'a>) -> Cow<'a, str> {
    if token.kind != TokenKind::String || !token.text.contains(['\n', '\r']) {
        return Cow::Borrowed(token.text);
    }
    if token.text.starts_with('[') {
        Cow::Owned(long_to_short(token.text))
    } else {
        Cow::Owned(fold_short(token.text))
    }
}

// `[==[ ... ]==]` -> `"..."`. A line break right after the opener is not
// part of the string.
fn long_to_short(text: &str) -> String {
    let level = text[1..].bytes().take_while(|b| *b == b'=').count();
    let mut body = &text[level + 2..text.len() - level - 2];
    for opener in ["\r\n", "\n\r", "\n", "\r"] {
        if let Some(rest) = body.strip_prefix(opener) {
            body = rest;
            break;
        }
    }

    let mut out = String::with_capacity(body.len() + 8);
    out.push('"');
    let mut chars = body.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\n' | '\r' => {
                chars.next_if(|next| matches!(*next, '\n' | '\r') && *next != ch);
                out.push_str("\\n");
            }
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

// Replaces `\<newline>` with `\n` and drops `\z` with the whitespace after it.
fn fold_short(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some(newline @ ('\n' | '\r')) => {
                chars.next_if(|next| matches!(*next, '\n' | '\r') && *next != newline);
                out.push_str("\\n");
            }
            Some('z') => {
                while chars
                    .next_if(|next| next.is_ascii_whitespace() || *next == '\x0b')
                    .is_some()
                {}
            }
            Some(escaped) => {
                out.push('\\');
                out.push(escaped);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Whether `prev` immediately followed by `next` would fuse into other tokens
/// (`a` `b` → `ab`, `-` `-` → a comment, `1` `..` → a malformed number).
pub(crate) fn needs_space(prev: &Token<'_>, next: &Token<'_>) -> bool {
    let mut joined = String::with_capacity(prev.text.len() + next.text.len());
    joined.push_str(prev.text);
    joined.push_str(next.text);
    match tokenize(&joined) {
        Ok(tokens) => !(tokens.len() == 2 && tokens[0] == *prev && tokens[1] == *next),
        Err(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compact(source: &str) -> String {
        join_compact(&tokenize(source).unwrap())
    }

    #[rstest::rstest]
    #[case("local  x  =  1", "local x=1")]
    #[case("return a - -b", "return a- -b")]
    #[case("x = 1 .. y", "x=1 ..y")]
    #[case("x = a .. b", "x=a..b")]
    #[case("if x then\n  y()\nend", "if x then y()end")]
    #[case("t[ [[s]] ] = 1", "t[ [[s]]]=1")]
    #[case("x = a // b", "x=a//b")]
    #[case("x = a / / b", "x=a/ /b")]
    #[case("f 'str'", "f'str'")]
    fn test_join_compact(#[case] source: &str, #[case] expected: &str) {
        assert_eq!(compact(source), expected);
    }

    #[rstest::rstest]
    #[case("local s = [[line1\nline2]]\nreturn s\n", r#"local s="line1\nline2"return s"#)]
    #[case("s = [==[\nfirst\r\nsecond \"q\" \\ ]==]", r#"s="first\nsecond \"q\" \\ ""#)]
    #[case("t[ [[a\nb]] ] = 1", r#"t["a\nb"]=1"#)]
    #[case("local s = \"a\\\nb\"", r#"local s="a\nb""#)]
    #[case("local s = 'a\\\r\nb'", r#"local s='a\nb'"#)]
    #[case("x = 'a\\z\n     b'", "x='ab'")]
    #[case("x = [[one line]]", "x=[[one line]]")]
    fn test_multiline_strings_fold_onto_one_line(#[case] source: &str, #[case] expected: &str) {
        let once = compact(source);
        assert!(!once.contains(['\n', '\r']), "{once:?}");
        assert_eq!(once, expected);
        assert_eq!(compact(&once), once);
    }

    #[rstest::rstest]
    fn test_compact_is_stable() {
        let source = "function f(a, b)\n  -- note\n  return a * 2 + b\nend";
        let once = compact(source);
        assert_eq!(compact(&once), once);
    }
}
