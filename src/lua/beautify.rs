use super::lexer::{Token, TokenKind};
use super::minify::needs_space;

const INDENT: &str = "  ";

/// Lays tokens out one statement per line with two-space block indentation.
pub(crate) fn layout(tokens: &[Token<'_>]) -> String {
    let mut layout = Layout::default();
    for (i, token) in tokens.iter().enumerate() {
        let prev = i.checked_sub(1).map(|j| &tokens[j]);
        layout.push(prev, token);
    }
    layout.finish()
}

#[derive(Default)]
struct Layout {
    lines: Vec<String>,
    current: String,
    /// Paren depth at which each open block started.
    blocks: Vec<usize>,
    /// Paren depth of each pending function parameter list.
    params: Vec<usize>,
    depth: usize,
    pending_function: bool,
    block_opened: bool,
    in_label: bool,
}

impl Layout {
    fn push(&mut self, prev: Option<&Token<'_>>, token: &Token<'_>) {
        if token.is_keyword("end") || token.is_keyword("until") || token.is_keyword("elseif") {
            self.blocks.pop();
        }
        if token.is_keyword("else") {
            self.blocks.pop();
        }

        match prev {
            Some(prev) if self.breaks_before(prev, token) => {
                self.newline();
                self.current.push_str(token.text);
            }
            Some(prev) => {
                let closes_label = token.is_symbol("::") && self.in_label;
                if (!closes_label && wants_space(prev, token)) || needs_space(prev, token) {
                    self.current.push(' ');
                }
                self.current.push_str(token.text);
            }
            None => {
                self.start_line();
                self.current.push_str(token.text);
            }
        }
        self.block_opened = false;

        match (token.kind, token.text) {
            (TokenKind::Keyword, "then" | "do" | "else" | "repeat") => self.open_block(),
            (TokenKind::Keyword, "function") => self.pending_function = true,
            (TokenKind::Symbol, "(") => {
                self.depth += 1;
                if self.pending_function {
                    self.params.push(self.depth);
                    self.pending_function = false;
                }
            }
            (TokenKind::Symbol, ")") => {
                let closes_params = self.params.last() == Some(&self.depth);
                self.depth = self.depth.saturating_sub(1);
                if closes_params {
                    self.params.pop();
                    self.open_block();
                }
            }
            (TokenKind::Symbol, "[" | "{") => self.depth += 1,
            (TokenKind::Symbol, "]" | "}") => self.depth = self.depth.saturating_sub(1),
            (TokenKind::Symbol, "::") => self.in_label = !self.in_label,
            _ => {}
        }
    }

    fn breaks_before(&self, prev: &Token<'_>, token: &Token<'_>) -> bool {
        if self.block_opened {
            return true;
        }
        if self.in_label && prev.is_symbol("::") {
            return false;
        }
        if matches!(token.kind, TokenKind::Keyword)
            && matches!(token.text, "end" | "else" | "elseif" | "until")
        {
            return true;
        }
        let local_depth = self.depth - self.blocks.last().copied().unwrap_or(0).min(self.depth);
        if local_depth > 0 || !ends_expression(prev) {
            return false;
        }
        match token.kind {
            TokenKind::Keyword => matches!(
                token.text,
                "local" | "if" | "for" | "while" | "repeat" | "return" | "break" | "goto" | "function"
            ),
            TokenKind::Name => true,
            TokenKind::Symbol => token.text == "::" && !self.in_label,
            _ => false,
        }
    }

    fn open_block(&mut self) {
        self.blocks.push(self.depth);
        self.block_opened = true;
    }

    fn start_line(&mut self) {
        for _ in 0..self.blocks.len() {
            self.current.push_str(INDENT);
        }
    }

    fn newline(&mut self) {
        let line = std::mem::take(&mut self.current);
        if !line.trim().is_empty() {
            self.lines.push(line);
        }
        self.start_line();
    }

    fn finish(mut self) -> String {
        if !self.current.trim().is_empty() {
            self.lines.push(std::mem::take(&mut self.current));
        }
        let mut out = self.lines.join("\n");
        if !out.is_empty() {
            out.push('\n');
        }
        out
    }
}

fn ends_expression(token: &Token<'_>) -> bool {
    match token.kind {
        TokenKind::Name | TokenKind::Number | TokenKind::String => true,
        TokenKind::Keyword => matches!(token.text, "end" | "true" | "false" | "nil" | "break"),
        TokenKind::Symbol => matches!(token.text, ")" | "]" | "}" | "..." | "::"),
    }
}

// Cosmetic spacing; `needs_space` still guards against fused tokens.
fn wants_space(prev: &Token<'_>, token: &Token<'_>) -> bool {
    if prev.kind == TokenKind::Symbol && matches!(prev.text, "(" | "[" | "{" | "." | ":" | "#" | "::") {
        return false;
    }
    if token.kind == TokenKind::Symbol {
        return match token.text {
            ")" | "]" | "}" | "," | ";" | "." | ":" => false,
            "(" | "[" => !ends_expression(prev) && !prev.is_keyword("function"),
            _ => true,
        };
    }
    true
}
