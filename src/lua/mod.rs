//! Compaction and re-formatting of inline `lua` filter scripts.
//!
//! Both directions work on the token stream, so they only ever change
//! whitespace and drop comments: `minify(beautify(minify(x))) == minify(x)`.

mod beautify;
mod check;
pub mod lexer;
mod minify;

use crate::Result;

/// Compacts a Lua chunk onto a single line.
///
/// Comments are removed and whitespace collapses to a single space where two
/// tokens would otherwise run together. Lexical errors and interpreter
/// compile errors are returned as [`crate::ErrorKind::Minifier`].
pub fn minify(source: &str) -> Result<String> {
    check::compile(source)?;
    let tokens = lexer::tokenize(source)?;
    let compact = minify::join_compact(&tokens);
    check::compile(&compact)?;
    tracing::debug!(
        tokens = tokens.len(),
        before = source.len(),
        after = compact.len(),
        "minified lua chunk"
    );
    Ok(compact)
}

/// Spreads a Lua chunk over lines with two-space block indentation.
pub fn beautify(source: &str) -> Result<String> {
    check::compile(source)?;
    let tokens = lexer::tokenize(source)?;
    let pretty = beautify::layout(&tokens);
    check::compile(&pretty)?;
    Ok(pretty)
}
