use crate::Result;

/// Compiles `source` in a fresh interpreter without running it.
///
/// The interpreter lives only for this call and is never shared.
#[cfg(feature = "lua-check")]
pub(crate) fn compile(source: &str) -> Result<()> {
    let lua = mlua::Lua::new();
    lua.load(source).set_name("=filter").into_function()?;
    Ok(())
}

#[cfg(not(feature = "lua-check"))]
pub(crate) fn compile(_source: &str) -> Result<()> {
    Ok(())
}

#[cfg(all(test, feature = "lua-check"))]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[rstest::rstest]
    fn test_valid_chunk_compiles() {
        assert!(compile("local x = 1 return x").is_ok());
    }

    #[rstest::rstest]
    fn test_syntax_error_is_surfaced() {
        let err = compile("function f( return end").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Minifier);
        assert!(err.message.contains("filter"), "{}", err.message);
    }

    #[rstest::rstest]
    fn test_chunk_is_not_executed() {
        assert!(compile("error('boom')").is_ok());
    }
}
