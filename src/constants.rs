pub const DEFAULT_INDENT: usize = 4;

/// Minimum spaces between aligned columns.
pub const COLUMN_PADDING: usize = 1;

pub const RULES_KEY: &str = "rules";

pub const RULE_DIRECTIVE: &str = "rule";

pub const RULE_FIELDS: [&str; 3] = ["state", "regex", "next_state"];

pub const LUA_FILTER_NAME: &str = "lua";

pub const LUA_CODE_KEY: &str = "code";

pub const NAME_KEY: &str = "name";

#[inline]
pub fn is_rules_key(key: &str) -> bool {
    key.eq_ignore_ascii_case(RULES_KEY)
}

#[inline]
pub fn is_lua_code_key(key: &str) -> bool {
    key.eq_ignore_ascii_case(LUA_CODE_KEY)
}
