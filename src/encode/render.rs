use crate::{
    constants::{RULE_DIRECTIVE, RULE_FIELDS},
    num::number::{format_float, format_int},
    text::string::{has_line_break, quote},
    types::{Map, Value},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderContext {
    /// The value belongs to a multiline parser's `rules` property.
    pub is_rules_field: bool,
}

impl RenderContext {
    pub fn rules() -> Self {
        Self {
            is_rules_field: true,
        }
    }
}

/// Renders a property value as the text that follows its key.
///
/// Never fails: shapes without a dedicated form fall back to a generic
/// stringification.
pub fn render(value: &Value, context: RenderContext) -> String {
    match value {
        Value::String(s) => render_str(s),
        Value::Int(i) => render_str(&format_int(*i)),
        Value::Float(f) => format_float(*f),
        Value::Bool(b) => render_str(if *b { "true" } else { "false" }),
        Value::Map(map) => {
            if context.is_rules_field {
                if let Some(rule) = render_rule(map) {
                    return rule;
                }
            }
            render_json(value)
        }
        Value::List(_) => render_json(value),
    }
}

pub fn render_str(s: &str) -> String {
    if has_line_break(s) {
        return quote(s);
    }
    if s.is_empty() {
        return "\"\"".to_string();
    }
    s.to_string()
}

/// Compact multiline parser transition:
/// `rule<TAB>"<state>"<TAB>"<regex>"<TAB>"<next_state>"`.
pub fn render_rule(map: &Map) -> Option<String> {
    let [state, regex, next_state] = RULE_FIELDS.map(|field| map.get(field));
    let (state, regex, next_state) = (state?, regex?, next_state?);

    Some(format!(
        "{RULE_DIRECTIVE}\t\"{}\"\t\"{}\"\t\"{}\"",
        plain_text(state),
        plain_text(regex),
        plain_text(next_state),
    ))
}

pub fn is_rule(value: &Value) -> bool {
    value
        .as_map()
        .is_some_and(|map| RULE_FIELDS.iter().all(|field| map.contains_key(*field)))
}

// Rule fields are emitted verbatim, without the string quoting rules.
fn plain_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Int(i) => format_int(*i),
        Value::Float(f) => format_float(*f),
        Value::Bool(b) => b.to_string(),
        Value::List(_) | Value::Map(_) => render_json(value),
    }
}

fn render_json(value: &Value) -> String {
    let json: serde_json::Value = value.into();
    // serde_json never escapes HTML characters, so `<`, `>` and `&` stay as-is.
    match serde_json::to_string(&json) {
        Ok(encoded) => encoded,
        Err(_) => format!("{value:?}"),
    }
}
