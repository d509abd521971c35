use crate::{
    constants::{is_lua_code_key, is_rules_key, LUA_FILTER_NAME, RULE_DIRECTIVE},
    encode::{
        render::{is_rule, render, render_rule, RenderContext},
        tabwriter::TabAligner,
    },
    lua,
    types::{PluginClass, PluginInstance, Properties, Value},
    ConvertOptions, Error, Result,
};

/// Accumulates the classic-format text for one conversion.
pub(crate) struct Writer {
    buffer: String,
    indent_unit: String,
    aligner: TabAligner,
}

impl Writer {
    pub fn new(options: &ConvertOptions) -> Self {
        Self {
            buffer: String::new(),
            indent_unit: " ".repeat(options.indent.get_spaces()),
            aligner: TabAligner::new(),
        }
    }

    pub fn finish(self) -> String {
        self.buffer
    }

    /// `@SET key=value`, one line per entry.
    pub fn write_env(&mut self, env: &Properties) {
        for prop in env {
            let value = render(&prop.value, RenderContext::default());
            self.buffer.push_str("@SET ");
            self.buffer.push_str(&prop.key);
            self.buffer.push('=');
            self.buffer.push_str(&value);
            self.buffer.push('\n');
        }
    }

    pub fn write_includes(&mut self, includes: &[String]) {
        for include in includes {
            self.buffer.push_str("@INCLUDE ");
            self.buffer.push_str(include);
            self.buffer.push('\n');
        }
    }

    /// Writes one `[HEADER]` block per instance, skipping instances without
    /// properties.
    pub fn write_section(&mut self, class: PluginClass, plugins: &[PluginInstance]) -> Result<()> {
        for plugin in plugins {
            let lua_filter = class == PluginClass::Filter && plugin.name == LUA_FILTER_NAME;
            self.write_block(class, &plugin.properties, lua_filter)?;
        }
        if !plugins.is_empty() {
            tracing::debug!(section = %class, count = plugins.len(), "wrote section");
        }
        Ok(())
    }

    pub fn write_properties(&mut self, class: PluginClass, props: &Properties) -> Result<()> {
        self.write_block(class, props, false)
    }

    fn write_block(&mut self, class: PluginClass, props: &Properties, lua_filter: bool) -> Result<()> {
        let Some(header) = class.header() else {
            return Ok(());
        };
        if props.is_empty() {
            return Ok(());
        }
        debug_assert!(self.aligner.is_empty());

        // Lines are buffered first so a failing property leaves no partial block.
        for prop in props {
            if lua_filter && is_lua_code_key(&prop.key) {
                let Value::String(code) = &prop.value else {
                    self.aligner = TabAligner::new();
                    return Err(Error::type_mismatch(format!(
                        "code field for custom lua filter is invalid: expected string, found {}",
                        prop.value.type_name()
                    )));
                };
                let compact = lua::minify(code).inspect_err(|_| self.aligner = TabAligner::new())?;
                self.push_entry(&prop.key, &compact);
                continue;
            }

            let context = RenderContext {
                is_rules_field: !lua_filter && is_rules_key(&prop.key),
            };
            match &prop.value {
                Value::List(items) => {
                    for item in items {
                        self.push_item(&prop.key, item, context);
                    }
                }
                other => self.push_item(&prop.key, other, context),
            }
        }

        self.buffer.push('[');
        self.buffer.push_str(header);
        self.buffer.push_str("]\n");
        self.aligner.flush_into(&mut self.buffer);
        Ok(())
    }

    fn push_item(&mut self, key: &str, item: &Value, context: RenderContext) {
        if context.is_rules_field && is_rule(item) {
            if let Some(rule) = item.as_map().and_then(render_rule) {
                self.push_line(&rule);
                return;
            }
        }
        let rendered = render(item, context);
        let rendered = rendered.strip_suffix('\n').unwrap_or(&rendered);
        self.push_entry(key, rendered);
    }

    fn push_entry(&mut self, key: &str, value: &str) {
        let mut line = String::with_capacity(self.indent_unit.len() + key.len() + value.len() + 1);
        line.push_str(&self.indent_unit);
        line.push_str(key);
        line.push('\t');
        line.push_str(value);
        self.aligner.push_line(&line);
    }

    fn push_line(&mut self, content: &str) {
        debug_assert!(content.starts_with(RULE_DIRECTIVE));
        let mut line = String::with_capacity(self.indent_unit.len() + content.len());
        line.push_str(&self.indent_unit);
        line.push_str(content);
        self.aligner.push_line(&line);
    }
}
