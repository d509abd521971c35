use std::fmt;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use smol_str::SmolStr;

use crate::constants::NAME_KEY;
use crate::types::Value;

#[derive(Clone, Debug, PartialEq)]
pub struct Property {
    pub key: SmolStr,
    pub value: Value,
}

impl Property {
    pub fn new(key: impl Into<SmolStr>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Properties in authored order. Keys may repeat.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Properties(Vec<Property>);

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<SmolStr>, value: impl Into<Value>) {
        self.0.push(Property::new(key, value));
    }

    pub fn with(mut self, key: impl Into<SmolStr>, value: impl Into<Value>) -> Self {
        self.push(key, value);
        self
    }

    /// First value whose key matches `key` ignoring ASCII case.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0
            .iter()
            .find(|p| p.key.eq_ignore_ascii_case(key))
            .map(|p| &p.value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Property> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a Properties {
    type Item = &'a Property;
    type IntoIter = std::slice::Iter<'a, Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K: Into<SmolStr>, V: Into<Value>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Properties(iter.into_iter().map(|(k, v)| Property::new(k, v)).collect())
    }
}

impl<'de> Deserialize<'de> for Properties {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(PropertiesVisitor)
    }
}

struct PropertiesVisitor;

impl<'de> Visitor<'de> for PropertiesVisitor {
    type Value = Properties;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mapping of properties")
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<Properties, E> {
        Ok(Properties::new())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Properties, A::Error> {
        let mut props = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            props.push(Property::new(key, value));
        }
        Ok(Properties(props))
    }
}

/// One configured plugin: a parser definition, a filter stage, an output...
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PluginInstance {
    pub name: String,
    pub properties: Properties,
}

impl PluginInstance {
    /// Takes the instance name from its `name` property (any case).
    pub fn new(properties: Properties) -> Self {
        let name = properties
            .get(NAME_KEY)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        Self { name, properties }
    }
}

impl From<Properties> for PluginInstance {
    fn from(properties: Properties) -> Self {
        PluginInstance::new(properties)
    }
}

impl<'de> Deserialize<'de> for PluginInstance {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Properties::deserialize(deserializer).map(PluginInstance::new)
    }
}

pub type Plugins = Vec<PluginInstance>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PluginClass {
    Env,
    Include,
    Service,
    Custom,
    Input,
    Parser,
    MultilineParser,
    Filter,
    Output,
}

impl PluginClass {
    /// Bracketed section name. `Env` and `Include` render as directives.
    pub fn header(self) -> Option<&'static str> {
        match self {
            PluginClass::Env | PluginClass::Include => None,
            PluginClass::Service => Some("SERVICE"),
            PluginClass::Custom => Some("CUSTOM"),
            PluginClass::Input => Some("INPUT"),
            PluginClass::Parser => Some("PARSER"),
            PluginClass::MultilineParser => Some("MULTILINE_PARSER"),
            PluginClass::Filter => Some("FILTER"),
            PluginClass::Output => Some("OUTPUT"),
        }
    }
}

impl fmt::Display for PluginClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PluginClass::Env => f.write_str("@SET"),
            PluginClass::Include => f.write_str("@INCLUDE"),
            other => f.write_str(other.header().unwrap_or_default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    fn test_name_is_read_case_insensitively() {
        let plugin = PluginInstance::new(
            Properties::new()
                .with("Name", "dummy")
                .with("Tag", "dummy.data"),
        );
        assert_eq!(plugin.name, "dummy");
        assert_eq!(plugin.properties.len(), 2);
    }

    #[rstest::rstest]
    fn test_missing_or_non_string_name_is_empty() {
        assert_eq!(PluginInstance::new(Properties::new().with("tag", "x")).name, "");
        assert_eq!(PluginInstance::new(Properties::new().with("name", 3)).name, "");
    }

    #[rstest::rstest]
    fn test_deserialize_keeps_authored_order() {
        let plugin: PluginInstance =
            serde_yaml::from_str("name: tail\npath: /var/log/*.log\nDB: /tmp/db\n").unwrap();
        let keys: Vec<&str> = plugin.properties.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, vec!["name", "path", "DB"]);
        assert_eq!(plugin.name, "tail");
    }

    #[rstest::rstest]
    fn test_headers() {
        assert_eq!(PluginClass::MultilineParser.header(), Some("MULTILINE_PARSER"));
        assert_eq!(PluginClass::Env.header(), None);
        assert_eq!(PluginClass::Include.to_string(), "@INCLUDE");
    }
}
