use serde::{Deserialize, Deserializer};

use crate::types::{Plugins, Properties};

/// Root of a YAML configuration.
///
/// Parsers and multiline parsers may be declared both here and under
/// `pipeline`; the encoder merges the two lists, pipeline entries first.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Document {
    #[serde(deserialize_with = "nullable")]
    pub env: Properties,
    #[serde(deserialize_with = "nullable")]
    pub includes: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub service: Properties,
    #[serde(deserialize_with = "nullable")]
    pub customs: Plugins,
    #[serde(deserialize_with = "nullable")]
    pub pipeline: Pipeline,
    #[serde(deserialize_with = "nullable")]
    pub parsers: Plugins,
    #[serde(deserialize_with = "nullable")]
    pub multiline_parsers: Plugins,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Pipeline {
    #[serde(deserialize_with = "nullable")]
    pub inputs: Plugins,
    #[serde(deserialize_with = "nullable")]
    pub parsers: Plugins,
    #[serde(deserialize_with = "nullable")]
    pub multiline_parsers: Plugins,
    #[serde(deserialize_with = "nullable")]
    pub filters: Plugins,
    #[serde(deserialize_with = "nullable")]
    pub outputs: Plugins,
}

// A key present with no value (`parsers:`) decodes like an absent one.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    fn test_deserialize_both_locations() {
        let doc: Document = serde_yaml::from_str(
            "parsers:\n  - name: top\npipeline:\n  parsers:\n    - name: nested\n",
        )
        .unwrap();
        assert_eq!(doc.parsers.len(), 1);
        assert_eq!(doc.pipeline.parsers[0].name, "nested");
    }

    #[rstest::rstest]
    #[case("unknown: 1\n")]
    #[case("pipeline:\n  unknown: []\n")]
    fn test_unknown_fields_are_rejected(#[case] input: &str) {
        assert!(serde_yaml::from_str::<Document>(input).is_err());
    }

    #[rstest::rstest]
    fn test_null_sections_decode_as_empty() {
        let doc: Document = serde_yaml::from_str("pipeline:\nparsers:\n").unwrap();
        assert_eq!(doc, Document::default());
    }

    #[rstest::rstest]
    fn test_empty_sections_default() {
        let doc: Document = serde_yaml::from_str("service:\n  flush: 1\n").unwrap();
        assert!(doc.pipeline.inputs.is_empty());
        assert_eq!(doc.service.len(), 1);
    }
}
