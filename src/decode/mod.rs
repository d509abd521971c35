use std::io::Read;

use crate::{types::Document, Error, Result};

/// Parses a YAML configuration into a [`Document`].
///
/// Empty input, or input holding only comments, is an
/// [`crate::ErrorKind::EmptyDocument`] error. Unknown top-level or pipeline
/// keys are [`crate::ErrorKind::Schema`] errors carrying the YAML position.
pub fn from_str(input: &str) -> Result<Document> {
    let probe: serde_yaml::Value = serde_yaml::from_str(input)?;
    if probe.is_null() {
        return Err(Error::empty_document());
    }
    let document: Document = serde_yaml::from_str(input)?;
    tracing::debug!(
        inputs = document.pipeline.inputs.len(),
        filters = document.pipeline.filters.len(),
        outputs = document.pipeline.outputs.len(),
        "decoded yaml document"
    );
    Ok(document)
}

pub fn from_slice(input: &[u8]) -> Result<Document> {
    let text =
        std::str::from_utf8(input).map_err(|err| Error::schema(format!("invalid utf-8: {err}")))?;
    from_str(text)
}

pub fn from_reader<R: Read>(mut reader: R) -> Result<Document> {
    let mut buf = String::new();
    reader
        .read_to_string(&mut buf)
        .map_err(|err| Error::io(format!("read failed: {err}")))?;
    from_str(&buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[rstest::rstest]
    #[case("")]
    #[case("   \n")]
    #[case("# just a comment\n# and another\n")]
    #[case("~")]
    fn test_empty_inputs(#[case] input: &str) {
        assert_eq!(from_str(input).unwrap_err().kind, ErrorKind::EmptyDocument);
    }

    #[rstest::rstest]
    fn test_unknown_field_has_location() {
        let err = from_str("service:\n  flush: 1\npipelines:\n  inputs: []\n").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Schema);
        assert!(err.message.contains("pipelines"), "{}", err.message);
        assert!(err.location.is_some());
    }

    #[rstest::rstest]
    fn test_non_mapping_root_is_schema_error() {
        assert_eq!(from_str("- a\n- b\n").unwrap_err().kind, ErrorKind::Schema);
    }

    #[rstest::rstest]
    fn test_pipeline_sections() {
        let doc = from_str(
            "pipeline:\n  inputs:\n    - name: dummy\n      tag: t\n  outputs:\n    - name: stdout\n      match: '*'\n",
        )
        .unwrap();
        assert_eq!(doc.pipeline.inputs[0].name, "dummy");
        assert_eq!(doc.pipeline.outputs[0].properties.len(), 2);
    }

    #[rstest::rstest]
    fn test_from_slice_rejects_invalid_utf8() {
        assert_eq!(from_slice(&[0xff, 0xfe]).unwrap_err().kind, ErrorKind::Schema);
    }

    #[rstest::rstest]
    fn test_from_reader() {
        let doc = from_reader("includes:\n  - a.conf\n".as_bytes()).unwrap();
        assert_eq!(doc.includes, vec!["a.conf".to_string()]);
    }
}
