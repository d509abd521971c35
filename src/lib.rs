//! Converts Fluent Bit YAML configuration into the classic section-based
//! format.
//!
//! ```
//! let yaml = "pipeline:\n  outputs:\n    - name: stdout\n      match: '*'\n";
//! let classic = fluentbit_classic::convert_str(yaml)?;
//! assert_eq!(classic, "[OUTPUT]\n    name  stdout\n    match *\n");
//! # Ok::<(), fluentbit_classic::Error>(())
//! ```

pub mod constants;
pub mod decode;
pub mod encode;
pub mod error;
pub mod lua;
pub mod merge;
pub mod num;
pub mod options;
pub mod text;
pub mod types;

use std::io::{Read, Write};

pub use crate::error::{Error, ErrorKind, Location};
pub use crate::options::{ConvertOptions, Indent, MultilinePlacement};
pub use crate::types::{
    Document, Map, MarshalText, Pipeline, PluginClass, PluginInstance, Plugins, Properties,
    Property, Value,
};

pub type Result<T> = std::result::Result<T, Error>;

pub fn convert(document: &Document) -> Result<String> {
    convert_with_options(document, &ConvertOptions::default())
}

pub fn convert_with_options(document: &Document, options: &ConvertOptions) -> Result<String> {
    encode::to_string(document, options)
}

pub fn convert_str(input: &str) -> Result<String> {
    convert_str_with_options(input, &ConvertOptions::default())
}

pub fn convert_str_with_options(input: &str, options: &ConvertOptions) -> Result<String> {
    let document = decode::from_str(input)?;
    encode::to_string(&document, options)
}

/// Writes the converted text only once the whole document rendered.
pub fn convert_to_writer<W: Write>(writer: W, document: &Document) -> Result<()> {
    convert_to_writer_with_options(writer, document, &ConvertOptions::default())
}

pub fn convert_to_writer_with_options<W: Write>(
    writer: W,
    document: &Document,
    options: &ConvertOptions,
) -> Result<()> {
    encode::to_writer(writer, document, options)
}

pub fn convert_reader<R: Read>(reader: R) -> Result<String> {
    convert_reader_with_options(reader, &ConvertOptions::default())
}

pub fn convert_reader_with_options<R: Read>(reader: R, options: &ConvertOptions) -> Result<String> {
    let document = decode::from_reader(reader)?;
    encode::to_string(&document, options)
}

pub fn from_str(input: &str) -> Result<Document> {
    decode::from_str(input)
}

pub fn from_slice(input: &[u8]) -> Result<Document> {
    decode::from_slice(input)
}

/// Converts independent documents on the rayon thread pool. Results keep the
/// order of `inputs`.
#[cfg(feature = "parallel")]
pub fn convert_all(inputs: &[&str], options: &ConvertOptions) -> Vec<Result<String>> {
    use rayon::prelude::*;

    inputs
        .par_iter()
        .map(|input| convert_str_with_options(input, options))
        .collect()
}
