pub mod render;
pub(crate) mod tabwriter;
mod writer;

use std::io::Write;

use crate::{
    merge::merge,
    types::{Document, PluginClass},
    ConvertOptions, MultilinePlacement, Result,
};

/// Renders a decoded document as classic Fluent Bit configuration.
///
/// Sections are written in a fixed order: `@SET`, `@INCLUDE`, `[SERVICE]`,
/// `[CUSTOM]`, `[INPUT]`, `[PARSER]`, `[MULTILINE_PARSER]`, `[FILTER]` and
/// `[OUTPUT]`. With [`MultilinePlacement::AfterOutputs`] the multiline
/// parsers move to the end instead. Nothing is returned on failure.
pub fn to_string(document: &Document, options: &ConvertOptions) -> Result<String> {
    let parsers = merge(&document.pipeline.parsers, &document.parsers);
    let multiline_parsers = merge(
        &document.pipeline.multiline_parsers,
        &document.multiline_parsers,
    );

    let mut writer = writer::Writer::new(options);
    writer.write_env(&document.env);
    writer.write_includes(&document.includes);
    writer.write_properties(PluginClass::Service, &document.service)?;
    writer.write_section(PluginClass::Custom, &document.customs)?;
    writer.write_section(PluginClass::Input, &document.pipeline.inputs)?;
    writer.write_section(PluginClass::Parser, &parsers)?;
    if options.multiline_placement == MultilinePlacement::WithParsers {
        writer.write_section(PluginClass::MultilineParser, &multiline_parsers)?;
    }
    writer.write_section(PluginClass::Filter, &document.pipeline.filters)?;
    writer.write_section(PluginClass::Output, &document.pipeline.outputs)?;
    if options.multiline_placement == MultilinePlacement::AfterOutputs {
        writer.write_section(PluginClass::MultilineParser, &multiline_parsers)?;
    }

    let out = writer.finish();
    tracing::debug!(bytes = out.len(), "rendered classic configuration");
    Ok(out)
}

pub fn to_writer<W: Write>(mut writer: W, document: &Document, options: &ConvertOptions) -> Result<()> {
    let out = to_string(document, options)?;
    writer.write_all(out.as_bytes())?;
    Ok(())
}
