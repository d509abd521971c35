use crate::constants::DEFAULT_INDENT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    Spaces(usize),
}

impl Indent {
    pub fn spaces(count: usize) -> Self {
        Indent::Spaces(count)
    }

    pub fn get_spaces(self) -> usize {
        match self {
            Indent::Spaces(count) => count,
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Indent::Spaces(DEFAULT_INDENT)
    }
}

/// Where `[MULTILINE_PARSER]` blocks land in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MultilinePlacement {
    /// Right after the `[PARSER]` blocks, before filters.
    #[default]
    WithParsers,
    /// After the `[OUTPUT]` blocks, at the very end of the document.
    ///
    /// Matches the layout printed by the `yaml-config-converter` command-line
    /// tool, so existing classic files from it compare byte for byte.
    AfterOutputs,
}

#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    pub indent: Indent,
    pub multiline_placement: MultilinePlacement,
}

impl ConvertOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_multiline_placement(mut self, placement: MultilinePlacement) -> Self {
        self.multiline_placement = placement;
        self
    }
}
