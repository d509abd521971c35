use smallvec::SmallVec;

use crate::constants::COLUMN_PADDING;

type Row = SmallVec<[String; 4]>;

/// Buffers tab-separated lines and lays them out as aligned columns.
///
/// A column is a run of consecutive lines that all have a tab-terminated
/// cell at that index. Every cell in the run is padded with spaces to the
/// widest cell of the run plus the padding. The last cell of a line is
/// never padded, so no line ends with spaces.
pub(crate) struct TabAligner {
    rows: Vec<Row>,
    padding: usize,
}

impl TabAligner {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            padding: COLUMN_PADDING,
        }
    }

    /// Adds one line. `line` must not contain a newline.
    pub fn push_line(&mut self, line: &str) {
        self.rows.push(line.split('\t').map(str::to_string).collect());
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Writes all buffered lines, each terminated by `\n`, and clears the buffer.
    pub fn flush_into(&mut self, out: &mut String) {
        let rows = std::mem::take(&mut self.rows);
        let mut widths = Vec::new();
        self.format(&rows, &mut widths, 0, rows.len(), out);
    }

    fn format(
        &self,
        rows: &[Row],
        widths: &mut Vec<usize>,
        mut line0: usize,
        line1: usize,
        out: &mut String,
    ) {
        let column = widths.len();
        let mut this = line0;
        while this < line1 {
            if !has_cell(&rows[this], column) {
                this += 1;
                continue;
            }

            write_rows(rows, widths, line0, this, out);
            line0 = this;

            let mut width = 0;
            while this < line1 && has_cell(&rows[this], column) {
                width = width.max(cell_width(&rows[this][column]) + self.padding);
                this += 1;
            }

            widths.push(width);
            self.format(rows, widths, line0, this, out);
            widths.pop();
            line0 = this;
        }
        write_rows(rows, widths, line0, line1, out);
    }
}

impl Default for TabAligner {
    fn default() -> Self {
        Self::new()
    }
}

// Only tab-terminated cells take part in alignment.
#[inline]
fn has_cell(row: &Row, column: usize) -> bool {
    column + 1 < row.len()
}

#[inline]
fn cell_width(cell: &str) -> usize {
    cell.chars().count()
}

fn write_rows(rows: &[Row], widths: &[usize], line0: usize, line1: usize, out: &mut String) {
    for row in &rows[line0..line1] {
        for (j, cell) in row.iter().enumerate() {
            out.push_str(cell);
            if j + 1 < row.len() {
                if let Some(width) = widths.get(j) {
                    let pad = width.saturating_sub(cell_width(cell));
                    out.extend(std::iter::repeat(' ').take(pad));
                }
            }
        }
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn align(lines: &[&str]) -> String {
        let mut aligner = TabAligner::new();
        for line in lines {
            aligner.push_line(line);
        }
        let mut out = String::new();
        aligner.flush_into(&mut out);
        out
    }

    #[rstest::rstest]
    fn test_aligns_to_longest_key() {
        let out = align(&["    Name\tdummy", "    Tag\tdummy.data", "    Dummy\t{}"]);
        assert_eq!(out, "    Name  dummy\n    Tag   dummy.data\n    Dummy {}\n");
    }

    #[rstest::rstest]
    fn test_nested_columns_only_span_their_run() {
        let out = align(&[
            "    name\tother:log",
            "    flush_timeout\t3000",
            "    rule\t\"start_state\"\t\"/([a-zA-Z]+/\"\t\"cont\"",
            "    rule\t\"cont\"\t\"^golang.*/\"\t\"cont\"",
        ]);
        let expected = concat!(
            "    name          other:log\n",
            "    flush_timeout 3000\n",
            "    rule          \"start_state\" \"/([a-zA-Z]+/\" \"cont\"\n",
            "    rule          \"cont\"        \"^golang.*/\"   \"cont\"\n",
        );
        assert_eq!(out, expected);
    }

    #[rstest::rstest]
    fn test_line_without_tab_breaks_the_column() {
        let out = align(&["a\t1", "plain", "longer\t2"]);
        assert_eq!(out, "a 1\nplain\nlonger 2\n");
    }

    #[rstest::rstest]
    fn test_width_counts_chars() {
        let out = align(&["ü\tx", "ab\ty"]);
        assert_eq!(out, "ü  x\nab y\n");
    }

    #[rstest::rstest]
    fn test_flush_clears_buffer() {
        let mut aligner = TabAligner::new();
        aligner.push_line("k\tv");
        let mut out = String::new();
        aligner.flush_into(&mut out);
        assert!(aligner.is_empty());
        aligner.flush_into(&mut out);
        assert_eq!(out, "k v\n");
    }
}
