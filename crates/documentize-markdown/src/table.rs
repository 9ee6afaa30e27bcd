//! Markdown tables.
//!
//! A [`Table`] is an ordered list of [`Column`]s (alignment and header text)
//! and an ordered list of [`Row`]s whose [`Cell`]s are matched to columns by
//! position.
//!
//! # Rendering
//!
//! Every column is as wide as its longest text, header included. Header cells
//! are always padded on the right. Body cells are padded on the right in
//! `left` columns and on the left in `right` columns. The separator row marks
//! the alignment with a colon on the aligned side:
//!
//! ```text
//! | Prop       | Count |
//! | :--------- | ----: |
//! | `disabled` |     1 |
//! ```
//!
//! Rows are iterated by column count: cells beyond the last column are
//! ignored and missing cells render as empty text.

use std::{fmt, str::FromStr};

use log::trace;

use crate::{
    error::MarkdownError,
    node::{Text, join_inline},
};

/// Horizontal alignment of a table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alignment {
    Left,
    Right,
}

impl Alignment {
    /// Every recognised alignment.
    pub const ALL: [Alignment; 2] = [Alignment::Left, Alignment::Right];

    /// Returns the alignment keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Right => "right",
        }
    }

    /// Renders the separator cell for a column of `width` characters.
    ///
    /// The colon is always present, so a zero-width column gets a one-char
    /// separator that is wider than its cells.
    fn separator(self, width: usize) -> String {
        let dashes = "-".repeat(width.saturating_sub(1));
        match self {
            Alignment::Left => format!(":{dashes}"),
            Alignment::Right => format!("{dashes}:"),
        }
    }

    /// Pads a body cell to `width` characters.
    fn pad(self, text: &str, width: usize) -> String {
        match self {
            Alignment::Left => format!("{text:<width$}"),
            Alignment::Right => format!("{text:>width$}"),
        }
    }
}

impl FromStr for Alignment {
    type Err = MarkdownError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|alignment| alignment.as_str() == value)
            .ok_or_else(|| MarkdownError::InvalidColumnAlignment(value.to_string()))
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A table column: its alignment and header text.
///
/// The alignment is kept as written and only validated when the table is
/// rendered, so columns built from external strings (for instance a
/// configuration file) report bad values at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    alignment: String,
    children: Vec<Text>,
}

impl Column {
    /// Creates a column with a known alignment and an empty header.
    pub fn new(alignment: Alignment) -> Self {
        Self::with_raw_alignment(alignment.as_str())
    }

    /// Creates a column from an alignment keyword that has not been checked yet.
    pub fn with_raw_alignment(alignment: impl Into<String>) -> Self {
        Self {
            alignment: alignment.into(),
            children: Vec::new(),
        }
    }

    /// Appends header text and returns the column.
    pub fn with(mut self, text: impl Into<Text>) -> Self {
        self.children.push(text.into());
        self
    }

    /// Returns the alignment keyword as given.
    pub fn raw_alignment(&self) -> &str {
        &self.alignment
    }

    /// Parses the alignment keyword.
    ///
    /// # Errors
    ///
    /// Returns [`MarkdownError::InvalidColumnAlignment`] naming the keyword
    /// if it is not `left` or `right`.
    pub fn alignment(&self) -> Result<Alignment, MarkdownError> {
        self.alignment.parse()
    }

    /// Renders the header text.
    pub fn render(&self) -> String {
        join_inline(&self.children)
    }
}

/// A single table cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    children: Vec<Text>,
}

impl Cell {
    /// Creates an empty cell.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cell holding a single text node.
    pub fn from_text(text: impl Into<Text>) -> Self {
        Self::new().with(text)
    }

    /// Appends text and returns the cell.
    pub fn with(mut self, text: impl Into<Text>) -> Self {
        self.children.push(text.into());
        self
    }

    pub fn render(&self) -> String {
        join_inline(&self.children)
    }
}

/// A table row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a cell and returns the row.
    pub fn with(mut self, cell: Cell) -> Self {
        self.cells.push(cell);
        self
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

impl From<Vec<Cell>> for Row {
    fn from(cells: Vec<Cell>) -> Self {
        Self { cells }
    }
}

/// A Markdown table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Row>,
}

impl Table {
    /// Creates a table from its columns and rows.
    pub fn new(columns: Vec<Column>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Computes the width of every column in characters.
    pub fn column_widths(&self) -> Vec<usize> {
        let body = self.body_texts();
        self.columns
            .iter()
            .enumerate()
            .map(|(index, column)| {
                body.iter()
                    .map(|row| text_width(&row[index]))
                    .fold(text_width(&column.render()), usize::max)
            })
            .collect()
    }

    /// Renders the table, surrounded by blank lines.
    ///
    /// # Errors
    ///
    /// Returns [`MarkdownError::InvalidColumnAlignment`] for the first column
    /// whose alignment is not recognised.
    pub fn render(&self) -> Result<String, MarkdownError> {
        let alignments = self
            .columns
            .iter()
            .map(Column::alignment)
            .collect::<Result<Vec<_>, _>>()?;
        let widths = self.column_widths();
        trace!(columns = self.columns.len(), rows = self.rows.len(); "Rendering table");

        let mut lines = Vec::with_capacity(self.rows.len() + 2);

        lines.push(frame(self.columns.iter().zip(&widths).map(
            |(column, width)| {
                let header = column.render();
                format!("{header:<width$}")
            },
        )));

        lines.push(frame(
            alignments
                .iter()
                .zip(&widths)
                .map(|(alignment, width)| alignment.separator(*width)),
        ));

        for row in self.body_texts() {
            lines.push(frame(
                row.iter()
                    .zip(alignments.iter().zip(&widths))
                    .map(|(text, (alignment, width))| alignment.pad(text, *width)),
            ));
        }

        Ok(format!("\n{}\n\n", lines.join("\n")))
    }

    /// Renders the body cells, one entry per column for every row.
    fn body_texts(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                (0..self.columns.len())
                    .map(|index| row.cells.get(index).map(Cell::render).unwrap_or_default())
                    .collect()
            })
            .collect()
    }
}

/// Counts characters, matching the padding performed by `format!`.
fn text_width(text: &str) -> usize {
    text.chars().count()
}

/// Frames cells as `| a | b |`.
fn frame(cells: impl Iterator<Item = String>) -> String {
    format!("| {} |", cells.collect::<Vec<_>>().join(" | "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn left(header: &str) -> Column {
        Column::new(Alignment::Left).with(header)
    }

    fn right(header: &str) -> Column {
        Column::new(Alignment::Right).with(header)
    }

    fn row(cells: &[&str]) -> Row {
        cells
            .iter()
            .map(|text| {
                if text.is_empty() {
                    Cell::new()
                } else {
                    Cell::from_text(*text)
                }
            })
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn test_single_left_column() {
        let table = Table::new(vec![left("Event")], vec![row(&["`click`"])]);

        assert_eq!(
            table.render().unwrap(),
            "\n| Event   |\n| :------ |\n| `click` |\n\n"
        );
    }

    #[test]
    fn test_two_left_columns_with_empty_cells() {
        let table = Table::new(
            vec![left("Slot"), left("Prop")],
            vec![row(&["`default`", ""]), row(&["", "`foo`"])],
        );

        assert_eq!(
            table.render().unwrap(),
            "\n| Slot      | Prop  |\n| :-------- | :---- |\n| `default` |       |\n|           | `foo` |\n\n"
        );
    }

    #[test]
    fn test_right_column_pads_body_on_the_left() {
        let table = Table::new(
            vec![left("Name"), right("Count")],
            vec![row(&["a", "1"]), row(&["bb", "12345678"])],
        );

        let rendered = table.render().unwrap();
        let lines: Vec<_> = rendered.trim().lines().collect();

        assert_eq!(lines[0], "| Name | Count    |");
        assert_eq!(lines[1], "| :--- | -------: |");
        assert_eq!(lines[2], "| a    |        1 |");
        assert_eq!(lines[3], "| bb   | 12345678 |");
    }

    #[test]
    fn test_widths_use_longest_text() {
        let table = Table::new(
            vec![left("Prop"), left("Description")],
            vec![row(&["`disabled`", ""]), row(&["`a`", ""])],
        );

        assert_eq!(table.column_widths(), vec![10, 11]);
    }

    #[test]
    fn test_width_counts_characters() {
        let table = Table::new(vec![left("É")], vec![row(&["ééé"])]);

        assert_eq!(table.column_widths(), vec![3]);
        assert!(table.render().unwrap().contains("| É   |"));
    }

    #[test]
    fn test_invalid_alignment_is_reported_at_render_time() {
        let column = Column::with_raw_alignment("center").with("Name");
        let table = Table::new(vec![column], vec![row(&["x"])]);

        assert_eq!(
            table.render(),
            Err(MarkdownError::InvalidColumnAlignment("center".to_string()))
        );
    }

    #[test]
    fn test_extra_cells_are_ignored() {
        let table = Table::new(vec![left("A")], vec![row(&["1", "ignored"])]);

        assert_eq!(table.render().unwrap(), "\n| A |\n| : |\n| 1 |\n\n");
    }

    #[test]
    fn test_missing_cells_render_empty() {
        let table = Table::new(vec![left("A"), left("B")], vec![row(&["1"])]);

        assert_eq!(
            table.render().unwrap(),
            "\n| A | B |\n| : | : |\n| 1 |   |\n\n"
        );
    }

    #[test]
    fn test_empty_columns_keep_one_char_separator() {
        let table = Table::new(
            vec![left(""), Column::new(Alignment::Right)],
            vec![row(&["", ""])],
        );

        assert_eq!(table.render().unwrap(), "\n|  |  |\n| : | : |\n|  |  |\n\n");
    }

    #[test]
    fn test_alignment_from_str() {
        assert_eq!("left".parse::<Alignment>(), Ok(Alignment::Left));
        assert_eq!("right".parse::<Alignment>(), Ok(Alignment::Right));
        assert_eq!(
            "LEFT".parse::<Alignment>(),
            Err(MarkdownError::InvalidColumnAlignment("LEFT".to_string()))
        );
    }

    #[test]
    fn test_cell_joins_children_with_space() {
        let cell = Cell::new().with("a").with("b");
        assert_eq!(cell.render(), "a b");
    }
}
