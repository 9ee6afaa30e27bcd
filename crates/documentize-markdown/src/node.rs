//! Document nodes and their Markdown serialization.
//!
//! Every node renders itself with a pure `render` function. Containers hold
//! their children in insertion order and concatenate (block containers) or
//! space-join (inline containers) the rendered children.

use crate::{error::MarkdownError, table::Table};

/// The character repeated at the start of a heading line.
const HEADING_MARKER: &str = "#";

/// A run of literal text, rendered verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Text {
    content: String,
}

impl Text {
    /// Creates a text node.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Returns the text content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Renders the text verbatim.
    pub fn render(&self) -> String {
        self.content.clone()
    }
}

impl From<&str> for Text {
    fn from(content: &str) -> Self {
        Self::new(content)
    }
}

impl From<String> for Text {
    fn from(content: String) -> Self {
        Self::new(content)
    }
}

/// Joins inline children with a single space.
pub(crate) fn join_inline(children: &[Text]) -> String {
    children
        .iter()
        .map(Text::content)
        .collect::<Vec<_>>()
        .join(" ")
}

/// A paragraph of inline text.
///
/// Renders as the trimmed, space-joined children surrounded by blank lines:
/// `"\n" + text + "\n\n"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    children: Vec<Text>,
}

impl Paragraph {
    /// Creates an empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a paragraph holding a single text node.
    pub fn from_text(text: impl Into<Text>) -> Self {
        Self::new().with(text)
    }

    /// Appends a text node and returns the paragraph.
    pub fn with(mut self, text: impl Into<Text>) -> Self {
        self.push(text);
        self
    }

    /// Appends a text node.
    pub fn push(&mut self, text: impl Into<Text>) {
        self.children.push(text.into());
    }

    /// Returns the inline children.
    pub fn children(&self) -> &[Text] {
        &self.children
    }

    pub fn render(&self) -> String {
        format!("\n{}\n\n", join_inline(&self.children).trim())
    }
}

/// A validated heading level in `1..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    /// The smallest supported level (`#`).
    pub const MIN: u8 = 1;
    /// The largest supported level (`######`).
    pub const MAX: u8 = 6;

    /// Validates a heading level.
    ///
    /// # Errors
    ///
    /// Returns [`MarkdownError::InvalidHeadingLevel`] when `level` is outside
    /// `1..=6`.
    pub fn new(level: i32) -> Result<Self, MarkdownError> {
        u8::try_from(level)
            .ok()
            .filter(|level| (Self::MIN..=Self::MAX).contains(level))
            .map(Self)
            .ok_or(MarkdownError::InvalidHeadingLevel(level))
    }

    /// Returns the level as a number.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i32> for HeadingLevel {
    type Error = MarkdownError;

    fn try_from(level: i32) -> Result<Self, Self::Error> {
        Self::new(level)
    }
}

/// A heading line such as `### Events`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    level: HeadingLevel,
    children: Vec<Text>,
}

impl Heading {
    /// Creates a heading with a single text child.
    ///
    /// # Errors
    ///
    /// Fails immediately with [`MarkdownError::InvalidHeadingLevel`] for a
    /// level outside `1..=6`.
    pub fn new(level: i32, text: impl Into<Text>) -> Result<Self, MarkdownError> {
        Ok(Self::with_level(HeadingLevel::new(level)?).with(text))
    }

    /// Creates an empty heading from an already validated level.
    pub fn with_level(level: HeadingLevel) -> Self {
        Self {
            level,
            children: Vec::new(),
        }
    }

    /// Appends a text node and returns the heading.
    pub fn with(mut self, text: impl Into<Text>) -> Self {
        self.children.push(text.into());
        self
    }

    pub fn level(&self) -> HeadingLevel {
        self.level
    }

    /// Returns the inline children.
    pub fn children(&self) -> &[Text] {
        &self.children
    }

    pub fn render(&self) -> String {
        format!(
            "{} {}\n",
            HEADING_MARKER.repeat(usize::from(self.level.get())),
            join_inline(&self.children).trim()
        )
    }
}

/// A heading followed by block content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    heading: Heading,
    children: Vec<Node>,
}

impl Section {
    /// Creates a section opened by `heading`.
    pub fn new(heading: Heading) -> Self {
        Self {
            heading,
            children: Vec::new(),
        }
    }

    /// Appends a node and returns the section.
    pub fn with(mut self, node: impl Into<Node>) -> Self {
        self.push(node);
        self
    }

    /// Appends a node.
    pub fn push(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }

    pub fn heading(&self) -> &Heading {
        &self.heading
    }

    /// Returns the nodes following the heading.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Renders the heading followed by every child, without separators.
    ///
    /// # Errors
    ///
    /// Propagates table rendering errors from the children.
    pub fn render(&self) -> Result<String, MarkdownError> {
        let mut markdown = self.heading.render();
        for child in &self.children {
            markdown.push_str(&child.render()?);
        }
        Ok(markdown)
    }
}

/// The root of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Builder {
    children: Vec<Node>,
}

impl Builder {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node and returns the builder.
    pub fn with(mut self, node: impl Into<Node>) -> Self {
        self.push(node);
        self
    }

    /// Appends a node.
    pub fn push(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Renders the whole document by concatenating its children.
    ///
    /// # Errors
    ///
    /// Returns [`MarkdownError::InvalidColumnAlignment`] if any table in the
    /// tree has a column with an unrecognised alignment.
    pub fn render(&self) -> Result<String, MarkdownError> {
        self.children.iter().map(Node::render).collect()
    }
}

/// Any node that can appear in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(Text),
    Paragraph(Paragraph),
    Heading(Heading),
    Section(Section),
    Table(Table),
    Builder(Builder),
}

impl Node {
    /// Renders this node to Markdown.
    ///
    /// # Errors
    ///
    /// Only tables can fail, when a column alignment is not recognised.
    pub fn render(&self) -> Result<String, MarkdownError> {
        match self {
            Node::Text(text) => Ok(text.render()),
            Node::Paragraph(paragraph) => Ok(paragraph.render()),
            Node::Heading(heading) => Ok(heading.render()),
            Node::Section(section) => section.render(),
            Node::Table(table) => table.render(),
            Node::Builder(builder) => builder.render(),
        }
    }
}

impl From<Text> for Node {
    fn from(text: Text) -> Self {
        Node::Text(text)
    }
}

impl From<Paragraph> for Node {
    fn from(paragraph: Paragraph) -> Self {
        Node::Paragraph(paragraph)
    }
}

impl From<Heading> for Node {
    fn from(heading: Heading) -> Self {
        Node::Heading(heading)
    }
}

impl From<Section> for Node {
    fn from(section: Section) -> Self {
        Node::Section(section)
    }
}

impl From<Table> for Node {
    fn from(table: Table) -> Self {
        Node::Table(table)
    }
}

impl From<Builder> for Node {
    fn from(builder: Builder) -> Self {
        Node::Builder(builder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Alignment, Column};

    #[test]
    fn test_text_renders_verbatim() {
        let text = Text::new("  `click`  ");
        assert_eq!(text.render(), "  `click`  ");
    }

    #[test]
    fn test_paragraph_trims_and_wraps() {
        let paragraph = Paragraph::new().with("  Lorem").with("ipsum  ");
        assert_eq!(paragraph.render(), "\nLorem ipsum\n\n");
    }

    #[test]
    fn test_empty_paragraph() {
        assert_eq!(Paragraph::new().render(), "\n\n\n");
    }

    #[test]
    fn test_heading_levels() {
        for level in 1..=6 {
            let heading = Heading::new(level, "Title").unwrap();
            let expected = format!("{} Title\n", "#".repeat(level as usize));
            assert_eq!(heading.render(), expected);
        }
    }

    #[test]
    fn test_heading_rejects_out_of_range_levels() {
        for level in [-1, 0, 7, 256] {
            assert_eq!(
                Heading::new(level, "Title"),
                Err(MarkdownError::InvalidHeadingLevel(level))
            );
        }
    }

    #[test]
    fn test_heading_joins_children() {
        let heading = Heading::new(2, " Slot").unwrap().with("props ");
        assert_eq!(heading.render(), "## Slot props\n");
    }

    #[test]
    fn test_section_concatenates() {
        let section = Section::new(Heading::new(3, "Props").unwrap())
            .with(Paragraph::from_text("This component does not have any props."));

        assert_eq!(
            section.render().unwrap(),
            "### Props\n\nThis component does not have any props.\n\n"
        );
    }

    #[test]
    fn test_builder_concatenates_children() {
        let builder = Builder::new()
            .with(Paragraph::from_text("a"))
            .with(Text::new("b"))
            .with(Builder::new().with(Text::new("c")));

        assert_eq!(builder.render().unwrap(), "\na\n\nbc");
    }

    #[test]
    fn test_builder_propagates_table_errors() {
        let table = Table::new(vec![Column::with_raw_alignment("center").with("A")], vec![]);
        let builder = Builder::new().with(Section::new(Heading::new(1, "T").unwrap()).with(table));

        assert_eq!(
            builder.render(),
            Err(MarkdownError::InvalidColumnAlignment("center".to_string()))
        );
    }

    #[test]
    fn test_render_is_idempotent() {
        let builder = Builder::new()
            .with(Paragraph::from_text("desc"))
            .with(Table::new(
                vec![Column::new(Alignment::Right).with("N")],
                vec![],
            ));

        assert_eq!(builder.render().unwrap(), builder.render().unwrap());
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    /// Every valid level renders exactly `level` markers followed by a space.
    fn check_heading_prefix(level: i32, title: &str) -> Result<(), TestCaseError> {
        let rendered = Heading::new(level, title).unwrap().render();
        let markers = rendered.chars().take_while(|c| *c == '#').count();

        prop_assert_eq!(markers, level as usize);
        prop_assert_eq!(rendered.chars().nth(markers), Some(' '));
        Ok(())
    }

    proptest! {
        #[test]
        fn heading_prefix_matches_level(level in 1i32..=6, title in "[a-zA-Z][a-zA-Z ]{0,20}") {
            check_heading_prefix(level, &title)?;
        }

        #[test]
        fn heading_outside_range_fails(level in prop_oneof![i32::MIN..1, 7..i32::MAX]) {
            prop_assert!(HeadingLevel::new(level).is_err());
        }
    }
}
