use std::fmt::Display;

use serde::Deserialize;
use serde::Serialize;

use crate::WikitextResult;

/// The sink that receives a document's structural event stream.
///
/// Renderers (HTML, DocBook, plain text, ...) implement this trait. The
/// engine never escapes text; whatever arrives through
/// [`characters`](DocumentBuilder::characters) is the raw source text and the
/// implementation decides how it is written out.
///
/// Every call returns a [`WikitextResult`] so that a sink backed by a writer
/// can abort a parse, or a replay, at the first failure.
pub trait DocumentBuilder {
	fn begin_document(&mut self) -> WikitextResult<()>;
	fn end_document(&mut self) -> WikitextResult<()>;
	fn begin_block(&mut self, kind: BlockKind, attributes: &Attributes) -> WikitextResult<()>;
	fn end_block(&mut self) -> WikitextResult<()>;
	fn begin_span(&mut self, kind: SpanKind, attributes: &Attributes) -> WikitextResult<()>;
	fn end_span(&mut self) -> WikitextResult<()>;
	fn begin_heading(&mut self, level: u8, attributes: &Attributes) -> WikitextResult<()>;
	fn end_heading(&mut self) -> WikitextResult<()>;
	fn characters(&mut self, text: &str) -> WikitextResult<()>;
	fn entity_reference(&mut self, name: &str) -> WikitextResult<()>;
	fn image(&mut self, attributes: &Attributes, url: &str) -> WikitextResult<()>;
	fn link(&mut self, attributes: &Attributes, href: &str, text: &str) -> WikitextResult<()>;
	fn line_break(&mut self) -> WikitextResult<()>;
	fn acronym(&mut self, text: &str, definition: &str) -> WikitextResult<()>;
}

impl<B> DocumentBuilder for &mut B
where
	B: DocumentBuilder + ?Sized,
{
	fn begin_document(&mut self) -> WikitextResult<()> {
		(**self).begin_document()
	}

	fn end_document(&mut self) -> WikitextResult<()> {
		(**self).end_document()
	}

	fn begin_block(&mut self, kind: BlockKind, attributes: &Attributes) -> WikitextResult<()> {
		(**self).begin_block(kind, attributes)
	}

	fn end_block(&mut self) -> WikitextResult<()> {
		(**self).end_block()
	}

	fn begin_span(&mut self, kind: SpanKind, attributes: &Attributes) -> WikitextResult<()> {
		(**self).begin_span(kind, attributes)
	}

	fn end_span(&mut self) -> WikitextResult<()> {
		(**self).end_span()
	}

	fn begin_heading(&mut self, level: u8, attributes: &Attributes) -> WikitextResult<()> {
		(**self).begin_heading(level, attributes)
	}

	fn end_heading(&mut self) -> WikitextResult<()> {
		(**self).end_heading()
	}

	fn characters(&mut self, text: &str) -> WikitextResult<()> {
		(**self).characters(text)
	}

	fn entity_reference(&mut self, name: &str) -> WikitextResult<()> {
		(**self).entity_reference(name)
	}

	fn image(&mut self, attributes: &Attributes, url: &str) -> WikitextResult<()> {
		(**self).image(attributes, url)
	}

	fn link(&mut self, attributes: &Attributes, href: &str, text: &str) -> WikitextResult<()> {
		(**self).link(attributes, href, text)
	}

	fn line_break(&mut self) -> WikitextResult<()> {
		(**self).line_break()
	}

	fn acronym(&mut self, text: &str, definition: &str) -> WikitextResult<()> {
		(**self).acronym(text, definition)
	}
}

/// Optional presentation attributes attached to blocks, spans, links and
/// images.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attributes {
	pub id: Option<String>,
	pub css_class: Option<String>,
	pub css_style: Option<String>,
	pub language: Option<String>,
	pub title: Option<String>,
	/// The target of a `LINK` span whose label holds further spans.
	pub href: Option<String>,
}

impl Attributes {
	pub fn new() -> Self {
		Self::default()
	}
}

/// The structural block kinds a builder can be asked to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum BlockKind {
	Paragraph,
	Preformatted,
	Quote,
	Code,
	BulletedList,
	NumericList,
	ListItem,
	DefinitionList,
	DefinitionTerm,
	DefinitionItem,
	Table,
	TableRow,
	TableCellHeader,
	TableCellNormal,
	Footnote,
	Div,
	Information,
	Note,
	Warning,
	Tip,
	Panel,
}

impl BlockKind {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Paragraph => "PARAGRAPH",
			Self::Preformatted => "PREFORMATTED",
			Self::Quote => "QUOTE",
			Self::Code => "CODE",
			Self::BulletedList => "BULLETED_LIST",
			Self::NumericList => "NUMERIC_LIST",
			Self::ListItem => "LIST_ITEM",
			Self::DefinitionList => "DEFINITION_LIST",
			Self::DefinitionTerm => "DEFINITION_TERM",
			Self::DefinitionItem => "DEFINITION_ITEM",
			Self::Table => "TABLE",
			Self::TableRow => "TABLE_ROW",
			Self::TableCellHeader => "TABLE_CELL_HEADER",
			Self::TableCellNormal => "TABLE_CELL_NORMAL",
			Self::Footnote => "FOOTNOTE",
			Self::Div => "DIV",
			Self::Information => "INFORMATION",
			Self::Note => "NOTE",
			Self::Warning => "WARNING",
			Self::Tip => "TIP",
			Self::Panel => "PANEL",
		}
	}
}

impl Display for BlockKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

/// The inline span kinds a builder can be asked to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum SpanKind {
	Emphasis,
	Strong,
	Italic,
	Bold,
	Citation,
	Deleted,
	Inserted,
	Superscript,
	Subscript,
	Span,
	Code,
	Monospace,
	Underlined,
	Link,
	Quote,
	Mark,
}

impl SpanKind {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Emphasis => "EMPHASIS",
			Self::Strong => "STRONG",
			Self::Italic => "ITALIC",
			Self::Bold => "BOLD",
			Self::Citation => "CITATION",
			Self::Deleted => "DELETED",
			Self::Inserted => "INSERTED",
			Self::Superscript => "SUPERSCRIPT",
			Self::Subscript => "SUBSCRIPT",
			Self::Span => "SPAN",
			Self::Code => "CODE",
			Self::Monospace => "MONOSPACE",
			Self::Underlined => "UNDERLINED",
			Self::Link => "LINK",
			Self::Quote => "QUOTE",
			Self::Mark => "MARK",
		}
	}
}

impl Display for SpanKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}
