//! A small Confluence-flavoured wiki dialect built from the engine's public
//! extension points.
//!
//! ```text
//! h1. Release notes
//!
//! ||Area||Change||
//! |parser|*faster* tables|
//! |docs|* new guide|
//!
//! See [the guide][guide] or [home|https://example.com].
//!
//! [guide]: https://example.com/guide "Guide"
//! ```

pub use code::*;
pub use heading::*;
pub use list::ListBlock;
pub use list::ListRecognizer;
pub use paragraph::*;
pub use phrases::*;
pub use reference::*;
pub use table::*;

mod code;
mod heading;
mod list;
mod paragraph;
mod phrases;
mod reference;
mod table;

use crate::MarkupLanguage;
use crate::PhraseContent;
use crate::PhraseModifier;
use crate::SpanKind;
use crate::WikitextResult;

pub const WIKI_LANGUAGE_NAME: &str = "wiki";

/// Build the wiki dialect.
///
/// Blocks in priority order: reference definitions, headings, code, tables,
/// lists, then paragraphs as the fallback.
pub fn wiki_language() -> WikitextResult<MarkupLanguage> {
	let nested = PhraseContent::Nested;

	let language = MarkupLanguage::builder(WIKI_LANGUAGE_NAME)
		.block(ReferenceRecognizer)
		.block(HeadingRecognizer)
		.block(CodeRecognizer)
		.block(TableRecognizer)
		.block(ListRecognizer)
		.block(ParagraphRecognizer)
		.span(LineBreakRecognizer)
		.span(PhraseModifier::with_delimiters(
			"{{",
			"}}",
			SpanKind::Monospace,
			PhraseContent::Literal,
		)?)
		.span(ReferenceLinkRecognizer)
		.span(LinkRecognizer)
		.span(ImageRecognizer)
		.span(PhraseModifier::new("*", SpanKind::Bold, nested)?)
		.span(PhraseModifier::new("_", SpanKind::Emphasis, nested)?)
		.span(PhraseModifier::new("-", SpanKind::Deleted, nested)?)
		.span(PhraseModifier::new("+", SpanKind::Underlined, nested)?)
		.span(PhraseModifier::new("^", SpanKind::Superscript, nested)?)
		.span(PhraseModifier::new("~", SpanKind::Subscript, nested)?)
		.span(PhraseModifier::new("??", SpanKind::Citation, nested)?)
		.span(EntityRecognizer)
		.span(AcronymRecognizer)
		.build()?;

	Ok(language)
}
