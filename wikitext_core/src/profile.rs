use std::collections::BTreeSet;

use crate::Attributes;
use crate::BlockKind;
use crate::DocumentBuilder;
use crate::SpanKind;
use crate::WikitextError;
use crate::WikitextResult;

/// The deepest heading level any profile may allow.
pub const MAX_HEADING_LEVEL: u8 = 6;

/// A restricted output vocabulary, e.g. the subset of HTML a comment box
/// accepts.
///
/// A heading level of `0` means headings are not supported at all.
///
/// ```rust
/// use wikitext_core::BlockKind;
/// use wikitext_core::HtmlSubsetProfile;
/// use wikitext_core::SpanKind;
///
/// let profile = HtmlSubsetProfile::builder()
/// 	.name("comments")
/// 	.heading_level(3)
/// 	.block_kinds([BlockKind::Paragraph, BlockKind::Code])
/// 	.span_kinds([SpanKind::Bold])
/// 	.build()
/// 	.unwrap();
///
/// assert_eq!(profile.heading_level(), 3);
/// assert!(profile.supports_block(BlockKind::Code));
/// assert!(!profile.supports_span(SpanKind::Emphasis));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlSubsetProfile {
	name: String,
	heading_level: u8,
	block_kinds: BTreeSet<BlockKind>,
	span_kinds: BTreeSet<SpanKind>,
}

impl HtmlSubsetProfile {
	pub fn builder() -> HtmlSubsetProfileBuilder {
		HtmlSubsetProfileBuilder::default()
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn heading_level(&self) -> u8 {
		self.heading_level
	}

	pub fn block_kinds(&self) -> &BTreeSet<BlockKind> {
		&self.block_kinds
	}

	pub fn span_kinds(&self) -> &BTreeSet<SpanKind> {
		&self.span_kinds
	}

	pub fn supports_block(&self, kind: BlockKind) -> bool {
		self.block_kinds.contains(&kind)
	}

	pub fn supports_span(&self, kind: SpanKind) -> bool {
		self.span_kinds.contains(&kind)
	}

	/// Wrap `builder` so it only receives what this profile supports.
	pub fn document_builder<B: DocumentBuilder>(&self, builder: B) -> SubsetDocumentBuilder<'_, B> {
		SubsetDocumentBuilder::new(self, builder)
	}
}

/// Collects the parts of an [`HtmlSubsetProfile`]. The heading level defaults
/// to [`MAX_HEADING_LEVEL`]; everything else is required.
#[derive(Debug, Clone, Default)]
pub struct HtmlSubsetProfileBuilder {
	name: Option<String>,
	heading_level: Option<i32>,
	block_kinds: Option<BTreeSet<BlockKind>>,
	span_kinds: Option<BTreeSet<SpanKind>>,
}

impl HtmlSubsetProfileBuilder {
	#[must_use]
	pub fn name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	#[must_use]
	pub fn heading_level(mut self, level: i32) -> Self {
		self.heading_level = Some(level);
		self
	}

	#[must_use]
	pub fn block_kinds(mut self, kinds: impl IntoIterator<Item = BlockKind>) -> Self {
		self.block_kinds = Some(kinds.into_iter().collect());
		self
	}

	#[must_use]
	pub fn span_kinds(mut self, kinds: impl IntoIterator<Item = SpanKind>) -> Self {
		self.span_kinds = Some(kinds.into_iter().collect());
		self
	}

	pub fn build(self) -> WikitextResult<HtmlSubsetProfile> {
		let name = self.name.ok_or(WikitextError::MissingArgument("name"))?;
		let level = self.heading_level.unwrap_or(i32::from(MAX_HEADING_LEVEL));
		let heading_level = u8::try_from(level)
			.ok()
			.filter(|level| *level <= MAX_HEADING_LEVEL)
			.ok_or(WikitextError::HeadingLevelOutOfRange(level))?;
		let block_kinds = self
			.block_kinds
			.ok_or(WikitextError::MissingArgument("block_kinds"))?;
		let span_kinds = self
			.span_kinds
			.ok_or(WikitextError::MissingArgument("span_kinds"))?;

		Ok(HtmlSubsetProfile {
			name,
			heading_level,
			block_kinds,
			span_kinds,
		})
	}
}

/// What happened to an opened heading, so the matching close does the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeadingRendering {
	Heading,
	Paragraph,
	Dropped,
}

/// Forwards events to `B`, dropping wrappers the profile does not support.
///
/// Content inside a dropped block or span still reaches the inner builder,
/// so no text is lost. Headings deeper than the profile allows are clamped
/// to its deepest level.
#[derive(Debug)]
pub struct SubsetDocumentBuilder<'p, B> {
	profile: &'p HtmlSubsetProfile,
	inner: B,
	blocks: Vec<bool>,
	spans: Vec<bool>,
	headings: Vec<HeadingRendering>,
}

impl<'p, B: DocumentBuilder> SubsetDocumentBuilder<'p, B> {
	pub fn new(profile: &'p HtmlSubsetProfile, inner: B) -> Self {
		Self {
			profile,
			inner,
			blocks: vec![],
			spans: vec![],
			headings: vec![],
		}
	}

	pub fn profile(&self) -> &'p HtmlSubsetProfile {
		self.profile
	}

	pub fn into_inner(self) -> B {
		self.inner
	}
}

fn unbalanced(event: &str) -> WikitextError {
	WikitextError::Builder(format!("`{event}` without a matching begin"))
}

impl<B: DocumentBuilder> DocumentBuilder for SubsetDocumentBuilder<'_, B> {
	fn begin_document(&mut self) -> WikitextResult<()> {
		self.inner.begin_document()
	}

	fn end_document(&mut self) -> WikitextResult<()> {
		self.inner.end_document()
	}

	fn begin_block(&mut self, kind: BlockKind, attributes: &Attributes) -> WikitextResult<()> {
		let supported = self.profile.supports_block(kind);
		self.blocks.push(supported);
		if supported {
			self.inner.begin_block(kind, attributes)?;
		}
		Ok(())
	}

	fn end_block(&mut self) -> WikitextResult<()> {
		match self.blocks.pop() {
			Some(true) => self.inner.end_block(),
			Some(false) => Ok(()),
			None => Err(unbalanced("endBlock()")),
		}
	}

	fn begin_span(&mut self, kind: SpanKind, attributes: &Attributes) -> WikitextResult<()> {
		let supported = self.profile.supports_span(kind);
		self.spans.push(supported);
		if supported {
			self.inner.begin_span(kind, attributes)?;
		}
		Ok(())
	}

	fn end_span(&mut self) -> WikitextResult<()> {
		match self.spans.pop() {
			Some(true) => self.inner.end_span(),
			Some(false) => Ok(()),
			None => Err(unbalanced("endSpan()")),
		}
	}

	fn begin_heading(&mut self, level: u8, attributes: &Attributes) -> WikitextResult<()> {
		let max = self.profile.heading_level();
		let rendering = if max > 0 {
			self.inner.begin_heading(level.clamp(1, max), attributes)?;
			HeadingRendering::Heading
		} else if self.profile.supports_block(BlockKind::Paragraph) {
			self.inner.begin_block(BlockKind::Paragraph, attributes)?;
			HeadingRendering::Paragraph
		} else {
			HeadingRendering::Dropped
		};

		self.headings.push(rendering);
		Ok(())
	}

	fn end_heading(&mut self) -> WikitextResult<()> {
		match self.headings.pop() {
			Some(HeadingRendering::Heading) => self.inner.end_heading(),
			Some(HeadingRendering::Paragraph) => self.inner.end_block(),
			Some(HeadingRendering::Dropped) => Ok(()),
			None => Err(unbalanced("endHeading()")),
		}
	}

	fn characters(&mut self, text: &str) -> WikitextResult<()> {
		self.inner.characters(text)
	}

	fn entity_reference(&mut self, name: &str) -> WikitextResult<()> {
		self.inner.entity_reference(name)
	}

	fn image(&mut self, attributes: &Attributes, url: &str) -> WikitextResult<()> {
		self.inner.image(attributes, url)
	}

	fn link(&mut self, attributes: &Attributes, href: &str, text: &str) -> WikitextResult<()> {
		if self.profile.supports_span(SpanKind::Link) {
			self.inner.link(attributes, href, text)
		} else {
			self.inner.characters(text)
		}
	}

	fn line_break(&mut self) -> WikitextResult<()> {
		self.inner.line_break()
	}

	fn acronym(&mut self, text: &str, definition: &str) -> WikitextResult<()> {
		self.inner.acronym(text, definition)
	}
}
