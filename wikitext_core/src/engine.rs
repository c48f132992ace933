use tracing::debug;

use crate::Block;
use crate::DocumentBuilder;
use crate::DocumentBuilderEvents;
use crate::MarkupLanguage;
use crate::ProcessingContext;
use crate::Resume;
use crate::SpanResolver;
use crate::WikitextResult;

/// Everything an open block may use while it processes a line.
pub struct BlockContext<'a> {
	builder: &'a mut dyn DocumentBuilder,
	language: &'a MarkupLanguage,
	references: &'a ProcessingContext,
}

impl<'a> BlockContext<'a> {
	pub fn new(
		builder: &'a mut dyn DocumentBuilder,
		language: &'a MarkupLanguage,
		references: &'a ProcessingContext,
	) -> Self {
		Self {
			builder,
			language,
			references,
		}
	}

	pub fn builder(&mut self) -> &mut (dyn DocumentBuilder + 'a) {
		&mut *self.builder
	}

	pub fn language(&self) -> &'a MarkupLanguage {
		self.language
	}

	pub fn references(&self) -> &'a ProcessingContext {
		self.references
	}

	/// Run `text` through the language's span recognizers.
	pub fn emit_markup(&mut self, text: &str) -> WikitextResult<()> {
		SpanResolver::new(self.language.span_recognizers(), self.references)
			.resolve(text, &mut *self.builder)
	}
}

/// Open regions of one parse: the block currently fed with lines and the
/// ancestors that suspended themselves to let it nest inside them.
#[derive(Debug, Default)]
struct Regions {
	current: Option<Box<dyn Block>>,
	suspended: Vec<Box<dyn Block>>,
}

/// Drives a [`MarkupLanguage`] over a document.
///
/// ```rust
/// use wikitext_core::MarkupParser;
/// use wikitext_core::dialect::wiki_language;
///
/// let language = wiki_language().unwrap();
/// let events = MarkupParser::new(&language)
/// 	.as_document(false)
/// 	.parse_to_events("||A||B||\n|1|2|\n")
/// 	.unwrap();
/// assert_eq!(events.first().unwrap().to_string(), "beginBlock(TABLE)");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MarkupParser<'l> {
	language: &'l MarkupLanguage,
	as_document: bool,
}

impl<'l> MarkupParser<'l> {
	pub fn new(language: &'l MarkupLanguage) -> Self {
		Self {
			language,
			as_document: true,
		}
	}

	/// Whether output is wrapped in `begin_document` / `end_document`.
	/// Defaults to `true`.
	#[must_use]
	pub fn as_document(mut self, as_document: bool) -> Self {
		self.as_document = as_document;
		self
	}

	pub fn language(&self) -> &'l MarkupLanguage {
		self.language
	}

	/// Parse `markup` into `builder`, resolving references against the
	/// definitions the language collects from the same markup.
	pub fn parse<B>(&self, markup: &str, builder: &mut B) -> WikitextResult<()>
	where
		B: DocumentBuilder,
	{
		let references = self.language.processing_context(markup);
		self.parse_with_context(markup, &references, builder)
	}

	/// Parse `markup` into `builder` using an existing set of reference
	/// definitions.
	pub fn parse_with_context<B>(
		&self,
		markup: &str,
		references: &ProcessingContext,
		builder: &mut B,
	) -> WikitextResult<()>
	where
		B: DocumentBuilder,
	{
		let mut cx = BlockContext::new(builder, self.language, references);

		if self.as_document {
			cx.builder().begin_document()?;
		}

		let mut regions = Regions::default();
		for line in markup.lines() {
			self.process_line(&mut regions, &mut cx, line, 0, 0)?;
		}

		close_all(&mut regions, &mut cx, 0)?;

		if self.as_document {
			cx.builder().end_document()?;
		}

		Ok(())
	}

	/// Parse `markup` and record the resulting builder calls.
	pub fn parse_to_events(&self, markup: &str) -> WikitextResult<DocumentBuilderEvents> {
		let mut events = DocumentBuilderEvents::new();
		self.parse(markup, &mut events)?;
		Ok(events)
	}

	/// Feed one line, or the part of it before an ancestor's close offset, to
	/// the open regions. Ancestors below `floor` belong to an outer call and
	/// are not consulted.
	fn process_line(
		&self,
		regions: &mut Regions,
		cx: &mut BlockContext<'_>,
		line: &str,
		mut offset: usize,
		floor: usize,
	) -> WikitextResult<()> {
		loop {
			if regions.suspended.len() > floor {
				let depth = regions.suspended.len();
				let close_offset = regions
					.suspended
					.last()
					.and_then(|parent| parent.find_close_offset(line, offset));

				if let Some(close_offset) = close_offset {
					if close_offset > offset {
						self.process_line(regions, cx, &line[..close_offset], offset, depth)?;
					}

					close_all(regions, cx, depth)?;
					regions.current = regions.suspended.pop();
					debug!(
						block = regions.current.as_ref().map(|block| block.id()),
						close_offset, "nested region closed, resuming parent"
					);
					offset = close_offset;
					continue;
				}
			}

			if regions.current.is_none() {
				let Some(recognizer) = self.language.recognizer_at(line, offset) else {
					break;
				};
				debug!(block = recognizer.id(), offset, "region started");
				regions.current = Some(recognizer.instantiate());
			}

			let Some(block) = regions.current.as_mut() else {
				break;
			};
			let resume = block.process_line_content(cx, line, offset)?;

			if block.is_closed() {
				debug!(block = block.id(), "region closed");
				regions.current = None;
				if regions.suspended.len() > floor {
					regions.current = regions.suspended.pop();
					match resume {
						Resume::At(next) => {
							offset = next;
							continue;
						}
						Resume::NextLine => break,
					}
				}
			} else if block.begin_nesting() {
				debug!(block = block.id(), "nesting");
				regions.suspended.extend(regions.current.take());
			} else if matches!(resume, Resume::At(next) if next <= offset) {
				break;
			}

			match resume {
				Resume::At(next) if next < line.len() => offset = next,
				_ => break,
			}
		}

		Ok(())
	}
}

/// Close the current region and every suspended region above `floor`,
/// innermost first.
fn close_all(regions: &mut Regions, cx: &mut BlockContext<'_>, floor: usize) -> WikitextResult<()> {
	if let Some(mut block) = regions.current.take() {
		block.set_closed(cx)?;
	}

	while regions.suspended.len() > floor {
		if let Some(mut block) = regions.suspended.pop() {
			block.set_closed(cx)?;
		}
	}

	Ok(())
}
