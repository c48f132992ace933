use std::collections::HashSet;
use std::fmt::Debug;

use tracing::debug;

use crate::BlockContext;
use crate::ProcessingContext;
use crate::ProcessingContextBuilder;
use crate::ReferenceNames;
use crate::SpanRecognizer;
use crate::WikitextError;
use crate::WikitextResult;

/// Where parsing continues after a block has processed part of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resume {
	/// Continue on the same line at this byte offset.
	At(usize),
	/// The line is fully consumed.
	NextLine,
}

/// An immutable block prototype registered on a [`MarkupLanguage`].
///
/// A prototype never holds parse state. When it claims a line the engine
/// calls [`instantiate`](BlockRecognizer::instantiate) and drives the fresh
/// [`Block`] for the lifetime of that region, so one language can serve any
/// number of parses at once.
pub trait BlockRecognizer: Debug + Send + Sync {
	/// Stable identifier used for nesting rules and logging.
	fn id(&self) -> &'static str;

	/// Whether a region of this kind starts at `offset` in `line`. Only called
	/// at offsets where a new region may legally begin.
	fn can_start(&self, line: &str, offset: usize) -> bool;

	/// Fresh per-region state.
	fn instantiate(&self) -> Box<dyn Block>;

	/// Whether this recognizer starting on a line ends an open paragraph.
	fn breaks_paragraph(&self) -> bool {
		true
	}

	/// Pre-pass hook: record any reference definitions found on `line`.
	fn collect_references(&self, _line: &str, _references: &mut ProcessingContextBuilder) {}
}

/// The mutable state of one open structural region.
pub trait Block: Debug {
	fn id(&self) -> &'static str;

	/// Consume `line` from `offset`. A block ends itself by switching to the
	/// closed state, never through the return value.
	fn process_line_content(
		&mut self,
		cx: &mut BlockContext<'_>,
		line: &str,
		offset: usize,
	) -> WikitextResult<Resume>;

	/// Whether the rest of the current line should be offered to the
	/// language's recognizers as a nested region.
	fn begin_nesting(&self) -> bool {
		false
	}

	/// Where a nested region opened inside this block ends, if it ends on
	/// `line` at or after `offset`.
	fn find_close_offset(&self, _line: &str, _offset: usize) -> Option<usize> {
		None
	}

	fn is_closed(&self) -> bool;

	/// Close the region, ending any of its own sub-regions first. Closing an
	/// already closed block does nothing.
	fn set_closed(&mut self, cx: &mut BlockContext<'_>) -> WikitextResult<()>;
}

/// A markup dialect: ordered block and span recognizers plus the policy for
/// comparing reference names.
///
/// Declaration order is priority order. Languages are immutable once built
/// and can be shared freely between threads.
#[derive(Debug)]
pub struct MarkupLanguage {
	name: String,
	blocks: Vec<Box<dyn BlockRecognizer>>,
	spans: Vec<Box<dyn SpanRecognizer>>,
	reference_names: ReferenceNames,
}

impl MarkupLanguage {
	pub fn builder(name: impl Into<String>) -> MarkupLanguageBuilder {
		MarkupLanguageBuilder {
			name: name.into(),
			blocks: vec![],
			spans: vec![],
			reference_names: ReferenceNames::default(),
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn block_recognizers(&self) -> &[Box<dyn BlockRecognizer>] {
		&self.blocks
	}

	pub fn span_recognizers(&self) -> &[Box<dyn SpanRecognizer>] {
		&self.spans
	}

	pub fn reference_names(&self) -> ReferenceNames {
		self.reference_names
	}

	pub fn is_empty_line(line: &str) -> bool {
		line.trim().is_empty()
	}

	/// The first recognizer, in declaration order, that can start a region at
	/// `offset`. Blank remainders never start a region.
	pub fn recognizer_at(&self, line: &str, offset: usize) -> Option<&dyn BlockRecognizer> {
		let rest = line.get(offset..)?;
		if Self::is_empty_line(rest) {
			return None;
		}

		self.blocks
			.iter()
			.find(|recognizer| recognizer.can_start(line, offset))
			.map(|recognizer| &**recognizer)
	}

	/// The first recognizer that would interrupt a paragraph at `offset`.
	pub fn paragraph_breaker_at(&self, line: &str, offset: usize) -> Option<&dyn BlockRecognizer> {
		self.blocks
			.iter()
			.filter(|recognizer| recognizer.breaks_paragraph())
			.find(|recognizer| recognizer.can_start(line, offset))
			.map(|recognizer| &**recognizer)
	}

	/// Collect every reference definition in `markup`.
	pub fn processing_context(&self, markup: &str) -> ProcessingContext {
		let mut references = ProcessingContext::builder_with(self.reference_names);
		for line in markup.lines() {
			for recognizer in &self.blocks {
				recognizer.collect_references(line, &mut references);
			}
		}

		let context = references.build();
		debug!(
			language = %self.name,
			definitions = context.len(),
			"collected reference definitions"
		);
		context
	}
}

pub struct MarkupLanguageBuilder {
	name: String,
	blocks: Vec<Box<dyn BlockRecognizer>>,
	spans: Vec<Box<dyn SpanRecognizer>>,
	reference_names: ReferenceNames,
}

impl MarkupLanguageBuilder {
	#[must_use]
	pub fn block(mut self, recognizer: impl BlockRecognizer + 'static) -> Self {
		self.blocks.push(Box::new(recognizer));
		self
	}

	#[must_use]
	pub fn span(mut self, recognizer: impl SpanRecognizer + 'static) -> Self {
		self.spans.push(Box::new(recognizer));
		self
	}

	#[must_use]
	pub fn reference_names(mut self, reference_names: ReferenceNames) -> Self {
		self.reference_names = reference_names;
		self
	}

	pub fn build(self) -> WikitextResult<MarkupLanguage> {
		if self.name.trim().is_empty() {
			return Err(WikitextError::InvalidLanguage(
				"a markup language needs a name".to_string(),
			));
		}

		if self.blocks.is_empty() {
			return Err(WikitextError::InvalidLanguage(format!(
				"`{}` registers no block recognizers",
				self.name
			)));
		}

		let mut ids = HashSet::new();
		for recognizer in &self.blocks {
			if !ids.insert(recognizer.id()) {
				return Err(WikitextError::InvalidLanguage(format!(
					"`{}` registers the block recognizer `{}` twice",
					self.name,
					recognizer.id()
				)));
			}
		}

		Ok(MarkupLanguage {
			name: self.name,
			blocks: self.blocks,
			spans: self.spans,
			reference_names: self.reference_names,
		})
	}
}
