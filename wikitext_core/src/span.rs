use std::fmt::Debug;

use regex::Captures;
use regex::Regex;
use tracing::trace;

use crate::Attributes;
use crate::DocumentBuilder;
use crate::ProcessingContext;
use crate::SpanKind;
use crate::WikitextError;
use crate::WikitextResult;

/// An immutable inline rule.
///
/// The resolver asks every recognizer for its earliest match at or after the
/// cursor. The whole match is consumed.
pub trait SpanRecognizer: Debug + Send + Sync {
	fn pattern(&self) -> &Regex;

	fn emit(&self, captures: &Captures<'_>, cx: &mut SpanContext<'_>) -> WikitextResult<()>;
}

/// What a span recognizer may touch while emitting its match.
pub struct SpanContext<'a> {
	resolver: &'a SpanResolver<'a>,
	builder: &'a mut dyn DocumentBuilder,
}

impl<'a> SpanContext<'a> {
	pub fn builder(&mut self) -> &mut (dyn DocumentBuilder + 'a) {
		&mut *self.builder
	}

	pub fn references(&self) -> &ProcessingContext {
		self.resolver.references
	}

	/// Whether any recognizer matches somewhere in `text`.
	pub fn contains_spans(&self, text: &str) -> bool {
		self.resolver.earliest_match(text, 0).is_some()
	}

	/// Resolve `text` with the same recognizers, for spans that contain
	/// other spans.
	pub fn resolve(&mut self, text: &str) -> WikitextResult<()> {
		self.resolver.resolve(text, &mut *self.builder)
	}
}

/// Tokenizes inline text into spans and literal runs.
///
/// Scanning is left to right. At each step the recognizer whose match starts
/// earliest wins and ties go to the recognizer declared first, regardless of
/// match length. Text between matches is emitted verbatim as one
/// `characters` call per run. An opening delimiter without its closing
/// delimiter never matches, so it stays literal text.
#[derive(Debug, Clone, Copy)]
pub struct SpanResolver<'a> {
	recognizers: &'a [Box<dyn SpanRecognizer>],
	references: &'a ProcessingContext,
}

impl<'a> SpanResolver<'a> {
	pub fn new(recognizers: &'a [Box<dyn SpanRecognizer>], references: &'a ProcessingContext) -> Self {
		Self {
			recognizers,
			references,
		}
	}

	pub fn resolve(&self, text: &str, builder: &mut dyn DocumentBuilder) -> WikitextResult<()> {
		let mut cursor = 0;

		while cursor < text.len() {
			let Some((captures, recognizer)) = self.earliest_match(text, cursor) else {
				break;
			};

			let (start, end) = span_bounds(&captures);
			if start > cursor {
				builder.characters(&text[cursor..start])?;
			}

			trace!(start, end, span = &text[start..end], "matched span");
			let mut cx = SpanContext {
				resolver: self,
				builder: &mut *builder,
			};
			recognizer.emit(&captures, &mut cx)?;
			cursor = end;
		}

		if cursor < text.len() {
			builder.characters(&text[cursor..])?;
		}

		Ok(())
	}

	fn earliest_match<'t>(
		&self,
		text: &'t str,
		cursor: usize,
	) -> Option<(Captures<'t>, &'a dyn SpanRecognizer)> {
		self.recognizers
			.iter()
			.filter_map(|recognizer| {
				let captures = recognizer.pattern().captures_at(text, cursor)?;
				let (start, end) = span_bounds(&captures);
				(end > start).then_some((captures, &**recognizer))
			})
			.min_by_key(|(captures, _)| span_bounds(captures).0)
	}
}

fn span_bounds(captures: &Captures<'_>) -> (usize, usize) {
	captures.get(0).map_or((0, 0), |m| (m.start(), m.end()))
}

/// How a phrase modifier treats the text between its delimiters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhraseContent {
	/// Resolve the interior for further spans.
	Nested,
	/// Emit the interior verbatim.
	Literal,
}

/// A span delimited by the same marker on both sides, e.g. `*strong*`.
///
/// Delimiters only count at word edges: the opening marker may not follow a
/// word character and must be followed by a non-space, and the closing marker
/// mirrors that.
#[derive(Debug, Clone)]
pub struct PhraseModifier {
	pattern: Regex,
	kind: SpanKind,
	content: PhraseContent,
}

impl PhraseModifier {
	pub fn new(delimiter: &str, kind: SpanKind, content: PhraseContent) -> WikitextResult<Self> {
		Self::with_delimiters(delimiter, delimiter, kind, content)
	}

	pub fn with_delimiters(
		open: &str,
		close: &str,
		kind: SpanKind,
		content: PhraseContent,
	) -> WikitextResult<Self> {
		if open.is_empty() || close.is_empty() {
			return Err(WikitextError::InvalidPattern {
				pattern: format!("{open}…{close}"),
				reason: "phrase delimiters cannot be empty".to_string(),
			});
		}

		let source = format!(
			r"{}{}(\S(?:.*?\S)?){}{}",
			word_edge(open.chars().next()),
			regex::escape(open),
			regex::escape(close),
			word_edge(close.chars().last()),
		);
		let pattern = compile(&source)?;

		Ok(Self {
			pattern,
			kind,
			content,
		})
	}
}

impl SpanRecognizer for PhraseModifier {
	fn pattern(&self) -> &Regex {
		&self.pattern
	}

	fn emit(&self, captures: &Captures<'_>, cx: &mut SpanContext<'_>) -> WikitextResult<()> {
		let inner = captures.get(1).map_or("", |m| m.as_str());
		cx.builder().begin_span(self.kind, &Attributes::default())?;
		match self.content {
			PhraseContent::Nested => cx.resolve(inner)?,
			PhraseContent::Literal => cx.builder().characters(inner)?,
		}
		cx.builder().end_span()
	}
}

/// The assertion that keeps a delimiter off the inside of a word. A
/// delimiter that is itself a word character (`_`) needs a boundary, any
/// other delimiter needs the absence of one.
fn word_edge(delimiter: Option<char>) -> &'static str {
	match delimiter {
		Some(c) if c.is_alphanumeric() || c == '_' => r"\b",
		_ => r"\B",
	}
}

/// Compile a recognizer pattern, reporting failures as a precondition error.
pub fn compile(pattern: &str) -> WikitextResult<Regex> {
	Regex::new(pattern).map_err(|e| {
		WikitextError::InvalidPattern {
			pattern: pattern.to_string(),
			reason: e.to_string(),
		}
	})
}
