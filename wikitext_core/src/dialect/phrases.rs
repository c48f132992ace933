use std::sync::LazyLock;

use regex::Captures;
use regex::Regex;

use crate::Attributes;
use crate::SpanContext;
use crate::SpanKind;
use crate::SpanRecognizer;
use crate::WikitextResult;

/// `\\` forces a line break.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineBreakRecognizer;

static LINE_BREAK: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\\\\").expect("valid line break pattern"));

impl SpanRecognizer for LineBreakRecognizer {
	fn pattern(&self) -> &Regex {
		&LINE_BREAK
	}

	fn emit(&self, _captures: &Captures<'_>, cx: &mut SpanContext<'_>) -> WikitextResult<()> {
		cx.builder().line_break()
	}
}

/// `[text][name]`, or `[name][]`, resolved against the document's reference
/// definitions. An unknown name leaves the source text as it was.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceLinkRecognizer;

static REFERENCE_LINK: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"\[([^\]\[|]+)\]\[([^\]\[]*)\]").expect("valid reference link pattern")
});

impl SpanRecognizer for ReferenceLinkRecognizer {
	fn pattern(&self) -> &Regex {
		&REFERENCE_LINK
	}

	fn emit(&self, captures: &Captures<'_>, cx: &mut SpanContext<'_>) -> WikitextResult<()> {
		let text = captures.get(1).map_or("", |m| m.as_str());
		let name = captures
			.get(2)
			.map(|m| m.as_str().trim())
			.filter(|name| !name.is_empty())
			.unwrap_or(text);

		let Some(target) = cx.references().named_uri_with_title(name).cloned() else {
			let source = captures.get(0).map_or("", |m| m.as_str());
			return cx.builder().characters(source);
		};

		let attributes = Attributes {
			title: target.title,
			..Attributes::default()
		};
		emit_link(cx, attributes, &target.uri, text)
	}
}

/// `[text|href]` or `[href]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkRecognizer;

static LINK: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"\[(?:([^\]\[|]*)\|)?([^\]\[|]+)\]").expect("valid link pattern")
});

impl SpanRecognizer for LinkRecognizer {
	fn pattern(&self) -> &Regex {
		&LINK
	}

	fn emit(&self, captures: &Captures<'_>, cx: &mut SpanContext<'_>) -> WikitextResult<()> {
		let href = captures.get(2).map_or("", |m| m.as_str().trim());
		let text = captures
			.get(1)
			.map(|m| m.as_str().trim())
			.filter(|text| !text.is_empty())
			.unwrap_or(href);

		emit_link(cx, Attributes::default(), href, text)
	}
}

/// A plain label becomes a `link` call. A label holding markup becomes a
/// `LINK` span around the resolved label, with the target in `href`.
fn emit_link(
	cx: &mut SpanContext<'_>,
	mut attributes: Attributes,
	href: &str,
	label: &str,
) -> WikitextResult<()> {
	if !cx.contains_spans(label) {
		return cx.builder().link(&attributes, href, label);
	}

	attributes.href = Some(href.to_string());
	cx.builder().begin_span(SpanKind::Link, &attributes)?;
	cx.resolve(label)?;
	cx.builder().end_span()
}

/// `!image.png!`
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageRecognizer;

static IMAGE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"!([^\s!][^!]*?)!").expect("valid image pattern"));

impl SpanRecognizer for ImageRecognizer {
	fn pattern(&self) -> &Regex {
		&IMAGE
	}

	fn emit(&self, captures: &Captures<'_>, cx: &mut SpanContext<'_>) -> WikitextResult<()> {
		let url = captures.get(1).map_or("", |m| m.as_str());
		cx.builder().image(&Attributes::default(), url)
	}
}

/// `&amp;`, `&#8212;`
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityRecognizer;

static ENTITY: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"&(#?[A-Za-z0-9]+);").expect("valid entity pattern"));

impl SpanRecognizer for EntityRecognizer {
	fn pattern(&self) -> &Regex {
		&ENTITY
	}

	fn emit(&self, captures: &Captures<'_>, cx: &mut SpanContext<'_>) -> WikitextResult<()> {
		let name = captures.get(1).map_or("", |m| m.as_str());
		cx.builder().entity_reference(name)
	}
}

/// `ABC(A Brief Context)`: two or more capitals followed by the definition.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcronymRecognizer;

static ACRONYM: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"\b([A-Z][A-Z0-9]+)\(([^)]+)\)").expect("valid acronym pattern")
});

impl SpanRecognizer for AcronymRecognizer {
	fn pattern(&self) -> &Regex {
		&ACRONYM
	}

	fn emit(&self, captures: &Captures<'_>, cx: &mut SpanContext<'_>) -> WikitextResult<()> {
		let text = captures.get(1).map_or("", |m| m.as_str());
		let definition = captures.get(2).map_or("", |m| m.as_str().trim());
		cx.builder().acronym(text, definition)
	}
}
