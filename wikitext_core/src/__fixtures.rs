use crate::Attributes;
use crate::BlockKind;
use crate::DocumentBuilder;
use crate::DocumentBuilderEvent;
use crate::DocumentBuilderEvents;
use crate::MarkupLanguage;
use crate::MarkupParser;
use crate::SpanKind;
use crate::WikitextError;
use crate::WikitextResult;
use crate::dialect::wiki_language;

pub fn wiki() -> MarkupLanguage {
	wiki_language().unwrap_or_else(|e| panic!("wiki language: {e}"))
}

/// Parse `markup` with the wiki dialect without the document wrapper.
pub fn fragment_events(markup: &str) -> WikitextResult<DocumentBuilderEvents> {
	MarkupParser::new(&wiki())
		.as_document(false)
		.parse_to_events(markup)
}

pub fn begin_block(kind: BlockKind) -> DocumentBuilderEvent {
	DocumentBuilderEvent::begin_block(kind)
}

pub fn begin_span(kind: SpanKind) -> DocumentBuilderEvent {
	DocumentBuilderEvent::begin_span(kind)
}

pub fn end_block() -> DocumentBuilderEvent {
	DocumentBuilderEvent::EndBlock
}

pub fn end_span() -> DocumentBuilderEvent {
	DocumentBuilderEvent::EndSpan
}

pub fn text(value: &str) -> DocumentBuilderEvent {
	DocumentBuilderEvent::characters(value)
}

pub fn link(href: &str, value: &str) -> DocumentBuilderEvent {
	DocumentBuilderEvent::Link {
		attributes: Attributes::default(),
		href: href.to_string(),
		text: value.to_string(),
	}
}

/// Panics unless every begin event has a matching end event.
pub fn assert_balanced(events: &[DocumentBuilderEvent]) {
	let mut depth = 0_i32;
	for event in events {
		match event {
			DocumentBuilderEvent::BeginDocument
			| DocumentBuilderEvent::BeginBlock { .. }
			| DocumentBuilderEvent::BeginSpan { .. }
			| DocumentBuilderEvent::BeginHeading { .. } => depth += 1,
			DocumentBuilderEvent::EndDocument
			| DocumentBuilderEvent::EndBlock
			| DocumentBuilderEvent::EndSpan
			| DocumentBuilderEvent::EndHeading => depth -= 1,
			_ => {}
		}
		assert!(depth >= 0, "end without begin at {event}");
	}
	assert_eq!(depth, 0, "unclosed regions");
}

/// Accepts calls until `fail_at` calls have been made, then rejects.
#[derive(Debug, Default)]
pub struct FailingBuilder {
	pub fail_at: usize,
	pub accepted: DocumentBuilderEvents,
}

impl FailingBuilder {
	pub fn new(fail_at: usize) -> Self {
		Self {
			fail_at,
			accepted: DocumentBuilderEvents::new(),
		}
	}

	fn record(&mut self, event: DocumentBuilderEvent) -> WikitextResult<()> {
		if self.accepted.len() == self.fail_at {
			return Err(WikitextError::Builder(format!("refused {event}")));
		}
		self.accepted.push(event);
		Ok(())
	}
}

impl DocumentBuilder for FailingBuilder {
	fn begin_document(&mut self) -> WikitextResult<()> {
		self.record(DocumentBuilderEvent::BeginDocument)
	}

	fn end_document(&mut self) -> WikitextResult<()> {
		self.record(DocumentBuilderEvent::EndDocument)
	}

	fn begin_block(&mut self, kind: BlockKind, attributes: &Attributes) -> WikitextResult<()> {
		self.record(DocumentBuilderEvent::BeginBlock {
			kind,
			attributes: attributes.clone(),
		})
	}

	fn end_block(&mut self) -> WikitextResult<()> {
		self.record(DocumentBuilderEvent::EndBlock)
	}

	fn begin_span(&mut self, kind: SpanKind, attributes: &Attributes) -> WikitextResult<()> {
		self.record(DocumentBuilderEvent::BeginSpan {
			kind,
			attributes: attributes.clone(),
		})
	}

	fn end_span(&mut self) -> WikitextResult<()> {
		self.record(DocumentBuilderEvent::EndSpan)
	}

	fn begin_heading(&mut self, level: u8, attributes: &Attributes) -> WikitextResult<()> {
		self.record(DocumentBuilderEvent::BeginHeading {
			level,
			attributes: attributes.clone(),
		})
	}

	fn end_heading(&mut self) -> WikitextResult<()> {
		self.record(DocumentBuilderEvent::EndHeading)
	}

	fn characters(&mut self, text: &str) -> WikitextResult<()> {
		self.record(DocumentBuilderEvent::characters(text))
	}

	fn entity_reference(&mut self, name: &str) -> WikitextResult<()> {
		self.record(DocumentBuilderEvent::EntityReference(name.to_string()))
	}

	fn image(&mut self, attributes: &Attributes, url: &str) -> WikitextResult<()> {
		self.record(DocumentBuilderEvent::Image {
			attributes: attributes.clone(),
			url: url.to_string(),
		})
	}

	fn link(&mut self, attributes: &Attributes, href: &str, text: &str) -> WikitextResult<()> {
		self.record(DocumentBuilderEvent::Link {
			attributes: attributes.clone(),
			href: href.to_string(),
			text: text.to_string(),
		})
	}

	fn line_break(&mut self) -> WikitextResult<()> {
		self.record(DocumentBuilderEvent::LineBreak)
	}

	fn acronym(&mut self, text: &str, definition: &str) -> WikitextResult<()> {
		self.record(DocumentBuilderEvent::Acronym {
			text: text.to_string(),
			definition: definition.to_string(),
		})
	}
}
