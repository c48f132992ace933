use std::fmt::Display;

use derive_more::Deref;
use derive_more::DerefMut;
use serde::Serialize;

use crate::Attributes;
use crate::BlockKind;
use crate::DocumentBuilder;
use crate::SpanKind;
use crate::WikitextError;
use crate::WikitextResult;

/// One call on a [`DocumentBuilder`], captured as a value.
///
/// Two events are equal when they describe the same call with the same
/// arguments, no matter where or when they were built, so recorded streams
/// can be compared directly in tests or used as hash keys. [`invoke`] replays
/// the call against any builder.
///
/// The `Display` form is the canonical call signature used in diagnostics,
/// e.g. `beginBlock(TABLE)`, `characters("A")` or `endSpan()`.
///
/// [`invoke`]: DocumentBuilderEvent::invoke
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[non_exhaustive]
pub enum DocumentBuilderEvent {
	BeginDocument,
	EndDocument,
	BeginBlock {
		kind: BlockKind,
		attributes: Attributes,
	},
	EndBlock,
	BeginSpan {
		kind: SpanKind,
		attributes: Attributes,
	},
	EndSpan,
	BeginHeading {
		level: u8,
		attributes: Attributes,
	},
	EndHeading,
	Characters(String),
	EntityReference(String),
	Image {
		attributes: Attributes,
		url: String,
	},
	Link {
		attributes: Attributes,
		href: String,
		text: String,
	},
	LineBreak,
	Acronym {
		text: String,
		definition: String,
	},
}

impl DocumentBuilderEvent {
	pub fn begin_block(kind: BlockKind) -> Self {
		Self::BeginBlock {
			kind,
			attributes: Attributes::default(),
		}
	}

	pub fn begin_span(kind: SpanKind) -> Self {
		Self::BeginSpan {
			kind,
			attributes: Attributes::default(),
		}
	}

	pub fn begin_heading(level: u8) -> Self {
		Self::BeginHeading {
			level,
			attributes: Attributes::default(),
		}
	}

	pub fn characters(text: impl Into<String>) -> Self {
		Self::Characters(text.into())
	}

	/// Make the builder call this event represents.
	pub fn invoke<B>(&self, builder: &mut B) -> WikitextResult<()>
	where
		B: DocumentBuilder + ?Sized,
	{
		match self {
			Self::BeginDocument => builder.begin_document(),
			Self::EndDocument => builder.end_document(),
			Self::BeginBlock { kind, attributes } => builder.begin_block(*kind, attributes),
			Self::EndBlock => builder.end_block(),
			Self::BeginSpan { kind, attributes } => builder.begin_span(*kind, attributes),
			Self::EndSpan => builder.end_span(),
			Self::BeginHeading { level, attributes } => builder.begin_heading(*level, attributes),
			Self::EndHeading => builder.end_heading(),
			Self::Characters(text) => builder.characters(text),
			Self::EntityReference(name) => builder.entity_reference(name),
			Self::Image { attributes, url } => builder.image(attributes, url),
			Self::Link {
				attributes,
				href,
				text,
			} => builder.link(attributes, href, text),
			Self::LineBreak => builder.line_break(),
			Self::Acronym { text, definition } => builder.acronym(text, definition),
		}
	}
}

impl Display for DocumentBuilderEvent {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::BeginDocument => write!(f, "beginDocument()"),
			Self::EndDocument => write!(f, "endDocument()"),
			Self::BeginBlock { kind, .. } => write!(f, "beginBlock({kind})"),
			Self::EndBlock => write!(f, "endBlock()"),
			Self::BeginSpan { kind, .. } => write!(f, "beginSpan({kind})"),
			Self::EndSpan => write!(f, "endSpan()"),
			Self::BeginHeading { level, .. } => write!(f, "beginHeading({level})"),
			Self::EndHeading => write!(f, "endHeading()"),
			Self::Characters(text) => write!(f, "characters({text:?})"),
			Self::EntityReference(name) => write!(f, "entityReference({name:?})"),
			Self::Image { url, .. } => write!(f, "image({url:?})"),
			Self::Link { href, text, .. } => write!(f, "link({href:?},{text:?})"),
			Self::LineBreak => write!(f, "lineBreak()"),
			Self::Acronym { text, definition } => write!(f, "acronym({text:?},{definition:?})"),
		}
	}
}

/// An ordered log of builder calls.
///
/// Acts as a recording [`DocumentBuilder`] while a document is parsed and
/// dereferences to the recorded events afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref, DerefMut, Serialize)]
pub struct DocumentBuilderEvents(Vec<DocumentBuilderEvent>);

impl DocumentBuilderEvents {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn into_inner(self) -> Vec<DocumentBuilderEvent> {
		self.0
	}

	/// Replay every recorded event, in order, against `builder`.
	pub fn replay<B>(&self, builder: &mut B) -> WikitextResult<()>
	where
		B: DocumentBuilder + ?Sized,
	{
		replay(&self.0, builder)
	}

	/// The canonical call form of every event, one per line.
	pub fn to_call_listing(&self) -> String {
		self.0
			.iter()
			.map(ToString::to_string)
			.collect::<Vec<_>>()
			.join("\n")
	}
}

impl From<Vec<DocumentBuilderEvent>> for DocumentBuilderEvents {
	fn from(events: Vec<DocumentBuilderEvent>) -> Self {
		Self(events)
	}
}

impl FromIterator<DocumentBuilderEvent> for DocumentBuilderEvents {
	fn from_iter<I: IntoIterator<Item = DocumentBuilderEvent>>(iter: I) -> Self {
		Self(iter.into_iter().collect())
	}
}

impl IntoIterator for DocumentBuilderEvents {
	type IntoIter = std::vec::IntoIter<DocumentBuilderEvent>;
	type Item = DocumentBuilderEvent;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

impl DocumentBuilder for DocumentBuilderEvents {
	fn begin_document(&mut self) -> WikitextResult<()> {
		self.0.push(DocumentBuilderEvent::BeginDocument);
		Ok(())
	}

	fn end_document(&mut self) -> WikitextResult<()> {
		self.0.push(DocumentBuilderEvent::EndDocument);
		Ok(())
	}

	fn begin_block(&mut self, kind: BlockKind, attributes: &Attributes) -> WikitextResult<()> {
		self.0.push(DocumentBuilderEvent::BeginBlock {
			kind,
			attributes: attributes.clone(),
		});
		Ok(())
	}

	fn end_block(&mut self) -> WikitextResult<()> {
		self.0.push(DocumentBuilderEvent::EndBlock);
		Ok(())
	}

	fn begin_span(&mut self, kind: SpanKind, attributes: &Attributes) -> WikitextResult<()> {
		self.0.push(DocumentBuilderEvent::BeginSpan {
			kind,
			attributes: attributes.clone(),
		});
		Ok(())
	}

	fn end_span(&mut self) -> WikitextResult<()> {
		self.0.push(DocumentBuilderEvent::EndSpan);
		Ok(())
	}

	fn begin_heading(&mut self, level: u8, attributes: &Attributes) -> WikitextResult<()> {
		self.0.push(DocumentBuilderEvent::BeginHeading {
			level,
			attributes: attributes.clone(),
		});
		Ok(())
	}

	fn end_heading(&mut self) -> WikitextResult<()> {
		self.0.push(DocumentBuilderEvent::EndHeading);
		Ok(())
	}

	fn characters(&mut self, text: &str) -> WikitextResult<()> {
		self.0.push(DocumentBuilderEvent::Characters(text.to_string()));
		Ok(())
	}

	fn entity_reference(&mut self, name: &str) -> WikitextResult<()> {
		self.0
			.push(DocumentBuilderEvent::EntityReference(name.to_string()));
		Ok(())
	}

	fn image(&mut self, attributes: &Attributes, url: &str) -> WikitextResult<()> {
		self.0.push(DocumentBuilderEvent::Image {
			attributes: attributes.clone(),
			url: url.to_string(),
		});
		Ok(())
	}

	fn link(&mut self, attributes: &Attributes, href: &str, text: &str) -> WikitextResult<()> {
		self.0.push(DocumentBuilderEvent::Link {
			attributes: attributes.clone(),
			href: href.to_string(),
			text: text.to_string(),
		});
		Ok(())
	}

	fn line_break(&mut self) -> WikitextResult<()> {
		self.0.push(DocumentBuilderEvent::LineBreak);
		Ok(())
	}

	fn acronym(&mut self, text: &str, definition: &str) -> WikitextResult<()> {
		self.0.push(DocumentBuilderEvent::Acronym {
			text: text.to_string(),
			definition: definition.to_string(),
		});
		Ok(())
	}
}

/// Apply `events` to `builder` in order. The first event the builder rejects
/// stops the replay and is reported with its index; nothing after it is
/// applied.
pub fn replay<B>(events: &[DocumentBuilderEvent], builder: &mut B) -> WikitextResult<()>
where
	B: DocumentBuilder + ?Sized,
{
	for (index, event) in events.iter().enumerate() {
		event
			.invoke(builder)
			.map_err(|source| WikitextError::ReplayAborted {
				index,
				source: Box::new(source),
			})?;
	}

	Ok(())
}

/// Drop span pairs that enclose nothing, including pairs that only enclosed
/// other empty pairs.
pub fn compact(events: impl IntoIterator<Item = DocumentBuilderEvent>) -> DocumentBuilderEvents {
	let mut compacted: Vec<DocumentBuilderEvent> = vec![];

	for event in events {
		if event == DocumentBuilderEvent::EndSpan
			&& matches!(compacted.last(), Some(DocumentBuilderEvent::BeginSpan { .. }))
		{
			compacted.pop();
			continue;
		}

		compacted.push(event);
	}

	DocumentBuilderEvents(compacted)
}
