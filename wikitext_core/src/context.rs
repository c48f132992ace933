use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

/// A reference target collected from a document: the name exactly as it was
/// written, its uri and an optional title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamedUriWithTitle {
	pub name: String,
	pub uri: String,
	pub title: Option<String>,
}

/// How reference names are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceNames {
	/// `Foo`, `foo` and `FOO` name the same target.
	#[default]
	CaseInsensitive,
	/// Names must match exactly.
	CaseSensitive,
}

impl ReferenceNames {
	fn normalize(self, name: &str) -> String {
		match self {
			Self::CaseInsensitive => name.to_lowercase(),
			Self::CaseSensitive => name.to_string(),
		}
	}
}

/// Reference definitions available while one document is being processed.
///
/// A context is built once, usually by a pre-pass over the whole document,
/// and is read-only afterwards. This lets a reference be used before the
/// line that defines it.
///
/// ```rust
/// use wikitext_core::ProcessingContext;
///
/// let context = ProcessingContext::builder()
/// 	.reference_definition("Docs", "https://example.com/docs", None)
/// 	.build();
///
/// let target = context.named_uri_with_title("DOCS").unwrap();
/// assert_eq!(target.uri, "https://example.com/docs");
/// assert!(context.named_uri_with_title("missing").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessingContext {
	names: ReferenceNames,
	definitions: HashMap<String, NamedUriWithTitle>,
}

impl ProcessingContext {
	/// A context without any definitions.
	pub fn empty() -> Self {
		Self::default()
	}

	pub fn builder() -> ProcessingContextBuilder {
		ProcessingContextBuilder::default()
	}

	pub fn builder_with(names: ReferenceNames) -> ProcessingContextBuilder {
		ProcessingContextBuilder {
			names,
			..ProcessingContextBuilder::default()
		}
	}

	pub fn is_empty(&self) -> bool {
		self.definitions.is_empty()
	}

	pub fn len(&self) -> usize {
		self.definitions.len()
	}

	/// Look up a definition by name. Absence is a normal outcome; the caller
	/// picks the fallback rendering.
	pub fn named_uri_with_title(&self, name: &str) -> Option<&NamedUriWithTitle> {
		self.definitions.get(&self.names.normalize(name))
	}
}

/// Accumulates definitions in submission order. The first definition of a
/// normalized name wins and names that are empty or only whitespace are
/// skipped.
#[derive(Debug, Clone, Default)]
pub struct ProcessingContextBuilder {
	names: ReferenceNames,
	definitions: HashMap<String, NamedUriWithTitle>,
}

impl ProcessingContextBuilder {
	#[must_use]
	pub fn reference_definition(
		mut self,
		name: impl Into<String>,
		uri: impl Into<String>,
		title: Option<String>,
	) -> Self {
		self.add_reference_definition(name, uri, title);
		self
	}

	/// Non-consuming form of [`reference_definition`] for pre-passes that
	/// hold the builder by reference.
	///
	/// [`reference_definition`]: ProcessingContextBuilder::reference_definition
	pub fn add_reference_definition(
		&mut self,
		name: impl Into<String>,
		uri: impl Into<String>,
		title: Option<String>,
	) {
		let name = name.into();
		if name.trim().is_empty() {
			return;
		}

		let key = self.names.normalize(&name);
		self.definitions
			.entry(key)
			.or_insert_with(|| NamedUriWithTitle {
				name,
				uri: uri.into(),
				title,
			});
	}

	pub fn build(self) -> ProcessingContext {
		ProcessingContext {
			names: self.names,
			definitions: self.definitions,
		}
	}
}
