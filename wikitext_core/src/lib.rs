//! `wikitext_core` turns line-based wiki markup into a dialect-neutral stream
//! of structural events. Renderers implement [`DocumentBuilder`] and receive
//! begin/end calls for documents, blocks, headings and spans, plus the text,
//! links, images and entities in between.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Markup text
//!   → Pre-pass (block recognizers collect reference definitions into a ProcessingContext)
//!   → Block engine (one open region per line, nested regions suspend their parent)
//!   → Span resolver (earliest inline match wins, literal runs in between)
//!   → DocumentBuilder (renderer, event recorder, or output profile filter)
//! ```
//!
//! ## Modules
//!
//! - [`dialect`] — A Confluence-flavoured wiki language with headings, code, tables, lists, links and phrase modifiers.
//! - [`config`] — Configuration loading from `wikitext.toml`, including named output profiles.
//!
//! ## Key Types
//!
//! - [`MarkupLanguage`] — An immutable, ordered set of block and span recognizers.
//! - [`MarkupParser`] — Drives a language over a document and feeds a builder.
//! - [`DocumentBuilderEvent`] — A single builder call captured as a comparable, hashable value.
//! - [`ProcessingContext`] — Reference definitions available to a parse.
//! - [`HtmlSubsetProfile`] — A restricted output vocabulary with a maximum heading level.
//!
//! ## Quick Start
//!
//! ```rust
//! use wikitext_core::MarkupParser;
//! use wikitext_core::dialect::wiki_language;
//!
//! let language = wiki_language().unwrap();
//! let events = MarkupParser::new(&language)
//! 	.parse_to_events("h1. Hello\n\nSome *bold* text.\n")
//! 	.unwrap();
//!
//! assert_eq!(events.first().unwrap().to_string(), "beginDocument()");
//! ```

pub use builder::*;
pub use config::*;
pub use context::*;
pub use engine::*;
pub use error::*;
pub use event::*;
pub use language::*;
pub use profile::*;
pub use span::*;

mod builder;
pub mod config;
mod context;
pub mod dialect;
mod engine;
#[allow(unused_assignments)]
mod error;
mod event;
mod language;
mod profile;
mod span;

#[cfg(test)]
mod __fixtures;
