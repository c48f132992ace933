use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use tracing::debug;

use crate::BlockKind;
use crate::HtmlSubsetProfile;
use crate::MarkupLanguage;
use crate::MarkupParser;
use crate::SpanKind;
use crate::WikitextError;
use crate::WikitextResult;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = [
	"wikitext.toml",
	".wikitext.toml",
	".config/wikitext.toml",
];

/// Configuration loaded from a `wikitext.toml` file.
///
/// ```toml
/// [parse]
/// as_document = false
///
/// [profiles.comments]
/// heading_level = 3
/// blocks = ["PARAGRAPH", "CODE"]
/// spans = ["BOLD", "EMPHASIS"]
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct WikitextConfig {
	/// Options applied to every parse.
	#[serde(default)]
	pub parse: ParseConfig,
	/// Named output profiles, see [`HtmlSubsetProfile`].
	#[serde(default)]
	pub profiles: BTreeMap<String, ProfileConfig>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ParseConfig {
	/// Wrap output in `begin_document` / `end_document`. Defaults to `true`.
	#[serde(default = "default_as_document")]
	pub as_document: bool,
}

impl Default for ParseConfig {
	fn default() -> Self {
		Self {
			as_document: default_as_document(),
		}
	}
}

fn default_as_document() -> bool {
	true
}

/// One `[profiles.<name>]` table. Fields are optional here so that missing
/// ones are reported by the profile builder rather than by the toml parser.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ProfileConfig {
	pub heading_level: Option<i32>,
	pub blocks: Option<Vec<BlockKind>>,
	pub spans: Option<Vec<SpanKind>>,
}

impl WikitextConfig {
	/// Find the config file path by checking supported candidates in order.
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if the file does not exist.
	pub fn load(root: &Path) -> WikitextResult<Option<WikitextConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config = Self::from_toml(&content)?;
		debug!(
			path = %config_path.display(),
			profiles = config.profiles.len(),
			"loaded wikitext config"
		);

		Ok(Some(config))
	}

	pub fn from_toml(content: &str) -> WikitextResult<WikitextConfig> {
		toml::from_str(content).map_err(|e| WikitextError::ConfigParse(e.to_string()))
	}

	/// Build the named profile.
	pub fn profile(&self, name: &str) -> WikitextResult<HtmlSubsetProfile> {
		let config = self
			.profiles
			.get(name)
			.ok_or_else(|| WikitextError::UnknownProfile(name.to_string()))?;

		let mut builder = HtmlSubsetProfile::builder().name(name);
		if let Some(level) = config.heading_level {
			builder = builder.heading_level(level);
		}
		if let Some(blocks) = &config.blocks {
			builder = builder.block_kinds(blocks.iter().copied());
		}
		if let Some(spans) = &config.spans {
			builder = builder.span_kinds(spans.iter().copied());
		}

		builder.build()
	}

	/// A parser for `language` with these options applied.
	pub fn parser<'l>(&self, language: &'l MarkupLanguage) -> MarkupParser<'l> {
		MarkupParser::new(language).as_document(self.parse.as_document)
	}
}
