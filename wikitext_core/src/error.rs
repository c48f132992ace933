use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum WikitextError {
	#[error(transparent)]
	#[diagnostic(code(wikitext::io_error))]
	Io(#[from] std::io::Error),

	#[error("missing required argument: `{0}`")]
	#[diagnostic(
		code(wikitext::missing_argument),
		help("supply `{0}` before calling `build()`")
	)]
	MissingArgument(&'static str),

	#[error("heading level must be between 0 and 6, got {0}")]
	#[diagnostic(
		code(wikitext::heading_level_out_of_range),
		help("use 0 to disable headings, or 1 through 6")
	)]
	HeadingLevelOutOfRange(i32),

	#[error("invalid markup language: {0}")]
	#[diagnostic(code(wikitext::invalid_language))]
	InvalidLanguage(String),

	#[error("invalid recognizer pattern `{pattern}`: {reason}")]
	#[diagnostic(code(wikitext::invalid_pattern))]
	InvalidPattern { pattern: String, reason: String },

	#[error("document builder failed: {0}")]
	#[diagnostic(code(wikitext::builder))]
	Builder(String),

	#[error("replay aborted at event {index}")]
	#[diagnostic(code(wikitext::replay_aborted))]
	ReplayAborted {
		index: usize,
		#[source]
		source: Box<WikitextError>,
	},

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(wikitext::config_parse),
		help("check that wikitext.toml is valid TOML with [parse] and/or [profiles.*] sections")
	)]
	ConfigParse(String),

	#[error("unknown output profile: `{0}`")]
	#[diagnostic(
		code(wikitext::unknown_profile),
		help("declare the profile under `[profiles.{0}]` in wikitext.toml")
	)]
	UnknownProfile(String),
}

pub type WikitextResult<T> = Result<T, WikitextError>;
