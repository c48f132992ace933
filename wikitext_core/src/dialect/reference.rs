use std::sync::LazyLock;

use regex::Regex;

use crate::Block;
use crate::BlockContext;
use crate::BlockRecognizer;
use crate::ProcessingContextBuilder;
use crate::Resume;
use crate::WikitextResult;

const ID: &str = "reference";

static DEFINITION: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r#"^\s*\[([^\]]+)\]:\s*(\S+)(?:\s+"([^"]*)")?\s*$"#)
		.expect("valid reference definition pattern")
});

/// `[name]: uri "title"` lines. They produce no output; the definitions are
/// gathered before parsing so links can use them anywhere in the document.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceRecognizer;

impl BlockRecognizer for ReferenceRecognizer {
	fn id(&self) -> &'static str {
		ID
	}

	fn can_start(&self, line: &str, offset: usize) -> bool {
		offset == 0 && DEFINITION.is_match(line)
	}

	fn instantiate(&self) -> Box<dyn Block> {
		Box::new(ReferenceBlock::default())
	}

	fn collect_references(&self, line: &str, references: &mut ProcessingContextBuilder) {
		let Some(captures) = DEFINITION.captures(line) else {
			return;
		};

		let (Some(name), Some(uri)) = (captures.get(1), captures.get(2)) else {
			return;
		};
		let title = captures.get(3).map(|m| m.as_str().to_string());
		references.add_reference_definition(name.as_str().trim(), uri.as_str(), title);
	}
}

#[derive(Debug, Default)]
pub struct ReferenceBlock {
	closed: bool,
}

impl Block for ReferenceBlock {
	fn id(&self) -> &'static str {
		ID
	}

	fn process_line_content(
		&mut self,
		_cx: &mut BlockContext<'_>,
		_line: &str,
		_offset: usize,
	) -> WikitextResult<Resume> {
		self.closed = true;
		Ok(Resume::NextLine)
	}

	fn is_closed(&self) -> bool {
		self.closed
	}

	fn set_closed(&mut self, _cx: &mut BlockContext<'_>) -> WikitextResult<()> {
		self.closed = true;
		Ok(())
	}
}
