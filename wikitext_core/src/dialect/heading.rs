use std::sync::LazyLock;

use regex::Regex;

use crate::Attributes;
use crate::Block;
use crate::BlockContext;
use crate::BlockRecognizer;
use crate::Resume;
use crate::WikitextResult;

const ID: &str = "heading";

static HEADING: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^h([1-6])\.\s+(.*)$").expect("valid heading pattern"));

/// `h1. Title` through `h6. Title`. Always a single line.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadingRecognizer;

impl BlockRecognizer for HeadingRecognizer {
	fn id(&self) -> &'static str {
		ID
	}

	fn can_start(&self, line: &str, offset: usize) -> bool {
		offset == 0 && HEADING.is_match(line)
	}

	fn instantiate(&self) -> Box<dyn Block> {
		Box::new(HeadingBlock::default())
	}
}

#[derive(Debug, Default)]
pub struct HeadingBlock {
	closed: bool,
}

impl Block for HeadingBlock {
	fn id(&self) -> &'static str {
		ID
	}

	fn process_line_content(
		&mut self,
		cx: &mut BlockContext<'_>,
		line: &str,
		offset: usize,
	) -> WikitextResult<Resume> {
		if let Some(captures) = line.get(offset..).and_then(|rest| HEADING.captures(rest)) {
			let level = captures
				.get(1)
				.and_then(|m| m.as_str().parse::<u8>().ok())
				.unwrap_or(1);
			let text = captures.get(2).map_or("", |m| m.as_str().trim_end());

			cx.builder().begin_heading(level, &Attributes::default())?;
			cx.emit_markup(text)?;
			cx.builder().end_heading()?;
		}

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
