use std::sync::LazyLock;

use regex::Regex;

use crate::Attributes;
use crate::Block;
use crate::BlockContext;
use crate::BlockKind;
use crate::BlockRecognizer;
use crate::MarkupLanguage;
use crate::Resume;
use crate::WikitextResult;

const ID: &str = "code";
const END_MARKER: &str = "{code}";

static START: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^\{code(?::([\w+#.-]+))?\}(.*)$").expect("valid code start pattern")
});

/// `{code}` or `{code:lang}` up to the next `{code}`. Nothing inside is
/// interpreted.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeRecognizer;

impl BlockRecognizer for CodeRecognizer {
	fn id(&self) -> &'static str {
		ID
	}

	fn can_start(&self, line: &str, offset: usize) -> bool {
		offset == 0 && START.is_match(line)
	}

	fn instantiate(&self) -> Box<dyn Block> {
		Box::new(CodeBlock::default())
	}
}

#[derive(Debug, Default)]
pub struct CodeBlock {
	opened: bool,
	closed: bool,
}

impl CodeBlock {
	/// Emit verbatim content from `offset`, closing at an end marker. Returns
	/// where the line continues.
	fn process_content(
		&mut self,
		cx: &mut BlockContext<'_>,
		line: &str,
		offset: usize,
	) -> WikitextResult<Resume> {
		let rest = &line[offset..];
		let Some(end) = rest.find(END_MARKER) else {
			if !rest.is_empty() {
				cx.builder().characters(rest)?;
			}
			cx.builder().characters("\n")?;
			return Ok(Resume::NextLine);
		};

		if !rest[..end].is_empty() {
			cx.builder().characters(&rest[..end])?;
			cx.builder().characters("\n")?;
		}
		self.set_closed(cx)?;

		let after = offset + end + END_MARKER.len();
		Ok(if MarkupLanguage::is_empty_line(&line[after..]) {
			Resume::NextLine
		} else {
			Resume::At(after)
		})
	}
}

impl Block for CodeBlock {
	fn id(&self) -> &'static str {
		ID
	}

	fn process_line_content(
		&mut self,
		cx: &mut BlockContext<'_>,
		line: &str,
		offset: usize,
	) -> WikitextResult<Resume> {
		if self.opened {
			return self.process_content(cx, line, offset);
		}

		let Some(captures) = START.captures(&line[offset..]) else {
			self.closed = true;
			return Ok(Resume::At(offset));
		};

		let attributes = Attributes {
			language: captures.get(1).map(|m| m.as_str().to_string()),
			..Attributes::default()
		};
		cx.builder().begin_block(BlockKind::Preformatted, &attributes)?;
		self.opened = true;

		match captures.get(2) {
			Some(remainder) if !remainder.as_str().is_empty() => {
				self.process_content(cx, line, offset + remainder.start())
			}
			_ => Ok(Resume::NextLine),
		}
	}

	fn is_closed(&self) -> bool {
		self.closed
	}

	fn set_closed(&mut self, cx: &mut BlockContext<'_>) -> WikitextResult<()> {
		if self.closed {
			return Ok(());
		}

		if self.opened {
			cx.builder().end_block()?;
		}
		self.closed = true;
		Ok(())
	}
}
