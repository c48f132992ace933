use crate::Attributes;
use crate::Block;
use crate::BlockContext;
use crate::BlockKind;
use crate::BlockRecognizer;
use crate::MarkupLanguage;
use crate::Resume;
use crate::WikitextResult;

const ID: &str = "paragraph";

/// Fallback for any non-blank text. Consecutive lines are joined with a line
/// break.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParagraphRecognizer;

impl BlockRecognizer for ParagraphRecognizer {
	fn id(&self) -> &'static str {
		ID
	}

	fn can_start(&self, line: &str, offset: usize) -> bool {
		line.get(offset..)
			.is_some_and(|rest| !MarkupLanguage::is_empty_line(rest))
	}

	fn instantiate(&self) -> Box<dyn Block> {
		Box::new(ParagraphBlock::default())
	}

	fn breaks_paragraph(&self) -> bool {
		false
	}
}

#[derive(Debug, Default)]
pub struct ParagraphBlock {
	line_count: usize,
	closed: bool,
}

impl Block for ParagraphBlock {
	fn id(&self) -> &'static str {
		ID
	}

	fn process_line_content(
		&mut self,
		cx: &mut BlockContext<'_>,
		line: &str,
		offset: usize,
	) -> WikitextResult<Resume> {
		let rest = line.get(offset..).unwrap_or_default();

		if self.line_count == 0 {
			cx.builder()
				.begin_block(BlockKind::Paragraph, &Attributes::default())?;
		} else if MarkupLanguage::is_empty_line(rest) {
			self.set_closed(cx)?;
			return Ok(Resume::At(0));
		} else if cx.language().paragraph_breaker_at(line, offset).is_some() {
			self.set_closed(cx)?;
			return Ok(Resume::At(offset));
		} else {
			cx.builder().line_break()?;
		}

		self.line_count += 1;
		cx.emit_markup(rest.trim())?;
		Ok(Resume::NextLine)
	}

	fn is_closed(&self) -> bool {
		self.closed
	}

	fn set_closed(&mut self, cx: &mut BlockContext<'_>) -> WikitextResult<()> {
		if self.closed {
			return Ok(());
		}

		if self.line_count > 0 {
			cx.builder().end_block()?;
		}
		self.closed = true;
		Ok(())
	}
}
