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

/// Recognizers whose regions may open inside a table cell.
const NESTABLE_CELL_BLOCKS: &[&str] = &[super::list::ID];

const ID: &str = "table";

static START: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^\s*(\|\|?.*)$").expect("valid table start pattern"));

/// Cell content runs up to the next delimiter; bracketed link text may
/// contain `|`.
static END_OF_CELL_CONTENT: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"((?:(?:[^\|\[]*)(?:\[[^\]]*\])?)*)(\|\|?\s*)+?")
		.expect("valid end of cell pattern")
});

static END_OF_ROW: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^\|\|?\s*$").expect("valid end of row pattern"));

/// Group 1 marks a header cell, group 2 is the content, group 3 a trailing
/// delimiter ending the line.
static TABLE_ROW: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"\|(\|)?\s*((?:(?:[^\|\[]*)(?:\[[^\]]*\])?)*)(\|\|?\s*$)?")
		.expect("valid table row pattern")
});

/// `||heading||heading||` and `|cell|cell|` rows, ended by a blank line.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableRecognizer;

impl BlockRecognizer for TableRecognizer {
	fn id(&self) -> &'static str {
		ID
	}

	fn can_start(&self, line: &str, offset: usize) -> bool {
		offset == 0 && START.is_match(line)
	}

	fn instantiate(&self) -> Box<dyn Block> {
		Box::new(TableBlock::default())
	}
}

/// Progress through a table. Rows close back to `Open`; a closed table
/// never reopens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum TableState {
	#[default]
	Unopened,
	Open,
	RowOpen,
	CellOpen(BlockKind),
	Closed,
}

#[derive(Debug, Default)]
pub struct TableBlock {
	state: TableState,
	nesting: bool,
}

impl TableBlock {
	fn begin_table(&mut self, cx: &mut BlockContext<'_>) -> WikitextResult<()> {
		if self.state == TableState::Unopened {
			cx.builder().begin_block(BlockKind::Table, &Attributes::default())?;
			self.state = TableState::Open;
		}
		Ok(())
	}

	fn ensure_row_started(&mut self, cx: &mut BlockContext<'_>) -> WikitextResult<()> {
		if self.state == TableState::Open {
			cx.builder()
				.begin_block(BlockKind::TableRow, &Attributes::default())?;
			self.state = TableState::RowOpen;
		}
		Ok(())
	}

	fn ensure_cell_closed(&mut self, cx: &mut BlockContext<'_>) -> WikitextResult<()> {
		if let TableState::CellOpen(_) = self.state {
			cx.builder().end_block()?;
			self.state = TableState::RowOpen;
		}
		Ok(())
	}

	fn ensure_row_closed(&mut self, cx: &mut BlockContext<'_>) -> WikitextResult<()> {
		self.ensure_cell_closed(cx)?;
		if self.state == TableState::RowOpen {
			cx.builder().end_block()?;
			self.state = TableState::Open;
		}
		Ok(())
	}

	fn start_cell(&mut self, cx: &mut BlockContext<'_>, header: bool) -> WikitextResult<()> {
		self.ensure_cell_closed(cx)?;
		self.ensure_row_started(cx)?;
		let kind = if header {
			BlockKind::TableCellHeader
		} else {
			BlockKind::TableCellNormal
		};
		cx.builder().begin_block(kind, &Attributes::default())?;
		self.state = TableState::CellOpen(kind);
		Ok(())
	}

	fn is_nestable_cell_content(cx: &BlockContext<'_>, content: &str) -> bool {
		cx.language()
			.recognizer_at(content, 0)
			.is_some_and(|recognizer| NESTABLE_CELL_BLOCKS.contains(&recognizer.id()))
	}

	/// Text the row pattern stepped over, such as the tail after an unclosed
	/// `[`. It stays in the open cell, or gets a cell of its own.
	fn emit_stray_text(&mut self, cx: &mut BlockContext<'_>, text: &str) -> WikitextResult<()> {
		let text = text.trim();
		if text.is_empty() {
			return Ok(());
		}

		if !matches!(self.state, TableState::CellOpen(_)) {
			self.start_cell(cx, false)?;
		}
		cx.emit_markup(text)
	}

	/// Tokenize cells from `offset`, returning the offset reached. Stops early
	/// when a cell's content should be parsed as a nested region.
	fn process_cell_content(
		&mut self,
		cx: &mut BlockContext<'_>,
		line: &str,
		offset: usize,
	) -> WikitextResult<usize> {
		let rest = &line[offset..];
		let mut cells_offset = 0;
		let mut search = 0;
		let mut matched = false;

		while let Some(captures) = TABLE_ROW.captures_at(rest, search) {
			let delimiter_start = captures.get(0).map_or(rest.len(), |m| m.start());
			if delimiter_start > search {
				self.emit_stray_text(cx, &rest[search..delimiter_start])?;
			}

			matched = true;
			self.start_cell(cx, captures.get(1).is_some())?;

			let Some(content) = captures.get(2) else {
				break;
			};
			cells_offset = content.start();
			self.nesting = Self::is_nestable_cell_content(cx, content.as_str());
			if self.nesting {
				break;
			}

			cx.emit_markup(content.as_str().trim_end())?;
			cells_offset = content.end();
			search = captures.get(0).map_or(rest.len(), |m| m.end());
		}

		if !matched {
			self.set_closed(cx)?;
		} else if !self.nesting && search < rest.len() {
			self.emit_stray_text(cx, &rest[search..])?;
		}

		Ok(offset + cells_offset)
	}

	fn process_end_of_line(
		&mut self,
		cx: &mut BlockContext<'_>,
		line: &str,
		offset: usize,
	) -> WikitextResult<Resume> {
		if !self.nesting {
			self.ensure_row_closed(cx)?;
			return Ok(Resume::NextLine);
		}

		Ok(if offset >= line.len() {
			Resume::NextLine
		} else {
			Resume::At(offset)
		})
	}
}

impl Block for TableBlock {
	fn id(&self) -> &'static str {
		ID
	}

	fn process_line_content(
		&mut self,
		cx: &mut BlockContext<'_>,
		line: &str,
		offset: usize,
	) -> WikitextResult<Resume> {
		self.nesting = false;
		if self.state == TableState::Unopened {
			self.begin_table(cx)?;
		} else if MarkupLanguage::is_empty_line(line) {
			self.set_closed(cx)?;
			return Ok(Resume::At(0));
		}

		// A lone trailing delimiter ends the row; it is not an empty cell.
		if END_OF_ROW.is_match(&line[offset..]) {
			self.ensure_row_closed(cx)?;
			return Ok(Resume::NextLine);
		}

		let post_cell_offset = self.process_cell_content(cx, line, offset)?;
		if self.is_closed() {
			return Ok(Resume::At(0));
		}

		self.process_end_of_line(cx, line, post_cell_offset)
	}

	fn begin_nesting(&self) -> bool {
		self.nesting
	}

	fn find_close_offset(&self, line: &str, offset: usize) -> Option<usize> {
		END_OF_CELL_CONTENT
			.captures_at(line, offset)
			.and_then(|captures| captures.get(2))
			.map(|delimiter| delimiter.start())
	}

	fn is_closed(&self) -> bool {
		self.state == TableState::Closed
	}

	fn set_closed(&mut self, cx: &mut BlockContext<'_>) -> WikitextResult<()> {
		match self.state {
			TableState::Closed => return Ok(()),
			TableState::Unopened => {}
			TableState::Open | TableState::RowOpen | TableState::CellOpen(_) => {
				self.ensure_row_closed(cx)?;
				cx.builder().end_block()?;
			}
		}

		self.state = TableState::Closed;
		Ok(())
	}
}
