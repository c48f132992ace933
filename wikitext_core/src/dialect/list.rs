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

pub(crate) const ID: &str = "list";

/// Group 1 holds the markers, their count is the depth.
static LIST_ITEM: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^\s*([*#-]+)\s+(.*)$").expect("valid list item pattern"));

/// `*`, `#` and `-` items, nested by repeating the marker.
///
/// Unlike most blocks a list can start mid-line, which is how a table cell
/// holds one.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListRecognizer;

impl BlockRecognizer for ListRecognizer {
	fn id(&self) -> &'static str {
		ID
	}

	fn can_start(&self, line: &str, offset: usize) -> bool {
		line.get(offset..).is_some_and(|rest| LIST_ITEM.is_match(rest))
	}

	fn instantiate(&self) -> Box<dyn Block> {
		Box::new(ListBlock::default())
	}
}

#[derive(Debug, Clone, Copy)]
struct ListLevel {
	kind: BlockKind,
	item_open: bool,
}

#[derive(Debug, Default)]
pub struct ListBlock {
	levels: Vec<ListLevel>,
	closed: bool,
}

fn marker_kind(marker: char) -> BlockKind {
	if marker == '#' {
		BlockKind::NumericList
	} else {
		BlockKind::BulletedList
	}
}

impl ListBlock {
	fn close_item(level: &mut ListLevel, cx: &mut BlockContext<'_>) -> WikitextResult<()> {
		if level.item_open {
			cx.builder().end_block()?;
			level.item_open = false;
		}
		Ok(())
	}

	fn close_level(&mut self, cx: &mut BlockContext<'_>) -> WikitextResult<()> {
		if let Some(mut level) = self.levels.pop() {
			Self::close_item(&mut level, cx)?;
			cx.builder().end_block()?;
		}
		Ok(())
	}

	/// Bring the open levels in line with `markers`, leaving the deepest level
	/// ready for a new item.
	fn adjust_levels(&mut self, cx: &mut BlockContext<'_>, markers: &str) -> WikitextResult<()> {
		let kinds: Vec<BlockKind> = markers.chars().map(marker_kind).collect();
		let depth = kinds.len();

		while self.levels.len() > depth {
			self.close_level(cx)?;
		}

		if self.levels.len() == depth
			&& self
				.levels
				.last()
				.is_some_and(|level| Some(&level.kind) != kinds.last())
		{
			self.close_level(cx)?;
		}

		if self.levels.len() == depth {
			if let Some(level) = self.levels.last_mut() {
				Self::close_item(level, cx)?;
			}
		}

		while self.levels.len() < depth {
			if let Some(parent) = self.levels.last_mut() {
				if !parent.item_open {
					cx.builder()
						.begin_block(BlockKind::ListItem, &Attributes::default())?;
					parent.item_open = true;
				}
			}

			let kind = kinds[self.levels.len()];
			cx.builder().begin_block(kind, &Attributes::default())?;
			self.levels.push(ListLevel {
				kind,
				item_open: false,
			});
		}

		Ok(())
	}
}

impl Block for ListBlock {
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
		let captures = if MarkupLanguage::is_empty_line(rest) {
			None
		} else {
			LIST_ITEM.captures(rest)
		};

		let Some(captures) = captures else {
			self.set_closed(cx)?;
			return Ok(Resume::At(offset));
		};

		let markers = captures.get(1).map_or("*", |m| m.as_str());
		let content = captures.get(2).map_or("", |m| m.as_str());

		self.adjust_levels(cx, markers)?;
		cx.builder()
			.begin_block(BlockKind::ListItem, &Attributes::default())?;
		if let Some(level) = self.levels.last_mut() {
			level.item_open = true;
		}
		cx.emit_markup(content.trim_end())?;

		Ok(Resume::NextLine)
	}

	fn is_closed(&self) -> bool {
		self.closed
	}

	fn set_closed(&mut self, cx: &mut BlockContext<'_>) -> WikitextResult<()> {
		if self.closed {
			return Ok(());
		}

		while !self.levels.is_empty() {
			self.close_level(cx)?;
		}
		self.closed = true;
		Ok(())
	}
}
