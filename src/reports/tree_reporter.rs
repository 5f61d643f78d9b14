/* Copyright © 2024-2025 Adam Train <adam@trainrelay.net>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 */
use crate::hierarchy::error::HierarchyError;
use crate::hierarchy::forest::{Forest, TreeNode, Walk};

/// Indented listing of the chart of accounts, two spaces per level.
///
/// Each line carries a marker, `+` for accounts with sub-accounts and `-` for
/// leaves, followed by the code and name. Summary (non-postable) and inactive
/// accounts are tagged at the end of the line:
///
/// ```text
/// + 1000 Assets [summary]
///   + 1100 Cash [summary]
///     - 1101 Main Bank
///     - 1110 Petty Cash [inactive]
///   - 1200 Receivables
/// ```
pub struct TreeReporter<'a> {
	forest: &'a Forest,
	max_depth: Option<usize>,
	active_only: bool,
}

impl<'a> TreeReporter<'a> {
	pub fn new(forest: &'a Forest) -> Self {
		Self {
			forest,
			max_depth: None,
			active_only: false,
		}
	}

	/// Accounts nested deeper than this are not listed.
	pub fn max_depth(mut self, depth: Option<usize>) -> Self {
		self.max_depth = depth;
		self
	}

	/// Leaves out inactive accounts along with everything below them.
	pub fn active_only(mut self, active_only: bool) -> Self {
		self.active_only = active_only;
		self
	}

	pub fn lines(&self) -> Result<Vec<String>, HierarchyError> {
		let mut lines = vec![];

		self.forest.walk(|node, depth| {
			if self.active_only && !node.is_active() {
				return Walk::Skip;
			}

			lines.push(format_line(node, depth));

			match self.max_depth {
				Some(max) if depth >= max => Walk::Skip,
				_ => Walk::Descend,
			}
		})?;

		Ok(lines)
	}

	pub fn print(&self) -> Result<(), HierarchyError> {
		let lines = self.lines()?;
		if lines.is_empty() {
			println!("No data");
			return Ok(());
		}

		for line in lines {
			println!("{}", line);
		}
		Ok(())
	}
}

fn format_line(node: &TreeNode, depth: usize) -> String {
	let marker = if node.has_children() { '+' } else { '-' };

	let mut line = format!(
		"{}{} {} {}",
		"  ".repeat(depth),
		marker,
		node.record.code,
		node.record.name
	);

	if !node.is_postable() {
		line.push_str(" [summary]");
	}
	if !node.is_active() {
		line.push_str(" [inactive]");
	}

	line
}
