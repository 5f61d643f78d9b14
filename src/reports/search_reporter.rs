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
use crate::hierarchy::forest::Forest;
use anyhow::{Context, Error};
use regex::{Regex, RegexBuilder};

/// Finds accounts whose code or name matches a pattern and reports where each
/// one sits in the hierarchy.
pub struct SearchReporter<'a> {
	forest: &'a Forest,
	pattern: Regex,
}

impl<'a> SearchReporter<'a> {
	/// The pattern is a case-insensitive regular expression.
	pub fn new(forest: &'a Forest, pattern: &str) -> Result<Self, Error> {
		let pattern = RegexBuilder::new(pattern)
			.case_insensitive(true)
			.build()
			.with_context(|| format!("invalid search pattern: {}", pattern))?;

		Ok(Self { forest, pattern })
	}

	/// One line per match in tree order: the code, then the names from the
	/// root down to the account.
	pub fn lines(&self) -> Result<Vec<String>, Error> {
		let mut lines = vec![];

		self.forest.traverse(|node, _| {
			let record = &node.record;
			if !self.pattern.is_match(&record.code)
				&& !self.pattern.is_match(&record.name)
			{
				return;
			}

			let path = self
				.forest
				.ancestors(node)
				.iter()
				.map(|n| n.record.name.as_str())
				.collect::<Vec<_>>()
				.join(" > ");
			lines.push(format!("{} {}", record.code, path));
		})?;

		Ok(lines)
	}

	pub fn print(&self) -> Result<(), Error> {
		let lines = self.lines()?;
		if lines.is_empty() {
			println!("No matches");
			return Ok(());
		}

		for line in lines {
			println!("{}", line);
		}
		Ok(())
	}
}
