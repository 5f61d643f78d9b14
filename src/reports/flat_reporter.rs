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
use crate::hierarchy::forest::{Forest, Walk};
use crate::reports::table::Table;

/// One row per account in tree order, for when the indentation of the tree
/// listing gets in the way (e.g. piping into a spreadsheet).
pub struct FlatReporter<'a> {
	forest: &'a Forest,
	active_only: bool,
}

impl<'a> FlatReporter<'a> {
	pub fn new(forest: &'a Forest, active_only: bool) -> Self {
		Self {
			forest,
			active_only,
		}
	}

	pub fn table(&self) -> Result<Table, HierarchyError> {
		let mut table = Table::new(6);
		table.right_align(vec![2]);
		table.add_header(vec![
			"Code", "Name", "Level", "Postable", "Active", "Path",
		]);
		table.add_separator();

		self.forest.walk(|node, depth| {
			if self.active_only && !node.is_active() {
				return Walk::Skip;
			}

			table.add_row(vec![
				node.record.code.as_str(),
				node.record.name.as_str(),
				(depth + 1).to_string().as_str(),
				yes_no(node.is_postable()),
				yes_no(node.is_active()),
				node.record.hierarchy_path.as_str(),
			]);
			Walk::Descend
		})?;

		Ok(table)
	}

	pub fn print(&self) -> Result<(), HierarchyError> {
		let table = self.table()?;
		if !table.has_data() {
			println!("No data");
			return Ok(());
		}

		table.print();
		Ok(())
	}
}

fn yes_no(flag: bool) -> &'static str {
	if flag {
		"yes"
	} else {
		"no"
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::hierarchy::record::AccountRecord;

	#[test]
	fn test_table() {
		let mut cash = AccountRecord::new(2, "1100", "Cash", Some(1));
		cash.is_postable = true;
		cash.hierarchy_path = "Assets/Cash".to_string();
		let mut assets = AccountRecord::new(1, "1000", "Assets", None);
		assets.hierarchy_path = "Assets".to_string();

		let forest = Forest::build(vec![cash, assets]);
		let rendered = FlatReporter::new(&forest, false).table().unwrap().render();
		let lines: Vec<&str> = rendered.lines().collect();

		assert_eq!(
			lines,
			vec![
				"Code |  Name  | Level | Postable | Active |    Path    ",
				"-".repeat(55).as_str(),
				"1000   Assets       1   no         yes      Assets     ",
				"1100   Cash         2   yes        yes      Assets/Cash",
			]
		);
	}

	#[test]
	fn test_active_only_skips_subtree() {
		let mut assets = AccountRecord::new(1, "1000", "Assets", None);
		assets.is_active = false;
		let forest = Forest::build(vec![
			assets,
			AccountRecord::new(2, "1100", "Cash", Some(1)),
			AccountRecord::new(3, "2000", "Liabilities", None),
		]);

		let table = FlatReporter::new(&forest, true).table().unwrap();
		assert!(table.has_data());
		let rendered = table.render();
		assert_eq!(rendered.lines().count(), 3);
		assert!(rendered.contains("Liabilities"));
		assert!(!rendered.contains("Cash"));
	}

	#[test]
	fn test_everything_filtered_has_no_data() {
		let mut assets = AccountRecord::new(1, "1000", "Assets", None);
		assets.is_active = false;
		let forest = Forest::build(vec![
			assets,
			AccountRecord::new(2, "1100", "Cash", Some(1)),
		]);

		assert!(!FlatReporter::new(&forest, true).table().unwrap().has_data());
		assert!(FlatReporter::new(&forest, false).table().unwrap().has_data());
	}
}
