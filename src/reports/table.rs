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
use std::fmt::Write;

/// Standard table printer for those reports, such as the flat account list,
/// that report a potentially large number of single-line objects.
///
/// Not for use with the tree listing, which relies on indentation instead.
pub struct Table {
	column_count: usize,
	rows: Vec<Row>,
	right_align: Vec<bool>, // indicates columns by index
}

pub enum Row {
	Header(Vec<String>),
	Data(Vec<String>),
	Separator,
}

impl Table {
	pub fn new(column_count: usize) -> Self {
		Self {
			column_count,
			rows: Vec::new(),
			right_align: vec![false; column_count],
		}
	}

	/// Adds a header row.
	pub fn add_header(&mut self, row: Vec<&str>) {
		self.rows.push(Row::Header(
			row.into_iter().map(|s| s.to_string()).collect(),
		));
	}

	/// Adds a data row.
	pub fn add_row(&mut self, row: Vec<&str>) {
		self.rows
			.push(Row::Data(row.into_iter().map(|s| s.to_string()).collect()));
	}

	/// Adds a full separator row.
	pub fn add_separator(&mut self) {
		self.rows.push(Row::Separator);
	}

	/// Specifies columns that should be right-aligned by index.
	pub fn right_align(&mut self, cols: Vec<usize>) {
		for col in cols {
			self.right_align[col] = true;
		}
	}

	/// True iff at least one data row was added.
	pub fn has_data(&self) -> bool {
		self.rows.iter().any(|row| matches!(row, Row::Data(_)))
	}

	pub fn print(&self) {
		println!();
		print!("{}", self.render());
	}

	pub fn render(&self) -> String {
		let mut out = String::new();
		let mut max_widths = vec![0; self.column_count];

		// Calculate maximum column widths for proper spacing
		for row in &self.rows {
			if let Row::Data(data_row) | Row::Header(data_row) = row {
				for (i, value) in data_row.iter().enumerate() {
					max_widths[i] = max_widths[i].max(value.chars().count());
				}
			}
		}

		for row in &self.rows {
			match row {
				Row::Header(header_row) => {
					self.render_centered_row(&mut out, &max_widths, header_row)
				},
				Row::Data(data_row) => {
					self.render_data_row(&mut out, &max_widths, data_row)
				},
				Row::Separator => self.render_separator(&mut out, &max_widths),
			}
		}

		out
	}

	fn render_data_row(
		&self,
		out: &mut String,
		max_widths: &[usize],
		data_row: &[String],
	) {
		for (i, value) in data_row.iter().enumerate() {
			if self.right_align[i] {
				let _ = write!(out, "{:>width$}", value, width = max_widths[i]);
			} else {
				let _ = write!(out, "{:<width$}", value, width = max_widths[i]);
			}
			if i < data_row.len() - 1 {
				out.push_str("   ");
			}
		}
		out.push('\n');
	}

	fn render_centered_row(
		&self,
		out: &mut String,
		max_widths: &[usize],
		data_row: &[String],
	) {
		for (i, value) in data_row.iter().enumerate() {
			out.push_str(&Table::center_align(value, max_widths[i]));
			if i < data_row.len() - 1 {
				out.push_str(" | ");
			}
		}
		out.push('\n');
	}

	fn render_separator(&self, out: &mut String, max_widths: &[usize]) {
		let total_width: usize =
			max_widths.iter().sum::<usize>() + (3 * (self.column_count - 1));
		out.push_str(&"-".repeat(total_width));
		out.push('\n');
	}

	fn center_align(value: &str, width: usize) -> String {
		let len = value.chars().count();
		if len >= width {
			return value.to_string();
		}
		let total_padding = width - len;
		let left_padding = total_padding / 2;
		let right_padding = total_padding - left_padding;

		format!(
			"{}{}{}",
			" ".repeat(left_padding),
			value,
			" ".repeat(right_padding)
		)
	}
}
