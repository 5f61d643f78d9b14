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
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum HierarchyError {
	#[error("duplicate account id {id} (codes {first} and {second})")]
	DuplicateId {
		id: i64,
		first: String,
		second: String,
	},

	#[error("cycle detected in the parent chain of account ids {ids:?}")]
	CycleDetected { ids: Vec<i64> },
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_messages() {
		let dup = HierarchyError::DuplicateId {
			id: 4,
			first: "1100".to_string(),
			second: "1150".to_string(),
		};
		assert_eq!(
			dup.to_string(),
			"duplicate account id 4 (codes 1100 and 1150)"
		);

		let cycle = HierarchyError::CycleDetected { ids: vec![4, 5] };
		assert_eq!(
			cycle.to_string(),
			"cycle detected in the parent chain of account ids [4, 5]"
		);
	}
}
