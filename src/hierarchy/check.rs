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
use std::collections::HashMap;
use std::fmt;

/// A data integrity concern about one account. None of these stop the tree
/// from being built; they point at input the accounts service should not
/// have produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
	pub code: String,
	pub name: String,
	pub kind: FindingKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FindingKind {
	DuplicateId { id: i64, first_code: String },
	DanglingParent { parent_id: i64 },
	Detached,
	LevelMismatch { declared: i64, actual: i64 },
	PostableWithChildren { children: usize },
	ActiveUnderInactive { parent_code: String },
}

impl Finding {
	fn new(node: &TreeNode, kind: FindingKind) -> Self {
		Self {
			code: node.record.code.clone(),
			name: node.record.name.clone(),
			kind,
		}
	}
}

impl fmt::Display for Finding {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "[{} {}] ", self.code, self.name)?;
		match &self.kind {
			FindingKind::DuplicateId { id, first_code } => {
				write!(f, "duplicate id {} (also used by {})", id, first_code)
			},
			FindingKind::DanglingParent { parent_id } => write!(
				f,
				"parent id {} does not exist; treated as a root",
				parent_id
			),
			FindingKind::Detached => write!(
				f,
				"unreachable from any root due to a cyclic parent chain"
			),
			FindingKind::LevelMismatch { declared, actual } => write!(
				f,
				"declared level {} but sits at level {}",
				declared, actual
			),
			FindingKind::PostableWithChildren { children } => write!(
				f,
				"postable account has {} sub-account{}",
				children,
				if *children == 1 { "" } else { "s" }
			),
			FindingKind::ActiveUnderInactive { parent_code } => write!(
				f,
				"active account under inactive parent {}",
				parent_code
			),
		}
	}
}

/// Inspects a leniently built forest. Findings come grouped: duplicate ids,
/// dangling parents and detached accounts in input order, then per-account
/// structural findings in tree order.
///
/// Fails only if the arena links a node twice.
pub fn inspect(forest: &Forest) -> Result<Vec<Finding>, HierarchyError> {
	let mut findings = vec![];

	let mut first_by_id: HashMap<i64, &str> = HashMap::new();
	for node in forest.nodes() {
		let id = node.record.id;
		match first_by_id.get(&id) {
			Some(first) => findings.push(Finding::new(
				node,
				FindingKind::DuplicateId {
					id,
					first_code: first.to_string(),
				},
			)),
			None => {
				first_by_id.insert(id, &node.record.code);
			},
		}
	}

	for node in forest.nodes() {
		let Some(parent_id) = node.record.parent_id else {
			continue;
		};
		if forest.get(parent_id).is_none() {
			findings.push(Finding::new(
				node,
				FindingKind::DanglingParent { parent_id },
			));
		}
	}

	findings.extend(
		forest
			.detached()
			.map(|node| Finding::new(node, FindingKind::Detached)),
	);

	forest.walk_reachable(|node, depth| {
		let actual = depth as i64 + 1;
		if node.record.level != 0 && node.record.level != actual {
			findings.push(Finding::new(
				node,
				FindingKind::LevelMismatch {
					declared: node.record.level,
					actual,
				},
			));
		}

		if node.is_postable() && node.has_children() {
			findings.push(Finding::new(
				node,
				FindingKind::PostableWithChildren {
					children: node.child_count(),
				},
			));
		}

		if let Some(parent) = forest.parent(node) {
			if node.is_active() && !parent.is_active() {
				findings.push(Finding::new(
					node,
					FindingKind::ActiveUnderInactive {
						parent_code: parent.record.code.clone(),
					},
				));
			}
		}

		Walk::Descend
	})?;

	Ok(findings)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::hierarchy::record::AccountRecord;

	fn record(
		id: i64,
		code: &str,
		level: i64,
		parent_id: Option<i64>,
	) -> AccountRecord {
		let mut r = AccountRecord::new(id, code, code, parent_id);
		r.level = level;
		r
	}

	fn messages(records: Vec<AccountRecord>) -> Vec<String> {
		inspect(&Forest::build(records))
			.unwrap()
			.iter()
			.map(|f| f.to_string())
			.collect()
	}

	#[test]
	fn test_clean_hierarchy_has_no_findings() {
		let mut leaf = record(2, "110", 2, Some(1));
		leaf.is_postable = true;

		assert!(messages(vec![record(1, "100", 1, None), leaf]).is_empty());
	}

	#[test]
	fn test_duplicate_ids() {
		assert_eq!(
			messages(vec![
				record(1, "100", 0, None),
				record(1, "200", 0, None),
				record(1, "300", 0, None),
			]),
			vec![
				"[200 200] duplicate id 1 (also used by 100)",
				"[300 300] duplicate id 1 (also used by 100)",
			]
		);
	}

	#[test]
	fn test_dangling_parent() {
		assert_eq!(
			messages(vec![record(1, "100", 0, Some(42))]),
			vec!["[100 100] parent id 42 does not exist; treated as a root"]
		);
	}

	#[test]
	fn test_detached_accounts() {
		assert_eq!(
			messages(vec![
				record(1, "100", 0, Some(2)),
				record(2, "200", 0, Some(1)),
			]),
			vec![
				"[100 100] unreachable from any root due to a cyclic parent chain",
				"[200 200] unreachable from any root due to a cyclic parent chain",
			]
		);
	}

	#[test]
	fn test_level_mismatch_ignores_missing_level() {
		assert_eq!(
			messages(vec![
				record(1, "100", 0, None),
				record(2, "110", 3, Some(1)),
				record(3, "120", 0, Some(1)),
			]),
			vec!["[110 110] declared level 3 but sits at level 2"]
		);
	}

	#[test]
	fn test_postable_with_children() {
		let mut parent = record(1, "100", 1, None);
		parent.is_postable = true;

		let findings = inspect(&Forest::build(vec![
			parent,
			record(2, "110", 2, Some(1)),
		]))
		.unwrap();
		assert_eq!(
			findings,
			vec![Finding {
				code: "100".to_string(),
				name: "100".to_string(),
				kind: FindingKind::PostableWithChildren { children: 1 },
			}]
		);
		assert_eq!(
			findings[0].to_string(),
			"[100 100] postable account has 1 sub-account"
		);
	}

	#[test]
	fn test_walk_failure_is_propagated() {
		let mut forest = Forest::build(vec![
			record(1, "100", 1, None),
			record(2, "110", 2, Some(1)),
		]);
		forest.list_as_root(2);

		assert_eq!(
			inspect(&forest).unwrap_err(),
			HierarchyError::CycleDetected { ids: vec![2] }
		);
	}

	#[test]
	fn test_active_under_inactive() {
		let mut parent = record(1, "100", 1, None);
		parent.is_active = false;
		let mut retired = record(3, "120", 2, Some(1));
		retired.is_active = false;

		assert_eq!(
			messages(vec![parent, record(2, "110", 2, Some(1)), retired]),
			vec!["[110 110] active account under inactive parent 100"]
		);
	}
}
