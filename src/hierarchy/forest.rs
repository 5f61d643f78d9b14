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
use crate::hierarchy::record::AccountRecord;
use crate::util::collate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

/// A chart of accounts assembled from a flat list of records. All nodes live
/// in one arena and refer to each other by index, so building never needs to
/// alias or mutate shared nodes.
///
/// Every record handed to the builder ends up in the arena exactly once, in
/// input order, whether or not it is reachable from a root.
#[derive(Debug, Default)]
pub struct Forest {
	nodes: Vec<TreeNode>,
	roots: Vec<usize>,

	/// account id -> arena index; later duplicates overwrite earlier ones
	index: HashMap<i64, usize>,

	/// Nodes no root can reach, i.e. those on or beneath a cyclic parent
	/// chain. Kept in input order.
	detached: Vec<usize>,

	/// First pair of arena indices found sharing an id, earlier one first
	duplicate: Option<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
	pub record: AccountRecord,
	parent: Option<usize>,
	children: Vec<usize>, // sorted by code once built
}

/// What a walk should do after visiting a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walk {
	Descend,
	Skip,
}

/// Owned, nested form of the forest, for export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountTree {
	#[serde(flatten)]
	pub record: AccountRecord,
	pub children: Vec<AccountTree>,
}

impl TreeNode {
	fn new(record: AccountRecord) -> Self {
		Self {
			record,
			parent: None,
			children: vec![],
		}
	}

	pub fn has_children(&self) -> bool {
		!self.children.is_empty()
	}

	pub fn child_count(&self) -> usize {
		self.children.len()
	}

	pub fn is_postable(&self) -> bool {
		self.record.is_postable
	}

	pub fn is_active(&self) -> bool {
		self.record.is_active
	}
}

impl Forest {
	/// Links every record to its parent and sorts each level by code.
	///
	/// Records without a parent, or whose parent id matches no record, become
	/// roots. When ids repeat, the last record with that id is the one
	/// children attach to.
	pub fn build(records: Vec<AccountRecord>) -> Self {
		let mut nodes: Vec<TreeNode> = Vec::with_capacity(records.len());
		let mut index: HashMap<i64, usize> =
			HashMap::with_capacity(records.len());
		let mut duplicate = None;

		for (i, record) in records.into_iter().enumerate() {
			if let Some(previous) = index.insert(record.id, i) {
				warn!(
					id = record.id,
					"duplicate account id; {} replaces {}",
					record.code,
					nodes[previous].record.code
				);
				duplicate.get_or_insert((previous, i));
			}
			nodes.push(TreeNode::new(record));
		}

		let mut roots = vec![];
		for i in 0..nodes.len() {
			let parent_id = nodes[i].record.parent_id;
			match parent_id.and_then(|id| index.get(&id).copied()) {
				Some(parent) => {
					nodes[i].parent = Some(parent);
					nodes[parent].children.push(i);
				},
				None => {
					if let Some(missing) = parent_id {
						debug!(
							code = %nodes[i].record.code,
							parent_id = missing,
							"parent not found; treating as root"
						);
					}
					roots.push(i);
				},
			}
		}

		sort_by_code(&nodes, &mut roots);
		for i in 0..nodes.len() {
			let mut children = std::mem::take(&mut nodes[i].children);
			sort_by_code(&nodes, &mut children);
			nodes[i].children = children;
		}

		let detached = find_detached(&nodes, &roots);
		if !detached.is_empty() {
			debug!(count = detached.len(), "accounts unreachable from any root");
		}

		Self {
			nodes,
			roots,
			index,
			detached,
			duplicate,
		}
	}

	/// As build(), but refuses input in which two records share an id.
	pub fn build_strict(
		records: Vec<AccountRecord>,
	) -> Result<Self, HierarchyError> {
		let mut seen: HashMap<i64, &str> = HashMap::with_capacity(records.len());
		for record in &records {
			if let Some(first) = seen.insert(record.id, &record.code) {
				return Err(HierarchyError::DuplicateId {
					id: record.id,
					first: first.to_string(),
					second: record.code.clone(),
				});
			}
		}

		Ok(Self::build(records))
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// All nodes in input order, reachable or not.
	pub fn nodes(&self) -> impl Iterator<Item = &TreeNode> {
		self.nodes.iter()
	}

	pub fn roots(&self) -> impl Iterator<Item = &TreeNode> {
		self.roots.iter().map(|&i| &self.nodes[i])
	}

	pub fn children<'a>(
		&'a self,
		node: &'a TreeNode,
	) -> impl Iterator<Item = &'a TreeNode> {
		node.children.iter().map(|&i| &self.nodes[i])
	}

	pub fn parent(&self, node: &TreeNode) -> Option<&TreeNode> {
		node.parent.map(|i| &self.nodes[i])
	}

	/// Looks up the node children attach to for this id.
	pub fn get(&self, id: i64) -> Option<&TreeNode> {
		self.index.get(&id).map(|&i| &self.nodes[i])
	}

	/// The chain from the node's root down to the node itself.
	pub fn ancestors<'a>(&'a self, node: &'a TreeNode) -> Vec<&'a TreeNode> {
		let mut chain = vec![node];
		let mut current = node;

		// a chain longer than the arena can only be a loop
		while let Some(parent) = self.parent(current) {
			if chain.len() > self.nodes.len() {
				break;
			}
			chain.push(parent);
			current = parent;
		}

		chain.reverse();
		chain
	}

	pub fn detached(&self) -> impl Iterator<Item = &TreeNode> {
		self.detached.iter().map(|&i| &self.nodes[i])
	}

	pub fn ensure_acyclic(&self) -> Result<(), HierarchyError> {
		if self.detached.is_empty() {
			return Ok(());
		}

		Err(HierarchyError::CycleDetected {
			ids: self.detached().map(|n| n.record.id).collect(),
		})
	}

	/// Visits every node depth-first, parents before children, siblings in
	/// code order. The visitor receives the node and its depth (roots are 0)
	/// and may prune the node's subtree by returning Walk::Skip.
	pub fn walk<F>(&self, visit: F) -> Result<(), HierarchyError>
	where
		F: FnMut(&TreeNode, usize) -> Walk,
	{
		self.ensure_acyclic()?;
		self.walk_reachable(visit)
	}

	/// Like walk(), but ignores detached nodes instead of refusing to run.
	pub(super) fn walk_reachable<F>(
		&self,
		mut visit: F,
	) -> Result<(), HierarchyError>
	where
		F: FnMut(&TreeNode, usize) -> Walk,
	{
		let mut visited = vec![false; self.nodes.len()];
		let mut stack: Vec<(usize, usize)> =
			self.roots.iter().rev().map(|&i| (i, 0)).collect();

		while let Some((i, depth)) = stack.pop() {
			// the arena links each node once; a second visit means it is corrupt
			if std::mem::replace(&mut visited[i], true) {
				return Err(HierarchyError::CycleDetected {
					ids: vec![self.nodes[i].record.id],
				});
			}

			let node = &self.nodes[i];
			if visit(node, depth) == Walk::Descend {
				stack.extend(node.children.iter().rev().map(|&c| (c, depth + 1)));
			}
		}

		Ok(())
	}

	/// Visits every node in pre-order with its depth.
	pub fn traverse<F>(&self, mut visit: F) -> Result<(), HierarchyError>
	where
		F: FnMut(&TreeNode, usize),
	{
		self.walk(|node, depth| {
			visit(node, depth);
			Walk::Descend
		})
	}

	/// Records in traversal order. Building from this output yields the same
	/// tree again.
	///
	/// Refuses forests with repeated ids: traversal order can put the record
	/// that won the id before the one it replaced, and a rebuild would then
	/// attach children to the other one.
	pub fn flatten(&self) -> Result<Vec<AccountRecord>, HierarchyError> {
		if let Some((first, second)) = self.duplicate {
			return Err(HierarchyError::DuplicateId {
				id: self.nodes[second].record.id,
				first: self.nodes[first].record.code.clone(),
				second: self.nodes[second].record.code.clone(),
			});
		}

		let mut out = Vec::with_capacity(self.nodes.len());
		self.traverse(|node, _| out.push(node.record.clone()))?;
		Ok(out)
	}

	pub fn nested(&self) -> Result<Vec<AccountTree>, HierarchyError> {
		self.ensure_acyclic()?;
		Ok(self.roots.iter().map(|&i| self.nest(i)).collect())
	}

	fn nest(&self, i: usize) -> AccountTree {
		let node = &self.nodes[i];
		AccountTree {
			record: node.record.clone(),
			children: node.children.iter().map(|&c| self.nest(c)).collect(),
		}
	}
}

#[cfg(test)]
impl Forest {
	/// Adds an already linked node to the roots as well, which no build can
	/// produce.
	pub(super) fn list_as_root(&mut self, id: i64) {
		let i = self.index[&id];
		self.roots.push(i);
	}
}

/// Stable, so equal codes keep their input order.
fn sort_by_code(nodes: &[TreeNode], level: &mut [usize]) {
	level.sort_by(|&a, &b| {
		collate::compare(&nodes[a].record.code, &nodes[b].record.code)
	});
}

fn find_detached(nodes: &[TreeNode], roots: &[usize]) -> Vec<usize> {
	let mut reached = vec![false; nodes.len()];
	let mut stack = roots.to_vec();

	while let Some(i) = stack.pop() {
		if std::mem::replace(&mut reached[i], true) {
			continue;
		}
		stack.extend(nodes[i].children.iter().copied());
	}

	(0..nodes.len()).filter(|&i| !reached[i]).collect()
}
