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
use serde::{Deserialize, Serialize};

/// One account as delivered by the accounts service, flat, with a reference
/// to its parent by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRecord {
	pub id: i64,
	pub name: String,
	pub code: String,

	/// Depth hint from the source system, 1 for top-level accounts. Zero means
	/// the source did not supply one. Never used to place the account.
	#[serde(default)]
	pub level: i64,

	#[serde(default)]
	pub parent_id: Option<i64>,

	#[serde(default)]
	pub is_postable: bool,

	#[serde(default = "default_active")]
	pub is_active: bool,

	/// Breadcrumb precomputed upstream; carried through untouched.
	#[serde(default)]
	pub hierarchy_path: String,
}

fn default_active() -> bool {
	true
}

#[cfg(test)]
impl AccountRecord {
	pub fn new(id: i64, code: &str, name: &str, parent_id: Option<i64>) -> Self {
		Self {
			id,
			name: name.to_string(),
			code: code.to_string(),
			level: 0,
			parent_id,
			is_postable: false,
			is_active: true,
			hierarchy_path: String::new(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_deserialize_full_record() {
		let json = r#"{
			"id": 7,
			"name": "Cash",
			"code": "1100",
			"level": 2,
			"parentId": 1,
			"isPostable": true,
			"isActive": false,
			"hierarchyPath": "Assets / Cash"
		}"#;

		let record: AccountRecord = serde_json::from_str(json).unwrap();
		assert_eq!(record.id, 7);
		assert_eq!(record.code, "1100");
		assert_eq!(record.level, 2);
		assert_eq!(record.parent_id, Some(1));
		assert!(record.is_postable);
		assert!(!record.is_active);
		assert_eq!(record.hierarchy_path, "Assets / Cash");
	}

	#[test]
	fn test_deserialize_defaults() {
		let json = r#"{"id": 1, "name": "Assets", "code": "1000", "parentId": null}"#;

		let record: AccountRecord = serde_json::from_str(json).unwrap();
		assert_eq!(record.parent_id, None);
		assert_eq!(record.level, 0);
		assert!(!record.is_postable);
		assert!(record.is_active);
		assert!(record.hierarchy_path.is_empty());
	}

	#[test]
	fn test_serialize_uses_camel_case() {
		let record = AccountRecord::new(2, "1100", "Cash", Some(1));
		let value = serde_json::to_value(&record).unwrap();

		assert_eq!(value["parentId"], 1);
		assert_eq!(value["isPostable"], false);
		assert_eq!(value["hierarchyPath"], "");
	}
}
