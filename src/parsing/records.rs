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
use crate::hierarchy::record::AccountRecord;
use anyhow::{Context, Error};
use serde::Deserialize;

/// The accounts service answers either with a bare list or with the list
/// wrapped in a `data` field.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RecordsPayload {
	Bare(Vec<AccountRecord>),
	Wrapped { data: Vec<AccountRecord> },
}

impl RecordsPayload {
	pub fn into_records(self) -> Vec<AccountRecord> {
		match self {
			RecordsPayload::Bare(records) => records,
			RecordsPayload::Wrapped { data } => data,
		}
	}
}

pub fn parse_records(content: &str) -> Result<Vec<AccountRecord>, Error> {
	let payload: RecordsPayload = serde_json::from_str(content)
		.context("input is not a list of account records")?;
	Ok(payload.into_records())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_bare_list() {
		let records = parse_records(
			r#"[
				{"id": 1, "code": "1000", "name": "Assets"},
				{"id": 2, "code": "1100", "name": "Cash", "parentId": 1}
			]"#,
		)
		.unwrap();

		assert_eq!(records.len(), 2);
		assert_eq!(records[1].parent_id, Some(1));
	}

	#[test]
	fn test_parse_wrapped_list() {
		let records = parse_records(
			r#"{"data": [{"id": 1, "code": "1000", "name": "Assets"}]}"#,
		)
		.unwrap();

		assert_eq!(records.len(), 1);
		assert_eq!(records[0].code, "1000");
	}

	#[test]
	fn test_parse_empty_list() {
		assert!(parse_records("[]").unwrap().is_empty());
	}

	#[test]
	fn test_parse_rejects_malformed_input() {
		assert!(parse_records(r#"{"accounts": []}"#).is_err());
		assert!(parse_records(r#"[{"id": "x"}]"#).is_err());
		assert!(parse_records("not json").is_err());
	}
}
