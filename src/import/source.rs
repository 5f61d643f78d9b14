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
use crate::config::config_file::Source;
use crate::hierarchy::record::AccountRecord;
use crate::import::http::Client;
use crate::parsing::filesystem::Filesystem;
use crate::parsing::records::{parse_records, RecordsPayload};
use anyhow::{anyhow, bail, Context, Error};
use serde::Serialize;

const DEFAULT_ENDPOINT: &str = "accounts/hierarchy";

/// Anything that can hand over one complete snapshot of the chart of
/// accounts, optionally scoped to a single company. A snapshot is all or
/// nothing: on error no records are returned.
pub trait AccountSource {
	fn fetch(&self, company: Option<i64>) -> Result<Vec<AccountRecord>, Error>;
}

/// Reads a JSON export of the accounts service from disk.
pub struct FileSource {
	path: String,
}

impl FileSource {
	pub fn new(path: &str) -> Self {
		Self {
			path: path.to_string(),
		}
	}
}

impl AccountSource for FileSource {
	fn fetch(&self, company: Option<i64>) -> Result<Vec<AccountRecord>, Error> {
		if company.is_some() {
			bail!("A company filter only applies to remote sources");
		}

		let content = Filesystem::new().read(&self.path)?;
		parse_records(&content).with_context(|| format!("in {}", self.path))
	}
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HierarchyParams {
	#[serde(skip_serializing_if = "Option::is_none")]
	company_id: Option<i64>,
}

/// Queries the accounts service over HTTP. Read-only.
pub struct RemoteSource {
	http: Client,
	endpoint: String,

	/// Used when the caller gives no company
	default_company: Option<i64>,
}

impl RemoteSource {
	pub fn new(config: Source) -> Result<Self, Error> {
		let api_url = config
			.api_url
			.ok_or_else(|| anyhow!("no source.api_url in config"))?;

		Ok(Self {
			http: Client::new(&api_url, config.api_key),
			endpoint: config.endpoint.unwrap_or(DEFAULT_ENDPOINT.to_owned()),
			default_company: config.company,
		})
	}
}

impl AccountSource for RemoteSource {
	fn fetch(&self, company: Option<i64>) -> Result<Vec<AccountRecord>, Error> {
		let params = HierarchyParams {
			company_id: company.or(self.default_company),
		};

		let payload: RecordsPayload = self
			.http
			.get(&self.endpoint, Some(params))
			.with_context(|| {
				format!(
					"failed to fetch account hierarchy from {}",
					self.http.url(&self.endpoint)
				)
			})?;

		Ok(payload.into_records())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::fs;

	#[test]
	fn test_file_source_reads_records() {
		let path = std::env::temp_dir()
			.join(format!("coa-source-{}.json", std::process::id()));
		fs::write(&path, r#"[{"id": 1, "code": "1000", "name": "Assets"}]"#)
			.unwrap();

		let source = FileSource::new(&path.to_string_lossy());
		let records = source.fetch(None).unwrap();
		assert_eq!(records.len(), 1);
		assert!(source.fetch(Some(2)).is_err());

		fs::remove_file(path).unwrap();
	}

	#[test]
	fn test_remote_source_requires_url() {
		assert!(RemoteSource::new(Source::default()).is_err());
	}

	#[test]
	fn test_remote_source_defaults() {
		let source = RemoteSource::new(Source {
			api_url: Some("http://localhost:1".to_string()),
			company: Some(9),
			..Default::default()
		})
		.unwrap();

		assert_eq!(source.endpoint, DEFAULT_ENDPOINT);
		assert_eq!(source.default_company, Some(9));
	}

	#[test]
	fn test_query_params() {
		let with = serde_json::to_value(HierarchyParams {
			company_id: Some(4),
		})
		.unwrap();
		assert_eq!(with, serde_json::json!({"companyId": 4}));

		let without =
			serde_json::to_value(HierarchyParams { company_id: None }).unwrap();
		assert_eq!(without, serde_json::json!({}));
	}

	#[test]
	fn test_remote_fetch_failure_is_reported() {
		// nothing listens on port 1
		let source = RemoteSource::new(Source {
			api_url: Some("http://127.0.0.1:1".to_string()),
			..Default::default()
		})
		.unwrap();

		let err = source.fetch(None).unwrap_err();
		assert!(err
			.to_string()
			.starts_with("failed to fetch account hierarchy from"));
	}
}
