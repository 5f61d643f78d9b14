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
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
	pub source: Option<Source>,
}

/// Where to fetch the chart of accounts from when no input file is given.
#[derive(Debug, Default, Deserialize)]
pub struct Source {
	pub api_url: Option<String>,
	pub api_key: Option<String>,
	pub api_key_cmd: Option<String>,

	/// Path below api_url that lists the account hierarchy.
	pub endpoint: Option<String>,

	/// Company to scope the hierarchy to when --company is not given.
	pub company: Option<i64>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_source() {
		let config: Config = toml::from_str(
			r#"
			[source]
			api_url = "https://erp.example.com/api"
			api_key = "secret"
			endpoint = "coa/tree"
			company = 3
			"#,
		)
		.unwrap();

		let source = config.source.unwrap();
		assert_eq!(source.api_url.as_deref(), Some("https://erp.example.com/api"));
		assert_eq!(source.api_key.as_deref(), Some("secret"));
		assert_eq!(source.endpoint.as_deref(), Some("coa/tree"));
		assert_eq!(source.company, Some(3));
		assert!(source.api_key_cmd.is_none());
	}

	#[test]
	fn test_empty_config() {
		let config: Config = toml::from_str("").unwrap();
		assert!(config.source.is_none());
	}
}
