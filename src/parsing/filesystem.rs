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
use crate::config::config_file::Config;
use anyhow::{anyhow, bail, Context, Error};
use dirs::home_dir;
use std::fs;
use std::fs::File;
use std::path::PathBuf;
use std::process::Command;

pub struct Filesystem {}

impl Filesystem {
	pub fn new() -> Self {
		Self {}
	}

	pub fn read(&self, file_path: &str) -> Result<String, Error> {
		fs::read_to_string(file_path)
			.with_context(|| format!("unable to read {}", file_path))
	}

	/// Fetches the config from the given path, or default path if none.
	/// The boolean argument indicates whether it is necessary to inspect
	/// the config for authentication, i.e. for fetching accounts via API.
	pub fn get_config(
		&self,
		custom_config_path: Option<&String>,
		expand_auth: bool,
	) -> Result<Config, Error> {
		let config_path = match &custom_config_path {
			None => home_dir()
				.ok_or_else(|| anyhow!("unable to determine home directory"))?
				.join(".config/coa/config.toml"),
			Some(p) => PathBuf::from(p),
		};

		// create empty config file if it doesn't exist
		if !config_path.exists() && custom_config_path.is_none() {
			if let Some(parent) = config_path.parent() {
				fs::create_dir_all(parent)?;
			}
			File::create(config_path.clone())?;
		}

		let content = fs::read_to_string(config_path)?;
		let mut config = parse_config(&content)?;

		if !expand_auth {
			return Ok(config);
		}

		if let Some(source) = &mut config.source {
			if source.api_key_cmd.is_some() && source.api_key.is_some() {
				bail!("Only one of source.api_key and source.api_key_cmd may be specified")
			}

			if let Some(api_key_cmd) = &source.api_key_cmd {
				source.api_key = Some(run_key_command(api_key_cmd)?);
			}
		}

		Ok(config)
	}
}

fn parse_config(content: &str) -> Result<Config, Error> {
	toml::from_str(content).map_err(|e| anyhow!("failed to parse config: {}", e))
}

/// Runs the user's command through the shell and takes its trimmed stdout as
/// the API key.
fn run_key_command(cmd: &str) -> Result<String, Error> {
	let output = Command::new("sh")
		.arg("-c")
		.arg(cmd)
		.output()
		.map_err(|e| anyhow!("failed to execute api_key_cmd: {}", e))?;

	if !output.status.success() {
		bail!(
			"source api_key_cmd failed with status {}: {}",
			output.status,
			String::from_utf8_lossy(&output.stderr)
		);
	}

	Ok(String::from_utf8(output.stdout)
		.map_err(|e| anyhow!("failed to parse command output: {}", e))?
		.trim()
		.to_string())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_config_error() {
		let err = parse_config("[source\napi_url = 1").unwrap_err();
		assert!(err.to_string().starts_with("failed to parse config"));
	}

	#[test]
	fn test_run_key_command() {
		assert_eq!(run_key_command("echo '  s3cret  '").unwrap(), "s3cret");
		assert!(run_key_command("exit 3").is_err());
	}

	#[test]
	fn test_read_missing_file() {
		let fs = Filesystem::new();
		let err = fs.read("does/not/exist.json").unwrap_err();
		assert_eq!(err.to_string(), "unable to read does/not/exist.json");
	}

	#[test]
	fn test_get_config_custom_path_with_key_command() {
		let path = std::env::temp_dir()
			.join(format!("coa-config-{}.toml", std::process::id()));
		fs::write(
			&path,
			"[source]\napi_url = \"http://localhost\"\napi_key_cmd = \"echo abc\"\n",
		)
		.unwrap();
		let path_str = path.to_string_lossy().to_string();

		let fs = Filesystem::new();
		let expanded = fs.get_config(Some(&path_str), true).unwrap();
		assert_eq!(expanded.source.unwrap().api_key.as_deref(), Some("abc"));

		let raw = fs.get_config(Some(&path_str), false).unwrap();
		assert!(raw.source.unwrap().api_key.is_none());

		std::fs::remove_file(path).unwrap();
	}

	#[test]
	fn test_get_config_rejects_both_keys() {
		let path = std::env::temp_dir()
			.join(format!("coa-config-both-{}.toml", std::process::id()));
		fs::write(
			&path,
			"[source]\napi_key = \"a\"\napi_key_cmd = \"echo b\"\n",
		)
		.unwrap();
		let path_str = path.to_string_lossy().to_string();

		let fs = Filesystem::new();
		assert!(fs.get_config(Some(&path_str), true).is_err());

		std::fs::remove_file(path).unwrap();
	}
}
