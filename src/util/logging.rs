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
use tracing_subscriber::EnvFilter;

/// Sends diagnostics to stderr so that reports on stdout stay clean.
///
/// RUST_LOG takes precedence; otherwise each -v raises the level from warn.
pub fn init(verbosity: u8) {
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(default_level(verbosity)));

	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.without_time()
		.try_init();
}

fn default_level(verbosity: u8) -> &'static str {
	match verbosity {
		0 => "warn",
		1 => "info",
		_ => "debug",
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_level() {
		assert_eq!(default_level(0), "warn");
		assert_eq!(default_level(1), "info");
		assert_eq!(default_level(5), "debug");
	}
}
