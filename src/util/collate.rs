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
use std::cmp::Ordering;

/// Compares account codes the way a browser's default locale comparison
/// orders them: punctuation, then digits, then letters, case-insensitively,
/// with lowercase ahead of uppercase only when everything else is equal.
///
/// Digits are compared one by one, so "10" sorts before "9".
pub fn compare(a: &str, b: &str) -> Ordering {
	a.chars()
		.map(primary_key)
		.cmp(b.chars().map(primary_key))
		.then_with(|| a.chars().map(tertiary_key).cmp(b.chars().map(tertiary_key)))
}

fn primary_key(c: char) -> (u8, char) {
	let class = if c.is_alphabetic() {
		2
	} else if c.is_numeric() {
		1
	} else {
		0
	};

	(class, c.to_lowercase().next().unwrap_or(c))
}

fn tertiary_key(c: char) -> (bool, char) {
	(c.is_uppercase(), c)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_digits_compare_lexicographically() {
		assert_eq!(compare("100", "200"), Ordering::Less);
		assert_eq!(compare("10", "9"), Ordering::Less);
		assert_eq!(compare("1100", "110"), Ordering::Greater);
		assert_eq!(compare("110", "1100"), Ordering::Less);
	}

	#[test]
	fn test_case_insensitive_first() {
		assert_eq!(compare("a2", "B1"), Ordering::Less);
		assert_eq!(compare("B1", "a2"), Ordering::Greater);
		assert_eq!(compare("a", "A"), Ordering::Less);
		assert_eq!(compare("A", "a"), Ordering::Greater);
	}

	#[test]
	fn test_character_classes() {
		// punctuation < digits < letters, even where ascii disagrees
		assert_eq!(compare("~1", "1"), Ordering::Less);
		assert_eq!(compare("1-00", "1A"), Ordering::Less);
		assert_eq!(compare("9", "A"), Ordering::Less);
		assert_eq!(compare("_x", "0x"), Ordering::Less);
	}

	#[test]
	fn test_equal() {
		assert_eq!(compare("", ""), Ordering::Equal);
		assert_eq!(compare("1100", "1100"), Ordering::Equal);
	}
}
