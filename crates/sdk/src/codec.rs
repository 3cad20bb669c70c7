// Copyright 2025 chenjjiaa
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Hex codec for gateway wire fields.
//!
//! Every field that is hashed or transmitted passes through this module
//! first: addresses and payloads travel as prefix-free, even-length,
//! lowercase hex. The codec is byte-oriented (one character, one wire
//! byte), which is exact for the ASCII/JSON payloads the gateway accepts.

use serde_json::Value;

/// Encode a string as lowercase hex, two digits per character.
///
/// Output length is always `2 * input.len()` for ASCII input. Code points
/// above `0xff` contribute their low byte only, matching the byte-oriented
/// wire format. Empty input yields empty output.
pub fn string_to_hex(s: &str) -> String {
	let mut out = String::with_capacity(s.len() * 2);
	for c in s.chars() {
		out.push_str(&format!("{:02x}", (c as u32) & 0xff));
	}
	out
}

/// Decode a hex string back into text.
///
/// The input is normalized first. Consecutive 2-digit groups decode to
/// characters; a decoded NUL is dropped (the encode path never produces
/// one for NUL-free input), as is any group that is not valid hex. A
/// trailing odd digit is ignored.
pub fn hex_to_string(h: &str) -> String {
	let h = normalize_hex(h);
	let bytes = h.as_bytes();
	let mut out = String::new();
	let mut i = 0;
	while i + 2 <= bytes.len() {
		let hi = (bytes[i] as char).to_digit(16);
		let lo = (bytes[i + 1] as char).to_digit(16);
		if let (Some(hi), Some(lo)) = (hi, lo) {
			let code = (hi * 16 + lo) as u8;
			if code != 0 {
				out.push(code as char);
			}
		}
		i += 2;
	}
	out
}

/// Strip a literal leading `0x` prefix, if present.
///
/// Anything else is returned unchanged, so the function is idempotent on
/// well-formed hex values.
pub fn normalize_hex(hex: &str) -> &str {
	hex.strip_prefix("0x").unwrap_or(hex)
}

/// Permissive boundary variant of [`normalize_hex`] for untyped JSON input.
///
/// Strings are normalized; any non-string value coerces to the empty
/// string instead of erroring. Callers at the gateway boundary pass
/// sentinel values (numbers, null) here and rely on getting `""` back.
pub fn normalize_hex_value(value: &Value) -> String {
	match value {
		Value::String(s) => normalize_hex(s).to_string(),
		_ => String::new(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_string_to_hex_basic() {
		assert_eq!(string_to_hex("abc"), "616263");
		assert_eq!(string_to_hex(""), "");
	}

	#[test]
	fn test_hex_to_string_basic() {
		assert_eq!(hex_to_string("616263"), "abc");
		assert_eq!(hex_to_string("0x616263"), "abc");
		assert_eq!(hex_to_string(""), "");
	}

	#[test]
	fn test_round_trip_ascii() {
		let inputs = [
			"hello world",
			"{\"Action\":\"CP_REGISTERWALLET\"}",
			"0123456789",
			"!@#$%^&*()",
		];
		for s in inputs {
			assert_eq!(hex_to_string(&string_to_hex(s)), s, "round trip failed for {s:?}");
		}
	}

	#[test]
	fn test_output_length_law() {
		let s = "gateway";
		assert_eq!(string_to_hex(s).len(), 2 * s.len());
	}

	#[test]
	fn test_null_bytes_dropped() {
		assert_eq!(hex_to_string("610062"), "ab");
	}

	#[test]
	fn test_odd_length_trailing_digit_ignored() {
		assert_eq!(hex_to_string("6162634"), "abc");
	}

	#[test]
	fn test_invalid_pair_skipped() {
		assert_eq!(hex_to_string("61zz62"), "ab");
	}

	#[test]
	fn test_normalize_hex() {
		assert_eq!(normalize_hex("0xabc"), "abc");
		assert_eq!(normalize_hex("abc"), "abc");
		assert_eq!(normalize_hex(""), "");
		// idempotent
		assert_eq!(normalize_hex(normalize_hex("0xabc")), "abc");
	}

	#[test]
	fn test_normalize_hex_value_coerces_non_strings() {
		assert_eq!(normalize_hex_value(&json!("0xabc")), "abc");
		assert_eq!(normalize_hex_value(&json!("abc")), "abc");
		assert_eq!(normalize_hex_value(&json!(123)), "");
		assert_eq!(normalize_hex_value(&json!(null)), "");
		assert_eq!(normalize_hex_value(&json!(["abc"])), "");
	}
}
