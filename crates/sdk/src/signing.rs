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

//! ECDSA message signing and verification over secp256k1.
//!
//! All signatures cover the SHA-256 digest of the message, never the raw
//! message. The digest function is fixed system-wide and is the same one
//! used for transaction-ID derivation; both sides of a verification must
//! agree on it or every check fails.
//!
//! Keys are consumed transiently as hex strings. Key generation and
//! storage are the caller's concern.

use crate::codec::normalize_hex;
use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Error types for signing operations
#[derive(Debug, Error)]
pub enum SigningError {
	#[error("Invalid key material: {0}")]
	InvalidKey(String),
	#[error("Invalid signature encoding: {0}")]
	InvalidSignature(String),
	#[error("Signing error: {0}")]
	Signing(String),
}

fn parse_signing_key(private_key_hex: &str) -> Result<SigningKey, SigningError> {
	let bytes = hex::decode(normalize_hex(private_key_hex))
		.map_err(|e| SigningError::InvalidKey(format!("Private key is not hex: {}", e)))?;
	SigningKey::from_slice(&bytes)
		.map_err(|e| SigningError::InvalidKey(format!("Private key is not a valid scalar: {}", e)))
}

/// Derive the public key for a hex-encoded private scalar.
///
/// Returns the uncompressed SEC1 point (`04`-prefixed, 130 hex chars).
/// Fails with [`SigningError::InvalidKey`] if the scalar is out of range.
pub fn derive_public_key(private_key_hex: &str) -> Result<String, SigningError> {
	let signing_key = parse_signing_key(private_key_hex)?;
	let point = signing_key.verifying_key().to_encoded_point(false);
	Ok(hex::encode(point.as_bytes()))
}

/// Sign a message with a hex-encoded private key.
///
/// The message is hashed with SHA-256 and the 32-byte digest is signed
/// deterministically (RFC 6979). Returns the DER signature as lowercase
/// hex.
pub fn sign_message(message: &str, private_key_hex: &str) -> Result<String, SigningError> {
	let signing_key = parse_signing_key(private_key_hex)?;
	let digest = Sha256::digest(message.as_bytes());
	let signature: Signature = signing_key
		.sign_prehash(digest.as_slice())
		.map_err(|e| SigningError::Signing(e.to_string()))?;
	Ok(hex::encode(signature.to_der().as_bytes()))
}

/// Verify a DER signature against a SEC1 public key and a message.
///
/// Accepts compressed or uncompressed public keys. A signature that
/// simply does not match yields `Ok(false)`; only structurally malformed
/// key or signature encodings surface as errors.
pub fn verify_signature(
	public_key_hex: &str,
	message: &str,
	signature_hex: &str,
) -> Result<bool, SigningError> {
	let key_bytes = hex::decode(normalize_hex(public_key_hex))
		.map_err(|e| SigningError::InvalidKey(format!("Public key is not hex: {}", e)))?;
	let verifying_key = VerifyingKey::from_sec1_bytes(&key_bytes)
		.map_err(|e| SigningError::InvalidKey(format!("Public key is not a valid point: {}", e)))?;

	let sig_bytes = hex::decode(normalize_hex(signature_hex))
		.map_err(|e| SigningError::InvalidSignature(format!("Signature is not hex: {}", e)))?;
	let signature = Signature::from_der(&sig_bytes)
		.map_err(|e| SigningError::InvalidSignature(format!("Signature is not valid DER: {}", e)))?;
	// Accept high-S signatures from lenient producers
	let signature = signature.normalize_s().unwrap_or(signature);

	let digest = Sha256::digest(message.as_bytes());
	Ok(verifying_key
		.verify_prehash(digest.as_slice(), &signature)
		.is_ok())
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::rngs::OsRng;

	fn fresh_private_key() -> String {
		hex::encode(SigningKey::random(&mut OsRng).to_bytes())
	}

	#[test]
	fn test_sign_and_verify() {
		let private_key = fresh_private_key();
		let public_key = derive_public_key(&private_key).unwrap();
		let message = "transfer 10 units to wallet 42";

		let signature = sign_message(message, &private_key).unwrap();
		assert!(verify_signature(&public_key, message, &signature).unwrap());
	}

	#[test]
	fn test_verify_rejects_other_key() {
		let private_key = fresh_private_key();
		let other_key = fresh_private_key();
		let public_key = derive_public_key(&private_key).unwrap();
		let message = "transfer 10 units to wallet 42";

		let signature = sign_message(message, &other_key).unwrap();
		assert!(!verify_signature(&public_key, message, &signature).unwrap());
	}

	#[test]
	fn test_verify_rejects_tampered_message() {
		let private_key = fresh_private_key();
		let public_key = derive_public_key(&private_key).unwrap();

		let signature = sign_message("amount=10", &private_key).unwrap();
		assert!(!verify_signature(&public_key, "amount=11", &signature).unwrap());
	}

	#[test]
	fn test_public_key_is_uncompressed_sec1() {
		let private_key = fresh_private_key();
		let public_key = derive_public_key(&private_key).unwrap();
		assert_eq!(public_key.len(), 130);
		assert!(public_key.starts_with("04"));
	}

	#[test]
	fn test_prefixed_private_key_is_normalized() {
		let private_key = fresh_private_key();
		let prefixed = format!("0x{}", private_key);
		assert_eq!(
			derive_public_key(&private_key).unwrap(),
			derive_public_key(&prefixed).unwrap()
		);
	}

	#[test]
	fn test_invalid_scalar_rejected() {
		// Zero is not a valid secp256k1 scalar
		let zero = "00".repeat(32);
		assert!(matches!(
			derive_public_key(&zero),
			Err(SigningError::InvalidKey(_))
		));
		// Wrong length
		assert!(matches!(
			sign_message("m", "abcd"),
			Err(SigningError::InvalidKey(_))
		));
	}

	#[test]
	fn test_malformed_signature_rejected() {
		let private_key = fresh_private_key();
		let public_key = derive_public_key(&private_key).unwrap();

		assert!(matches!(
			verify_signature(&public_key, "m", "not-hex"),
			Err(SigningError::InvalidSignature(_))
		));
		assert!(matches!(
			verify_signature(&public_key, "m", "deadbeef"),
			Err(SigningError::InvalidSignature(_))
		));
	}

	#[test]
	fn test_malformed_public_key_rejected() {
		let private_key = fresh_private_key();
		let signature = sign_message("m", &private_key).unwrap();
		assert!(matches!(
			verify_signature("02ff", "m", &signature),
			Err(SigningError::InvalidKey(_))
		));
	}
}
