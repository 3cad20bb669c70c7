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

//! Transaction assembly and deterministic ID derivation.
//!
//! A transaction's ID is the SHA-256 digest of its canonicalized fields,
//! so identical content always produces the identical ID. The timestamp
//! is part of the digest input; two otherwise-identical transactions
//! submitted in different seconds get different IDs.
//!
//! Ordinary transactions start life as a [`TransactionDraft`] and become
//! a wire [`Transaction`] only through [`TransactionDraft::sign`]. The
//! wallet-registration system transaction built by [`build_registration`]
//! is the single unsigned variant.

use crate::codec::{normalize_hex, string_to_hex};
use crate::signing::{SigningError, sign_message};
use crate::types::{PROTOCOL_VERSION, Transaction};
use chrono::Utc;
use sha2::{Digest, Sha256};

/// Transaction type for the wallet-registration system transaction
pub const TYPE_REGISTER_WALLET: &str = "C_TYPE_REGISTERWALLET";

/// Payload action carried by the registration envelope
const ACTION_REGISTER_WALLET: &str = "CP_REGISTERWALLET";

/// Compute the deterministic content address of a transaction.
///
/// Hex-bearing fields are normalized, then
/// `blockchain || from || to || payload || nonce || timestamp` is hashed
/// with SHA-256 (the system-wide canonical digest). Field order is fixed
/// and significant.
pub fn compute_id(
	blockchain: &str,
	from: &str,
	to: &str,
	payload: &str,
	nonce: &str,
	timestamp: &str,
) -> String {
	let preimage = format!(
		"{}{}{}{}{}{}",
		normalize_hex(blockchain),
		normalize_hex(from),
		normalize_hex(to),
		normalize_hex(payload),
		nonce,
		timestamp
	);
	hex::encode(Sha256::digest(preimage.as_bytes()))
}

/// Current UTC instant as `YYYY:MM:DD-hh:mm:ss`, zero-padded.
///
/// This format is wire-visible and must be bit-exact.
pub fn build_timestamp() -> String {
	Utc::now().format("%Y:%m:%d-%H:%M:%S").to_string()
}

/// An unsigned transaction skeleton.
///
/// The ID is computed at construction time and the draft is immutable;
/// [`sign`](Self::sign) consumes it and yields the wire transaction.
#[derive(Debug, Clone)]
pub struct TransactionDraft {
	blockchain: String,
	from: String,
	to: String,
	tx_type: String,
	payload: String,
	nonce: String,
	timestamp: String,
	id: String,
}

impl TransactionDraft {
	/// Assemble an unsigned transaction.
	///
	/// `payload` is the plain (JSON/UTF-8) payload; it is hex-encoded
	/// here. `nonce` is caller-supplied, typically the wallet's next
	/// sequence number, and is not validated. The timestamp is captured
	/// now.
	pub fn new(
		blockchain: &str,
		from: &str,
		to: &str,
		tx_type: &str,
		payload: &str,
		nonce: u64,
	) -> Self {
		let blockchain = normalize_hex(blockchain).to_string();
		let from = normalize_hex(from).to_string();
		let to = normalize_hex(to).to_string();
		let payload = string_to_hex(payload);
		let nonce = nonce.to_string();
		let timestamp = build_timestamp();
		let id = compute_id(&blockchain, &from, &to, &payload, &nonce, &timestamp);
		Self {
			blockchain,
			from,
			to,
			tx_type: tx_type.to_string(),
			payload,
			nonce,
			timestamp,
			id,
		}
	}

	/// The transaction's content address, usable as the finality lookup key.
	pub fn id(&self) -> &str {
		&self.id
	}

	/// The captured wire timestamp.
	pub fn timestamp(&self) -> &str {
		&self.timestamp
	}

	/// Sign the draft and produce the wire transaction.
	///
	/// The signature covers the transaction ID, which in turn commits to
	/// every content field.
	pub fn sign(self, private_key_hex: &str) -> Result<Transaction, SigningError> {
		let signature = sign_message(&self.id, private_key_hex)?;
		Ok(Transaction {
			id: self.id,
			from: self.from,
			to: self.to,
			timestamp: self.timestamp,
			tx_type: self.tx_type,
			payload: self.payload,
			nonce: self.nonce,
			signature,
			blockchain: self.blockchain,
			version: PROTOCOL_VERSION.to_string(),
		})
	}
}

/// Build the wallet-registration system transaction.
///
/// `From` and `To` are both the SHA-256 digest of the public key, the
/// nonce is the literal `0`, and the payload is the hex encoding of the
/// exact envelope `{"Action":"CP_REGISTERWALLET","PublicKey":...}`. This
/// is the only transaction that is legitimately submitted with an empty
/// signature.
pub fn build_registration(blockchain: &str, public_key: &str) -> Transaction {
	let blockchain = normalize_hex(blockchain);
	let public_key = normalize_hex(public_key);
	let address = hex::encode(Sha256::digest(public_key.as_bytes()));

	let envelope = serde_json::json!({
		"Action": ACTION_REGISTER_WALLET,
		"PublicKey": public_key,
	});
	let payload = string_to_hex(&envelope.to_string());
	let timestamp = build_timestamp();
	let id = compute_id(blockchain, &address, &address, &payload, "0", &timestamp);

	Transaction {
		id,
		from: address.clone(),
		to: address,
		timestamp,
		tx_type: TYPE_REGISTER_WALLET.to_string(),
		payload,
		nonce: "0".to_string(),
		signature: String::new(),
		blockchain: blockchain.to_string(),
		version: PROTOCOL_VERSION.to_string(),
	}
}
