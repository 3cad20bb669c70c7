// Copyright 2025 itscheems
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

//! Wire types shared between the client and the ledger gateway.
//!
//! Field names and casing are part of the gateway contract; every field
//! travels as a string.

use serde::{Deserialize, Serialize};

/// Protocol version reported in every gateway request
pub const PROTOCOL_VERSION: &str = "1.0.8";

/// Status the gateway reports for a transaction that is not yet final
pub const STATUS_PENDING: &str = "Pending";

/// Gateway result code for a successful request
pub const RESULT_OK: i64 = 200;

/// A fully built ledger transaction, ready for submission.
///
/// The `id` is a content address: the SHA-256 digest of the other fields
/// (see [`crate::transaction::compute_id`]). Once the signature is
/// attached the transaction is immutable; build a new one per submission
/// attempt.
///
/// Construct via [`crate::transaction::TransactionDraft::sign`] for
/// ordinary transactions, or [`crate::transaction::build_registration`]
/// for the one unsigned system variant. Hand-assembling an empty-signature
/// transaction bypasses those guarantees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
	#[serde(rename = "ID")]
	pub id: String,
	#[serde(rename = "From")]
	pub from: String,
	#[serde(rename = "To")]
	pub to: String,
	#[serde(rename = "Timestamp")]
	pub timestamp: String,
	#[serde(rename = "Type")]
	pub tx_type: String,
	#[serde(rename = "Payload")]
	pub payload: String,
	#[serde(rename = "Nonce")]
	pub nonce: String,
	#[serde(rename = "Signature")]
	pub signature: String,
	#[serde(rename = "Blockchain")]
	pub blockchain: String,
	#[serde(rename = "Version")]
	pub version: String,
}

impl Transaction {
	/// Whether a signature has been attached.
	///
	/// Only the wallet-registration system variant is legitimately
	/// unsigned.
	pub fn is_signed(&self) -> bool {
		!self.signature.is_empty()
	}
}

/// Envelope wrapping every gateway reply: `{"Result": code, "Response": any}`
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayResponse {
	#[serde(rename = "Result")]
	pub result: i64,
	#[serde(rename = "Response", default)]
	pub response: serde_json::Value,
}

impl GatewayResponse {
	/// Whether the gateway accepted the request.
	pub fn is_ok(&self) -> bool {
		self.result == RESULT_OK
	}
}

/// A transaction as reported back by the gateway.
///
/// Only `Status` drives client behavior; everything else the gateway
/// returns is carried opaquely so callers can inspect it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
	#[serde(rename = "Status", default)]
	pub status: String,
	#[serde(flatten)]
	pub fields: serde_json::Map<String, serde_json::Value>,
}

impl TransactionRecord {
	/// Whether the transaction has not yet reached a terminal status.
	pub fn is_pending(&self) -> bool {
		self.status == STATUS_PENDING
	}
}

/// Result of a transaction lookup
#[derive(Debug, Clone)]
pub enum LookupOutcome {
	/// The gateway returned a record for the requested ID
	Found(TransactionRecord),
	/// The transaction is not known to the gateway (yet)
	NotFound,
}

/// Block range for transaction searches.
///
/// By gateway convention `end == 0` means "search `start` blocks backward
/// from the chain tip"; otherwise the window is the block range
/// `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchWindow {
	pub start: u64,
	pub end: u64,
}

impl SearchWindow {
	/// Search the explicit block range `[start, end]`.
	pub fn range(start: u64, end: u64) -> Self {
		Self { start, end }
	}

	/// Search the most recent `n` blocks.
	pub fn last(n: u64) -> Self {
		Self { start: n, end: 0 }
	}
}
