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

//! End-to-end SDK lifecycle tests (no network).
//!
//! These tests drive the full local path a caller takes: build a draft,
//! sign it, verify the signature independently, then resolve finality
//! against a stubbed gateway lookup.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use meridian_sdk::{
	ClientError, LookupOutcome, OutcomePoller, SearchWindow, TransactionDraft, TransactionLookup,
	TransactionRecord, compute_id, derive_public_key, hex_to_string, string_to_hex,
	verify_signature,
};

const BLOCKCHAIN: &str = "8bb";

fn fresh_private_key() -> String {
	use k256::ecdsa::SigningKey;
	use rand::rngs::OsRng;
	hex::encode(SigningKey::random(&mut OsRng).to_bytes())
}

/// Gateway stub that replays scripted lookup outcomes
struct StubGateway {
	script: Mutex<VecDeque<LookupOutcome>>,
}

impl StubGateway {
	fn new(script: Vec<LookupOutcome>) -> Self {
		Self {
			script: Mutex::new(script.into()),
		}
	}
}

impl TransactionLookup for StubGateway {
	fn lookup(
		&self,
		_blockchain: &str,
		_tx_id: &str,
		_window: SearchWindow,
	) -> impl Future<Output = Result<LookupOutcome, ClientError>> + Send {
		let next = self
			.script
			.lock()
			.unwrap()
			.pop_front()
			.expect("unexpected lookup");
		async move { Ok(next) }
	}
}

fn confirmed_record(tx_id: &str) -> TransactionRecord {
	let value = serde_json::json!({
		"Status": "Confirmed",
		"ID": tx_id,
	});
	serde_json::from_value(value).unwrap()
}

fn pending_record() -> TransactionRecord {
	serde_json::from_value(serde_json::json!({"Status": "Pending"})).unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_sign_submit_poll_lifecycle() {
	let private_key = fresh_private_key();
	let public_key = derive_public_key(&private_key).unwrap();

	// Build and sign
	let draft = TransactionDraft::new(
		BLOCKCHAIN,
		"aa11",
		"bb22",
		"C_TYPE_COIN",
		"{\"Amount\":\"10\"}",
		4,
	);
	let tx = draft.sign(&private_key).unwrap();
	assert!(tx.is_signed());

	// Anyone holding the public key can verify the signature over the ID
	assert!(verify_signature(&public_key, &tx.id, &tx.signature).unwrap());

	// The ID is recomputable from the wire fields
	assert_eq!(
		tx.id,
		compute_id(&tx.blockchain, &tx.from, &tx.to, &tx.payload, &tx.nonce, &tx.timestamp)
	);

	// The payload round-trips through the codec
	assert_eq!(hex_to_string(&tx.payload), "{\"Amount\":\"10\"}");
	assert_eq!(tx.payload, string_to_hex("{\"Amount\":\"10\"}"));

	// Resolve finality against a gateway that answers pending, then confirmed
	let gateway = StubGateway::new(vec![
		LookupOutcome::NotFound,
		LookupOutcome::Found(pending_record()),
		LookupOutcome::Found(confirmed_record(&tx.id)),
	]);
	let poller = OutcomePoller::new(Duration::from_secs(15));
	let outcome = poller
		.wait_for_outcome(&gateway, BLOCKCHAIN, &tx.id, Duration::from_secs(120))
		.await
		.unwrap();

	assert_eq!(outcome.status, "Confirmed");
	assert_eq!(outcome.fields.get("ID").and_then(|v| v.as_str()), Some(tx.id.as_str()));
}

#[tokio::test(start_paused = true)]
async fn test_registration_then_timeout() {
	let private_key = fresh_private_key();
	let public_key = derive_public_key(&private_key).unwrap();

	let tx = meridian_sdk::build_registration(BLOCKCHAIN, &public_key);
	assert!(!tx.is_signed());
	assert_eq!(tx.from, tx.to);

	// A gateway that never confirms: the session ends in a typed timeout
	let gateway = StubGateway::new(vec![
		LookupOutcome::Found(pending_record()),
		LookupOutcome::Found(pending_record()),
		LookupOutcome::Found(pending_record()),
	]);
	let poller = OutcomePoller::new(Duration::from_secs(15));
	let result = poller
		.wait_for_outcome(&gateway, BLOCKCHAIN, &tx.id, Duration::from_secs(40))
		.await;

	assert!(matches!(
		result,
		Err(meridian_sdk::OutcomeError::Timeout(_))
	));
}
