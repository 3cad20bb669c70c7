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

use crate::codec::normalize_hex;
use crate::config::{DEFAULT_HTTP_TIMEOUT_SECS, GatewayConfig};
use crate::poller::{OutcomeError, OutcomePoller, TransactionLookup};
use crate::transaction::{TYPE_REGISTER_WALLET, build_registration};
use crate::types::{
	GatewayResponse, LookupOutcome, PROTOCOL_VERSION, SearchWindow, Transaction, TransactionRecord,
};
use reqwest::Client as ReqwestClient;
use serde_json::{Value, json};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Error types for client operations
#[derive(Debug, Error)]
pub enum ClientError {
	#[error("Network error: {0}")]
	Network(String),
	#[error("Serialization error: {0}")]
	Serialization(String),
	#[error("Server error: {0}")]
	Server(String),
	#[error("Invalid response: {0}")]
	InvalidResponse(String),
	#[error("Refusing to submit an unsigned {0} transaction")]
	UnsignedTransaction(String),
}

/// Client for interacting with the ledger gateway
///
/// This is an async client interface using reqwest for HTTP communication.
/// Every gateway operation is a JSON POST; replies arrive wrapped in the
/// `{"Result", "Response"}` envelope.
pub struct Client {
	config: GatewayConfig,
	client: ReqwestClient,
}

impl Client {
	/// Create a new client with the default gateway configuration
	pub fn new() -> Self {
		Self::with_config(
			GatewayConfig::default(),
			Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
		)
	}

	/// Create a new client with custom configuration
	pub fn with_config(config: GatewayConfig, timeout: Duration) -> Self {
		let client = ReqwestClient::builder()
			.timeout(timeout)
			.build()
			.expect("Failed to create HTTP client");

		Self { config, client }
	}

	/// The configuration this client was built with
	pub fn config(&self) -> &GatewayConfig {
		&self.config
	}

	/// POST a request body to a gateway operation and decode the envelope
	async fn post(&self, operation: &str, body: &Value) -> Result<GatewayResponse, ClientError> {
		let url = self.config.endpoint(operation);

		let response = self
			.client
			.post(&url)
			.json(body)
			.send()
			.await
			.map_err(|e| ClientError::Network(format!("Request failed: {}", e)))?;

		if !response.status().is_success() {
			let status = response.status();
			let error_text = response
				.text()
				.await
				.unwrap_or_else(|_| format!("HTTP {}", status));
			return Err(ClientError::Server(format!("{}: {}", status, error_text)));
		}

		let envelope: GatewayResponse = response
			.json()
			.await
			.map_err(|e| ClientError::Serialization(format!("Failed to parse response: {}", e)))?;

		Ok(envelope)
	}

	/// Submit a fully-built transaction to the gateway.
	///
	/// Unsigned transactions are rejected locally unless they are the
	/// wallet-registration system variant, which is the one transaction
	/// class that legitimately travels without a signature.
	pub async fn submit(&self, transaction: &Transaction) -> Result<GatewayResponse, ClientError> {
		if !transaction.is_signed() && transaction.tx_type != TYPE_REGISTER_WALLET {
			return Err(ClientError::UnsignedTransaction(transaction.tx_type.clone()));
		}

		tracing::debug!(
			id = %transaction.id,
			blockchain = %transaction.blockchain,
			tx_type = %transaction.tx_type,
			"Submitting transaction"
		);

		let body = serde_json::to_value(transaction)
			.map_err(|e| ClientError::Serialization(e.to_string()))?;
		self.post("AddTransaction", &body).await
	}

	/// Build and submit the wallet-registration transaction for a public key
	pub async fn register_wallet(
		&self,
		blockchain: &str,
		public_key: &str,
	) -> Result<GatewayResponse, ClientError> {
		let transaction = build_registration(blockchain, public_key);
		self.submit(&transaction).await
	}

	/// Search a transaction by ID, first among pending transactions and
	/// then in the given block window
	pub async fn get_transaction_by_id(
		&self,
		blockchain: &str,
		tx_id: &str,
		window: SearchWindow,
	) -> Result<LookupOutcome, ClientError> {
		let body = json!({
			"Blockchain": normalize_hex(blockchain),
			"ID": normalize_hex(tx_id),
			"Start": window.start.to_string(),
			"End": window.end.to_string(),
			"Version": PROTOCOL_VERSION,
		});
		let envelope = self.post("GetTransactionByID", &body).await?;

		// A non-200 result code or a bare string response both mean the
		// gateway does not know the transaction yet.
		if !envelope.is_ok() || envelope.response.is_string() {
			return Ok(LookupOutcome::NotFound);
		}
		let record: TransactionRecord = serde_json::from_value(envelope.response)
			.map_err(|e| ClientError::InvalidResponse(format!("Malformed record: {}", e)))?;
		Ok(LookupOutcome::Found(record))
	}

	/// Search a transaction by ID among pending transactions only
	pub async fn get_pending_transaction(
		&self,
		blockchain: &str,
		tx_id: &str,
	) -> Result<GatewayResponse, ClientError> {
		let body = json!({
			"Blockchain": normalize_hex(blockchain),
			"ID": normalize_hex(tx_id),
			"Version": PROTOCOL_VERSION,
		});
		self.post("GetPendingTransaction", &body).await
	}

	/// Check whether a wallet is registered on a blockchain
	pub async fn check_wallet(
		&self,
		blockchain: &str,
		address: &str,
	) -> Result<GatewayResponse, ClientError> {
		let body = json!({
			"Blockchain": normalize_hex(blockchain),
			"Address": normalize_hex(address),
			"Version": PROTOCOL_VERSION,
		});
		self.post("CheckWallet", &body).await
	}

	/// Fetch the next nonce for a wallet
	pub async fn get_wallet_nonce(
		&self,
		blockchain: &str,
		address: &str,
	) -> Result<GatewayResponse, ClientError> {
		let body = json!({
			"Blockchain": normalize_hex(blockchain),
			"Address": normalize_hex(address),
			"Version": PROTOCOL_VERSION,
		});
		self.post("GetWalletNonce", &body).await
	}

	/// Fetch the current block count of a blockchain
	pub async fn get_block_count(&self, blockchain: &str) -> Result<GatewayResponse, ClientError> {
		let body = json!({
			"Blockchain": normalize_hex(blockchain),
			"Version": PROTOCOL_VERSION,
		});
		self.post("GetBlockCount", &body).await
	}

	/// Poll the gateway until a submitted transaction reaches a terminal
	/// status or `timeout` elapses.
	///
	/// Uses the default 15-second interval; construct an
	/// [`OutcomePoller`] directly to customize it.
	pub async fn transaction_outcome(
		&self,
		blockchain: &str,
		tx_id: &str,
		timeout: Duration,
	) -> Result<TransactionRecord, OutcomeError> {
		OutcomePoller::default()
			.wait_for_outcome(self, blockchain, tx_id, timeout)
			.await
	}
}

impl Default for Client {
	fn default() -> Self {
		Self::new()
	}
}

impl TransactionLookup for Client {
	fn lookup(
		&self,
		blockchain: &str,
		tx_id: &str,
		window: SearchWindow,
	) -> impl Future<Output = Result<LookupOutcome, ClientError>> + Send {
		self.get_transaction_by_id(blockchain, tx_id, window)
	}
}

/// Synchronous client wrapper (for compatibility)
///
/// This wraps the async client and runs it in a tokio runtime.
/// For new code, prefer using the async Client directly.
pub struct SyncClient {
	client: Client,
	runtime: tokio::runtime::Runtime,
}

impl SyncClient {
	/// Create a new synchronous client
	pub fn new(config: GatewayConfig) -> anyhow::Result<Self> {
		let runtime = tokio::runtime::Runtime::new()
			.map_err(|e| anyhow::anyhow!("Failed to create tokio runtime: {}", e))?;
		Ok(Self {
			client: Client::with_config(config, Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS)),
			runtime,
		})
	}

	/// Submit a transaction (synchronous)
	pub fn submit(&self, transaction: &Transaction) -> Result<GatewayResponse, ClientError> {
		self.runtime.block_on(self.client.submit(transaction))
	}

	/// Search a transaction by ID (synchronous)
	pub fn get_transaction_by_id(
		&self,
		blockchain: &str,
		tx_id: &str,
		window: SearchWindow,
	) -> Result<LookupOutcome, ClientError> {
		self.runtime
			.block_on(self.client.get_transaction_by_id(blockchain, tx_id, window))
	}

	/// Wait for a transaction's terminal status (synchronous)
	pub fn transaction_outcome(
		&self,
		blockchain: &str,
		tx_id: &str,
		timeout: Duration,
	) -> Result<TransactionRecord, OutcomeError> {
		self.runtime
			.block_on(self.client.transaction_outcome(blockchain, tx_id, timeout))
	}
}
