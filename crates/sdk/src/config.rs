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

//! Gateway access configuration.
//!
//! The configuration is a plain value handed to each [`crate::Client`];
//! there is no process-global state, so tests and concurrent sessions can
//! each construct an isolated instance.

use serde::{Deserialize, Serialize};

/// Default gateway base URL
pub const DEFAULT_GATEWAY_URL: &str = "https://nag.meridianledger.io/NAG.php?cep=";

/// Default finality poll interval, in seconds
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 15;

/// Default HTTP request timeout, in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

fn default_base_url() -> String {
	DEFAULT_GATEWAY_URL.to_string()
}

/// Ledger gateway endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
	/// Gateway base URL, ending in the `?cep=` query prefix
	#[serde(default = "default_base_url")]
	pub base_url: String,
	/// Application access key, sent when the gateway requires one
	#[serde(default)]
	pub access_key: String,
	/// Specific network node to address, or empty for gateway default
	#[serde(default)]
	pub node: String,
}

impl Default for GatewayConfig {
	fn default() -> Self {
		Self {
			base_url: default_base_url(),
			access_key: String::new(),
			node: String::new(),
		}
	}
}

impl GatewayConfig {
	/// Load configuration from `MERIDIAN_*` environment variables
	pub fn from_env() -> Result<Self, config::ConfigError> {
		let cfg = config::Config::builder()
			.add_source(config::Environment::with_prefix("MERIDIAN"))
			.build()?;

		cfg.try_deserialize()
	}

	/// Address a specific network node
	pub fn with_node(mut self, address: impl Into<String>) -> Self {
		self.node = address.into();
		self
	}

	/// Full URL for a gateway operation.
	///
	/// Scheme: `{base_url}Meridian_{operation}_{node}` where `node` is
	/// `node=<addr>` or empty. The access key, when set, rides along as
	/// an extra query parameter.
	pub(crate) fn endpoint(&self, operation: &str) -> String {
		let node = if self.node.is_empty() {
			String::new()
		} else {
			format!("node={}", self.node)
		};
		let mut url = format!("{}Meridian_{}_{}", self.base_url, operation, node);
		if !self.access_key.is_empty() {
			url.push_str(&format!("&key={}", self.access_key));
		}
		url
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let cfg = GatewayConfig::default();
		assert_eq!(cfg.base_url, DEFAULT_GATEWAY_URL);
		assert!(cfg.access_key.is_empty());
		assert!(cfg.node.is_empty());
	}

	#[test]
	fn test_endpoint_without_node() {
		let cfg = GatewayConfig::default();
		assert_eq!(
			cfg.endpoint("AddTransaction"),
			format!("{DEFAULT_GATEWAY_URL}Meridian_AddTransaction_")
		);
	}

	#[test]
	fn test_endpoint_with_node() {
		let cfg = GatewayConfig::default().with_node("abc123");
		assert_eq!(
			cfg.endpoint("GetTransactionByID"),
			format!("{DEFAULT_GATEWAY_URL}Meridian_GetTransactionByID_node=abc123")
		);
	}

	#[test]
	fn test_endpoint_with_access_key() {
		let cfg = GatewayConfig {
			access_key: "sekrit".to_string(),
			..GatewayConfig::default()
		};
		assert_eq!(
			cfg.endpoint("CheckWallet"),
			format!("{DEFAULT_GATEWAY_URL}Meridian_CheckWallet_&key=sekrit")
		);
	}
}
