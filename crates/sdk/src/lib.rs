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

//! Meridian SDK - Client library for ledger transaction submission
//!
//! This crate builds cryptographically well-formed, deterministically
//! identified transactions, submits them to a remote ledger gateway, and
//! resolves their final on-chain outcome:
//!
//! - [`codec`]: canonical hex/string conversion every wire field obeys
//! - [`signing`]: secp256k1 ECDSA over the system-wide SHA-256 digest
//! - [`transaction`]: transaction assembly and content-address derivation
//! - [`client`]: the gateway transport (submit, lookups, wallet queries)
//! - [`poller`]: bounded polling until a transaction reaches finality
//!
//! The SDK is designed to be lightweight and embeddable:
//! - No background threads
//! - No runtime initialization
//! - No global state; configuration is a value passed to each client

pub mod client;
pub mod codec;
pub mod config;
pub mod poller;
pub mod signing;
pub mod transaction;
pub mod types;

pub use client::{Client, ClientError, SyncClient};
pub use codec::{hex_to_string, normalize_hex, normalize_hex_value, string_to_hex};
pub use config::GatewayConfig;
pub use poller::{OutcomeError, OutcomePoller, TransactionLookup};
pub use signing::{SigningError, derive_public_key, sign_message, verify_signature};
pub use transaction::{TransactionDraft, build_registration, build_timestamp, compute_id};
pub use types::*;
