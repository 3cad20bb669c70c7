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

//! Bounded finality polling.
//!
//! A submitted transaction is eventually either included with a terminal
//! status or never shows up. [`OutcomePoller`] converts that eventually-
//! consistent state into one resolved value per session: the terminal
//! record, a timeout, or a transport failure.
//!
//! Lookups within a session are strictly sequential; the next tick is
//! never issued before the previous lookup resolves and the interval
//! elapses. Sessions share no state, so polling several transaction IDs
//! concurrently is safe. Dropping the returned future cancels the
//! session; no timer or task leaks.

use crate::client::ClientError;
use crate::config::DEFAULT_POLL_INTERVAL_SECS;
use crate::types::{LookupOutcome, SearchWindow, TransactionRecord};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Error types for finality polling
#[derive(Debug, Error)]
pub enum OutcomeError {
	/// The timeout budget was exhausted before the transaction resolved
	#[error("Timeout exceeded after {0:?} waiting for transaction finality")]
	Timeout(Duration),
	/// A lookup failed at the transport level; not retried
	#[error("Lookup failed: {0}")]
	Transport(#[from] ClientError),
}

/// Capability to look a transaction up by ID.
///
/// Implemented by [`crate::Client`] over the gateway's by-ID search;
/// tests substitute scripted stubs.
pub trait TransactionLookup {
	fn lookup(
		&self,
		blockchain: &str,
		tx_id: &str,
		window: SearchWindow,
	) -> impl Future<Output = Result<LookupOutcome, ClientError>> + Send;
}

/// Polls a lookup capability at a fixed interval until a transaction
/// reaches a terminal status.
///
/// The interval is fixed rather than adaptive; the gateway's block
/// production cadence is itself roughly fixed.
#[derive(Debug, Clone, Copy)]
pub struct OutcomePoller {
	interval: Duration,
}

impl Default for OutcomePoller {
	fn default() -> Self {
		Self::new(Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS))
	}
}

impl OutcomePoller {
	/// Create a poller with a custom tick interval
	pub fn new(interval: Duration) -> Self {
		Self { interval }
	}

	/// Poll `lookup` until the transaction resolves or `timeout` elapses.
	///
	/// The first lookup fires immediately. On each tick:
	/// - a record with a terminal (non-pending) status resolves the session;
	/// - not-found or pending schedules the next tick after the interval,
	///   provided the elapsed time has not exceeded the budget;
	/// - a transport error fails the session immediately. Only "pending"
	///   is retried, so connectivity problems are never silently masked.
	pub async fn wait_for_outcome<L: TransactionLookup>(
		&self,
		lookup: &L,
		blockchain: &str,
		tx_id: &str,
		timeout: Duration,
	) -> Result<TransactionRecord, OutcomeError> {
		let started = tokio::time::Instant::now();
		let window = SearchWindow::range(0, 10);
		let mut attempts: u32 = 0;

		loop {
			let elapsed = started.elapsed();
			if elapsed > timeout {
				tracing::debug!(%tx_id, attempts, ?elapsed, "Finality polling timed out");
				return Err(OutcomeError::Timeout(elapsed));
			}

			attempts += 1;
			match lookup.lookup(blockchain, tx_id, window).await? {
				LookupOutcome::Found(record) if !record.is_pending() => {
					tracing::debug!(%tx_id, attempts, status = %record.status, "Transaction resolved");
					return Ok(record);
				}
				LookupOutcome::Found(_) => {
					tracing::debug!(%tx_id, attempts, "Transaction still pending");
				}
				LookupOutcome::NotFound => {
					tracing::debug!(%tx_id, attempts, "Transaction not found yet");
				}
			}

			tokio::time::sleep(self.interval).await;
		}
	}
}
