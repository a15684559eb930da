//! Simulated ledger receipt
//!
//! NOT a real blockchain write. Every field is fabricated for UI
//! demonstration and carries no cryptographic meaning.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Confirmation shown to the user after a traceability event is "anchored"
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LedgerReceipt {
    /// `0x` followed by 64 hex characters
    pub transaction_hash: String,
    pub block_number: u64,
    pub gas_used: u64,
    pub network: String,
    pub contract_address: String,
    pub confirmed_at: DateTime<Utc>,
    /// Always true; lets consumers tell fabricated receipts apart
    pub simulated: bool,
}

impl LedgerReceipt {
    /// Hex digits of the transaction hash without the `0x` prefix
    pub fn hash_digits(&self) -> &str {
        self.transaction_hash
            .strip_prefix("0x")
            .unwrap_or(&self.transaction_hash)
    }
}
