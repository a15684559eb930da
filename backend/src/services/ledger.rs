//! Simulated ledger
//!
//! Fabricates receipts that look like a blockchain confirmation. Nothing is
//! written to any chain and the values are NOT cryptographic evidence of
//! anything: the hash is SHA-256 over a random UUID and the event, and the
//! block number and gas figure are carved out of that digest.

use chrono::Utc;
use sha2::{Digest, Sha256};
use shared::LedgerReceipt;
use uuid::Uuid;

use crate::config::LedgerConfig;

/// A traceability event to anchor
#[derive(Debug, Clone, Copy)]
pub enum LedgerEvent<'a> {
    ProcessingStep { batch_id: &'a str, step: &'a str },
    LabResult { batch_id: &'a str, test: &'a str },
}

impl LedgerEvent<'_> {
    fn fingerprint(&self) -> String {
        match self {
            LedgerEvent::ProcessingStep { batch_id, step } => format!("processing:{}:{}", batch_id, step),
            LedgerEvent::LabResult { batch_id, test } => format!("lab:{}:{}", batch_id, test),
        }
    }
}

/// Anchors traceability events; swap the implementation for a real chain client
pub trait Ledger: Send + Sync {
    fn record(&self, event: LedgerEvent<'_>) -> LedgerReceipt;
}

const BLOCK_BASE: u64 = 18_000_000;
const BLOCK_SPREAD: u64 = 1_000_000;
const GAS_BASE: u64 = 21_000;
const GAS_SPREAD: u64 = 79_000;

#[derive(Debug, Clone)]
pub struct SimulatedLedger {
    network: String,
    contract_address: String,
}

impl SimulatedLedger {
    pub fn new(config: &LedgerConfig) -> Self {
        Self {
            network: config.network.clone(),
            contract_address: config.contract_address.clone(),
        }
    }
}

fn carve_u64(bytes: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&bytes[..8]);
    u64::from_be_bytes(buf)
}

impl Ledger for SimulatedLedger {
    fn record(&self, event: LedgerEvent<'_>) -> LedgerReceipt {
        let now = Utc::now();
        let mut hasher = Sha256::new();
        hasher.update(Uuid::new_v4().as_bytes());
        hasher.update(event.fingerprint().as_bytes());
        hasher.update(now.timestamp_nanos_opt().unwrap_or_default().to_be_bytes());
        let digest = hasher.finalize();

        let receipt = LedgerReceipt {
            transaction_hash: format!("0x{:x}", digest),
            block_number: BLOCK_BASE + carve_u64(&digest[0..8]) % BLOCK_SPREAD,
            gas_used: GAS_BASE + carve_u64(&digest[8..16]) % GAS_SPREAD,
            network: self.network.clone(),
            contract_address: self.contract_address.clone(),
            confirmed_at: now,
            simulated: true,
        };

        tracing::info!(
            tx = %receipt.transaction_hash,
            block = receipt.block_number,
            event = %event.fingerprint(),
            "Issued simulated ledger receipt"
        );
        receipt
    }
}
