//! Simulated file uploads: hashed and acknowledged, never stored

use chrono::Utc;
use sha2::{Digest, Sha256};
use shared::UploadReceipt;

use crate::config::LatencyConfig;
use crate::error::{AppError, AppResult};
use crate::services::simulate_latency;

/// Largest accepted upload
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone)]
pub struct UploadService {
    latency: LatencyConfig,
}

impl UploadService {
    pub fn new(latency: LatencyConfig) -> Self {
        Self { latency }
    }

    pub async fn upload_file(&self, file_name: &str, content: &[u8]) -> AppResult<UploadReceipt> {
        simulate_latency(self.latency.write()).await;

        if file_name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "fileName".to_string(),
                message: "File name is required".to_string(),
            });
        }
        if content.is_empty() {
            return Err(AppError::Validation {
                field: "content".to_string(),
                message: "File is empty".to_string(),
            });
        }
        if content.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::Validation {
                field: "content".to_string(),
                message: format!("File exceeds the {} MiB limit", MAX_UPLOAD_BYTES / (1024 * 1024)),
            });
        }

        let content_hash = format!("{:x}", Sha256::digest(content));
        tracing::info!(file = %file_name, size = content.len(), hash = %content_hash, "Accepted upload");

        Ok(UploadReceipt {
            file_name: file_name.to_string(),
            size_bytes: content.len(),
            url: format!("ipfs://simulated/{}", content_hash),
            content_hash,
            uploaded_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> UploadService {
        UploadService::new(LatencyConfig::none())
    }

    #[tokio::test]
    async fn test_upload_hashes_content() {
        let receipt = service().upload_file("coa.pdf", b"abc").await.unwrap();
        assert_eq!(
            receipt.content_hash,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(receipt.size_bytes, 3);
        assert!(receipt.url.ends_with(&receipt.content_hash));
    }

    #[tokio::test]
    async fn test_upload_rejects_empty_and_oversized() {
        assert!(matches!(
            service().upload_file("a.txt", b"").await,
            Err(AppError::Validation { .. })
        ));
        let big = vec![0u8; MAX_UPLOAD_BYTES + 1];
        assert!(service().upload_file("big.bin", &big).await.is_err());
    }
}
