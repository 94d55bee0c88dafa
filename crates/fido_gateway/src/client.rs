//! Store client speaking the same wire shape as `server.rs`.

use crate::store::SequenceStore;
use crate::types::{SequenceEnvelope, UploadRequest};
use anyhow::{Context, Result};
use async_trait::async_trait;
use fido_behavior::Sequence;
use reqwest::Client;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpSequenceStore {
    client: Client,
    base_url: String,
}

impl HttpSequenceStore {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(10))
                .build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl SequenceStore for HttpSequenceStore {
    async fn put(&self, sequence: Sequence) -> Result<()> {
        let url = format!("{}/upload_sequence", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&UploadRequest::from(sequence))
            .send()
            .await
            .with_context(|| format!("Failed to reach sequence store at {}", url))?;
        if !response.status().is_success() {
            anyhow::bail!("Sequence store rejected upload: {}", response.status());
        }
        Ok(())
    }

    async fn get(&self) -> Result<Option<Sequence>> {
        let url = format!("{}/get_sequence", self.base_url);
        let envelope: SequenceEnvelope = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to reach sequence store at {}", url))?
            .error_for_status()?
            .json()
            .await
            .context("Invalid JSON from sequence store")?;
        Ok(envelope.into_sequence())
    }

    async fn clear(&self) -> Result<()> {
        let url = format!("{}/clear_sequence", self.base_url);
        self.client
            .delete(&url)
            .send()
            .await
            .with_context(|| format!("Failed to reach sequence store at {}", url))?
            .error_for_status()?;
        Ok(())
    }
}
