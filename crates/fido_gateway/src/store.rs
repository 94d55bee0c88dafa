//! The sequence store contract: a caller-supplied instance with put/get,
//! not a module-wide singleton. Semantics are last-write-wins, readable
//! immediately after write; the engine does not depend on anything stronger.

use async_trait::async_trait;
use fido_behavior::Sequence;
use tokio::sync::RwLock;

#[async_trait]
pub trait SequenceStore: Send + Sync {
    async fn put(&self, sequence: Sequence) -> anyhow::Result<()>;
    async fn get(&self) -> anyhow::Result<Option<Sequence>>;
    async fn clear(&self) -> anyhow::Result<()>;
}

/// In-process store holding only the latest sequence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    latest: RwLock<Option<Sequence>>,
}

#[async_trait]
impl SequenceStore for MemoryStore {
    async fn put(&self, sequence: Sequence) -> anyhow::Result<()> {
        tracing::debug!("storing sequence with {} steps", sequence.len());
        *self.latest.write().await = Some(sequence);
        Ok(())
    }

    async fn get(&self) -> anyhow::Result<Option<Sequence>> {
        Ok(self.latest.read().await.clone())
    }

    async fn clear(&self) -> anyhow::Result<()> {
        *self.latest.write().await = None;
        Ok(())
    }
}
