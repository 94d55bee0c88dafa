//! HTTP face of the sequence store.
//!
//! - `POST /upload_sequence` — replace the latest sequence
//! - `GET /get_sequence` — read it (null when none stored yet)
//! - `DELETE /clear_sequence` — drop it
//! - `GET /health` — liveness check

use crate::store::SequenceStore;
use crate::types::{SequenceEnvelope, UploadRequest};
use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use fido_behavior::Sequence;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub struct StoreServer {
    store: Arc<dyn SequenceStore>,
    host: String,
    port: u16,
}

impl StoreServer {
    pub fn new(store: Arc<dyn SequenceStore>, host: &str, port: u16) -> Self {
        Self {
            store,
            host: host.to_string(),
            port,
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(health))
            .route("/upload_sequence", post(upload_sequence))
            .route("/get_sequence", get(get_sequence))
            .route("/clear_sequence", delete(clear_sequence))
            .layer(CorsLayer::permissive())
            .with_state(self.store.clone())
    }

    /// Bind and serve on a background task; returns the join handle.
    pub fn start(self) -> tokio::task::JoinHandle<()> {
        let addr = format!("{}:{}", self.host, self.port);
        let app = self.router();
        tokio::spawn(async move {
            let listener = match tokio::net::TcpListener::bind(&addr).await {
                Ok(l) => l,
                Err(e) => {
                    tracing::error!("Store server failed to bind {}: {}", addr, e);
                    return;
                }
            };
            tracing::info!("Sequence store listening on {}", addr);
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("Store server error: {}", e);
            }
        })
    }
}

// ============================================================================
// Route handlers
// ============================================================================

async fn health() -> &'static str {
    "ok"
}

async fn upload_sequence(
    State(store): State<Arc<dyn SequenceStore>>,
    Json(req): Json<UploadRequest>,
) -> Result<Json<Value>, StatusCode> {
    let sequence = Sequence {
        steps: req.sequence,
    };
    store
        .put(sequence)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(json!({"status": "ok"})))
}

async fn get_sequence(
    State(store): State<Arc<dyn SequenceStore>>,
) -> Result<Json<SequenceEnvelope>, StatusCode> {
    let latest = store
        .get()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(SequenceEnvelope {
        sequence: latest.map(|s| s.steps),
    }))
}

async fn clear_sequence(
    State(store): State<Arc<dyn SequenceStore>>,
) -> Result<Json<Value>, StatusCode> {
    store
        .clear()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(json!({"status": "ok"})))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use fido_behavior::SequenceStep;
    use std::collections::BTreeMap;

    fn store_with_sequence() -> Arc<MemoryStore> {
        Arc::new(MemoryStore::default())
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        assert_eq!(health().await, "ok");
    }

    #[tokio::test]
    async fn test_upload_then_get_roundtrip() {
        let store = store_with_sequence();
        let step = SequenceStep {
            action: "Sit".to_string(),
            emotions: BTreeMap::from([("Happy".to_string(), 1.0)]),
        };
        let state: Arc<dyn SequenceStore> = store.clone();

        upload_sequence(
            State(state.clone()),
            Json(UploadRequest {
                sequence: vec![step.clone()],
            }),
        )
        .await
        .unwrap();

        let Json(envelope) = get_sequence(State(state)).await.unwrap();
        assert_eq!(envelope.sequence.unwrap(), vec![step]);
    }

    #[tokio::test]
    async fn test_get_before_upload_is_null() {
        let state: Arc<dyn SequenceStore> = store_with_sequence();
        let Json(envelope) = get_sequence(State(state)).await.unwrap();
        assert!(envelope.sequence.is_none());
    }

    #[tokio::test]
    async fn test_clear_endpoint() {
        let state: Arc<dyn SequenceStore> = store_with_sequence();
        upload_sequence(
            State(state.clone()),
            Json(UploadRequest {
                sequence: vec![SequenceStep {
                    action: "Jump".to_string(),
                    emotions: BTreeMap::new(),
                }],
            }),
        )
        .await
        .unwrap();
        clear_sequence(State(state.clone())).await.unwrap();
        let Json(envelope) = get_sequence(State(state)).await.unwrap();
        assert!(envelope.sequence.is_none());
    }
}
