use crate::models::{Document, IDENTITY_FIELD};
use async_trait::async_trait;
use serde_json::Value;
use service_core::error::AppError;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A single collection of schemaless documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Persists `document`; the store assigns its identity.
    async fn insert(&self, document: Document) -> Result<(), AppError>;

    /// Every stored document, identity field excluded.
    async fn find_all(&self) -> Result<Vec<Document>, AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}

/// Process-local store for development runs and tests.
#[derive(Default)]
pub struct InMemoryStore {
    documents: RwLock<Vec<Document>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn insert(&self, document: Document) -> Result<(), AppError> {
        let mut fields = document.into_inner();
        fields
            .entry(IDENTITY_FIELD)
            .or_insert_with(|| Value::String(Uuid::new_v4().to_string()));
        self.documents.write().await.push(Document::new(fields));
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Document>, AppError> {
        let documents = self.documents.read().await;
        Ok(documents
            .iter()
            .cloned()
            .map(Document::without_identity)
            .collect())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}
