use crate::models::Document;
use crate::services::store::DocumentStore;
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::{
    bson::{self, doc, Bson, Document as BsonDocument},
    options::FindOptions,
    Client as MongoClient, Collection, Database,
};
use service_core::error::AppError;

#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
    collection: String,
}

impl MongoDb {
    /// Creates the client. The driver connects lazily, so an unreachable
    /// server surfaces on the first operation rather than here.
    pub async fn connect(uri: &str, database: &str, collection: &str) -> Result<Self, AppError> {
        tracing::info!(uri = %uri, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB at {}: {}", uri, e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(
            database = %database,
            collection = %collection,
            "MongoDB client ready"
        );
        Ok(Self {
            client,
            db,
            collection: collection.to_string(),
        })
    }

    pub fn documents(&self) -> Collection<BsonDocument> {
        self.db.collection(&self.collection)
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }
}

#[async_trait]
impl DocumentStore for MongoDb {
    async fn insert(&self, document: Document) -> Result<(), AppError> {
        let record = bson::to_document(document.fields()).map_err(|e| {
            AppError::BadRequest(anyhow::anyhow!(
                "Document cannot be stored as BSON: {}",
                e
            ))
        })?;

        let result = self.documents().insert_one(record, None).await.map_err(|e| {
            tracing::error!(collection = %self.collection, "Failed to insert document: {}", e);
            AppError::from(e)
        })?;
        tracing::debug!(id = %result.inserted_id, "Inserted document");
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Document>, AppError> {
        let find_options = FindOptions::builder()
            .projection(doc! { "_id": 0 })
            .build();

        let mut cursor = self
            .documents()
            .find(doc! {}, find_options)
            .await
            .map_err(|e| {
                tracing::error!(collection = %self.collection, "Failed to query documents: {}", e);
                AppError::from(e)
            })?;

        let mut documents = Vec::new();
        while let Some(record) = cursor.try_next().await.map_err(AppError::from)? {
            documents.push(from_bson(record)?);
        }

        Ok(documents)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }
}

/// Relaxed extended JSON keeps plain numbers, strings and booleans as-is.
fn from_bson(record: BsonDocument) -> Result<Document, AppError> {
    let value = Bson::Document(record).into_relaxed_extjson();
    Document::try_from(value)
        .map(Document::without_identity)
        .map_err(|e| AppError::InternalError(anyhow::anyhow!("Stored record is malformed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn records_convert_to_plain_json() {
        let record = doc! {
            "_id": bson::oid::ObjectId::new(),
            "name": "widget",
            "count": 3_i32,
            "price": 9.5,
            "active": true,
            "nested": { "tags": ["a", "b"] },
        };

        let document = from_bson(record).unwrap();
        assert_eq!(
            serde_json::Value::from(document),
            json!({
                "name": "widget",
                "count": 3,
                "price": 9.5,
                "active": true,
                "nested": { "tags": ["a", "b"] },
            })
        );
    }

    #[test]
    fn json_documents_convert_to_bson() {
        let document = Document::try_from(json!({"a": 1, "b": [true, null]})).unwrap();
        let record = bson::to_document(document.fields()).unwrap();
        assert!(matches!(
            record.get("a"),
            Some(Bson::Int32(1)) | Some(Bson::Int64(1))
        ));
        assert!(record.get_array("b").is_ok());
    }

    #[tokio::test]
    async fn integers_beyond_i64_are_client_errors() {
        // The driver connects lazily and BSON conversion fails first, so no server is needed.
        let db = MongoDb::connect("mongodb://127.0.0.1:1/", "data_test", "data")
            .await
            .unwrap();
        let document = Document::try_from(json!({ "n": u64::MAX })).unwrap();

        let err = db.insert(document).await.unwrap_err();

        assert!(err.is_client_error());
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
