#![allow(dead_code)]

use data_service::config::{DataConfig, StoreBackend};
use data_service::services::MongoDb;
use data_service::startup::Application;
use service_core::config::Config as CoreConfig;
use std::sync::Arc;
use uuid::Uuid;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub mongo: Option<(MongoDb, String)>,
}

fn test_config(backend: StoreBackend) -> DataConfig {
    let common = CoreConfig {
        host: "127.0.0.1".to_string(),
        port: 0, // Random port for testing
    };
    let mut config =
        DataConfig::from_lookup(common, |key| std::env::var(key).ok()).expect("Failed to load configuration");
    config.store.backend = backend;
    config
}

impl TestApp {
    /// Spawns the service on a random port backed by the in-memory store.
    pub async fn spawn() -> Self {
        let config = test_config(StoreBackend::Memory);
        let app = Application::build(config)
            .await
            .expect("Failed to build test application");
        Self::start(app, None).await
    }

    /// Spawns the service against a real MongoDB with a unique database.
    pub async fn spawn_with_mongodb() -> Self {
        let mut config = test_config(StoreBackend::MongoDb);
        let db_name = format!("data_test_{}", Uuid::new_v4().simple());
        config.mongodb.database = db_name.clone();

        let db = MongoDb::connect(
            &config.mongodb.uri,
            &config.mongodb.database,
            &config.mongodb.collection,
        )
        .await
        .expect("Failed to create MongoDB client");

        let app = Application::build_with_store(config, Arc::new(db.clone()))
            .await
            .expect("Failed to build test application");
        Self::start(app, Some((db, db_name))).await
    }

    async fn start(app: Application, mongo: Option<(MongoDb, String)>) -> Self {
        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling the welcome page
        let client = reqwest::Client::new();
        for _ in 0..50 {
            if client.get(&address).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(20)).await;
        }

        TestApp {
            address,
            port,
            mongo,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Drops the per-test MongoDB database, if any.
    pub async fn cleanup(&self) {
        if let Some((db, db_name)) = &self.mongo {
            let _ = db.client().database(db_name).drop(None).await;
        }
    }
}
