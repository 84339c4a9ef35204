use crate::models::Employee;
use mongodb::{
    bson::doc, options::ClientOptions, Client as MongoClient, Collection, Database,
};
use service_core::error::AppError;
use std::time::Duration;

pub const EMPLOYEES_COLLECTION: &str = "employees";

/// Long-lived handle to the document store. Cloning shares the driver's pool.
#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
}

impl MongoDb {
    /// Connect and verify the deployment answers a `ping` within `timeout`.
    pub async fn connect(uri: &str, database: &str, timeout: Duration) -> Result<Self, AppError> {
        tracing::info!(database = %database, timeout_secs = timeout.as_secs(), "Connecting to MongoDB");

        let mut options = ClientOptions::parse(uri).await.map_err(|e| {
            tracing::error!("Invalid MongoDB connection string: {}", e);
            AppError::ConfigError(anyhow::Error::new(e))
        })?;
        options.app_name = Some("employee-service".to_string());
        options.connect_timeout = Some(timeout);
        options.server_selection_timeout = Some(timeout);

        let client = MongoClient::with_options(options).map_err(|e| {
            tracing::error!("Failed to create MongoDB client: {}", e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        let mongo = Self { client, db };

        // The driver connects lazily; force a round-trip so startup fails fast.
        mongo.health_check().await?;

        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(mongo)
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
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

    pub fn employees(&self) -> Collection<Employee> {
        self.db.collection(EMPLOYEES_COLLECTION)
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }
}
