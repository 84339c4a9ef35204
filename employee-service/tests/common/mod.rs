#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use employee_service::config::EmployeeConfig;
use employee_service::models::{Employee, EmployeeFields};
use employee_service::services::{EmployeeStore, InMemoryEmployeeStore, MongoDb};
use employee_service::startup::{build_router, AppState, Application};
use mongodb::bson::oid::ObjectId;
use serde_json::Value;
use service_core::error::AppError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

/// Router over a fresh in-memory store, plus the store for direct inspection.
pub fn in_memory_app() -> (Router, Arc<InMemoryEmployeeStore>) {
    let store = Arc::new(InMemoryEmployeeStore::new());
    let router = build_router(AppState::new(store.clone()));
    (router, store)
}

pub fn failing_app() -> (Router, Arc<FailingEmployeeStore>) {
    let store = Arc::new(FailingEmployeeStore::default());
    let router = build_router(AppState::new(store.clone()));
    (router, store)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is not JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("response body is not UTF-8")
    }
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(raw) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(raw.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .expect("router failed to respond");

    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body")
        .to_vec();

    TestResponse { status, body }
}

pub fn ada() -> EmployeeFields {
    EmployeeFields {
        name: "Ada".to_string(),
        age: 30.0,
        salary: 1000.0,
    }
}

/// Store whose every operation fails like a dropped connection.
#[derive(Default)]
pub struct FailingEmployeeStore {
    calls: AtomicUsize,
}

impl FailingEmployeeStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail<T>(&self, op: &str) -> Result<T, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(AppError::DatabaseError(anyhow::anyhow!(
            "{} failed: connection reset by peer",
            op
        )))
    }
}

#[async_trait]
impl EmployeeStore for FailingEmployeeStore {
    async fn list(&self) -> Result<Vec<Employee>, AppError> {
        self.fail("find")
    }

    async fn insert(&self, _employee: &Employee) -> Result<ObjectId, AppError> {
        self.fail("insert")
    }

    async fn find_by_id(&self, _id: ObjectId) -> Result<Option<Employee>, AppError> {
        self.fail("findOne")
    }

    async fn update_fields(
        &self,
        _id: ObjectId,
        _fields: &EmployeeFields,
    ) -> Result<Option<Employee>, AppError> {
        self.fail("findAndModify")
    }

    async fn delete(&self, _id: ObjectId) -> Result<u64, AppError> {
        self.fail("delete")
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.fail("ping")
    }
}

/// How [`RereadFailingStore`] answers the lookup that follows an insert.
#[derive(Clone, Copy)]
pub enum Reread {
    Missing,
    Broken,
}

/// Accepts inserts, then cannot return the inserted record.
pub struct RereadFailingStore {
    inner: InMemoryEmployeeStore,
    reread: Reread,
}

impl RereadFailingStore {
    pub fn new(reread: Reread) -> Self {
        Self {
            inner: InMemoryEmployeeStore::new(),
            reread,
        }
    }
}

#[async_trait]
impl EmployeeStore for RereadFailingStore {
    async fn list(&self) -> Result<Vec<Employee>, AppError> {
        self.inner.list().await
    }

    async fn insert(&self, employee: &Employee) -> Result<ObjectId, AppError> {
        self.inner.insert(employee).await
    }

    async fn find_by_id(&self, _id: ObjectId) -> Result<Option<Employee>, AppError> {
        match self.reread {
            Reread::Missing => Ok(None),
            Reread::Broken => Err(AppError::DatabaseError(anyhow::anyhow!(
                "findOne failed: connection reset by peer"
            ))),
        }
    }

    async fn update_fields(
        &self,
        id: ObjectId,
        fields: &EmployeeFields,
    ) -> Result<Option<Employee>, AppError> {
        self.inner.update_fields(id, fields).await
    }

    async fn delete(&self, id: ObjectId) -> Result<u64, AppError> {
        self.inner.delete(id).await
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.inner.health_check().await
    }
}

pub fn reread_failing_app(reread: Reread) -> (Router, Arc<RereadFailingStore>) {
    let store = Arc::new(RereadFailingStore::new(reread));
    let router = build_router(AppState::new(store.clone()));
    (router, store)
}

/// Full application bound to a random port against a live MongoDB.
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub db: MongoDb,
    pub db_name: String,
}

impl TestApp {
    pub async fn spawn() -> Self {
        std::env::set_var("MONGODB_URI", "mongodb://localhost:27017");

        let db_name = format!("employee_test_{}", Uuid::new_v4());

        let mut config = EmployeeConfig::load().expect("Failed to load configuration");
        config.common.port = 0; // Random port for testing
        config.mongodb.database = db_name.clone();

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let db = app.db().expect("MongoDB handle missing").clone();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            db,
            db_name,
        }
    }

    pub async fn cleanup(&self) {
        let _ = self.db.client().database(&self.db_name).drop(None).await;
    }
}
