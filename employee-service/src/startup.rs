use crate::config::EmployeeConfig;
use crate::handlers;
use crate::services::{EmployeeStore, MongoDb, MongoEmployeeStore};
use axum::{
    middleware,
    routing::{get, put},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::request_id_middleware;
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub employees: Arc<dyn EmployeeStore>,
}

impl AppState {
    pub fn new(employees: Arc<dyn EmployeeStore>) -> Self {
        Self { employees }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route(
            "/employee",
            get(handlers::list_employees).post(handlers::create_employee),
        )
        .route(
            "/employee/:id",
            put(handlers::update_employee).delete(handlers::delete_employee),
        )
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
    db: Option<MongoDb>,
}

impl Application {
    /// Connect to MongoDB, then bind the HTTP listener.
    pub async fn build(config: EmployeeConfig) -> Result<Self, AppError> {
        let db = MongoDb::connect(
            &config.mongodb.uri,
            &config.mongodb.database,
            config.mongodb.connect_timeout(),
        )
        .await
        .map_err(|e| {
            tracing::error!("Failed to connect to MongoDB: {}", e);
            e
        })?;

        let store: Arc<dyn EmployeeStore> = Arc::new(MongoEmployeeStore::new(db.clone()));

        let mut app = Self::build_with_store(config.common.port, store).await?;
        app.db = Some(db);
        Ok(app)
    }

    /// Bind the HTTP listener over an already constructed store.
    pub async fn build_with_store(
        port: u16,
        store: Arc<dyn EmployeeStore>,
    ) -> Result<Self, AppError> {
        let app = build_router(AppState::new(store));

        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
            db: None,
        })
    }

    pub fn db(&self) -> Option<&MongoDb> {
        self.db.as_ref()
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
