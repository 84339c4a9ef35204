use employee_service::config::EmployeeConfig;
use employee_service::startup::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = EmployeeConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    init_tracing("employee-service", &config.common.log_level);

    // Fails fast when MongoDB is unreachable within the configured timeout.
    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to start employee-service: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    tracing::info!(port = app.port(), "employee-service started");

    app.run_until_stopped().await
}
