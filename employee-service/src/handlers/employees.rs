use crate::dtos::{EmployeeRequest, EmployeeResponse};
use crate::models::{parse_employee_id, Employee, EmployeeFields};
use crate::startup::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;

pub const DELETED_MESSAGE: &str = "Deleted Employee";

/// Body rejections surface as 400 with the parser's message, never as a store error.
fn bad_body(rejection: JsonRejection) -> AppError {
    AppError::BadRequest(anyhow::anyhow!(rejection.body_text()))
}

pub async fn list_employees(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let employees = state.employees.list().await.map_err(|e| {
        tracing::error!("Failed to list employees: {}", e);
        e
    })?;

    let body: Vec<EmployeeResponse> = employees.into_iter().map(EmployeeResponse::from).collect();
    Ok(Json(body))
}

pub async fn create_employee(
    State(state): State<AppState>,
    payload: Result<Json<EmployeeRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = payload.map_err(bad_body)?;
    let employee = Employee::new(request.into());

    let inserted_id = state.employees.insert(&employee).await.map_err(|e| {
        tracing::error!(
            "Failed to insert employee {} into database: {}",
            employee.id,
            e
        );
        e
    })?;

    let created = state
        .employees
        .find_by_id(inserted_id)
        .await?
        .ok_or_else(|| {
            AppError::InternalError(anyhow::anyhow!(
                "Employee {} missing right after insert",
                inserted_id
            ))
        })?;

    tracing::info!(employee_id = %created.id, "Employee created");

    Ok((StatusCode::CREATED, Json(EmployeeResponse::from(created))))
}

pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<EmployeeRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let employee_id = parse_employee_id(&id)?;
    let Json(request) = payload.map_err(bad_body)?;
    let fields = EmployeeFields::from(request);

    state
        .employees
        .update_fields(employee_id, &fields)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update employee {}: {}", employee_id, e);
            e
        })?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Employee {} not found", id)))?;

    tracing::info!(employee_id = %employee_id, "Employee updated");

    Ok(Json(EmployeeResponse::with_id(id, fields)))
}

pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let employee_id = parse_employee_id(&id)?;

    let deleted = state.employees.delete(employee_id).await.map_err(|e| {
        tracing::error!("Failed to delete employee {}: {}", employee_id, e);
        AppError::GatewayTimeout(anyhow::Error::new(e))
    })?;

    if deleted < 1 {
        return Err(AppError::NotFound(anyhow::anyhow!(
            "Employee {} not found",
            id
        )));
    }

    tracing::info!(employee_id = %employee_id, "Employee deleted");

    Ok((StatusCode::OK, DELETED_MESSAGE))
}
