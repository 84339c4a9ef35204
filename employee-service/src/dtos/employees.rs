use crate::models::{Employee, EmployeeFields};
use serde::{Deserialize, Serialize};

/// Body of create and update requests. Unknown fields, including a client
/// supplied `id`, are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeRequest {
    pub name: String,
    pub age: f64,
    pub salary: f64,
}

impl From<EmployeeRequest> for EmployeeFields {
    fn from(req: EmployeeRequest) -> Self {
        Self {
            name: req.name,
            age: req.age,
            salary: req.salary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeResponse {
    pub id: String,
    pub name: String,
    pub age: f64,
    pub salary: f64,
}

impl EmployeeResponse {
    pub fn with_id(id: impl Into<String>, fields: EmployeeFields) -> Self {
        Self {
            id: id.into(),
            name: fields.name,
            age: fields.age,
            salary: fields.salary,
        }
    }
}

impl From<Employee> for EmployeeResponse {
    fn from(employee: Employee) -> Self {
        Self::with_id(employee.id.to_hex(), employee.fields)
    }
}
