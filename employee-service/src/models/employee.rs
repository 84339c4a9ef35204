use mongodb::bson::{doc, oid::ObjectId, Document};
use serde::{Deserialize, Serialize};
use service_core::error::AppError;

/// The mutable part of an employee record. Updates always overwrite all three.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeFields {
    pub name: String,
    pub age: f64,
    pub salary: f64,
}

impl EmployeeFields {
    /// `$set` document overwriting every mutable field.
    pub fn to_set_document(&self) -> Document {
        doc! {
            "$set": {
                "name": self.name.clone(),
                "age": self.age,
                "salary": self.salary,
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(flatten)]
    pub fields: EmployeeFields,
}

impl Employee {
    /// New record with a freshly generated identifier.
    pub fn new(fields: EmployeeFields) -> Self {
        Self {
            id: ObjectId::new(),
            fields,
        }
    }
}

/// Resolve a path parameter into the store's native key.
pub fn parse_employee_id(raw: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw).map_err(|e| {
        tracing::debug!(id = %raw, error = %e, "Rejected malformed employee id");
        AppError::InvalidId(raw.to_string())
    })
}
