use crate::models::{Employee, EmployeeFields};
use crate::services::MongoDb;
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};
use service_core::error::AppError;
use tokio::sync::RwLock;

/// Persistence seam for employee records.
///
/// "No match" is reported through the `Ok` value (`None`, or a zero delete
/// count); `Err` is reserved for the store itself failing.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Employee>, AppError>;

    /// Returns the identifier the store recorded for the new document.
    async fn insert(&self, employee: &Employee) -> Result<ObjectId, AppError>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Employee>, AppError>;

    /// Overwrite name, age and salary. Returns the updated record, or `None`
    /// when nothing matched `id`.
    async fn update_fields(
        &self,
        id: ObjectId,
        fields: &EmployeeFields,
    ) -> Result<Option<Employee>, AppError>;

    /// Returns the number of deleted records (0 or 1).
    async fn delete(&self, id: ObjectId) -> Result<u64, AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}

pub struct MongoEmployeeStore {
    db: MongoDb,
}

impl MongoEmployeeStore {
    pub fn new(db: MongoDb) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EmployeeStore for MongoEmployeeStore {
    async fn list(&self) -> Result<Vec<Employee>, AppError> {
        let cursor = self.db.employees().find(doc! {}, None).await?;
        let employees: Vec<Employee> = cursor.try_collect().await?;
        Ok(employees)
    }

    async fn insert(&self, employee: &Employee) -> Result<ObjectId, AppError> {
        let result = self.db.employees().insert_one(employee, None).await?;
        result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::InternalError(anyhow::anyhow!(
                "Store returned a non-ObjectId key: {}",
                result.inserted_id
            ))
        })
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Employee>, AppError> {
        Ok(self
            .db
            .employees()
            .find_one(doc! { "_id": id }, None)
            .await?)
    }

    async fn update_fields(
        &self,
        id: ObjectId,
        fields: &EmployeeFields,
    ) -> Result<Option<Employee>, AppError> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        Ok(self
            .db
            .employees()
            .find_one_and_update(doc! { "_id": id }, fields.to_set_document(), options)
            .await?)
    }

    async fn delete(&self, id: ObjectId) -> Result<u64, AppError> {
        let result = self
            .db
            .employees()
            .delete_one(doc! { "_id": id }, None)
            .await?;
        Ok(result.deleted_count)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.db.health_check().await
    }
}

/// Process-local store, ordered by insertion.
#[derive(Default)]
pub struct InMemoryEmployeeStore {
    employees: RwLock<Vec<Employee>>,
}

impl InMemoryEmployeeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EmployeeStore for InMemoryEmployeeStore {
    async fn list(&self) -> Result<Vec<Employee>, AppError> {
        Ok(self.employees.read().await.clone())
    }

    async fn insert(&self, employee: &Employee) -> Result<ObjectId, AppError> {
        let mut employees = self.employees.write().await;
        if employees.iter().any(|e| e.id == employee.id) {
            return Err(AppError::DatabaseError(anyhow::anyhow!(
                "duplicate key: _id {}",
                employee.id
            )));
        }
        employees.push(employee.clone());
        Ok(employee.id)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Employee>, AppError> {
        Ok(self
            .employees
            .read()
            .await
            .iter()
            .find(|e| e.id == id)
            .cloned())
    }

    async fn update_fields(
        &self,
        id: ObjectId,
        fields: &EmployeeFields,
    ) -> Result<Option<Employee>, AppError> {
        let mut employees = self.employees.write().await;
        Ok(employees.iter_mut().find(|e| e.id == id).map(|e| {
            e.fields = fields.clone();
            e.clone()
        }))
    }

    async fn delete(&self, id: ObjectId) -> Result<u64, AppError> {
        let mut employees = self.employees.write().await;
        let before = employees.len();
        employees.retain(|e| e.id != id);
        Ok((before - employees.len()) as u64)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}
