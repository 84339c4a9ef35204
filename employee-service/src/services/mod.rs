pub mod database;
pub mod employee_store;

pub use database::MongoDb;
pub use employee_store::{EmployeeStore, InMemoryEmployeeStore, MongoEmployeeStore};
