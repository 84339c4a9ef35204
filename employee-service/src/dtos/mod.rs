pub mod employees;

pub use employees::{EmployeeRequest, EmployeeResponse};
