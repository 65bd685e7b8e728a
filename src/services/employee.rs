use chrono::Utc;
use log::{info, warn};
use std::sync::Arc;

use crate::db::EmployeeStore;
use crate::errors::AppError;
use crate::models::employee::{Employee, EmployeePayload};

/// Business rules over an [`EmployeeStore`]: timestamps every write and
/// checks existence before mutating.
#[derive(Clone)]
pub struct EmployeeService {
    store: Arc<dyn EmployeeStore>,
}

impl EmployeeService {
    pub fn new(store: Arc<dyn EmployeeStore>) -> Self {
        EmployeeService { store }
    }

    pub async fn create(&self, payload: EmployeePayload) -> Result<Employee, AppError> {
        let employee = Employee::new(payload, Utc::now());
        info!("Saving employee {} to database", employee.display_name());

        let saved = self
            .store
            .save(&employee)
            .await
            .map_err(AppError::database("Failed to save employee"))?;

        info!("Employee saved with ID: {}", saved.id);
        Ok(saved)
    }

    pub async fn list(&self) -> Result<Vec<Employee>, AppError> {
        let employees = self
            .store
            .find_all()
            .await
            .map_err(AppError::database("Failed to fetch employees"))?;

        info!("Fetched {} employees from database", employees.len());
        Ok(employees)
    }

    /// `Ok(None)` is the not-found signal; only store faults are errors.
    pub async fn find(&self, id: &str) -> Result<Option<Employee>, AppError> {
        let employee = self
            .store
            .find_by_id(id)
            .await
            .map_err(AppError::database("Failed to fetch employee"))?;

        if employee.is_none() {
            warn!("Employee with ID {} not found", id);
        }
        Ok(employee)
    }

    pub async fn get(&self, id: &str) -> Result<Employee, AppError> {
        self.find(id)
            .await?
            .ok_or_else(|| AppError::employee_not_found(id))
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let exists = self
            .store
            .exists_by_id(id)
            .await
            .map_err(AppError::database("Failed to delete employee"))?;

        if !exists {
            return Err(AppError::employee_not_found(id));
        }

        self.store
            .delete_by_id(id)
            .await
            .map_err(AppError::database("Failed to delete employee"))?;

        info!("Employee with ID {} deleted", id);
        Ok(())
    }

    pub async fn update(&self, id: &str, payload: EmployeePayload) -> Result<Employee, AppError> {
        let mut employee = self
            .store
            .find_by_id(id)
            .await
            .map_err(AppError::database("Failed to update employee"))?
            .ok_or_else(|| AppError::employee_not_found(id))?;

        employee.merge(payload, Utc::now());

        let updated = self
            .store
            .save(&employee)
            .await
            .map_err(AppError::database("Failed to update employee"))?;

        info!("Employee {} updated with ID: {}", updated.display_name(), id);
        Ok(updated)
    }

    pub async fn update_status(&self, id: &str, status: Option<&str>) -> Result<Employee, AppError> {
        let updated = self
            .store
            .update_status(id, status, Utc::now())
            .await
            .map_err(AppError::database("Failed to update employee status"))?
            .ok_or_else(|| AppError::employee_not_found(id))?;

        info!("Employee with ID {} status set to {:?}", id, status);
        Ok(updated)
    }
}
