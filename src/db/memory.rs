use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::{EmployeeStore, StoreError};
use crate::models::employee::Employee;

#[derive(Default)]
pub struct InMemoryEmployeeStore {
    records: RwLock<Vec<Employee>>,
}

impl InMemoryEmployeeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EmployeeStore for InMemoryEmployeeStore {
    async fn save(&self, employee: &Employee) -> Result<Employee, StoreError> {
        let mut records = self.records.write().await;
        match records.iter_mut().find(|e| e.id == employee.id) {
            Some(existing) => *existing = employee.clone(),
            None => records.push(employee.clone()),
        }
        Ok(employee.clone())
    }

    async fn find_all(&self) -> Result<Vec<Employee>, StoreError> {
        Ok(self.records.read().await.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Employee>, StoreError> {
        Ok(self.records.read().await.iter().find(|e| e.id == id).cloned())
    }

    async fn exists_by_id(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.records.read().await.iter().any(|e| e.id == id))
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        self.records.write().await.retain(|e| e.id != id);
        Ok(())
    }

    async fn update_status(
        &self,
        id: &str,
        status: Option<&str>,
        date: DateTime<Utc>,
    ) -> Result<Option<Employee>, StoreError> {
        let mut records = self.records.write().await;
        Ok(records.iter_mut().find(|e| e.id == id).map(|existing| {
            existing.status = status.map(str::to_string);
            existing.date = date;
            existing.clone()
        }))
    }
}
