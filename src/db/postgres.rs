use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::info;
use sqlx::PgPool;

use super::{EmployeeStore, StoreError};
use crate::models::employee::Employee;

const EMPLOYEE_COLUMNS: &str = "id, name, email, phone, department, age, gender, status, date";

const CREATE_EMPLOYEES_TABLE: &str = "CREATE TABLE IF NOT EXISTS employees (
    seq BIGSERIAL,
    id TEXT PRIMARY KEY,
    name TEXT,
    email TEXT,
    phone TEXT,
    department TEXT,
    age INTEGER,
    gender TEXT,
    status TEXT,
    date TIMESTAMPTZ NOT NULL
)";

#[derive(Clone)]
pub struct PgEmployeeStore {
    pool: PgPool,
}

impl PgEmployeeStore {
    pub fn new(pool: PgPool) -> Self {
        PgEmployeeStore { pool }
    }

    /// Creates the `employees` table when it is missing.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_EMPLOYEES_TABLE).execute(&self.pool).await?;
        info!("employees table is ready");
        Ok(())
    }
}

#[async_trait]
impl EmployeeStore for PgEmployeeStore {
    async fn save(&self, employee: &Employee) -> Result<Employee, StoreError> {
        let sql = format!(
            "INSERT INTO employees ({cols}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name, email = EXCLUDED.email, \
             phone = EXCLUDED.phone, department = EXCLUDED.department, age = EXCLUDED.age, \
             gender = EXCLUDED.gender, status = EXCLUDED.status, date = EXCLUDED.date \
             RETURNING {cols}",
            cols = EMPLOYEE_COLUMNS
        );

        let saved = sqlx::query_as::<_, Employee>(&sql)
            .bind(&employee.id)
            .bind(&employee.name)
            .bind(&employee.email)
            .bind(&employee.phone)
            .bind(&employee.department)
            .bind(employee.age)
            .bind(&employee.gender)
            .bind(&employee.status)
            .bind(employee.date)
            .fetch_one(&self.pool)
            .await?;

        Ok(saved)
    }

    async fn find_all(&self) -> Result<Vec<Employee>, StoreError> {
        let sql = format!("SELECT {} FROM employees ORDER BY seq", EMPLOYEE_COLUMNS);
        let employees = sqlx::query_as::<_, Employee>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(employees)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Employee>, StoreError> {
        let sql = format!("SELECT {} FROM employees WHERE id = $1", EMPLOYEE_COLUMNS);
        let employee = sqlx::query_as::<_, Employee>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(employee)
    }

    async fn exists_by_id(&self, id: &str) -> Result<bool, StoreError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM employees WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn update_status(
        &self,
        id: &str,
        status: Option<&str>,
        date: DateTime<Utc>,
    ) -> Result<Option<Employee>, StoreError> {
        let sql = format!(
            "UPDATE employees SET status = $1, date = $2 WHERE id = $3 RETURNING {}",
            EMPLOYEE_COLUMNS
        );
        let employee = sqlx::query_as::<_, Employee>(&sql)
            .bind(status)
            .bind(date)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(employee)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::employee::EmployeePayload;
    use chrono::Timelike;

    // Runs only when TEST_DATABASE_URL points at a disposable PostgreSQL database.
    async fn store() -> Option<PgEmployeeStore> {
        let url = std::env::var("TEST_DATABASE_URL").ok()?;
        let pool = crate::db::create_pool(&url).await.unwrap();
        let store = PgEmployeeStore::new(pool);
        store.ensure_schema().await.unwrap();
        Some(store)
    }

    fn employee(name: &str) -> Employee {
        Employee::new(
            EmployeePayload {
                name: Some(name.to_string()),
                status: Some("pending".to_string()),
                ..Default::default()
            },
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn save_then_find_truncates_date_to_microseconds() {
        let Some(store) = store().await else { return };

        let employee = employee("roundtrip");
        let saved = store.save(&employee).await.unwrap();
        assert_eq!(saved.date.nanosecond() % 1_000, 0);
        assert_eq!(saved.date.timestamp_micros(), employee.date.timestamp_micros());

        let fetched = store.find_by_id(&employee.id).await.unwrap().unwrap();
        assert_eq!(fetched, saved);

        store.delete_by_id(&employee.id).await.unwrap();
    }

    #[tokio::test]
    async fn save_upserts_existing_id() {
        let Some(store) = store().await else { return };

        let mut employee = employee("before");
        store.save(&employee).await.unwrap();
        employee.name = Some("after".to_string());
        store.save(&employee).await.unwrap();

        let fetched = store.find_by_id(&employee.id).await.unwrap().unwrap();
        assert_eq!(fetched.name.as_deref(), Some("after"));
        let copies = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .filter(|e| e.id == employee.id)
            .count();
        assert_eq!(copies, 1);

        store.delete_by_id(&employee.id).await.unwrap();
        assert!(!store.exists_by_id(&employee.id).await.unwrap());
    }

    #[tokio::test]
    async fn find_all_keeps_insertion_order_across_updates() {
        let Some(store) = store().await else { return };

        let first = employee("first");
        let second = employee("second");
        store.save(&first).await.unwrap();
        store.save(&second).await.unwrap();
        store.update_status(&first.id, Some("confirmed"), Utc::now()).await.unwrap();

        let ids: Vec<String> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .filter(|id| *id == first.id || *id == second.id)
            .collect();
        assert_eq!(ids, vec![first.id.clone(), second.id.clone()]);

        store.delete_by_id(&first.id).await.unwrap();
        store.delete_by_id(&second.id).await.unwrap();
    }

    #[tokio::test]
    async fn update_status_returns_none_for_missing_id() {
        let Some(store) = store().await else { return };

        let result = store
            .update_status("no-such-employee", Some("confirmed"), Utc::now())
            .await
            .unwrap();
        assert!(result.is_none());
    }
}
