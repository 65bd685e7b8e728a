use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use validator::Validate;

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Employee {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub status: Option<String>,
    pub date: DateTime<Utc>,
}

/// Body of create and full-update requests. Client supplied `id` and `date`
/// are accepted on the wire but never read.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct EmployeePayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub status: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct StatusUpdate {
    pub status: Option<String>,
}

#[derive(Deserialize, Validate, Debug)]
pub struct EmailRequest {
    #[validate(email)]
    pub email: String,
}

impl Employee {
    pub fn new(payload: EmployeePayload, now: DateTime<Utc>) -> Self {
        Employee {
            id: Uuid::new_v4().to_string(),
            name: payload.name,
            email: payload.email,
            phone: payload.phone,
            department: payload.department,
            age: payload.age,
            gender: payload.gender,
            status: payload.status,
            date: now,
        }
    }

    /// Overwrites every field present in `payload` and stamps `now`.
    pub fn merge(&mut self, payload: EmployeePayload, now: DateTime<Utc>) {
        if let Some(name) = payload.name {
            self.name = Some(name);
        }
        if let Some(email) = payload.email {
            self.email = Some(email);
        }
        if let Some(phone) = payload.phone {
            self.phone = Some(phone);
        }
        if let Some(department) = payload.department {
            self.department = Some(department);
        }
        if let Some(age) = payload.age {
            self.age = Some(age);
        }
        if let Some(gender) = payload.gender {
            self.gender = Some(gender);
        }
        if let Some(status) = payload.status {
            self.status = Some(status);
        }
        self.date = now;
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}
