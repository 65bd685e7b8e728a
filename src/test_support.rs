use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Mutex;

use crate::db::{EmployeeStore, StoreError, StoreErrorKind};
use crate::errors::AppError;
use crate::models::employee::Employee;
use crate::utils::mail::Mailer;

#[derive(Debug, Clone)]
pub struct SentMail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<SentMail>>,
    fail_with: Option<String>,
}

impl RecordingMailer {
    pub fn failing(message: &str) -> Self {
        RecordingMailer { sent: Mutex::new(Vec::new()), fail_with: Some(message.to_string()) }
    }

    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send_html(&self, from: &str, to: &str, subject: &str, html: String) -> Result<(), AppError> {
        if let Some(message) = &self.fail_with {
            return Err(AppError::Mail(message.clone()));
        }
        self.sent.lock().unwrap().push(SentMail {
            from: from.to_string(),
            to: to.to_string(),
            subject: subject.to_string(),
            html,
        });
        Ok(())
    }
}

/// Store whose every call fails with the given kind.
pub struct FailingStore {
    kind: StoreErrorKind,
}

impl FailingStore {
    pub fn new(kind: StoreErrorKind) -> Self {
        FailingStore { kind }
    }

    fn fail<T>(&self) -> Result<T, StoreError> {
        Err(StoreError::new(self.kind, "connection refused (os error 111)"))
    }
}

#[async_trait]
impl EmployeeStore for FailingStore {
    async fn save(&self, _employee: &Employee) -> Result<Employee, StoreError> {
        self.fail()
    }

    async fn find_all(&self) -> Result<Vec<Employee>, StoreError> {
        self.fail()
    }

    async fn find_by_id(&self, _id: &str) -> Result<Option<Employee>, StoreError> {
        self.fail()
    }

    async fn exists_by_id(&self, _id: &str) -> Result<bool, StoreError> {
        self.fail()
    }

    async fn delete_by_id(&self, _id: &str) -> Result<(), StoreError> {
        self.fail()
    }

    async fn update_status(
        &self,
        _id: &str,
        _status: Option<&str>,
        _date: DateTime<Utc>,
    ) -> Result<Option<Employee>, StoreError> {
        self.fail()
    }
}
