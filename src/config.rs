use std::env;
use std::fmt;

const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";
const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
const DEFAULT_SMTP_PORT: u16 = 587;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres { database_url: String },
    Memory,
}

#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

/// Static content of the appointment notification email.
#[derive(Debug, Clone)]
pub struct NotificationTemplate {
    pub from: String,
    pub subject: String,
    pub schedule_note: String,
    pub meeting_link: String,
    pub signature: String,
}

impl Default for NotificationTemplate {
    fn default() -> Self {
        NotificationTemplate {
            from: "no-reply@localhost".to_string(),
            subject: "Thank You for Your Appointment".to_string(),
            schedule_note: "Please join between 2:00 pm - 5:00 pm (IST) from the link below."
                .to_string(),
            meeting_link: "https://chat.gise.at/#Doctor".to_string(),
            signature: "Doctor Admin".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_address: String,
    pub storage: StorageBackend,
    pub smtp: SmtpSettings,
    pub notification: NotificationTemplate,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} must be set", key),
            ConfigError::Invalid { key, value } => write!(f, "invalid value for {}: {:?}", key, value),
        }
    }
}

impl std::error::Error for ConfigError {}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // empty values count as unset
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let storage = match get("STORAGE_BACKEND").as_deref().unwrap_or("postgres") {
            "postgres" => StorageBackend::Postgres {
                database_url: get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
            },
            "memory" => StorageBackend::Memory,
            other => {
                return Err(ConfigError::Invalid {
                    key: "STORAGE_BACKEND",
                    value: other.to_string(),
                })
            }
        };

        let port = match get("SMTP_PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::Invalid {
                key: "SMTP_PORT",
                value: raw.clone(),
            })?,
            None => DEFAULT_SMTP_PORT,
        };

        let defaults = NotificationTemplate::default();
        let notification = NotificationTemplate {
            from: get("MAIL_FROM").unwrap_or(defaults.from),
            subject: get("MAIL_SUBJECT").unwrap_or(defaults.subject),
            schedule_note: get("MAIL_SCHEDULE_NOTE").unwrap_or(defaults.schedule_note),
            meeting_link: get("MAIL_MEETING_LINK").unwrap_or(defaults.meeting_link),
            signature: get("MAIL_SIGNATURE").unwrap_or(defaults.signature),
        };

        Ok(AppConfig {
            bind_address: get("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            storage,
            smtp: SmtpSettings {
                host: get("SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
                port,
                username: get("SMTP_USERNAME").unwrap_or_default(),
                password: get("SMTP_PASSWORD").unwrap_or_default(),
            },
            notification,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn postgres_requires_database_url() {
        assert_eq!(load(&[]).unwrap_err(), ConfigError::Missing("DATABASE_URL"));
    }

    #[test]
    fn memory_backend_uses_defaults() {
        let config = load(&[("STORAGE_BACKEND", "memory")]).unwrap();
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.bind_address, DEFAULT_BIND_ADDRESS);
        assert_eq!(config.smtp.port, DEFAULT_SMTP_PORT);
        assert_eq!(config.notification.subject, "Thank You for Your Appointment");
    }

    #[test]
    fn overrides_are_applied() {
        let config = load(&[
            ("DATABASE_URL", "postgres://localhost/appointments"),
            ("SMTP_PORT", "2525"),
            ("MAIL_FROM", "clinic@example.com"),
            ("MAIL_MEETING_LINK", "https://meet.example.com/room"),
        ])
        .unwrap();
        assert_eq!(
            config.storage,
            StorageBackend::Postgres { database_url: "postgres://localhost/appointments".to_string() }
        );
        assert_eq!(config.smtp.port, 2525);
        assert_eq!(config.notification.from, "clinic@example.com");
        assert_eq!(config.notification.meeting_link, "https://meet.example.com/room");
    }

    #[test]
    fn rejects_bad_port_and_backend() {
        assert!(matches!(
            load(&[("STORAGE_BACKEND", "memory"), ("SMTP_PORT", "many")]),
            Err(ConfigError::Invalid { key: "SMTP_PORT", .. })
        ));
        assert!(matches!(
            load(&[("STORAGE_BACKEND", "mongo")]),
            Err(ConfigError::Invalid { key: "STORAGE_BACKEND", .. })
        ));
    }
}
