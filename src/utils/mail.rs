use askama::Template;
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use log::info;

use crate::config::{NotificationTemplate, SmtpSettings};
use crate::errors::AppError;
use crate::models::employee::Employee;

/// Sends a single HTML message to a single recipient.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_html(&self, from: &str, to: &str, subject: &str, html: String) -> Result<(), AppError>;
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(settings: &SmtpSettings) -> Result<Self, AppError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
            .map_err(|err| AppError::Mail(err.to_string()))?
            .port(settings.port);

        if !settings.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ));
        }

        Ok(SmtpMailer { transport: builder.build() })
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, AppError> {
    address
        .parse()
        .map_err(|err| AppError::Mail(format!("invalid address {}: {}", address, err)))
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_html(&self, from: &str, to: &str, subject: &str, html: String) -> Result<(), AppError> {
        let message = Message::builder()
            .from(parse_mailbox(from)?)
            .to(parse_mailbox(to)?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html)
            .map_err(|err| AppError::Mail(err.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|err| AppError::Mail(err.to_string()))?;

        info!("Email sent to {}", to);
        Ok(())
    }
}

#[derive(Template)]
#[template(path = "appointment_email.html")]
struct AppointmentEmail<'a> {
    name: &'a str,
    status: &'a str,
    id: &'a str,
    schedule_note: &'a str,
    meeting_link: &'a str,
    signature: &'a str,
}

pub fn render_appointment_email(
    employee: &Employee,
    template: &NotificationTemplate,
) -> Result<String, AppError> {
    AppointmentEmail {
        name: employee.display_name(),
        status: employee.status.as_deref().unwrap_or(""),
        id: &employee.id,
        schedule_note: &template.schedule_note,
        meeting_link: &template.meeting_link,
        signature: &template.signature,
    }
    .render()
    .map_err(|err| AppError::Mail(format!("failed to render email: {}", err)))
}
