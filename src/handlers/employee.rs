use actix_web::{web, HttpResponse};
use log::info;
use serde_json::json;

use crate::config::NotificationTemplate;
use crate::errors::AppError;
use crate::models::employee::{EmailRequest, EmployeePayload, StatusUpdate};
use crate::services::employee::EmployeeService;
use crate::utils::mail::{render_appointment_email, Mailer};
use crate::utils::validation::validate_payload;

pub async fn create_employee(
    service: web::Data<EmployeeService>,
    payload: web::Json<EmployeePayload>,
) -> Result<HttpResponse, AppError> {
    let employee = service.create(payload.into_inner()).await?;
    info!("Employee created with ID: {}", employee.id);
    Ok(HttpResponse::Ok().json(employee))
}

pub async fn get_employees(service: web::Data<EmployeeService>) -> Result<HttpResponse, AppError> {
    let employees = service.list().await?;
    Ok(HttpResponse::Ok().json(employees))
}

pub async fn get_employee(
    service: web::Data<EmployeeService>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let employee = service.get(&id).await?;
    Ok(HttpResponse::Ok().json(employee))
}

pub async fn delete_employee(
    service: web::Data<EmployeeService>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = id.into_inner();
    service.delete(&id).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": format!("Employee with ID {} deleted successfully", id),
    })))
}

pub async fn update_employee(
    service: web::Data<EmployeeService>,
    id: web::Path<String>,
    payload: web::Json<EmployeePayload>,
) -> Result<HttpResponse, AppError> {
    let employee = service.update(&id, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(employee))
}

pub async fn update_employee_status(
    service: web::Data<EmployeeService>,
    id: web::Path<String>,
    update: web::Json<StatusUpdate>,
) -> Result<HttpResponse, AppError> {
    let employee = service.update_status(&id, update.status.as_deref()).await?;
    Ok(HttpResponse::Ok().json(employee))
}

pub async fn send_email(
    service: web::Data<EmployeeService>,
    mailer: web::Data<dyn Mailer>,
    template: web::Data<NotificationTemplate>,
    id: web::Path<String>,
    request: web::Json<EmailRequest>,
) -> Result<HttpResponse, AppError> {
    let employee = service.get(&id).await?;
    validate_payload(&request.0)?;

    let html = render_appointment_email(&employee, &template)?;

    mailer
        .send_html(&template.from, &request.email, &template.subject, html)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Email sent successfully",
    })))
}
