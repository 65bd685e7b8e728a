pub mod employee;

use actix_cors::Cors;
use actix_web::web;

use crate::errors::AppError;

/// Accepts cross-origin requests from any origin.
pub fn cors() -> Cors {
    Cors::permissive()
}

/// Mounts the `/api` routes and routes JSON body rejections through
/// [`AppError`].
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .service(
        web::scope("/api")
            .service(
                web::resource("/employee")
                    .route(web::post().to(employee::create_employee)),
            )
            .service(
                web::resource("/employees")
                    .route(web::get().to(employee::get_employees)),
            )
            .service(
                web::resource("/employee/{id}")
                    .route(web::get().to(employee::get_employee))
                    .route(web::delete().to(employee::delete_employee))
                    .route(web::patch().to(employee::update_employee))
                    .route(web::put().to(employee::update_employee_status)),
            )
            .service(
                web::resource("/employee/{id}/send-email")
                    .route(web::post().to(employee::send_email)),
            ),
    );
}
