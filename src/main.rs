mod config;
mod db;
mod errors;
mod handlers;
mod models;
mod services;
mod utils;
#[cfg(test)]
mod test_support;

use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use log::{error, info};
use std::sync::Arc;

use crate::config::{AppConfig, StorageBackend};
use crate::db::{EmployeeStore, InMemoryEmployeeStore, PgEmployeeStore};
use crate::services::employee::EmployeeService;
use crate::utils::mail::{Mailer, SmtpMailer};

async fn build_store(storage: &StorageBackend) -> Result<Arc<dyn EmployeeStore>, db::StoreError> {
    match storage {
        StorageBackend::Postgres { database_url } => {
            let pool = db::create_pool(database_url).await?;
            let store = PgEmployeeStore::new(pool);
            store.ensure_schema().await?;
            Ok(Arc::new(store))
        }
        StorageBackend::Memory => {
            info!("Using in-memory employee store; records are lost on exit");
            Ok(Arc::new(InMemoryEmployeeStore::new()))
        }
    }
}

fn exit_with(message: String) -> std::io::Error {
    error!("{}", message);
    std::io::Error::new(std::io::ErrorKind::Other, message)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env()
        .map_err(|err| exit_with(format!("Invalid configuration: {}", err)))?;

    let store = build_store(&config.storage)
        .await
        .map_err(|err| exit_with(format!("Failed to initialise the database: {}", err)))?;

    let mailer: Arc<dyn Mailer> = Arc::new(
        SmtpMailer::new(&config.smtp)
            .map_err(|err| exit_with(format!("Failed to configure SMTP transport: {}", err)))?,
    );

    let service = web::Data::new(EmployeeService::new(store));
    let mailer = web::Data::from(mailer);
    let template = web::Data::new(config.notification.clone());

    info!("Starting server at {}", config.bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .wrap(handlers::cors())
            .app_data(service.clone())
            .app_data(mailer.clone())
            .app_data(template.clone())
            .configure(handlers::configure)
    })
    .bind(&config.bind_address)?
    .run()
    .await
}
