use crate::config::Config;
use crate::cors::cors;
use crate::repositories::{FileMetadataRepository, PgFileMetadataRepository};
use crate::storage::FilesStorage;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use log::{error, info};
use std::io;
use std::sync::Arc;

mod config;
mod cors;
mod database;
mod errors;
mod handlers;
mod logging;
mod models;
mod repositories;
mod requests;
mod schema;
mod storage;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();

    logging::init(&config::log_dir_from_env())?;
    let config = Config::from_env().map_err(|e| {
        error!("Invalid configuration: {}", e);
        io::Error::other(e)
    })?;

    let storage = FilesStorage::new(&config.upload_dir);
    storage.ensure_upload_dir_exists().map_err(|e| {
        error!(
            "Failed to create upload directory {}: {}",
            storage.upload_dir().display(),
            e
        );
        e
    })?;

    let pool = database::create_pool(&config.database, config.pool_size).map_err(|e| {
        error!("Could not connect to database: {}", e);
        io::Error::other(e)
    })?;
    database::run_migrations(&pool).map_err(|e| {
        error!("Could not create database tables: {}", e);
        io::Error::other(e)
    })?;

    let repo: web::Data<dyn FileMetadataRepository> = web::Data::from(
        Arc::new(PgFileMetadataRepository::new(pool)) as Arc<dyn FileMetadataRepository>,
    );
    let storage = web::Data::new(storage);

    info!("Starting server at {}", config.bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(cors())
            .app_data(repo.clone())
            .app_data(storage.clone())
            .configure(handlers::configure)
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
