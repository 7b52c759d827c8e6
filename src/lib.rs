use actix_web::{http, web, App, HttpServer};
use actix_web::dev::Server;
use tracing_actix_web::TracingLogger;
use std::net::TcpListener;
use actix_cors::Cors;

pub mod aggregation;
pub mod config;
pub mod db;
pub mod error;
mod handlers;
mod middleware;
pub mod models;
mod routes;
pub mod telemetry;
pub mod utils;

use crate::config::jwt::JwtSettings;
use crate::db::SharedStore;
use crate::routes::init_routes;

pub fn run(
    listener: TcpListener,
    store: SharedStore,
    jwt_settings: JwtSettings,
    allowed_origins: Vec<String>,
) -> Result<Server, std::io::Error> {
    // Wrap using web::Data, which boils down to an Arc smart pointer
    let store = web::Data::new(store);
    let jwt_settings = web::Data::new(jwt_settings);

    let server = HttpServer::new(move || {
        let cors = allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH"])
            .allowed_headers(vec![
                http::header::AUTHORIZATION,
                http::header::ACCEPT,
                http::header::CONTENT_TYPE,
            ])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .wrap(TracingLogger::default())
            .wrap(cors)
            // Get a pointer copy and attach it to the application state
            .app_data(store.clone())
            .app_data(jwt_settings.clone())
            .configure(init_routes)
    })
    .listen(listener)?
    .run();

    Ok(server)
}
