use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenvy::dotenv;
use env_logger::Env;

use studyhall_server::{app_state::AppState, config::Config, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(Env::new().default_filter_or("info"));

    let config = Config::from_env();

    let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
    if app_env == "production" {
        config.validate_for_production();
    }

    let host = config.web_server_host.clone();
    let port = config.web_server_port;
    let state = Arc::new(AppState::new(config));

    log::info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .service(handlers::generate_lesson)
            .service(handlers::health_check)
            .service(handlers::health_check_live)
    })
    .bind((host, port))?
    .run()
    .await
}
