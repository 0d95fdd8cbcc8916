use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web::{self, Data},
    App, Error,
};

use crate::{
    config::Config, db::DbPool, error::ApiError, middleware::jwt_middleware::VerifyJWT,
    utils::mailer::Mailer,
};

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod utils;

#[cfg(test)]
pub mod test_utils;

pub struct AppState {
    pub db: DbPool,
    pub config: Config,
    pub mailer: Arc<dyn Mailer>,
}

/// The whole HTTP surface under `/api`, shared by `main` and the handler tests.
pub fn build_app(
    app_data: Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let jwt_middleware = VerifyJWT::new(app_data.clone());

    let cors = Cors::default()
        .allow_any_origin()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600);

    let json_config = web::JsonConfig::default()
        .limit(256 * 1024)
        .error_handler(|err, _req| ApiError::Validation(err.to_string()).into());
    let path_config = web::PathConfig::default()
        .error_handler(|err, _req| ApiError::Validation(err.to_string()).into());
    let query_config = web::QueryConfig::default()
        .error_handler(|err, _req| ApiError::Validation(err.to_string()).into());

    App::new()
        .app_data(app_data)
        .app_data(json_config)
        .app_data(path_config)
        .app_data(query_config)
        .wrap(Logger::default())
        .wrap(cors)
        .service(
            web::scope("/api")
                .configure(|cfg| routes::auth_routes::config(cfg, jwt_middleware.clone()))
                .configure(|cfg| routes::admin_routes::config(cfg, jwt_middleware.clone()))
                .configure(|cfg| routes::message_routes::config(cfg, jwt_middleware.clone()))
                .configure(|cfg| routes::plan_routes::config(cfg, jwt_middleware)),
        )
}
