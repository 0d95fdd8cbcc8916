use std::sync::Arc;

use actix_web::{web::Data, HttpServer};
use coach_backend::{
    build_app,
    config::Config,
    db,
    utils::mailer::LogMailer,
    AppState,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::from_filename(".env")
        .or_else(|_| dotenv::dotenv())
        .ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| {
        log::error!("{}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    let pool = db::initialize_db(&config.database_url).await.map_err(|e| {
        log::error!("Error building a connection pool: {}", e);
        std::io::Error::other(e)
    })?;

    let host = config.host.clone();
    let port = config.port;
    let mailer = Arc::new(LogMailer {
        from: format!("Coach <{}>", config.admin_email),
    });

    let app_data = Data::new(AppState {
        db: pool,
        config,
        mailer,
    });

    log::info!("Listening on {}:{}", host, port);

    HttpServer::new(move || build_app(app_data.clone()))
        .bind((host, port))?
        .run()
        .await
}
