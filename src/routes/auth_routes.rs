use actix_web::web;

use crate::{handlers::auth_handler, middleware::jwt_middleware::VerifyJWT};

pub fn config(config: &mut web::ServiceConfig, jwt_middleware: VerifyJWT) {
    config.service(
        web::scope("/v1/auth")
        .service(auth_handler::register)
        .service(auth_handler::verify_email)
        .service(auth_handler::login)
        .service(
            web::resource("/subscribe")
            .route(web::post().to(auth_handler::subscribe))
            .wrap(jwt_middleware.clone())
        )
        .service(
            web::resource("/personal")
            .route(web::get().to(auth_handler::personal))
            .wrap(jwt_middleware)
        )
    );
}
