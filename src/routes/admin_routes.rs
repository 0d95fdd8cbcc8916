use actix_web::web;

use crate::{
    handlers::{admin_handler, plan_handler},
    middleware::jwt_middleware::VerifyJWT,
};

pub fn config(config: &mut web::ServiceConfig, jwt_middleware: VerifyJWT) {
    config.service(
        web::resource("/v1/admin/login")
        .route(web::post().to(admin_handler::admin_login))
    ).service(
        web::scope("/v1/admin")
        .service(admin_handler::dashboard)
        .service(admin_handler::delete_user)
        .service(plan_handler::get_user_plan)
        .service(plan_handler::save_user_plan)
        .wrap(jwt_middleware)
    );
}
