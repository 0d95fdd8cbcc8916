use actix_web::web;

use crate::{handlers::plan_handler, middleware::jwt_middleware::VerifyJWT};

pub fn config(config: &mut web::ServiceConfig, jwt_middleware: VerifyJWT) {
    config.service(
        web::resource("/v1/plan-structured")
        .route(web::get().to(plan_handler::get_own_plan))
        .wrap(jwt_middleware.clone())
    ).service(
        web::resource("/v1/day/{dayId}/feedback")
        .route(web::put().to(plan_handler::update_day_feedback))
        .wrap(jwt_middleware)
    );
}
