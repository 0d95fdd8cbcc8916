use actix_web::web;

use crate::{handlers::message_handler, middleware::jwt_middleware::VerifyJWT};

pub fn config(config: &mut web::ServiceConfig, jwt_middleware: VerifyJWT) {
    config.service(
        web::scope("/v1/messages")
        .service(message_handler::list_messages)
        .service(message_handler::send_message)
        .service(message_handler::unread_from_coach)
        .service(message_handler::conversation)
        .service(message_handler::mark_read)
        .wrap(jwt_middleware)
    );
}
