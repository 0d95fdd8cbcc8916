use actix_web::{get, post, web, HttpResponse, Responder};
use validator::Validate;

use crate::{
    models::{plan::FeedbackRequest, Principal, SavePlanRequest},
    repository::plan_repository,
    AppState,
};

// _______________________________________ Admin routes _______________________________________
#[get("/plans/{userId}")]
pub async fn get_user_plan(
    app_data: web::Data<AppState>,
    path: web::Path<i64>,
    principal: web::ReqData<Principal>,
) -> actix_web::Result<impl Responder> {
    principal.require_admin()?;
    let user_id = path.into_inner();

    let days = plan_repository::fetch_plan(&app_data.db, user_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "days": days })))
}

#[post("/plans/{userId}")]
pub async fn save_user_plan(
    app_data: web::Data<AppState>,
    path: web::Path<i64>,
    principal: web::ReqData<Principal>,
    json_data: web::Json<SavePlanRequest>,
) -> actix_web::Result<impl Responder> {
    principal.require_admin()?;
    json_data.validate().map_err(crate::error::ApiError::from)?;
    let user_id = path.into_inner();

    plan_repository::save_plan(&app_data.db, &principal, user_id, &json_data.days).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Plan saved successfully" })))
}

// _______________________________________ User routes _______________________________________
// Mounted as individual resources in `routes::plan_routes`.
pub async fn get_own_plan(
    app_data: web::Data<AppState>,
    principal: web::ReqData<Principal>,
) -> actix_web::Result<impl Responder> {
    let user_id = principal.require_user()?;

    let days = plan_repository::fetch_plan(&app_data.db, user_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "days": days })))
}

pub async fn update_day_feedback(
    app_data: web::Data<AppState>,
    path: web::Path<i64>,
    principal: web::ReqData<Principal>,
    json_data: web::Json<FeedbackRequest>,
) -> actix_web::Result<impl Responder> {
    let user_id = principal.require_user()?;
    json_data.validate().map_err(crate::error::ApiError::from)?;
    let day_id = path.into_inner();

    plan_repository::update_feedback(&app_data.db, day_id, user_id, &json_data.feedback).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Feedback saved" })))
}
