use actix_web::{delete, get, web, HttpResponse, Responder};
use serde::Deserialize;

use crate::{
    error::ApiError,
    models::{Principal, User, UserProfile},
    utils::auth::issue_token,
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct AdminLoginRequest {
    pub email: String,
    pub password: String,
}

/// The coach has no user row; credentials come from configuration.
pub async fn admin_login(
    app_state: web::Data<AppState>,
    login_json: web::Json<AdminLoginRequest>,
) -> actix_web::Result<impl Responder> {
    let config = &app_state.config;

    if login_json.email != config.admin_email || login_json.password != config.admin_password {
        log::warn!("Rejected admin login for {}", login_json.email);
        return Err(ApiError::Unauthorized("Invalid admin credentials".to_string()).into());
    }

    let token = issue_token(Principal::Admin, &config.jwt_secret, config.token_ttl_minutes)?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "token": token })))
}

#[get("/dashboard")]
pub async fn dashboard(
    app_state: web::Data<AppState>,
    principal: web::ReqData<Principal>,
) -> actix_web::Result<impl Responder> {
    principal.require_admin()?;

    let users: Vec<User> = sqlx::query_as("SELECT * FROM users ORDER BY id ASC")
        .fetch_all(&app_state.db)
        .await
        .map_err(ApiError::from)?;

    let users: Vec<UserProfile> = users.into_iter().map(UserProfile::from).collect();

    Ok(HttpResponse::Ok().json(serde_json::json!({ "users": users })))
}

#[delete("/users/{userId}")]
pub async fn delete_user(
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
    principal: web::ReqData<Principal>,
) -> actix_web::Result<impl Responder> {
    principal.require_admin()?;
    let user_id = path.into_inner();

    // plan days, exercises and messages cascade
    let result = sqlx::query("DELETE FROM users WHERE id = ?1")
        .bind(user_id)
        .execute(&app_state.db)
        .await
        .map_err(ApiError::from)?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound(format!("No user found with id {}", user_id)).into());
    }

    log::info!("Deleted user {}", user_id);

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "User deleted" })))
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};
    use serde_json::{json, Value};

    use crate::{
        build_app,
        test_utils::{admin_token, seed_user, setup_test_db, test_state, user_token},
    };

    #[actix_web::test]
    async fn admin_login_checks_configured_credentials() {
        let pool = setup_test_db().await;
        let state = test_state(pool);
        let app = test::init_service(build_app(state.clone())).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/admin/login")
            .set_json(json!({ "email": state.config.admin_email, "password": "wrong" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::post()
            .uri("/api/v1/admin/login")
            .set_json(json!({
                "email": state.config.admin_email,
                "password": state.config.admin_password
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let token = body["token"].as_str().unwrap();

        let req = test::TestRequest::get()
            .uri("/api/v1/admin/dashboard")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn dashboard_lists_users_in_id_order() {
        let pool = setup_test_db().await;
        let first = seed_user(&pool, "first@example.com", true).await;
        let second = seed_user(&pool, "second@example.com", false).await;
        let state = test_state(pool);
        let app = test::init_service(build_app(state.clone())).await;

        let req = test::TestRequest::get()
            .uri("/api/v1/admin/dashboard")
            .insert_header(("Authorization", format!("Bearer {}", admin_token(&state))))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let users = body["users"].as_array().unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0]["id"], first);
        assert_eq!(users[1]["id"], second);
        assert!(users[0].get("password_hash").is_none());

        let req = test::TestRequest::get()
            .uri("/api/v1/admin/dashboard")
            .insert_header(("Authorization", format!("Bearer {}", user_token(&state, first))))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn delete_user_cascades_plan() {
        let pool = setup_test_db().await;
        let user = seed_user(&pool, "gone@example.com", true).await;
        let state = test_state(pool.clone());
        let app = test::init_service(build_app(state.clone())).await;
        let admin = admin_token(&state);

        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/admin/plans/{}", user))
            .insert_header(("Authorization", format!("Bearer {}", admin)))
            .set_json(json!({ "days": [{ "day_number": 1, "exercises": [{
                "drill_name": "Row", "weight": "", "reps": "", "sets": "", "rest_time": ""
            }]}]}))
            .to_request();
        assert!(test::call_service(&app, req).await.status().is_success());

        let req = test::TestRequest::delete()
            .uri(&format!("/api/v1/admin/users/{}", user))
            .insert_header(("Authorization", format!("Bearer {}", admin)))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM exercises")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(remaining, 0);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/v1/admin/users/{}", user))
            .insert_header(("Authorization", format!("Bearer {}", admin)))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }
}
