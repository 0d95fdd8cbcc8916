use actix_web::{get, http::header, post, web, HttpResponse, Responder};
use chrono::Utc;
use serde::Deserialize;
use sqlx::Error;
use validator::{Validate, ValidationError};

use crate::{
    error::ApiError,
    models::{Principal, User, UserProfile},
    utils::{
        auth::{hash_password, issue_token, new_verification_token, verify_password},
        mailer::{notify, subscription_email, verification_email},
        test_password,
    },
    AppState,
};

fn strong_password(password: &str) -> Result<(), ValidationError> {
    match test_password(password) {
        None => Ok(()),
        Some(reason) => {
            let mut err = ValidationError::new("weak_password");
            err.message = Some(reason.into());
            Err(err)
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UserRegisterRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(custom(function = "strong_password"))]
    pub password: String,
    #[validate(length(max = 20))]
    pub height: Option<String>,
    #[validate(length(max = 20))]
    pub weight: Option<String>,
    #[validate(range(min = 10, max = 120, message = "must be between 10 and 120"))]
    pub age: Option<i64>,
    #[validate(length(max = 100))]
    pub occupation: Option<String>,
    #[validate(length(max = 100))]
    pub exercise_frequency: Option<String>,
    #[validate(length(max = 20))]
    pub sex: Option<String>,
    #[validate(length(max = 2000))]
    pub medical_conditions: Option<String>,
}

#[post("/register")]
pub async fn register(
    app_state: web::Data<AppState>,
    register_json: web::Json<UserRegisterRequest>,
) -> actix_web::Result<impl Responder> {
    let req = register_json.into_inner();
    req.validate().map_err(ApiError::from)?;

    let password_hash = hash_password(&req.password)?;
    let verification_token = new_verification_token();
    let now = Utc::now();

    let res = sqlx::query(
        r#"
        INSERT INTO users
          (email, password_hash, height, weight, age, occupation, exercise_frequency,
           sex, medical_conditions, verification_token, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11)
        "#,
    )
    .bind(&req.email)
    .bind(&password_hash)
    .bind(&req.height)
    .bind(&req.weight)
    .bind(req.age)
    .bind(&req.occupation)
    .bind(&req.exercise_frequency)
    .bind(&req.sex)
    .bind(&req.medical_conditions)
    .bind(&verification_token)
    .bind(now)
    .execute(&app_state.db)
    .await;

    match res {
        Ok(_) => {}
        Err(Error::Database(db)) if db.message().contains("users.email") => {
            return Err(ApiError::Conflict(
                "Your email is already registered. Please login.".to_string(),
            )
            .into());
        }
        Err(e) => return Err(ApiError::from(e).into()),
    }

    let verification_url = format!(
        "{}/api/v1/auth/verify-email?token={}",
        app_state.config.public_base_url, verification_token
    );
    notify(app_state.mailer.as_ref(), verification_email(&req.email, &verification_url));

    log::info!("Registered {}", req.email);

    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "Registration successful! Please check your email to verify your account."
    })))
}

#[derive(Debug, Deserialize)]
pub struct VerifyEmailQuery {
    pub token: Option<String>,
}

#[get("/verify-email")]
pub async fn verify_email(
    app_state: web::Data<AppState>,
    query: web::Query<VerifyEmailQuery>,
) -> actix_web::Result<impl Responder> {
    let token = match query.token.as_deref() {
        Some(t) if !t.is_empty() => t,
        _ => return Err(ApiError::Validation("Verification token is missing.".to_string()).into()),
    };

    let result = sqlx::query(
        r#"
        UPDATE users
           SET is_verified        = 1,
               verification_token = NULL,
               updated_at         = ?1
         WHERE verification_token = ?2
        "#,
    )
    .bind(Utc::now())
    .bind(token)
    .execute(&app_state.db)
    .await
    .map_err(ApiError::from)?;

    if result.rows_affected() == 0 {
        return Err(ApiError::Validation("Invalid verification token.".to_string()).into());
    }

    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, format!("{}/personal", app_state.config.frontend_url)))
        .finish())
}

#[derive(Debug, Deserialize)]
pub struct UserLoginRequest {
    pub email: String,
    pub password: String,
}

#[post("/login")]
pub async fn login(
    app_state: web::Data<AppState>,
    login_json: web::Json<UserLoginRequest>,
) -> actix_web::Result<impl Responder> {
    let body = login_json.into_inner();

    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE email = ?1")
        .bind(&body.email)
        .fetch_optional(&app_state.db)
        .await
        .map_err(ApiError::from)?;

    let user = match user {
        Some(u) => u,
        None => return Err(ApiError::Unauthorized("Invalid credentials".to_string()).into()),
    };

    if !verify_password(&body.password, &user.password_hash)? {
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()).into());
    }

    if !user.is_verified {
        return Err(ApiError::Forbidden(
            "Email not verified. Please check your email.".to_string(),
        )
        .into());
    }

    let token = issue_token(
        Principal::User { id: user.id },
        &app_state.config.jwt_secret,
        app_state.config.token_ttl_minutes,
    )?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "token": token,
        "user": UserProfile::from(user),
    })))
}

#[derive(Debug, Deserialize, Validate)]
pub struct SubscribeRequest {
    #[validate(length(min = 1, max = 50, message = "must be 1-50 characters"))]
    pub subscription_plan: String,
    #[validate(length(min = 1, max = 20, message = "must be 1-20 characters"))]
    pub subscription_price: String,
    #[validate(length(min = 1, max = 50, message = "must be 1-50 characters"))]
    pub training_category: String,
}

/// Guarded; mounted as its own resource beside the public auth routes.
pub async fn subscribe(
    app_state: web::Data<AppState>,
    principal: web::ReqData<Principal>,
    json_data: web::Json<SubscribeRequest>,
) -> actix_web::Result<impl Responder> {
    let user_id = principal.require_user()?;
    json_data.validate().map_err(ApiError::from)?;

    let result = sqlx::query(
        r#"
        UPDATE users
           SET subscription_plan  = ?1,
               subscription_price = ?2,
               training_category  = ?3,
               updated_at         = ?4
         WHERE id = ?5
        "#,
    )
    .bind(&json_data.subscription_plan)
    .bind(&json_data.subscription_price)
    .bind(&json_data.training_category)
    .bind(Utc::now())
    .bind(user_id)
    .execute(&app_state.db)
    .await
    .map_err(ApiError::from)?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("User not found".to_string()).into());
    }

    let user: User = sqlx::query_as("SELECT * FROM users WHERE id = ?1")
        .bind(user_id)
        .fetch_one(&app_state.db)
        .await
        .map_err(ApiError::from)?;

    notify(
        app_state.mailer.as_ref(),
        subscription_email(
            &app_state.config.admin_email,
            &user.email,
            &json_data.subscription_plan,
            &json_data.subscription_price,
            &json_data.training_category,
        ),
    );

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Subscription plan updated successfully",
        "user": UserProfile::from(user),
    })))
}

pub async fn personal(
    app_state: web::Data<AppState>,
    principal: web::ReqData<Principal>,
) -> actix_web::Result<impl Responder> {
    let user_id = principal.require_user()?;

    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE id = ?1")
        .bind(user_id)
        .fetch_optional(&app_state.db)
        .await
        .map_err(ApiError::from)?;

    let user = user.ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;
    if !user.is_verified {
        return Err(ApiError::Forbidden(
            "Email not verified. Please check your email.".to_string(),
        )
        .into());
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({ "user": UserProfile::from(user) })))
}
